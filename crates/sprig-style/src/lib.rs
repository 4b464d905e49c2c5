//! Style inputs for the Sprig layout engine.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//!
//! This crate holds everything the resolver reads but never writes:
//! - [`geometry`] - `Rect`, `Size`, `Point` and the main/cross axis helpers
//! - [`dimension`] - the `Dimension` length value and its resolution rules
//! - [`math`] - arithmetic over optional (possibly indefinite) lengths
//! - [`style`] - the `Style` record and its keyword enums

pub mod dimension;
pub mod geometry;
pub mod math;
pub mod style;

pub use dimension::Dimension;
pub use geometry::{Point, Rect, Size};
pub use math::MaybeMath;
pub use style::{
    AlignContent, AlignItems, AlignSelf, Direction, Display, FlexDirection, FlexWrap,
    JustifyContent, Overflow, PositionType, Style,
};
