//! Geometry primitives and flex axis helpers.
//!
//! [§ 2 Flex Layout Box Model and Terminology](https://www.w3.org/TR/css-flexbox-1/#box-model)
//!
//! "The main axis of a flex container is the primary axis along which flex
//! items are laid out. [...] The axis perpendicular to the main axis is
//! called the cross axis."
//!
//! The resolver works in main/cross terms and only converts to
//! width/height and x/y at the edges. The helpers here do that mapping for
//! a given [`FlexDirection`].

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::style::FlexDirection;

/// Four logical edges.
///
/// `start`/`end` are the inline (horizontal) edges: left/right in a
/// left-to-right box and right/left in a right-to-left one. `top`/`bottom`
/// are physical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Rect<T> {
    /// Inline-start edge.
    pub start: T,
    /// Inline-end edge.
    pub end: T,
    /// Top edge.
    pub top: T,
    /// Bottom edge.
    pub bottom: T,
}

impl<T: Copy> Rect<T> {
    /// A rect with every edge set to `value`.
    pub const fn uniform(value: T) -> Self {
        Self {
            start: value,
            end: value,
            top: value,
            bottom: value,
        }
    }

    /// Apply `f` to every edge.
    pub fn map<R>(self, f: impl Fn(T) -> R) -> Rect<R> {
        Rect {
            start: f(self.start),
            end: f(self.end),
            top: f(self.top),
            bottom: f(self.bottom),
        }
    }

    /// The edge where the main axis starts (ignoring `-reverse`).
    #[must_use]
    pub const fn main_start(&self, direction: FlexDirection) -> T {
        if direction.is_row() { self.start } else { self.top }
    }

    /// The edge where the main axis ends (ignoring `-reverse`).
    #[must_use]
    pub const fn main_end(&self, direction: FlexDirection) -> T {
        if direction.is_row() { self.end } else { self.bottom }
    }

    /// The edge where the cross axis starts.
    #[must_use]
    pub const fn cross_start(&self, direction: FlexDirection) -> T {
        if direction.is_row() { self.top } else { self.start }
    }

    /// The edge where the cross axis ends.
    #[must_use]
    pub const fn cross_end(&self, direction: FlexDirection) -> T {
        if direction.is_row() { self.bottom } else { self.end }
    }

    /// Mutable access to [`Rect::main_start`].
    pub const fn main_start_mut(&mut self, direction: FlexDirection) -> &mut T {
        if direction.is_row() { &mut self.start } else { &mut self.top }
    }

    /// Mutable access to [`Rect::main_end`].
    pub const fn main_end_mut(&mut self, direction: FlexDirection) -> &mut T {
        if direction.is_row() { &mut self.end } else { &mut self.bottom }
    }

    /// Mutable access to [`Rect::cross_start`].
    pub const fn cross_start_mut(&mut self, direction: FlexDirection) -> &mut T {
        if direction.is_row() { &mut self.top } else { &mut self.start }
    }

    /// Mutable access to [`Rect::cross_end`].
    pub const fn cross_end_mut(&mut self, direction: FlexDirection) -> &mut T {
        if direction.is_row() { &mut self.bottom } else { &mut self.end }
    }
}

impl Rect<f32> {
    /// All edges zero.
    pub const ZERO: Self = Self::uniform(0.0);

    /// `start + end`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.start + self.end
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Sum of the two main-axis edges.
    #[must_use]
    pub fn main(&self, direction: FlexDirection) -> f32 {
        if direction.is_row() { self.horizontal() } else { self.vertical() }
    }

    /// Sum of the two cross-axis edges.
    #[must_use]
    pub fn cross(&self, direction: FlexDirection) -> f32 {
        if direction.is_row() { self.vertical() } else { self.horizontal() }
    }
}

impl Add for Rect<f32> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            start: self.start + rhs.start,
            end: self.end + rhs.end,
            top: self.top + rhs.top,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

impl Rect<Dimension> {
    /// Resolve margin, padding or border edges.
    ///
    /// [§ 8.3 Percentage Margins and Paddings](https://www.w3.org/TR/css-flexbox-1/#item-margins)
    ///
    /// "Percentage margins and paddings on flex items [...] are resolved
    /// against the inline size of their containing block." Unresolvable
    /// edges (including `auto`) are 0.
    #[must_use]
    pub fn resolve_edges(&self, inline_reference: Option<f32>) -> Rect<f32> {
        self.map(|edge| edge.resolve_or_zero(inline_reference))
    }

    /// Resolve inset edges (`position`): horizontal edges against the
    /// reference width, vertical edges against the reference height.
    #[must_use]
    pub fn resolve_insets(&self, reference: Size<Option<f32>>) -> Rect<Option<f32>> {
        Rect {
            start: self.start.resolve(reference.width),
            end: self.end.resolve(reference.width),
            top: self.top.resolve(reference.height),
            bottom: self.bottom.resolve(reference.height),
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Size<T> {
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T: Copy> Size<T> {
    /// Build a size from its main and cross components.
    pub const fn from_main_cross(direction: FlexDirection, main: T, cross: T) -> Self {
        if direction.is_row() {
            Self {
                width: main,
                height: cross,
            }
        } else {
            Self {
                width: cross,
                height: main,
            }
        }
    }

    /// Apply `f` to both components.
    pub fn map<R>(self, f: impl Fn(T) -> R) -> Size<R> {
        Size {
            width: f(self.width),
            height: f(self.height),
        }
    }

    /// Component along the main axis.
    #[must_use]
    pub const fn main(&self, direction: FlexDirection) -> T {
        if direction.is_row() { self.width } else { self.height }
    }

    /// Component along the cross axis.
    #[must_use]
    pub const fn cross(&self, direction: FlexDirection) -> T {
        if direction.is_row() { self.height } else { self.width }
    }

    /// Overwrite the main-axis component.
    pub fn set_main(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.width = value;
        } else {
            self.height = value;
        }
    }

    /// Overwrite the cross-axis component.
    pub fn set_cross(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.height = value;
        } else {
            self.width = value;
        }
    }
}

impl Size<f32> {
    /// Zero by zero.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

impl Size<Option<f32>> {
    /// Both axes indefinite.
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };

    /// Both axes definite.
    #[must_use]
    pub const fn definite(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Fill indefinite components from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
        }
    }

    /// Resolve indefinite components to `fallback`'s values.
    #[must_use]
    pub fn unwrap_or(self, fallback: Size<f32>) -> Size<f32> {
        Size {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        }
    }
}

impl Size<Dimension> {
    /// A size with both axes `auto`.
    pub const AUTO: Self = Self {
        width: Dimension::Auto,
        height: Dimension::Auto,
    };

    /// Shorthand for a point-valued size.
    #[must_use]
    pub const fn points(width: f32, height: f32) -> Self {
        Self {
            width: Dimension::Points(width),
            height: Dimension::Points(height),
        }
    }

    /// Resolve each axis against the matching axis of `reference`.
    #[must_use]
    pub fn resolve(&self, reference: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.width.resolve(reference.width),
            height: self.height.resolve(reference.height),
        }
    }
}

/// An x/y position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Point<T> {
    /// Horizontal offset.
    pub x: T,
    /// Vertical offset.
    pub y: T,
}

impl Point<f32> {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}
