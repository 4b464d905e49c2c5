//! The style record and its keyword enums.
//!
//! [§ 5 Ordering and Orientation](https://www.w3.org/TR/css-flexbox-1/#flow-order)
//! [§ 8 Alignment](https://www.w3.org/TR/css-flexbox-1/#alignment)
//!
//! Every keyword enum prints its CSS keyword through `Display`, parses it
//! back through `FromStr`, and uses the same kebab-case spelling in JSON.

use serde::{Deserialize, Serialize};
use strum_macros::{Display as KeywordDisplay, EnumString};

use crate::dimension::Dimension;
use crate::geometry::{Rect, Size};
use crate::math::finite;

/// [§ 3 Flex Layout Box Model](https://www.w3.org/TR/css-flexbox-1/#flex-containers)
///
/// "display: flex — This value causes an element to generate a flex
/// container box that is block-level when placed in flow layout."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Display {
    /// The node generates a flex container.
    #[default]
    Flex,
    /// The node generates no box at all.
    None,
}

/// [§ 3 Positioning schemes](https://www.w3.org/TR/css-position-3/#position-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PositionType {
    /// In-flow; `position` insets shift the box without affecting siblings.
    #[default]
    Relative,
    /// Out-of-flow; placed against the parent's padding box.
    Absolute,
}

/// [§ 2.1 Specifying Directionality](https://www.w3.org/TR/css-writing-modes-4/#direction)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// Take the parent's resolved direction (left-to-right at the root).
    #[default]
    Inherit,
    /// Left-to-right: `start` is the left edge.
    Ltr,
    /// Right-to-left: `start` is the right edge.
    Rtl,
}

impl Direction {
    /// Resolve `inherit` against the parent's resolved direction.
    #[must_use]
    pub const fn resolve(self, parent: Self) -> Self {
        match self {
            Self::Inherit => match parent {
                Self::Rtl => Self::Rtl,
                Self::Inherit | Self::Ltr => Self::Ltr,
            },
            other => other,
        }
    }
}

/// [§ 5.1 Flex Flow Direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
///
/// "The flex-direction property specifies how flex items are placed in the
/// flex container, by setting the direction of the flex container's main
/// axis."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexDirection {
    /// "The flex container's main axis has the same orientation as the
    /// inline axis."
    #[default]
    Row,
    /// "The flex container's main axis has the same orientation as the
    /// block axis."
    Column,
    /// "Same as row, except the main-start and main-end directions are
    /// swapped."
    RowReverse,
    /// "Same as column, except the main-start and main-end directions are
    /// swapped."
    ColumnReverse,
}

impl FlexDirection {
    /// Whether the main axis is horizontal.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Whether the main axis is vertical.
    #[must_use]
    pub const fn is_column(self) -> bool {
        !self.is_row()
    }

    /// Whether main-start and main-end are swapped.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// [§ 5.2 Flex Line Wrapping](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexWrap {
    /// "The flex container is single-line."
    #[default]
    NoWrap,
    /// "The flex container is multi-line."
    Wrap,
    /// "Same as wrap", with cross-start and cross-end swapped.
    WrapReverse,
}

/// [§ 3 Scrolling and Clipping](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
///
/// Decides the automatic minimum size of a flex item
/// ([§ 4.5](https://www.w3.org/TR/css-flexbox-1/#min-size-auto)).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Overflow {
    /// Content is not clipped; its extent floors the item's main size.
    #[default]
    Visible,
    /// Content is clipped to the box.
    Hidden,
    /// Content is clipped and scrollable.
    Scroll,
}

/// [§ 8.3 Cross-axis Alignment: the align-items property](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignItems {
    /// "The cross-start margin edge of the flex item is placed flush with
    /// the cross-start edge of the line."
    FlexStart,
    /// "The cross-end margin edge of the flex item is placed flush with the
    /// cross-end edge of the line."
    FlexEnd,
    /// "The flex item's margin box is centered in the cross axis within
    /// the line."
    Center,
    /// "The flex item participates in baseline alignment."
    Baseline,
    /// "If the cross size property of the flex item computes to auto, and
    /// neither of the cross-axis margins are auto, the flex item is
    /// stretched."
    #[default]
    Stretch,
}

/// [§ 8.3 align-self](https://www.w3.org/TR/css-flexbox-1/#propdef-align-self)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignSelf {
    /// Use the parent's `align-items`.
    #[default]
    Auto,
    /// See [`AlignItems::FlexStart`].
    FlexStart,
    /// See [`AlignItems::FlexEnd`].
    FlexEnd,
    /// See [`AlignItems::Center`].
    Center,
    /// See [`AlignItems::Baseline`].
    Baseline,
    /// See [`AlignItems::Stretch`].
    Stretch,
}

impl AlignSelf {
    /// Resolve `auto` against the parent's `align-items`.
    #[must_use]
    pub const fn resolve(self, parent: AlignItems) -> AlignItems {
        match self {
            Self::Auto => parent,
            Self::FlexStart => AlignItems::FlexStart,
            Self::FlexEnd => AlignItems::FlexEnd,
            Self::Center => AlignItems::Center,
            Self::Baseline => AlignItems::Baseline,
            Self::Stretch => AlignItems::Stretch,
        }
    }
}

/// [§ 8.4 Packing Flex Lines: the align-content property](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignContent {
    /// "Lines are packed toward the start of the flex container."
    FlexStart,
    /// "Lines are packed toward the end of the flex container."
    FlexEnd,
    /// "Lines are packed toward the center of the flex container."
    Center,
    /// "Lines stretch to take up the remaining space."
    #[default]
    Stretch,
    /// "Lines are evenly distributed in the flex container."
    SpaceBetween,
    /// "Lines are evenly distributed in the flex container, with half-size
    /// spaces on either end."
    SpaceAround,
}

/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, KeywordDisplay, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JustifyContent {
    /// "Flex items are packed toward the start of the line."
    #[default]
    FlexStart,
    /// "Flex items are packed toward the end of the line."
    FlexEnd,
    /// "Flex items are packed toward the center of the line."
    Center,
    /// "Flex items are evenly distributed in the line."
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size
    /// spaces on either end."
    SpaceAround,
    /// Every gap, including the two ends, is the same size.
    SpaceEvenly,
}

/// Everything the resolver needs to know about one node.
///
/// Missing JSON fields take their defaults, so `{}` is a valid style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Whether the node generates a box.
    pub display: Display,
    /// In-flow or absolutely positioned.
    pub position_type: PositionType,
    /// Inline direction; only the physical side of `start`/`end` depends on it.
    pub direction: Direction,
    /// Main axis orientation.
    pub flex_direction: FlexDirection,
    /// Single- or multi-line.
    pub flex_wrap: FlexWrap,
    /// Clipping behavior, which decides the automatic minimum size.
    pub overflow: Overflow,
    /// Default cross-axis alignment for children.
    pub align_items: AlignItems,
    /// Cross-axis alignment of this node inside its parent's line.
    pub align_self: AlignSelf,
    /// Packing of lines in a multi-line container.
    pub align_content: AlignContent,
    /// Main-axis packing of items in each line.
    pub justify_content: JustifyContent,
    /// Insets: relative offsets, or absolute placement edges.
    pub position: Rect<Dimension>,
    /// Outer spacing; `auto` margins absorb free space.
    pub margin: Rect<Dimension>,
    /// Inner spacing between border and content.
    pub padding: Rect<Dimension>,
    /// Border widths.
    pub border: Rect<Dimension>,
    /// [§ 7.1](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property) share of positive free space.
    pub flex_grow: f32,
    /// [§ 7.1](https://www.w3.org/TR/css-flexbox-1/#flex-shrink-property) share of negative free space.
    pub flex_shrink: f32,
    /// [§ 7.1](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property) initial main size.
    pub flex_basis: Dimension,
    /// Preferred border-box size.
    pub size: Size<Dimension>,
    /// Lower bound on the border-box size.
    pub min_size: Size<Dimension>,
    /// Upper bound on the border-box size.
    pub max_size: Size<Dimension>,
    /// `width / height`, used to derive a missing axis from a known one.
    pub aspect_ratio: Option<f32>,
}

impl Style {
    /// The style of a freshly created node.
    pub const DEFAULT: Self = Self {
        display: Display::Flex,
        position_type: PositionType::Relative,
        direction: Direction::Inherit,
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::NoWrap,
        overflow: Overflow::Visible,
        align_items: AlignItems::Stretch,
        align_self: AlignSelf::Auto,
        align_content: AlignContent::Stretch,
        justify_content: JustifyContent::FlexStart,
        position: Rect::uniform(Dimension::Undefined),
        margin: Rect::uniform(Dimension::Undefined),
        padding: Rect::uniform(Dimension::Undefined),
        border: Rect::uniform(Dimension::Undefined),
        flex_grow: 0.0,
        flex_shrink: 0.0,
        flex_basis: Dimension::Auto,
        size: Size::AUTO,
        min_size: Size::AUTO,
        max_size: Size::AUTO,
        aspect_ratio: None,
    };

    /// The grow factor with negative and non-finite values read as 0.
    #[must_use]
    pub fn grow_factor(&self) -> f32 {
        flex_factor(self.flex_grow)
    }

    /// The shrink factor with negative and non-finite values read as 0.
    #[must_use]
    pub fn shrink_factor(&self) -> f32 {
        flex_factor(self.flex_shrink)
    }

    /// The aspect ratio when it is usable (finite and positive).
    #[must_use]
    pub fn used_aspect_ratio(&self) -> Option<f32> {
        self.aspect_ratio.and_then(finite).filter(|ratio| *ratio > 0.0)
    }

    /// Whether the node is taken out of flow.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self.position_type, PositionType::Absolute)
    }

    /// Whether the node generates no box.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.display, Display::None)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn flex_factor(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
