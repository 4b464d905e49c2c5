//! Flex lines.
//!
//! [§ 9.3 Main Size Determination](https://www.w3.org/TR/css-flexbox-1/#algo-line-break)

use std::ops::Range;

use sprig_style::{FlexDirection, FlexWrap};

use super::items::FlexItem;

/// A run of consecutive items laid out together.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct FlexLine {
    pub(super) range: Range<usize>,
    pub(super) cross_size: f32,
    /// Largest item baseline (plus top margin) on the line.
    pub(super) max_baseline: f32,
}

impl FlexLine {
    const fn new(range: Range<usize>) -> Self {
        Self {
            range,
            cross_size: 0.0,
            max_baseline: 0.0,
        }
    }
}

/// [§ 9.3 step 5](https://www.w3.org/TR/css-flexbox-1/#algo-line-break)
///
/// "If the flex container is single-line, collect all the flex items into
/// a single flex line. Otherwise, starting from the first uncollected
/// item, collect consecutive items one by one until the first time that
/// the next collected item would not fit into the flex container's inner
/// main size [...]. If the very first uncollected item wouldn't fit,
/// collect just it into the line."
///
/// An indefinite main size never breaks. There is always at least one
/// line, possibly empty.
pub(super) fn collect_lines(
    items: &[FlexItem],
    dir: FlexDirection,
    wrap: FlexWrap,
    available_main: Option<f32>,
) -> Vec<FlexLine> {
    let limit = match (wrap, available_main) {
        (FlexWrap::NoWrap, _) | (_, None) => return vec![FlexLine::new(0..items.len())],
        (FlexWrap::Wrap | FlexWrap::WrapReverse, Some(limit)) => limit,
    };

    let mut lines = Vec::new();
    let mut start = 0;
    let mut line_length = 0.0;
    for (index, item) in items.iter().enumerate() {
        let outer = item.hypothetical_outer.main(dir);
        if index > start && line_length + outer > limit {
            lines.push(FlexLine::new(start..index));
            start = index;
            line_length = 0.0;
        }
        line_length += outer;
    }
    lines.push(FlexLine::new(start..items.len()));
    lines
}

/// Sum of the outer target main sizes of a line's items.
pub(super) fn outer_target_main(items: &[FlexItem], dir: FlexDirection) -> f32 {
    items.iter().map(|item| item.outer_target.main(dir)).sum()
}
