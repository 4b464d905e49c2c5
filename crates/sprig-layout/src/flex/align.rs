//! Cross sizing and alignment.
//!
//! [§ 8 Alignment](https://www.w3.org/TR/css-flexbox-1/#alignment)
//! [§ 9.4 Cross Size Determination](https://www.w3.org/TR/css-flexbox-1/#cross-sizing)
//! [§ 9.5 Main-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#main-alignment)
//! [§ 9.6 Cross-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#cross-alignment)

use sprig_style::math::{clamp_maybe, clamp_size};
use sprig_style::{
    AlignContent, AlignItems, FlexDirection, JustifyContent, MaybeMath, Size, Style,
};

use super::items::FlexItem;
use super::lines::FlexLine;
use super::{Container, LayoutContext, LayoutMode, count_f32};

impl LayoutContext<'_> {
    /// [§ 9.4 step 7](https://www.w3.org/TR/css-flexbox-1/#algo-cross-item)
    ///
    /// "Determine the hypothetical cross size of each item by performing
    /// layout with the used main size and the available space, treating
    /// auto as fit-content."
    pub(super) fn determine_hypothetical_cross(
        &mut self,
        container: &Container,
        items: &mut [FlexItem],
        parent_size: Size<Option<f32>>,
    ) {
        let dir = container.dir;
        for item in items.iter_mut() {
            let main = item.target.main(dir);
            let declared = item.size.cross(dir).or_else(|| {
                item.aspect_ratio
                    .map(|ratio| if dir.is_row() { main / ratio } else { main * ratio })
            });
            let known_cross =
                clamp_maybe(declared, item.min_size.cross(dir), item.max_size.cross(dir));
            let known = Size::from_main_cross(dir, Some(main), known_cross);
            let measured = self
                .compute_node(item.node, known, parent_size, container.direction, LayoutMode::AtMost)
                .size
                .cross(dir);
            let cross = clamp_size(measured, item.min_size.cross(dir), item.max_size.cross(dir));
            item.hypothetical_inner.set_cross(dir, cross);
            item.hypothetical_outer
                .set_cross(dir, cross + item.margin.cross(dir));
        }
    }

    /// Baselines of `align-self: baseline` items in a row container,
    /// measured from the top of each item's margin box.
    pub(super) fn compute_baselines(
        &mut self,
        container: &Container,
        items: &mut [FlexItem],
        parent_size: Size<Option<f32>>,
    ) {
        let dir = container.dir;
        for item in items
            .iter_mut()
            .filter(|item| item.align_self == AlignItems::Baseline)
        {
            let known = Size::from_main_cross(
                dir,
                Some(item.target.main(dir)),
                Some(item.hypothetical_inner.cross(dir)),
            );
            let result = self.compute_node(
                item.node,
                known,
                parent_size,
                container.direction,
                LayoutMode::Exact,
            );
            item.baseline = result.baseline.unwrap_or(0.0) + item.margin.top;
        }
    }
}

/// [§ 9.4 step 8](https://www.w3.org/TR/css-flexbox-1/#algo-cross-line)
///
/// "If the flex container is single-line and has a definite cross size,
/// the cross size of the flex line is the flex container's inner cross
/// size. Otherwise, for each flex line: [...] the largest of the outer
/// hypothetical cross sizes, [...] and the sum of the largest distance
/// between each item's baseline and its hypothetical outer cross-start
/// edge, and the largest distance between each item's baseline and its
/// hypothetical outer cross-end edge."
///
/// "If the flex container is single-line, then clamp the line's
/// cross-size to be within the container's computed min and max cross
/// sizes."
pub(super) fn size_lines(
    container: &Container,
    style: &Style,
    parent_size: Size<Option<f32>>,
    items: &[FlexItem],
    lines: &mut [FlexLine],
) {
    let dir = container.dir;
    let baseline_aligned = |item: &FlexItem| dir.is_row() && item.align_self == AlignItems::Baseline;

    for line in lines.iter_mut() {
        let line_items = &items[line.range.clone()];
        let max_baseline = line_items
            .iter()
            .filter(|item| baseline_aligned(*item))
            .map(|item| item.baseline)
            .fold(0.0, f32::max);
        line.max_baseline = max_baseline;
        line.cross_size = line_items
            .iter()
            .map(|item| {
                let outer = item.hypothetical_outer.cross(dir);
                if baseline_aligned(item) {
                    max_baseline - item.baseline + outer
                } else {
                    outer
                }
            })
            .fold(0.0, f32::max);
    }

    if let [line] = lines {
        if let Some(inner_cross) = container.node_inner_size.cross(dir) {
            line.cross_size = inner_cross;
        } else {
            let frame = container.padding_border.cross(dir);
            let min = style.min_size.resolve(parent_size).cross(dir).maybe_sub(frame);
            let max = style.max_size.resolve(parent_size).cross(dir).maybe_sub(frame);
            line.cross_size = clamp_size(line.cross_size, min, max).max(0.0);
        }
    }
}

/// [§ 9.4 step 10](https://www.w3.org/TR/css-flexbox-1/#algo-line-stretch)
///
/// "If the flex container has a definite cross size, align-content is
/// stretch, and the sum of the flex lines' cross sizes is less than the
/// flex container's inner cross size, increase the cross size of each
/// flex line by equal amounts such that the sum of their cross sizes
/// exactly equals the flex container's inner cross size."
pub(super) fn stretch_lines(lines: &mut [FlexLine], inner_cross: f32) {
    let total: f32 = lines.iter().map(|line| line.cross_size).sum();
    let free = inner_cross - total;
    if free > 0.0 && !lines.is_empty() {
        let share = free / count_f32(lines.len());
        for line in lines.iter_mut() {
            line.cross_size += share;
        }
    }
}

/// [§ 9.4 step 11](https://www.w3.org/TR/css-flexbox-1/#algo-stretch)
///
/// "If a flex item has align-self: stretch, its computed cross size
/// property is auto, and neither of its cross-axis margins are auto, the
/// used outer cross size is the used cross size of its flex line, clamped
/// according to the item's used min and max cross sizes. Otherwise, the
/// used cross size is the item's hypothetical cross size."
pub(super) fn determine_used_cross(items: &mut [FlexItem], lines: &[FlexLine], dir: FlexDirection) {
    for line in lines {
        for item in &mut items[line.range.clone()] {
            let stretched = item.align_self == AlignItems::Stretch
                && item.size.cross(dir).is_none()
                && item.aspect_ratio.is_none()
                && !item.has_auto_cross_margin(dir);
            let cross = if stretched {
                clamp_size(
                    line.cross_size - item.margin.cross(dir),
                    item.min_size.cross(dir),
                    item.max_size.cross(dir),
                )
                .max(0.0)
            } else {
                item.hypothetical_inner.cross(dir)
            };
            item.target.set_cross(dir, cross);
            item.outer_target
                .set_cross(dir, cross + item.margin.cross(dir));
        }
    }
}

/// [§ 9.5 Main-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#main-alignment)
///
/// "If the remaining free space is positive and at least one main-axis
/// margin on this line is auto, distribute the free space equally among
/// these margins. Otherwise [...] align the items along the main-axis per
/// justify-content."
///
/// Sets each item's `offset_main`, walking the line in visual order.
pub(super) fn distribute_main(
    items: &mut [FlexItem],
    dir: FlexDirection,
    inner_main: f32,
    justify: JustifyContent,
) {
    let used: f32 = items.iter().map(|item| item.outer_target.main(dir)).sum();
    let free = inner_main - used;
    let auto_margins: usize = items
        .iter()
        .map(|item| {
            usize::from(item.auto_margin.main_start(dir)) + usize::from(item.auto_margin.main_end(dir))
        })
        .sum();

    let (leading, between) = if free > 0.0 && auto_margins > 0 {
        let share = free / count_f32(auto_margins);
        for item in items.iter_mut() {
            if item.auto_margin.main_start(dir) {
                *item.margin.main_start_mut(dir) += share;
            }
            if item.auto_margin.main_end(dir) {
                *item.margin.main_end_mut(dir) += share;
            }
        }
        (0.0, 0.0)
    } else {
        justify_spacing(justify, free, items.len(), dir.is_reverse())
    };

    let count = items.len();
    let mut cursor = leading;
    for step in 0..count {
        let index = if dir.is_reverse() { count - 1 - step } else { step };
        let item = &mut items[index];
        item.offset_main = cursor + item.margin.main_start(dir);
        cursor += item.target.main(dir) + item.margin.main(dir) + between;
    }
}

/// Compute justify-content alignment offsets.
///
/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Returns `(initial_offset, gap_between_items)`, measured from the
/// physical start of the main axis. In a `-reverse` direction the main
/// start is the physical end, so the start and end keywords swap.
pub(super) fn justify_spacing(
    justify: JustifyContent,
    free_space: f32,
    item_count: usize,
    reverse: bool,
) -> (f32, f32) {
    if item_count == 0 {
        return (0.0, 0.0);
    }
    let pack_start = if reverse { (free_space, 0.0) } else { (0.0, 0.0) };
    let pack_end = if reverse { (0.0, 0.0) } else { (free_space, 0.0) };

    match justify {
        // "Flex items are packed toward the start of the line."
        JustifyContent::FlexStart => pack_start,

        // "Flex items are packed toward the end of the line."
        JustifyContent::FlexEnd => pack_end,

        // "Flex items are packed toward the center of the line."
        JustifyContent::Center => (free_space / 2.0, 0.0),

        // "If the leftover free-space is negative or there is only a single
        // flex item on the line, this value is identical to flex-start."
        JustifyContent::SpaceBetween => {
            if item_count <= 1 || free_space <= 0.0 {
                pack_start
            } else {
                (0.0, free_space / count_f32(item_count - 1))
            }
        }

        // "If the leftover free-space is negative or there is only a single
        // flex item on the line, this value is identical to center."
        JustifyContent::SpaceAround => {
            if free_space <= 0.0 {
                (free_space / 2.0, 0.0)
            } else {
                let gap = free_space / count_f32(item_count);
                (gap / 2.0, gap)
            }
        }

        // Equal spacing before, between and after every item.
        JustifyContent::SpaceEvenly => {
            if free_space <= 0.0 {
                (free_space / 2.0, 0.0)
            } else {
                let gap = free_space / count_f32(item_count + 1);
                (gap, gap)
            }
        }
    }
}

/// [§ 9.6 Cross-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#cross-alignment)
///
/// "If a flex item has auto cross-axis margins: If its outer cross size
/// [...] is less than the cross size of its flex line, distribute the
/// difference in those sizes equally to the auto margins. [...]
/// Align all flex items along the cross-axis per align-self, if neither
/// of the item's cross-axis margins are auto."
pub(super) fn align_in_line(
    items: &mut [FlexItem],
    line: &FlexLine,
    dir: FlexDirection,
    wrap_reverse: bool,
) {
    for item in items.iter_mut() {
        let free = line.cross_size - item.outer_target.cross(dir);
        item.offset_cross = 0.0;

        let start_auto = item.auto_margin.cross_start(dir);
        let end_auto = item.auto_margin.cross_end(dir);
        if start_auto || end_auto {
            let free = free.max(0.0);
            if start_auto && end_auto {
                *item.margin.cross_start_mut(dir) += free / 2.0;
                *item.margin.cross_end_mut(dir) += free / 2.0;
            } else if start_auto {
                *item.margin.cross_start_mut(dir) += free;
            } else {
                *item.margin.cross_end_mut(dir) += free;
            }
            continue;
        }

        let pack_start = if wrap_reverse { free } else { 0.0 };
        let pack_end = if wrap_reverse { 0.0 } else { free };
        item.offset_cross = match item.align_self {
            AlignItems::FlexStart | AlignItems::Stretch => pack_start,
            AlignItems::FlexEnd => pack_end,
            AlignItems::Center => free / 2.0,
            AlignItems::Baseline if dir.is_row() => line.max_baseline - item.baseline,
            AlignItems::Baseline => pack_start,
        };
    }
}

/// [§ 8.4 Packing Flex Lines: the align-content property](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
///
/// Returns `(initial_offset, gap_between_lines)` from the physical cross
/// start. Under `wrap-reverse` the cross start is the physical end.
pub(super) fn align_content_spacing(
    align: AlignContent,
    free_space: f32,
    line_count: usize,
    wrap_reverse: bool,
) -> (f32, f32) {
    if line_count == 0 {
        return (0.0, 0.0);
    }
    let pack_start = if wrap_reverse { (free_space, 0.0) } else { (0.0, 0.0) };
    let pack_end = if wrap_reverse { (0.0, 0.0) } else { (free_space, 0.0) };

    match align {
        AlignContent::FlexStart | AlignContent::Stretch => pack_start,
        AlignContent::FlexEnd => pack_end,
        AlignContent::Center => (free_space / 2.0, 0.0),
        AlignContent::SpaceBetween => {
            if line_count <= 1 || free_space <= 0.0 {
                pack_start
            } else {
                (0.0, free_space / count_f32(line_count - 1))
            }
        }
        AlignContent::SpaceAround => {
            if free_space <= 0.0 {
                (free_space / 2.0, 0.0)
            } else {
                let gap = free_space / count_f32(line_count);
                (gap / 2.0, gap)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_justify_spacing_keywords() {
        assert_eq!(justify_spacing(JustifyContent::FlexStart, 60.0, 3, false), (0.0, 0.0));
        assert_eq!(justify_spacing(JustifyContent::FlexEnd, 60.0, 3, false), (60.0, 0.0));
        assert_eq!(justify_spacing(JustifyContent::Center, 60.0, 3, false), (30.0, 0.0));
        assert_eq!(justify_spacing(JustifyContent::SpaceBetween, 60.0, 3, false), (0.0, 30.0));
        assert_eq!(justify_spacing(JustifyContent::SpaceAround, 60.0, 3, false), (10.0, 20.0));
        assert_eq!(justify_spacing(JustifyContent::SpaceEvenly, 60.0, 3, false), (15.0, 15.0));
    }

    #[test]
    fn test_justify_spacing_reverse_swaps_start_and_end() {
        assert_eq!(justify_spacing(JustifyContent::FlexStart, 60.0, 3, true), (60.0, 0.0));
        assert_eq!(justify_spacing(JustifyContent::FlexEnd, 60.0, 3, true), (0.0, 0.0));
    }

    #[test]
    fn test_justify_spacing_negative_free_space() {
        assert_eq!(justify_spacing(JustifyContent::SpaceBetween, -20.0, 3, false), (0.0, 0.0));
        assert_eq!(justify_spacing(JustifyContent::SpaceAround, -20.0, 3, false), (-10.0, 0.0));
        assert_eq!(justify_spacing(JustifyContent::SpaceEvenly, -20.0, 3, false), (-10.0, 0.0));
    }

    #[test]
    fn test_justify_spacing_single_item_space_between() {
        assert_eq!(justify_spacing(JustifyContent::SpaceBetween, 50.0, 1, false), (0.0, 0.0));
    }

    #[test]
    fn test_align_content_spacing() {
        assert_eq!(align_content_spacing(AlignContent::FlexEnd, 40.0, 2, false), (40.0, 0.0));
        assert_eq!(align_content_spacing(AlignContent::FlexStart, 40.0, 2, true), (40.0, 0.0));
        assert_eq!(align_content_spacing(AlignContent::SpaceBetween, 40.0, 2, false), (0.0, 40.0));
        assert_eq!(align_content_spacing(AlignContent::SpaceAround, 40.0, 2, false), (10.0, 20.0));
    }
}
