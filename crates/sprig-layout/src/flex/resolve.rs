//! [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)

use sprig_style::FlexDirection;
use sprig_style::math::clamp_size;

use super::items::FlexItem;

/// Full iterative freeze-loop algorithm for one line.
///
/// Sets every item's main target size. Without a definite `flex_space`
/// (a content-sized container) items keep their hypothetical main size.
pub(super) fn resolve_flexible_lengths(
    items: &mut [FlexItem],
    dir: FlexDirection,
    flex_space: Option<f32>,
) {
    for item in items.iter_mut() {
        item.target.set_main(dir, item.hypothetical_inner.main(dir));
        item.frozen = false;
    }

    if let Some(space) = flex_space {
        if !items.is_empty() {
            flex_line(items, dir, space);
        }
    }

    for item in items.iter_mut() {
        let outer = item.target.main(dir) + item.margin.main(dir);
        item.outer_target.set_main(dir, outer);
    }
}

fn flex_line(items: &mut [FlexItem], dir: FlexDirection, space: f32) {
    // STEP 1: "Determine the used flex factor."
    //
    // "If the sum of the outer hypothetical main sizes of all items on the
    // line is less than the flex container's inner main size, use the flex
    // grow factor for the rest of this algorithm; otherwise, use the flex
    // shrink factor."
    let sum_outer_hypo: f32 = items
        .iter()
        .map(|item| item.hypothetical_outer.main(dir))
        .sum();
    let growing = sum_outer_hypo < space;

    // STEP 2: "Size inflexible items."
    //
    // "Freeze, setting its target main size to its hypothetical main size…
    //   - any item that has a flex factor of zero
    //   - if using the flex grow factor: any item that has a flex base size
    //     greater than its hypothetical main size
    //   - if using the flex shrink factor: any item that has a flex base size
    //     less than its hypothetical main size"
    for item in items.iter_mut() {
        let factor = if growing { item.grow } else { item.shrink };
        let hypothetical = item.hypothetical_inner.main(dir);
        item.frozen = factor == 0.0
            || (growing && item.flex_basis > hypothetical)
            || (!growing && item.flex_basis < hypothetical);
    }

    // STEP 3: "Calculate initial free space."
    let initial_free_space = free_space(items, dir, space);

    // STEP 4: Loop until all items are frozen.
    loop {
        // 4a. Check for all frozen.
        if items.iter().all(|item| item.frozen) {
            break;
        }

        // 4b. Calculate remaining free space.
        let remaining_free = free_space(items, dir, space);

        // 4c. "If the sum of the unfrozen flex factors is less than one,
        //      multiply the initial free space by this sum."
        let unfrozen_factor_sum: f32 = items
            .iter()
            .filter(|item| !item.frozen)
            .map(|item| if growing { item.grow } else { item.shrink })
            .sum();
        let used_free = if unfrozen_factor_sum < 1.0 {
            let scaled = initial_free_space * unfrozen_factor_sum;
            // "…if the magnitude of this value is less than the magnitude
            // of the remaining free space, use this as the used free space."
            if scaled.abs() < remaining_free.abs() {
                scaled
            } else {
                remaining_free
            }
        } else {
            remaining_free
        };

        // 4d. Distribute free space.
        if growing {
            // "Find the ratio of the item's flex grow factor to the sum of
            // the flex grow factors of all unfrozen items on the line. Set
            // the item's target main size to its flex base size plus a
            // fraction of the remaining free space proportional to the
            // ratio."
            for item in items.iter_mut().filter(|item| !item.frozen) {
                let ratio = item.grow / unfrozen_factor_sum;
                item.target
                    .set_main(dir, used_free.mul_add(ratio, item.flex_basis));
            }
        } else {
            // "For every unfrozen item on the line, multiply its flex
            // shrink factor by its inner flex base size, and note this as
            // its scaled flex shrink factor. [...] Set the item's target
            // main size to its flex base size minus a fraction of the
            // absolute value of the remaining free space proportional to
            // the ratio."
            //
            // The free space keeps its sign, so an overfull line that
            // turned underfull after freezing grows its items back.
            let scaled_shrink_sum: f32 = items
                .iter()
                .filter(|item| !item.frozen)
                .map(|item| item.shrink * item.inner_flex_basis)
                .sum();
            for item in items.iter_mut().filter(|item| !item.frozen) {
                let target = if scaled_shrink_sum > 0.0 {
                    let ratio = item.shrink * item.inner_flex_basis / scaled_shrink_sum;
                    used_free.mul_add(ratio, item.flex_basis)
                } else {
                    item.flex_basis
                };
                item.target.set_main(dir, target);
            }
        }

        // 4e. "Fix min/max violations. Clamp each non-frozen item's target
        // main size by its used min and max main sizes and floor its
        // content-box size at zero."
        let mut total_violation = 0.0_f32;
        for item in items.iter_mut().filter(|item| !item.frozen) {
            let target = item.target.main(dir);
            let clamped = clamp_size(target, Some(item.min_main), item.max_size.main(dir)).max(0.0);
            item.violation = clamped - target;
            total_violation += item.violation;
            item.target.set_main(dir, clamped);
        }

        // 4f. "Freeze over-flexed items."
        //
        // "If the total violation is:
        //   - Zero: freeze all items.
        //   - Positive: freeze all items with min violations.
        //   - Negative: freeze all items with max violations."
        for item in items.iter_mut().filter(|item| !item.frozen) {
            item.frozen = if total_violation > 0.0 {
                item.violation > 0.0
            } else if total_violation < 0.0 {
                item.violation < 0.0
            } else {
                true
            };
        }
    }
}

/// Inner main size minus the outer sizes of the line's items: target
/// sizes for frozen items, flex base sizes for the rest.
fn free_space(items: &[FlexItem], dir: FlexDirection, space: f32) -> f32 {
    space
        - items
            .iter()
            .map(|item| {
                let main = if item.frozen {
                    item.target.main(dir)
                } else {
                    item.flex_basis
                };
                main + item.margin.main(dir)
            })
            .sum::<f32>()
}
