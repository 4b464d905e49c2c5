//! Flex items and their base sizes.
//!
//! [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)

use sprig_style::math::clamp_size;
use sprig_style::{AlignItems, Dimension, FlexDirection, MaybeMath, Overflow, Rect, Size, Style};
use sprig_tree::NodeId;

use super::{Container, LayoutContext, LayoutMode, apply_aspect_ratio};

/// Per-item data collected during flex layout.
///
/// Sizes are border-box sizes; `margin` holds resolved margins with `auto`
/// edges as 0 until alignment hands them free space.
#[derive(Debug, Clone)]
pub(super) struct FlexItem {
    pub(super) node: NodeId,
    /// Position among the container's style children.
    pub(super) index: usize,
    pub(super) order: u32,

    pub(super) size: Size<Option<f32>>,
    pub(super) min_size: Size<Option<f32>>,
    pub(super) max_size: Size<Option<f32>>,
    pub(super) margin: Rect<f32>,
    pub(super) auto_margin: Rect<bool>,
    pub(super) insets: Rect<Option<f32>>,
    pub(super) align_self: AlignItems,
    pub(super) aspect_ratio: Option<f32>,

    pub(super) grow: f32,
    pub(super) shrink: f32,
    pub(super) flex_basis: f32,
    /// Flex basis minus main-axis padding and border; weights shrinking.
    pub(super) inner_flex_basis: f32,
    /// Explicit or automatic minimum main size.
    pub(super) min_main: f32,

    pub(super) hypothetical_inner: Size<f32>,
    pub(super) hypothetical_outer: Size<f32>,
    pub(super) target: Size<f32>,
    pub(super) outer_target: Size<f32>,

    pub(super) violation: f32,
    pub(super) frozen: bool,

    /// Baseline plus top margin, for baseline-aligned items.
    pub(super) baseline: f32,
    /// Main-axis offset of the border box from the content start.
    pub(super) offset_main: f32,
    /// Cross-axis offset of the margin box within its line.
    pub(super) offset_cross: f32,
}

impl FlexItem {
    /// Offset from `position: relative` insets, as `(main, cross)`. The
    /// start edge wins over the end edge.
    pub(super) fn relative_offset(&self, dir: FlexDirection) -> (f32, f32) {
        let main = self
            .insets
            .main_start(dir)
            .or_else(|| self.insets.main_end(dir).map(|end| -end))
            .unwrap_or(0.0);
        let cross = self
            .insets
            .cross_start(dir)
            .or_else(|| self.insets.cross_end(dir).map(|end| -end))
            .unwrap_or(0.0);
        (main, cross)
    }

    pub(super) fn has_auto_cross_margin(&self, dir: FlexDirection) -> bool {
        self.auto_margin.cross_start(dir) || self.auto_margin.cross_end(dir)
    }
}

impl LayoutContext<'_> {
    /// Build the in-flow items of a container, in style order.
    ///
    /// Hidden and absolutely positioned children are skipped.
    pub(super) fn collect_items(&mut self, container: &Container, style: &Style) -> Vec<FlexItem> {
        let tree = self.tree;
        let dir = container.dir;
        let inner = container.node_inner_size;

        let mut items = Vec::new();
        for (index, &child) in tree.children(container.node).iter().enumerate() {
            let child_style = tree.style(child);
            if child_style.is_hidden() || child_style.is_absolute() {
                continue;
            }

            let aspect_ratio = child_style.used_aspect_ratio();
            let size = apply_aspect_ratio(child_style.size.resolve(inner), aspect_ratio);
            let min_size = child_style.min_size.resolve(inner);
            let max_size = child_style.max_size.resolve(inner);
            let margin = child_style.margin.resolve_edges(inner.width);
            let auto_margin = child_style.margin.map(Dimension::is_auto);
            let padding_border = child_style.padding.resolve_edges(inner.width)
                + child_style.border.resolve_edges(inner.width);
            let align_self = child_style.align_self.resolve(style.align_items);

            // [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
            //
            // "If the item has a definite used flex basis, that's the flex
            // base size." Otherwise size the item's content, stretched to
            // the line when its cross size will be stretched anyway.
            let declared_basis = child_style
                .flex_basis
                .resolve(inner.main(dir))
                .or(size.main(dir));
            let flex_basis = match declared_basis {
                Some(basis) => basis,
                None => {
                    let stretched = (align_self == AlignItems::Stretch
                        && !auto_margin.cross_start(dir)
                        && !auto_margin.cross_end(dir))
                    .then(|| inner.cross(dir).maybe_sub(margin.cross(dir)))
                    .flatten()
                    .map(|cross| {
                        clamp_size(cross.max(0.0), min_size.cross(dir), max_size.cross(dir))
                    });
                    let known = Size::from_main_cross(dir, None, size.cross(dir).or(stretched));
                    self.compute_node(
                        child,
                        known,
                        container.available_space,
                        container.direction,
                        LayoutMode::AtMost,
                    )
                    .size
                    .main(dir)
                }
            };
            let flex_basis = clamp_size(flex_basis, min_size.main(dir), max_size.main(dir));

            // [§ 4.5 Automatic Minimum Size of Flex Items](https://www.w3.org/TR/css-flexbox-1/#min-size-auto)
            //
            // "the content-based minimum size of a flex item is the smaller
            // of its specified size suggestion and its content size
            // suggestion if its specified size suggestion exists"
            let min_main = match min_size.main(dir) {
                Some(min) => min,
                None => match child_style.overflow {
                    Overflow::Hidden | Overflow::Scroll => 0.0,
                    Overflow::Visible if tree.is_measured(child) => {
                        padding_border.main(dir).maybe_min(max_size.main(dir))
                    }
                    Overflow::Visible => self
                        .compute_node(
                            child,
                            Size::NONE,
                            container.available_space,
                            container.direction,
                            LayoutMode::ContentFit,
                        )
                        .size
                        .main(dir)
                        .maybe_min(size.main(dir))
                        .maybe_min(max_size.main(dir)),
                },
            };

            let hypothetical_main = clamp_size(flex_basis, Some(min_main), max_size.main(dir));

            items.push(FlexItem {
                node: child,
                index,
                order: u32::try_from(index).unwrap_or(u32::MAX),
                size,
                min_size,
                max_size,
                margin,
                auto_margin,
                insets: child_style.position.resolve_insets(inner),
                align_self,
                aspect_ratio,
                grow: child_style.grow_factor(),
                shrink: child_style.shrink_factor(),
                flex_basis,
                inner_flex_basis: (flex_basis - padding_border.main(dir)).max(0.0),
                min_main,
                hypothetical_inner: Size::from_main_cross(dir, hypothetical_main, 0.0),
                hypothetical_outer: Size::from_main_cross(
                    dir,
                    hypothetical_main + margin.main(dir),
                    0.0,
                ),
                target: Size::ZERO,
                outer_target: Size::ZERO,
                violation: 0.0,
                frozen: false,
                baseline: 0.0,
                offset_main: 0.0,
                offset_cross: 0.0,
            });
        }
        items
    }
}
