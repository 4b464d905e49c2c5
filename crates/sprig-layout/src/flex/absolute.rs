//! Absolutely positioned children.
//!
//! [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
//!
//! "As it is out-of-flow, an absolutely-positioned child of a flex
//! container does not participate in flex layout. The static position of
//! an absolutely-positioned child of a flex container is determined such
//! that the child is positioned as if it were the sole flex item in the
//! flex container."
//!
//! The containing block is the container's padding box.

use sprig_style::math::{clamp_maybe, clamp_size};
use sprig_style::{AlignItems, JustifyContent, Point, Rect, Size, Style};

use super::{Container, LayoutContext, LayoutMode, apply_aspect_ratio, point_from_main_cross};
use crate::layout_node::LayoutNode;

impl LayoutContext<'_> {
    /// Size and place every absolutely positioned child of the container
    /// whose border-box size is `size`, storing each into `slots` at its
    /// style index.
    pub(super) fn place_absolute_children(
        &mut self,
        container: &Container,
        style: &Style,
        size: Size<f32>,
        slots: &mut [Option<LayoutNode>],
    ) {
        let tree = self.tree;
        let border = container.border;
        let block = Size {
            width: (size.width - border.horizontal()).max(0.0),
            height: (size.height - border.vertical()).max(0.0),
        };
        let block_size = Size::definite(block.width, block.height);

        for (index, &child) in tree.children(container.node).iter().enumerate() {
            let child_style = tree.style(child);
            if child_style.is_hidden() || !child_style.is_absolute() {
                continue;
            }

            let insets = child_style.position.resolve_insets(block_size);
            let margin = child_style.margin.resolve_edges(Some(block.width));
            let min_size = child_style.min_size.resolve(block_size);
            let max_size = child_style.max_size.resolve(block_size);
            let declared = child_style.size.resolve(block_size);

            // Both opposite insets fix the size on that axis.
            let width = match (insets.start, insets.end) {
                (Some(start), Some(end)) => Some(block.width - start - end - margin.horizontal()),
                _ => declared.width,
            };
            let height = match (insets.top, insets.bottom) {
                (Some(top), Some(bottom)) => Some(block.height - top - bottom - margin.vertical()),
                _ => declared.height,
            };
            let known = apply_aspect_ratio(
                Size {
                    width: clamp_maybe(width.map(|w| w.max(0.0)), min_size.width, max_size.width),
                    height: clamp_maybe(
                        height.map(|h| h.max(0.0)),
                        min_size.height,
                        max_size.height,
                    ),
                },
                child_style.used_aspect_ratio(),
            );

            let mut result =
                self.compute_node(child, known, block_size, container.direction, LayoutMode::Exact);
            let clamped = Size {
                width: clamp_size(result.size.width, min_size.width, max_size.width),
                height: clamp_size(result.size.height, min_size.height, max_size.height),
            };
            if clamped != result.size {
                result = self.compute_node(
                    child,
                    Size::definite(clamped.width, clamped.height),
                    block_size,
                    container.direction,
                    LayoutMode::Exact,
                );
            }
            let child_size = result.size;

            let fallback = static_position(container, style, child_style, size, child_size, margin);
            let x = match (insets.start, insets.end) {
                (Some(start), _) => border.start + start + margin.start,
                (None, Some(end)) => size.width - border.end - end - margin.end - child_size.width,
                (None, None) => fallback.x,
            };
            let y = match (insets.top, insets.bottom) {
                (Some(top), _) => border.top + top + margin.top,
                (None, Some(bottom)) => {
                    size.height - border.bottom - bottom - margin.bottom - child_size.height
                }
                (None, None) => fallback.y,
            };

            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(LayoutNode {
                    order: u32::try_from(index).unwrap_or(u32::MAX),
                    size: child_size,
                    location: Point { x, y },
                    children: result.children.clone(),
                });
            }
        }
    }
}

/// Border-box position of an absolutely positioned child placed as the
/// sole item of the container: `justify-content` on the main axis and the
/// child's `align-self` on the cross axis.
fn static_position(
    container: &Container,
    style: &Style,
    child_style: &Style,
    size: Size<f32>,
    child_size: Size<f32>,
    margin: Rect<f32>,
) -> Point<f32> {
    let dir = container.dir;
    let padding_border = container.padding_border;
    let inner = Size {
        width: size.width - padding_border.horizontal(),
        height: size.height - padding_border.vertical(),
    };
    let free_main = inner.main(dir) - child_size.main(dir) - margin.main(dir);
    let free_cross = inner.cross(dir) - child_size.cross(dir) - margin.cross(dir);

    let main_offset = match style.justify_content {
        JustifyContent::FlexStart | JustifyContent::SpaceBetween => {
            if dir.is_reverse() { free_main } else { 0.0 }
        }
        JustifyContent::FlexEnd => {
            if dir.is_reverse() { 0.0 } else { free_main }
        }
        JustifyContent::Center | JustifyContent::SpaceAround | JustifyContent::SpaceEvenly => {
            free_main / 2.0
        }
    };
    let cross_offset = match child_style.align_self.resolve(style.align_items) {
        AlignItems::FlexStart | AlignItems::Stretch | AlignItems::Baseline => {
            if container.wrap_reverse { free_cross } else { 0.0 }
        }
        AlignItems::FlexEnd => {
            if container.wrap_reverse { 0.0 } else { free_cross }
        }
        AlignItems::Center => free_cross / 2.0,
    };

    point_from_main_cross(
        dir,
        padding_border.main_start(dir) + main_offset + margin.main_start(dir),
        padding_border.cross_start(dir) + cross_offset + margin.cross_start(dir),
    )
}
