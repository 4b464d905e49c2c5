//! Nodes without displayed children.
//!
//! A leaf is sized by style where style fixes an axis. The remaining axes
//! come from the measurement provider for measured leaves and from
//! padding and border alone otherwise.

use sprig_style::math::sanitize_length;
use sprig_style::{MaybeMath, Size, Style};
use sprig_tree::NodeId;

use super::{ComputeResult, LayoutContext};
use crate::error::LayoutIssue;

impl LayoutContext<'_> {
    pub(super) fn compute_leaf(
        &mut self,
        node: NodeId,
        style: &Style,
        node_size: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
    ) -> ComputeResult {
        let margin = style.margin.resolve_edges(parent_size.width);
        let padding_border = style.padding.resolve_edges(parent_size.width)
            + style.border.resolve_edges(parent_size.width);
        let frame = Size {
            width: padding_border.horizontal(),
            height: padding_border.vertical(),
        };
        let measured = self.tree.is_measured(node);

        let size = match (node_size.width, node_size.height) {
            (Some(width), Some(height)) => Size { width, height },
            _ if !measured => node_size.unwrap_or(frame),
            _ => {
                let known = Size {
                    width: node_size.width.maybe_sub(frame.width).map(|w| w.max(0.0)),
                    height: node_size.height.maybe_sub(frame.height).map(|h| h.max(0.0)),
                };
                let available = Size {
                    width: node_size
                        .width
                        .or(parent_size.width.maybe_sub(margin.horizontal()))
                        .maybe_sub(frame.width)
                        .map(|w| w.max(0.0)),
                    height: node_size
                        .height
                        .or(parent_size.height.maybe_sub(margin.vertical()))
                        .maybe_sub(frame.height)
                        .map(|h| h.max(0.0)),
                };
                let content = match self.measure.measure(node, known, available) {
                    Some(content) => self.check_measurement(node, content),
                    None => {
                        self.issues.push(LayoutIssue::MissingMeasurement(node));
                        Size::ZERO
                    }
                };
                Size {
                    width: node_size.width.unwrap_or(content.width + frame.width),
                    height: node_size.height.unwrap_or(content.height + frame.height),
                }
            }
        };

        let baseline = if measured {
            self.measure
                .baseline(node, size)
                .filter(|baseline| baseline.is_finite())
        } else {
            None
        };
        ComputeResult {
            size,
            baseline,
            children: Vec::new(),
        }
    }

    /// Replace NaN and infinite measured axes with 0, recording an issue.
    fn check_measurement(&mut self, node: NodeId, content: Size<f32>) -> Size<f32> {
        if !(content.width.is_finite() && content.height.is_finite()) {
            self.issues.push(LayoutIssue::NonFiniteMeasurement(node));
        }
        content.map(sanitize_length)
    }
}
