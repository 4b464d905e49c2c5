//! Measurement of opaque leaf content.
//!
//! [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
//!
//! Text and replaced content have a size the flex algorithm cannot derive
//! from style. Leaves flagged with
//! [`StyleTree::set_measured`](sprig_tree::StyleTree::set_measured) ask a
//! [`MeasureContent`] implementation instead.

use sprig_style::Size;
use sprig_tree::NodeId;

/// Supplies content sizes for measured leaves.
///
/// All sizes are content-box sizes: the resolver adds the node's padding
/// and border around whatever is returned.
pub trait MeasureContent {
    /// Measure `node`.
    ///
    /// `known` holds the content-box axes that style already fixes;
    /// `available` is the space the parent offers on each axis (`None` when
    /// indefinite). Returning `None` reports
    /// [`LayoutIssue::MissingMeasurement`](crate::LayoutIssue::MissingMeasurement).
    fn measure(
        &self,
        node: NodeId,
        known: Size<Option<f32>>,
        available: Size<Option<f32>>,
    ) -> Option<Size<f32>>;

    /// Distance from the top of the border box of `node` to its first
    /// baseline, once the node has its final border-box `size`.
    ///
    /// Without a baseline, baseline alignment uses the node's top edge.
    fn baseline(&self, _node: NodeId, _size: Size<f32>) -> Option<f32> {
        None
    }
}

impl<F> MeasureContent for F
where
    F: Fn(NodeId, Size<Option<f32>>, Size<Option<f32>>) -> Option<Size<f32>>,
{
    fn measure(
        &self,
        node: NodeId,
        known: Size<Option<f32>>,
        available: Size<Option<f32>>,
    ) -> Option<Size<f32>> {
        self(node, known, available)
    }
}

/// A provider with nothing to measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl MeasureContent for NoContent {
    fn measure(
        &self,
        _node: NodeId,
        _known: Size<Option<f32>>,
        _available: Size<Option<f32>>,
    ) -> Option<Size<f32>> {
        None
    }
}
