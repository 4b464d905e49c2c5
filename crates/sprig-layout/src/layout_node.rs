//! The layout tree produced by a layout call.
//!
//! A [`LayoutNode`] tree is a snapshot: it owns its children, shares
//! nothing with the style tree, and stays valid after the style tree is
//! edited or dropped. Dropping the root releases the whole tree.

use serde::Serialize;
use sprig_style::{Point, Size};

/// Resolved box of one displayed style node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Index of the style node among its parent's style children (hidden
    /// siblings included); 0 for the root of a call.
    pub order: u32,
    /// Border-box size.
    pub size: Size<f32>,
    /// Border-box position relative to the parent's content-box origin;
    /// `(0, 0)` for the root of a call.
    pub location: Point<f32>,
    /// Displayed children in style order.
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// The child built from the style child at index `order`, if displayed.
    #[must_use]
    pub fn child_by_order(&self, order: u32) -> Option<&Self> {
        self.children.iter().find(|child| child.order == order)
    }

    /// Number of nodes in this subtree, itself included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Snap locations and sizes to whole pixels.
    ///
    /// Each edge is rounded at its accumulated position, and a size becomes
    /// the distance between its rounded edges, so adjacent siblings neither
    /// overlap nor leave a gap. Positions accumulate along `location`
    /// alone; a parent's padding and border are not added, so they should
    /// be whole numbers for the grid to match the screen.
    pub fn round_to_pixels(&mut self) {
        self.round_from(0.0, 0.0);
    }

    fn round_from(&mut self, parent_x: f32, parent_y: f32) {
        let x = parent_x + self.location.x;
        let y = parent_y + self.location.y;

        self.location.x = self.location.x.round();
        self.location.y = self.location.y.round();
        self.size.width = (x + self.size.width).round() - x.round();
        self.size.height = (y + self.size.height).round() - y.round();
        for child in &mut self.children {
            child.round_from(x, y);
        }
    }

    /// Depth-first pre-order walk over the subtree.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
