//! Layout errors and non-fatal issues.
//!
//! Structural problems abort a layout call with a [`LayoutError`]. Problems
//! confined to one node are recorded as a [`LayoutIssue`], the node gets a
//! fallback size, and the rest of the tree is still resolved.

use sprig_tree::NodeId;
use thiserror::Error;

/// A style subtree that cannot be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The id does not name a live node.
    #[error("node {0} does not exist in the style tree")]
    UnknownNode(NodeId),

    /// A node is reachable from one of its own descendants.
    #[error("style tree contains a cycle through node {0}")]
    Cycle(NodeId),

    /// A node appears under more than one parent, or twice under one.
    #[error("node {child} is reachable through more than one parent")]
    SharedChild {
        /// The node reached twice.
        child: NodeId,
    },

    /// A child list and the child's parent record disagree.
    #[error("node {child} is listed under {parent} but records parent {recorded:?}")]
    ParentMismatch {
        /// The parent whose list names the child.
        parent: NodeId,
        /// The child.
        child: NodeId,
        /// The parent the child itself records.
        recorded: Option<NodeId>,
    },

    /// The subtree is deeper than [`LayoutConfig::max_depth`](crate::LayoutConfig::max_depth).
    #[error("style tree is deeper than the limit of {limit} at node {node}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
        /// The first node past the limit.
        node: NodeId,
    },
}

/// A per-node problem that layout worked around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LayoutIssue {
    /// A measured leaf got no size from the measurement provider; it was
    /// sized from its padding and border alone.
    #[error("node {0} has measured content but the provider returned no size")]
    MissingMeasurement(NodeId),

    /// The measurement provider returned a NaN or infinite size; the
    /// offending axis was treated as 0.
    #[error("node {0} was measured with a non-finite size")]
    NonFiniteMeasurement(NodeId),
}
