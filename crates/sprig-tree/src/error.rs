//! Structural errors raised while editing a [`StyleTree`](crate::StyleTree).

use thiserror::Error;

use crate::NodeId;

/// A tree edit that would break the "exactly one parent, no cycles" shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not name a live node of this tree.
    #[error("node {0} does not exist in this style tree")]
    UnknownNode(NodeId),

    /// The child is already owned by a parent.
    #[error("node {child} is already a child of {parent}")]
    AlreadyAttached {
        /// The node being attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// Attaching would make a node its own ancestor.
    #[error("adding {child} under {parent} would create a cycle")]
    WouldCreateCycle {
        /// The intended parent.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },

    /// The node is not among the parent's children.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// The parent that was searched.
        parent: NodeId,
        /// The node that was not found.
        child: NodeId,
    },

    /// A child index past the end of the parent's child list.
    #[error("child index {index} is out of bounds for {parent} with {len} children")]
    IndexOutOfBounds {
        /// The parent being edited.
        parent: NodeId,
        /// The requested index.
        index: usize,
        /// The parent's child count.
        len: usize,
    },
}
