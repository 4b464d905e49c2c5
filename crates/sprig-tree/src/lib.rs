//! Style tree for the Sprig layout engine.
//!
//! The tree is the caller-owned input to layout: every node carries a
//! [`Style`], an ordered child list and a flag marking opaque measured
//! content (text, images) whose size comes from a measurement provider.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Each node records its single parent, and every edit
//! checks that record, so a node can never be shared between two parents
//! and an ancestor can never be attached below its own descendant.
//!
//! Freed slots are tombstoned and never reused, so a stale [`NodeId`]
//! reports [`TreeError::UnknownNode`] instead of silently aliasing a new
//! node.
//!
//! Every successful edit bumps [`StyleTree::generation`]. Together with the
//! process-unique [`StyleTree::id`] this lets layout caches tell when a
//! stored result may no longer describe the tree.

mod error;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sprig_style::Style;

pub use error::TreeError;

/// Style returned for ids that do not name a live node.
static DEFAULT_STYLE: Style = Style::DEFAULT;

/// A type-safe index into a [`StyleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Process-unique identity of a [`StyleTree`] instance.
///
/// Clones and deserialized trees get a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(u64);

impl TreeId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One slot of the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleNode {
    /// The node's style record.
    pub style: Style,
    /// The owning parent, if attached.
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Children in document order.
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Whether this node's content size comes from the measurement provider.
    #[serde(default)]
    pub measured: bool,
}

impl StyleNode {
    const fn new(style: Style) -> Self {
        Self {
            style,
            parent: None,
            children: Vec::new(),
            measured: false,
        }
    }
}

/// Arena-based style tree with O(1) node access and traversal.
///
/// The serialized form is the flat arena (`{"nodes": [...]}`, freed slots
/// as `null`). A deserialized arena is not re-validated here; layout checks
/// its structure before traversing it.
#[derive(Debug, Serialize, Deserialize)]
pub struct StyleTree {
    #[serde(skip, default = "TreeId::fresh")]
    id: TreeId,
    #[serde(skip)]
    generation: u64,
    /// All nodes, indexed by [`NodeId`]. `None` marks a freed slot.
    nodes: Vec<Option<StyleNode>>,
}

impl Default for StyleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StyleTree {
    fn clone(&self) -> Self {
        Self {
            id: TreeId::fresh(),
            generation: self.generation,
            nodes: self.nodes.clone(),
        }
    }
}

impl StyleTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: TreeId::fresh(),
            generation: 0,
            nodes: Vec::new(),
        }
    }

    /// This tree's identity.
    #[must_use]
    pub const fn id(&self) -> TreeId {
        self.id
    }

    /// Edit counter, bumped on every successful mutation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Whether the tree has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&StyleNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Whether `id` names a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Allocate a childless node with the default style.
    pub fn new_style(&mut self) -> NodeId {
        self.new_node(Style::DEFAULT)
    }

    /// Allocate a childless node with `style`.
    pub fn new_node(&mut self, style: Style) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(StyleNode::new(style)));
        self.touch();
        id
    }

    /// Allocate a node and attach `children` to it in order.
    ///
    /// # Errors
    /// Fails like [`StyleTree::add_child`]; on failure the new node is
    /// released again and the children stay unattached.
    pub fn new_with_children(
        &mut self,
        style: Style,
        children: &[NodeId],
    ) -> Result<NodeId, TreeError> {
        let id = self.new_node(style);
        if let Err(err) = self.set_children(id, children) {
            let _ = self.free_style(id);
            return Err(err);
        }
        Ok(id)
    }

    /// The style of `id`, or the default style for an unknown id.
    #[must_use]
    pub fn style(&self, id: NodeId) -> &Style {
        self.get(id).map_or(&DEFAULT_STYLE, |node| &node.style)
    }

    /// Replace the style of `id`.
    ///
    /// # Errors
    /// [`TreeError::UnknownNode`] if `id` is not live.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), TreeError> {
        self.node_mut(id)?.style = style;
        self.touch();
        Ok(())
    }

    /// Whether `id` holds measured content.
    #[must_use]
    pub fn is_measured(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|node| node.measured)
    }

    /// Mark `id` as holding measured content (or clear the mark).
    ///
    /// Only childless measured nodes consult the measurement provider.
    ///
    /// # Errors
    /// [`TreeError::UnknownNode`] if `id` is not live.
    pub fn set_measured(&mut self, id: NodeId, measured: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.measured = measured;
        self.touch();
        Ok(())
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Number of children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// The child of `parent` at `index`.
    #[must_use]
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    ///
    /// The walk is bounded by the arena size, so corrupt parent records
    /// in a deserialized arena cannot make it loop forever.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
            remaining: self.nodes.len(),
        }
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// - [`TreeError::UnknownNode`] if either id is not live
    /// - [`TreeError::AlreadyAttached`] if `child` already has a parent
    /// - [`TreeError::WouldCreateCycle`] if `child` is `parent` or one of
    ///   its ancestors
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let index = self.child_count(parent);
        self.insert_child(parent, index, child)
    }

    /// Insert `child` into `parent`'s child list at `index`.
    ///
    /// # Errors
    /// As [`StyleTree::add_child`], plus [`TreeError::IndexOutOfBounds`]
    /// when `index` is past the end of the list.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        let len = self.child_count(parent);
        if index > len {
            return Err(TreeError::IndexOutOfBounds { parent, index, len });
        }
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.touch();
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays alive as a root.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `child` is not in `parent`'s list.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let index = self
            .children(parent)
            .iter()
            .position(|&id| id == child)
            .ok_or(TreeError::NotAChild { parent, child })?;
        let _ = self.remove_child_at_index(parent, index)?;
        Ok(())
    }

    /// Detach and return the child of `parent` at `index`.
    ///
    /// # Errors
    /// [`TreeError::IndexOutOfBounds`] when `index` is past the end.
    pub fn remove_child_at_index(
        &mut self,
        parent: NodeId,
        index: usize,
    ) -> Result<NodeId, TreeError> {
        let node = self.node_mut(parent)?;
        let len = node.children.len();
        if index >= len {
            return Err(TreeError::IndexOutOfBounds { parent, index, len });
        }
        let child = node.children.remove(index);
        if let Some(slot) = self.nodes.get_mut(child.0).and_then(Option::as_mut) {
            slot.parent = None;
        }
        self.touch();
        Ok(child)
    }

    /// Put `child` at `index` in `parent`'s list and return the detached
    /// node it replaces.
    ///
    /// # Errors
    /// As [`StyleTree::insert_child`].
    pub fn replace_child_at_index(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<NodeId, TreeError> {
        let len = self.node(parent)?.children.len();
        if index >= len {
            return Err(TreeError::IndexOutOfBounds { parent, index, len });
        }
        self.check_attachable(parent, child)?;
        let previous = self.remove_child_at_index(parent, index)?;
        self.insert_child(parent, index, child)?;
        Ok(previous)
    }

    /// Replace the whole child list of `parent`.
    ///
    /// Current children that are not in `children` are detached. Nodes in
    /// `children` must be unattached or already children of `parent`, and
    /// may appear only once.
    ///
    /// # Errors
    /// As [`StyleTree::add_child`]; a duplicate entry reports
    /// [`TreeError::AlreadyAttached`]. On error the tree is unchanged.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), TreeError> {
        let _ = self.node(parent)?;
        for (position, &child) in children.iter().enumerate() {
            let _ = self.node(child)?;
            if children[..position].contains(&child) {
                return Err(TreeError::AlreadyAttached { child, parent });
            }
            match self.parent(child) {
                Some(owner) if owner == parent => {}
                Some(owner) => {
                    return Err(TreeError::AlreadyAttached {
                        child,
                        parent: owner,
                    });
                }
                None => {
                    if child == parent || self.is_descendant_of(parent, child) {
                        return Err(TreeError::WouldCreateCycle { parent, child });
                    }
                }
            }
        }

        let previous = std::mem::take(&mut self.node_mut(parent)?.children);
        for old in previous {
            if let Some(slot) = self.nodes.get_mut(old.0).and_then(Option::as_mut) {
                slot.parent = None;
            }
        }
        for &child in children {
            self.node_mut(child)?.parent = Some(parent);
        }
        self.node_mut(parent)?.children = children.to_vec();
        self.touch();
        Ok(())
    }

    /// Detach `id` from its parent and release it with its whole subtree.
    ///
    /// Returns the number of nodes released. Their ids become unknown.
    ///
    /// # Errors
    /// [`TreeError::UnknownNode`] if `id` is not live.
    pub fn free_style(&mut self, id: NodeId) -> Result<usize, TreeError> {
        if let Some(parent) = self.node(id)?.parent {
            if let Some(node) = self.nodes.get_mut(parent.0).and_then(Option::as_mut) {
                node.children.retain(|&child| child != id);
            }
        }

        let mut released = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                released += 1;
                stack.extend(node.children);
            }
        }
        self.touch();
        Ok(released)
    }

    fn node(&self, id: NodeId) -> Result<&StyleNode, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut StyleNode, TreeError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownNode(id))
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let _ = self.node(parent)?;
        let child_node = self.node(child)?;
        if let Some(owner) = child_node.parent {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: owner,
            });
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(TreeError::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    const fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Iterator over ancestors of a node, from parent to root.
pub struct AncestorIterator<'a> {
    tree: &'a StyleTree,
    current: Option<NodeId>,
    remaining: usize,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.current?;
        self.current = self.tree.parent(current);
        Some(current)
    }
}
