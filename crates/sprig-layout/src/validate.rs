//! Structure check run before any layout work.
//!
//! The edit API of [`StyleTree`] cannot build a cycle or share a child, but
//! a deserialized arena can contain anything. Walking the subtree once up
//! front turns those shapes into a [`LayoutError`] instead of unbounded
//! recursion, and bounds the recursion depth of the resolver.

use rustc_hash::FxHashSet;
use sprig_tree::{NodeId, StyleTree};

use crate::error::LayoutError;

enum Visit {
    Enter {
        node: NodeId,
        parent: Option<NodeId>,
        depth: usize,
    },
    Exit(NodeId),
}

/// Verify that the subtree under `root` is a tree no deeper than
/// `max_depth`.
pub(crate) fn check_structure(
    tree: &StyleTree,
    root: NodeId,
    max_depth: usize,
) -> Result<(), LayoutError> {
    if !tree.contains(root) {
        return Err(LayoutError::UnknownNode(root));
    }

    let mut visited = FxHashSet::default();
    let mut on_path = FxHashSet::default();
    let mut stack = vec![Visit::Enter {
        node: root,
        parent: None,
        depth: 0,
    }];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Exit(node) => {
                let _ = on_path.remove(&node);
            }
            Visit::Enter {
                node,
                parent,
                depth,
            } => {
                if !tree.contains(node) {
                    return Err(LayoutError::UnknownNode(node));
                }
                if on_path.contains(&node) {
                    return Err(LayoutError::Cycle(node));
                }
                if !visited.insert(node) {
                    return Err(LayoutError::SharedChild { child: node });
                }
                if let Some(parent) = parent {
                    let recorded = tree.parent(node);
                    if recorded != Some(parent) {
                        return Err(LayoutError::ParentMismatch {
                            parent,
                            child: node,
                            recorded,
                        });
                    }
                }
                if depth > max_depth {
                    return Err(LayoutError::DepthLimitExceeded {
                        limit: max_depth,
                        node,
                    });
                }

                let _ = on_path.insert(node);
                stack.push(Visit::Exit(node));
                for &child in tree.children(node).iter().rev() {
                    stack.push(Visit::Enter {
                        node: child,
                        parent: Some(node),
                        depth: depth + 1,
                    });
                }
            }
        }
    }
    Ok(())
}
