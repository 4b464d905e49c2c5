//! Tests for issue logging through the shared warning set. Kept in their
//! own binary because the set is process-wide.

use sprig_common::warning::warn_once;
use sprig_layout::{LayoutEngine, LayoutIssue, NoContent};
use sprig_style::{Size, Style};
use sprig_tree::{NodeId, StyleTree};

/// Helper to build a root with one measured leaf that nothing measures.
fn unmeasured() -> (StyleTree, NodeId, NodeId) {
    let mut tree = StyleTree::new();
    let leaf = tree.new_style();
    tree.set_measured(leaf, true).unwrap();
    let root = tree.new_with_children(Style::default(), &[leaf]).unwrap();
    (tree, root, leaf)
}

fn message(tree: &StyleTree, issue: LayoutIssue) -> String {
    format!("tree {}: {issue}", tree.id().get())
}

// ========== Scoping ==========

#[test]
fn test_warnings_are_scoped_per_tree_and_reset_by_clear_cache() {
    let (first, first_root, first_leaf) = unmeasured();
    let (second, _, second_leaf) = unmeasured();
    let engine = LayoutEngine::new();

    let _ = engine
        .compute_layout(&first, first_root, Size::NONE, &NoContent)
        .unwrap();

    // Same node id, same issue, but another tree: still unreported.
    assert_eq!(first_leaf, second_leaf);
    assert!(!warn_once(
        "layout",
        &message(&first, LayoutIssue::MissingMeasurement(first_leaf))
    ));
    assert!(warn_once(
        "layout",
        &message(&second, LayoutIssue::MissingMeasurement(second_leaf))
    ));

    engine.clear_cache();

    assert!(warn_once(
        "layout",
        &message(&first, LayoutIssue::MissingMeasurement(first_leaf))
    ));
}
