//! Tests for flex layout results: sizing, flexing, wrapping, alignment,
//! positioning, direction, aspect ratio and measured content.

use std::cell::Cell;

use sprig_layout::{
    LayoutConfig, LayoutEngine, LayoutIssue, LayoutNode, MeasureContent, NoContent, compute_layout,
};
use sprig_style::{
    AlignItems, AlignSelf, Dimension, Direction, Display, FlexDirection, FlexWrap,
    JustifyContent, Overflow, PositionType, Rect, Size, Style,
};
use sprig_tree::{NodeId, StyleTree};

/// Helper to create a leaf with a fixed point size.
fn fixed(tree: &mut StyleTree, width: f32, height: f32) -> NodeId {
    tree.new_node(Style {
        size: Size::points(width, height),
        ..Style::default()
    })
}

/// Helper to lay out `root` with no available-space limit.
fn layout(tree: &StyleTree, root: NodeId) -> LayoutNode {
    compute_layout(tree, root, Size::NONE).unwrap()
}

fn width_only(width: Dimension) -> Size<Dimension> {
    Size {
        width,
        height: Dimension::Auto,
    }
}

fn sizes(node: &LayoutNode) -> Vec<(f32, f32)> {
    node.children
        .iter()
        .map(|child| (child.size.width, child.size.height))
        .collect()
}

fn xs(node: &LayoutNode) -> Vec<f32> {
    node.children.iter().map(|child| child.location.x).collect()
}

fn ys(node: &LayoutNode) -> Vec<f32> {
    node.children.iter().map(|child| child.location.y).collect()
}

// ========== Intrinsic sizing ==========

#[test]
fn test_parent_sizes_to_fixed_children() {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 123.0, 321.0);
    let b = fixed(&mut tree, 234.0, 432.0);
    let root = tree.new_with_children(Style::default(), &[a, b]).unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 357.0, height: 432.0 });
    assert_eq!(sizes(&result), vec![(123.0, 321.0), (234.0, 432.0)]);
    assert_eq!(xs(&result), vec![0.0, 123.0]);
    assert_eq!(ys(&result), vec![0.0, 0.0]);
    assert_eq!(result.location.x, 0.0);
    assert_eq!(result.location.y, 0.0);
}

#[test]
fn test_leaf_size_is_clamped_to_min_and_max() {
    let mut tree = StyleTree::new();
    let root = tree.new_node(Style {
        size: Size::points(50.0, 500.0),
        min_size: width_only(Dimension::Points(100.0)),
        max_size: Size {
            width: Dimension::Auto,
            height: Dimension::Points(200.0),
        },
        ..Style::default()
    });

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 100.0, height: 200.0 });
}

#[test]
fn test_min_wins_over_max() {
    let mut tree = StyleTree::new();
    let root = tree.new_node(Style {
        size: Size::points(10.0, 10.0),
        min_size: width_only(Dimension::Points(100.0)),
        max_size: width_only(Dimension::Points(50.0)),
        ..Style::default()
    });

    assert_eq!(layout(&tree, root).size.width, 100.0);
}

#[test]
fn test_padding_and_border_wrap_content() {
    let mut tree = StyleTree::new();
    let child = fixed(&mut tree, 50.0, 50.0);
    let root = tree
        .new_with_children(
            Style {
                padding: Rect::uniform(Dimension::Points(10.0)),
                border: Rect::uniform(Dimension::Points(2.0)),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 74.0, height: 74.0 });
    // Child locations are relative to the content box.
    assert_eq!(xs(&result), vec![0.0]);
    assert_eq!(ys(&result), vec![0.0]);
}

#[test]
fn test_available_space_does_not_stretch_auto_root() {
    let mut tree = StyleTree::new();
    let child = fixed(&mut tree, 40.0, 40.0);
    let root = tree.new_with_children(Style::default(), &[child]).unwrap();

    let result = compute_layout(&tree, root, Size::definite(800.0, 600.0)).unwrap();

    assert_eq!(result.size, Size { width: 40.0, height: 40.0 });
}

#[test]
fn test_percent_size_resolves_against_content_box() {
    let mut tree = StyleTree::new();
    let child = tree.new_node(Style {
        size: Size {
            width: Dimension::Percent(0.5),
            height: Dimension::Points(10.0),
        },
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(200.0, 100.0),
                padding: Rect::uniform(Dimension::Points(10.0)),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    assert_eq!(layout(&tree, root).children[0].size.width, 90.0);
}

#[test]
fn test_percent_against_indefinite_parent_is_auto() {
    let mut tree = StyleTree::new();
    let inner = fixed(&mut tree, 30.0, 30.0);
    let child = tree
        .new_with_children(
            Style {
                size: width_only(Dimension::Percent(0.5)),
                ..Style::default()
            },
            &[inner],
        )
        .unwrap();
    let root = tree.new_with_children(Style::default(), &[child]).unwrap();

    assert_eq!(layout(&tree, root).children[0].size.width, 30.0);
}

// ========== display: none ==========

#[test]
fn test_hidden_child_is_skipped() {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 100.0, 100.0);
    let hidden = tree.new_node(Style {
        display: Display::None,
        size: Size::points(50.0, 500.0),
        ..Style::default()
    });
    let b = fixed(&mut tree, 100.0, 100.0);
    let root = tree.new_with_children(Style::default(), &[a, hidden, b]).unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 200.0, height: 100.0 });
    assert_eq!(result.children.len(), 2);
    assert_eq!(result.children[1].order, 2);
    assert_eq!(result.children[1].location.x, 100.0);
    assert!(result.child_by_order(1).is_none());
}

#[test]
fn test_hidden_root_has_zero_size() {
    let mut tree = StyleTree::new();
    let child = fixed(&mut tree, 10.0, 10.0);
    let root = tree
        .new_with_children(
            Style {
                display: Display::None,
                size: Size::points(100.0, 100.0),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 0.0, height: 0.0 });
    assert!(result.children.is_empty());
}

#[test]
fn test_node_with_only_hidden_children_is_a_leaf() {
    let mut tree = StyleTree::new();
    let hidden = tree.new_node(Style {
        display: Display::None,
        size: Size::points(50.0, 50.0),
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                padding: Rect::uniform(Dimension::Points(3.0)),
                ..Style::default()
            },
            &[hidden],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 6.0, height: 6.0 });
    assert!(result.children.is_empty());
}

// ========== Flexible lengths ==========

fn flexible_row(tree: &mut StyleTree, main: f32, children: &[Style]) -> NodeId {
    let ids: Vec<NodeId> = children.iter().map(|style| tree.new_node(*style)).collect();
    tree.new_with_children(
        Style {
            size: Size::points(main, 100.0),
            ..Style::default()
        },
        &ids,
    )
    .unwrap()
}

#[test]
fn test_grow_distributes_by_factor() {
    let mut tree = StyleTree::new();
    let grow = |factor: f32| Style {
        flex_grow: factor,
        flex_basis: Dimension::Points(0.0),
        ..Style::default()
    };
    let root = flexible_row(&mut tree, 400.0, &[grow(1.0), grow(1.0), grow(2.0)]);

    let result = layout(&tree, root);

    assert_eq!(sizes(&result), vec![(100.0, 100.0), (100.0, 100.0), (200.0, 100.0)]);
    assert_eq!(xs(&result), vec![0.0, 100.0, 200.0]);
}

#[test]
fn test_grow_respects_max_size() {
    let mut tree = StyleTree::new();
    let capped = Style {
        flex_grow: 1.0,
        flex_basis: Dimension::Points(0.0),
        max_size: width_only(Dimension::Points(50.0)),
        ..Style::default()
    };
    let free = Style {
        flex_grow: 1.0,
        flex_basis: Dimension::Points(0.0),
        ..Style::default()
    };
    let root = flexible_row(&mut tree, 300.0, &[capped, free]);

    let result = layout(&tree, root);

    assert_eq!(result.children[0].size.width, 50.0);
    assert_eq!(result.children[1].size.width, 250.0);
}

#[test]
fn test_fractional_grow_sum_leaves_space() {
    let mut tree = StyleTree::new();
    let half = Style {
        flex_grow: 0.5,
        flex_basis: Dimension::Points(0.0),
        ..Style::default()
    };
    let root = flexible_row(&mut tree, 200.0, &[half]);

    assert_eq!(layout(&tree, root).children[0].size.width, 100.0);
}

#[test]
fn test_shrink_freezes_item_at_min_size() {
    let mut tree = StyleTree::new();
    let shrink = |min: f32| Style {
        flex_basis: Dimension::Points(300.0),
        flex_shrink: 1.0,
        min_size: width_only(Dimension::Points(min)),
        ..Style::default()
    };
    let root = flexible_row(&mut tree, 400.0, &[shrink(50.0), shrink(280.0)]);

    let result = layout(&tree, root);

    assert_eq!(result.children[0].size.width, 120.0);
    assert_eq!(result.children[1].size.width, 280.0);
    assert_eq!(xs(&result), vec![0.0, 120.0]);
}

#[test]
fn test_shrink_is_weighted_by_basis() {
    let mut tree = StyleTree::new();
    let shrink = |basis: f32| Style {
        flex_basis: Dimension::Points(basis),
        flex_shrink: 1.0,
        overflow: Overflow::Hidden,
        ..Style::default()
    };
    let root = flexible_row(&mut tree, 300.0, &[shrink(300.0), shrink(100.0)]);

    let result = layout(&tree, root);

    // 100 of overflow split 3:1.
    assert_eq!(result.children[0].size.width, 225.0);
    assert_eq!(result.children[1].size.width, 75.0);
}

#[test]
fn test_default_shrink_is_zero() {
    let mut tree = StyleTree::new();
    let wide = fixed(&mut tree, 300.0, 10.0);
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(100.0, 10.0),
                ..Style::default()
            },
            &[wide],
        )
        .unwrap();

    assert_eq!(layout(&tree, root).children[0].size.width, 300.0);
}

#[test]
fn test_auto_min_size_keeps_content_from_shrinking() {
    let mut tree = StyleTree::new();
    let content = fixed(&mut tree, 80.0, 10.0);
    let visible = tree
        .new_with_children(
            Style {
                flex_basis: Dimension::Points(200.0),
                flex_shrink: 1.0,
                ..Style::default()
            },
            &[content],
        )
        .unwrap();
    let content = fixed(&mut tree, 80.0, 10.0);
    let hidden = tree
        .new_with_children(
            Style {
                flex_basis: Dimension::Points(200.0),
                flex_shrink: 1.0,
                overflow: Overflow::Hidden,
                ..Style::default()
            },
            &[content],
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(100.0, 10.0),
                ..Style::default()
            },
            &[visible, hidden],
        )
        .unwrap();

    let result = layout(&tree, root);

    // The visible item stops at its content width; the hidden one takes
    // the rest of the shrinkage.
    assert_eq!(result.children[0].size.width, 80.0);
    assert_eq!(result.children[1].size.width, 20.0);
}

#[test]
fn test_auto_root_flexes_against_available_space() {
    let mut tree = StyleTree::new();
    let item = tree.new_node(Style {
        flex_grow: 1.0,
        size: Size::points(10.0, 10.0),
        ..Style::default()
    });
    let root = tree.new_with_children(Style::default(), &[item]).unwrap();

    let result = compute_layout(&tree, root, Size::definite(300.0, 50.0)).unwrap();

    assert_eq!(result.size.width, 300.0);
    assert_eq!(result.children[0].size.width, 300.0);
}

// ========== Wrapping ==========

fn wrapping_row(tree: &mut StyleTree, wrap: FlexWrap) -> NodeId {
    let children: Vec<NodeId> = (0..3).map(|_| fixed(tree, 100.0, 50.0)).collect();
    tree.new_with_children(
        Style {
            flex_wrap: wrap,
            size: width_only(Dimension::Points(250.0)),
            ..Style::default()
        },
        &children,
    )
    .unwrap()
}

#[test]
fn test_wrap_breaks_lines() {
    let mut tree = StyleTree::new();
    let root = wrapping_row(&mut tree, FlexWrap::Wrap);

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 250.0, height: 100.0 });
    assert_eq!(xs(&result), vec![0.0, 100.0, 0.0]);
    assert_eq!(ys(&result), vec![0.0, 0.0, 50.0]);
}

#[test]
fn test_wrap_reverse_stacks_lines_upward() {
    let mut tree = StyleTree::new();
    let root = wrapping_row(&mut tree, FlexWrap::WrapReverse);

    let result = layout(&tree, root);

    assert_eq!(xs(&result), vec![0.0, 100.0, 0.0]);
    assert_eq!(ys(&result), vec![50.0, 50.0, 0.0]);
}

#[test]
fn test_no_wrap_keeps_single_line() {
    let mut tree = StyleTree::new();
    let root = wrapping_row(&mut tree, FlexWrap::NoWrap);

    let result = layout(&tree, root);

    assert_eq!(result.size.height, 50.0);
    assert_eq!(xs(&result), vec![0.0, 100.0, 200.0]);
}

#[test]
fn test_oversize_item_gets_its_own_line() {
    let mut tree = StyleTree::new();
    let big = fixed(&mut tree, 400.0, 20.0);
    let small = fixed(&mut tree, 50.0, 20.0);
    let root = tree
        .new_with_children(
            Style {
                flex_wrap: FlexWrap::Wrap,
                size: width_only(Dimension::Points(250.0)),
                ..Style::default()
            },
            &[big, small],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(ys(&result), vec![0.0, 20.0]);
    assert_eq!(result.size.height, 40.0);
}

#[test]
fn test_align_content_stretch_grows_lines() {
    let mut tree = StyleTree::new();
    let a = tree.new_node(Style {
        size: width_only(Dimension::Points(100.0)),
        ..Style::default()
    });
    let b = tree.new_node(Style {
        size: width_only(Dimension::Points(100.0)),
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                flex_wrap: FlexWrap::Wrap,
                size: Size::points(150.0, 100.0),
                ..Style::default()
            },
            &[a, b],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(sizes(&result), vec![(100.0, 50.0), (100.0, 50.0)]);
    assert_eq!(ys(&result), vec![0.0, 50.0]);
}

// ========== justify-content ==========

fn justified_xs(justify: JustifyContent, direction: FlexDirection) -> Vec<f32> {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 50.0, 50.0);
    let b = fixed(&mut tree, 50.0, 50.0);
    let root = tree
        .new_with_children(
            Style {
                justify_content: justify,
                flex_direction: direction,
                size: Size::points(300.0, 100.0),
                ..Style::default()
            },
            &[a, b],
        )
        .unwrap();
    xs(&layout(&tree, root))
}

#[test]
fn test_justify_content_keywords() {
    let row = FlexDirection::Row;
    assert_eq!(justified_xs(JustifyContent::FlexStart, row), vec![0.0, 50.0]);
    assert_eq!(justified_xs(JustifyContent::FlexEnd, row), vec![200.0, 250.0]);
    assert_eq!(justified_xs(JustifyContent::Center, row), vec![100.0, 150.0]);
    assert_eq!(justified_xs(JustifyContent::SpaceBetween, row), vec![0.0, 250.0]);
    assert_eq!(justified_xs(JustifyContent::SpaceAround, row), vec![50.0, 200.0]);
}

#[test]
fn test_row_reverse_packs_from_the_end() {
    let reverse = FlexDirection::RowReverse;
    assert_eq!(justified_xs(JustifyContent::FlexStart, reverse), vec![250.0, 200.0]);
    assert_eq!(justified_xs(JustifyContent::FlexEnd, reverse), vec![50.0, 0.0]);
}

#[test]
fn test_column_lays_out_vertically() {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 50.0, 30.0);
    let b = fixed(&mut tree, 50.0, 40.0);
    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                ..Style::default()
            },
            &[a, b],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 50.0, height: 70.0 });
    assert_eq!(ys(&result), vec![0.0, 30.0]);
}

// ========== align-items / align-self ==========

fn aligned_child(container: Style, child: Style) -> LayoutNode {
    let mut tree = StyleTree::new();
    let child = tree.new_node(child);
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(300.0, 100.0),
                ..container
            },
            &[child],
        )
        .unwrap();
    layout(&tree, root).children[0].clone()
}

#[test]
fn test_align_items_positions_on_cross_axis() {
    let child = Style {
        size: Size::points(50.0, 50.0),
        ..Style::default()
    };
    let at = |align_items: AlignItems| {
        aligned_child(
            Style {
                align_items,
                ..Style::default()
            },
            child,
        )
        .location
        .y
    };

    assert_eq!(at(AlignItems::FlexStart), 0.0);
    assert_eq!(at(AlignItems::FlexEnd), 50.0);
    assert_eq!(at(AlignItems::Center), 25.0);
    assert_eq!(at(AlignItems::Stretch), 0.0);
}

#[test]
fn test_stretch_fills_auto_cross_size() {
    let child = aligned_child(
        Style::default(),
        Style {
            size: width_only(Dimension::Points(50.0)),
            ..Style::default()
        },
    );

    assert_eq!(child.size, Size { width: 50.0, height: 100.0 });
}

#[test]
fn test_stretch_respects_max_cross_size() {
    let child = aligned_child(
        Style::default(),
        Style {
            size: width_only(Dimension::Points(50.0)),
            max_size: Size {
                width: Dimension::Auto,
                height: Dimension::Points(60.0),
            },
            ..Style::default()
        },
    );

    assert_eq!(child.size.height, 60.0);
}

#[test]
fn test_align_self_overrides_align_items() {
    let child = aligned_child(
        Style {
            align_items: AlignItems::Center,
            ..Style::default()
        },
        Style {
            align_self: AlignSelf::FlexEnd,
            size: Size::points(50.0, 50.0),
            ..Style::default()
        },
    );

    assert_eq!(child.location.y, 50.0);
}

#[test]
fn test_column_stretch_fills_width() {
    let mut tree = StyleTree::new();
    let child = tree.new_node(Style {
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Points(50.0),
        },
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                size: Size::points(100.0, 300.0),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    assert_eq!(layout(&tree, root).children[0].size, Size { width: 100.0, height: 50.0 });
}

// ========== Margins and relative offsets ==========

#[test]
fn test_auto_margins_center_item() {
    let child = aligned_child(
        Style::default(),
        Style {
            size: Size::points(50.0, 50.0),
            margin: Rect::uniform(Dimension::Auto),
            ..Style::default()
        },
    );

    assert_eq!(child.location.x, 125.0);
    assert_eq!(child.location.y, 25.0);
}

#[test]
fn test_auto_margin_takes_space_before_justify() {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 50.0, 50.0);
    let b = tree.new_node(Style {
        size: Size::points(50.0, 50.0),
        margin: Rect {
            start: Dimension::Auto,
            ..Rect::default()
        },
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                justify_content: JustifyContent::Center,
                size: Size::points(300.0, 100.0),
                ..Style::default()
            },
            &[a, b],
        )
        .unwrap();

    assert_eq!(xs(&layout(&tree, root)), vec![0.0, 250.0]);
}

#[test]
fn test_margins_offset_item() {
    let child = aligned_child(
        Style::default(),
        Style {
            size: Size::points(50.0, 50.0),
            margin: Rect {
                start: Dimension::Points(5.0),
                top: Dimension::Points(7.0),
                ..Rect::default()
            },
            ..Style::default()
        },
    );

    assert_eq!(child.location.x, 5.0);
    assert_eq!(child.location.y, 7.0);
}

#[test]
fn test_relative_offset_does_not_move_siblings() {
    let mut tree = StyleTree::new();
    let a = tree.new_node(Style {
        size: Size::points(50.0, 50.0),
        position: Rect {
            start: Dimension::Points(10.0),
            bottom: Dimension::Points(5.0),
            ..Rect::default()
        },
        ..Style::default()
    });
    let b = fixed(&mut tree, 50.0, 50.0);
    let root = tree.new_with_children(Style::default(), &[a, b]).unwrap();

    let result = layout(&tree, root);

    assert_eq!(xs(&result), vec![10.0, 50.0]);
    assert_eq!(ys(&result), vec![-5.0, 0.0]);
}

// ========== Absolute positioning ==========

fn absolute(size: Size<Dimension>, position: Rect<Dimension>) -> Style {
    Style {
        position_type: PositionType::Absolute,
        size,
        position,
        ..Style::default()
    }
}

#[test]
fn test_absolute_opposite_edges_set_size() {
    let mut tree = StyleTree::new();
    let child = tree.new_node(absolute(
        Size {
            width: Dimension::Auto,
            height: Dimension::Points(50.0),
        },
        Rect {
            start: Dimension::Points(10.0),
            end: Dimension::Points(10.0),
            top: Dimension::Points(20.0),
            bottom: Dimension::Undefined,
        },
    ));
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(200.0, 200.0),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    let placed = &layout(&tree, root).children[0];

    assert_eq!(placed.size, Size { width: 180.0, height: 50.0 });
    assert_eq!(placed.location.x, 10.0);
    assert_eq!(placed.location.y, 20.0);
}

#[test]
fn test_absolute_end_edges_place_from_far_side() {
    let mut tree = StyleTree::new();
    let child = tree.new_node(absolute(
        Size::points(30.0, 30.0),
        Rect {
            end: Dimension::Points(10.0),
            bottom: Dimension::Points(10.0),
            ..Rect::default()
        },
    ));
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(200.0, 200.0),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    let placed = &layout(&tree, root).children[0];

    assert_eq!(placed.location.x, 160.0);
    assert_eq!(placed.location.y, 160.0);
}

#[test]
fn test_absolute_child_does_not_affect_flow() {
    let mut tree = StyleTree::new();
    let in_flow = fixed(&mut tree, 100.0, 100.0);
    let out_of_flow = tree.new_node(absolute(Size::points(500.0, 500.0), Rect::default()));
    let next = fixed(&mut tree, 100.0, 100.0);
    let root = tree
        .new_with_children(Style::default(), &[in_flow, out_of_flow, next])
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.size, Size { width: 200.0, height: 100.0 });
    assert_eq!(result.children[1].order, 1);
    assert_eq!(result.children[1].size, Size { width: 500.0, height: 500.0 });
    assert_eq!(result.children[2].location.x, 100.0);
}

#[test]
fn test_absolute_static_position_follows_alignment() {
    let mut tree = StyleTree::new();
    let child = tree.new_node(absolute(Size::points(50.0, 50.0), Rect::default()));
    let root = tree
        .new_with_children(
            Style {
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexEnd,
                size: Size::points(200.0, 200.0),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    let placed = &layout(&tree, root).children[0];

    assert_eq!(placed.location.x, 75.0);
    assert_eq!(placed.location.y, 150.0);
}

#[test]
fn test_absolute_insets_measure_from_padding_box() {
    let mut tree = StyleTree::new();
    let child = tree.new_node(absolute(
        Size::points(10.0, 10.0),
        Rect {
            start: Dimension::Points(0.0),
            top: Dimension::Points(0.0),
            ..Rect::default()
        },
    ));
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(100.0, 100.0),
                padding: Rect::uniform(Dimension::Points(10.0)),
                ..Style::default()
            },
            &[child],
        )
        .unwrap();

    let placed = &layout(&tree, root).children[0];

    // The padding-box corner, reported against the content-box origin.
    assert_eq!(placed.location.x, -10.0);
    assert_eq!(placed.location.y, -10.0);
}

// ========== Direction ==========

#[test]
fn test_rtl_mirrors_children() {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 100.0, 50.0);
    let b = tree.new_node(Style {
        size: Size::points(100.0, 50.0),
        margin: Rect {
            start: Dimension::Points(5.0),
            ..Rect::default()
        },
        ..Style::default()
    });
    let root = tree
        .new_with_children(
            Style {
                direction: Direction::Rtl,
                size: Size::points(300.0, 100.0),
                ..Style::default()
            },
            &[a, b],
        )
        .unwrap();

    assert_eq!(xs(&layout(&tree, root)), vec![200.0, 95.0]);
}

#[test]
fn test_rtl_is_inherited() {
    let mut tree = StyleTree::new();
    let leaf = fixed(&mut tree, 50.0, 50.0);
    let inner = tree
        .new_with_children(
            Style {
                size: Size::points(200.0, 100.0),
                ..Style::default()
            },
            &[leaf],
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                direction: Direction::Rtl,
                size: Size::points(300.0, 100.0),
                ..Style::default()
            },
            &[inner],
        )
        .unwrap();

    let result = layout(&tree, root);

    assert_eq!(result.children[0].location.x, 100.0);
    assert_eq!(result.children[0].children[0].location.x, 150.0);
}

#[test]
fn test_rtl_content_origin_uses_physical_left_padding() {
    let mut tree = StyleTree::new();
    let leaf = fixed(&mut tree, 50.0, 50.0);
    let root = tree
        .new_with_children(
            Style {
                direction: Direction::Rtl,
                size: Size::points(300.0, 100.0),
                padding: Rect {
                    start: Dimension::Points(20.0),
                    end: Dimension::Points(10.0),
                    ..Rect::default()
                },
                ..Style::default()
            },
            &[leaf],
        )
        .unwrap();

    // Border box x = 300 - 20 - 50 = 230; the content box starts at the
    // left padding (the end edge) of 10.
    assert_eq!(layout(&tree, root).children[0].location.x, 220.0);
}

// ========== Aspect ratio ==========

#[test]
fn test_aspect_ratio_derives_height_from_width() {
    let child = aligned_child(
        Style {
            size: Size::points(400.0, 400.0),
            align_items: AlignItems::FlexStart,
            ..Style::default()
        },
        Style {
            size: width_only(Dimension::Points(100.0)),
            aspect_ratio: Some(2.0),
            ..Style::default()
        },
    );

    assert_eq!(child.size, Size { width: 100.0, height: 50.0 });
}

#[test]
fn test_aspect_ratio_derives_basis_from_cross_size() {
    let child = aligned_child(
        Style::default(),
        Style {
            size: Size {
                width: Dimension::Auto,
                height: Dimension::Points(40.0),
            },
            aspect_ratio: Some(2.0),
            ..Style::default()
        },
    );

    assert_eq!(child.size, Size { width: 80.0, height: 40.0 });
}

#[test]
fn test_invalid_aspect_ratio_is_ignored() {
    let mut tree = StyleTree::new();
    let root = tree.new_node(Style {
        size: width_only(Dimension::Points(100.0)),
        aspect_ratio: Some(-1.0),
        ..Style::default()
    });

    assert_eq!(layout(&tree, root).size, Size { width: 100.0, height: 0.0 });
}

// ========== Measured content ==========

#[test]
fn test_measured_leaf_uses_content_size() {
    let mut tree = StyleTree::new();
    let text = tree.new_node(Style {
        padding: Rect::uniform(Dimension::Points(5.0)),
        ..Style::default()
    });
    tree.set_measured(text, true).unwrap();
    let root = tree.new_with_children(Style::default(), &[text]).unwrap();
    let measure = |_node: NodeId, _known: Size<Option<f32>>, _available: Size<Option<f32>>| {
        Some(Size {
            width: 40.0_f32,
            height: 20.0,
        })
    };

    let result = LayoutEngine::new()
        .compute_layout(&tree, root, Size::NONE, &measure)
        .unwrap();

    assert_eq!(result.size, Size { width: 50.0, height: 30.0 });
    assert_eq!(result.children[0].size, Size { width: 50.0, height: 30.0 });
}

#[test]
fn test_measure_receives_known_content_width() {
    let mut tree = StyleTree::new();
    let text = tree.new_node(Style {
        size: width_only(Dimension::Points(80.0)),
        ..Style::default()
    });
    tree.set_measured(text, true).unwrap();
    let root = tree.new_with_children(Style::default(), &[text]).unwrap();

    let seen = Cell::new(None);
    let measure = |_node: NodeId, known: Size<Option<f32>>, _available: Size<Option<f32>>| {
        seen.set(Some(known));
        Some(Size {
            width: known.width.unwrap_or(200.0),
            height: 20.0_f32,
        })
    };

    let result = LayoutEngine::new()
        .compute_layout(&tree, root, Size::NONE, &measure)
        .unwrap();

    assert_eq!(seen.get().map(|known| known.width), Some(Some(80.0)));
    assert_eq!(result.children[0].size, Size { width: 80.0, height: 20.0 });
}

#[test]
fn test_missing_measurement_falls_back_to_padding() {
    let mut tree = StyleTree::new();
    let text = tree.new_node(Style {
        padding: Rect::uniform(Dimension::Points(5.0)),
        ..Style::default()
    });
    tree.set_measured(text, true).unwrap();
    let sibling = fixed(&mut tree, 30.0, 30.0);
    let root = tree.new_with_children(Style::default(), &[text, sibling]).unwrap();

    let (result, issues) = LayoutEngine::new()
        .compute_layout_with_issues(&tree, root, Size::NONE, &NoContent)
        .unwrap();

    assert_eq!(issues, vec![LayoutIssue::MissingMeasurement(text)]);
    assert_eq!(result.children[0].size.width, 10.0);
    assert_eq!(result.children[1].location.x, 10.0);
}

#[test]
fn test_non_finite_measurement_is_zeroed() {
    let mut tree = StyleTree::new();
    let text = tree.new_style();
    tree.set_measured(text, true).unwrap();
    let root = tree.new_with_children(Style::default(), &[text]).unwrap();
    let measure = |_node: NodeId, _known: Size<Option<f32>>, _available: Size<Option<f32>>| {
        Some(Size {
            width: f32::NAN,
            height: 12.0,
        })
    };

    let (result, issues) = LayoutEngine::new()
        .compute_layout_with_issues(&tree, root, Size::NONE, &measure)
        .unwrap();

    assert_eq!(issues, vec![LayoutIssue::NonFiniteMeasurement(text)]);
    assert_eq!(result.children[0].size, Size { width: 0.0, height: 12.0 });
}

/// Measured content with a fixed size and baseline per node.
struct Glyphs(Vec<(NodeId, Size<f32>, f32)>);

impl MeasureContent for Glyphs {
    fn measure(
        &self,
        node: NodeId,
        _known: Size<Option<f32>>,
        _available: Size<Option<f32>>,
    ) -> Option<Size<f32>> {
        self.0.iter().find(|entry| entry.0 == node).map(|entry| entry.1)
    }

    fn baseline(&self, node: NodeId, _size: Size<f32>) -> Option<f32> {
        self.0.iter().find(|entry| entry.0 == node).map(|entry| entry.2)
    }
}

#[test]
fn test_baseline_alignment_lines_up_text() {
    let mut tree = StyleTree::new();
    let tall = tree.new_style();
    let short = tree.new_style();
    tree.set_measured(tall, true).unwrap();
    tree.set_measured(short, true).unwrap();
    let root = tree
        .new_with_children(
            Style {
                align_items: AlignItems::Baseline,
                ..Style::default()
            },
            &[tall, short],
        )
        .unwrap();
    let glyphs = Glyphs(vec![
        (tall, Size { width: 50.0, height: 40.0 }, 30.0),
        (short, Size { width: 50.0, height: 20.0 }, 10.0),
    ]);

    let result = LayoutEngine::new()
        .compute_layout(&tree, root, Size::NONE, &glyphs)
        .unwrap();

    assert_eq!(result.size.height, 40.0);
    assert_eq!(ys(&result), vec![0.0, 20.0]);
}

// ========== Nesting ==========

#[test]
fn test_nested_column_in_row() {
    let mut tree = StyleTree::new();
    let a = fixed(&mut tree, 50.0, 50.0);
    let b = fixed(&mut tree, 50.0, 50.0);
    let column = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                ..Style::default()
            },
            &[a, b],
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(300.0, 200.0),
                ..Style::default()
            },
            &[column],
        )
        .unwrap();

    let result = layout(&tree, root);
    let column = &result.children[0];

    assert_eq!(column.size, Size { width: 300.0, height: 200.0 });
    assert_eq!(ys(column), vec![0.0, 50.0]);
    assert_eq!(result.node_count(), 4);
}

// ========== Pixel rounding ==========

/// Helper to build a 100pt row split between three growing children.
fn thirds() -> (StyleTree, NodeId) {
    let mut tree = StyleTree::new();
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            tree.new_node(Style {
                flex_grow: 1.0,
                flex_basis: Dimension::Points(0.0),
                ..Style::default()
            })
        })
        .collect();
    let root = tree
        .new_with_children(
            Style {
                size: Size::points(100.0, 10.0),
                ..Style::default()
            },
            &children,
        )
        .unwrap();
    (tree, root)
}

#[test]
fn test_rounding_splits_without_gaps() {
    let (tree, root) = thirds();
    let engine = LayoutEngine::with_config(LayoutConfig {
        round: true,
        ..LayoutConfig::default()
    });

    let result = engine
        .compute_layout(&tree, root, Size::NONE, &NoContent)
        .unwrap();

    assert_eq!(xs(&result), vec![0.0, 33.0, 67.0]);
    assert_eq!(
        sizes(&result),
        vec![(33.0, 10.0), (34.0, 10.0), (33.0, 10.0)]
    );
}

#[test]
fn test_layout_is_fractional_by_default() {
    let (tree, root) = thirds();

    let result = layout(&tree, root);

    assert!(result.children.iter().all(|child| child.size.width.fract() != 0.0));
    let total: f32 = result.children.iter().map(|child| child.size.width).sum();
    assert!((total - 100.0).abs() < 1e-3);
}

#[test]
fn test_rounding_accumulates_parent_offsets() {
    let mut node = LayoutNode {
        order: 0,
        size: Size { width: 10.2, height: 4.0 },
        location: sprig_style::Point { x: 0.4, y: 0.0 },
        children: vec![LayoutNode {
            order: 0,
            size: Size { width: 5.0, height: 4.0 },
            location: sprig_style::Point { x: 0.4, y: 0.0 },
            children: Vec::new(),
        }],
    };

    node.round_to_pixels();

    assert_eq!(node.location.x, 0.0);
    assert_eq!(node.size.width, 11.0);
    assert_eq!(node.children[0].location.x, 0.0);
    assert_eq!(node.children[0].size.width, 5.0);
}
