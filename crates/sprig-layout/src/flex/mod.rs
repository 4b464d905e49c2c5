//! The flex layout resolver.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! One recursive request, [`LayoutContext::compute_node`], sizes a node
//! under a pair of constraints: the node's own known size and the size of
//! its parent's content box. The [`LayoutMode`] says how much of the work
//! the caller needs:
//!
//! - `ContentFit` ignores the node's own size and returns its content size
//!   (used for automatic minimum sizes).
//! - `AtMost` returns the border-box size only (flex basis and
//!   hypothetical cross size probes).
//! - `Exact` also positions every child (the final pass).
//!
//! Containers run the steps below; leaves are sized in [`leaf`].
//!
//! 1. Collect items and their flex base sizes ([`items`])
//! 2. Break items into lines ([`lines`])
//! 3. Resolve flexible lengths per line ([`resolve`])
//! 4. Size the container's main axis
//! 5. Hypothetical cross sizes and baselines ([`align`])
//! 6. Line cross sizes and the container's cross axis
//! 7. Stretch, main-axis and cross-axis alignment ([`align`])
//! 8. Final child pass and absolutely positioned children ([`absolute`])

mod absolute;
mod align;
mod items;
mod leaf;
mod lines;
mod resolve;

use std::sync::Arc;

use rustc_hash::FxHashSet;
use sprig_style::math::{clamp_maybe, clamp_size, finite, sanitize_length};
use sprig_style::{
    AlignContent, AlignItems, Direction, FlexDirection, FlexWrap, MaybeMath, Point, Rect, Size,
    Style,
};
use sprig_tree::{NodeId, StyleTree};

use crate::cache::{CacheEntry, CacheKey, LayoutCache};
use crate::error::LayoutIssue;
use crate::layout_node::LayoutNode;
use crate::measure::MeasureContent;

use items::FlexItem;
use lines::FlexLine;

/// How much of a node's layout a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LayoutMode {
    /// Content size, ignoring the node's own size.
    ContentFit,
    /// Border-box size under the given constraints.
    AtMost,
    /// Size plus positioned children.
    Exact,
}

/// Result of one resolver request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComputeResult {
    /// Border-box size.
    pub(crate) size: Size<f32>,
    /// First baseline, measured from the top of the border box.
    pub(crate) baseline: Option<f32>,
    /// Positioned children; empty unless the request was `Exact`.
    pub(crate) children: Vec<LayoutNode>,
}

/// Values of a flex container shared by every step of its layout.
struct Container {
    node: NodeId,
    dir: FlexDirection,
    direction: Direction,
    wrap_reverse: bool,
    border: Rect<f32>,
    padding_border: Rect<f32>,
    node_inner_size: Size<Option<f32>>,
    available_space: Size<Option<f32>>,
}

/// State of one layout call.
pub(crate) struct LayoutContext<'a> {
    tree: &'a StyleTree,
    measure: &'a dyn MeasureContent,
    cache: &'a LayoutCache,
    issues: Vec<LayoutIssue>,
}

impl<'a> LayoutContext<'a> {
    pub(crate) fn new(
        tree: &'a StyleTree,
        measure: &'a dyn MeasureContent,
        cache: &'a LayoutCache,
    ) -> Self {
        Self {
            tree,
            measure,
            cache,
            issues: Vec::new(),
        }
    }

    /// Issues raised during the call, each reported once, in first-seen
    /// order.
    pub(crate) fn into_issues(self) -> Vec<LayoutIssue> {
        let mut seen = FxHashSet::default();
        let mut issues = self.issues;
        issues.retain(|issue| seen.insert(*issue));
        issues
    }

    /// Lay out `root` in the given available space.
    ///
    /// The root's declared size resolves against `available`; its min and
    /// max sizes are enforced by a second pass when the first result falls
    /// outside them.
    pub(crate) fn layout_root(&mut self, root: NodeId, available: Size<Option<f32>>) -> LayoutNode {
        let tree = self.tree;
        let style = tree.style(root);
        if style.is_hidden() {
            return LayoutNode {
                order: 0,
                size: Size::ZERO,
                location: Point::ZERO,
                children: Vec::new(),
            };
        }

        let min_size = style.min_size.resolve(available);
        let max_size = style.max_size.resolve(available);
        let declared = style.size.resolve(available);
        let known = Size {
            width: clamp_maybe(declared.width, min_size.width, max_size.width),
            height: clamp_maybe(declared.height, min_size.height, max_size.height),
        };

        let mut result =
            self.compute_node(root, known, available, Direction::Ltr, LayoutMode::Exact);
        let clamped = Size {
            width: clamp_size(result.size.width, min_size.width, max_size.width),
            height: clamp_size(result.size.height, min_size.height, max_size.height),
        };
        if clamped != result.size {
            result = self.compute_node(
                root,
                Size::definite(clamped.width, clamped.height),
                available,
                Direction::Ltr,
                LayoutMode::Exact,
            );
        }

        LayoutNode {
            order: 0,
            size: result.size,
            location: Point::ZERO,
            children: result.children.clone(),
        }
    }

    /// Resolve `node` under the given constraints, reusing a cached result
    /// when one exists.
    ///
    /// Issues raised while computing are stored with the entry and replayed
    /// on every later hit, so each call reports the same issues whether or
    /// not its results were cached.
    pub(crate) fn compute_node(
        &mut self,
        node: NodeId,
        node_size: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        inherited: Direction,
        mode: LayoutMode,
    ) -> Arc<ComputeResult> {
        let node_size = if mode == LayoutMode::ContentFit {
            Size::NONE
        } else {
            node_size
        };

        let cache = self.cache;
        let key = CacheKey::new(self.tree, node, node_size, parent_size, inherited, mode);
        let first_issue = self.issues.len();
        let (result, replay) = cache.get_or_compute(key, || {
            let result =
                Arc::new(self.compute_uncached(node, node_size, parent_size, inherited, mode));
            CacheEntry {
                result,
                issues: self.issues[first_issue..].to_vec(),
            }
        });
        self.issues.extend(replay);
        result
    }

    fn compute_uncached(
        &mut self,
        node: NodeId,
        node_size: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        inherited: Direction,
        mode: LayoutMode,
    ) -> ComputeResult {
        let tree = self.tree;
        let style = tree.style(node);
        let direction = style.direction.resolve(inherited);
        let node_size = apply_aspect_ratio(node_size, style.used_aspect_ratio());

        log::trace!(
            "resolve {node} {mode:?} node_size={node_size:?} parent_size={parent_size:?}"
        );

        let has_items = tree
            .children(node)
            .iter()
            .any(|&child| !tree.style(child).is_hidden());
        let mut result = if has_items {
            self.compute_container(node, style, node_size, parent_size, direction, mode)
        } else {
            self.compute_leaf(node, style, node_size, parent_size)
        };
        result.size = result.size.map(sanitize_length);
        result
    }

    fn compute_container(
        &mut self,
        node: NodeId,
        style: &Style,
        node_size: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        direction: Direction,
        mode: LayoutMode,
    ) -> ComputeResult {
        let dir = style.flex_direction;
        let margin = style.margin.resolve_edges(parent_size.width);
        let border = style.border.resolve_edges(parent_size.width);
        let padding_border = style.padding.resolve_edges(parent_size.width) + border;

        let node_inner_size = Size {
            width: node_size
                .width
                .maybe_sub(padding_border.horizontal())
                .map(|width| width.max(0.0)),
            height: node_size
                .height
                .maybe_sub(padding_border.vertical())
                .map(|height| height.max(0.0)),
        };

        // [§ 9.2 step 2](https://www.w3.org/TR/css-flexbox-1/#algo-available)
        //
        // "if that dimension of the flex container's content box is a
        // definite size, use that; [...] otherwise, subtract the flex
        // container's margin, border, and padding from the space available
        // to the flex container in that dimension"
        let available_space = Size {
            width: node_size
                .width
                .or(parent_size.width.maybe_sub(margin.horizontal()))
                .maybe_sub(padding_border.horizontal())
                .map(|width| width.max(0.0)),
            height: node_size
                .height
                .or(parent_size.height.maybe_sub(margin.vertical()))
                .maybe_sub(padding_border.vertical())
                .map(|height| height.max(0.0)),
        };

        let container = Container {
            node,
            dir,
            direction,
            wrap_reverse: style.flex_wrap == FlexWrap::WrapReverse,
            border,
            padding_border,
            node_inner_size,
            available_space,
        };

        // STEP 1: Flex base sizes and hypothetical main sizes.
        let mut items = self.collect_items(&container, style);

        // STEP 2: Collect items into flex lines.
        let mut lines = lines::collect_lines(&items, dir, style.flex_wrap, available_space.main(dir));

        // STEP 3: Resolve flexible lengths.
        //
        // A content-sized container only flexes its children against
        // available space on the final pass, where its size is settled.
        let flex_space = node_inner_size.main(dir).or(if mode == LayoutMode::Exact {
            available_space.main(dir)
        } else {
            None
        });
        for line in &lines {
            resolve::resolve_flexible_lengths(&mut items[line.range.clone()], dir, flex_space);
        }

        // STEP 4: Main size of the container.
        let longest_line = lines
            .iter()
            .map(|line| lines::outer_target_main(&items[line.range.clone()], dir))
            .fold(0.0, f32::max);
        let inner_main = node_inner_size.main(dir).unwrap_or_else(|| {
            match available_space.main(dir) {
                Some(available) if lines.len() > 1 && longest_line < available => available,
                _ => longest_line,
            }
        });

        // STEP 5: Hypothetical cross sizes and baselines.
        let probe_parent = Size::from_main_cross(dir, Some(inner_main), node_inner_size.cross(dir));
        self.determine_hypothetical_cross(&container, &mut items, probe_parent);
        if dir.is_row() && items.iter().any(|item| item.align_self == AlignItems::Baseline) {
            self.compute_baselines(&container, &mut items, probe_parent);
        }

        // STEP 6: Line cross sizes and the container's cross size.
        align::size_lines(&container, style, parent_size, &items, &mut lines);
        let lines_cross: f32 = lines.iter().map(|line| line.cross_size).sum();
        let inner_cross = node_inner_size.cross(dir).unwrap_or(lines_cross);
        let size = Size::from_main_cross(
            dir,
            inner_main + padding_border.main(dir),
            inner_cross + padding_border.cross(dir),
        );

        if mode != LayoutMode::Exact {
            return ComputeResult {
                size,
                baseline: None,
                children: Vec::new(),
            };
        }

        // STEP 7: Alignment.
        if style.align_content == AlignContent::Stretch && node_inner_size.cross(dir).is_some() {
            align::stretch_lines(&mut lines, inner_cross);
        }
        align::determine_used_cross(&mut items, &lines, dir);
        for line in &lines {
            let line_items = &mut items[line.range.clone()];
            align::distribute_main(line_items, dir, inner_main, style.justify_content);
            align::align_in_line(line_items, line, dir, container.wrap_reverse);
        }

        // STEP 8: Final pass over in-flow children, then out-of-flow ones.
        let mut slots: Vec<Option<LayoutNode>> = vec![None; self.tree.child_count(node)];
        let content_size = Size::from_main_cross(dir, Some(inner_main), Some(inner_cross));
        let baseline = self.place_items(
            &container,
            style.align_content,
            &items,
            &lines,
            content_size,
            &mut slots,
        );
        self.place_absolute_children(&container, style, size, &mut slots);

        ComputeResult {
            size,
            baseline,
            children: finish_children(slots, size, padding_border, direction),
        }
    }

    /// Position every in-flow item and return the container's first
    /// baseline.
    fn place_items(
        &mut self,
        container: &Container,
        align_content: AlignContent,
        items: &[FlexItem],
        lines: &[FlexLine],
        content_size: Size<Option<f32>>,
        slots: &mut [Option<LayoutNode>],
    ) -> Option<f32> {
        let dir = container.dir;
        let inner_cross = content_size.cross(dir).unwrap_or(0.0);
        let lines_cross: f32 = lines.iter().map(|line| line.cross_size).sum();
        let (leading, between) = align::align_content_spacing(
            align_content,
            inner_cross - lines_cross,
            lines.len(),
            container.wrap_reverse,
        );

        // Under wrap-reverse the first line sits at the cross end.
        let order: Vec<usize> = if container.wrap_reverse {
            (0..lines.len()).rev().collect()
        } else {
            (0..lines.len()).collect()
        };

        let mut baseline = None;
        let mut cursor = container.padding_border.cross_start(dir) + leading;
        for line_index in order {
            let line = &lines[line_index];
            for (position, item) in items[line.range.clone()].iter().enumerate() {
                let known = Size::from_main_cross(
                    dir,
                    Some(item.target.main(dir)),
                    Some(item.target.cross(dir)),
                );
                let result = self.compute_node(
                    item.node,
                    known,
                    content_size,
                    container.direction,
                    LayoutMode::Exact,
                );

                let (relative_main, relative_cross) = item.relative_offset(dir);
                let main = container.padding_border.main_start(dir)
                    + item.offset_main
                    + relative_main;
                let cross = cursor + item.offset_cross + item.margin.cross_start(dir) + relative_cross;
                let location = point_from_main_cross(dir, main, cross);

                if line_index == 0 && position == 0 {
                    baseline = result.baseline.map(|value| value + location.y);
                }
                if let Some(slot) = slots.get_mut(item.index) {
                    *slot = Some(LayoutNode {
                        order: item.order,
                        size: result.size,
                        location,
                        children: result.children.clone(),
                    });
                }
            }
            cursor += line.cross_size + between;
        }
        baseline
    }
}

/// Derive a missing axis from the other one through `ratio`
/// (width / height).
fn apply_aspect_ratio(size: Size<Option<f32>>, ratio: Option<f32>) -> Size<Option<f32>> {
    match (size.width, size.height, ratio) {
        (Some(width), None, Some(ratio)) => Size {
            width: Some(width),
            height: Some(width / ratio),
        },
        (None, Some(height), Some(ratio)) => Size {
            width: Some(height * ratio),
            height: Some(height),
        },
        _ => size,
    }
}

const fn point_from_main_cross(dir: FlexDirection, main: f32, cross: f32) -> Point<f32> {
    if dir.is_row() {
        Point { x: main, y: cross }
    } else {
        Point { x: cross, y: main }
    }
}

/// Mirror children for right-to-left containers and move locations from
/// the border-box origin to the content-box origin.
fn finish_children(
    slots: Vec<Option<LayoutNode>>,
    size: Size<f32>,
    padding_border: Rect<f32>,
    direction: Direction,
) -> Vec<LayoutNode> {
    let rtl = direction == Direction::Rtl;
    let origin_x = if rtl {
        padding_border.end
    } else {
        padding_border.start
    };
    slots
        .into_iter()
        .flatten()
        .map(|mut child| {
            if rtl {
                child.location.x = size.width - child.location.x - child.size.width;
            }
            child.location.x = finite(child.location.x - origin_x).unwrap_or(0.0);
            child.location.y = finite(child.location.y - padding_border.top).unwrap_or(0.0);
            child
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn count_f32(count: usize) -> f32 {
    count as f32
}
