//! Layout entry points.
//!
//! A [`LayoutEngine`] owns a [`LayoutConfig`] and a [`LayoutCache`]. It is
//! `Sync`: any number of threads may lay out trees through one shared
//! engine, each call reading its own `&StyleTree`. [`compute_layout`] is
//! the single-shot form without a persistent cache or measured content.

use sprig_common::warning::{clear_warnings, warn_once};
use sprig_style::Size;
use sprig_style::math::finite;
use sprig_tree::{NodeId, StyleTree};

use crate::cache::{CacheStats, LayoutCache};
use crate::config::LayoutConfig;
use crate::error::{LayoutError, LayoutIssue};
use crate::flex::LayoutContext;
use crate::layout_node::LayoutNode;
use crate::measure::{MeasureContent, NoContent};
use crate::validate::check_structure;

/// Reusable layout engine.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    cache: LayoutCache,
}

impl LayoutEngine {
    /// An engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// An engine with the given configuration.
    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            cache: LayoutCache::new(),
        }
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The engine's result cache.
    #[must_use]
    pub const fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Shorthand for `self.cache().stats()`.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Lay out the subtree under `root` in `available` space.
    ///
    /// `available` is the space offered to the root: `None` on an axis
    /// means unbounded, negative values count as 0 and non-finite values
    /// as unbounded. Non-fatal issues are logged through [`warn_once`],
    /// once per tree and message until [`LayoutEngine::clear_cache`]; use
    /// [`LayoutEngine::compute_layout_with_issues`] to receive them
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when `root` is unknown or its subtree is
    /// not a well-formed tree within [`LayoutConfig::max_depth`].
    pub fn compute_layout(
        &self,
        tree: &StyleTree,
        root: NodeId,
        available: Size<Option<f32>>,
        measure: &dyn MeasureContent,
    ) -> Result<LayoutNode, LayoutError> {
        let (layout, issues) = self.compute_layout_with_issues(tree, root, available, measure)?;
        for issue in &issues {
            let _ = warn_once("layout", &format!("tree {}: {issue}", tree.id().get()));
        }
        Ok(layout)
    }

    /// Like [`LayoutEngine::compute_layout`], but return the issues raised
    /// during the call (each once, in first-seen order) instead of logging
    /// them.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutEngine::compute_layout`].
    pub fn compute_layout_with_issues(
        &self,
        tree: &StyleTree,
        root: NodeId,
        available: Size<Option<f32>>,
        measure: &dyn MeasureContent,
    ) -> Result<(LayoutNode, Vec<LayoutIssue>), LayoutError> {
        check_structure(tree, root, self.config.max_depth)?;

        // Without a persistent cache, results are still shared within the
        // call; the resolver asks for each node several times.
        let scratch;
        let cache = if self.config.cache {
            self.cache.begin_call(tree, self.config.max_cache_entries);
            &self.cache
        } else {
            scratch = LayoutCache::new();
            &scratch
        };
        let before = cache.stats();

        let mut context = LayoutContext::new(tree, measure, cache);
        let mut layout = context.layout_root(root, normalize_available(available));
        if self.config.round {
            layout.round_to_pixels();
        }
        let issues = context.into_issues();

        let after = cache.stats();
        log::debug!(
            "laid out {root}: {} nodes, {} issues, cache {} hits / {} misses",
            layout.node_count(),
            issues.len(),
            after.hits.saturating_sub(before.hits),
            after.misses.saturating_sub(before.misses),
        );
        Ok((layout, issues))
    }

    /// Drop every cached result and forget which warnings were logged, so
    /// the next call reports its issues again.
    pub fn clear_cache(&self) {
        self.cache.clear();
        clear_warnings();
    }
}

/// Lay out the subtree under `root` without measured content. Nothing is
/// cached beyond the call.
///
/// # Errors
///
/// Same as [`LayoutEngine::compute_layout`].
pub fn compute_layout(
    tree: &StyleTree,
    root: NodeId,
    available: Size<Option<f32>>,
) -> Result<LayoutNode, LayoutError> {
    let engine = LayoutEngine::with_config(LayoutConfig {
        cache: false,
        ..LayoutConfig::default()
    });
    engine.compute_layout(tree, root, available, &NoContent)
}

fn normalize_available(available: Size<Option<f32>>) -> Size<Option<f32>> {
    available.map(|axis| axis.and_then(finite).map(|value| value.max(0.0)))
}
