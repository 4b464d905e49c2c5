//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`LayoutEngine`](crate::LayoutEngine).
///
/// Missing JSON fields take their defaults:
///
/// ```
/// let config: sprig_layout::LayoutConfig = serde_json::from_str(r#"{"cache": false}"#).unwrap();
/// assert_eq!(config.max_depth, 256);
/// assert!(!config.cache);
/// assert!(!config.round);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Deepest style subtree a call accepts. The resolver recurses once per
    /// level, so this bounds stack use.
    pub max_depth: usize,
    /// Whether per-node results are memoized across calls.
    pub cache: bool,
    /// Entries the cache may hold when a call starts. Over the limit, the
    /// least recently laid out trees are evicted first.
    pub max_cache_entries: usize,
    /// Snap the finished layout tree to whole pixels
    /// (see [`LayoutNode::round_to_pixels`](crate::LayoutNode::round_to_pixels)).
    pub round: bool,
}

impl LayoutConfig {
    /// Default depth limit.
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    /// Default cache capacity.
    pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 16_384;
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            cache: true,
            max_cache_entries: Self::DEFAULT_MAX_CACHE_ENTRIES,
            round: false,
        }
    }
}
