//! Memoized per-node layout results.
//!
//! The resolver asks for the same node under the same constraints many
//! times in one call (flex basis, hypothetical cross size, baseline, final
//! pass) and again on the next call when nothing changed. Results are
//! pure functions of the key below, so they can be reused.
//!
//! # Keys
//!
//! A key is the tree identity and generation, the node, the exact bit
//! patterns of the node and parent sizes (`-0.0` folded into `0.0`), the
//! inherited direction and the layout mode. Exact bits keep cached and
//! uncached results bit-identical. Any tree edit changes the generation,
//! and the first call that sees the new generation evicts the tree's stale
//! entries.
//!
//! # Capacity
//!
//! Each call starts by checking the entry count against a capacity. Over
//! it, whole trees are evicted, least recently laid out first, and the
//! tree being laid out goes last. Entries of dropped trees are never hit
//! again, so they age out this way. A single call may still grow the cache
//! past the capacity until the next call starts.
//!
//! The [`MeasureContent`](crate::MeasureContent) provider is not part of
//! the key. When the content behind a measured leaf changes, edit the tree
//! or call [`LayoutCache::clear`].
//!
//! # Concurrency
//!
//! Entries are `Arc<OnceLock<_>>` cells in a sharded [`DashMap`]. A request
//! clones the cell out of the map (releasing the shard lock) and then
//! initializes it, so two threads asking for the same key compute it once
//! and the second one waits for the first result. A cell is written once,
//! whole, and never mutated afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sprig_style::{Direction, Size};
use sprig_tree::{NodeId, StyleTree, TreeId};

use crate::error::LayoutIssue;
use crate::flex::{ComputeResult, LayoutMode};

/// Identity of one resolver request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    tree: TreeId,
    generation: u64,
    node: NodeId,
    node_size: Size<Option<u32>>,
    parent_size: Size<Option<u32>>,
    direction: Direction,
    mode: LayoutMode,
}

impl CacheKey {
    pub(crate) fn new(
        tree: &StyleTree,
        node: NodeId,
        node_size: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        direction: Direction,
        mode: LayoutMode,
    ) -> Self {
        Self {
            tree: tree.id(),
            generation: tree.generation(),
            node,
            node_size: node_size.map(|axis| axis.map(length_bits)),
            parent_size: parent_size.map(|axis| axis.map(length_bits)),
            direction,
            mode,
        }
    }
}

fn length_bits(value: f32) -> u32 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// A finished result plus the issues raised while computing its subtree,
/// so that a cache hit reports them again.
#[derive(Debug)]
pub(crate) struct CacheEntry {
    pub(crate) result: Arc<ComputeResult>,
    pub(crate) issues: Vec<LayoutIssue>,
}

type Cell = Arc<OnceLock<CacheEntry>>;

/// Last generation and call stamp seen for one tree.
#[derive(Debug, Clone, Copy)]
struct TreeRecord {
    generation: u64,
    last_call: u64,
}

/// Hit and miss counters of a [`LayoutCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Requests answered from a stored entry.
    pub hits: u64,
    /// Requests that computed a new entry.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
}

/// Concurrent memo of resolver results, shared by every call made through
/// one [`LayoutEngine`](crate::LayoutEngine).
#[derive(Debug)]
pub struct LayoutCache {
    entries: DashMap<CacheKey, Cell, FxBuildHasher>,
    trees: DashMap<TreeId, TreeRecord, FxBuildHasher>,
    calls: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            trees: DashMap::with_hasher(FxBuildHasher),
            calls: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries.clear();
        self.trees.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    /// Start a call on `tree`: record its generation, evict its entries
    /// from older generations, then evict whole trees until at most
    /// `capacity` entries remain.
    pub(crate) fn begin_call(&self, tree: &StyleTree, capacity: usize) {
        let id = tree.id();
        let generation = tree.generation();
        let last_call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        let stale = self
            .trees
            .insert(
                id,
                TreeRecord {
                    generation,
                    last_call,
                },
            )
            .is_some_and(|previous| previous.generation != generation);
        if stale {
            let before = self.entries.len();
            self.entries
                .retain(|key, _| key.tree != id || key.generation == generation);
            log::debug!(
                "evicted {} stale layout entries for tree {}",
                before.saturating_sub(self.entries.len()),
                id.get()
            );
        }

        if self.over_capacity(capacity) {
            self.evict_to(capacity, id);
        }
    }

    fn over_capacity(&self, capacity: usize) -> bool {
        self.entries.len() > capacity || self.trees.len() > capacity
    }

    /// Evict trees, least recently laid out first and `current` last,
    /// until the cache holds at most `capacity` entries (and records).
    fn evict_to(&self, capacity: usize, current: TreeId) {
        let mut victims: Vec<(bool, u64, TreeId)> = self
            .trees
            .iter()
            .map(|record| {
                (
                    *record.key() == current,
                    record.value().last_call,
                    *record.key(),
                )
            })
            .collect();
        victims.sort_unstable();

        let before = self.entries.len();
        for (_, _, victim) in victims {
            if !self.over_capacity(capacity) {
                break;
            }
            self.entries.retain(|key, _| key.tree != victim);
            if victim != current {
                let _ = self.trees.remove(&victim);
            }
        }
        log::debug!(
            "cache over capacity {capacity}: evicted {} entries",
            before.saturating_sub(self.entries.len())
        );
    }

    /// Return the result for `key`, running `compute` if no entry exists.
    ///
    /// The second value holds the issues stored with a reused entry; it is
    /// empty when this call ran `compute` (which reported them itself).
    pub(crate) fn get_or_compute(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> CacheEntry,
    ) -> (Arc<ComputeResult>, Vec<LayoutIssue>) {
        let cell: Cell = Arc::clone(&self.entries.entry(key).or_default());
        let mut computed = false;
        let entry = cell.get_or_init(|| {
            computed = true;
            compute()
        });
        let counter = if computed { &self.misses } else { &self.hits };
        let _ = counter.fetch_add(1, Ordering::Relaxed);
        let replay = if computed {
            Vec::new()
        } else {
            entry.issues.clone()
        };
        (Arc::clone(&entry.result), replay)
    }
}
