//! Layout warnings, emitted once per unique message.
//!
//! Provides deduplication to avoid spamming the same warning for every
//! node that hits it. Used by the resolver to surface non-fatal issues
//! (missing measurements, non-finite content sizes) through `log`.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a non-fatal layout issue (logs once per unique message).
///
/// Returns `true` when the message was emitted, `false` when it had
/// already been seen since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use sprig_common::warning::warn_once;
///
/// let first = warn_once("layout", "node #3 has no measurement");
/// let second = warn_once("layout", "node #3 has no measurement");
/// assert!(first || !second);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let fresh = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if fresh {
        log::warn!(target: "sprig", "[{component}] {message}");
    }
    fresh
}

/// Clear all recorded warnings (call between unrelated documents).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
