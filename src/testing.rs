//! Cache observability for tests.
//!
//! Only compiled with the `testing` cargo feature. The public API exposes no
//! cache introspection; this module exists so the test suite can assert hits
//! and misses without one. All bookkeeping is thread-local.

use std::cell::Cell;

thread_local! {
    /// Whether the last wrapper call was a cache hit.
    static LAST_WAS_HIT: Cell<bool> = const { Cell::new(false) };
    /// Hits recorded since the last reset.
    static HITS: Cell<u64> = const { Cell::new(0) };
    /// Misses recorded since the last reset.
    static MISSES: Cell<u64> = const { Cell::new(0) };
}

/// Whether the most recent wrapper call on this thread was served from
/// cache.
pub fn last_was_hit() -> bool {
    LAST_WAS_HIT.with(|cell| cell.get())
}

/// Hits recorded on this thread since the last [`reset`].
pub fn hits() -> u64 {
    HITS.with(|cell| cell.get())
}

/// Misses recorded on this thread since the last [`reset`].
pub fn misses() -> u64 {
    MISSES.with(|cell| cell.get())
}

/// Clears this thread's hit/miss bookkeeping.
pub fn reset() {
    LAST_WAS_HIT.with(|cell| cell.set(false));
    HITS.with(|cell| cell.set(0));
    MISSES.with(|cell| cell.set(0));
}

/// Marks the last call as a cache hit.
pub(crate) fn register_hit() {
    LAST_WAS_HIT.with(|cell| cell.set(true));
    HITS.with(|cell| cell.set(cell.get() + 1));
}

/// Marks the last call as a cache miss.
pub(crate) fn register_miss() {
    LAST_WAS_HIT.with(|cell| cell.set(false));
    MISSES.with(|cell| cell.set(cell.get() + 1));
}
