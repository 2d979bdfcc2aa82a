//! Result stores for single-argument wrappers.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use siphasher::sip128::{Hasher128, SipHasher13};

use crate::value::{Value, WeakValue};

/// Smallest population at which an amortized sweep of dead slots triggers.
const SWEEP_FLOOR: usize = 32;

/// An identity-keyed store from reference arguments to cached results.
///
/// Slots hold their key only weakly, so the store never extends a key's
/// lifetime. A slot whose key has been reclaimed is dropped silently: on the
/// next probe of its address, or in an amortized sweep once the map crosses
/// a doubling watermark. Nothing observable marks the expiry.
pub(crate) struct RefStore {
    map: FxHashMap<usize, Slot>,
    /// Population at which the next sweep runs.
    sweep_at: usize,
}

struct Slot {
    key: WeakValue,
    value: Value,
}

impl RefStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { map: FxHashMap::default(), sweep_at: SWEEP_FLOOR }
    }

    /// Returns the result cached for this exact allocation, if any.
    ///
    /// Comparison is by identity, never by structure. An address can only be
    /// reoccupied after its previous allocation died, so a live weak handle
    /// at the probed address is necessarily the incoming key.
    pub fn lookup(&mut self, key: &Value) -> Option<Value> {
        use std::collections::hash_map::Entry;

        let addr = key.ref_addr()?;
        match self.map.entry(addr) {
            Entry::Occupied(slot) if slot.get().key.expired() => {
                slot.remove();
                None
            }
            Entry::Occupied(slot) => Some(slot.get().value.clone()),
            Entry::Vacant(_) => None,
        }
    }

    /// Records a result under the key's identity without keeping the key
    /// alive.
    pub fn insert(&mut self, key: &Value, value: Value) {
        // Scalars never reach the reference store.
        let Some((addr, weak)) = key.weak_key() else { return };
        self.map.insert(addr, Slot { key: weak, value });
        if self.map.len() >= self.sweep_at {
            self.sweep();
        }
    }

    /// Drops slots whose keys have been reclaimed, keeping husks bounded by
    /// a constant factor of the live population.
    fn sweep(&mut self) {
        self.map.retain(|_, slot| !slot.key.expired());
        self.sweep_at = (self.map.len() * 2).max(SWEEP_FLOOR);
    }
}

/// A value-keyed store from canonicalized scalar arguments to cached
/// results.
///
/// Keys are 128-bit digests of the argument's canonical string form, so two
/// scalars sharing that form (the number `1` and the string `"1"`) share a
/// cache slot. Presence is the map's own occupancy, never a sentinel
/// comparison, so a cached `Undefined`, `Null`, `false`, `0` or `""` is a
/// genuine hit. Entries are never evicted.
pub(crate) struct PrimStore {
    map: FxHashMap<u128, Value>,
}

impl PrimStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { map: FxHashMap::default() }
    }

    /// The store key for a scalar: a 128-bit digest of its canonical string
    /// form. At 128 bits, digest collisions are not a practical concern.
    pub fn key(value: &Value) -> u128 {
        let mut state = SipHasher13::new();
        value.to_string().hash(&mut state);
        state.finish128().as_u128()
    }

    /// Returns the cached result for this key, if one was ever recorded.
    pub fn lookup(&self, key: u128) -> Option<Value> {
        self.map.get(&key).cloned()
    }

    /// Records a result for this key.
    pub fn insert(&mut self, key: u128, value: Value) {
        self.map.insert(key, value);
    }
}
