//! Short-term tabu memory with iteration-based expiry.

use std::collections::{BTreeMap, HashMap};

use super::types::MoveKey;

/// Move keys forbidden until an expiry iteration.
///
/// A key recorded at iteration `t` with tenure `T` is tabu at every
/// iteration `t' <= t + T`. Expired entries are dropped by
/// [`TabuMemory::prune`] through an expiry-ordered index, so pruning only
/// touches the entries that actually expire.
///
/// # Examples
///
/// ```
/// use tabu_vrp::problem::CityId;
/// use tabu_vrp::tabu::{MoveKey, TabuMemory};
///
/// let key = MoveKey::Relocate { client: CityId::new(1), from: 0, to: 1 };
/// let mut memory = TabuMemory::new();
/// memory.record(key, 4, 2);
/// assert!(memory.is_tabu(&key, 5));
/// assert!(memory.is_tabu(&key, 6));
/// assert!(!memory.is_tabu(&key, 7));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabuMemory {
    entries: HashMap<MoveKey, usize>,
    by_expiry: BTreeMap<usize, Vec<MoveKey>>,
}

impl TabuMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` has a live entry at `iteration`.
    pub fn is_tabu(&self, key: &MoveKey, iteration: usize) -> bool {
        self.entries
            .get(key)
            .is_some_and(|&expiry| iteration <= expiry)
    }

    /// Forbids `key` through iteration `iteration + tenure`, replacing any
    /// previous entry.
    pub fn record(&mut self, key: MoveKey, iteration: usize, tenure: usize) {
        let expiry = iteration.saturating_add(tenure);
        self.entries.insert(key, expiry);
        self.by_expiry.entry(expiry).or_default().push(key);
    }

    /// Drops every entry that expired before `iteration`.
    pub fn prune(&mut self, iteration: usize) {
        let live = self.by_expiry.split_off(&iteration);
        let expired = std::mem::replace(&mut self.by_expiry, live);

        for (expiry, keys) in expired {
            for key in keys {
                // Overwritten entries keep a stale slot in the index.
                if self.entries.get(&key) == Some(&expiry) {
                    self.entries.remove(&key);
                }
            }
        }
    }

    /// Expiry iteration of `key`, if recorded and not yet pruned.
    pub fn expiry(&self, key: &MoveKey) -> Option<usize> {
        self.entries.get(key).copied()
    }

    /// Number of recorded keys, expired but unpruned ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
