use crate::access::ScopedAccess;
use crate::stats::ShardStats;
use parking_lot::{Mutex, MutexGuard};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// A single shard: an ordered map behind its own mutex.
pub(crate) struct Shard<K, V> {
    map: Mutex<BTreeMap<K, V>>,
    stats: ShardStats,
}

impl<K: Ord, V> Shard<K, V> {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(BTreeMap::new()),
            stats: ShardStats::new(),
        }
    }

    /// Acquire the shard lock, blocking until it is available.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, BTreeMap<K, V>> {
        #[cfg(feature = "lock-timing")]
        let start = std::time::Instant::now();

        let guard = self.map.lock();

        #[cfg(feature = "lock-timing")]
        self.stats
            .record_lock_wait(u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX));
        self.stats.record_lock_acquisition();
        guard
    }

    /// Lock the shard and return a handle to the slot for `key`, inserting
    /// `V::default()` first if the key is absent.
    pub fn access(&self, key: K) -> ScopedAccess<'_, V>
    where
        V: Default,
    {
        let stats = &self.stats;
        let slot = MutexGuard::map(self.lock(), |map| match map.entry(key) {
            Entry::Occupied(entry) => {
                stats.record_access(false);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                stats.record_access(true);
                entry.insert(V::default())
            }
        });
        ScopedAccess::new(slot)
    }

    /// Remove `key` if present. Returns whether anything was removed.
    pub fn erase(&self, key: &K) -> bool {
        let removed = self.lock().remove(key).is_some();
        if removed {
            self.stats.record_erase();
        }
        removed
    }

    /// Clone the value for `key` without inserting.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    /// Copy every entry into `out` while holding this shard's lock only.
    pub fn copy_into(&self, out: &mut BTreeMap<K, V>)
    where
        K: Clone,
        V: Clone,
    {
        let map = self.lock();
        out.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> crate::stats::ShardOps {
        self.stats.snapshot()
    }
}
