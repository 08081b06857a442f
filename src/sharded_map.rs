use crate::access::ScopedAccess;
use crate::config::{create_hasher, Config, ShardedMapBuilder};
use crate::error::Error;
use crate::hash::{ShardHasher, ShardKey};
use crate::shard::Shard;
use crate::stats::{Diagnostics, ShardOps, Stats};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Concurrent ordered map split across a fixed number of shards.
///
/// Each shard is a `BTreeMap` behind its own mutex. A key always lands in the
/// same shard, so operations on keys in different shards never block each
/// other. The shard count is fixed at construction.
///
/// # Example
///
/// ```rust
/// use shardedmap::ShardedMap;
///
/// let map = ShardedMap::<&str, i32>::new(4)?;
/// *map.access("a") = 1;
/// *map.access("b") = 2;
/// map.erase(&"a");
///
/// let snapshot = map.snapshot();
/// assert_eq!(snapshot.len(), 1);
/// assert_eq!(snapshot[&"b"], 2);
/// # Ok::<(), shardedmap::Error>(())
/// ```
pub struct ShardedMap<K, V> {
    shards: Vec<Shard<K, V>>,
    hash: ShardHasher,
}

impl<K, V> ShardedMap<K, V>
where
    K: ShardKey,
{
    /// Create a map with `shard_count` shards and the default hash function.
    ///
    /// Fails with [`Error::InvalidShardCount`] if `shard_count` is 0.
    pub fn new(shard_count: usize) -> Result<Self, Error> {
        Self::with_config(Config::new().shard_count(shard_count)?)
    }

    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        Ok(Self::from_config(config))
    }

    /// `Config` already guarantees a non-zero shard count.
    fn from_config(config: Config) -> Self {
        let shard_count = config.shard_count.get();
        let shards = (0..shard_count).map(|_| Shard::new()).collect();

        debug!(
            shard_count,
            hash_function = ?config.hash_function,
            "created sharded map"
        );

        Self {
            shards,
            hash: create_hasher(config.hash_function),
        }
    }

    /// Start building a map with custom settings.
    pub fn builder() -> ShardedMapBuilder {
        ShardedMapBuilder::new()
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard that owns `key`.
    ///
    /// Integral keys use `key as u64 % shard_count`; every other key uses the
    /// configured hash. The result never changes for a given map.
    #[inline]
    pub fn shard_index(&self, key: &K) -> usize {
        let hash = key.shard_hash(&self.hash);
        (hash % self.shards.len() as u64) as usize
    }

    #[inline]
    fn shard(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.shard_index(key)]
    }

    /// Lock the key's shard and return a handle to its value, inserting
    /// `V::default()` if the key is absent.
    ///
    /// Blocks until the shard lock is free. The lock is held until the
    /// returned handle is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map = ShardedMap::<u32, u64>::new(8)?;
    /// assert_eq!(*map.access(3), 0);
    /// *map.access(3) += 5;
    /// assert_eq!(*map.access(3), 5);
    /// # Ok::<(), shardedmap::Error>(())
    /// ```
    pub fn access(&self, key: K) -> ScopedAccess<'_, V>
    where
        V: Default,
    {
        let shard_idx = self.shard_index(&key);
        self.shards[shard_idx].access(key)
    }

    /// Run `f` on the key's value (inserting a default first if needed) and
    /// release the shard lock before returning `f`'s result.
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map = ShardedMap::<&str, u32>::new(2)?;
    /// let now = map.update("hits", |v| {
    ///     *v += 1;
    ///     *v
    /// });
    /// assert_eq!(now, 1);
    /// # Ok::<(), shardedmap::Error>(())
    /// ```
    pub fn update<F, R>(&self, key: K, f: F) -> R
    where
        V: Default,
        F: FnOnce(&mut V) -> R,
    {
        let mut slot = self.access(key);
        f(&mut *slot)
    }

    /// Remove `key` if present. Removing an absent key is a no-op.
    pub fn erase(&self, key: &K) {
        self.shard(key).erase(key);
    }

    /// Clone the value for `key`, if present, without inserting anything.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).get(key)
    }

    /// Check whether `key` is present without inserting it.
    pub fn contains_key(&self, key: &K) -> bool {
        self.shard(key).contains_key(key)
    }

    /// Copy all entries into one ordered map.
    ///
    /// Shards are locked one at a time, never two at once. The result is
    /// exact when nothing writes concurrently; otherwise writes to shards not
    /// yet visited may or may not show up, so it is not an atomic view of
    /// the whole map.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            shard.copy_into(&mut merged);
        }
        trace!(
            entries = merged.len(),
            shards = self.shards.len(),
            "built snapshot"
        );
        merged
    }

    /// Total number of entries across all shards.
    ///
    /// Counts one shard at a time, with the same relaxed consistency as
    /// [`snapshot`](Self::snapshot).
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.is_empty())
    }

    /// Number of entries in each shard, in shard order.
    pub fn shard_loads(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.len()).collect()
    }

    /// Get detailed statistics about the map and its shards.
    pub fn stats(&self) -> Stats {
        let shard_sizes = self.shard_loads();
        let operations: Vec<ShardOps> = self.shards.iter().map(|s| s.stats()).collect();
        let size: usize = shard_sizes.iter().sum();

        Stats {
            size,
            shard_sizes,
            operations,
        }
    }

    /// Load balance and operation summary.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::from(self.stats())
    }
}

impl<K, V> Default for ShardedMap<K, V>
where
    K: ShardKey,
{
    /// 16 shards, ahash.
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl<K, V> fmt::Debug for ShardedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedMap")
            .field("shard_count", &self.shards.len())
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}
