use crate::error::Error;
use crate::hash::{ShardHasher, ShardKey};
use std::num::NonZeroUsize;

/// Number of shards used when none is configured.
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Which hash function to use for routing non-integral keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// Use ahash (default, fast and well-distributed).
    #[default]
    AHash,
    /// Use fxhash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Configuration for a ShardedMap instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub(crate) shard_count: NonZeroUsize,
    pub(crate) hash_function: HashFunction,
}

impl Config {
    /// Create a new config with defaults (16 shards, ahash).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Must be greater than 0.
    pub fn shard_count(mut self, count: usize) -> Result<Self, Error> {
        self.shard_count = NonZeroUsize::new(count).ok_or(Error::InvalidShardCount)?;
        Ok(self)
    }

    /// Set the hash function used for non-integral keys.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: NonZeroUsize::new(DEFAULT_SHARD_COUNT).unwrap_or(NonZeroUsize::MIN),
            hash_function: HashFunction::AHash,
        }
    }
}

/// Builder for creating a ShardedMap with custom configuration.
///
/// ```rust
/// use shardedmap::{HashFunction, ShardedMapBuilder};
///
/// let map = ShardedMapBuilder::new()
///     .shard_count(6)?
///     .hash_function(HashFunction::AHash)
///     .build::<String, u64>()?;
/// assert_eq!(map.shard_count(), 6);
/// # Ok::<(), shardedmap::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ShardedMapBuilder {
    config: Config,
}

impl ShardedMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the number of shards. Must be greater than 0.
    pub fn shard_count(mut self, count: usize) -> Result<Self, Error> {
        self.config = self.config.shard_count(count)?;
        Ok(self)
    }

    /// Set the hash function used for non-integral keys.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Build a ShardedMap with the configured settings.
    pub fn build<K, V>(self) -> Result<crate::ShardedMap<K, V>, Error>
    where
        K: ShardKey,
    {
        crate::ShardedMap::with_config(self.config)
    }
}

/// Create a hash function instance based on the configuration.
pub(crate) fn create_hasher(hash_fn: HashFunction) -> ShardHasher {
    match hash_fn {
        HashFunction::AHash => ShardHasher::AHash,
        #[cfg(feature = "fxhash")]
        HashFunction::FxHash => ShardHasher::FxHash,
    }
}
