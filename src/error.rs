use thiserror::Error;

/// Errors that can occur when building a ShardedMap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The shard count is invalid (must be greater than 0).
    #[error("shard count must be greater than 0")]
    InvalidShardCount,
}
