//! # ShardedMap
//!
//! A concurrent ordered map split across a fixed number of shards.
//!
//! Every shard is a `BTreeMap` guarded by its own mutex. A key is routed to
//! exactly one shard (integral keys by value, everything else by a 64-bit
//! hash), so threads working on keys in different shards never wait on each
//! other.
//!
//! ## Operations
//!
//! - [`ShardedMap::access`] locks the key's shard and hands back a
//!   [`ScopedAccess`] to the value, inserting `V::default()` if needed. The
//!   lock is released when the handle is dropped.
//! - [`ShardedMap::erase`] removes a key; absent keys are a no-op.
//! - [`ShardedMap::snapshot`] copies everything into one `BTreeMap`, locking
//!   one shard at a time. It is not an atomic view across shards.
//!
//! ## Example
//!
//! ```rust
//! use shardedmap::ShardedMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map = Arc::new(ShardedMap::<u64, u64>::new(8)?);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let map = Arc::clone(&map);
//!         thread::spawn(move || {
//!             for key in 0..100 {
//!                 *map.access(key) += 1;
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! let snapshot = map.snapshot();
//! assert_eq!(snapshot.len(), 100);
//! assert!(snapshot.values().all(|&count| count == 4));
//! # Ok::<(), shardedmap::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use shardedmap::{HashFunction, ShardedMapBuilder};
//!
//! let map = ShardedMapBuilder::new()
//!     .shard_count(12)?
//!     .hash_function(HashFunction::AHash)
//!     .build::<String, i32>()?;
//! assert_eq!(map.shard_count(), 12);
//! # Ok::<(), shardedmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Scoped access handle.
pub mod access;
/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Key routing and hash functions.
pub mod hash;
/// Internal shard implementation.
mod shard;
/// Main ShardedMap implementation.
pub mod sharded_map;
/// Statistics and metrics collection.
pub mod stats;

// Re-export main types
pub use access::ScopedAccess;
pub use config::{Config, HashFunction, ShardedMapBuilder, DEFAULT_SHARD_COUNT};
pub use error::Error;
pub use hash::{ShardHasher, ShardKey};
pub use sharded_map::ShardedMap;
pub use stats::{Diagnostics, ShardDiagnostics, ShardOps, Stats};
