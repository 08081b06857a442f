//! Statistics and diagnostics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-shard operation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardOps {
    /// Number of scoped accesses handed out by this shard.
    pub accesses: u64,
    /// Accesses that had to insert a default value.
    pub inserts: u64,
    /// Erase calls that actually removed an entry.
    pub erases: u64,
    /// Number of lock acquisitions (0 when metrics feature disabled).
    pub lock_acquisitions: u64,
    /// Cumulative lock wait time in nanoseconds (0 when lock-timing disabled).
    pub lock_wait_nanos: u64,
}

impl ShardOps {
    /// Accesses plus erases.
    pub fn total(&self) -> u64 {
        self.accesses + self.erases
    }
}

/// Thread-safe statistics tracker for a single shard.
#[cfg(feature = "metrics")]
pub(crate) struct ShardStats {
    accesses: AtomicU64,
    inserts: AtomicU64,
    erases: AtomicU64,
    lock_acquisitions: AtomicU64,
    #[cfg(feature = "lock-timing")]
    lock_wait_nanos: AtomicU64,
}

#[cfg(feature = "metrics")]
impl ShardStats {
    pub fn new() -> Self {
        Self {
            accesses: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            erases: AtomicU64::new(0),
            lock_acquisitions: AtomicU64::new(0),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_access(&self, inserted: bool) {
        self.accesses.fetch_add(1, Ordering::Relaxed);
        if inserted {
            self.inserts.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_erase(&self) {
        self.erases.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lock_acquisition(&self) {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(feature = "lock-timing")]
    #[inline]
    pub fn record_lock_wait(&self, nanos: u64) {
        self.lock_wait_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ShardOps {
        ShardOps {
            accesses: self.accesses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            erases: self.erases.load(Ordering::Relaxed),
            lock_acquisitions: self.lock_acquisitions.load(Ordering::Relaxed),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: self.lock_wait_nanos.load(Ordering::Relaxed),
            #[cfg(not(feature = "lock-timing"))]
            lock_wait_nanos: 0,
        }
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
pub(crate) struct ShardStats;

#[cfg(not(feature = "metrics"))]
impl ShardStats {
    pub fn new() -> Self {
        ShardStats
    }

    #[inline]
    pub fn record_access(&self, _inserted: bool) {}

    #[inline]
    pub fn record_erase(&self) {}

    #[inline]
    pub fn record_lock_acquisition(&self) {}

    pub fn snapshot(&self) -> ShardOps {
        ShardOps::default()
    }
}

/// Aggregate statistics for a ShardedMap instance.
///
/// Sizes are collected one shard at a time, so under concurrent writes they
/// need not add up to any single moment's total.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all shards.
    pub size: usize,
    /// Number of entries in each shard.
    pub shard_sizes: Vec<usize>,
    /// Operation counts for each shard.
    pub operations: Vec<ShardOps>,
}

/// Per-shard diagnostics snapshot.
#[derive(Debug, Clone)]
pub struct ShardDiagnostics {
    /// Number of entries in this shard.
    pub entries: usize,
    /// Scoped accesses (0 when metrics disabled).
    pub accesses: u64,
    /// Inserting accesses (0 when metrics disabled).
    pub inserts: u64,
    /// Effective erases (0 when metrics disabled).
    pub erases: u64,
    /// Lock acquisitions (0 when metrics disabled).
    pub lock_acquisitions: u64,
    /// Cumulative lock wait time in nanoseconds (0 when lock-timing disabled).
    pub lock_wait_nanos: u64,
}

/// Structured snapshot for performance introspection.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// Total number of entries across all shards.
    pub total_entries: usize,
    /// Per-shard diagnostics.
    pub shards: Vec<ShardDiagnostics>,
    /// Total access + erase operations (0 when metrics disabled).
    pub total_operations: u64,
    /// Average load (entries) per shard.
    pub avg_load_per_shard: f64,
    /// Max load / avg load ratio. User interprets (e.g. threshold 2.0 for imbalance).
    pub max_load_ratio: f64,
}

impl From<Stats> for Diagnostics {
    fn from(stats: Stats) -> Self {
        let shard_count = stats.shard_sizes.len().max(1);
        let avg_load_per_shard = stats.size as f64 / shard_count as f64;
        let max_load = stats.shard_sizes.iter().copied().max().unwrap_or(0);
        let max_load_ratio = if avg_load_per_shard > 0.0 {
            max_load as f64 / avg_load_per_shard
        } else {
            0.0
        };

        let shards: Vec<ShardDiagnostics> = stats
            .shard_sizes
            .iter()
            .zip(stats.operations.iter())
            .map(|(&entries, ops)| ShardDiagnostics {
                entries,
                accesses: ops.accesses,
                inserts: ops.inserts,
                erases: ops.erases,
                lock_acquisitions: ops.lock_acquisitions,
                lock_wait_nanos: ops.lock_wait_nanos,
            })
            .collect();

        Diagnostics {
            total_entries: stats.size,
            total_operations: stats.operations.iter().map(ShardOps::total).sum(),
            shards,
            avg_load_per_shard,
            max_load_ratio,
        }
    }
}
