use std::hash::{Hash, Hasher};

/// Hash function implementation for shard assignment.
/// Uses an enum to avoid trait object limitations with generics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardHasher {
    /// AHash implementation (default, fast and well-distributed).
    AHash,
    /// FxHash implementation (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl ShardHasher {
    /// Hash a key to a 64-bit value. Deterministic for the lifetime of the process.
    pub fn hash_key<K: Hash + ?Sized>(&self, key: &K) -> u64 {
        match self {
            ShardHasher::AHash => {
                let mut hasher = ahash::AHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => {
                let mut hasher = fxhash::FxHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for ShardHasher {
    fn default() -> Self {
        ShardHasher::AHash
    }
}

/// A key that can be routed to a shard.
///
/// Integral keys route by identity: the key is cast to `u64` and the hasher is
/// ignored. Every other key type asks the map's [`ShardHasher`] for a 64-bit
/// hash. Collisions only affect load balance, never correctness, because each
/// shard's ordered map still tells keys apart by `Ord`.
///
/// The returned value must be a pure function of the key, otherwise the same
/// key could land in two shards.
///
/// # Example
///
/// ```rust
/// use shardedmap::{ShardHasher, ShardKey};
///
/// #[derive(Hash, PartialEq, Eq, PartialOrd, Ord)]
/// struct UserId(String);
///
/// impl ShardKey for UserId {
///     fn shard_hash(&self, hasher: &ShardHasher) -> u64 {
///         hasher.hash_key(self)
///     }
/// }
/// ```
pub trait ShardKey: Ord {
    /// The 64-bit value reduced modulo the shard count to pick a shard.
    fn shard_hash(&self, hasher: &ShardHasher) -> u64;
}

macro_rules! identity_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_hash(&self, _hasher: &ShardHasher) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

macro_rules! hashed_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_hash(&self, hasher: &ShardHasher) -> u64 {
                    hasher.hash_key(self)
                }
            }
        )*
    };
}

identity_shard_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
hashed_shard_key!(String, str, char, bool, Vec<u8>, [u8]);

impl<T: ShardKey + ?Sized> ShardKey for &T {
    #[inline]
    fn shard_hash(&self, hasher: &ShardHasher) -> u64 {
        (**self).shard_hash(hasher)
    }
}

impl<T: ShardKey + ?Sized> ShardKey for Box<T> {
    #[inline]
    fn shard_hash(&self, hasher: &ShardHasher) -> u64 {
        (**self).shard_hash(hasher)
    }
}

impl<A, B> ShardKey for (A, B)
where
    A: Hash + Ord,
    B: Hash + Ord,
{
    fn shard_hash(&self, hasher: &ShardHasher) -> u64 {
        hasher.hash_key(self)
    }
}

impl<A, B, C> ShardKey for (A, B, C)
where
    A: Hash + Ord,
    B: Hash + Ord,
    C: Hash + Ord,
{
    fn shard_hash(&self, hasher: &ShardHasher) -> u64 {
        hasher.hash_key(self)
    }
}
