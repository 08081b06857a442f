use parking_lot::MappedMutexGuard;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Exclusive access to one value slot of a [`ShardedMap`](crate::ShardedMap).
///
/// Returned by [`ShardedMap::access`](crate::ShardedMap::access). The handle
/// owns its shard's lock: every other operation routed to the same shard
/// blocks until the handle is dropped. Keys in other shards are unaffected.
///
/// The handle borrows the map, so it cannot outlive it. Holding it while
/// calling another operation on a key in the same shard deadlocks, since the
/// shard lock is not reentrant.
///
/// # Example
///
/// ```rust
/// use shardedmap::ShardedMap;
///
/// let map = ShardedMap::<&str, Vec<u32>>::new(4)?;
/// {
///     let mut slot = map.access("evens");
///     slot.push(2);
///     slot.push(4);
/// } // lock released here
/// assert_eq!(*map.access("evens"), vec![2, 4]);
/// # Ok::<(), shardedmap::Error>(())
/// ```
#[must_use = "the shard stays locked until the handle is dropped"]
pub struct ScopedAccess<'a, V> {
    slot: MappedMutexGuard<'a, V>,
}

impl<'a, V> ScopedAccess<'a, V> {
    pub(crate) fn new(slot: MappedMutexGuard<'a, V>) -> Self {
        Self { slot }
    }

    /// Overwrite the value, returning the previous one.
    pub fn replace(&mut self, value: V) -> V {
        std::mem::replace(&mut *self.slot, value)
    }
}

impl<V> Deref for ScopedAccess<'_, V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &V {
        &self.slot
    }
}

impl<V> DerefMut for ScopedAccess<'_, V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.slot
    }
}

impl<V: fmt::Debug> fmt::Debug for ScopedAccess<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedAccess").field(&*self.slot).finish()
    }
}
