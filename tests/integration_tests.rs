use shardedmap::{Error, ShardedMap, ShardedMapBuilder};
use std::collections::BTreeMap;

#[test]
fn test_access_inserts_default() {
    let map = ShardedMap::<&str, i32>::new(4).unwrap();

    assert!(map.is_empty());
    assert_eq!(*map.access("x"), 0);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"x"), Some(0));
}

#[test]
fn test_mutation_visible_after_handle_dropped() {
    let map = ShardedMap::<&str, Vec<i32>>::new(4).unwrap();

    {
        let mut slot = map.access("x");
        slot.push(1);
        slot.push(2);
    }

    assert_eq!(*map.access("x"), vec![1, 2]);
}

#[test]
fn test_erase_absent_is_noop() {
    let map = ShardedMap::<&str, i32>::new(4).unwrap();
    *map.access("kept") = 5;

    map.erase(&"missing");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"kept"), Some(5));
}

#[test]
fn test_erase_then_access_reinserts_default() {
    let map = ShardedMap::<&str, i32>::new(4).unwrap();
    *map.access("k") = 9;

    map.erase(&"k");
    assert!(!map.contains_key(&"k"));

    assert_eq!(*map.access("k"), 0);
}

#[test]
fn test_four_shard_scenario() {
    let map = ShardedMap::<&str, i32>::new(4).unwrap();

    *map.access("a") = 1;
    *map.access("b") = 2;
    map.erase(&"a");

    let expected: BTreeMap<&str, i32> = [("b", 2)].into_iter().collect();
    assert_eq!(map.snapshot(), expected);
}

#[test]
fn test_single_shard_integral_scenario() {
    let map = ShardedMap::<i32, i32>::new(1).unwrap();

    for key in 0..100 {
        *map.access(key) = key * 2;
    }

    let snapshot = map.snapshot();
    assert_eq!(snapshot.len(), 100);
    for (key, value) in &snapshot {
        assert_eq!(*value, key * 2);
    }
}

#[test]
fn test_snapshot_is_ordered_union_of_shards() {
    let map = ShardedMap::<String, usize>::new(7).unwrap();

    for i in 0..200 {
        *map.access(format!("key_{:03}", i)) = i;
    }

    let snapshot = map.snapshot();
    assert_eq!(snapshot.len(), map.len());
    assert_eq!(snapshot.len(), map.shard_loads().iter().sum::<usize>());

    let keys: Vec<&String> = snapshot.keys().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    for (i, (key, value)) in snapshot.iter().enumerate() {
        assert_eq!(key, &format!("key_{:03}", i));
        assert_eq!(*value, i);
    }
}

#[test]
fn test_snapshot_is_detached_copy() {
    let map = ShardedMap::<u32, u32>::new(2).unwrap();
    *map.access(1) = 10;

    let mut snapshot = map.snapshot();
    snapshot.insert(2, 20);
    *map.access(1) = 11;

    assert_eq!(snapshot[&1], 10);
    assert!(!map.contains_key(&2));
}

#[test]
fn test_get_does_not_insert() {
    let map = ShardedMap::<&str, i32>::new(2).unwrap();

    assert!(map.get(&"ghost").is_none());
    assert!(!map.contains_key(&"ghost"));
    assert!(map.is_empty());
}

#[test]
fn test_update_returns_closure_result() {
    let map = ShardedMap::<&str, u64>::new(3).unwrap();

    let values: Vec<u64> = (0..5)
        .map(|_| {
            map.update("seq", |v| {
                *v += 1;
                *v
            })
        })
        .collect();

    assert_eq!(values, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_tuple_keys() {
    let map = ShardedMap::<(&str, u32), String>::new(4).unwrap();

    map.access(("tenant", 1)).push_str("one");
    map.access(("tenant", 2)).push_str("two");

    let snapshot = map.snapshot();
    let keys: Vec<_> = snapshot.keys().copied().collect();
    assert_eq!(keys, vec![("tenant", 1), ("tenant", 2)]);
}

#[test]
fn test_invalid_shard_count() {
    assert_eq!(
        ShardedMap::<String, i32>::new(0).unwrap_err(),
        Error::InvalidShardCount
    );

    let result = ShardedMapBuilder::new().shard_count(0);
    assert!(matches!(result, Err(Error::InvalidShardCount)));
}

#[test]
fn test_error_message() {
    assert_eq!(
        Error::InvalidShardCount.to_string(),
        "shard count must be greater than 0"
    );
}

#[test]
fn test_diagnostics_balance() {
    let map = ShardedMap::<u64, u64>::new(4).unwrap();
    for key in 0..40 {
        *map.access(key) = key;
    }

    // Integral keys spread evenly under modulo routing.
    let diag = map.diagnostics();
    assert_eq!(diag.total_entries, 40);
    assert_eq!(diag.shards.len(), 4);
    assert!(diag.shards.iter().all(|s| s.entries == 10));
    assert!((diag.avg_load_per_shard - 10.0).abs() < f64::EPSILON);
    assert!((diag.max_load_ratio - 1.0).abs() < f64::EPSILON);
}

#[cfg(feature = "metrics")]
#[test]
fn test_operation_counters() {
    let map = ShardedMap::<u32, u32>::new(1).unwrap();

    *map.access(1) = 1;
    *map.access(1) = 2;
    map.erase(&1);
    map.erase(&1);

    let ops = &map.stats().operations[0];
    assert_eq!(ops.accesses, 2);
    assert_eq!(ops.inserts, 1);
    assert_eq!(ops.erases, 1);
    // Two accesses, two erases, plus the lock stats() takes to read the size.
    assert_eq!(ops.lock_acquisitions, 5);
}
