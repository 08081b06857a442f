//! One simple load test: concurrent accesses and erases, then verify state and introspection.

use shardedmap::ShardedMap;
use std::sync::Arc;
use std::thread;

#[test]
fn test_under_load_then_introspect() {
    let map = Arc::new(ShardedMap::<String, usize>::default());
    let mut handles = vec![];

    for t in 0..4 {
        let map = Arc::clone(&map);
        let handle = thread::spawn(move || {
            for i in 0..2000 {
                let key = format!("t{}_k{}", t, i);
                *map.access(key) = i;
            }
            assert!(map.snapshot().len() >= 2000);
            for i in 0..2000 {
                let key = format!("t{}_k{}", t, i);
                map.erase(&key);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert!(map.snapshot().is_empty());
    let loads = map.shard_loads();
    assert_eq!(loads.iter().sum::<usize>(), 0);
    assert_eq!(map.diagnostics().total_entries, 0);
}
