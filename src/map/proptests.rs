//! Property-based tests for maps using proptest

use super::ConcurrentMap;
use crate::Error;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, i32),
    Remove(u8),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Add(k, v)),
        1 => any::<u8>().prop_map(Op::Remove),
        1 => Just(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn test_last_write_wins(entries in prop::collection::vec((0u8..16, any::<i32>()), 0..100)) {
        let map = ConcurrentMap::new();
        let mut model = HashMap::new();

        for &(key, value) in &entries {
            map.add(key, value);
            model.insert(key, value);
            prop_assert_eq!(map.get(&key), Some(value));
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert_eq!(map.all(), model);
    }

    #[test]
    fn test_matches_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let map = ConcurrentMap::new();
        let mut model = HashMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    map.add(key, value);
                    model.insert(key, value);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                Op::Pop => match map.pop() {
                    Ok((key, value)) => prop_assert_eq!(model.remove(&key), Some(value)),
                    Err(Error::Empty) => prop_assert!(model.is_empty()),
                },
            }
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert_eq!(map.all(), model);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_writes(
        before in prop::collection::hash_map(any::<u16>(), any::<u16>(), 0..32),
        after in prop::collection::vec((any::<u16>(), any::<u16>()), 1..32)
    ) {
        let map: ConcurrentMap<u16, u16> = before.clone().into();
        let snapshot = map.all();

        for (key, value) in after {
            map.add(key, value);
        }
        map.pop_batch(4);

        prop_assert_eq!(snapshot, before);
    }
}
