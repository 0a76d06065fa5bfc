//! Property-based tests for sets using proptest
//!
//! Each property replays a random sequence of operations against the
//! concurrent set and a plain `HashSet` model and checks they agree.

use super::ConcurrentSet;
use crate::Error;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Add),
        1 => any::<u8>().prop_map(Op::Remove),
        1 => Just(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn test_add_then_contains(values in prop::collection::vec(any::<i64>(), 0..100)) {
        let set = ConcurrentSet::new();
        for &value in &values {
            set.add(value);
            prop_assert!(set.contains(&value));
        }

        let distinct: HashSet<i64> = values.iter().copied().collect();
        prop_assert_eq!(set.len(), distinct.len());
        prop_assert_eq!(set.all(), distinct);
    }

    #[test]
    fn test_never_added_is_absent(
        values in prop::collection::hash_set(0u32..1000, 0..50),
        probe in 1000u32..2000
    ) {
        let set: ConcurrentSet<u32> = values.into_iter().collect();
        prop_assert!(!set.contains(&probe));
    }

    #[test]
    fn test_matches_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let set = ConcurrentSet::new();
        let mut model = HashSet::new();

        for op in ops {
            match op {
                Op::Add(value) => {
                    set.add(value);
                    model.insert(value);
                }
                Op::Remove(value) => {
                    prop_assert_eq!(set.remove(&value), model.remove(&value));
                }
                Op::Pop => match set.pop() {
                    Ok(value) => prop_assert!(model.remove(&value)),
                    Err(Error::Empty) => prop_assert!(model.is_empty()),
                },
            }
            prop_assert_eq!(set.len(), model.len());
        }

        prop_assert_eq!(set.all(), model);
    }

    #[test]
    fn test_pop_drains_everything(values in prop::collection::hash_set(any::<u16>(), 0..64)) {
        let set: ConcurrentSet<u16> = values.iter().copied().collect();
        let mut drained = HashSet::new();

        while let Ok(value) = set.pop() {
            prop_assert!(drained.insert(value));
        }

        prop_assert_eq!(drained, values);
        prop_assert_eq!(set.pop(), Err(Error::Empty));
    }

    #[test]
    fn test_pop_batch_bounded(
        values in prop::collection::hash_set(any::<u16>(), 0..64),
        max in 0usize..80
    ) {
        let set: ConcurrentSet<u16> = values.iter().copied().collect();
        let popped = set.pop_batch(max);

        prop_assert_eq!(popped.len(), max.min(values.len()));
        prop_assert_eq!(set.len() + popped.len(), values.len());
        for value in popped {
            prop_assert!(values.contains(&value));
            prop_assert!(!set.contains(&value));
        }
    }
}
