#![cfg(test)]

// Property tests for ChainedHashSet against a std model.

use crate::config::TableConfig;
use crate::hashing::rolling_hash;
use crate::set::ChainedHashSet;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
    Contains(String),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (usize, f64, Vec<String>, Vec<Op>)> {
    (
        1usize..=8,
        prop_oneof![Just(0.5), Just(0.75), Just(1.0)],
        proptest::collection::vec("[a-c]{0,4}", 1..=16),
    )
        .prop_flat_map(|(capacity, load_factor, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                5 => idx.clone().prop_map(Op::Add),
                2 => idx.clone().prop_map(Op::Remove),
                2 => "[a-c]{0,4}".prop_map(Op::Contains),
                1 => Just(Op::Clear),
            ];
            proptest::collection::vec(op, 1..100)
                .prop_map(move |ops| (capacity, load_factor, pool.clone(), ops))
        })
}

// Property: state-machine equivalence against std::collections::HashSet.
// - add/remove results match the model's insert/remove.
// - len counts values (model len), never occupied buckets.
// - growth happens only when len exceeded capacity * load_factor, and by doubling.
// - every stored value sits in bucket rolling_hash(value, capacity).
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, load_factor, pool, ops) in arb_scenario()) {
        let config = TableConfig::default()
            .with_initial_capacity(capacity)
            .with_load_factor(load_factor);
        let mut sut = ChainedHashSet::with_config(config).unwrap();
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            let before_len = sut.len();
            let before_capacity = sut.capacity();
            match op {
                Op::Add(i) => {
                    let value = &pool[i];
                    prop_assert_eq!(sut.add(value.as_str()).unwrap(), model.insert(value.clone()));
                    if sut.capacity() != before_capacity {
                        prop_assert_eq!(sut.capacity(), before_capacity * 2);
                        prop_assert!(before_len as f64 > before_capacity as f64 * load_factor);
                    }
                }
                Op::Remove(i) => {
                    let value = &pool[i];
                    prop_assert_eq!(sut.remove(value).unwrap(), model.remove(value));
                }
                Op::Contains(value) => {
                    prop_assert_eq!(sut.contains(&value), model.contains(&value));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), before_capacity);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            let stored: BTreeSet<&str> = sut.iter().collect();
            let expected: BTreeSet<&str> = model.iter().map(String::as_str).collect();
            prop_assert_eq!(stored, expected);
            for bucket in &sut.snapshot().buckets {
                for value in &bucket.chain {
                    prop_assert_eq!(rolling_hash(value, sut.capacity()), bucket.index);
                }
            }
        }
    }
}
