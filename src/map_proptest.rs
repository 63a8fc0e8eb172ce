#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can read
// the bucket layout directly.

use crate::config::TableConfig;
use crate::hashing::rolling_hash;
use crate::map::{ChainedHashMap, Insertion};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Has(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (
        1usize..=8,
        proptest::collection::vec("[a-z]{0,5}", 1..=12),
    )
        .prop_flat_map(|(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
                2 => idx.clone().prop_map(Op::Remove),
                2 => idx.clone().prop_map(Op::Get),
                1 => "[a-z]{0,5}".prop_map(Op::Has),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
                1 => Just(Op::Clear),
                1 => Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (capacity, pool.clone(), ops))
        })
}

// Property: state-machine equivalence against std::collections::HashMap.
// - set reports Inserted/Updated exactly as the model's insert does.
// - len/is_empty parity after every op; capacity never shrinks.
// - every chained key sits in bucket rolling_hash(key, capacity).
// - keys() yields each live key exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let config = TableConfig::default().with_initial_capacity(capacity);
        let mut sut: ChainedHashMap<i32> = ChainedHashMap::with_config(config).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut last_capacity = sut.capacity();

        for op in ops {
            match op {
                Op::Set(i, v) => {
                    let key = &pool[i];
                    let expected = match model.insert(key.clone(), v) {
                        None => Insertion::Inserted,
                        Some(_) => Insertion::Updated,
                    };
                    prop_assert_eq!(sut.set(key.as_str(), v).unwrap(), expected);
                }
                Op::Remove(i) => {
                    let key = &pool[i];
                    prop_assert_eq!(sut.remove(key).unwrap(), model.remove(key).is_some());
                    prop_assert!(!sut.has(key));
                }
                Op::Get(i) => {
                    let key = &pool[i];
                    prop_assert_eq!(sut.get(key), model.get(key));
                }
                Op::Has(key) => {
                    prop_assert_eq!(sut.has(&key), model.contains_key(&key));
                }
                Op::Mutate(i, d) => {
                    let key = &pool[i];
                    if let Some(v) = sut.get_mut(key) {
                        *v = v.wrapping_add(d);
                    }
                    if let Some(v) = model.get_mut(key) {
                        *v = v.wrapping_add(d);
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::Iterate => {
                    let keys: Vec<&str> = sut.keys();
                    let unique: BTreeSet<&str> = keys.iter().copied().collect();
                    prop_assert_eq!(keys.len(), unique.len());
                    let expected: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                    prop_assert_eq!(unique, expected);
                    for (k, v) in sut.entries() {
                        prop_assert_eq!(Some(v), model.get(k));
                    }
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert!(sut.capacity() >= last_capacity);
            last_capacity = sut.capacity();

            let snap = sut.snapshot();
            prop_assert_eq!(snap.buckets.len(), sut.capacity());
            for bucket in &snap.buckets {
                for key in &bucket.chain {
                    prop_assert_eq!(rolling_hash(key, sut.capacity()), bucket.index);
                }
            }
        }
    }
}

// Property: growth relinks nodes in encounter order. Within every new
// bucket the old keys keep their pre-growth iteration order, and the key
// whose insertion triggered growth sits at the tail of its chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_encounter_order(keys in proptest::collection::btree_set("[a-z]{1,6}", 1..40)) {
        let config = TableConfig::default().with_initial_capacity(1).with_load_factor(1.0);
        let mut sut: ChainedHashMap<()> = ChainedHashMap::with_config(config).unwrap();

        for key in &keys {
            let before_capacity = sut.capacity();
            let before: Vec<String> = sut.keys().into_iter().map(str::to_owned).collect();
            sut.set(key.as_str(), ()).unwrap();
            if sut.capacity() == before_capacity {
                continue;
            }
            prop_assert_eq!(sut.capacity(), before_capacity * 2);

            let rank = |k: &str| before.iter().position(|b| b == k);
            for bucket in &sut.snapshot().buckets {
                let ranks: Vec<usize> = bucket.chain.iter().filter_map(|k| rank(k)).collect();
                prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));
                if bucket.chain.contains(key) {
                    prop_assert_eq!(bucket.chain.last(), Some(key));
                }
            }
        }

        for key in &keys {
            prop_assert!(sut.has(key));
        }
        prop_assert_eq!(sut.len(), keys.len());
    }
}
