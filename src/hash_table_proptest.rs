#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can reach the
// private key registry through the public table API without feature gates.

use crate::hash_table::{HashTable, RemovalMode, TableConfig};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Resize(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            1 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => "[a-z]{0,5}".prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (1usize..64).prop_map(OpI::Resize),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn table(removal: RemovalMode, initial_size: usize) -> HashTable<i32> {
    HashTable::with_config(TableConfig {
        initial_size,
        removal,
    })
}

fn visible(sut: &HashTable<i32>) -> BTreeMap<String, i32> {
    sut.iter().map(|(k, v)| (k.to_owned(), *v)).collect()
}

// Property: with node-granular removal the table is a map.
// - `get`/`contains_key` parity with std HashMap after any sequence.
// - `remove` returns the newest value and forgets only that key.
// - `len`, `keys()` and iteration agree exactly with the model.
// - Resizes, explicit or triggered by load, never lose or resurrect values.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_entry_mode_matches_map((pool, ops) in arb_scenario(), size in 1usize..20) {
        let mut sut = table(RemovalMode::Entry, size);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    sut.set(pool[i].clone(), v);
                    model.insert(pool[i].clone(), v);
                }
                OpI::Remove(i) => {
                    let got = sut.remove(&pool[i]);
                    prop_assert_eq!(got, model.remove(&pool[i]));
                }
                OpI::Get(i) => {
                    prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let sv = sut.get_mut(&pool[i]).map(|v| { *v = v.wrapping_add(d); *v });
                    let mv = model.get_mut(&pool[i]).map(|v| { *v = v.wrapping_add(d); *v });
                    prop_assert_eq!(sv, mv);
                }
                OpI::Resize(n) => {
                    sut.resize(n);
                    prop_assert_eq!(sut.bucket_count(), n);
                }
                OpI::Iterate => {
                    let expected: BTreeMap<String, i32> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(visible(&sut), expected);
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let keys: BTreeSet<&str> = sut.keys().into_iter().collect();
            let model_keys: BTreeSet<&str> = model.keys().map(String::as_str).collect();
            prop_assert_eq!(keys, model_keys);
        }
    }
}

// Property: bucket-granular removal behaves like a map whose `remove` also
// forgets every key sharing the removed key's bucket.
// - Lookups and iteration match that model after any sequence.
// - The count never drops below the number of reachable entries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_bucket_mode_drops_bucket_mates((pool, ops) in arb_scenario(), size in 1usize..20) {
        let mut sut = table(RemovalMode::Bucket, size);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    sut.set(pool[i].clone(), v);
                    model.insert(pool[i].clone(), v);
                }
                OpI::Remove(i) => {
                    let index = sut.bucket_index(&pool[i]);
                    let got = sut.remove(&pool[i]);
                    prop_assert_eq!(got, model.get(&pool[i]).copied());
                    model.retain(|k, _| sut.bucket_index(k) != index);
                }
                OpI::Get(i) => {
                    prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let sv = sut.get_mut(&pool[i]).map(|v| { *v = v.wrapping_add(d); *v });
                    let mv = model.get_mut(&pool[i]).map(|v| { *v = v.wrapping_add(d); *v });
                    prop_assert_eq!(sv, mv);
                }
                OpI::Resize(n) => {
                    sut.resize(n);
                }
                OpI::Iterate => {
                    let expected: BTreeMap<String, i32> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(visible(&sut), expected);
                }
            }
            prop_assert!(sut.len() >= sut.iter().count());
            // Registry keys are a superset of what is reachable.
            let keys: BTreeSet<&str> = sut.keys().into_iter().collect();
            for k in model.keys() {
                prop_assert!(keys.contains(k.as_str()));
            }
        }
    }
}
