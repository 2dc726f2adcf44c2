// HashTable and HashSet integration suite.
//
// Each test documents the observable behavior being pinned down. The core
// invariants exercised:
// - Placement: bucket index is |djb2(key)| mod bucket count.
// - Shadowing: a repeated set hides older nodes; count is per distinct key.
// - Growth: the set after the load factor passes 0.75 doubles the buckets
//   and keeps every visible value.
// - Removal: bucket-granular by default, entry-granular when configured.
use chained_collections::{djb2, BucketHash, HashSet, HashTable, RemovalMode, TableConfig};
use std::collections::BTreeSet;

fn entry_table<V>() -> HashTable<V> {
    HashTable::with_config(TableConfig {
        removal: RemovalMode::Entry,
        ..TableConfig::default()
    })
}

// Test: a fresh table with the default size.
// Verifies: 13 buckets, empty, lookups miss.
#[test]
fn fresh_table_is_empty() {
    let t: HashTable<u8> = HashTable::new();
    assert_eq!(t.bucket_count(), 13);
    assert!(t.is_empty());
    assert_eq!(t.get("anything"), None);
    assert!(t.keys().is_empty());
    assert!(t.values().is_empty());
}

// Test: djb2 placement matches precomputed bucket indices.
#[test]
fn placement_follows_djb2() {
    let t: HashTable<u8> = HashTable::new();
    assert_eq!(djb2("insert"), 806_038_796);
    for (key, index) in [("a", 10), ("t", 10), ("n", 4), ("insert", 4), ("update", 1), ("delete", 9)] {
        assert_eq!(t.bucket_index(key), index, "key {key}");
    }
}

// Test: the collision quirk of bucket removal.
// Assumes: "a" and "t" share bucket 10 at 13 buckets.
// Verifies: removing "a" makes "t" unreachable, while keys() still lists it
// and the count drops only once.
#[test]
fn removing_a_drops_its_bucket_mate() {
    let mut t = HashTable::new();
    t.set("a", "first");
    t.set("t", "second");
    t.set("hello", "third");
    assert_eq!(t.len(), 3);

    assert_eq!(t.remove("a"), Some("first"));
    assert_eq!(t.get("t"), None);
    assert!(!t.contains_key("t"));
    assert_eq!(t.get("hello"), Some(&"third"));
    assert_eq!(t.len(), 2);
    // values() is built from reachable entries only.
    assert_eq!(t.values(), vec![&"third"]);
    let keys: BTreeSet<&str> = t.keys().into_iter().collect();
    assert_eq!(keys, ["hello", "t"].into_iter().collect());

    // Setting the lost key again makes it reachable and counts it.
    t.set("t", "back");
    assert_eq!(t.get("t"), Some(&"back"));
    assert_eq!(t.len(), 3);
}

// Test: entry-granular removal on the same collision.
#[test]
fn entry_mode_keeps_bucket_mates() {
    let mut t = entry_table();
    t.set("a", 1);
    t.set("t", 2);
    assert_eq!(t.remove("a"), Some(1));
    assert_eq!(t.get("t"), Some(&2));
    assert_eq!(t.len(), 1);
    assert_eq!(t.keys(), vec!["t"]);
}

// Test: growth across several doublings.
// Verifies: bucket count doubles each time, every key stays retrievable
// and the count stays exact.
#[test]
fn growth_preserves_entries() {
    let mut t = HashTable::new();
    for i in 0..200u32 {
        t.set(format!("item-{i}"), i);
    }
    assert_eq!(t.len(), 200);
    // 13 -> 26 -> 52 -> 104 -> 208 -> 416
    assert_eq!(t.bucket_count(), 416);
    for i in 0..200u32 {
        assert_eq!(t.get(&format!("item-{i}")), Some(&i));
    }
    assert!(t.load_factor() <= 1.0);
}

// Test: shadowed values never resurface after growth.
#[test]
fn shadowed_values_stay_hidden_after_growth() {
    let mut t = HashTable::with_size(1);
    t.set("dup", 1);
    t.set("dup", 2);
    for i in 0..20 {
        t.set(format!("fill{i}"), 0);
    }
    assert!(t.bucket_count() > 1);
    assert_eq!(t.get("dup"), Some(&2));
    assert_eq!(t.len(), 21);
    let dups = t.entries().into_iter().filter(|(k, _)| *k == "dup").count();
    assert_eq!(dups, 1);
}

// Test: a zero initial size is usable.
#[test]
fn zero_size_is_clamped() {
    let mut t = HashTable::with_size(0);
    assert_eq!(t.bucket_count(), 1);
    t.set("x", 1);
    t.set("y", 2);
    assert_eq!(t.get("x"), Some(&1));
    assert_eq!(t.get("y"), Some(&2));
}

// Test: clones are independent of the source.
#[test]
fn clone_is_deep() {
    let mut t: HashTable<Vec<u32>> = HashTable::new();
    t.set("list", vec![1, 2]);
    let copy = t.clone();
    t.get_mut("list").unwrap().push(3);
    assert_eq!(copy.get("list"), Some(&vec![1, 2]));
    assert_eq!(t.get("list"), Some(&vec![1, 2, 3]));
}

// Test: a custom BucketHash changes placement and nothing else.
#[test]
fn custom_hasher() {
    #[derive(Clone)]
    struct ByLength;
    impl BucketHash for ByLength {
        fn hash(&self, key: &str) -> u64 {
            key.len() as u64
        }
    }
    let mut t = HashTable::with_config_and_hasher(
        TableConfig {
            initial_size: 4,
            removal: RemovalMode::Entry,
        },
        ByLength,
    );
    t.extend([("ab", 1), ("cd", 2), ("xyz", 3)]);
    assert_eq!(t.bucket_index("ab"), t.bucket_index("cd"));
    assert_eq!(t.remove("ab"), Some(1));
    assert_eq!(t.get("cd"), Some(&2));
    assert_eq!(t.get("xyz"), Some(&3));
}

// Test: HashSet membership, idempotence and intersections.
#[test]
fn hash_set_behaves_as_a_set() {
    let mut s = HashSet::new();
    for v in ["apple", "banana", "apple", "", "cherry"] {
        s.add(v);
    }
    assert_eq!(s.len(), 3);
    assert!(s.has("banana"));
    assert!(!s.has(""));
    assert!(s.delete("banana"));
    assert!(!s.has("banana"));
    assert_eq!(s.len(), 2);

    let other: HashSet = ["cherry", "durian"].into_iter().collect();
    assert_eq!(s.intersection_count(&other), 1);
}
