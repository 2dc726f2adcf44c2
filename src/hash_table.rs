//! HashTable: separate-chaining map from `String` keys to values.
//!
//! Buckets are singly linked chains; every `set` prepends a node, so a
//! repeated key leaves its older nodes behind, shadowed by the newest one.
//! The table doubles its bucket array once the load factor exceeds
//! [`LOAD_FACTOR`] and never shrinks.
//!
//! Removal is bucket-granular by default: `remove(k)` drops every entry that
//! shares `k`'s bucket. [`RemovalMode::Entry`] restricts removal to `k`.

use crate::key_registry::KeyRegistry;
use core::fmt;

/// Bucket count of a table built with [`HashTable::new`].
pub const DEFAULT_TABLE_SIZE: usize = 13;

/// `len / bucket_count` above which the next `set` doubles the buckets.
pub const LOAD_FACTOR: f64 = 0.75;

/// Maps a key to a hash magnitude; the table reduces it modulo its
/// bucket count.
pub trait BucketHash {
    fn hash(&self, key: &str) -> u64;
}

/// The djb2-family string hash: seed 5381, and for each character
/// `hash += (hash * 33) ^ code`, where the product is truncated to a
/// signed 32-bit integer and `code` is the character's first UTF-16 unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Djb2;

impl BucketHash for Djb2 {
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        djb2(key)
    }
}

/// Magnitude of the djb2 accumulator for `key`.
pub fn djb2(key: &str) -> u64 {
    let mut hash: i64 = 5381;
    let mut units = [0u16; 2];
    for ch in key.chars() {
        let code = i32::from(ch.encode_utf16(&mut units)[0]);
        let mixed = (hash.wrapping_mul(33) as i32) ^ code;
        hash = hash.wrapping_add(i64::from(mixed));
    }
    hash.unsigned_abs()
}

/// What `remove` takes out of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalMode {
    /// Drop the whole bucket the key hashes to and decrement the count once,
    /// however many keys the bucket held.
    #[default]
    Bucket,
    /// Unlink only the nodes carrying the key.
    Entry,
}

/// Construction-time settings for a [`HashTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub initial_size: usize,
    pub removal: RemovalMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_TABLE_SIZE,
            removal: RemovalMode::Bucket,
        }
    }
}

struct Node<V> {
    key: String,
    value: V,
    next: Option<Box<Node<V>>>,
}

/// One chain of nodes, newest first.
struct Bucket<V> {
    head: Option<Box<Node<V>>>,
}

impl<V> Bucket<V> {
    fn new() -> Self {
        Self { head: None }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn prepend(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, value, next }));
    }

    fn nodes(&self) -> Nodes<'_, V> {
        Nodes {
            next: self.head.as_deref(),
        }
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        self.nodes().find(|n| n.key == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if node.key == key {
                return Some(&mut node.value);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    fn is_visible(&self, node: &Node<V>) -> bool {
        self.find(&node.key)
            .map(|first| core::ptr::eq(first, node))
            .unwrap_or(false)
    }

    /// Unlink every node carrying `key`; returns the newest value.
    fn remove_key(&mut self, key: &str) -> Option<V> {
        let mut removed = None;
        let mut kept = Vec::new();
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
            if node.key == key {
                if removed.is_none() {
                    removed = Some(node.value);
                }
            } else {
                kept.push(node);
            }
        }
        for mut node in kept.into_iter().rev() {
            node.next = self.head.take();
            self.head = Some(node);
        }
        removed
    }

    /// Consume the chain, keeping only the newest node per key.
    fn into_visible(mut self) -> Vec<(String, V)> {
        let mut out: Vec<(String, V)> = Vec::new();
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
            let Node { key, value, .. } = *node;
            if !out.iter().any(|(k, _)| *k == key) {
                out.push((key, value));
            }
        }
        out
    }

    fn len(&self) -> usize {
        self.nodes().count()
    }
}

impl<V> Drop for Bucket<V> {
    fn drop(&mut self) {
        // Unlink iteratively; long chains would otherwise recurse.
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

struct Nodes<'a, V> {
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Nodes<'a, V> {
    type Item = &'a Node<V>;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node)
    }
}

pub struct HashTable<V, H = Djb2> {
    hasher: H,
    buckets: Vec<Option<Bucket<V>>>,
    count: usize,
    keys: KeyRegistry,
    removal: RemovalMode,
}

impl<V> HashTable<V> {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_size(initial_size: usize) -> Self {
        Self::with_config(TableConfig {
            initial_size,
            ..TableConfig::default()
        })
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, Djb2)
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy walk over the visible entries of a table, bucket by bucket and
/// newest first within a bucket.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Option<Bucket<V>>>,
    bucket: Option<&'a Bucket<V>>,
    nodes: Nodes<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bucket) = self.bucket {
                for node in self.nodes.by_ref() {
                    if bucket.is_visible(node) {
                        return Some((node.key.as_str(), &node.value));
                    }
                }
            }
            let bucket = self.buckets.find_map(Option::as_ref)?;
            self.bucket = Some(bucket);
            self.nodes = bucket.nodes();
        }
    }
}

impl<V, H> HashTable<V, H>
where
    H: BucketHash,
{
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hasher)
    }

    /// A zero `initial_size` is bumped to one bucket.
    pub fn with_config_and_hasher(config: TableConfig, hasher: H) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(config.initial_size.max(1)),
            count: 0,
            keys: KeyRegistry::new(),
            removal: config.removal,
        }
    }

    /// Live-entry count as tracked by `set`/`remove`.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn removal_mode(&self) -> RemovalMode {
        self.removal
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    /// Bucket `key` lands in at the current bucket count.
    pub fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash(key) % self.buckets.len() as u64) as usize
    }

    /// Insert or shadow `key`. Grows the table first when the load factor
    /// is already above [`LOAD_FACTOR`].
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        if self.load_factor() > LOAD_FACTOR {
            self.resize(self.buckets.len() * 2);
        }
        self.place(key.into(), value);
    }

    fn place(&mut self, key: String, value: V) {
        let index = self.bucket_index(&key);
        let bucket = self.buckets[index].get_or_insert_with(Bucket::new);
        if bucket.find(&key).is_none() {
            self.count += 1;
            self.keys.insert(&key);
        }
        debug_assert!(self.keys.contains(&key));
        bucket.prepend(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let bucket = self.buckets[self.bucket_index(key)].as_ref()?;
        bucket.find(key).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index].as_mut()?.find_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key` according to the table's [`RemovalMode`], returning its
    /// value if it was present.
    ///
    /// In [`RemovalMode::Bucket`] mode any other keys in the same bucket
    /// become unreachable too, while the count drops by one.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        match self.removal {
            RemovalMode::Bucket => {
                let mut bucket = self.buckets[index].take()?;
                log::debug!(
                    "hash table dropped bucket {} holding {} node(s)",
                    index,
                    bucket.len()
                );
                self.count = self.count.saturating_sub(1);
                self.keys.remove(key);
                bucket.remove_key(key)
            }
            RemovalMode::Entry => {
                let slot = &mut self.buckets[index];
                let bucket = slot.as_mut()?;
                let value = bucket.remove_key(key)?;
                if bucket.is_empty() {
                    *slot = None;
                }
                self.count -= 1;
                self.keys.remove(key);
                Some(value)
            }
        }
    }

    /// Rehash every visible entry into `new_size` buckets.
    pub fn resize(&mut self, new_size: usize) {
        let new_size = new_size.max(1);
        log::trace!(
            "hash table resize: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_size,
            self.count
        );
        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_size));
        self.count = 0;
        for bucket in old.into_iter().flatten() {
            for (key, value) in bucket.into_visible() {
                self.place(key, value);
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            bucket: None,
            nodes: Nodes { next: None },
        }
    }

    /// Snapshot of the key registry. Keys made unreachable as bucket-mates
    /// of a removed key stay listed.
    pub fn keys(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.keys.len());
        out.extend(self.keys.iter());
        out
    }

    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Copy every visible entry into a new table with the same settings,
    /// converting values with `f`.
    pub fn map_values<W, F>(&self, mut f: F) -> HashTable<W, H>
    where
        H: Clone,
        F: FnMut(&V) -> W,
    {
        let config = TableConfig {
            initial_size: DEFAULT_TABLE_SIZE,
            removal: self.removal,
        };
        let mut out = HashTable::with_config_and_hasher(config, self.hasher.clone());
        for (key, value) in self.iter() {
            out.set(key, f(value));
        }
        out
    }
}

fn empty_buckets<V>(size: usize) -> Vec<Option<Bucket<V>>> {
    (0..size).map(|_| None).collect()
}

impl<V: Clone, H: BucketHash + Clone> Clone for HashTable<V, H> {
    fn clone(&self) -> Self {
        self.map_values(V::clone)
    }
}

impl<V: fmt::Debug, H: BucketHash> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V, H: BucketHash> Extend<(K, V)> for HashTable<V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for HashTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<'a, V, H: BucketHash> IntoIterator for &'a HashTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
