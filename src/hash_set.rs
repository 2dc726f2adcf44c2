//! HashSet: string presence set backed by a [`HashTable`].

use crate::hash_table::{BucketHash, Djb2, HashTable, RemovalMode, TableConfig};
use core::fmt;

/// Set of non-empty strings.
///
/// The backing table removes node by node, so `len` always equals the
/// number of members reachable through `has`.
pub struct HashSet<H = Djb2> {
    data: HashTable<bool, H>,
    count: usize,
}

impl HashSet {
    pub fn new() -> Self {
        Self::with_hasher(Djb2)
    }
}

impl Default for HashSet {
    fn default() -> Self {
        Self::new()
    }
}

fn set_config() -> TableConfig {
    TableConfig {
        removal: RemovalMode::Entry,
        ..TableConfig::default()
    }
}

impl<H> HashSet<H>
where
    H: BucketHash,
{
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            data: HashTable::with_config_and_hasher(set_config(), hasher),
            count: 0,
        }
    }

    /// Add `value`; empty strings and existing members are ignored.
    /// Returns whether the set changed.
    pub fn add(&mut self, value: &str) -> bool {
        if value.is_empty() || self.has(value) {
            return false;
        }
        self.data.set(value, true);
        self.count += 1;
        true
    }

    /// Remove `value`; returns whether it was a member.
    pub fn delete(&mut self, value: &str) -> bool {
        if value.is_empty() || !self.has(value) {
            return false;
        }
        self.data.remove(value);
        self.count -= 1;
        true
    }

    pub fn has(&self, value: &str) -> bool {
        matches!(self.data.get(value), Some(true))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Snapshot of the members, in no particular order.
    pub fn keys(&self) -> Vec<&str> {
        self.data.keys()
    }

    pub fn clear(&mut self)
    where
        H: Clone,
    {
        let hasher = self.data.hasher().clone();
        self.data = HashTable::with_config_and_hasher(set_config(), hasher);
        self.count = 0;
    }

    /// Members present in both `self` and `other`.
    pub fn intersection_count<H2: BucketHash>(&self, other: &HashSet<H2>) -> usize {
        self.keys().into_iter().filter(|k| other.has(k)).count()
    }
}

/// Whether every item renders to a distinct, non-empty string.
pub fn is_unique<I, T>(items: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    let mut seen = HashSet::new();
    let mut total = 0;
    for item in items {
        seen.add(&item.to_string());
        total += 1;
    }
    seen.len() == total
}

impl<H: BucketHash> fmt::Debug for HashSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<S: AsRef<str>, H: BucketHash> Extend<S> for HashSet<H> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.add(value.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for HashSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}
