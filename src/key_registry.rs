//! KeyRegistry: deduplicated set of table keys.
//!
//! Keys live in generational `SlotMap` storage; a `hashbrown::HashTable`
//! indexes them by a precomputed hash so that re-registering an existing
//! key never allocates.

use core::hash::BuildHasher;
use hashbrown::hash_table::Entry as IndexEntry;
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    hash: u64,
}

pub(crate) struct KeyRegistry<S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Entry>,
}

impl KeyRegistry {
    pub(crate) fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over registered keys.
pub(crate) struct Iter<'a> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| e.key.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<S> KeyRegistry<S>
where
    S: BuildHasher,
{
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
        }
    }

    fn make_hash(&self, key: &str) -> u64 {
        self.hasher.hash_one(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        let hash = self.make_hash(key);
        self.index
            .find(hash, |&k| {
                self.slots
                    .get(k)
                    .map(|e| e.key == key)
                    .unwrap_or(false)
            })
            .is_some()
    }

    /// Register `key`; returns `false` when it was already present.
    pub(crate) fn insert(&mut self, key: &str) -> bool {
        let hash = self.make_hash(key);
        match self.index.entry(
            hash,
            |&kk| self.slots.get(kk).map(|e| e.key == key).unwrap_or(false),
            |&kk| self.slots.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            IndexEntry::Occupied(_) => false,
            IndexEntry::Vacant(v) => {
                let k = self.slots.insert(Entry {
                    key: key.to_owned(),
                    hash,
                });
                let _ = v.insert(k);
                true
            }
        }
    }

    /// Forget `key`; returns `false` when it was not registered.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let hash = self.make_hash(key);
        let found = self.index.find_entry(hash, |&kk| {
            self.slots
                .get(kk)
                .map(|e| e.key == key)
                .unwrap_or(false)
        });
        match found {
            Ok(occupied) => {
                let (k, _) = occupied.remove();
                self.slots.remove(k);
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
        }
    }
}
