//! LinkedList: singly linked list over a generational node arena.
//!
//! Nodes live in a `SlotMap`; `next` links, `head` and `tail` are arena
//! keys, so every node has exactly one owner (the arena) and a removed
//! node's key stops resolving immediately.

use crate::error::{Bounds, Error, Result};
use core::fmt;
use slotmap::SlotMap;

slotmap::new_key_type! {
    struct NodeKey;
}

struct Node<T> {
    data: T,
    next: Option<NodeKey>,
}

pub struct LinkedList<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn append(&mut self, data: T) {
        let key = self.nodes.insert(Node { data, next: None });
        match self.tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(tail) => tail.next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    pub fn prepend(&mut self, data: T) {
        let key = self.nodes.insert(Node {
            data,
            next: self.head,
        });
        self.head = Some(key);
        if self.tail.is_none() {
            self.tail = Some(key);
        }
    }

    /// Insert so that `data` ends up at `position`; accepts `[0, len]`.
    pub fn insert_at(&mut self, position: usize, data: T) -> Result<()> {
        let len = self.len();
        Bounds::Range.check(position, len)?;
        if position == 0 {
            self.prepend(data);
            return Ok(());
        }
        if position == len {
            self.append(data);
            return Ok(());
        }
        let prev = self
            .key_at(position - 1)
            .ok_or(Error::IndexOutOfBounds { index: position, len })?;
        let next = self.nodes[prev].next;
        let key = self.nodes.insert(Node { data, next });
        self.nodes[prev].next = Some(key);
        Ok(())
    }

    /// Remove the first element equal to `data`.
    ///
    /// Fails on an empty list; `Ok(None)` when nothing matched.
    pub fn remove(&mut self, data: &T) -> Result<Option<T>>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let mut prev = None;
        let mut cur = self.head;
        while let Some(key) = cur {
            let node = &self.nodes[key];
            if node.data == *data {
                return Ok(self.unlink(prev, key));
            }
            prev = Some(key);
            cur = node.next;
        }
        Ok(None)
    }

    /// Remove the element at `index`.
    ///
    /// Reports [`Error::NodeNotFound`] for `index == len`, since the
    /// predecessor exists but has no successor.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if index == 0 {
            return self.pop();
        }
        let len = self.len();
        // The predecessor must exist; a missing successor is NodeNotFound.
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let prev = self
            .key_at(index - 1)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        let key = self.nodes[prev].next.ok_or(Error::NodeNotFound { index })?;
        self.unlink(Some(prev), key)
            .ok_or(Error::NodeNotFound { index })
    }

    pub fn peek(&self) -> Result<&T> {
        self.head
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.data)
            .ok_or(Error::Empty)
    }

    /// Last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.data)
    }

    /// Remove and return the head element.
    pub fn pop(&mut self) -> Result<T> {
        let head = self.head.ok_or(Error::Empty)?;
        self.unlink(None, head).ok_or(Error::Empty)
    }

    pub fn find(&self, data: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter().find(|d| *d == data)
    }

    pub fn find_mut(&mut self, data: &T) -> Option<&mut T>
    where
        T: PartialEq,
    {
        let key = self.key_of(data)?;
        self.nodes.get_mut(key).map(|n| &mut n.data)
    }

    pub fn position(&self, data: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|d| d == data)
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        Bounds::Exact.check(index, len)?;
        self.key_at(index)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.data)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        Bounds::Exact.check(index, len)?;
        let key = self
            .key_at(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        self.nodes
            .get_mut(key)
            .map(|n| &mut n.data)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Walk the list head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.len(),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn key_at(&self, index: usize) -> Option<NodeKey> {
        let mut cur = self.head;
        for _ in 0..index {
            cur = self.nodes.get(cur?)?.next;
        }
        cur
    }

    fn key_of(&self, data: &T) -> Option<NodeKey>
    where
        T: PartialEq,
    {
        let mut cur = self.head;
        while let Some(key) = cur {
            let node = self.nodes.get(key)?;
            if node.data == *data {
                return Some(key);
            }
            cur = node.next;
        }
        None
    }

    /// Detach `key`, whose predecessor is `prev`, keeping `head`/`tail` valid.
    fn unlink(&mut self, prev: Option<NodeKey>, key: NodeKey) -> Option<T> {
        let node = self.nodes.remove(key)?;
        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) => p.next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(key) {
            self.tail = prev;
        }
        Some(node.data)
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list elements, head to tail.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.append(data);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// One element per line, head first.
impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for data in self.iter() {
            writeln!(f, "{}", data)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
