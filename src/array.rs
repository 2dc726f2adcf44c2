//! Resizable array: a slot buffer of `capacity` cells of which the first
//! `len` are live. Capacity doubles when a write finds the buffer full and
//! halves (never below [`DEFAULT_CAPACITY`]) once the array turns sparse.

use crate::error::{Bounds, Error, Result};
use core::fmt;

/// Starting capacity, and the floor every shrink respects.
pub const DEFAULT_CAPACITY: usize = 13;

/// Fixed-length backing buffer shared by the array containers.
///
/// Cells `[0, len)` are always `Some`; cells `[len, capacity)` are `None`.
pub(crate) struct Slots<T> {
    buf: Box<[Option<T>]>,
    len: usize,
}

impl<T> Slots<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buf: (0..capacity).map(|_| None).collect(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Caller guarantees `!is_full()`.
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(!self.is_full());
        self.buf[self.len] = Some(value);
        self.len += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.buf[self.len].take()
    }

    /// Caller guarantees `index <= len` and `!is_full()`.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len && !self.is_full());
        // The free cell at `len` rotates down to `index`.
        self.buf[index..=self.len].rotate_right(1);
        self.buf[index] = Some(value);
        self.len += 1;
    }

    /// Caller guarantees `index < len`.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        let value = self.buf[index].take();
        self.buf[index..self.len].rotate_left(1);
        self.len -= 1;
        value.expect("live cell below len")
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.buf[..self.len].get(index).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf[..self.len].get_mut(index).and_then(Option::as_mut)
    }

    pub(crate) fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Move the live cells into a fresh buffer of `capacity` cells.
    pub(crate) fn resize(&mut self, capacity: usize) {
        if capacity == self.buf.len() {
            return;
        }
        debug_assert!(capacity >= self.len);
        let mut fresh: Box<[Option<T>]> = (0..capacity).map(|_| None).collect();
        for (dst, src) in fresh.iter_mut().zip(self.buf[..self.len].iter_mut()) {
            *dst = src.take();
        }
        self.buf = fresh;
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.buf[..self.len].iter(),
        }
    }
}

/// Iterator over the live elements of an array, front to back.
pub struct Iter<'a, T> {
    it: core::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().and_then(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().and_then(Option::as_ref)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// Growable array with amortized O(1) `push` and capacity halving on
/// sparse `pop`/`remove`.
pub struct DynamicArray<T> {
    slots: Slots<T>,
}

impl<T> DynamicArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity is bumped to one so the first grow can double it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Slots::new(capacity.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn push(&mut self, element: T) {
        if self.slots.is_full() {
            self.grow();
        }
        self.slots.push(element);
    }

    pub fn pop(&mut self) -> Result<T> {
        let element = self.slots.pop().ok_or(Error::Empty)?;
        self.shrink_if_sparse();
        Ok(element)
    }

    /// Insert at `index`, shifting `[index, len)` one cell right.
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        Bounds::Range.check(index, self.len())?;
        if self.slots.is_full() {
            self.grow();
        }
        self.slots.insert(index, element);
        Ok(())
    }

    pub fn insert_at_first(&mut self, element: T) -> Result<()> {
        self.insert(0, element)
    }

    /// Remove the element at `index`, shifting the tail left.
    ///
    /// On an empty array `remove(0)` reports [`Error::Empty`]; any other
    /// index outside `[0, len)` reports [`Error::IndexOutOfBounds`].
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        Bounds::Range.check(index, len)?;
        if len == 0 {
            return Err(Error::Empty);
        }
        Bounds::Exact.check(index, len)?;
        let element = self.slots.remove(index);
        self.shrink_if_sparse();
        Ok(element)
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        Bounds::Exact.check(index, self.len())?;
        self.slots
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, len: self.len() })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        Bounds::Exact.check(index, len)?;
        self.slots
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Overwrite the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(core::mem::replace(slot, element))
    }

    pub fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.slots.position(element)
    }

    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(element).is_some()
    }

    /// Drop every element and return to [`DEFAULT_CAPACITY`].
    pub fn clear(&mut self) {
        self.slots = Slots::new(DEFAULT_CAPACITY);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.slots.iter()
    }

    fn grow(&mut self) {
        let capacity = self.slots.capacity() * 2;
        log::trace!("dynamic array grow: {} -> {}", self.slots.capacity(), capacity);
        self.slots.resize(capacity);
    }

    fn shrink_if_sparse(&mut self) {
        if 3 * self.len() < self.capacity() {
            self.shrink();
        }
    }

    fn shrink(&mut self) {
        let (len, capacity) = (self.len(), self.capacity());
        // Half-full or more: keep the buffer.
        if capacity < 2 * len {
            return;
        }
        let target = DEFAULT_CAPACITY.max(capacity / 2);
        if target != capacity {
            log::trace!("dynamic array shrink: {} -> {}", capacity, target);
        }
        self.slots.resize(target);
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
