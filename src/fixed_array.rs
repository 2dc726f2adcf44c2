//! Array with a capacity fixed at construction.

use crate::array::{Iter, Slots, DEFAULT_CAPACITY};
use crate::error::{Bounds, Error, Result};
use core::fmt;

pub struct FixedArray<T> {
    slots: Slots<T>,
}

impl<T> FixedArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Slots::new(capacity),
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

    pub fn push(&mut self, element: T) -> Result<()> {
        if self.slots.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        self.slots.push(element);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T> {
        self.slots.pop().ok_or(Error::Empty)
    }

    /// The index is validated before the capacity.
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        Bounds::Range.check(index, self.len())?;
        if self.slots.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        self.slots.insert(index, element);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        Bounds::Range.check(index, len)?;
        if len == 0 {
            return Err(Error::Empty);
        }
        Bounds::Exact.check(index, len)?;
        Ok(self.slots.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.slots
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        let len = self.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
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

    /// Drop every element; the capacity stays what it was built with.
    pub fn clear(&mut self) {
        self.slots = Slots::new(self.capacity());
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.slots.iter()
    }
}

impl<T> Default for FixedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for FixedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
