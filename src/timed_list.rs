//! TimedList: prepend-only list whose nodes carry their creation time,
//! queried for the nodes created within a recent window.

use crate::linked_list::LinkedList;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct Stamped<T> {
    data: T,
    created: Instant,
}

pub struct TimedList<T, C = SystemClock> {
    list: LinkedList<Stamped<T>>,
    clock: C,
}

impl<T> TimedList<T> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T> Default for TimedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> TimedList<T, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            list: LinkedList::new(),
            clock,
        }
    }

    /// Put `data` at the head, stamped with the current time.
    pub fn prepend(&mut self, data: T) {
        let created = self.clock.now();
        self.list.prepend(Stamped { data, created });
    }

    /// Every element no older than `window`, newest first.
    pub fn retrieve_latest_nodes(&self, window: Duration) -> Vec<&T> {
        let now = self.clock.now();
        self.list
            .iter()
            .filter(|s| now.saturating_duration_since(s.created) <= window)
            .map(|s| &s.data)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Elements with their creation instants, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (&T, Instant)> + '_ {
        self.list.iter().map(|s| (&s.data, s.created))
    }
}
