//! EventLinkedList: a linked list that reports each mutation to a
//! listener registered for the mutation's kind.
//!
//! Listeners are stored in a [`HashTable`] keyed by the kind's name, one
//! slot per kind: registering again replaces the previous listener.
//! Listeners run synchronously, on the mutating call's stack, after the
//! list has been updated; a panicking listener unwinds through the caller.

use crate::error::Result;
use crate::hash_table::{HashTable, RemovalMode, TableConfig};
use crate::linked_list::{Iter, LinkedList};
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Insert,
    Update,
    Delete,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Insert, EventKind::Update, EventKind::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Insert => "insert",
            EventKind::Update => "update",
            EventKind::Delete => "delete",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a listener receives.
#[derive(Debug)]
pub struct Event<'a, T> {
    pub kind: EventKind,
    /// Inserted value, new value of an update, or the value asked to be deleted.
    pub value: &'a T,
    /// Value replaced by an update.
    pub old_value: Option<&'a T>,
    pub success: bool,
}

pub type Listener<T> = Box<dyn FnMut(&Event<'_, T>)>;

pub struct EventLinkedList<T> {
    list: LinkedList<T>,
    listeners: HashTable<Listener<T>>,
}

impl<T> EventLinkedList<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
            listeners: HashTable::with_config(TableConfig {
                removal: RemovalMode::Entry,
                ..TableConfig::default()
            }),
        }
    }

    /// Register `listener` for `kind`, replacing any previous one.
    /// Returns whether a listener was replaced.
    pub fn add_event_listener<F>(&mut self, kind: EventKind, listener: F) -> bool
    where
        F: FnMut(&Event<'_, T>) + 'static,
    {
        let replaced = self.listeners.remove(kind.as_str()).is_some();
        self.listeners.set(kind.as_str(), Box::new(listener));
        replaced
    }

    /// Returns whether a listener was registered for `kind`.
    pub fn remove_event_listener(&mut self, kind: EventKind) -> bool {
        self.listeners.remove(kind.as_str()).is_some()
    }

    pub fn has_event_listener(&self, kind: EventKind) -> bool {
        self.listeners.contains_key(kind.as_str())
    }

    /// Deliver `event` to the listener registered for its kind, if any.
    pub fn emit_event(&mut self, event: &Event<'_, T>) {
        notify(&mut self.listeners, event);
    }

    /// Append `data` and emit a successful insert event.
    pub fn insert(&mut self, data: T) {
        self.list.append(data);
        if let Some(value) = self.list.back() {
            notify(
                &mut self.listeners,
                &Event {
                    kind: EventKind::Insert,
                    value,
                    old_value: None,
                    success: true,
                },
            );
        }
    }

    /// Replace the first element equal to `old` with `new`, emitting an
    /// update event. Silent, returning `None`, when nothing matches.
    pub fn update(&mut self, old: &T, new: T) -> Option<T>
    where
        T: PartialEq,
    {
        let slot = self.list.find_mut(old)?;
        let previous = core::mem::replace(slot, new);
        notify(
            &mut self.listeners,
            &Event {
                kind: EventKind::Update,
                value: &*slot,
                old_value: Some(&previous),
                success: true,
            },
        );
        Some(previous)
    }

    /// Remove the first element equal to `data`.
    ///
    /// Every attempt emits a delete event whose `success` tells whether a
    /// node was unlinked. On an empty list the failure event is emitted
    /// before the error is returned.
    pub fn remove(&mut self, data: &T) -> Result<Option<T>>
    where
        T: PartialEq,
    {
        let outcome = self.list.remove(data);
        let success = matches!(outcome, Ok(Some(_)));
        notify(
            &mut self.listeners,
            &Event {
                kind: EventKind::Delete,
                value: data,
                old_value: None,
                success,
            },
        );
        outcome
    }

    pub fn find(&self, data: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.list.find(data)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    pub fn as_list(&self) -> &LinkedList<T> {
        &self.list
    }
}

fn notify<T>(listeners: &mut HashTable<Listener<T>>, event: &Event<'_, T>) {
    if let Some(listener) = listeners.get_mut(event.kind.as_str()) {
        listener(event);
    }
}

impl<T> Default for EventLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for EventLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<EventKind> = EventKind::ALL
            .into_iter()
            .filter(|k| self.has_event_listener(*k))
            .collect();
        f.debug_struct("EventLinkedList")
            .field("list", &self.list)
            .field("listeners", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Seen {
        kind: EventKind,
        value: i32,
        old_value: Option<i32>,
        success: bool,
    }

    fn recorder(log: &Rc<RefCell<Vec<Seen>>>) -> impl FnMut(&Event<'_, i32>) + 'static {
        let log = Rc::clone(log);
        move |e| {
            log.borrow_mut().push(Seen {
                kind: e.kind,
                value: *e.value,
                old_value: e.old_value.copied(),
                success: e.success,
            })
        }
    }

    /// Invariant: one insert fires the insert listener exactly once with success.
    #[test]
    fn insert_fires_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut l = EventLinkedList::new();
        assert!(!l.add_event_listener(EventKind::Insert, recorder(&log)));
        l.insert(7);
        assert_eq!(
            *log.borrow(),
            vec![Seen {
                kind: EventKind::Insert,
                value: 7,
                old_value: None,
                success: true
            }]
        );
        assert_eq!(l.len(), 1);
    }

    /// Invariant: a second registration for the same kind replaces the first.
    #[test]
    fn second_listener_replaces_first() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let mut l = EventLinkedList::new();
        l.add_event_listener(EventKind::Insert, recorder(&first));
        assert!(l.add_event_listener(EventKind::Insert, recorder(&second)));
        l.insert(1);
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);
    }

    /// Invariant: a miss emits a failed delete and returns normally; an empty
    /// list emits a failed delete and then errors.
    #[test]
    fn delete_events_report_outcome() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut l = EventLinkedList::new();
        l.add_event_listener(EventKind::Delete, recorder(&log));
        assert_eq!(l.remove(&1), Err(Error::Empty));
        l.insert(1);
        l.insert(2);
        assert_eq!(l.remove(&3), Ok(None));
        assert_eq!(l.remove(&2), Ok(Some(2)));
        let outcomes: Vec<(i32, bool)> = log.borrow().iter().map(|s| (s.value, s.success)).collect();
        assert_eq!(outcomes, vec![(1, false), (3, false), (2, true)]);
    }

    /// Invariant: update carries the new and the replaced value; misses are silent.
    #[test]
    fn update_reports_old_value() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut l = EventLinkedList::new();
        l.add_event_listener(EventKind::Update, recorder(&log));
        for v in [1, 2, 3, 6, 5, 8] {
            l.insert(v);
        }
        assert_eq!(l.update(&5, 11), Some(5));
        assert_eq!(l.update(&42, 0), None);
        assert_eq!(
            *log.borrow(),
            vec![Seen {
                kind: EventKind::Update,
                value: 11,
                old_value: Some(5),
                success: true
            }]
        );
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 6, 11, 8]);
    }

    /// Invariant: removing one kind's listener leaves the other kinds registered.
    #[test]
    fn remove_listener_is_per_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut l = EventLinkedList::new();
        for kind in EventKind::ALL {
            l.add_event_listener(kind, recorder(&log));
        }
        assert!(l.remove_event_listener(EventKind::Insert));
        assert!(!l.remove_event_listener(EventKind::Insert));
        assert!(l.has_event_listener(EventKind::Update));
        assert!(l.has_event_listener(EventKind::Delete));
        l.insert(4);
        l.remove(&4).unwrap();
        let kinds: Vec<EventKind> = log.borrow().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![EventKind::Delete]);
    }

    #[test]
    fn emit_event_reaches_listener_directly() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut l: EventLinkedList<i32> = EventLinkedList::new();
        l.add_event_listener(EventKind::Update, recorder(&log));
        l.emit_event(&Event {
            kind: EventKind::Update,
            value: &9,
            old_value: None,
            success: false,
        });
        assert_eq!(log.borrow().len(), 1);
        assert!(l.is_empty());
    }
}
