//! chained-collections: hand-built collections centred on a
//! separate-chaining hash table with string keys.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small family of collections whose observable behavior is
//!   pinned down exactly, including the hash function and growth policy,
//!   so that bucket placement and capacities are predictable.
//! - Layers:
//!   - DynamicArray<T> / FixedArray<T>: contiguous slot buffers; the
//!     dynamic one doubles when full and halves when sparse, never
//!     below [`DEFAULT_CAPACITY`].
//!   - HashTable<V, H>: chained buckets indexed by a [`BucketHash`]
//!     (djb2 by default), doubling past a 0.75 load factor. A private
//!     key registry, built on `hashbrown` and `slotmap`, backs `keys()`.
//!   - HashSet<H>: presence set over `HashTable<bool>`.
//!   - LinkedList<T>: slotmap-backed singly linked list with O(1)
//!     append; EventLinkedList and TimedList build on it.
//!
//! Constraints
//! - Single-threaded; nothing here is synchronized.
//! - Fallible operations return [`Result`] with a typed [`Error`];
//!   lookups that may simply miss return `Option`.
//! - Event listeners run synchronously on the mutating call's stack.
//!
//! Removal semantics
//! - `HashTable::remove` is bucket-granular by default: every key that
//!   shares the removed key's bucket becomes unreachable, and the count
//!   drops by one. Configure [`RemovalMode::Entry`] for exact removal;
//!   [`HashSet`] always uses it.
//! - Repeated `set` of a key shadows older nodes rather than replacing
//!   them; `get`, iteration and resizing only ever see the newest one.
//!
//! Notes and non-goals
//! - No thread safety, persistence or ordering guarantees for keys.
//! - The table never shrinks its bucket array.

pub mod array;
pub mod error;
pub mod event_list;
pub mod fixed_array;
pub mod hash_set;
pub mod hash_table;
mod hash_table_proptest;
mod key_registry;
pub mod linked_list;
pub mod timed_list;

// Public surface
pub use array::{DynamicArray, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use event_list::{Event, EventKind, EventLinkedList, Listener};
pub use fixed_array::FixedArray;
pub use hash_set::{is_unique, HashSet};
pub use hash_table::{djb2, BucketHash, Djb2, HashTable, RemovalMode, TableConfig};
pub use linked_list::LinkedList;
pub use timed_list::{Clock, SystemClock, TimedList};
