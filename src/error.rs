//! Error type shared by every container in the crate.

use thiserror::Error;

/// Failures raised synchronously by container operations.
///
/// Misses that are not errors (looking up an absent key, searching for a
/// value that is not stored) are reported as `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The operation needs at least one element and found none.
    #[error("container is empty")]
    Empty,
    /// The index lies outside the range accepted by the operation.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A fixed-capacity container is full.
    #[error("capacity of {capacity} elements exceeded")]
    CapacityExceeded { capacity: usize },
    /// A positional removal walked off the end of a linked list.
    #[error("no node at index {index}")]
    NodeNotFound { index: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

/// How an index is validated against a container of length `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bounds {
    /// `index` must address a live element: `[0, len)`.
    Exact,
    /// `index` may also point one past the end: `[0, len]`.
    Range,
}

impl Bounds {
    #[inline]
    pub(crate) fn check(self, index: usize, len: usize) -> Result<()> {
        let ok = match self {
            Bounds::Exact => index < len,
            Bounds::Range => index <= len,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds { index, len })
        }
    }
}
