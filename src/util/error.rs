use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was outside of the live elements of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The number of live elements at the time.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A capacity was requested whose memory layout would exceed [`isize::MAX`] bytes, or whose
/// element count can't be represented as a [`usize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// A cursor was read after it had moved off the live elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Cursor doesn't point to a live element!")]
pub struct CursorExhausted;

/// The ways an insertion at an index can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum InsertError {
    /// The index was greater than the length of the collection.
    IndexOutOfBounds(IndexOutOfBounds),
    /// The collection was full and couldn't grow.
    CapacityOverflow(CapacityOverflow),
}
