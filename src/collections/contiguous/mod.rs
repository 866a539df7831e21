//! Contiguous collection types. [`Sequence`] is the growable collection, built on top of the raw
//! [`Buffer`] allocation.
#![warn(missing_docs)]

pub mod buffer;
pub mod sequence;

#[doc(inline)]
pub use buffer::Buffer;
#[doc(inline)]
pub use sequence::{Cursor, CursorMut, Direction, Sequence};

pub use crate::util::error::{CapacityOverflow, CursorExhausted, IndexOutOfBounds, InsertError};
