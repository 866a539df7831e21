//! A module containing [`Sequence`] and associated types.
//!
//! Besides the Sequence itself, there are the position-based [`Cursor`] and [`CursorMut`] for
//! walking a Sequence in a fixed [`Direction`], and [`IntoIter`] for owned iteration.
//! [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`] are used for
//! borrowed iteration.
//!
//! [`Sequence`] is also re-exported under the parent module.

mod cursor;
mod iter;
mod sequence;
mod tests;

pub use cursor::*;
pub use iter::*;
pub use sequence::*;
