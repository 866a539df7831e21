//! A module containing [`Buffer`], the raw allocation underneath [`Sequence`](super::Sequence).
//!
//! [`Buffer`] is also re-exported under the parent module.

mod buffer;
mod tests;

pub use buffer::*;
