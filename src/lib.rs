//! This crate is my take on a growable contiguous sequence and a quicksort that runs straight over
//! its buffer.
//!
//! # Purpose
//! Both halves are written as a learning exercise in managing object lifetimes by hand: the
//! [`Sequence`](collections::contiguous::Sequence) owns a block of uninitialized memory and decides
//! exactly which slots hold live values, and the [`sort`] module partitions a range in place without
//! ever cloning an element.
//!
//! # Method
//! [`Sequence`](collections::contiguous::Sequence) doesn't use [`Vec`] internally. The memory comes
//! straight from the global allocator through [`Buffer`](collections::contiguous::Buffer), which
//! knows nothing about which of its slots are initialized. The Sequence is the one that tracks that.
//!
//! The sorting functions take a `&mut [T]`, so they work over a Sequence (through
//! [`Deref`](std::ops::Deref)) just as well as over any other slice. For callers holding a raw
//! `[first, last)` pointer pair, [`sort::sort_range`] takes the pointers directly.
//!
//! # Error Handling
//! Like the standard library, most methods panic when a precondition is broken (an index out of
//! bounds or a capacity that can't be represented). The panic message comes from a strongly typed
//! error, and the same errors are returned by the `try_*` variants for callers that want to handle
//! them.
//!
//! # Logging
//! Growth and sorting emit [`tracing`] events at `trace` and `debug` level. The library never
//! installs a subscriber, that is left to the binary.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
pub mod sort;

pub(crate) mod util;
