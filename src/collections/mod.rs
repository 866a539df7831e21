//! Collection types.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves me from writing some of the more repetitive functionality, and hands the live elements to
//! anything that works over slices, like [`sort`](crate::sort).

pub mod contiguous;
