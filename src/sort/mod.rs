//! In-place, comparison-based sorting over contiguous ranges.
//!
//! # Method
//! Every strategy is a quicksort built from the same two pieces: a median-of-three pivot, which
//! keeps sorted, reverse-sorted and duplicate-heavy input from degrading into quadratic time, and
//! a Hoare partition, which swaps out-of-order pairs from both ends of the range towards the
//! middle. The hybrid strategies finish short ranges with insertion sort, which is cheaper than
//! partitioning them. See [`Strategy`] for the variants and [`SortConfig`] for the tunables.
//!
//! The ordering is given as a strict weak ordering `less(a, b)`, true iff `a` strictly precedes
//! `b`. Sorting isn't stable.
//!
//! # Panics
//! An ordering which isn't strict weak may either leave the range in an unspecified order or
//! panic, when a partition scan runs off the end of the range. It never reads outside the range.
//!
//! No element is ever cloned. If the sort or `less` panics, the panic propagates and the range is
//! left as some permutation of its original contents.

mod config;
mod insertion;
mod partition;
mod quick;

use std::slice;

use tracing::debug;

pub use config::*;

/// Sorts `v` in ascending order.
///
/// # Examples
/// ```
/// let mut values = [5, 2, 8, 2, 9, 1, 5, 5, 2];
/// sequence_sort::sort::sort(&mut values);
/// assert_eq!(values, [1, 2, 2, 2, 5, 5, 5, 8, 9]);
/// ```
pub fn sort<T: Ord>(v: &mut [T]) {
    sort_by(v, |a, b| a < b);
}

/// Sorts `v` with `less` as the strict weak ordering, using the default [`SortConfig`].
///
/// # Examples
/// ```
/// let mut values = ["pear", "fig", "apple"];
/// sequence_sort::sort::sort_by(&mut values, |a, b| a.len() > b.len());
/// assert_eq!(values, ["apple", "pear", "fig"]);
/// ```
pub fn sort_by<T, F>(v: &mut [T], less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    sort_with(v, less, &SortConfig::default());
}

/// Sorts `v` with `less` as the strict weak ordering and an explicit [`SortConfig`], returning a
/// [`SortReport`] of the work done.
///
/// # Examples
/// ```
/// # use sequence_sort::sort::{self, SortConfig};
/// let mut values: Vec<u32> = (0..10_000).collect();
/// let report = sort::sort_with(&mut values, |a, b| a > b, &SortConfig::default());
/// assert!(values.is_sorted_by(|a, b| a >= b));
/// assert!(report.max_depth <= 14);
/// ```
pub fn sort_with<T, F>(v: &mut [T], mut less: F, config: &SortConfig) -> SortReport
where
    F: FnMut(&T, &T) -> bool,
{
    let mut report = SortReport::default();

    match config.strategy {
        Strategy::Quick => quick::quick_sort(v, &mut less, 0, &mut report),
        Strategy::Hybrid => {
            quick::hybrid_sort(v, &mut less, config.insertion_threshold, 0, &mut report)
        },
        Strategy::HybridRecursive => {
            quick::hybrid_sort_recursive(v, &mut less, config.insertion_threshold, 0, &mut report)
        },
    }

    debug!(
        strategy = %config.strategy,
        len = v.len(),
        max_depth = report.max_depth,
        partitions = report.partitions,
        "sorted range"
    );
    report
}

/// Sorts the half-open range `[first, last)` in place with `less` as the strict weak ordering,
/// using the default [`SortConfig`].
///
/// This is the raw pointer-pair form, for ranges that aren't already available as a slice. When
/// they are, prefer [`sort_by`].
///
/// # Safety
/// - `first` and `last` must both point into (or one past the end of) the same allocation, with
///   `first <= last`.
/// - Every position in `[first, last)` must hold an initialized `T`.
/// - Nothing else may access the range for the duration of the call.
///
/// # Examples
/// ```
/// # use sequence_sort::collections::contiguous::Sequence;
/// let mut seq: Sequence<_> = [3, 1, 2].into_iter().collect();
/// let range = seq.as_mut_ptr_range();
/// // SAFETY: The range covers exactly the live elements of seq, which isn't otherwise used.
/// unsafe { sequence_sort::sort::sort_range(range.start, range.end, |a, b| a < b) };
/// assert_eq!(&*seq, &[1, 2, 3]);
/// ```
pub unsafe fn sort_range<T, F>(first: *mut T, last: *mut T, less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    // A range of zero-sized values has no order to restore, and its length can't be recovered
    // from the pointers anyway.
    if first == last || size_of::<T>() == 0 {
        return;
    }

    // SAFETY: The caller guarantees that both pointers belong to the same allocation.
    let len = unsafe { last.offset_from(first) };
    debug_assert!(len >= 0, "The end of the range must not precede its start!");

    let Ok(len) = usize::try_from(len) else {
        return;
    };

    // SAFETY: The caller guarantees that the range is initialized, properly aligned and not
    // aliased for the duration of the call.
    let v = unsafe { slice::from_raw_parts_mut(first, len) };
    sort_by(v, less);
}
