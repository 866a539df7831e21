use std::mem;

use super::SortReport;
use super::insertion::insertion_sort;
use super::partition::hoare_partition;

/// Plain recursive quicksort over Hoare partitions.
pub(crate) fn quick_sort<T, F>(v: &mut [T], less: &mut F, depth: usize, report: &mut SortReport)
where
    F: FnMut(&T, &T) -> bool,
{
    report.enter(depth);
    if v.len() <= 1 {
        return;
    }

    let split = hoare_partition(v, less);
    report.partitions += 1;

    let (left, right) = v.split_at_mut(split + 1);
    quick_sort(left, less, depth + 1, report);
    quick_sort(right, less, depth + 1, report);
}

/// Quicksort with an insertion sort fallback, recursing into the smaller partition and looping
/// over the larger one.
pub(crate) fn hybrid_sort<T, F>(
    mut v: &mut [T],
    less: &mut F,
    threshold: usize,
    depth: usize,
    report: &mut SortReport,
) where
    F: FnMut(&T, &T) -> bool,
{
    report.enter(depth);

    while v.len() > threshold.max(1) {
        let split = hoare_partition(v, less);
        report.partitions += 1;

        let (left, right) = mem::take(&mut v).split_at_mut(split + 1);
        if left.len() < right.len() {
            hybrid_sort(left, less, threshold, depth + 1, report);
            v = right;
        } else {
            hybrid_sort(right, less, threshold, depth + 1, report);
            v = left;
        }
    }

    insertion_sort(v, less);
}

/// Quicksort with an insertion sort fallback, recursing into both partitions.
pub(crate) fn hybrid_sort_recursive<T, F>(
    v: &mut [T],
    less: &mut F,
    threshold: usize,
    depth: usize,
    report: &mut SortReport,
) where
    F: FnMut(&T, &T) -> bool,
{
    report.enter(depth);

    if v.len() <= threshold.max(1) {
        insertion_sort(v, less);
        return;
    }

    let split = hoare_partition(v, less);
    report.partitions += 1;

    let (left, right) = v.split_at_mut(split + 1);
    hybrid_sort_recursive(left, less, threshold, depth + 1, report);
    hybrid_sort_recursive(right, less, threshold, depth + 1, report);
}
