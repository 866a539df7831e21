/// Returns the index of the median of the first, middle and last elements of `v`. Ranges shorter
/// than 3 elements return the last index.
///
/// `v` must not be empty.
pub(crate) fn median_of_three<T, F>(v: &[T], less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let last = v.len() - 1;
    if v.len() < 3 {
        return last;
    }
    let mid = v.len() / 2;

    if less(&v[0], &v[mid]) {
        if less(&v[mid], &v[last]) {
            // first < mid < last
            mid
        } else if less(&v[0], &v[last]) {
            // first < last <= mid
            last
        } else {
            // last <= first < mid
            0
        }
    } else if less(&v[0], &v[last]) {
        // mid <= first < last
        0
    } else if less(&v[mid], &v[last]) {
        // mid < last <= first
        last
    } else {
        // last <= mid <= first
        mid
    }
}

/// Partitions `v` around the median of three with Hoare's scheme and returns the split point `j`.
/// On return every element of `v[..=j]` is not preceded by any element of `v[j + 1..]`, and both
/// halves are non-empty.
///
/// The pivot value stays in the slice and is followed by index through every swap, so `T` never
/// needs to be cloned.
///
/// `v` must hold at least 2 elements.
pub(crate) fn hoare_partition<T, F>(v: &mut [T], less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(v.len() >= 2, "Partitioning needs at least two elements!");

    let median = median_of_three(v, less);
    v.swap(0, median);

    let mut pivot = 0;
    // i and j stand for the two cursors of the textbook version (starting one before the first
    // element and one past the last), already stepped once.
    let mut i = 0;
    let mut j = v.len();

    loop {
        // Both scans stop on elements equal to the pivot, which bounds them to the slice: the
        // right scan can't pass the left cursor's last swap (or the pivot itself on the first
        // round), and vice versa.
        j -= 1;
        while less(&v[pivot], &v[j]) {
            j -= 1;
        }

        while less(&v[i], &v[pivot]) {
            i += 1;
        }

        if i >= j {
            // Only an ordering that isn't strict weak can leave j on the last element. Clamping
            // keeps the right half non-empty, so callers always make progress.
            return j.min(v.len() - 2);
        }

        v.swap(i, j);
        if pivot == i {
            pivot = j;
        } else if pivot == j {
            pivot = i;
        }

        i += 1;
    }
}
