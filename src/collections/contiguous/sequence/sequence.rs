use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use tracing::trace;

use crate::collections::contiguous::Buffer;
use crate::sort::{self, SortConfig, SortReport};
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, InsertError};
use crate::util::result::ResultExtension;

const GROWTH_FACTOR: usize = 2;

/// A growable contiguous collection, built on a raw [`Buffer<T>`].
///
/// Slots `0..len` of the buffer always hold live values and slots `len..cap` never do. Every
/// method that moves values around (growth, insertion and removal) does so with moves only, so
/// `T` doesn't need to implement [`Clone`] for anything other than [`Sequence::clone`].
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Sequence.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `replace` | `O(1)` |
/// | `take` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `sort` | `O(n log n)`*** |
///
/// \* If the Sequence doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Sequence has enough capacity for the additional items already, `reserve` is `O(1)`.
///
/// \*** Expected. Adversarial input can still push quicksort to `O(n^2)`.
pub struct Sequence<T> {
    pub(crate) buf: Buffer<T>,
    pub(crate) len: usize,
}

impl<T> Sequence<T> {
    /// The capacity used by [`Sequence::new`], in place of a requested capacity of 0 and when a
    /// Sequence with capacity 0 grows.
    pub const DEFAULT_CAP: usize = 8;

    /// Creates a new Sequence with length 0 and capacity [`Sequence::DEFAULT_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let seq: Sequence<u8> = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.cap(), Sequence::<u8>::DEFAULT_CAP);
    /// ```
    pub fn new() -> Sequence<T> {
        Self::with_cap(Self::DEFAULT_CAP)
    }

    /// Creates a new Sequence with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation. A capacity of 0 is replaced with
    /// [`Sequence::DEFAULT_CAP`].
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<u8> = Sequence::with_cap(5);
    /// assert_eq!(seq.cap(), 5);
    /// seq.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(seq.cap(), 5);
    ///
    /// assert_eq!(Sequence::<u8>::with_cap(0).cap(), Sequence::<u8>::DEFAULT_CAP);
    /// ```
    pub fn with_cap(cap: usize) -> Sequence<T> {
        let cap = if cap == 0 { Self::DEFAULT_CAP } else { cap };

        Sequence {
            buf: Buffer::with_cap(cap),
            len: 0,
        }
    }

    /// Creates a Sequence with length and capacity 0, without allocating. This is the state a
    /// Sequence is left in by [`Sequence::take`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<u8> = Sequence::empty();
    /// assert_eq!(seq.cap(), 0);
    /// seq.push(1);
    /// assert_eq!(seq.cap(), Sequence::<u8>::DEFAULT_CAP);
    /// ```
    pub const fn empty() -> Sequence<T> {
        Sequence {
            buf: Buffer::dangling(),
            len: 0,
        }
    }

    /// Returns the number of live elements in the Sequence.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let seq: Sequence<_> = (1_u8..=3).collect();
    /// assert_eq!(seq.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Sequence contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated for the Sequence, live or not.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Views the live elements as a slice. This is the `[begin, end)` range handed to
    /// [`sort`](crate::sort) and other slice algorithms. It is also available through
    /// [`Deref`].
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Views the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Push the provided value onto the end of the Sequence, growing first if it is full. Returns
    /// the index of the new element.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq = Sequence::<u8>::new();
    /// assert_eq!(seq.push(10), 0);
    /// assert_eq!(seq.push(20), 1);
    /// assert_eq!(&*seq, &[10, 20]);
    /// ```
    pub fn push(&mut self, value: T) -> usize {
        if self.len == self.cap() {
            self.grow().throw();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Push the provided value onto the end of the Sequence, assuming that there is enough
    /// capacity to do so. Returns the index of the new element.
    ///
    /// # Safety
    /// It is up to the caller to ensure that `len < cap`. Using this method on a full Sequence is
    /// undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) -> usize {
        // SAFETY: The caller guarantees that len < cap, so the slot is within the allocation and
        // currently uninitialized.
        unsafe { self.buf.slot(self.len).write(value) }
        self.len += 1;
        self.len - 1
    }

    /// Pops the last value off the end of the Sequence, returning an owned value if the Sequence
    /// isn't empty.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (0..3).collect();
    /// assert_eq!(seq.pop(), Some(2));
    /// assert_eq!(seq.pop(), Some(1));
    /// assert_eq!(seq.pop(), Some(0));
    /// assert_eq!(seq.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading, the slot is no longer live.
            self.len -= 1;

            // SAFETY: The slot at the old len - 1 is initialized. After the read it is treated as
            // uninitialized, so the value is moved out rather than duplicated.
            Some(unsafe { self.buf.slot(self.len).read() })
        }
    }

    /// Inserts the provided value before `index`, shifting every element from `index` onwards one
    /// slot to the right. Growth happens before anything is shifted. Returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`, or if the Sequence needs to grow past [`isize::MAX`] bytes.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(seq.insert(1, 99), 1);
    /// assert_eq!(&*seq, &[1, 99, 2, 3]);
    /// seq.insert(4, 100);
    /// assert_eq!(&*seq, &[1, 99, 2, 3, 100]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.try_insert(index, value).throw()
    }

    /// Like [`insert`](Sequence::insert), but returns an error instead of panicking. The value is
    /// dropped on error.
    ///
    /// # Errors
    /// Returns [`InsertError::IndexOutOfBounds`] if `index > len`, or
    /// [`InsertError::CapacityOverflow`] if the Sequence is full and can't grow.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = [1, 2].into_iter().collect();
    /// assert!(seq.try_insert(3, 4).is_err_and(|e| e.is_index_out_of_bounds()));
    /// assert_eq!(seq.try_insert(2, 3), Ok(2));
    /// ```
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize, InsertError> {
        if index > self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            }.into());
        }

        if self.len == self.cap() {
            self.grow()?;
        }

        // Carry the new value down the live range, each slot handing its old contents to the next.
        // The last exchange picks up the uninitialized slot at len, which is discarded.
        let mut carried = MaybeUninit::new(value);
        for slot in &mut self.buf.slots_mut()[index..=self.len] {
            carried = mem::replace(slot, carried);
        }

        self.len += 1;
        Ok(index)
    }

    /// Removes the element at the provided index, moving all following values one slot to the
    /// left to fill the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = "Hello world!".chars().collect();
    /// assert_eq!(seq.remove(1), 'e');
    /// assert_eq!(seq.remove(4), ' ');
    /// assert_eq!(seq, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Like [`remove`](Sequence::remove), but returns an error instead of panicking.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        let mut next = MaybeUninit::uninit();
        // Iterate backwards to index.
        for slot in self.buf.slots_mut()[index..self.len].iter_mut().rev() {
            next = mem::replace(slot, next);
        }

        self.len -= 1;
        // SAFETY: next contains the value which was previously located at index, which we've
        // already checked to be less than len and therefore initialized.
        Ok(unsafe { next.assume_init() })
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        mem::replace(self.at_mut(index), new_value)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let seq: Sequence<_> = ["a", "b"].into_iter().collect();
    /// assert_eq!(*seq.at(1), "b");
    /// ```
    pub fn at(&self, index: usize) -> &T {
        self.check_index(index).throw();
        &self[index]
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        self.check_index(index).throw();
        &mut self[index]
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        let live: *mut [T] = self.as_mut_slice();
        // Forget the elements before dropping them, so a panicking drop can't cause a double drop.
        self.len = 0;
        // SAFETY: live points to the previously initialized elements, which are no longer
        // reachable through self.
        unsafe { ptr::drop_in_place(live) }
    }

    /// Moves the whole contents out of the Sequence, leaving it with length and capacity 0. The
    /// elements themselves aren't touched, only ownership of the buffer changes hands. The
    /// Sequence remains usable afterwards.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut source: Sequence<_> = (1..=3).collect();
    /// let target = source.take();
    /// assert_eq!(&*target, &[1, 2, 3]);
    /// assert_eq!((source.len(), source.cap()), (0, 0));
    /// ```
    pub fn take(&mut self) -> Sequence<T> {
        trace!(len = self.len, cap = self.cap(), "moving sequence contents");
        mem::replace(self, Sequence::empty())
    }

    /// Ensures that the Sequence has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow).throw();

        if new_cap <= self.cap() { return; }

        trace!(old_cap = self.cap(), new_cap, "reserving sequence capacity");
        self.buf.realloc(new_cap);
    }

    /// Sorts the Sequence in ascending order, in place. See [`sort::sort`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = [5, 2, 8, 2, 9, 1, 5, 5, 2].into_iter().collect();
    /// seq.sort();
    /// assert_eq!(&*seq, &[1, 2, 2, 2, 5, 5, 5, 8, 9]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::sort(self.as_mut_slice());
    }

    /// Sorts the Sequence in place with `less` as the strict weak ordering. See [`sort::sort_by`].
    pub fn sort_by<F>(&mut self, less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        sort::sort_by(self.as_mut_slice(), less);
    }

    /// Sorts the Sequence in place with an explicit [`SortConfig`]. See [`sort::sort_with`].
    pub fn sort_with<F>(&mut self, less: F, config: &SortConfig) -> SortReport
    where
        F: FnMut(&T, &T) -> bool,
    {
        sort::sort_with(self.as_mut_slice(), less, config)
    }

    /// Grows the Buffer by `GROWTH_FACTOR` to allow for the insertion of at least one more
    /// element. A Sequence with capacity 0 grows to [`Sequence::DEFAULT_CAP`] instead.
    pub(crate) fn grow(&mut self) -> Result<(), CapacityOverflow> {
        let new_cap = match self.cap().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)? {
            0 => Self::DEFAULT_CAP,
            new_cap => new_cap,
        };

        trace!(old_cap = self.cap(), new_cap, "growing sequence");
        self.buf.try_realloc(new_cap)
    }

    /// Checks that the provided index refers to a live element.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Sequence<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        for item in iter {
            self.push(*item);
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut seq = Sequence::with_cap(iter.size_hint().0);

        for item in iter {
            seq.push(item);
        }

        seq
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }

        // Implicitly drop self.buf, which deallocates the memory without touching the slots.
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Sequence is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull, properly aligned and the range entirely contained within this
        // Sequence. The borrow checker enforces that self isn't mutated due to this function taking
        // a &self.
        unsafe { slice::from_raw_parts(self.buf.slot(0), self.len) }
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: Sequence is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull, properly aligned and the range entirely contained within this
        // Sequence. The borrow checker enforces that self isn't accessed due to this function
        // taking a &mut self.
        unsafe { slice::from_raw_parts_mut(self.buf.slot(0), self.len) }
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Sequence<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Sequence<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Sequence<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> Clone for Sequence<T> {
    /// Deep copies the Sequence into a new buffer with the same capacity.
    fn clone(&self) -> Self {
        let mut seq = Sequence {
            buf: Buffer::with_cap(self.cap()),
            len: 0,
        };

        for value in self.iter() {
            // SAFETY: seq has the same capacity as self, which holds at least len values.
            unsafe { seq.push_unchecked(value.clone()); }
        }

        seq
    }

    /// Replaces the contents of self with clones of the elements in `source`, reusing the existing
    /// allocation where it's large enough.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.reserve(source.len);

        for value in source.iter() {
            // SAFETY: The capacity has been reserved for all of source's elements.
            unsafe { self.push_unchecked(value.clone()); }
        }
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
