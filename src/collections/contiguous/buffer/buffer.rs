use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::slice;

use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// An exclusively owned, fixed-capacity block of uninitialized slots for values of type `T`.
///
/// A Buffer never reads, writes or drops the values in its slots, it only allocates, reallocates
/// and frees the memory. Keeping track of which slots hold live values is left to the owner (see
/// [`Sequence`](super::super::Sequence)).
///
/// A Buffer with capacity 0, or any Buffer of a zero-sized type, doesn't allocate and holds a
/// dangling (but well aligned) pointer instead.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `cap` | `O(1)` |
/// | `realloc` | `O(n)`*, `O(1)` |
///
/// \* Relocating the slots is left to the global allocator, which may be able to resize in place.
pub struct Buffer<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Buffer<T> {
    /// Creates a Buffer with capacity 0, without allocating.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Buffer;
    /// let buf: Buffer<u8> = Buffer::dangling();
    /// assert_eq!(buf.cap(), 0);
    /// ```
    pub const fn dangling() -> Buffer<T> {
        Buffer {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a Buffer with exactly `cap` uninitialized slots.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Buffer;
    /// let buf: Buffer<u64> = Buffer::with_cap(5);
    /// assert_eq!(buf.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Buffer<T> {
        Self::try_with_cap(cap).throw()
    }

    /// Allocates a Buffer with exactly `cap` uninitialized slots, returning an error instead of
    /// panicking if the memory layout can't be represented.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Buffer;
    /// assert!(Buffer::<u64>::try_with_cap(usize::MAX).is_err());
    /// ```
    pub fn try_with_cap(cap: usize) -> Result<Buffer<T>, CapacityOverflow> {
        let layout = Self::make_layout(cap)?;

        Ok(Buffer {
            ptr: Self::make_ptr(layout),
            cap,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of slots in the Buffer.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a raw pointer to the slot at `index`, interpreted as a `T`.
    ///
    /// # Safety
    /// `index` must be less than or equal to the capacity of the Buffer. The returned pointer may
    /// only be read from if the slot has been initialized by the caller.
    pub(crate) const unsafe fn slot(&self, index: usize) -> *mut T {
        // SAFETY: The caller guarantees that index is within (or one past) the allocation.
        unsafe { self.ptr.as_ptr().add(index).cast() }
    }

    /// Views every slot of the Buffer, initialized or not.
    pub(crate) fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: The pointer is nonnull, properly aligned and allocated for cap slots (or dangling
        // with cap 0 / a zero-sized T). MaybeUninit<T> has no validity requirements, so every slot
        // is a valid value regardless of what the owner has written.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }

    /// Reallocates the Buffer to hold exactly `new_cap` slots, preserving the contents of the first
    /// `min(cap, new_cap)` slots. Slots past `new_cap` are discarded without being dropped.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn realloc(&mut self, new_cap: usize) {
        self.try_realloc(new_cap).throw()
    }

    /// Like [`realloc`](Buffer::realloc), but returns an error for an oversized layout. On error,
    /// the Buffer is left exactly as it was.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout size would exceed [`isize::MAX`].
    pub fn try_realloc(&mut self, new_cap: usize) -> Result<(), CapacityOverflow> {
        let new_layout = Self::make_layout(new_cap)?;

        let new_ptr = match (self.cap, new_cap) {
            _ if size_of::<T>() == 0 => {
                // Zero-sized types are never allocated, only the capacity changes.
                self.ptr
            },
            (old, new) if old == new => return Ok(()),
            (0, _) => Self::make_ptr(new_layout),
            (_, 0) => {
                // SAFETY: The old layout was valid when allocated and the pointer was allocated
                // with it by the global allocator.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.layout()) }
                NonNull::dangling()
            },
            (_, _) => {
                // SAFETY: The same layout and allocator are used for the allocation, and the new
                // layout size is > 0 and <= isize::MAX.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), self.layout(), new_layout.size())
                        .cast()
                };

                // A failed realloc leaves the old block untouched, but there's no recovering from
                // an allocation error anyway.
                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// The layout currently backing the Buffer.
    fn layout(&self) -> Layout {
        // SAFETY: This layout was already created successfully for the current capacity.
        unsafe {
            Layout::from_size_align_unchecked(
                size_of::<MaybeUninit<T>>() * self.cap,
                align_of::<MaybeUninit<T>>(),
            )
        }
    }

    /// A helper function to create a [`Layout`] for `cap` slots.
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<MaybeUninit<T>>(cap).map_err(|_| CapacityOverflow)
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    ///
    /// # Errors
    /// In the event of an allocation error, this method calls [`alloc::handle_alloc_error`] as
    /// recommended, to avoid new allocations rather than panicking.
    fn make_ptr(layout: Layout) -> NonNull<MaybeUninit<T>> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        let layout = self.layout();

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is the same as
            // when allocated. Zero-sized layouts aren't allocated and are guarded against
            // deallocation.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::dangling()
    }
}

// SAFETY: A Buffer is a unique owner of its allocation, so it is safe to send when T: Send.
unsafe impl<T: Send> Send for Buffer<T> {}
// SAFETY: A Buffer provides no shared mutation through &self, so it is Sync when T: Sync.
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Debug for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}
