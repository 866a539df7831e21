#![cfg(test)]

use std::mem::MaybeUninit;

use super::*;
use crate::util::alloc::ZeroSizedType;
use crate::util::panic::assert_panics;

#[test]
fn test_zst_support() {
    let mut buf = Buffer::<ZeroSizedType>::with_cap(5);
    assert_eq!(buf.cap(), 5);

    let old_ptr = buf.ptr;
    buf.realloc(30);
    assert_eq!(buf.cap(), 30);
    assert_eq!(
        buf.ptr, old_ptr,
        "Pointer shouldn't change when reallocated for a ZST."
    );
}

#[test]
fn test_realloc() {
    let mut buf = Buffer::<usize>::with_cap(5);
    for (i, slot) in buf.slots_mut().iter_mut().enumerate() {
        *slot = MaybeUninit::new(i);
    }

    let old_ptr = buf.ptr;
    buf.realloc(5);
    assert_eq!(
        buf.ptr, old_ptr,
        "When reallocating to the same size, the pointer shouldn't change."
    );

    buf.realloc(40);
    assert_eq!(buf.cap(), 40);
    for i in 0..5 {
        assert_eq!(
            // SAFETY: The first 5 slots were initialized above and realloc preserves them.
            unsafe { buf.slots_mut()[i].assume_init() },
            i,
            "When growing, all initialized slots should keep their values."
        );
    }

    buf.realloc(0);
    assert_eq!(buf.cap(), 0);
    assert_eq!(
        buf.ptr,
        std::ptr::NonNull::dangling(),
        "Pointer should be replaced with a dangling one for 0 capacity."
    );

    buf.realloc(3);
    assert_eq!(buf.cap(), 3);
}

#[test]
fn test_capacity_overflow() {
    let mut buf = Buffer::<u32>::with_cap(4);
    assert!(buf.try_realloc(usize::MAX / 2).is_err());
    assert_eq!(buf.cap(), 4, "A failed realloc should leave the Buffer unchanged.");

    assert!(Buffer::<u32>::try_with_cap(isize::MAX as usize).is_err());

    assert_panics!({
        Buffer::<u64>::with_cap(isize::MAX as usize + 1);
    });
}
