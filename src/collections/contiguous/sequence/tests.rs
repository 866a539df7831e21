#![cfg(test)]

use std::hash::{BuildHasher, RandomState};
use std::iter;

use super::*;
use crate::collections::contiguous::{CapacityOverflow, IndexOutOfBounds, InsertError};
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

fn seq_of<T>(items: impl IntoIterator<Item = T>) -> Sequence<T> {
    items.into_iter().collect()
}

#[test]
fn test_construction() {
    let seq = Sequence::<i32>::new();
    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), Sequence::<i32>::DEFAULT_CAP);

    assert_eq!(Sequence::<i32>::with_cap(20).cap(), 20);
    assert_eq!(
        Sequence::<i32>::with_cap(0).cap(),
        Sequence::<i32>::DEFAULT_CAP,
        "A requested capacity of 0 should be replaced with the default."
    );

    let empty = Sequence::<String>::empty();
    assert_eq!((empty.len(), empty.cap()), (0, 0));
}

#[test]
fn test_push_returns_index() {
    let mut seq = Sequence::with_cap(10);
    assert_eq!(seq.push(42), 0);
    assert_eq!(seq.push(100), 1);
    assert_eq!(seq.len(), 2);
    assert_eq!(*seq.at(0), 42);
    assert_eq!(*seq.at(1), 100);
}

#[test]
fn test_insert_at_index() {
    let mut seq = seq_of([1, 2, 3]);
    assert_eq!(seq.insert(1, 99), 1);
    assert_eq!(&*seq, &[1, 99, 2, 3]);

    assert_eq!(seq.insert(0, -1), 0, "Inserting at the front should shift everything.");
    assert_eq!(&*seq, &[-1, 1, 99, 2, 3]);

    let len = seq.len();
    assert_eq!(seq.insert(len, 7), len, "Inserting at len should append.");
    assert_eq!(&*seq, &[-1, 1, 99, 2, 3, 7]);

    let mut empty = Sequence::empty();
    empty.insert(0, "only");
    assert_eq!(&*empty, &["only"]);
}

#[test]
fn test_insert_triggers_growth() {
    let mut seq = Sequence::with_cap(4);
    seq.extend([0, 1, 2, 3]);
    assert_eq!(seq.cap(), 4);

    seq.insert(2, 100);
    assert_eq!(seq.cap(), 8, "A full Sequence should double before inserting.");
    assert_eq!(&*seq, &[0, 1, 100, 2, 3]);
}

#[test]
fn test_multiple_growths() {
    let mut seq = Sequence::with_cap(2);
    let mut caps = vec![seq.cap()];

    for i in 0..100 {
        assert_eq!(seq.push(i), i);
        if *caps.last().unwrap() != seq.cap() {
            caps.push(seq.cap());
        }
    }

    assert_eq!(caps, [2, 4, 8, 16, 32, 64, 128], "Growth should double the capacity.");
    assert!(
        seq.iter().copied().eq(0..100),
        "All elements should survive every reallocation in order."
    );

    let mut seq = Sequence::empty();
    seq.push(1);
    assert_eq!(seq.cap(), Sequence::<i32>::DEFAULT_CAP, "Capacity 0 should grow to the default.");
}

#[test]
fn test_small_capacity_growth() {
    let mut seq = Sequence::with_cap(1);
    seq.push(1);
    seq.push(2);
    assert_eq!(seq.cap(), 2, "Small capacities should double, not jump to the default.");

    let mut seq = Sequence::with_cap(3);
    for i in 1..=4 {
        seq.push(i);
    }
    assert_eq!(seq.cap(), 6);
    assert_eq!(&*seq, &[1, 2, 3, 4]);

    let mut seq = Sequence::with_cap(3);
    for i in 1..=3 {
        seq.push(i);
    }
    seq.insert(0, 0);
    assert_eq!(seq.cap(), 6, "Insertion should grow the same way as push.");
    assert_eq!(&*seq, &[0, 1, 2, 3]);
}

#[test]
fn test_remove() {
    let mut seq = seq_of(10..15);
    assert_eq!(seq.remove(2), 12);
    assert_eq!(&*seq, &[10, 11, 13, 14]);

    assert_eq!(seq.remove(0), 10);
    assert_eq!(&*seq, &[11, 13, 14]);

    assert_eq!(seq.remove(2), 14);
    assert_eq!(&*seq, &[11, 13]);

    seq.remove(0);
    seq.remove(0);
    assert!(seq.is_empty());
}

#[test]
fn test_len_tracks_inserts_and_removes() {
    let mut seq = Sequence::new();
    let mut model = Vec::new();

    for i in 0..200_usize {
        match i % 5 {
            0 | 1 => {
                seq.push(i);
                model.push(i);
            },
            2 => {
                let index = i % (seq.len() + 1);
                seq.insert(index, i);
                model.insert(index, i);
            },
            _ if !seq.is_empty() => {
                let index = (i * 7) % seq.len();
                assert_eq!(seq.remove(index), model.remove(index));
            },
            _ => (),
        }
        assert_eq!(seq.len(), model.len());
    }

    assert_eq!(&*seq, &*model);
}

#[test]
fn test_index_preconditions() {
    assert_panics!({
        let seq = seq_of([1, 2, 3]);
        seq.at(3);
    });
    assert_panics!({
        let mut seq = seq_of([1, 2, 3]);
        seq.remove(3);
    });
    assert_panics!({
        let mut seq = seq_of([1, 2, 3]);
        seq.insert(4, 0);
    });
    assert_panics!({
        let mut seq: Sequence<u8> = Sequence::new();
        seq.at_mut(0);
    });

    let mut seq = seq_of([1, 2, 3]);
    assert_eq!(
        seq.try_insert(5, 0),
        Err(InsertError::IndexOutOfBounds(IndexOutOfBounds { index: 5, len: 3 }))
    );
    assert_eq!(seq.try_remove(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(
        IndexOutOfBounds { index: 3, len: 3 }.to_string(),
        "Index 3 out of bounds for collection with 3 elements!"
    );
    assert_eq!(&*seq, &[1, 2, 3], "Failed operations should leave the Sequence unchanged.");
}

#[test]
fn test_capacity_overflow() {
    let mut seq = Sequence::<u64>::with_cap(1);
    seq.push(1);
    // Force the capacity near the limit without allocating, so the next growth overflows.
    seq.buf.cap = usize::MAX / 2 + 1;
    seq.len = seq.buf.cap;

    let error = seq.grow().unwrap_err();
    assert_eq!(error, CapacityOverflow);
    assert!(InsertError::from(error).is_capacity_overflow());

    // Restore the real state so the Sequence can be dropped.
    seq.buf.cap = 1;
    seq.len = 1;
}

#[test]
fn test_at_and_indexing() {
    let mut seq = seq_of(["zero", "one", "two"]);
    assert_eq!(*seq.at(1), "one");
    assert_eq!(seq[2], "two");
    assert_eq!(seq.get(3), None);

    *seq.at_mut(0) = "ZERO";
    seq[1] = "ONE";
    assert_eq!(seq.replace(2, "TWO"), "two");
    assert_eq!(&*seq, &["ZERO", "ONE", "TWO"]);
}

#[test]
fn test_clone_is_deep() {
    let mut source = Sequence::with_cap(12);
    source.extend([1, 2, 3]);

    let mut copy = source.clone();
    assert_eq!(copy, source);
    assert_eq!(copy.cap(), 12, "A clone should keep the capacity of its source.");
    assert_ne!(copy.as_ptr(), source.as_ptr(), "A clone should own its own buffer.");

    copy[0] = 99;
    assert_eq!(source[0], 1, "Mutating the copy shouldn't affect the source.");

    source.push(4);
    source[1] = 98;
    assert_eq!(&*copy, &[99, 2, 3], "Mutating the source shouldn't affect the copy.");
}

#[test]
fn test_clone_from() {
    let source = seq_of(["a".to_string(), "b".to_string()]);
    let mut target = seq_of(["x".to_string(), "y".to_string(), "z".to_string()]);

    target.clone_from(&source);
    assert_eq!(target, source);

    target[0].push('!');
    assert_eq!(source[0], "a");

    let mut small = Sequence::with_cap(1);
    small.push(String::new());
    let big = seq_of((0..50).map(|i| i.to_string()));
    small.clone_from(&big);
    assert_eq!(small, big, "clone_from should grow when the target is too small.");

    // Assigning a clone of itself goes through a temporary, so the contents are preserved.
    let mut same = seq_of([1, 2, 3]);
    same.clone_from(&same.clone());
    assert_eq!(&*same, &[1, 2, 3]);
}

#[test]
fn test_take() {
    let mut source = seq_of([1, 2]);
    let ptr = source.as_ptr();

    let target = source.take();
    assert_eq!(&*target, &[1, 2]);
    assert_eq!(target.as_ptr(), ptr, "Moving should transfer the buffer, not copy it.");
    assert_eq!((source.len(), source.cap()), (0, 0), "The source should be left empty.");

    source.push(3);
    source.push(4);
    assert_eq!(&*source, &[3, 4], "A moved-from Sequence should stay usable.");

    let mut assigned = seq_of([9, 9, 9]);
    assert_eq!(assigned.len(), 3);
    assigned = source.take();
    assert_eq!(&*assigned, &[3, 4]);
    assert!(source.is_empty());

    // Taking from itself through the only handle leaves a valid, empty Sequence behind.
    assigned = assigned.take();
    assert_eq!(&*assigned, &[3, 4]);
}

#[test]
fn test_pop_clear_reserve() {
    let mut seq = seq_of(0..5);
    assert_eq!(seq.pop(), Some(4));
    assert_eq!(seq.len(), 4);

    let cap = seq.cap();
    seq.clear();
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), cap, "Clearing should keep the allocation.");
    assert_eq!(seq.pop(), None);

    seq.reserve(100);
    assert!(seq.cap() >= 100);
    let cap = seq.cap();
    seq.reserve(10);
    assert_eq!(seq.cap(), cap, "Reserving available capacity shouldn't reallocate.");
}

#[test]
fn test_forward_cursor() {
    let seq = seq_of(1..=5);
    let mut cursor = seq.cursor();
    assert_eq!(cursor.direction(), Direction::Forward);

    let mut visited = Vec::new();
    while cursor.has_next() {
        visited.push(*cursor.get());
        cursor.move_next();
    }
    assert_eq!(visited, [1, 2, 3, 4, 5], "Should visit every element in index order.");
    assert_eq!(cursor.index(), None);
    assert_eq!(cursor.try_get(), None);

    cursor.move_next();
    assert!(!cursor.has_next(), "Moving past the end should stay past the end.");
}

#[test]
fn test_reverse_cursor() {
    let seq = seq_of(1..=5);
    let mut cursor = seq.cursor_rev();
    assert!(cursor.direction().is_reverse());
    assert_eq!(cursor.index(), Some(4));

    let mut visited = Vec::new();
    while cursor.has_next() {
        visited.push(*cursor.get());
        cursor.move_next();
    }
    assert_eq!(visited, [5, 4, 3, 2, 1], "Should visit every element in reverse index order.");

    cursor.move_next();
    assert!(!cursor.has_next(), "Moving before the start should stay before the start.");
}

#[test]
fn test_cursor_on_empty() {
    let seq = Sequence::<u8>::new();
    assert!(!seq.cursor().has_next());
    assert!(!seq.cursor_rev().has_next());
    assert_eq!(seq.cursor().count(), 0);

    let mut seq = Sequence::<u8>::empty();
    assert!(!seq.cursor_mut().has_next());
    assert!(!seq.cursor_rev_mut().has_next());

    assert_panics!({
        let seq = Sequence::<u8>::new();
        seq.cursor().get();
    });
}

#[test]
fn test_cursor_as_iterator() {
    let seq = seq_of(["a", "b", "c"]);

    let mut cursor = seq.cursor();
    assert_eq!(cursor.len(), 3);
    cursor.move_next();
    assert_eq!(cursor.len(), 2);
    assert_eq!(cursor.collect::<Vec<_>>(), [&"b", &"c"]);

    let mut joined = String::new();
    for item in seq.cursor_rev() {
        joined.push_str(item);
    }
    assert_eq!(joined, "cba");
}

#[test]
fn test_cursor_mut() {
    let mut seq = seq_of(0..4);

    let mut cursor = seq.cursor_mut();
    while cursor.has_next() {
        let value = *cursor.get();
        cursor.set(value * 10);
        cursor.move_next();
    }
    assert_eq!(&*seq, &[0, 10, 20, 30]);

    let mut cursor = seq.cursor_rev_mut();
    *cursor.get_mut() += 1;
    cursor.move_next().move_next();
    cursor.set(-1);
    assert_eq!(&*seq, &[0, -1, 20, 31]);
}

#[test]
fn test_borrowed_iteration() {
    let mut seq = seq_of(1..=4);

    let mut sum = 0;
    for value in &seq {
        sum += value;
    }
    assert_eq!(sum, 10);

    for value in &mut seq {
        *value *= 2;
    }
    assert_eq!(&*seq, &[2, 4, 6, 8]);
    assert_eq!(seq.iter().rev().copied().collect::<Vec<_>>(), [8, 6, 4, 2]);
}

#[test]
fn test_owned_iteration() {
    let seq = seq_of(["w", "x", "y", "z"].map(String::from));

    let mut iter = seq.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next().as_deref(), Some("w"));
    assert_eq!(iter.next_back().as_deref(), Some("z"));
    assert_eq!(iter.as_slice(), ["x", "y"]);
    assert_eq!(iter.collect::<Vec<_>>(), ["x", "y"]);
}

#[test]
fn test_strings() {
    let mut seq = Sequence::with_cap(5);
    seq.push("hello".to_string());
    seq.push("world".to_string());
    seq.insert(1, "there".to_string());

    assert_eq!(seq.remove(0), "hello");
    assert_eq!(&*seq, &["there", "world"]);
}

#[test]
fn test_move_only_elements() {
    let mut seq: Sequence<Box<u32>> = Sequence::with_cap(2);
    for i in 0..10 {
        seq.insert(seq.len() / 2, Box::new(i));
    }
    let removed = seq.remove(3);
    seq.sort();

    assert_eq!(seq.len(), 9);
    assert!(seq.is_sorted());
    assert!(!seq.contains(&removed));
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let seq = seq_of(iter::repeat_with(|| counter.clone()).take(10));

    drop(seq);
    assert_eq!(counter.drops(), 10, "10 elements should have been dropped.");
}

#[test]
fn test_drop_through_mutation() {
    let counter = CountedDrop::new();
    let mut seq = Sequence::with_cap(2);

    for _ in 0..20 {
        seq.push(counter.clone());
    }
    assert_eq!(counter.drops(), 0, "Growth should move elements, never drop them.");

    seq.insert(5, counter.clone());
    seq.insert(0, counter.clone());
    assert_eq!(counter.drops(), 0, "Shifting should move elements, never drop them.");

    drop(seq.remove(3));
    drop(seq.remove(0));
    assert_eq!(counter.drops(), 2, "Only the removed elements should be dropped.");

    seq.replace(0, counter.clone());
    assert_eq!(counter.drops(), 3);

    let mut cursor = seq.cursor_mut();
    cursor.set(counter.clone());
    assert_eq!(counter.drops(), 4);

    seq.pop();
    seq.clear();
    assert_eq!(counter.drops(), 24, "Every live element should be dropped exactly once.");

    seq.push(counter.clone());
    let mut taken = seq.take();
    taken.push(counter.clone());
    drop(seq);
    assert_eq!(counter.drops(), 24, "A moved-from Sequence owns nothing to drop.");
    drop(taken);
    assert_eq!(counter.drops(), 26);
}

#[test]
fn test_owned_iteration_drop() {
    let counter = CountedDrop::new();
    let seq = seq_of(iter::repeat_with(|| counter.clone()).take(10));

    let mut iter = seq.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(counter.drops(), 2);

    drop(iter);
    assert_eq!(counter.drops(), 10, "Dropping an owned iterator should drop the rest.");
}

#[test]
fn test_zst_support() {
    let mut seq = Sequence::new();
    for _ in 0..100 {
        seq.push(ZeroSizedType);
    }
    seq.insert(50, ZeroSizedType);
    seq.remove(0);
    seq.sort();

    assert_eq!(seq.len(), 100);
    assert_eq!(seq.cursor_rev().count(), 100);
    assert_eq!(seq.into_iter().count(), 100);
}

#[test]
fn test_equality_hash_and_format() {
    let seq = seq_of(0_usize..5);
    assert_eq!(seq, seq_of([0, 1, 2, 3, 4]));
    assert_ne!(seq, seq_of([0, 1, 2, 5, 4]));
    assert_eq!(
        seq_of([1, 2]),
        {
            let mut other = Sequence::<i32>::with_cap(40);
            other.extend(&[1, 2]);
            other
        },
        "Capacity shouldn't affect equality."
    );

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&seq),
        state.hash_one([0_usize, 1, 2, 3, 4].as_slice()),
        "A Sequence should hash like its slice."
    );

    let mut small = Sequence::with_cap(3);
    small.extend([1, 2]);
    assert_eq!(format!("{small}"), "[1, 2]");
    assert_eq!(format!("{small:?}"), "Sequence { contents: [1, 2], len: 2, cap: 3 }");
}
