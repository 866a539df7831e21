use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use derive_more::IsVariant;

use super::Sequence;
use crate::util::error::CursorExhausted;
use crate::util::result::ResultExtension;

/// The fixed direction in which a [`Cursor`] or [`CursorMut`] moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Direction {
    /// Towards higher indices, starting from the first element.
    Forward,
    /// Towards lower indices, starting from the last element.
    Reverse,
}

use Direction::*;

/// The logical position shared by both cursor types. `None` is the position before index 0, which
/// a reverse cursor reaches by moving past the first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Position {
    index: Option<usize>,
    dir: Direction,
}

impl Position {
    const fn start(dir: Direction, len: usize) -> Position {
        Position {
            index: match dir {
                Forward => Some(0),
                Reverse => len.checked_sub(1),
            },
            dir,
        }
    }

    const fn live(&self, len: usize) -> Option<usize> {
        match self.index {
            Some(index) if index < len => Some(index),
            _ => None,
        }
    }

    const fn advance(&mut self, len: usize) {
        self.index = match (self.dir, self.index) {
            (Forward, Some(index)) if index < len => Some(index + 1),
            (Reverse, Some(index)) => index.checked_sub(1),
            (_, index) => index,
        };
    }

    const fn remaining(&self, len: usize) -> usize {
        match (self.dir, self.live(len)) {
            (Forward, Some(index)) => len - index,
            (Reverse, Some(index)) => index + 1,
            (_, None) => 0,
        }
    }
}

impl<T> Sequence<T> {
    /// Creates a [`Cursor`] at the first element, moving forward.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let seq: Sequence<_> = (1..=3).collect();
    /// let mut cursor = seq.cursor();
    /// let mut seen = Vec::new();
    /// while cursor.has_next() {
    ///     seen.push(*cursor.get());
    ///     cursor.move_next();
    /// }
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            pos: Position::start(Forward, self.len),
            seq: self,
        }
    }

    /// Creates a [`Cursor`] at the last element, moving in reverse.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let seq: Sequence<_> = (1..=3).collect();
    /// assert_eq!(seq.cursor_rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn cursor_rev(&self) -> Cursor<'_, T> {
        Cursor {
            pos: Position::start(Reverse, self.len),
            seq: self,
        }
    }

    /// Creates a [`CursorMut`] at the first element, moving forward.
    ///
    /// # Examples
    /// ```
    /// # use sequence_sort::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (1..=3).collect();
    /// let mut cursor = seq.cursor_mut();
    /// while cursor.has_next() {
    ///     let doubled = *cursor.get() * 2;
    ///     cursor.set(doubled);
    ///     cursor.move_next();
    /// }
    /// assert_eq!(&*seq, &[2, 4, 6]);
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            pos: Position::start(Forward, self.len),
            seq: self,
        }
    }

    /// Creates a [`CursorMut`] at the last element, moving in reverse.
    pub fn cursor_rev_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            pos: Position::start(Reverse, self.len),
            seq: self,
        }
    }
}

/// A read-only cursor over a [`Sequence`], created by [`Sequence::cursor`] or
/// [`Sequence::cursor_rev`].
///
/// A Cursor holds a borrow of its Sequence alongside a logical index, so the Sequence can't grow
/// (and move its buffer) while the Cursor is alive.
///
/// A Cursor is also an [`Iterator`], yielding each element from its current position onward.
pub struct Cursor<'a, T> {
    pub(crate) seq: &'a Sequence<T>,
    pub(crate) pos: Position,
}

impl<'a, T> Cursor<'a, T> {
    /// Returns true if the Cursor points to a live element.
    pub const fn has_next(&self) -> bool {
        self.pos.live(self.seq.len).is_some()
    }

    /// Moves the Cursor one element in its direction. Moving past either end leaves the Cursor
    /// without a live element, where it stays.
    pub const fn move_next(&mut self) -> &mut Self {
        self.pos.advance(self.seq.len);
        self
    }

    /// Returns the index of the element the Cursor points to, if any.
    pub const fn index(&self) -> Option<usize> {
        self.pos.live(self.seq.len)
    }

    /// Returns the direction the Cursor moves in.
    pub const fn direction(&self) -> Direction {
        self.pos.dir
    }

    /// Returns the element the Cursor points to, if any.
    pub fn try_get(&self) -> Option<&'a T> {
        let seq: &'a Sequence<T> = self.seq;
        self.index().map(|index| &seq[index])
    }

    /// Returns the element the Cursor points to.
    ///
    /// # Panics
    /// Panics if the Cursor doesn't point to a live element.
    pub fn get(&self) -> &'a T {
        self.try_get().ok_or(CursorExhausted).throw()
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.try_get()?;
        self.move_next();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, T> ExactSizeIterator for Cursor<'a, T> {
    fn len(&self) -> usize {
        self.pos.remaining(self.seq.len)
    }
}

impl<'a, T> FusedIterator for Cursor<'a, T> {}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Cursor {
            seq: self.seq,
            pos: self.pos,
        }
    }
}

impl<'a, T: Debug> Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index())
            .field("direction", &self.pos.dir)
            .field("value", &self.try_get())
            .finish()
    }
}

/// A cursor over a [`Sequence`] that can also overwrite elements, created by
/// [`Sequence::cursor_mut`] or [`Sequence::cursor_rev_mut`].
pub struct CursorMut<'a, T> {
    pub(crate) seq: &'a mut Sequence<T>,
    pub(crate) pos: Position,
}

impl<'a, T> CursorMut<'a, T> {
    /// Returns true if the Cursor points to a live element.
    pub const fn has_next(&self) -> bool {
        self.pos.live(self.seq.len).is_some()
    }

    /// Moves the Cursor one element in its direction. Moving past either end leaves the Cursor
    /// without a live element, where it stays.
    pub const fn move_next(&mut self) -> &mut Self {
        self.pos.advance(self.seq.len);
        self
    }

    /// Returns the index of the element the Cursor points to, if any.
    pub const fn index(&self) -> Option<usize> {
        self.pos.live(self.seq.len)
    }

    /// Returns the direction the Cursor moves in.
    pub const fn direction(&self) -> Direction {
        self.pos.dir
    }

    /// Returns the element the Cursor points to, if any.
    pub fn try_get(&self) -> Option<&T> {
        match self.index() {
            Some(index) => Some(&self.seq[index]),
            None => None,
        }
    }

    /// Returns the element the Cursor points to, mutably, if any.
    pub fn try_get_mut(&mut self) -> Option<&mut T> {
        match self.index() {
            Some(index) => Some(&mut self.seq[index]),
            None => None,
        }
    }

    /// Returns the element the Cursor points to.
    ///
    /// # Panics
    /// Panics if the Cursor doesn't point to a live element.
    pub fn get(&self) -> &T {
        self.try_get().ok_or(CursorExhausted).throw()
    }

    /// Returns the element the Cursor points to, mutably.
    ///
    /// # Panics
    /// Panics if the Cursor doesn't point to a live element.
    pub fn get_mut(&mut self) -> &mut T {
        self.try_get_mut().ok_or(CursorExhausted).throw()
    }

    /// Overwrites the element the Cursor points to, dropping the old value.
    ///
    /// # Panics
    /// Panics if the Cursor doesn't point to a live element.
    pub fn set(&mut self, value: T) {
        *self.get_mut() = value;
    }
}

impl<'a, T: Debug> Debug for CursorMut<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index())
            .field("direction", &self.pos.dir)
            .field("value", &self.try_get())
            .finish()
    }
}
