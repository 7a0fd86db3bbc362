//! Random-access positions into a `GrowVec`.
//!
//! A [`Cursor`] is an element index relative to the start of a vector's
//! buffer. It does not borrow the vector, so it can be held across
//! mutations, but any operation that reallocates or restructures the
//! vector (push past capacity, insert, reserve, shrink, assign, clear)
//! invalidates it logically: it may afterwards name a different element or
//! lie past the end. Dereferencing goes through the vector and is bounds
//! checked, so a stale cursor never reads freed memory.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};

use crate::core::GrowVec;
use crate::error::PushError;

/// Position of an element inside a `GrowVec<T>`
pub struct Cursor<T> {
    pos: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    #[must_use]
    pub const fn new(pos: usize) -> Self {
        Self {
            pos,
            _marker: PhantomData,
        }
    }

    /// Element index this cursor refers to.
    #[must_use]
    pub const fn index(self) -> usize {
        self.pos
    }

    /// Moves the cursor by a signed number of elements.
    ///
    /// # Panics
    ///
    /// Panics if the result would be before position 0 or past `usize::MAX`.
    #[must_use]
    pub fn offset(self, delta: isize) -> Self {
        match self.pos.checked_add_signed(delta) {
            Some(pos) => Self::new(pos),
            None => panic!("cursor at {} cannot move by {delta}", self.pos),
        }
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.pos).finish()
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> PartialOrd for Cursor<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl<T> Hash for Cursor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl<T> Add<usize> for Cursor<T> {
    type Output = Self;

    fn add(self, n: usize) -> Self {
        match self.pos.checked_add(n) {
            Some(pos) => Self::new(pos),
            None => panic!("cursor at {} cannot advance by {n}", self.pos),
        }
    }
}

impl<T> Sub<usize> for Cursor<T> {
    type Output = Self;

    fn sub(self, n: usize) -> Self {
        match self.pos.checked_sub(n) {
            Some(pos) => Self::new(pos),
            None => panic!("cursor at {} cannot retreat by {n}", self.pos),
        }
    }
}

impl<T> AddAssign<usize> for Cursor<T> {
    fn add_assign(&mut self, n: usize) {
        *self = *self + n;
    }
}

impl<T> SubAssign<usize> for Cursor<T> {
    fn sub_assign(&mut self, n: usize) {
        *self = *self - n;
    }
}

/// Signed number of elements between two cursors.
impl<T> Sub for Cursor<T> {
    type Output = isize;

    #[allow(clippy::cast_possible_wrap)]
    fn sub(self, other: Self) -> isize {
        (self.pos as isize).wrapping_sub(other.pos as isize)
    }
}

impl<T> GrowVec<T> {
    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(0)
    }

    /// Cursor one past the last live element.
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self.len())
    }

    /// Cursor at index `pos`. Not checked against the length.
    pub fn cursor_at(&self, pos: usize) -> Cursor<T> {
        Cursor::new(pos)
    }

    /// Element under `cursor`, or `None` if it is past the end.
    #[must_use]
    pub fn get_at(&self, cursor: Cursor<T>) -> Option<&T> {
        self.as_slice().get(cursor.index())
    }

    /// Mutable element under `cursor`, or `None` if it is past the end.
    pub fn get_at_mut(&mut self, cursor: Cursor<T>) -> Option<&mut T> {
        self.as_mut_slice().get_mut(cursor.index())
    }

    /// Elements in the half-open range `[first, last)`.
    ///
    /// # Panics
    ///
    /// Panics if `first > last` or `last` is past the end.
    #[must_use]
    pub fn range(&self, first: Cursor<T>, last: Cursor<T>) -> &[T] {
        &self.as_slice()[first.index()..last.index()]
    }

    /// Inserts `value` before `pos` and returns a cursor to it.
    ///
    /// Grows by the usual policy when full, then shifts every element at or
    /// after `pos` one slot toward the back.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past `end()`, on capacity overflow, or aborts
    /// through `handle_alloc_error` if the allocator fails.
    pub fn insert(&mut self, pos: Cursor<T>, value: T) -> Cursor<T> {
        self.insert_index(pos.index(), value);
        pos
    }

    /// Fallible version of [`GrowVec::insert`].
    ///
    /// # Errors
    ///
    /// Returns `PushError` holding `value` when the buffer cannot grow; the
    /// vector is unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past `end()`.
    pub fn try_insert(
        &mut self,
        pos: Cursor<T>,
        value: T,
    ) -> Result<Cursor<T>, PushError<T>> {
        self.try_insert_index(pos.index(), value)?;
        Ok(pos)
    }
}

impl<T: Clone> GrowVec<T> {
    /// Creates a vector holding clones of `source[first..last]`.
    ///
    /// The capacity is twice the distance between the cursors.
    ///
    /// # Panics
    ///
    /// Panics if the range is not within `source`, on capacity overflow,
    /// or aborts through `handle_alloc_error` if the allocator fails.
    pub fn from_cursors(source: &GrowVec<T>, first: Cursor<T>, last: Cursor<T>) -> Self {
        Self::from_slice(source.range(first, last))
    }

    /// Fallible version of [`GrowVec::from_cursors`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    ///
    /// # Panics
    ///
    /// Panics if the range is not within `source`.
    pub fn try_from_cursors(
        source: &GrowVec<T>,
        first: Cursor<T>,
        last: Cursor<T>,
    ) -> crate::Result<Self> {
        Self::try_from_slice(source.range(first, last))
    }
}

impl<T> Index<Cursor<T>> for GrowVec<T> {
    type Output = T;

    fn index(&self, cursor: Cursor<T>) -> &T {
        &self.as_slice()[cursor.index()]
    }
}

impl<T> IndexMut<Cursor<T>> for GrowVec<T> {
    fn index_mut(&mut self, cursor: Cursor<T>) -> &mut T {
        &mut self.as_mut_slice()[cursor.index()]
    }
}
