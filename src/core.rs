use core::mem;
use core::ptr;
use core::slice;

use crate::error::{GrowVecError, PushError, Result};
use crate::growth::{grown_capacity, range_capacity, required_capacity};
use crate::raw::RawBuf;

/// A growable, contiguous vector that owns exactly one heap buffer
#[must_use]
pub struct GrowVec<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> GrowVec<T> {
    /// Creates an empty `GrowVec` without allocating.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty `GrowVec` with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.raise())
    }

    /// Fallible version of [`GrowVec::with_capacity`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buf: RawBuf::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Builds a `GrowVec` from a literal list, moving the values in order.
    ///
    /// The capacity is twice the list length.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_from_array<const N: usize>(list: [T; N]) -> Result<Self> {
        let mut vec = Self::try_with_capacity(range_capacity(N)?)?;
        for value in list {
            // SAFETY: capacity is 2 * N and at most N values are written.
            unsafe { vec.push_unchecked(value) };
        }
        Ok(vec)
    }

    /// Appends without checking capacity.
    ///
    /// # Safety
    ///
    /// `self.len < self.capacity()` must hold.
    #[inline]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.buf.capacity());
        // SAFETY: slot `len` is allocated and uninitialized per the contract.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        // Only count the element once it is written.
        self.len += 1;
    }

    /// Resets `self` to the empty state and returns the previous contents.
    ///
    /// The buffer is transferred, not copied; `self` ends with zero length
    /// and zero capacity.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Drops the current contents and takes over the buffer of `source`,
    /// leaving `source` empty.
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear();
        *self = source.take();
    }

    // ------------------------------------------------------------------
    // Element access

    /// Returns the element at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `pos >= len()`.
    pub fn at(&self, pos: usize) -> Result<&T> {
        let length = self.len;
        self.as_slice()
            .get(pos)
            .ok_or(GrowVecError::IndexOutOfBounds { index: pos, length })
    }

    /// Returns the element at `pos` mutably.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `pos >= len()`.
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(pos)
            .ok_or(GrowVecError::IndexOutOfBounds { index: pos, length })
    }

    /// Returns the element at `pos` without a bounds check.
    ///
    /// # Safety
    ///
    /// `pos < len()` must hold.
    #[inline]
    pub unsafe fn get_unchecked(&self, pos: usize) -> &T {
        debug_assert!(pos < self.len, "index {pos} out of bounds for length {}", self.len);
        // SAFETY: the caller guarantees `pos` names a live element.
        unsafe { &*self.buf.ptr().add(pos) }
    }

    /// Returns the element at `pos` mutably without a bounds check.
    ///
    /// # Safety
    ///
    /// `pos < len()` must hold.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, pos: usize) -> &mut T {
        debug_assert!(pos < self.len, "index {pos} out of bounds for length {}", self.len);
        // SAFETY: the caller guarantees `pos` names a live element.
        unsafe { &mut *self.buf.ptr().add(pos) }
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[must_use]
    pub fn front(&self) -> &T {
        assert!(self.len > 0, "front() called on empty vector");
        &self.as_slice()[0]
    }

    /// Returns the first element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn front_mut(&mut self) -> &mut T {
        assert!(self.len > 0, "front_mut() called on empty vector");
        &mut self.as_mut_slice()[0]
    }

    /// Returns the last live element, at index `len() - 1`.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[must_use]
    pub fn back(&self) -> &T {
        assert!(self.len > 0, "back() called on empty vector");
        &self.as_slice()[self.len - 1]
    }

    /// Returns the last live element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn back_mut(&mut self) -> &mut T {
        assert!(self.len > 0, "back_mut() called on empty vector");
        let last = self.len - 1;
        &mut self.as_mut_slice()[last]
    }

    /// Tries to return the first element.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::EmptyVector` if the vector is empty.
    pub fn try_front(&self) -> Result<&T> {
        self.as_slice().first().ok_or(GrowVecError::EmptyVector)
    }

    /// Tries to return the last element.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::EmptyVector` if the vector is empty.
    pub fn try_back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(GrowVecError::EmptyVector)
    }

    /// Live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized; the pointer is
        // non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// Live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Raw pointer to the start of the storage.
    ///
    /// Valid until the next operation that reallocates. Dangling when the
    /// capacity is zero.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable raw pointer to the start of the storage.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    // ------------------------------------------------------------------
    // Capacity

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots currently allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Upper bound on the number of elements an allocation can describe.
    ///
    /// Advisory only: the allocator will usually fail far earlier.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        let size = mem::size_of::<T>();
        if size == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / size
        }
    }

    /// Makes the capacity at least `new_capacity`.
    ///
    /// Allocates exactly `new_capacity` slots when growing; never shrinks.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn reserve(&mut self, new_capacity: usize) {
        self.try_reserve(new_capacity).unwrap_or_else(|e| e.raise());
    }

    /// Fallible version of [`GrowVec::reserve`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`;
    /// the vector is unchanged in that case.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.buf.try_relocate(self.len, new_capacity)
    }

    /// Reallocates so that the capacity equals the length.
    ///
    /// An empty vector releases its buffer entirely.
    ///
    /// # Panics
    ///
    /// Aborts through `handle_alloc_error` if the allocator fails.
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().unwrap_or_else(|e| e.raise());
    }

    /// Fallible version of [`GrowVec::shrink_to_fit`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailure`; the vector is unchanged
    /// in that case.
    pub fn try_shrink_to_fit(&mut self) -> Result<()> {
        if self.len < self.capacity() {
            self.buf.try_relocate(self.len, self.len)?;
        }
        Ok(())
    }

    /// Applies the growth policy so that `additional` more elements fit.
    fn try_grow_for(&mut self, additional: usize) -> Result<()> {
        let required = required_capacity(self.len, additional)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let new_capacity = grown_capacity(self.capacity(), required);
        self.buf.try_relocate(self.len, new_capacity)
    }

    // ------------------------------------------------------------------
    // Mutation

    /// Drops every element and releases the buffer.
    ///
    /// The capacity drops to zero; the next push allocates again.
    pub fn clear(&mut self) {
        self.drop_elements();
        self.buf.release();
    }

    fn drop_elements(&mut self) {
        let elements: *mut [T] = self.as_mut_slice();
        // Reset first so a panicking `Drop` cannot cause a double drop.
        self.len = 0;
        // SAFETY: the slice covered exactly the live elements, which are no
        // longer reachable through `self`.
        unsafe { ptr::drop_in_place(elements) };
    }

    /// Appends `value` at the back.
    ///
    /// Doubles the capacity (or allocates one slot) when full.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            err.error.raise();
        }
    }

    /// Fallible version of [`GrowVec::push`].
    ///
    /// # Errors
    ///
    /// Returns `PushError` holding `value` and the allocation error; the
    /// vector is unchanged in that case.
    pub fn try_push(&mut self, value: T) -> core::result::Result<(), PushError<T>> {
        if self.len == self.capacity() {
            if let Err(error) = self.try_grow_for(1) {
                return Err(PushError { value, error });
            }
        }
        // SAFETY: there is at least one free slot now.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the vector is empty. The capacity is kept.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was the last live element and is now outside
        // the live range, so it is read exactly once.
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Inserts `value` at index `pos`, shifting later elements back by one.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`, or on allocation failure as in [`GrowVec::push`].
    pub(crate) fn insert_index(&mut self, pos: usize, value: T) {
        if let Err(err) = self.try_insert_index(pos, value) {
            err.error.raise();
        }
    }

    pub(crate) fn try_insert_index(
        &mut self,
        pos: usize,
        value: T,
    ) -> core::result::Result<(), PushError<T>> {
        assert!(
            pos <= self.len,
            "insertion index (is {pos}) should be <= len (is {})",
            self.len
        );
        if self.len == self.capacity() {
            if let Err(error) = self.try_grow_for(1) {
                return Err(PushError { value, error });
            }
        }
        // SAFETY: `pos <= len < capacity`. `ptr::copy` handles the overlap by
        // moving the tail from its highest index down.
        unsafe {
            let slot = self.buf.ptr().add(pos);
            ptr::copy(slot, slot.add(1), self.len - pos);
            ptr::write(slot, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Splits the vector into its raw buffer and length without dropping
    /// anything.
    pub(crate) fn into_raw_parts(self) -> (RawBuf<T>, usize) {
        let mut me = mem::ManuallyDrop::new(self);
        (mem::replace(&mut me.buf, RawBuf::new()), me.len)
    }
}

impl<T: Clone> GrowVec<T> {
    /// Creates a vector of `count` clones of `value`.
    ///
    /// The capacity is exactly `count`.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn from_elem(count: usize, value: T) -> Self {
        Self::try_from_elem(count, value).unwrap_or_else(|e| e.raise())
    }

    /// Fallible version of [`GrowVec::from_elem`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_from_elem(count: usize, value: T) -> Result<Self> {
        let mut vec = Self::try_with_capacity(count)?;
        vec.fill_with_clones(count, value);
        Ok(vec)
    }

    /// Writes `count - 1` clones followed by `value` itself.
    fn fill_with_clones(&mut self, count: usize, value: T) {
        if count == 0 {
            return;
        }
        debug_assert!(self.capacity() - self.len >= count);
        for _ in 1..count {
            // SAFETY: the caller reserved `count` free slots.
            unsafe { self.push_unchecked(value.clone()) };
        }
        // SAFETY: as above, this is the last reserved slot.
        unsafe { self.push_unchecked(value) };
    }

    /// Creates a vector holding clones of the half-open range `items`.
    ///
    /// The capacity is twice the range length.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn from_slice(items: &[T]) -> Self {
        Self::try_from_slice(items).unwrap_or_else(|e| e.raise())
    }

    /// Fallible version of [`GrowVec::from_slice`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_from_slice(items: &[T]) -> Result<Self> {
        let mut vec = Self::try_with_capacity(range_capacity(items.len())?)?;
        vec.extend_from_slice_unchecked(items);
        Ok(vec)
    }

    fn extend_from_slice_unchecked(&mut self, items: &[T]) {
        debug_assert!(self.capacity() - self.len >= items.len());
        for item in items {
            // SAFETY: the caller reserved room for every item.
            unsafe { self.push_unchecked(item.clone()) };
        }
    }

    /// Copy with a capacity equal to the source's capacity.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailure` if the allocator fails.
    pub fn try_clone(&self) -> Result<Self> {
        let mut vec = Self::try_with_capacity(self.capacity())?;
        vec.extend_from_slice_unchecked(self.as_slice());
        Ok(vec)
    }

    // ------------------------------------------------------------------
    // Assignment
    //
    // Each variant builds the replacement completely before the old
    // contents are dropped; on error `self` is unchanged.

    /// Replaces the contents with a deep copy of `source`.
    ///
    /// The capacity becomes the capacity of `source`.
    ///
    /// # Panics
    ///
    /// Aborts through `handle_alloc_error` if the allocator fails.
    pub fn assign_from(&mut self, source: &Self) {
        self.try_assign_from(source).unwrap_or_else(|e| e.raise());
    }

    /// Fallible version of [`GrowVec::assign_from`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailure` if the allocator fails.
    pub fn try_assign_from(&mut self, source: &Self) -> Result<()> {
        *self = source.try_clone()?;
        Ok(())
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// A zero `count` leaves the vector empty with no allocation, otherwise
    /// the capacity is `2 * count`.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn assign_fill(&mut self, count: usize, value: T) {
        self.try_assign_fill(count, value).unwrap_or_else(|e| e.raise());
    }

    /// Fallible version of [`GrowVec::assign_fill`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_assign_fill(&mut self, count: usize, value: T) -> Result<()> {
        if count == 0 {
            self.clear();
            return Ok(());
        }
        let mut fresh = Self::try_with_capacity(range_capacity(count)?)?;
        fresh.fill_with_clones(count, value);
        *self = fresh;
        Ok(())
    }

    /// Replaces the contents with clones of the half-open range `items`.
    ///
    /// The capacity becomes `2 * items.len()`.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn assign_slice(&mut self, items: &[T]) {
        self.try_assign_slice(items).unwrap_or_else(|e| e.raise());
    }

    /// Fallible version of [`GrowVec::assign_slice`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_assign_slice(&mut self, items: &[T]) -> Result<()> {
        *self = Self::try_from_slice(items)?;
        Ok(())
    }
}

impl<T: Default> GrowVec<T> {
    /// Creates a vector of `count` default values.
    ///
    /// The capacity is exactly `count`.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn with_len(count: usize) -> Self {
        Self::try_with_len(count).unwrap_or_else(|e| e.raise())
    }

    /// Fallible version of [`GrowVec::with_len`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_with_len(count: usize) -> Result<Self> {
        let mut vec = Self::try_with_capacity(count)?;
        for _ in 0..count {
            // SAFETY: exactly `count` slots were allocated.
            unsafe { vec.push_unchecked(T::default()) };
        }
        Ok(vec)
    }
}

impl<T> GrowVec<T> {
    /// Replaces the contents with the values of a literal list.
    ///
    /// The capacity becomes twice the list length.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn assign_list<const N: usize>(&mut self, list: [T; N]) {
        self.try_assign_list(list).unwrap_or_else(|e| e.raise());
    }

    /// Fallible version of [`GrowVec::assign_list`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailure`.
    pub fn try_assign_list<const N: usize>(&mut self, list: [T; N]) -> Result<()> {
        *self = Self::try_from_array(list)?;
        Ok(())
    }
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        self.drop_elements();
        // `buf` releases the memory when its own drop runs.
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowVec<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| e.raise())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T> Extend<T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.try_grow_for(lower).unwrap_or_else(|e| e.raise());
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}
