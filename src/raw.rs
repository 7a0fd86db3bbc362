use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::{GrowVecError, Result};

/// Owner of one heap allocation of `cap` element slots.
///
/// `RawBuf` knows nothing about which slots are initialized; the owning
/// container tracks that and drops elements itself. Dropping a `RawBuf`
/// only releases the memory.
///
/// Zero-sized element types never allocate: the pointer stays dangling and
/// `cap` is purely logical.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: `RawBuf` owns its allocation exclusively, like `Box<[T]>`.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: shared access only hands out shared references to `T`.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Empty buffer, no allocation.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for exactly `cap` elements.
    ///
    /// # Errors
    ///
    /// - `GrowVecError::CapacityOverflow` if `cap` elements exceed `isize::MAX` bytes
    /// - `GrowVecError::AllocationFailure` if the allocator returns null
    pub(crate) fn try_with_capacity(cap: usize) -> Result<Self> {
        if cap == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout_for(cap)?;
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        // SAFETY: `layout` has a non-zero size, checked by `IS_ZST` and `cap > 0`.
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            tracing::debug!(capacity = cap, bytes = layout.size(), "allocation failed");
            return Err(GrowVecError::AllocationFailure { layout });
        };
        tracing::trace!(capacity = cap, bytes = layout.size(), "allocated buffer");

        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    fn layout_for(cap: usize) -> Result<Layout> {
        Layout::array::<T>(cap).map_err(|_| GrowVecError::CapacityOverflow { requested: cap })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves the first `len` elements into a fresh allocation of exactly
    /// `new_cap` slots and releases the old one.
    ///
    /// On error `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Same as `try_with_capacity`.
    pub(crate) fn try_relocate(&mut self, len: usize, new_cap: usize) -> Result<()> {
        debug_assert!(len <= new_cap, "relocation would lose live elements");
        debug_assert!(len <= self.cap, "more live elements than slots");

        let fresh = Self::try_with_capacity(new_cap)?;
        // SAFETY: both buffers hold at least `len` slots and are distinct
        // allocations (or dangling with a zero-sized copy).
        unsafe {
            ptr::copy_nonoverlapping(self.ptr(), fresh.ptr(), len);
        }
        tracing::trace!(
            old_capacity = self.cap,
            new_capacity = new_cap,
            len,
            "relocated buffer"
        );
        // The old elements now live in `fresh`; the replaced buffer only
        // releases memory when dropped.
        drop(mem::replace(self, fresh));
        Ok(())
    }

    /// Releases the allocation and returns to the empty state.
    ///
    /// Elements are not dropped.
    pub(crate) fn release(&mut self) {
        drop(mem::replace(self, Self::new()));
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 || Self::IS_ZST {
            return;
        }
        // The layout was valid when the buffer was allocated.
        if let Ok(layout) = Self::layout_for(self.cap) {
            tracing::trace!(capacity = self.cap, "released buffer");
            // SAFETY: `ptr` was returned by `alloc` with this same layout.
            unsafe {
                dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_does_not_allocate() {
        let buf = RawBuf::<u64>::new();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn test_capacity_in_elements() {
        let buf = RawBuf::<u64>::try_with_capacity(5).unwrap();
        assert_eq!(buf.capacity(), 5);
        assert_ne!(buf.ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn test_capacity_overflow() {
        let result = RawBuf::<u64>::try_with_capacity(usize::MAX / 4);
        assert!(matches!(
            result,
            Err(GrowVecError::CapacityOverflow { requested }) if requested == usize::MAX / 4
        ));
    }

    #[test]
    fn test_zero_sized_type_is_logical_only() {
        let buf = RawBuf::<()>::try_with_capacity(usize::MAX).unwrap();
        assert_eq!(buf.capacity(), usize::MAX);
        assert_eq!(buf.ptr(), NonNull::<()>::dangling().as_ptr());
    }

    #[test]
    fn test_relocate_preserves_prefix() {
        let mut buf = RawBuf::<u32>::try_with_capacity(2).unwrap();
        unsafe {
            buf.ptr().write(7);
            buf.ptr().add(1).write(9);
        }
        buf.try_relocate(2, 8).unwrap();
        assert_eq!(buf.capacity(), 8);
        unsafe {
            assert_eq!(buf.ptr().read(), 7);
            assert_eq!(buf.ptr().add(1).read(), 9);
        }

        buf.try_relocate(2, 2).unwrap();
        assert_eq!(buf.capacity(), 2);
        unsafe {
            assert_eq!(buf.ptr().add(1).read(), 9);
        }
    }

    #[test]
    fn test_failed_relocate_leaves_buffer() {
        let mut buf = RawBuf::<u64>::try_with_capacity(3).unwrap();
        let before = buf.ptr();
        assert!(buf.try_relocate(0, usize::MAX / 2).is_err());
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.ptr(), before);
    }

    #[test]
    fn test_release_resets() {
        let mut buf = RawBuf::<u8>::try_with_capacity(16).unwrap();
        buf.release();
        assert_eq!(buf.capacity(), 0);
    }
}
