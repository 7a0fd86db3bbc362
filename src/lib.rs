#![no_std]

//! `GrowVec`: a growable, contiguous vector that owns exactly one heap buffer.
//!
//! `GrowVec<T>` stores an ordered sequence of `T` in a single allocation,
//! offers checked and unchecked random access, cursor-based positions, and
//! manages its capacity explicitly: appends double the capacity when full,
//! `reserve` and `shrink_to_fit` resize to an exact slot count, and `clear`
//! gives the memory back.
//!
//! This crate is `no_std` compatible; it only needs the `alloc` crate.
//!
//! # Capacity Rules
//!
//! Capacity is always counted in elements, never bytes.
//!
//! | Operation | Resulting capacity |
//! |-----------|--------------------|
//! | `new()` | 0, no allocation |
//! | `with_len(n)`, `from_elem(n, v)` | `n` |
//! | `from_slice`, `from_cursors`, `From<[T; N]>`, `growvec![a, b, ..]` | 2 × element count |
//! | `clone()`, `assign_from` | capacity of the source |
//! | `assign_slice`, `assign_list`, `assign_fill(n, v)` | 2 × element count (0 for an empty fill) |
//! | `push`, `insert` on a full vector | `max(1, 2 × capacity)` |
//! | `reserve(n)` | `n` if larger than the current capacity, else unchanged |
//! | `shrink_to_fit()` | `len()` |
//! | `clear()` | 0, buffer released |
//!
//! ```
//! # use growvec::GrowVec;
//! let mut v = GrowVec::new();
//! assert_eq!(v.capacity(), 0);
//!
//! v.push(1);
//! v.push(2);
//! v.push(3);
//! assert_eq!(v.capacity(), 4);
//!
//! v.shrink_to_fit();
//! assert_eq!(v.capacity(), 3);
//!
//! v.clear();
//! assert_eq!(v.capacity(), 0);
//! ```
//!
//! ## Time Complexity
//! - `push()`: amortized O(1), N pushes cause O(log N) reallocations
//! - `pop()`, `at()`, indexing: O(1)
//! - `insert()`: O(len) for the shift
//! - `reserve()`, `shrink_to_fit()`, `clone()`, assignment: O(len)
//!
//! # Error Handling
//!
//! Checked access returns `GrowVecError::IndexOutOfBounds`:
//!
//! ```
//! # use growvec::{growvec, GrowVecError};
//! let v = growvec![10, 20];
//! assert_eq!(v.at(1), Ok(&20));
//! assert_eq!(
//!     v.at(2),
//!     Err(GrowVecError::IndexOutOfBounds { index: 2, length: 2 })
//! );
//! ```
//!
//! Every allocating operation has a `try_` variant that reports
//! `CapacityOverflow` or `AllocationFailure` and leaves the vector as it
//! was. The plain variants panic on overflow and abort through
//! `handle_alloc_error` when the allocator fails.
//!
//! ```
//! # use growvec::{GrowVec, GrowVecError};
//! let mut v: GrowVec<u64> = GrowVec::new();
//! v.push(7);
//! let err = v.try_reserve(usize::MAX).unwrap_err();
//! assert_eq!(err, GrowVecError::CapacityOverflow { requested: usize::MAX });
//! assert_eq!(v.len(), 1);
//! assert_eq!(v.capacity(), 1);
//! ```
//!
//! # Cursors
//!
//! A [`Cursor`] is a position inside the vector. It supports arithmetic and
//! comparison and is dereferenced through the vector:
//!
//! ```
//! # use growvec::growvec;
//! let mut v = growvec![1, 2, 3];
//! let at = v.insert(v.begin() + 1, 99);
//! assert_eq!(v[at], 99);
//! assert_eq!(v, [1, 99, 2, 3]);
//! assert_eq!(v.end() - v.begin(), 4);
//!
//! v.pop();
//! v.pop();
//! assert_eq!(v, [1, 99]);
//! ```
//!
//! Any operation that reallocates or shifts elements invalidates cursors
//! obtained earlier. Because a cursor is an index, a stale one cannot touch
//! freed memory, but it may name a different element.
//!
//! # Ownership Transfer
//!
//! `take()` and `move_from()` move the buffer without copying and leave the
//! source empty:
//!
//! ```
//! # use growvec::growvec;
//! let mut a = growvec![1, 2, 3];
//! let b = a.take();
//! assert_eq!(a.len(), 0);
//! assert_eq!(a.capacity(), 0);
//! assert_eq!(b, [1, 2, 3]);
//! ```
//!
//! # Logging
//!
//! Buffer allocation, relocation and release emit `tracing` events at the
//! `trace` level; failed allocations are reported at `debug`. Both levels
//! are compiled out of release builds.

extern crate alloc;

mod core;
mod cursor;
mod error;
mod growth;
mod impls;
mod iter;
mod macros;
mod raw;

// Re-export public types and traits
pub use crate::core::GrowVec;
pub use crate::cursor::Cursor;
pub use crate::error::{GrowVecError, PushError, Result};
pub use crate::growth::{grown_capacity, range_capacity, GROWTH_FACTOR, RANGE_CAPACITY_FACTOR};
pub use crate::iter::{IntoIter, Iter, IterMut};
