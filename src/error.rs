use core::alloc::Layout;

use thiserror::Error;

/// Result alias used by the fallible `GrowVec` operations
pub type Result<T> = core::result::Result<T, GrowVecError>;

/// Error types for `GrowVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// Index is beyond the current vector length
    #[error("Index out of bounds: index {index} is beyond vector length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the vector
        length: usize,
    },
    /// Requested capacity cannot be described as an array layout
    #[error("Capacity overflow: {requested} elements exceed the addressable limit")]
    CapacityOverflow {
        /// Number of elements requested
        requested: usize,
    },
    /// The global allocator could not provide the memory
    #[error("Allocation failure: could not allocate {} bytes", .layout.size())]
    AllocationFailure {
        /// Layout that was passed to the allocator
        layout: Layout,
    },
    /// Operation requires at least one element
    #[error("Operation on empty vector")]
    EmptyVector,
}

impl GrowVecError {
    /// Turns an allocation error into the conventional abort path.
    ///
    /// `CapacityOverflow` panics, `AllocationFailure` goes through
    /// `handle_alloc_error`. Other variants panic with their message.
    #[cold]
    pub(crate) fn raise(self) -> ! {
        match self {
            GrowVecError::AllocationFailure { layout } => {
                alloc::alloc::handle_alloc_error(layout)
            }
            other => panic!("{other}"),
        }
    }
}

/// Error returned by `try_push` and `try_insert`.
///
/// The rejected value is handed back so the caller does not lose it.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("{error}")]
pub struct PushError<T> {
    /// Value that could not be stored
    pub value: T,
    /// Reason the operation failed
    pub error: GrowVecError,
}

impl<T> PushError<T> {
    /// Returns the value that was not stored.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> From<PushError<T>> for GrowVecError {
    fn from(err: PushError<T>) -> Self {
        err.error
    }
}
