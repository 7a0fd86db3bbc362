//! Capacity policy shared by every operation that has to make room.

use crate::error::{GrowVecError, Result};

/// Multiplier applied to the current capacity when a push or insert finds
/// the buffer full.
pub const GROWTH_FACTOR: usize = 2;

/// Multiplier applied to the element count when building from a range or
/// a literal list.
pub const RANGE_CAPACITY_FACTOR: usize = 2;

/// Capacity to grow to when `required` slots are needed and `current` are
/// allocated.
///
/// Doubles the current capacity (starting at 1 from an empty buffer) and
/// never returns less than `required`. If doubling overflows, `required`
/// is returned as is.
#[must_use]
pub fn grown_capacity(current: usize, required: usize) -> usize {
    if required <= current {
        return current;
    }
    let doubled = current.checked_mul(GROWTH_FACTOR).unwrap_or(required);
    doubled.max(required).max(1)
}

/// Capacity for a buffer built from `len` elements of a range or list.
///
/// # Errors
///
/// Returns `GrowVecError::CapacityOverflow` if `len * 2` overflows.
pub fn range_capacity(len: usize) -> Result<usize> {
    len.checked_mul(RANGE_CAPACITY_FACTOR)
        .ok_or(GrowVecError::CapacityOverflow { requested: len })
}

/// Capacity needed to hold `len + additional` elements.
///
/// # Errors
///
/// Returns `GrowVecError::CapacityOverflow` if the sum overflows.
pub fn required_capacity(len: usize, additional: usize) -> Result<usize> {
    len.checked_add(additional)
        .ok_or(GrowVecError::CapacityOverflow { requested: usize::MAX })
}
