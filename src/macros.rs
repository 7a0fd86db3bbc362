/// Builds a [`GrowVec`](crate::GrowVec) from a literal list.
///
/// - `growvec![]` is an empty vector without allocation.
/// - `growvec![a, b, c]` moves the values in order; capacity is twice the count.
/// - `growvec![value; n]` holds `n` clones of `value`; capacity is `n`.
///
/// ```
/// # use growvec::growvec;
/// let v = growvec![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 6);
///
/// let zeros = growvec![0u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! growvec {
    () => {
        $crate::GrowVec::new()
    };
    ($value:expr; $count:expr) => {
        $crate::GrowVec::from_elem($count, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::GrowVec::from([$($value),+])
    };
}
