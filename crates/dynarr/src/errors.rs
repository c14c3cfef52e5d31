use thiserror::Error;

/// Failures surfaced by [`DynArray`](crate::DynArray) operations.
///
/// Every variant is detected before the operation mutates the array, except
/// `OutOfMemory`, which leaves the array safely empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("allocation failed with new capacity {new_capacity}")]
    OutOfMemory {
        new_capacity: usize,
    },
    #[error("range was null, empty or reversed")]
    InvalidRange,
    #[error("position {index} was not insertable with len {len}")]
    InvalidPosition {
        index: usize,
        len: usize,
    },
    #[error("index {index} was out of range with len {len}")]
    OutOfRange {
        index: usize,
        len: usize,
    },
    #[error("size of element type is zero")]
    ZeroSizedElement,
}
