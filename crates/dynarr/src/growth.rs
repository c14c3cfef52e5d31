//! Capacity formulas shared by the tail and head growth paths.

/// Capacity of the first allocation made by a growth path on an empty array.
/// Doubling a capacity of zero would stall at zero forever.
pub(crate) const MIN_GROWTH: usize = 1;

/// Tail growth doubles the current capacity.
#[inline]
pub(crate) fn grown_tail_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        MIN_GROWTH
    }
    else {
        capacity * 2
    }
}

/// Head insertion always reallocates; the replacement buffer keeps the
/// doubling intent while guaranteeing room for the current elements plus
/// exactly one more.
#[inline]
pub(crate) fn grown_head_capacity(capacity: usize, len: usize) -> usize {
    (capacity * 2).max(len + 1)
}
