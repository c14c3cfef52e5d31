//! Element relocation primitives shared by every construction, growth and
//! erase path.
//!
//! Dispatch is on `needs_drop::<T>()`, a const predicate: each
//! monomorphization folds to either the raw byte-range copy or the explicit
//! per-slot loop, never a runtime branch.

use core::{mem::needs_drop, ptr::NonNull};

/// Moves `len` values from `src` into `dst`. The ranges must not overlap;
/// the source slots are dead afterwards.
#[inline(always)]
pub(crate) unsafe fn relocate_elements<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            for i in 0..len {
                dst.add(i).write(src.add(i).read())
            }
        }
    }
    else {
        unsafe {
            src.copy_to_nonoverlapping(dst, len);
        }
    }
}

/// Clones `len` values from `src` into `dst` without reading `dst`'s
/// previous contents. The source slots stay live.
#[inline(always)]
pub(crate) unsafe fn clone_elements<T: Clone>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    unsafe {
        for i in 0..len {
            dst.add(i).write(src.add(i).as_ref().clone());
        }
    }
}

/// Opens a one-slot gap at `index` within the `len` live slots starting at
/// `ptr` and writes `value` into it. Slot `len` must be allocated spare
/// capacity. Returns the written slot.
#[inline(always)]
pub(crate) unsafe fn insert_element<T>(
    ptr: NonNull<T>,
    value: T,
    index: usize,
    len: usize,
) -> NonNull<T> {
    if needs_drop::<T>() {
        unsafe {
            for i in (index + 1..=len).rev() {
                ptr.add(i).write(ptr.add(i - 1).read());
            }
            let slot = ptr.add(index);
            slot.write(value);
            slot
        }
    }
    else {
        unsafe {
            let slot = ptr.add(index);
            slot.copy_to(slot.add(1), len - index);
            slot.write(value);
            slot
        }
    }
}

/// Closes the dead gap `[start, end)` by moving the live tail `[end, len)`
/// down to `start`. The ranges may overlap.
#[inline(always)]
pub(crate) unsafe fn shift_left<T>(ptr: NonNull<T>, start: usize, end: usize, len: usize) {
    let gap = end - start;
    if needs_drop::<T>() {
        unsafe {
            for i in end..len {
                ptr.add(i - gap).write(ptr.add(i).read());
            }
        }
    }
    else {
        unsafe {
            ptr.add(end).copy_to(ptr.add(start), len - end);
        }
    }
}

/// Drops the `len` live values starting at `ptr` in place.
#[inline(always)]
pub(crate) unsafe fn drop_in_place<T>(ptr: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            for i in 0..len {
                ptr.add(i).drop_in_place();
            }
        }
    }
}
