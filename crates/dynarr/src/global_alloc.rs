use core::{mem, ptr::NonNull};

use std::alloc::{Layout, alloc, dealloc};

/// Allocates uninitialized storage for `count` values of `T`.
///
/// Returns `None` on allocator failure, layout overflow or a zero-size
/// request. No slot is considered live until something is written to it.
pub(crate) unsafe fn allocate_uninit<T>(count: usize) -> Option<NonNull<T>> {
    let size = mem::size_of::<T>().checked_mul(count)?;
    let layout = Layout::from_size_align(size, mem::align_of::<T>()).ok()?;
    if layout.size() == 0 {
        return None
    }
    let ptr = unsafe { alloc(layout) };
    NonNull::new(ptr.cast::<T>())
}

/// Frees storage previously returned by [`allocate_uninit`] with the same
/// `count`. Live values must have been dropped (or read out) beforehand.
pub(crate) unsafe fn free_uninit<T>(ptr: NonNull<T>, count: usize) {
    let size = mem::size_of::<T>() * count;
    let layout = match Layout::from_size_align(size, mem::align_of::<T>()) {
        Ok(l) => l,
        // The same layout succeeded at allocation.
        Err(_) => {
            debug_assert!(false, "layout was valid when the buffer was allocated");
            return
        },
    };
    unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) }
}
