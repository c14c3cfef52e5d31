use core::{
    fmt,
    mem,
    ops::{Deref, DerefMut, Index, IndexMut, Range},
    ptr::NonNull,
    slice,
};

use crate::{
    errors::ArrayError,
    global_alloc,
    growth,
    strategies,
};

use ArrayError::{InvalidPosition, InvalidRange, OutOfMemory, OutOfRange, ZeroSizedElement};

/// A dynamic array over one exclusively owned contiguous buffer.
///
/// `len` counts the live, constructed elements in the prefix `[0, len)`;
/// slots `[len, capacity)` are allocated but uninitialized memory. Tail
/// growth doubles capacity, head insertion always reallocates, and every
/// multi-element move goes through the relocation primitives in
/// `strategies`.
///
/// Any operation that may reallocate invalidates previously obtained raw
/// pointers: `push_back` at full capacity, `push_front` unconditionally,
/// interior `insert` at full capacity, growing `reserve` and growing
/// `resize`.
pub struct DynArray<T> {
    data: NonNull<T>,
    capacity: usize,
    len: usize,
}

impl<T> DynArray<T> {

    /// An empty array. Never allocates.
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            len: 0,
        }
    }

    /// An array of `len` default values with `capacity == len`.
    ///
    /// `len == 0` stays unallocated rather than making a zero-length
    /// allocation.
    pub fn with_len(len: usize) -> Result<Self, ArrayError>
        where
            T: Default
    {
        if len == 0 {
            return Ok(Self::new())
        }
        let data = Self::allocate(len)?;
        for i in 0..len {
            unsafe { data.add(i).write(T::default()) }
        }
        Ok(Self {
            data,
            capacity: len,
            len,
        })
    }

    /// Moves a fixed-size array into fresh storage with `capacity == N`.
    /// An empty array stays unallocated.
    pub fn from_array<const N: usize>(values: [T; N]) -> Result<Self, ArrayError> {
        if N == 0 {
            return Ok(Self::new())
        }
        let data = Self::allocate(N)?;
        let src = NonNull::from(&values).cast::<T>();
        unsafe {
            strategies::relocate_elements(src, data, N);
        }
        mem::forget(values);
        Ok(Self {
            data,
            capacity: N,
            len: N,
        })
    }

    /// Clones a slice into exactly-sized fresh storage.
    ///
    /// An empty slice fails with `InvalidRange`: the range construction
    /// path rejects `begin == end`.
    pub fn from_slice(values: &[T]) -> Result<Self, ArrayError>
        where
            T: Clone
    {
        if values.is_empty() {
            return Err(InvalidRange)
        }
        let len = values.len();
        let data = Self::allocate(len)?;
        unsafe {
            strategies::clone_elements(NonNull::from(&values[0]), data, len);
        }
        Ok(Self {
            data,
            capacity: len,
            len,
        })
    }

    /// Clones the half-open pointer range `[begin, end)` into exactly-sized
    /// fresh storage. Fails with `InvalidRange` if either pointer is null,
    /// they are equal, or `end` precedes `begin`.
    ///
    /// # Safety
    ///
    /// Non-null `begin` and `end` must point into (or one past) the same
    /// live array of `T`, with every value in `[begin, end)` initialized.
    pub unsafe fn from_raw_range(begin: *const T, end: *const T) -> Result<Self, ArrayError>
        where
            T: Clone
    {
        if begin.is_null() || end.is_null() || begin == end {
            return Err(InvalidRange)
        }
        let distance = unsafe { end.offset_from(begin) };
        if distance < 0 {
            return Err(InvalidRange)
        }
        let len = distance as usize;
        let data = Self::allocate(len)?;
        unsafe {
            let src = NonNull::new_unchecked(begin.cast_mut());
            strategies::clone_elements(src, data, len);
        }
        Ok(Self {
            data,
            capacity: len,
            len,
        })
    }

    /// A fallible copy with element-wise equal contents and independent
    /// storage.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
        where
            T: Clone
    {
        let mut copy = Self::new();
        copy.clone_from(self)?;
        Ok(copy)
    }

    /// Replaces `self` with a copy of `source`: prior elements are dropped
    /// and the old buffer freed first, then exactly `source.capacity()`
    /// slots are allocated and the live elements cloned over.
    ///
    /// On allocation failure `self` is left empty.
    pub fn clone_from(&mut self, source: &Self) -> Result<(), ArrayError>
        where
            T: Clone
    {
        self.clear();
        if source.capacity == 0 {
            return Ok(())
        }
        let data = Self::allocate(source.capacity)?;
        unsafe {
            strategies::clone_elements(source.data, data, source.len);
        }
        self.data = data;
        self.capacity = source.capacity;
        self.len = source.len;
        Ok(())
    }

    /// Takes ownership of `source`'s buffer in O(1), dropping `self`'s
    /// prior contents. `source` is left empty and reusable.
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear();
        self.data = source.data;
        self.capacity = source.capacity;
        self.len = source.len;
        source.data = NonNull::dangling();
        source.capacity = 0;
        source.len = 0;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// The begin/end pointer pair over the live prefix.
    #[inline(always)]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        let begin = self.data.as_ptr().cast_const();
        begin..unsafe { begin.add(self.len) }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe { Some(self.data.as_ref()) }
        }
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe { Some(self.data.as_mut()) }
        }
    }

    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe { Some(self.data.add(self.len - 1).as_ref()) }
        }
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        }
        else {
            unsafe { Some(self.data.add(self.len - 1).as_mut()) }
        }
    }

    /// Sets the live length without constructing or dropping anything.
    ///
    /// # Safety
    ///
    /// Every slot below `len` must hold a live `T` afterwards.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, len: usize) {
        if len > self.capacity {
            panic!("len {} was larger than capacity {}", len, self.capacity)
        }
        self.len = len;
    }

    /// Grows capacity to exactly `capacity`; a no-op when the current
    /// capacity is already sufficient. The old buffer is freed only after
    /// every live element has been relocated into the new one. Never
    /// changes `len` or any element value.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity {
            return Ok(())
        }
        let tmp = match Self::allocate(capacity) {
            Ok(data) => data,
            Err(e) => {
                self.clear();
                return Err(e)
            },
        };
        debug_assert!(self.len <= self.capacity);
        unsafe {
            strategies::relocate_elements(self.data, tmp, self.len);
        }
        if self.capacity != 0 {
            unsafe { global_alloc::free_uninit(self.data, self.capacity) }
        }
        self.data = tmp;
        self.capacity = capacity;
        Ok(())
    }

    /// Appends `value`, doubling capacity when full. Amortized O(1).
    #[inline(always)]
    pub fn push_back(&mut self, value: T) -> Result<&mut T, ArrayError> {
        if self.len == self.capacity {
            self.reserve(growth::grown_tail_capacity(self.capacity))?
        }
        let mut ptr = unsafe { self.data.add(self.len) };
        unsafe { ptr.write(value) };
        self.len += 1;
        Ok(unsafe { ptr.as_mut() })
    }

    /// Appends an element constructed in place in the target slot from
    /// `f`'s return value. Growth trigger is identical to `push_back`.
    #[inline(always)]
    pub fn push_with<F>(&mut self, f: F) -> Result<&mut T, ArrayError>
        where
            F: FnOnce() -> T
    {
        if self.len == self.capacity {
            self.reserve(growth::grown_tail_capacity(self.capacity))?
        }
        let mut ptr = unsafe { self.data.add(self.len) };
        unsafe { ptr.write(f()) };
        self.len += 1;
        Ok(unsafe { ptr.as_mut() })
    }

    /// Prepends `value`. Always reallocates, regardless of spare capacity:
    /// the new buffer holds `value` at slot 0 and the prior elements at
    /// `[1, len]`. No amortization at the head.
    pub fn push_front(&mut self, value: T) -> Result<&mut T, ArrayError> {
        let new_capacity = growth::grown_head_capacity(self.capacity, self.len);
        let tmp = match Self::allocate(new_capacity) {
            Ok(data) => data,
            Err(e) => {
                self.clear();
                return Err(e)
            },
        };
        unsafe {
            tmp.write(value);
            strategies::relocate_elements(self.data, tmp.add(1), self.len);
        }
        if self.capacity != 0 {
            unsafe { global_alloc::free_uninit(self.data, self.capacity) }
        }
        self.data = tmp;
        self.capacity = new_capacity;
        self.len += 1;
        Ok(unsafe { self.data.as_mut() })
    }

    /// Inserts `value` before logical position `index`.
    ///
    /// `index == len` delegates to `push_back`, `index == 0` to
    /// `push_front`; anything past `len` fails with `InvalidPosition`
    /// before the array is touched. Once validation passes the shift always
    /// completes.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, ArrayError> {
        if index > self.len {
            return Err(InvalidPosition { index, len: self.len })
        }
        if index == self.len {
            return self.push_back(value)
        }
        if index == 0 {
            return self.push_front(value)
        }
        if self.len == self.capacity {
            self.reserve(growth::grown_tail_capacity(self.capacity))?
        }
        unsafe {
            let mut ptr = strategies::insert_element(self.data, value, index, self.len);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    /// Removes and returns the element at `index`, shifting the tail left
    /// by one. Fails with `OutOfRange` if `index >= len`.
    pub fn erase(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(OutOfRange { index, len: self.len })
        }
        let removed = unsafe { self.data.add(index).read() };
        unsafe {
            strategies::shift_left(self.data, index, index + 1, self.len);
        }
        self.len -= 1;
        Ok(removed)
    }

    /// Removes the half-open range `[start, end)`, shifting the tail into
    /// the gap. Fails with `InvalidRange` when `start >= end` and with
    /// `OutOfRange` when `end > len`; nothing is touched on failure.
    pub fn erase_range(&mut self, start: usize, end: usize) -> Result<(), ArrayError> {
        if start >= end {
            return Err(InvalidRange)
        }
        if end > self.len {
            return Err(OutOfRange { index: end, len: self.len })
        }
        unsafe {
            strategies::drop_in_place(self.data.add(start), end - start);
            strategies::shift_left(self.data, start, end, self.len);
        }
        self.len -= end - start;
        Ok(())
    }

    /// Resizes to `len` elements: shrinking drops the tail (capacity is
    /// untouched), growing default-constructs the new slots, reserving
    /// exactly `len` first when capacity is insufficient.
    pub fn resize(&mut self, len: usize) -> Result<(), ArrayError>
        where
            T: Default
    {
        self.resize_with(len, T::default)
    }

    /// `resize` with the new slots filled from `f` instead of `T::default`.
    pub fn resize_with<F>(&mut self, len: usize, mut f: F) -> Result<(), ArrayError>
        where
            F: FnMut() -> T
    {
        if len > self.capacity {
            self.reserve(len)?
        }
        if len > self.len {
            for i in self.len..len {
                unsafe { self.data.add(i).write(f()) }
            }
        }
        else if len < self.len {
            unsafe {
                strategies::drop_in_place(self.data.add(len), self.len - len);
            }
        }
        self.len = len;
        Ok(())
    }

    /// Drops elements `[len, self.len)`. A no-op when `len >= self.len`.
    /// Unlike `resize` this places no bounds on `T`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return
        }
        unsafe {
            strategies::drop_in_place(self.data.add(len), self.len - len);
        }
        self.len = len;
    }

    /// Drops all live elements and releases the buffer, returning the
    /// array to the unallocated empty state.
    pub fn clear(&mut self) {
        debug_assert!(self.len <= self.capacity);
        if self.capacity == 0 {
            return
        }
        unsafe {
            strategies::drop_in_place(self.data, self.len);
            global_alloc::free_uninit(self.data, self.capacity);
        }
        self.len = 0;
        self.capacity = 0;
        self.data = NonNull::dangling();
    }

    fn allocate(capacity: usize) -> Result<NonNull<T>, ArrayError> {
        unsafe { global_alloc::allocate_uninit(capacity) }.ok_or_else(|| {
            if mem::size_of::<T>() == 0 {
                ZeroSizedElement
            }
            else {
                OutOfMemory { new_capacity: capacity }
            }
        })
    }
}

impl<T> Drop for DynArray<T> {

    #[inline(always)]
    fn drop(&mut self) {
        self.clear()
    }
}

impl<T> Default for DynArray<T> {

    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for DynArray<T> {

    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.data.add(index).as_ref() }
    }
}

impl<T> IndexMut<usize> for DynArray<T> {

    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.data.add(index).as_mut() }
    }
}

impl<T> AsRef<[T]> for DynArray<T> {

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Deref for DynArray<T> {

    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'arr, T> IntoIterator for &'arr DynArray<T> {

    type Item = &'arr T;
    type IntoIter = slice::Iter<'arr, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'arr, T> IntoIterator for &'arr mut DynArray<T> {

    type Item = &'arr mut T;
    type IntoIter = slice::IterMut<'arr, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {

    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}
