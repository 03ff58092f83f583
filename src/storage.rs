//! Raw storage: allocation and deallocation without construction.
//!
//! [`RawBuf`] owns a block of *uninitialized* slots and nothing else. It
//! never constructs, clones, reads, or drops elements; tracking which slots
//! hold live values is entirely the responsibility of the containers built
//! on top of it. Keeping the two phases apart means a failed reallocation
//! can always report an error with every previously constructed element
//! still intact in the old block.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr::NonNull;
use std::alloc;

use crate::error::{AllocError, LengthError, ReserveError};

/// The maximum number of elements a single buffer of `T` may hold.
///
/// Allocations are limited to `isize::MAX` bytes; zero-sized types are not
/// limited at all.
pub const fn max_len<T>() -> usize {
    if size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size_of::<T>()
    }
}

/// Computes the target capacity for an amortized growth step.
///
/// The result is the larger of one-and-a-half times the current capacity
/// and the exact requirement `len + additional`, with a floor of 16 slots
/// for a previously empty buffer and a hard ceiling at [`max_len`].
/// A requirement beyond the ceiling is a [`LengthError`].
///
/// # Examples
/// ```
/// use catena::storage::amortized_growth;
/// assert_eq!(amortized_growth::<u32>(0, 0, 1), Ok(16));
/// assert_eq!(amortized_growth::<u32>(16, 16, 1), Ok(24));
/// assert_eq!(amortized_growth::<u32>(24, 24, 100), Ok(124));
/// assert!(amortized_growth::<u32>(24, 24, usize::MAX - 8).is_err());
/// ```
pub fn amortized_growth<T>(
    cap: usize,
    len: usize,
    additional: usize,
) -> Result<usize, LengthError> {
    let max = max_len::<T>();
    let required = match len.checked_add(additional) {
        Some(required) if required <= max => required,
        _ => {
            return Err(LengthError {
                requested: len.saturating_add(additional),
                max,
            })
        }
    };

    if cap == 0 {
        return Ok(required.max(16).min(max));
    }
    let amortized = cap.saturating_add(cap / 2).min(max);
    Ok(amortized.max(required))
}

/// A heap block of `cap` uninitialized slots of `T`.
///
/// For zero-sized element types no memory is ever allocated and the
/// capacity is reported as `usize::MAX`.
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    elem: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Creates a buffer of capacity zero without allocating.
    pub const fn new() -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: if size_of::<T>() == 0 { usize::MAX } else { 0 },
            elem: PhantomData,
        }
    }

    /// Allocates a buffer of exactly `cap` uninitialized slots.
    pub fn try_with_capacity(cap: usize) -> Result<Self, ReserveError> {
        if cap == 0 || size_of::<T>() == 0 {
            return Ok(Self::new());
        }
        if cap > max_len::<T>() {
            return Err(LengthError {
                requested: cap,
                max: max_len::<T>(),
            }
            .into());
        }

        // in range for Layout::array by the check above
        let layout = Layout::array::<T>(cap).unwrap();
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr as *mut T) {
            Some(ptr) => Ok(RawBuf {
                ptr,
                cap,
                elem: PhantomData,
            }),
            None => Err(AllocError {
                bytes: layout.size(),
            }
            .into()),
        }
    }

    /// Returns the number of slots in the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a pointer to the first slot.
    ///
    /// The pointer is dangling (but well-aligned) when the capacity is zero
    /// or `T` is zero-sized.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Grows the block to `new_cap` slots, preserving the contents of the
    /// leading `cap` slots bytewise.
    ///
    /// On failure the old block is untouched and remains owned. Requests
    /// that do not actually grow the buffer are debug-asserted against and
    /// ignored in release builds.
    pub fn try_grow_to(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        debug_assert!(new_cap >= self.cap);
        if size_of::<T>() == 0 || new_cap <= self.cap {
            return Ok(());
        }
        if new_cap > max_len::<T>() {
            return Err(LengthError {
                requested: new_cap,
                max: max_len::<T>(),
            }
            .into());
        }
        self.reallocate(new_cap)
    }

    /// Shrinks the block to `new_cap` slots.
    ///
    /// The caller must have already ended the lifetime of any values in the
    /// abandoned slots; this function only resizes raw memory. Shrinking to
    /// zero releases the block entirely.
    pub fn try_shrink_to(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        debug_assert!(new_cap <= self.cap);
        if size_of::<T>() == 0 || new_cap >= self.cap {
            return Ok(());
        }
        if new_cap == 0 {
            unsafe {
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.cap));
            }
            *self = Self::new();
            return Ok(());
        }
        self.reallocate(new_cap)
    }

    fn reallocate(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        let new_layout = Layout::array::<T>(new_cap).unwrap();
        let ptr = if self.cap == 0 {
            unsafe { alloc::alloc(new_layout) }
        } else {
            unsafe {
                alloc::realloc(
                    self.ptr.as_ptr() as *mut u8,
                    Self::layout(self.cap),
                    new_layout.size(),
                )
            }
        };

        match NonNull::new(ptr as *mut T) {
            Some(ptr) => {
                self.ptr = ptr;
                self.cap = new_cap;
                Ok(())
            }
            None => Err(AllocError {
                bytes: new_layout.size(),
            }
            .into()),
        }
    }

    #[inline]
    fn layout(cap: usize) -> Layout {
        // cap was validated when the block was allocated
        Layout::array::<T>(cap).unwrap()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap != 0 && size_of::<T>() != 0 {
            unsafe {
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.cap));
            }
        }
    }
}

unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}
