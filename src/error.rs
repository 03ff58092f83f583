//! Failure conditions reported by the containers.
//!
//! Every mutating operation that may need to allocate comes in two forms:
//! a `try_*` method returning one of the error types below, and a panicking
//! convenience wrapper built on top of it. Operations that only rearrange
//! already-constructed elements have no failure path.

use thiserror::Error;

/// A requested size or capacity exceeds the maximum representable size.
///
/// The container is left unchanged when this is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("requested capacity ({requested}) exceeds maximum representable size ({max})")]
pub struct LengthError {
    /// The total number of elements the operation would have required.
    pub requested: usize,
    /// The maximum number of elements a buffer of this element type can hold.
    pub max: usize,
}

/// The global allocator failed to provide or resize a block.
///
/// The container is left unchanged when this is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("memory allocation of {bytes} bytes failed")]
pub struct AllocError {
    /// The size of the failed request in bytes.
    pub bytes: usize,
}

/// The union of failure conditions for capacity-changing operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ReserveError {
    /// See [`LengthError`].
    #[error(transparent)]
    Length(#[from] LengthError),
    /// See [`AllocError`].
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn reserve_failed(err: ReserveError) -> ! {
    panic!("{}", err)
}
