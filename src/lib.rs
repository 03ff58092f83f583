//! Growable sequence containers with explicit memory discipline.
//!
//! This crate provides two owning sequence containers built on a shared
//! design principle: raw storage allocation is kept strictly separate from
//! element construction and destruction, so every fallible step can report
//! an error (or unwind) without leaking a value or leaving a container in
//! a partially built state.
//!
//! - [`Vec`](crate::vec::Vec) is a contiguous growable array with an
//!   amortized growth policy, whose reallocating operations release the
//!   old buffer only once the new one is fully populated.
//! - [`List`](crate::list::List) is a doubly linked list arranged as a
//!   sentinel ring, whose splice, merge, and sort operations rearrange
//!   nodes purely by relinking boundary pointers.
//!
//! Fallible operations come in pairs: a `try_*` method returning
//! [`ReserveError`], and a panicking convenience wrapper. See
//! [`error`](crate::error) for the failure taxonomy.

#![warn(missing_docs)]

pub mod error;
pub mod list;
pub mod storage;
pub mod vec;

pub use crate::error::{AllocError, LengthError, ReserveError};
pub use crate::list::List;
pub use crate::vec::Vec;
