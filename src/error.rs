//! Error types shared by the sequence structures.
//!
//! Accessors that need an element ([`head`], [`tail`] on streams, [`set_head`])
//! return [`SequenceError`] when called on an empty structure instead of
//! inventing a sentinel value.
//!
//! [`head`]: crate::persistent::PersistentList::head
//! [`tail`]: crate::stream::Stream::tail
//! [`set_head`]: crate::persistent::PersistentList::set_head

use thiserror::Error;

/// Failure raised by an accessor that cannot be answered by an empty
/// list or stream.
///
/// # Examples
///
/// ```rust
/// use memostream::error::SequenceError;
///
/// let error = SequenceError::empty("list", "head");
/// assert_eq!(error.to_string(), "cannot call head() on an empty list");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SequenceError {
    /// The operation requires at least one element.
    #[error("cannot call {operation}() on an empty {structure}")]
    Empty {
        /// Name of the structure the call was made on (`"list"` or `"stream"`).
        structure: &'static str,
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl SequenceError {
    /// Creates an [`SequenceError::Empty`] for the given structure and operation.
    #[inline]
    #[must_use]
    pub const fn empty(structure: &'static str, operation: &'static str) -> Self {
        Self::Empty {
            structure,
            operation,
        }
    }

    /// Returns the name of the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Empty { operation, .. } => operation,
        }
    }
}
