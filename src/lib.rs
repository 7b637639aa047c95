//! # memostream
//!
//! Lazily evaluated, memoized sequences built on persistent structures.
//!
//! ## Overview
//!
//! - **Memoization**: [`control::Memo`], a thread-safe cell that runs its
//!   computation at most once
//! - **Persistent List**: [`persistent::PersistentList`], an immutable
//!   cons-list with structural sharing
//! - **Lazy Stream**: [`stream::Stream`], a sequence whose head and tail are
//!   each computed on first demand and then reused
//! - **Sum Type**: [`control::Either`], a right-biased two-way choice
//!
//! ## Feature Flags
//!
//! - `control`: [`Memo`](control::Memo) and [`Either`](control::Either)
//! - `persistent`: [`PersistentList`](persistent::PersistentList)
//! - `stream`: [`Stream`](stream::Stream) (enables `control` and `persistent`)
//! - `serde`: Serialize/Deserialize for lists and `Either`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use memostream::prelude::*;
//!
//! let naturals = Stream::iterate(0_u64, |n| n + 1);
//! let evens: Vec<u64> = naturals.filter(|n| n % 2 == 0).take(3).to_vec();
//! assert_eq!(evens, vec![0, 2, 4]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use memostream::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::SequenceError;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;
}

pub mod error;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "stream")]
pub mod stream;
