//! Control structures for lazy, memoized computation.
//!
//! - [`Memo`]: a thread-safe cell that runs its computation at most once
//! - [`Either`]: a right-biased value that is one of two alternatives
//!
//! # Examples
//!
//! ## Memoization
//!
//! ```rust
//! use memostream::control::Memo;
//!
//! let memo = Memo::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! assert_eq!(*memo.force(), 42);
//! // Printed once; later calls reuse the value
//! assert_eq!(*memo.force(), 42);
//! ```
//!
//! ## Right-biased chaining
//!
//! ```rust
//! use memostream::control::Either;
//!
//! let result: Either<String, i32> = Either::Right(20);
//! let total = result.flat_map(|n| Either::Right(n + 22));
//! assert_eq!(total, Either::Right(42));
//! ```

mod either;
mod memo;

pub use either::Either;
pub use memo::Memo;
