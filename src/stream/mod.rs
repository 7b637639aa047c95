//! Lazy, memoized streams.
//!
//! - [`Stream`]: an immutable, possibly infinite sequence whose head and tail
//!   are each evaluated on first demand and then reused
//!
//! # Laziness
//!
//! Building or transforming a stream runs no element computation except where
//! an operation must look at elements to decide its shape: [`Stream::filter`],
//! [`Stream::take_while`] and [`Stream::flat_map`] force heads up to their
//! first result. [`Stream::fold_left`], [`Stream::to_vec`] and
//! [`Stream::to_list`] force everything.
//!
//! # Sharing
//!
//! Derived streams that re-expose an element point at the source's head cell,
//! so traversing several views of one stream (or the same stream from several
//! threads) computes each element once.
//!
//! # Examples
//!
//! ```rust
//! use memostream::stream::Stream;
//!
//! let naturals = Stream::iterate(0_u64, |n| n + 1);
//! let squares = naturals.map(|n| n * n);
//!
//! assert_eq!(squares.skip(2).take(3).to_vec(), vec![4, 9, 16]);
//! assert_eq!(naturals.head(), Ok(&0));
//! ```

mod lazy_stream;
mod sources;

pub use lazy_stream::{Stream, StreamIntoIterator, StreamIterator};
