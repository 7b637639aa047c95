//! Either type - a value that is one of two alternatives.
//!
//! This module provides [`Either<L, R>`], which is either a `Left(L)` or a
//! `Right(R)`. By convention `Left` carries a failure and `Right` a success, and
//! the chaining operations are right-biased: [`map`](Either::map) and
//! [`flat_map`](Either::flat_map) act on `Right` and pass `Left` through
//! unchanged, while [`or_else`](Either::or_else) acts on `Left`.
//!
//! # Examples
//!
//! ```rust
//! use memostream::control::Either;
//!
//! fn parse(text: &str) -> Either<String, i32> {
//!     text.parse::<i32>()
//!         .map_err(|error| error.to_string())
//!         .into()
//! }
//!
//! let doubled = parse("21").map(|n| n * 2);
//! assert_eq!(doubled, Either::Right(42));
//!
//! let failed = parse("x").map(|n| n * 2);
//! assert!(failed.is_left());
//! ```

use std::fmt;

/// A value that is either `Left(L)` or `Right(R)`.
///
/// # Examples
///
/// ```rust
/// use memostream::control::Either;
///
/// let success: Either<String, i32> = Either::right(42);
/// let failure: Either<String, i32> = Either::left("error".to_string());
///
/// assert_eq!(success.get_or_else(|| 0), 42);
/// assert_eq!(failure.get_or_else(|| 0), 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant, conventionally a failure.
    Left(L),
    /// The right variant, conventionally a success.
    Right(R),
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a `Left` value.
    #[inline]
    pub const fn left(value: L) -> Self {
        Self::Left(value)
    }

    /// Creates a `Right` value.
    #[inline]
    pub const fn right(value: R) -> Self {
        Self::Right(value)
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    // =========================================================================
    // Value Access
    // =========================================================================

    /// Returns a reference to the left value if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(42);
    /// assert_eq!(left.left_ref(), Some(&42));
    /// assert_eq!(left.right_ref(), None);
    /// ```
    #[inline]
    pub const fn left_ref(&self) -> Option<&L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns a reference to the right value if present.
    #[inline]
    pub const fn right_ref(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Converts into the left value, discarding a right one.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Converts into the right value, discarding a left one.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Returns the right value, or the value supplied by `fallback` for a `Left`.
    ///
    /// The fallback is only evaluated for a `Left`.
    #[inline]
    pub fn get_or_else<F>(self, fallback: F) -> R
    where
        F: FnOnce() -> R,
    {
        match self {
            Self::Left(_) => fallback(),
            Self::Right(value) => value,
        }
    }

    // =========================================================================
    // Right-biased Operations
    // =========================================================================

    /// Applies `function` to a `Right` value; a `Left` passes through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Either;
    ///
    /// let right: Either<String, i32> = Either::Right(21);
    /// assert_eq!(right.map(|n| n * 2), Either::Right(42));
    ///
    /// let left: Either<String, i32> = Either::Left("error".to_string());
    /// assert_eq!(left.map(|n| n * 2), Either::Left("error".to_string()));
    /// ```
    #[inline]
    pub fn map<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Applies `function` to a `Right` value and returns its result; a `Left`
    /// passes through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Either;
    ///
    /// fn half(n: i32) -> Either<String, i32> {
    ///     if n % 2 == 0 {
    ///         Either::Right(n / 2)
    ///     } else {
    ///         Either::Left(format!("{n} is odd"))
    ///     }
    /// }
    ///
    /// assert_eq!(Either::<String, i32>::Right(8).flat_map(half), Either::Right(4));
    /// assert_eq!(
    ///     Either::<String, i32>::Right(3).flat_map(half),
    ///     Either::Left("3 is odd".to_string())
    /// );
    /// ```
    #[inline]
    pub fn flat_map<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> Either<L, T>,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => function(value),
        }
    }

    /// Applies `function` to a `Left` value and returns its result; a `Right`
    /// passes through unchanged.
    ///
    /// This is the recovery counterpart of [`flat_map`](Either::flat_map).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Either;
    ///
    /// let left: Either<&str, i32> = Either::Left("missing");
    /// let recovered: Either<(), i32> = left.or_else(|_| Either::Right(0));
    /// assert_eq!(recovered, Either::Right(0));
    /// ```
    #[inline]
    pub fn or_else<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> Either<T, R>,
    {
        match self {
            Self::Left(value) => function(value),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Combines two `Right` values with `function`.
    ///
    /// If either side is `Left`, the result is that `Left`; when both are
    /// `Left`, the left value of `self` wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Either;
    ///
    /// let a: Either<&str, i32> = Either::Right(20);
    /// let b: Either<&str, i32> = Either::Right(22);
    /// assert_eq!(a.map2(b, |x, y| x + y), Either::Right(42));
    ///
    /// let c: Either<&str, i32> = Either::Left("first");
    /// let d: Either<&str, i32> = Either::Left("second");
    /// assert_eq!(c.map2(d, |x, y| x + y), Either::Left("first"));
    /// ```
    #[inline]
    pub fn map2<T, U, F>(self, other: Either<L, T>, function: F) -> Either<L, U>
    where
        F: FnOnce(R, T) -> U,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => other.map(|other_value| function(value, other_value)),
        }
    }

    /// Applies `function` to a `Left` value; a `Right` passes through unchanged.
    #[inline]
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Eliminates the `Either` by applying the function matching its variant.
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Swaps the variants.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok(r)` becomes `Right(r)`, and `Err(e)` becomes `Left(e)`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right(r)` becomes `Ok(r)`, and `Left(l)` becomes `Err(l)`.
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_either_left_construction() {
        let value: Either<i32, String> = Either::left(42);
        assert!(value.is_left());
        assert!(!value.is_right());
        assert_eq!(value.into_left(), Some(42));
    }

    #[rstest]
    fn test_either_right_construction() {
        let value: Either<i32, String> = Either::right("hello".to_string());
        assert!(value.is_right());
        assert!(!value.is_left());
        assert_eq!(value.into_right(), Some("hello".to_string()));
    }

    #[rstest]
    fn test_map_is_right_biased() {
        let right: Either<&str, i32> = Either::Right(1);
        let left: Either<&str, i32> = Either::Left("kept");
        assert_eq!(right.map(|n| n + 1), Either::Right(2));
        assert_eq!(left.map(|n| n + 1), Either::Left("kept"));
    }

    #[rstest]
    fn test_or_else_acts_on_left() {
        let left: Either<i32, &str> = Either::Left(3);
        let right: Either<i32, &str> = Either::Right("kept");
        assert_eq!(
            left.or_else(|n| Either::<String, &str>::Left(n.to_string())),
            Either::Left("3".to_string())
        );
        assert_eq!(
            right.or_else(|n| Either::<String, &str>::Left(n.to_string())),
            Either::Right("kept")
        );
    }

    #[rstest]
    #[case(Either::Right(1), Either::Right(2), Either::Right(3))]
    #[case(Either::Left("a"), Either::Right(2), Either::Left("a"))]
    #[case(Either::Right(1), Either::Left("b"), Either::Left("b"))]
    #[case(Either::Left("a"), Either::Left("b"), Either::Left("a"))]
    fn test_map2(
        #[case] first: Either<&'static str, i32>,
        #[case] second: Either<&'static str, i32>,
        #[case] expected: Either<&'static str, i32>,
    ) {
        assert_eq!(first.map2(second, |x, y| x + y), expected);
    }

    #[rstest]
    fn test_get_or_else_does_not_evaluate_fallback_for_right() {
        let right: Either<(), i32> = Either::Right(1);
        assert_eq!(right.get_or_else(|| panic!("fallback evaluated")), 1);
    }

    #[rstest]
    fn test_result_conversion_roundtrip() {
        let ok: Result<i32, String> = Ok(42);
        let either: Either<String, i32> = ok.into();
        let result: Result<i32, String> = either.into();
        assert_eq!(result, Ok(42));

        let err: Result<i32, String> = Err("error".to_string());
        let either: Either<String, i32> = err.into();
        let result: Result<i32, String> = either.into();
        assert_eq!(result, Err("error".to_string()));
    }
}
