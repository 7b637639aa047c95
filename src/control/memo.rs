//! Thread-safe one-shot memoization.
//!
//! This module provides [`Memo<T>`], a cell that evaluates its computation at
//! most once, the first time the value is observed, and hands the cached value
//! to every later observer. Cells can be shared between threads; the guard that
//! serializes the first evaluation is internal and never visible to callers.
//!
//! # Failure Policy
//!
//! A computation that panics does not produce a value. The panic propagates to
//! the caller of [`Memo::force`], the cell stays unforced, and the next call to
//! `force()` runs the computation again. Failures are never memoized, which is
//! why the computation is an `Fn` rather than an `FnOnce`.
//!
//! # Re-entry Warning
//!
//! Forcing a cell from inside its own computation deadlocks, exactly like a
//! computation that never returns blocks every concurrent observer of that cell.
//!
//! # Examples
//!
//! ```rust
//! use memostream::control::Memo;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let memo = Arc::new(Memo::new(|| {
//!     println!("Computing...");
//!     42
//! }));
//!
//! let handles: Vec<_> = (0..10)
//!     .map(|_| {
//!         let memo = Arc::clone(&memo);
//!         thread::spawn(move || *memo.force())
//!     })
//!     .collect();
//!
//! // Every thread sees the same value, computed once
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 42);
//! }
//! ```

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

type Computation<T> = Box<dyn Fn() -> T + Send>;

/// State guarded by the cell's lock until the value exists.
struct Pending<T> {
    computation: Option<Computation<T>>,
    attempts: usize,
}

/// A thread-safe memoized value.
///
/// `Memo<T>` defers its computation until the value is first requested through
/// [`force`](Memo::force). The produced value is cached and returned by every
/// later call without running the computation again.
///
/// # Thread Safety
///
/// `Memo<T>` is `Send` when `T: Send` and `Sync` when `T: Send + Sync`. Once the
/// value exists, `force()` is a single atomic load; the lock is only taken while
/// the cell is still unforced.
///
/// # Examples
///
/// ```rust
/// use memostream::control::Memo;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let memo = Memo::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
///     "value"
/// });
///
/// assert_eq!(calls.load(Ordering::SeqCst), 0);
/// assert_eq!(*memo.force(), "value");
/// assert_eq!(*memo.force(), "value");
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct Memo<T> {
    value: OnceLock<T>,
    pending: Mutex<Pending<T>>,
}

impl<T> Memo<T> {
    /// Creates an unforced cell around `computation`.
    ///
    /// The computation is not invoked here.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Memo;
    ///
    /// let memo = Memo::new(|| 6 * 7);
    /// assert!(!memo.is_forced());
    /// ```
    #[inline]
    pub fn new<F>(computation: F) -> Self
    where
        F: Fn() -> T + Send + 'static,
    {
        Self {
            value: OnceLock::new(),
            pending: Mutex::new(Pending {
                computation: Some(Box::new(computation)),
                attempts: 0,
            }),
        }
    }

    /// Creates a cell that is already forced and holds `value`.
    ///
    /// No computation is stored and the lock is never taken.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Memo;
    ///
    /// let memo = Memo::unit(42);
    /// assert!(memo.is_forced());
    /// assert_eq!(*memo.force(), 42);
    /// ```
    #[inline]
    pub fn unit(value: T) -> Self {
        Self {
            value: OnceLock::from(value),
            pending: Mutex::new(Pending {
                computation: None,
                attempts: 0,
            }),
        }
    }

    /// Returns the memoized value, running the computation if no value exists yet.
    ///
    /// When several threads call `force()` on an unforced cell, exactly one of
    /// them runs the computation; the others wait for it and then return the same
    /// value.
    ///
    /// # Panics
    ///
    /// Propagates a panic raised by the computation. The cell stays unforced and
    /// the next call runs the computation again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Memo;
    ///
    /// let memo = Memo::new(|| String::from("hello"));
    /// let first: *const String = memo.force();
    /// let second: *const String = memo.force();
    /// assert_eq!(first, second);
    /// ```
    #[inline]
    pub fn force(&self) -> &T {
        match self.value.get() {
            Some(value) => value,
            None => self.force_guarded(),
        }
    }

    #[cold]
    fn force_guarded(&self) -> &T {
        let mut pending = self.pending.lock();

        if let Some(value) = self.value.get() {
            tracing::trace!("memoized value produced by another observer");
            return value;
        }

        pending.attempts += 1;
        let attempt = pending.attempts;
        if attempt > 1 {
            tracing::debug!(attempt, "retrying memoized computation after a failed attempt");
        } else {
            tracing::trace!("evaluating memoized computation");
        }

        let value = self
            .value
            .get_or_init(|| match pending.computation.as_ref() {
                Some(computation) => computation(),
                None => unreachable!("memo computation released before its value was stored"),
            });

        // Captured state of the computation is no longer needed.
        pending.computation = None;
        value
    }

    /// Returns the value if it has been produced, without forcing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::control::Memo;
    ///
    /// let memo = Memo::new(|| 42);
    /// assert!(memo.get().is_none());
    ///
    /// let _ = memo.force();
    /// assert_eq!(memo.get(), Some(&42));
    /// ```
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns whether the value has been produced.
    #[inline]
    pub fn is_forced(&self) -> bool {
        self.value.get().is_some()
    }

    /// Moves the produced value out, leaving the cell empty.
    ///
    /// Only used while tearing down stream nodes; a cell emptied this way must
    /// not be forced again.
    pub(crate) fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T: Default + 'static> Default for Memo<T> {
    /// Creates an unforced cell computing `T::default()`.
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> From<T> for Memo<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::unit(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => fmt::Debug::fmt(value, formatter),
            None => formatter.write_str("<unforced>"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Memo<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => fmt::Display::fmt(value, formatter),
            None => formatter.write_str("<unforced>"),
        }
    }
}

static_assertions::assert_impl_all!(Memo<i32>: Send, Sync);
static_assertions::assert_impl_all!(Memo<String>: Send, Sync);
static_assertions::assert_not_impl_any!(Memo<std::rc::Rc<i32>>: Send, Sync);
