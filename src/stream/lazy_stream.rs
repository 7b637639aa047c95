//! The lazy, memoized stream type and its combinators.

use std::fmt;
use std::sync::Arc;

use crate::control::Memo;
use crate::error::SequenceError;
use crate::persistent::PersistentList;

const STRUCTURE: &str = "stream";

/// A stream cell: the element and the rest of the stream, each memoized.
///
/// The head cell is reference counted on its own so that derived streams
/// re-exposing an element point at the same cell instead of a copy.
struct Node<T> {
    head: Arc<Memo<T>>,
    tail: Memo<Stream<T>>,
}

/// An immutable, possibly infinite sequence evaluated on demand.
///
/// Every node holds its head and its tail in separate [`Memo`] cells. Forcing
/// either one runs the underlying computation at most once, whichever thread
/// or derived stream observes it first, and every later observation sees the
/// same value.
///
/// Whether a stream is empty is known without forcing anything. Everything
/// past that is computed only when a consumer asks for it.
///
/// # Examples
///
/// ```rust
/// use memostream::stream::Stream;
///
/// let stream = Stream::cons(|| 1, Stream::empty).map(|n| n * 2);
/// assert_eq!(stream.to_vec(), vec![2]);
///
/// let naturals = Stream::iterate(0_u32, |n| n + 1);
/// assert_eq!(naturals.take(5).to_vec(), vec![0, 1, 2, 3, 4]);
/// ```
pub struct Stream<T> {
    node: Option<Arc<Node<T>>>,
}

impl<T> Stream<T> {
    /// Returns the empty stream.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { node: None }
    }

    pub(super) fn from_cells(head: Arc<Memo<T>>, tail: Memo<Self>) -> Self {
        Self {
            node: Some(Arc::new(Node { head, tail })),
        }
    }

    /// Returns `true` if the stream has no elements. Never forces anything.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the first element, forcing it if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] if the stream is empty.
    ///
    /// # Panics
    ///
    /// Propagates a panic raised by the head computation.
    pub fn head(&self) -> Result<&T, SequenceError> {
        self.head_option()
            .ok_or(SequenceError::empty(STRUCTURE, "head"))
    }

    /// Returns the first element, or `None` for the empty stream.
    #[must_use]
    pub fn head_option(&self) -> Option<&T> {
        self.node.as_ref().map(|node| node.head.force())
    }

    /// Returns the rest of the stream, forcing it if necessary.
    ///
    /// Forcing the tail never forces the head.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] if the stream is empty.
    pub fn tail(&self) -> Result<&Self, SequenceError> {
        self.tail_option()
            .ok_or(SequenceError::empty(STRUCTURE, "tail"))
    }

    fn tail_option(&self) -> Option<&Self> {
        self.node.as_ref().map(|node| node.tail.force())
    }

    /// Returns `true` if the first element has been produced.
    ///
    /// Always `false` for the empty stream.
    #[must_use]
    pub fn is_head_forced(&self) -> bool {
        self.node.as_ref().is_some_and(|node| node.head.is_forced())
    }

    /// Returns `true` if the rest of the stream has been produced.
    ///
    /// Always `false` for the empty stream.
    #[must_use]
    pub fn is_tail_forced(&self) -> bool {
        self.node.as_ref().is_some_and(|node| node.tail.is_forced())
    }

    /// Returns `true` if both streams start at the same node. All empty
    /// streams are identical.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (None, None) => true,
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns an iterator over references to the elements.
    ///
    /// Each step forces one head and one tail. Iterating the same stream again
    /// replays the memoized elements without recomputing them.
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> StreamIterator<'_, T> {
        StreamIterator { current: self }
    }

    /// Folds every element from the left. Eager: forces the whole stream and
    /// never returns on an infinite one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let stream: Stream<i32> = (1..=4).collect();
    /// assert_eq!(stream.fold_left(0, |total, n| total + n), 10);
    /// ```
    pub fn fold_left<B, F>(&self, seed: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(seed, function)
    }
}

impl<T: Send + Sync + 'static> Stream<T> {
    /// Creates a stream node from a head supplier and a tail supplier.
    ///
    /// Neither supplier runs here. Each runs at most once, when the head or
    /// the tail is first forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let stream = Stream::cons(|| "a", || Stream::unit("b"));
    /// assert!(!stream.is_head_forced());
    /// assert!(!stream.is_tail_forced());
    /// assert_eq!(stream.to_vec(), vec!["a", "b"]);
    /// ```
    pub fn cons<H, S>(head: H, tail: S) -> Self
    where
        H: Fn() -> T + Send + 'static,
        S: Fn() -> Self + Send + 'static,
    {
        Self::from_cells(Arc::new(Memo::new(head)), Memo::new(tail))
    }

    /// Creates a one-element stream whose head and (empty) tail are already
    /// produced.
    pub fn unit(value: T) -> Self {
        Self::from_cells(Arc::new(Memo::unit(value)), Memo::unit(Self::empty()))
    }

    /// Applies `function` to every element.
    ///
    /// Nothing is forced by this call. Each mapped head forces only the
    /// corresponding source head, and each mapped tail only the source tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let squares = Stream::generate(|index| index * index).map(|n| n + 1);
    /// assert_eq!(squares.take(3).to_vec(), vec![1, 2, 5]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> Stream<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.map_shared(Arc::new(function))
    }

    fn map_shared<U, F>(&self, function: Arc<F>) -> Stream<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let Some(node) = &self.node else {
            return Stream::empty();
        };

        let head = Arc::clone(&node.head);
        let head_function = Arc::clone(&function);
        let node = Arc::clone(node);
        Stream::cons(
            move || head_function(head.force()),
            move || node.tail.force().map_shared(Arc::clone(&function)),
        )
    }

    /// Maps every element to a stream and concatenates the results in order.
    ///
    /// Finding the first element of the result forces source heads until one
    /// maps to a non-empty stream; the flat-mapped remainder is appended
    /// through a deferred supplier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let stream: Stream<u32> = vec![1, 0, 2].into_iter().collect();
    /// let repeated = stream.flat_map(|n| (0..*n).map(|_| *n).collect());
    /// assert_eq!(repeated.to_vec(), vec![1, 2, 2]);
    /// ```
    #[must_use]
    pub fn flat_map<U, F>(&self, function: F) -> Stream<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> Stream<U> + Send + Sync + 'static,
    {
        self.flat_map_shared(Arc::new(function))
    }

    fn flat_map_shared<U, F>(&self, function: Arc<F>) -> Stream<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> Stream<U> + Send + Sync + 'static,
    {
        let mut current = self;
        while let Some(node) = &current.node {
            let mapped = function(node.head.force());
            if !mapped.is_empty() {
                let rest = Arc::clone(node);
                return mapped.append_with(move || {
                    rest.tail.force().flat_map_shared(Arc::clone(&function))
                });
            }
            current = node.tail.force();
        }
        Stream::empty()
    }

    /// Appends `other` after the elements of `self`.
    ///
    /// `other` itself is returned when `self` is empty, and `self` itself when
    /// `other` is empty. Otherwise every left-hand node is re-exposed lazily,
    /// sharing its head cell.
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let other = other.clone();
        self.append_shared(Arc::new(move || other.clone()))
    }

    /// Appends the stream produced by `supplier` after the elements of `self`.
    ///
    /// The supplier runs only when a consumer forces the tail of the last
    /// element of `self`; when `self` is empty that is immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let calls = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&calls);
    /// let stream = Stream::unit("a").append_with(move || {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    ///     Stream::unit("b")
    /// });
    ///
    /// assert_eq!(calls.load(Ordering::SeqCst), 0);
    /// assert_eq!(stream.to_vec(), vec!["a", "b"]);
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    /// ```
    #[must_use]
    pub fn append_with<S>(&self, supplier: S) -> Self
    where
        S: Fn() -> Self + Send + Sync + 'static,
    {
        self.append_shared(Arc::new(supplier))
    }

    fn append_shared<S>(&self, supplier: Arc<S>) -> Self
    where
        S: Fn() -> Self + Send + Sync + 'static,
    {
        let Some(node) = &self.node else {
            tracing::trace!("left-hand stream exhausted, producing appended stream");
            return supplier();
        };

        let node = Arc::clone(node);
        Self::from_cells(
            Arc::clone(&node.head),
            Memo::new(move || node.tail.force().append_shared(Arc::clone(&supplier))),
        )
    }

    /// Keeps the elements satisfying `predicate`, in order.
    ///
    /// This call forces source heads until the first match. On an infinite
    /// stream, forcing past the last match never returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let odd = Stream::iterate(0_u64, |n| n + 1).filter(|n| n % 2 == 1);
    /// assert_eq!(odd.take(3).to_vec(), vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filter_shared(Arc::new(predicate))
    }

    fn filter_shared<P>(&self, predicate: Arc<P>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let mut current = self;
        while let Some(node) = &current.node {
            if predicate(node.head.force()) {
                let node = Arc::clone(node);
                return Self::from_cells(
                    Arc::clone(&node.head),
                    Memo::new(move || node.tail.force().filter_shared(Arc::clone(&predicate))),
                );
            }
            current = node.tail.force();
        }
        Self::empty()
    }

    /// Returns the stream without its first `count` elements.
    ///
    /// Forces exactly the first `count` tails and none of the skipped heads.
    /// Skipping past the end yields the empty stream; `skip(0)` returns `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let stream: Stream<i32> = (0..5).collect();
    /// assert_eq!(stream.skip(3).to_vec(), vec![3, 4]);
    /// assert!(stream.skip(10).is_empty());
    /// ```
    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        let mut current = self;
        for skipped in 0..count {
            match current.tail_option() {
                Some(tail) => current = tail,
                None => {
                    tracing::trace!(requested = count, skipped, "skip ran past the end of the stream");
                    return Self::empty();
                }
            }
        }
        current.clone()
    }

    /// Returns at most the first `count` elements.
    ///
    /// Forces nothing. The last kept node has an already-empty tail, so the
    /// source is never forced beyond its `count`-th element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let prefix = Stream::generate(|index| index).take(3);
    /// assert_eq!(prefix.to_vec(), vec![0, 1, 2]);
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        match (&self.node, count) {
            (None, _) | (_, 0) => Self::empty(),
            (Some(node), 1) => {
                Self::from_cells(Arc::clone(&node.head), Memo::unit(Self::empty()))
            }
            (Some(node), _) => {
                let node = Arc::clone(node);
                Self::from_cells(
                    Arc::clone(&node.head),
                    Memo::new(move || node.tail.force().take(count - 1)),
                )
            }
        }
    }

    /// Returns the longest prefix whose elements satisfy `predicate`.
    ///
    /// This call forces the first head; later heads are tested as the result
    /// is traversed.
    #[must_use]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.take_while_shared(Arc::new(predicate))
    }

    fn take_while_shared<P>(&self, predicate: Arc<P>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match &self.node {
            Some(node) if predicate(node.head.force()) => {
                let node = Arc::clone(node);
                Self::from_cells(
                    Arc::clone(&node.head),
                    Memo::new(move || node.tail.force().take_while_shared(Arc::clone(&predicate))),
                )
            }
            _ => Self::empty(),
        }
    }

    /// Combines the elements of `self` and `other` pairwise, lazily.
    ///
    /// The result ends with the shorter input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let letters: Stream<char> = "abc".chars().collect();
    /// let naturals = Stream::generate(|index| index);
    /// let labelled = letters.zip_with(&naturals, |letter, index| format!("{letter}{index}"));
    /// assert_eq!(labelled.to_vec(), vec!["a0", "b1", "c2"]);
    /// ```
    #[must_use]
    pub fn zip_with<U, R, F>(&self, other: &Stream<U>, function: F) -> Stream<R>
    where
        U: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: Fn(&T, &U) -> R + Send + Sync + 'static,
    {
        self.zip_with_shared(other, Arc::new(function))
    }

    fn zip_with_shared<U, R, F>(&self, other: &Stream<U>, function: Arc<F>) -> Stream<R>
    where
        U: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: Fn(&T, &U) -> R + Send + Sync + 'static,
    {
        let (Some(left), Some(right)) = (&self.node, &other.node) else {
            return Stream::empty();
        };

        let (left_head, right_head) = (Arc::clone(&left.head), Arc::clone(&right.head));
        let head_function = Arc::clone(&function);
        let (left, right) = (Arc::clone(left), Arc::clone(right));
        Stream::cons(
            move || head_function(left_head.force(), right_head.force()),
            move || {
                left.tail
                    .force()
                    .zip_with_shared(right.tail.force(), Arc::clone(&function))
            },
        )
    }

    /// Forces the whole stream and converts it to a [`PersistentList`].
    #[must_use]
    pub fn to_list(&self) -> PersistentList<T>
    where
        T: Clone,
    {
        PersistentList::from(self.to_vec())
    }
}

impl<T: Clone> Stream<T> {
    /// Forces the whole stream and collects the elements in order. Never
    /// returns on an infinite stream; bound it with [`take`](Stream::take).
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Drop Implementation
// =============================================================================

impl<T> Drop for Stream<T> {
    // Forced tails form a chain of uniquely owned nodes on a fully traversed
    // stream; unlinking them one at a time keeps the drop off the call stack.
    fn drop(&mut self) {
        let mut next = self.node.take();
        while let Some(node) = next {
            next = Arc::into_inner(node)
                .and_then(|mut node| node.tail.take())
                .and_then(|mut tail| tail.node.take());
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to the elements of a [`Stream`].
pub struct StreamIterator<'a, T> {
    current: &'a Stream<T>,
}

impl<'a, T> Iterator for StreamIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.node.as_ref()?;
        let element = node.head.force();
        self.current = node.tail.force();
        Some(element)
    }
}

/// An owning iterator over the elements of a [`Stream`], yielding clones of
/// the memoized values.
pub struct StreamIntoIterator<T> {
    current: Stream<T>,
}

impl<T: Clone> Iterator for StreamIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.node.clone()?;
        let element = node.head.force().clone();
        self.current = node.tail.force().clone();
        Some(element)
    }
}

impl<T: Clone> IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = StreamIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        StreamIntoIterator { current: self }
    }
}

impl<'a, T> IntoIterator for &'a Stream<T> {
    type Item = &'a T;
    type IntoIter = StreamIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for Stream<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<T> Default for Stream<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

/// Shows the produced prefix without forcing anything: `?` marks an unforced
/// head and `..` an unforced tail.
impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = formatter.debug_list();
        let mut current = self;
        while let Some(node) = &current.node {
            match node.head.get() {
                Some(element) => entries.entry(element),
                None => entries.entry(&format_args!("?")),
            };
            match node.tail.get() {
                Some(tail) => current = tail,
                None => {
                    entries.entry(&format_args!(".."));
                    break;
                }
            }
        }
        entries.finish()
    }
}

static_assertions::assert_impl_all!(Stream<i32>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(Stream<std::rc::Rc<i32>>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted_naturals(counter: &Arc<AtomicUsize>) -> Stream<usize> {
        let counter = Arc::clone(counter);
        Stream::generate(move |index| {
            counter.fetch_add(1, Ordering::SeqCst);
            index
        })
    }

    #[rstest]
    fn test_empty_stream_accessors() {
        let stream: Stream<i32> = Stream::empty();
        assert!(stream.is_empty());
        assert_eq!(stream.head(), Err(SequenceError::empty("stream", "head")));
        assert_eq!(
            stream.tail().unwrap_err(),
            SequenceError::empty("stream", "tail")
        );
        assert!(!stream.is_head_forced());
        assert!(!stream.is_tail_forced());
    }

    #[rstest]
    fn test_cons_forces_nothing() {
        let stream = Stream::cons(|| 1, Stream::empty);
        assert!(!stream.is_empty());
        assert!(!stream.is_head_forced());
        assert!(!stream.is_tail_forced());
    }

    #[rstest]
    fn test_head_and_tail_force_independently() {
        let stream = Stream::cons(|| 1, Stream::empty);
        assert!(stream.tail().unwrap().is_empty());
        assert!(stream.is_tail_forced());
        assert!(!stream.is_head_forced());

        assert_eq!(stream.head(), Ok(&1));
        assert!(stream.is_head_forced());
    }

    #[rstest]
    fn test_unit_is_fully_forced() {
        let stream = Stream::unit(42);
        assert!(stream.is_head_forced());
        assert!(stream.is_tail_forced());
        assert_eq!(stream.to_vec(), vec![42]);
    }

    #[rstest]
    fn test_map_single_element() {
        let stream = Stream::cons(|| 1, Stream::empty).map(|n| n * 2);
        assert_eq!(stream.to_vec(), vec![2]);
    }

    #[rstest]
    fn test_map_forces_nothing_on_call() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mapped = counted_naturals(&counter).map(|n| n + 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(mapped.head(), Ok(&1));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_take_never_forces_past_last_element() {
        let counter = Arc::new(AtomicUsize::new(0));
        let naturals = counted_naturals(&counter);
        assert_eq!(naturals.take(5).to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(counter.load(Ordering::SeqCst), 5);
        assert!(!naturals.skip(4).is_tail_forced());
    }

    #[rstest]
    fn test_take_shares_head_cells() {
        let counter = Arc::new(AtomicUsize::new(0));
        let naturals = counted_naturals(&counter);
        let _ = naturals.take(3).to_vec();
        let _ = naturals.take(3).to_vec();
        assert_eq!(naturals.take(3).to_vec(), vec![0, 1, 2]);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![0])]
    #[case(3, vec![0, 1, 2])]
    #[case(10, vec![0, 1, 2, 3])]
    fn test_take_finite(#[case] count: usize, #[case] expected: Vec<i32>) {
        let stream: Stream<i32> = (0..4).collect();
        assert_eq!(stream.take(count).to_vec(), expected);
    }

    #[rstest]
    fn test_skip_forces_no_heads() {
        let counter = Arc::new(AtomicUsize::new(0));
        let rest = counted_naturals(&counter).skip(3);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(rest.head(), Ok(&3));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_skip_zero_returns_same_stream() {
        let stream: Stream<i32> = (0..4).collect();
        assert!(stream.skip(0).ptr_eq(&stream));
    }

    #[rstest]
    #[case(2, vec![2, 3])]
    #[case(4, vec![])]
    #[case(9, vec![])]
    fn test_skip_finite(#[case] count: usize, #[case] expected: Vec<i32>) {
        let stream: Stream<i32> = (0..4).collect();
        assert_eq!(stream.skip(count).to_vec(), expected);
    }

    #[rstest]
    fn test_append_with_defers_supplier() {
        let counter = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&counter);
        let stream = Stream::unit("a").append_with(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Stream::unit("b")
        });

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(stream.head(), Ok(&"a"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(stream.tail().unwrap().head(), Ok(&"b"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(stream.to_vec(), vec!["a", "b"]);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_append_with_empty_returns_same_stream() {
        let stream: Stream<i32> = (0..3).collect();
        assert!(stream.append(&Stream::empty()).ptr_eq(&stream));
        assert!(Stream::empty().append(&stream).ptr_eq(&stream));
    }

    #[rstest]
    fn test_append_order() {
        let first: Stream<i32> = (0..3).collect();
        let second: Stream<i32> = (3..6).collect();
        assert_eq!(first.append(&second).to_vec(), (0..6).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_flat_map_preserves_order_and_skips_empty_results() {
        let stream: Stream<u32> = vec![0, 2, 0, 0, 3, 1].into_iter().collect();
        let expanded = stream.flat_map(|n| (0..*n).map(|_| *n).collect());
        assert_eq!(expanded.to_vec(), vec![2, 2, 3, 3, 3, 1]);
    }

    #[rstest]
    fn test_flat_map_all_empty() {
        let stream: Stream<u32> = (0..100).collect();
        let expanded: Stream<u32> = stream.flat_map(|_| Stream::empty());
        assert!(expanded.is_empty());
    }

    #[rstest]
    fn test_filter_on_infinite_stream() {
        let evens = Stream::iterate(0_u64, |n| n + 1).filter(|n| n % 2 == 0);
        assert_eq!(evens.take(4).to_vec(), vec![0, 2, 4, 6]);
    }

    #[rstest]
    fn test_take_while() {
        let stream = Stream::iterate(1_u32, |n| n * 2).take_while(|n| *n < 20);
        assert_eq!(stream.to_vec(), vec![1, 2, 4, 8, 16]);
    }

    #[rstest]
    fn test_zip_with_stops_at_shorter() {
        let left: Stream<i32> = (0..3).collect();
        let right = Stream::generate(|index| index * 10);
        let zipped = left.zip_with(&right, |l, r| format!("{l}:{r}"));
        assert_eq!(zipped.to_vec(), vec!["0:0", "1:10", "2:20"]);
    }

    #[rstest]
    fn test_to_list() {
        let stream: Stream<i32> = (1..=3).collect();
        assert_eq!(stream.to_list(), (1..=3).collect());
    }

    #[rstest]
    fn test_iteration_is_restartable() {
        let stream = Stream::generate(|index| index).take(4);
        let first: Vec<usize> = stream.iter().copied().collect();
        let second: Vec<usize> = stream.clone().into_iter().collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_debug_never_forces() {
        let stream = Stream::generate(|index| index);
        assert_eq!(format!("{stream:?}"), "[?, ..]");
        let _ = stream.take(2).to_vec();
        assert_eq!(format!("{stream:?}"), "[0, 1, ..]");
        assert!(!stream.skip(2).is_head_forced());
        assert_eq!(format!("{:?}", Stream::<i32>::empty()), "[]");
        assert_eq!(format!("{:?}", Stream::unit(7)), "[7]");
    }

    #[rstest]
    fn test_drop_long_forced_stream_does_not_overflow() {
        let stream = Stream::generate(|index| index);
        let length = stream.iter().take(200_000).count();
        assert_eq!(length, 200_000);
        drop(stream);
    }
}
