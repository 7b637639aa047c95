//! Constructors that build streams from existing data or generator functions.

use std::iter::FromIterator;
use std::sync::Arc;

use super::Stream;
use crate::control::Memo;
use crate::persistent::PersistentList;

impl<T: Send + Sync + 'static> Stream<T> {
    /// Creates a stream holding the elements of `elements`, in order.
    ///
    /// Every head and tail is already produced, so traversal runs no
    /// computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let stream = Stream::from_vec(vec![1, 2, 3]);
    /// assert!(stream.is_head_forced());
    /// assert_eq!(stream.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        elements
            .into_iter()
            .rev()
            .fold(Self::empty(), |tail, element| {
                Self::from_cells(Arc::new(Memo::unit(element)), Memo::unit(tail))
            })
    }

    /// Creates a lazy stream over the elements of `list`.
    ///
    /// The list is walked one node per forced tail.
    #[must_use]
    pub fn from_list(list: &PersistentList<T>) -> Self
    where
        T: Clone,
    {
        let Some((head, tail)) = list.uncons() else {
            return Self::empty();
        };
        Self::from_cells(
            Arc::new(Memo::unit(head.clone())),
            Memo::new(move || Self::from_list(&tail)),
        )
    }

    /// Creates a lazy stream over a copy of `slice`.
    ///
    /// Equivalent to [`from_window`](Stream::from_window) over the whole slice.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_window(Arc::from(slice), 0, slice.len())
    }

    /// Creates a stream of `length` elements of `elements`, starting at
    /// `offset`.
    ///
    /// Elements are read when their head is forced. The window is not checked
    /// up front: forcing an element outside `elements` panics at that point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    /// use std::sync::Arc;
    ///
    /// let letters: Arc<[char]> = Arc::from(&['a', 'b', 'c', 'd'][..]);
    /// let middle = Stream::from_window(letters, 1, 2);
    /// assert_eq!(middle.to_vec(), vec!['b', 'c']);
    /// ```
    #[must_use]
    pub fn from_window(elements: Arc<[T]>, offset: usize, length: usize) -> Self
    where
        T: Clone,
    {
        if length == 0 {
            return Self::empty();
        }
        let source = Arc::clone(&elements);
        Self::cons(
            move || source[offset].clone(),
            move || Self::from_window(Arc::clone(&elements), offset + 1, length - 1),
        )
    }

    /// Creates the infinite stream `function(0), function(1), ...`.
    ///
    /// Each element is computed on its own when its head is forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let squares = Stream::generate(|index| index * index);
    /// assert_eq!(squares.skip(3).take(2).to_vec(), vec![9, 16]);
    /// ```
    #[must_use]
    pub fn generate<F>(function: F) -> Self
    where
        F: Fn(usize) -> T + Send + Sync + 'static,
    {
        Self::generate_from(Arc::new(function), 0)
    }

    fn generate_from<F>(function: Arc<F>, index: usize) -> Self
    where
        F: Fn(usize) -> T + Send + Sync + 'static,
    {
        let head_function = Arc::clone(&function);
        Self::cons(
            move || head_function(index),
            move || Self::generate_from(Arc::clone(&function), index + 1),
        )
    }

    /// Creates the infinite stream `seed, step(seed), step(step(seed)), ...`.
    ///
    /// Every head is produced by the time its node exists: forcing a tail
    /// applies `step` to the already produced element before it. Advancing
    /// with [`skip`](Stream::skip) therefore runs `step` once per skipped
    /// element, and no element depends on an unforced predecessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::stream::Stream;
    ///
    /// let powers = Stream::iterate(1_u64, |n| n * 2);
    /// assert_eq!(powers.take(5).to_vec(), vec![1, 2, 4, 8, 16]);
    /// ```
    #[must_use]
    pub fn iterate<F>(seed: T, step: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        Self::iterate_from(seed, Arc::new(step))
    }

    fn iterate_from<F>(element: T, step: Arc<F>) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        let head = Arc::new(Memo::unit(element));
        let previous = Arc::clone(&head);
        Self::from_cells(
            head,
            Memo::new(move || Self::iterate_from(step(previous.force()), Arc::clone(&step))),
        )
    }
}

impl<T: Send + Sync + 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Send + Sync + 'static> From<Vec<T>> for Stream<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: Clone + Send + Sync + 'static> From<&PersistentList<T>> for Stream<T> {
    fn from(list: &PersistentList<T>) -> Self {
        Self::from_list(list)
    }
}
