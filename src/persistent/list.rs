//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable cons-list whose
//! derived lists share every unmodified suffix with the list they came from.
//!
//! # Overview
//!
//! - O(1) prepend (`cons`), head access, tail access and length
//! - O(n) index access, append and reverse
//! - Derived operations return the original list (the same nodes, not an
//!   equal copy) whenever the result would be unchanged
//!
//! Nodes are reference counted with [`Arc`], so lists can be shared between
//! threads when the elements can.
//!
//! # Examples
//!
//! ```rust
//! use memostream::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Ok(&1));
//! assert_eq!(list.len(), 3);
//!
//! // The original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//!
//! // Taking at least every element returns the very same list
//! assert!(list.take(10).ptr_eq(&list));
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0):     0 -> [1 -> 2 -> 3 -> nil]  // shares list1
//! list3 = list1.drop_first(1):    [2 -> 3 -> nil]       // a suffix of list1
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::sync::Arc;

use crate::error::SequenceError;

const STRUCTURE: &str = "list";

struct Node<T> {
    element: T,
    next: Option<Arc<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation    | Complexity |
/// |--------------|------------|
/// | `new`        | O(1)       |
/// | `cons`       | O(1)       |
/// | `head`       | O(1)       |
/// | `tail`       | O(1)       |
/// | `len`        | O(1)       |
/// | `drop_first` | O(n)       |
/// | `take`       | O(n), O(1) when `n >= len` |
/// | `append`     | O(len of `self`) |
/// | `reverse`    | O(n)       |
///
/// # Examples
///
/// ```rust
/// use memostream::persistent::PersistentList;
///
/// let list = PersistentList::singleton(42);
/// assert_eq!(list.head(), Ok(&42));
/// assert!(list.tail().is_empty());
/// ```
pub struct PersistentList<T> {
    head: Option<Arc<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list from a Vec, keeping the Vec's order.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        let mut head: Option<Arc<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(Arc::new(Node {
                element,
                next: head,
            }));
        }
        Self { head, length }
    }

    /// Prepends an element, sharing every node of `self`.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let tail = PersistentList::singleton(2);
    /// let list = tail.cons(1);
    /// assert_eq!(list.head(), Ok(&1));
    /// assert!(list.tail().ptr_eq(&tail));
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list = PersistentList::singleton(1);
    /// assert_eq!(list.head(), Ok(&1));
    ///
    /// let empty: PersistentList<i32> = PersistentList::new();
    /// assert!(empty.head().is_err());
    /// ```
    #[inline]
    pub fn head(&self) -> Result<&T, SequenceError> {
        self.head_option()
            .ok_or(SequenceError::empty(STRUCTURE, "head"))
    }

    /// Returns the first element, or `None` for the empty list.
    #[inline]
    #[must_use]
    pub fn head_option(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element.
    ///
    /// The tail of the empty list is the empty list. The result shares every
    /// node with `self`.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length - 1,
        })
    }

    /// Decomposes the list into its head and tail, or `None` if it is empty.
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length - 1,
            };
            (&node.element, tail)
        })
    }

    /// Returns a list with the first element replaced and the same tail.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// let replaced = list.set_head(10).unwrap();
    /// assert_eq!(replaced.head(), Ok(&10));
    /// assert!(replaced.tail().ptr_eq(&list.tail()));
    /// ```
    pub fn set_head(&self, element: T) -> Result<Self, SequenceError> {
        if self.is_empty() {
            return Err(SequenceError::empty(STRUCTURE, "set_head"));
        }
        Ok(self.tail().cons(element))
    }

    /// Returns a reference to the element at `index`, if any.
    ///
    /// # Complexity
    ///
    /// O(index)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if both lists start at the same node.
    ///
    /// This is reference identity, not equality: two separately built lists
    /// with equal elements are equal but not identical. All empty lists are
    /// identical.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// let copy: PersistentList<i32> = (1..=3).collect();
    /// assert!(list.ptr_eq(&list.clone()));
    /// assert!(!list.ptr_eq(&copy));
    /// assert_eq!(list, copy);
    /// ```
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (None, None) => true,
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_ref(),
            remaining: self.length,
        }
    }

    /// Returns the list without its first `count` elements.
    ///
    /// The result is the original suffix of `self`, not a copy. Dropping more
    /// elements than the list holds yields the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let suffix = PersistentList::singleton(73);
    /// let list = suffix.cons(37).cons(42);
    ///
    /// assert!(list.drop_first(2).ptr_eq(&suffix));
    /// assert!(list.drop_first(10).is_empty());
    /// ```
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let count = count.min(self.length);
        let mut current = self.head.as_ref();
        for _ in 0..count {
            current = current.and_then(|node| node.next.as_ref());
        }
        Self {
            head: current.cloned(),
            length: self.length - count,
        }
    }

    /// Removes the longest prefix whose elements satisfy `predicate` and
    /// returns the remaining suffix of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (0..10).collect();
    /// assert_eq!(list.drop_while(|n| *n < 5).head(), Ok(&5));
    /// assert!(list.drop_while(|_| true).is_empty());
    /// ```
    #[must_use]
    pub fn drop_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let prefix = self.iter().take_while(|element| predicate(element)).count();
        self.drop_first(prefix)
    }

    /// Folds the list from the left: `function(...function(seed, first)..., last)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// let digits = list.fold_left(String::new(), |text, n| format!("{text}{n}"));
    /// assert_eq!(digits, "1234");
    /// ```
    pub fn fold_left<B, F>(&self, seed: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(seed, function)
    }

    /// Folds the list from the right: `function(first, ...function(last, seed)...)`.
    ///
    /// Evaluated without recursion, so long lists do not exhaust the stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// let digits = list.fold_right(String::new(), |n, text| format!("{text}{n}"));
    /// assert_eq!(digits, "4321");
    /// ```
    pub fn fold_right<B, F>(&self, seed: B, mut function: F) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        let elements: Vec<&T> = self.iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(seed, |accumulator, element| function(element, accumulator))
    }

    /// Applies `function` to every element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// let doubled = list.map(|n| n * 2);
    /// assert_eq!(doubled, (1..=3).map(|n| n * 2).collect());
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, mut function: F) -> PersistentList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.fold_right(PersistentList::new(), |element, accumulator| {
            accumulator.cons(function(element))
        })
    }

    /// Combines the elements of `self` and `other` pairwise.
    ///
    /// The result is as long as the shorter input; the longer input's extra
    /// elements are never visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let letters: PersistentList<char> = "abcde".chars().collect();
    /// let numbers: PersistentList<u32> = (1..=4).collect();
    /// let zipped = letters.zip_with(&numbers, |letter, n| format!("{letter}{n}"));
    /// assert_eq!(zipped.len(), 4);
    /// assert_eq!(zipped.head(), Ok(&"a1".to_string()));
    /// ```
    #[must_use]
    pub fn zip_with<U, R, F>(&self, other: &PersistentList<U>, mut function: F) -> PersistentList<R>
    where
        F: FnMut(&T, &U) -> R,
    {
        self.iter()
            .zip(other.iter())
            .map(|(left, right)| function(left, right))
            .collect()
    }

    /// Returns `true` if every element satisfies `predicate` (vacuously true
    /// for the empty list).
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().all(predicate)
    }

    /// Returns `true` if at least one element satisfies `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }

    /// Returns the cumulative results of a left fold, starting with `seed`.
    ///
    /// The result has one more element than `self` and runs left to right:
    /// `seed` first, the full fold last. Implementations that build the
    /// results by prepending return them in the opposite order; reverse this
    /// list to match those.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// let sums = list.scan_left(0, |total, n| total + n);
    /// assert_eq!(sums, vec![0, 1, 3, 6, 10].into());
    /// ```
    #[must_use]
    pub fn scan_left<B, F>(&self, seed: B, mut function: F) -> PersistentList<B>
    where
        B: Clone,
        F: FnMut(B, &T) -> B,
    {
        let mut results = Vec::with_capacity(self.length + 1);
        let mut accumulator = seed;
        results.push(accumulator.clone());

        for element in self {
            accumulator = function(accumulator, element);
            results.push(accumulator.clone());
        }

        PersistentList::build_from_vec(results)
    }
}

impl<T: Clone> PersistentList<T> {
    /// Creates a list from a slice, keeping its order.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::build_from_vec(slice.to_vec())
    }

    /// Appends `other` after the elements of `self`.
    ///
    /// Returns `other` itself when `self` is empty and `self` itself when
    /// `other` is empty. Otherwise every node of `self` is rebuilt with `other`
    /// as the shared final tail.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `self.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let first: PersistentList<i32> = (0..5).collect();
    /// let second: PersistentList<i32> = (5..10).collect();
    /// let combined = first.append(&second);
    ///
    /// assert_eq!(combined, (0..10).collect());
    /// assert!(combined.drop_first(5).ptr_eq(&second));
    /// assert!(first.append(&PersistentList::new()).ptr_eq(&first));
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let mut elements: Vec<T> = self.iter().cloned().collect();

        let mut head = other.head.clone();
        let mut length = other.length;
        while let Some(element) = elements.pop() {
            head = Some(Arc::new(Node {
                element,
                next: head,
            }));
            length += 1;
        }
        Self { head, length }
    }

    /// Returns the first `count` elements.
    ///
    /// When `count` covers the whole list, `self` is returned unchanged (the
    /// same nodes); `count == 0` yields the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=5).collect();
    /// assert_eq!(list.take(3), (1..=3).collect());
    /// assert!(list.take(5).ptr_eq(&list));
    /// assert!(list.take(0).is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        if count >= self.length {
            return self.clone();
        }
        self.iter().take(count).cloned().collect()
    }

    /// Returns the longest prefix whose elements satisfy `predicate`.
    ///
    /// When every element matches, `self` is returned unchanged.
    #[must_use]
    pub fn take_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let prefix = self.iter().take_while(|element| predicate(element)).count();
        self.take(prefix)
    }

    /// Returns the elements in reverse order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// assert_eq!(list.reverse(), (1..=3).rev().collect());
    /// assert_eq!(list.reverse().reverse(), list);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.fold_left(Self::new(), |reversed, element| {
            reversed.cons(element.clone())
        })
    }

    /// Keeps the elements satisfying `predicate`, in order.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.fold_right(Self::new(), |element, accumulator| {
            if predicate(element) {
                accumulator.cons(element.clone())
            } else {
                accumulator
            }
        })
    }

    /// Maps every element to a list and concatenates the results in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memostream::persistent::PersistentList;
    ///
    /// let words: PersistentList<&str> = vec!["First", "Last"].into();
    /// let letters = words.flat_map(|word| word.chars().collect());
    /// assert_eq!(letters, "FirstLast".chars().collect());
    /// ```
    #[must_use]
    pub fn flat_map<U, F>(&self, mut function: F) -> PersistentList<U>
    where
        U: Clone,
        F: FnMut(&T) -> PersistentList<U>,
    {
        self.fold_right(PersistentList::new(), |element, accumulator| {
            function(element).append(&accumulator)
        })
    }
}

// =============================================================================
// Drop Implementation
// =============================================================================

impl<T> Drop for PersistentList<T> {
    // Unlinks uniquely owned nodes one at a time; the default recursive drop
    // would overflow the stack on long lists.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            next = Arc::into_inner(node).and_then(|mut node| node.next.take());
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a Arc<Node<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, tail) = self.list.uncons()?;
        let element = head.clone();
        self.list = tail;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentList<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for PersistentList<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self::build_from_vec(elements)
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.ptr_eq(other) || self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

static_assertions::assert_impl_all!(PersistentList<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(PersistentList<std::rc::Rc<i32>>: Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentListVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(PersistentList::build_from_vec(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentList<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentListVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
