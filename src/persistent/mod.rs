//! Persistent (immutable) data structures.
//!
//! - [`PersistentList`]: Persistent singly-linked list
//!
//! # Structural Sharing
//!
//! Prepending, dropping a prefix or appending builds a new version without
//! copying the nodes the old version still owns. Operations that would leave
//! a list unchanged hand back the very same nodes, observable through
//! [`PersistentList::ptr_eq`].
//!
//! # Examples
//!
//! ```rust
//! use memostream::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Ok(&1));
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list
//! assert!(extended.tail().ptr_eq(&list));
//! ```

mod list;

pub use list::{PersistentList, PersistentListIntoIterator, PersistentListIterator};
