#![cfg(feature = "persistent")]
//! Unit tests for PersistentList.
//!
//! These tests exercise the list through its public API only.

use memostream::error::SequenceError;
use memostream::persistent::PersistentList;
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_list() {
    let list: PersistentList<i32> = PersistentList::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list, PersistentList::default());
}

#[rstest]
fn test_cons_adds_element_to_front() {
    let list = PersistentList::new().cons(1);
    assert_eq!(list.head(), Ok(&1));
    assert_eq!(list.len(), 1);
}

#[rstest]
fn test_from_slice_keeps_order() {
    let list = PersistentList::from_slice(&[3, 1, 2]);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
}

#[rstest]
fn test_construction_paths_agree() {
    let consed = PersistentList::new().cons("c").cons("b").cons("a");
    let from_vec: PersistentList<&str> = vec!["a", "b", "c"].into();
    let collected: PersistentList<&str> = ["a", "b", "c"].into_iter().collect();
    let sliced = PersistentList::from_slice(&["a", "b", "c"]);

    assert_eq!(consed, from_vec);
    assert_eq!(from_vec, collected);
    assert_eq!(collected, sliced);
}

// =============================================================================
// Accessors on the Empty List
// =============================================================================

#[rstest]
fn test_head_on_empty_list_fails() {
    let list: PersistentList<String> = PersistentList::new();
    let error = list.head().unwrap_err();
    assert_eq!(error, SequenceError::empty("list", "head"));
    assert_eq!(error.to_string(), "cannot call head() on an empty list");
}

#[rstest]
fn test_set_head_on_empty_list_fails() {
    let list: PersistentList<String> = PersistentList::new();
    assert_eq!(
        list.set_head("x".to_string()).unwrap_err().operation(),
        "set_head"
    );
}

#[rstest]
fn test_tail_and_uncons_on_empty_list() {
    let list: PersistentList<i32> = PersistentList::new();
    assert!(list.tail().is_empty());
    assert!(list.uncons().is_none());
}

// =============================================================================
// Structural Sharing
// =============================================================================

#[rstest]
fn test_cons_shares_original() {
    let original: PersistentList<i32> = (1..=3).collect();
    let extended = original.cons(0);
    assert!(extended.tail().ptr_eq(&original));
    assert_eq!(original.len(), 3);
}

#[rstest]
fn test_take_at_least_length_returns_same_list() {
    let list: PersistentList<i32> = (0..8).collect();
    for count in [8, 9, 100] {
        assert!(list.take(count).ptr_eq(&list));
    }
    assert!(!list.take(7).ptr_eq(&list));
}

#[rstest]
fn test_append_empty_returns_same_list() {
    let list: PersistentList<i32> = (0..8).collect();
    assert!(list.append(&PersistentList::new()).ptr_eq(&list));
}

#[rstest]
fn test_append_shares_right_operand() {
    let left: PersistentList<i32> = (0..3).collect();
    let right: PersistentList<i32> = (3..6).collect();
    let combined = left.append(&right);
    assert_eq!(combined.len(), 6);
    assert!(combined.drop_first(3).ptr_eq(&right));
}

#[rstest]
fn test_drop_while_returns_suffix() {
    let suffix: PersistentList<i32> = (5..10).collect();
    let list = suffix.cons(4).cons(3);
    assert!(list.drop_while(|n| *n < 5).ptr_eq(&suffix));
}

// =============================================================================
// Equality, Hashing and Formatting
// =============================================================================

#[rstest]
fn test_singletons_compare_by_value() {
    assert_eq!(PersistentList::singleton(5), PersistentList::singleton(5));
    assert_ne!(PersistentList::singleton(None), PersistentList::singleton(Some(5)));
}

#[rstest]
#[case(vec![1, 2], vec![1, 2, 3])]
#[case(vec![1, 2, 3], vec![1, 2])]
#[case(vec![], vec![1])]
fn test_common_prefix_is_not_equal(#[case] left: Vec<i32>, #[case] right: Vec<i32>) {
    let left: PersistentList<i32> = left.into();
    let right: PersistentList<i32> = right.into();
    assert_ne!(left, right);
}

#[rstest]
fn test_equal_lists_hash_equally() {
    let mut set = HashSet::new();
    set.insert((1..=3).collect::<PersistentList<i32>>());
    set.insert(PersistentList::new().cons(3).cons(2).cons(1));
    assert_eq!(set.len(), 1);
}

#[rstest]
#[case(PersistentList::new(), "[]")]
#[case(PersistentList::singleton(None), "[None]")]
#[case(vec![Some(1), None, Some(3)].into(), "[Some(1), None, Some(3)]")]
fn test_debug_format(#[case] list: PersistentList<Option<i32>>, #[case] expected: &str) {
    assert_eq!(format!("{list:?}"), expected);
}

#[rstest]
fn test_display_format() {
    let list: PersistentList<&str> = vec!["a", "b"].into();
    assert_eq!(list.to_string(), "[a, b]");
}

// =============================================================================
// Folding and Transformation
// =============================================================================

#[rstest]
fn test_reverse_is_involution() {
    let list: PersistentList<i32> = vec![1, 2, 3].into();
    assert_eq!(list.reverse(), vec![3, 2, 1].into());
    assert_eq!(list.reverse().reverse(), list);
}

#[rstest]
fn test_map_filter_flat_map_chain() {
    let list: PersistentList<i32> = (1..=6).collect();
    let result = list
        .filter(|n| n % 2 == 0)
        .map(|n| n * 10)
        .flat_map(|n| vec![*n, n + 1].into());
    assert_eq!(result, vec![20, 21, 40, 41, 60, 61].into());
}

#[rstest]
fn test_fold_right_on_long_list_does_not_overflow() {
    let list: PersistentList<u64> = (0..100_000).collect();
    let total = list.fold_right(0_u64, |n, total| total + n);
    assert_eq!(total, 4_999_950_000);
}

#[rstest]
fn test_scan_left_running_product() {
    let list: PersistentList<u32> = (1..=5).collect();
    let products = list.scan_left(1, |product, n| product * n);
    assert_eq!(products, vec![1, 1, 2, 6, 24, 120].into());
}

#[rstest]
fn test_zip_with_is_bounded_by_shorter_list() {
    let long: PersistentList<i32> = (0..10).collect();
    let short: PersistentList<i32> = (0..3).collect();
    assert_eq!(long.zip_with(&short, |a, b| a * b), vec![0, 1, 4].into());
}

#[rstest]
fn test_for_all_and_exists() {
    let list: PersistentList<i32> = vec![2, 4, 6].into();
    assert!(list.for_all(|n| n % 2 == 0));
    assert!(!list.exists(|n| n % 2 == 1));
}

// =============================================================================
// Thread Safety
// =============================================================================

#[rstest]
fn test_list_shared_between_threads() {
    let list = Arc::new((0..1000).collect::<PersistentList<i32>>());

    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                let extended = list.cons(offset);
                (extended.len(), extended.tail().ptr_eq(&list))
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (1001, true));
    }
}
