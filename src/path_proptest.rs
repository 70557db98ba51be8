//! Property-based tests for the path-list operations.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{append_path, prepend_path, DELIMITER};
    use proptest::prelude::*;

    /// Strategy for a single path component: non-empty and delimiter-free.
    fn component() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_./-]{1,20}"
    }

    /// Strategy for an existing path list of 0..5 components.
    fn path_list() -> impl Strategy<Value = String> {
        prop::collection::vec(component(), 0..5)
            .prop_map(|parts| parts.join(&DELIMITER.to_string()))
    }

    proptest! {
        /// Property: prepending puts the new entry first.
        #[test]
        fn prepend_puts_entry_first(old in path_list(), add in component()) {
            let result = prepend_path(&old, &add).unwrap();
            prop_assert_eq!(result.split(DELIMITER).next().unwrap(), add.as_str());
        }

        /// Property: appending puts the new entry last.
        #[test]
        fn append_puts_entry_last(old in path_list(), add in component()) {
            let result = append_path(&old, &add).unwrap();
            prop_assert_eq!(result.split(DELIMITER).next_back().unwrap(), add.as_str());
        }

        /// Property: existing entries survive in order.
        #[test]
        fn existing_entries_survive(old in path_list(), add in component()) {
            let before: Vec<&str> =
                old.split(DELIMITER).filter(|p| !p.is_empty()).collect();
            let result = append_path(&old, &add).unwrap();
            let after: Vec<&str> = result.split(DELIMITER).collect();
            prop_assert_eq!(&after[..after.len() - 1], &before[..]);
        }

        /// Property: splicing is deterministic.
        #[test]
        fn splice_is_deterministic(old in path_list(), add in component()) {
            prop_assert_eq!(prepend_path(&old, &add).unwrap(), prepend_path(&old, &add).unwrap());
            prop_assert_eq!(append_path(&old, &add).unwrap(), append_path(&old, &add).unwrap());
        }

        /// Property: an empty added path is always rejected.
        #[test]
        fn empty_add_is_rejected(old in path_list()) {
            prop_assert!(prepend_path(&old, "").is_err());
            prop_assert!(append_path(&old, "").is_err());
        }
    }
}
