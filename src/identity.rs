//! Identity and type queries over error chains.
//!
//! An error chain is walked the same way for every query:
//!
//! 1. The current error is checked.
//! 2. If it is an [`ErrorAggregate`] or an [`ErrorList`], each stored item is
//!    walked in insertion order, each one to the end of its own chain. Nothing
//!    after the aggregate is visited, since aggregates have no
//!    [`source`](Error::source).
//! 3. Otherwise the walk continues with [`Error::source`].
//!
//! Stepping from one item of an aggregate to the next is what
//! [`ErrorAggregate::rest`] does one level at a time; the walk does it without
//! allocating an aggregate per step.
//!
//! Identity is object identity: a target matches a node only if both are the
//! same object seen as the same type. An error stored as the first field of
//! its parent shares the parent's address, but is still a different error.
//! Errors keep their address once they are wrapped in a
//! [`SharedError`], so keep a clone of the handle to look an error up later:
//!
//! ```
//! use stackcause::{ErrorAggregate, SharedError, StackError, identity};
//!
//! let timeout = SharedError::from(StackError::new("timed out"));
//! let wrapped = StackError::wrap(timeout.clone(), "fetching config");
//!
//! let aggregate = ErrorAggregate::new();
//! aggregate.add(StackError::new("disk full"));
//! aggregate.add(wrapped);
//!
//! assert!(identity::is(&aggregate, timeout.as_dyn()));
//! assert!(!identity::is(&aggregate, &StackError::new("timed out")));
//! ```
//!
//! Errors compared by value rather than by address should be looked up by type
//! with [`extract`] or [`contains_type`].

use std::{borrow::Cow, error::Error};

use crate::{ErrorAggregate, ErrorList, SharedError};

/// Returns `true` if `target` is `err` itself or is reached by walking the
/// chain of `err`.
#[must_use]
pub fn is(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    walk(err, &mut |node: &(dyn Error + 'static)| same_object(node, target))
}

/// Returns a clone of the first error of type `T` found by walking the chain
/// of `err`.
///
/// # Examples
///
/// ```
/// use stackcause::{StackError, identity};
///
/// #[derive(Clone, Debug, PartialEq, thiserror::Error)]
/// #[error("user {0} not found")]
/// struct UserNotFound(u32);
///
/// let error = StackError::wrap(UserNotFound(7), "loading profile");
/// assert_eq!(identity::extract::<UserNotFound>(&error), Some(UserNotFound(7)));
/// assert_eq!(identity::extract::<std::fmt::Error>(&error), None);
/// ```
#[must_use]
pub fn extract<T: Error + Clone + 'static>(err: &(dyn Error + 'static)) -> Option<T> {
    let mut found = None;
    walk(err, &mut |node: &(dyn Error + 'static)| match node.downcast_ref::<T>() {
        Some(typed) => {
            found = Some(typed.clone());
            true
        }
        None => false,
    });
    found
}

/// Returns `true` if an error of type `T` is found by walking the chain of
/// `err`.
#[must_use]
pub fn contains_type<T: Error + 'static>(err: &(dyn Error + 'static)) -> bool {
    walk(err, &mut |node: &(dyn Error + 'static)| node.is::<T>())
}

/// Walks the chain of `err`, stopping at the first node `visit` accepts.
fn walk(
    err: &(dyn Error + 'static),
    visit: &mut dyn FnMut(&(dyn Error + 'static)) -> bool,
) -> bool {
    let mut current = Some(err);

    while let Some(node) = current {
        if visit(node) {
            return true;
        }

        if let Some(items) = aggregate_items(node) {
            return items.iter().any(|item| walk(item.as_dyn(), &mut *visit));
        }

        current = node.source();
    }

    false
}

/// Returns the stored items if `node` is one of our aggregates.
///
/// A guarded aggregate is snapshotted so no lock is held while its items are
/// walked.
fn aggregate_items<'a>(node: &'a (dyn Error + 'static)) -> Option<Cow<'a, [SharedError]>> {
    if let Some(aggregate) = node.downcast_ref::<ErrorAggregate>() {
        return Some(Cow::Owned(aggregate.errors()));
    }

    node.downcast_ref::<ErrorList>()
        .map(|list| Cow::Borrowed(list.as_slice()))
}

/// Same address and same vtable, so a parent never matches the child stored
/// at its start.
#[allow(ambiguous_wide_pointer_comparisons)]
fn same_object(a: &(dyn Error + 'static), b: &(dyn Error + 'static)) -> bool {
    core::ptr::eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StackError;

    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    #[error("user {0} not found")]
    struct UserNotFound(u32);

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("quota exceeded")]
    struct QuotaExceeded;

    #[test]
    fn test_is_self() {
        let error = StackError::new("boom");
        assert!(is(&error, &error));
        assert!(!is(&error, &StackError::new("boom")));
    }

    #[test]
    fn test_is_follows_causes() {
        let root = SharedError::from(UserNotFound(1));
        let middle = SharedError::from(StackError::wrap(root.clone(), "loading profile"));
        let top = StackError::wrap(middle.clone(), "handling request");

        assert!(is(&top, root.as_dyn()));
        assert!(is(&top, middle.as_dyn()));
        assert!(!is(root.as_dyn(), &top));
    }

    #[test]
    fn test_parent_and_first_field_are_different_errors() {
        #[derive(Debug, thiserror::Error)]
        #[error("loading config")]
        struct LoadConfig(#[source] std::io::Error);

        let outer = LoadConfig(std::io::Error::other("missing"));
        let inner = outer.source().expect("LoadConfig always has a source");
        assert!(core::ptr::addr_eq(
            &outer as *const LoadConfig,
            inner as *const dyn Error
        ));

        assert!(is(&outer, inner));
        assert!(!is(inner, &outer));
        assert!(!is(&StackError::wrap(QuotaExceeded, "unrelated"), &outer));
    }

    #[test]
    fn test_is_visits_every_aggregate_item() {
        let first = SharedError::from(UserNotFound(1));
        let second = SharedError::from(QuotaExceeded);
        let third = SharedError::from(UserNotFound(3));

        let list = ErrorList::from_iter([first.clone(), second.clone()]);
        let aggregate = ErrorAggregate::new();
        aggregate.add(list);
        aggregate.add(StackError::wrap(third.clone(), "third"));

        for target in [&first, &second, &third] {
            assert!(is(&aggregate, target.as_dyn()));
        }
        assert!(!is(&aggregate, &UserNotFound(1)));
    }

    #[test]
    fn test_extract_in_walk_order() {
        let list = ErrorList::from_iter([
            SharedError::from(QuotaExceeded),
            SharedError::from(StackError::wrap(UserNotFound(2), "second")),
            SharedError::from(UserNotFound(3)),
        ]);

        assert_eq!(extract::<UserNotFound>(&list), Some(UserNotFound(2)));
        assert!(contains_type::<QuotaExceeded>(&list));
        assert!(!contains_type::<std::fmt::Error>(&list));
    }

    #[test]
    fn test_empty_aggregates_match_nothing() {
        let aggregate = ErrorAggregate::new();
        let list = ErrorList::new();

        assert_eq!(extract::<UserNotFound>(&aggregate), None);
        assert_eq!(extract::<UserNotFound>(&list), None);
        assert!(!contains_type::<UserNotFound>(&aggregate));
        assert!(is(&aggregate, &aggregate));
        assert!(!is(&aggregate, &list));
    }

    #[test]
    fn test_extract_aggregate_itself() {
        let inner = ErrorList::from_iter([SharedError::from(QuotaExceeded)]);
        let outer = StackError::wrap(inner, "batch failed");
        assert_eq!(extract::<ErrorList>(&outer).map(|list| list.len()), Some(1));
    }
}
