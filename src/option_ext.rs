//! Aggregate operations on an `Option<ErrorList>` that starts out as `None`.
//!
//! Code that usually succeeds should not pay for an error collection up
//! front. Keep an `Option<ErrorList>` and call the [`AggregateOptionExt`]
//! methods on it: writers allocate the list the first time an error actually
//! arrives, and readers treat `None` as "no errors".
//!
//! ```
//! use stackcause::{AggregateOptionExt, ErrorList, StackError};
//!
//! fn check(values: &[i32]) -> Option<ErrorList> {
//!     let mut errors: Option<ErrorList> = None;
//!     for value in values {
//!         if *value < 0 {
//!             errors.add(StackError::new(format!("{value} is negative")));
//!         }
//!     }
//!     errors
//! }
//!
//! assert!(check(&[1, 2, 3]).is_none());
//! assert_eq!(check(&[-1, 2, -3]).error_text(), "-1 is negative\n-3 is negative");
//! ```
//!
//! This is for single-threaded code. Several threads racing to allocate the
//! same `None` would each allocate their own list; use a pre-allocated
//! [`ErrorAggregate`](crate::ErrorAggregate) to share one between threads.

use std::error::Error;

use crate::{ErrorList, SharedError};

/// Aggregate operations on an optional [`ErrorList`].
///
/// Writers allocate the list on first use. `None` reads as an empty list,
/// except for [`errors`](Self::errors) which tells the two apart.
pub trait AggregateOptionExt: sealed::Sealed {
    /// Appends an error, allocating the list if needed.
    fn add(&mut self, error: impl Into<SharedError>) -> &mut ErrorList;

    /// Appends every error. Nothing is allocated if `errors` is empty.
    fn add_all<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>;

    /// Appends an error unless it is already stored, allocating the list if
    /// needed. Returns `true` if the error was added.
    fn add_once(&mut self, error: impl Into<SharedError>) -> bool;

    /// Calls [`add_once`](Self::add_once) for every error.
    fn add_once_all<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>;

    /// Returns a copy of the stored errors, or `None` if no list was ever
    /// allocated.
    fn errors(&self) -> Option<Vec<SharedError>>;

    /// Returns the text of every stored error, one per line, or an empty
    /// string if there are none.
    fn error_text(&self) -> String;

    /// Returns the stored errors as one error. See
    /// [`ErrorList::err_or_nil`].
    fn err_or_nil(&self) -> Option<SharedError>;

    /// Consumes the option: `Ok(())` if there are no errors. See
    /// [`ErrorList::into_result`].
    fn into_result(self) -> Result<(), SharedError>;

    /// Clears the stored errors. Does nothing if no list was allocated.
    fn reset(&mut self);

    /// Returns `true` if `target` is found among the stored errors.
    fn is(&self, target: &(dyn Error + 'static)) -> bool;

    /// Returns a clone of the first error of type `T` among the stored
    /// errors.
    fn extract<T: Error + Clone + 'static>(&self) -> Option<T>;
}

impl AggregateOptionExt for Option<ErrorList> {
    fn add(&mut self, error: impl Into<SharedError>) -> &mut ErrorList {
        let list = self.get_or_insert_with(ErrorList::new);
        list.add(error);
        list
    }

    fn add_all<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>,
    {
        for error in errors {
            self.add(error);
        }
    }

    fn add_once(&mut self, error: impl Into<SharedError>) -> bool {
        self.get_or_insert_with(ErrorList::new).add_once(error)
    }

    fn add_once_all<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>,
    {
        for error in errors {
            self.add_once(error);
        }
    }

    fn errors(&self) -> Option<Vec<SharedError>> {
        self.as_ref().map(ErrorList::errors)
    }

    fn error_text(&self) -> String {
        match self {
            Some(list) => list.to_string(),
            None => String::new(),
        }
    }

    fn err_or_nil(&self) -> Option<SharedError> {
        self.as_ref().and_then(ErrorList::err_or_nil)
    }

    fn into_result(self) -> Result<(), SharedError> {
        match self {
            Some(list) => list.into_result(),
            None => Ok(()),
        }
    }

    fn reset(&mut self) {
        if let Some(list) = self {
            list.reset();
        }
    }

    fn is(&self, target: &(dyn Error + 'static)) -> bool {
        self.as_ref().is_some_and(|list| list.is(target))
    }

    fn extract<T: Error + Clone + 'static>(&self) -> Option<T> {
        self.as_ref().and_then(ErrorList::extract::<T>)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for Option<crate::ErrorList> {}
}
