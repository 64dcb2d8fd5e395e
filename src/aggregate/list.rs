use std::{borrow::Cow, error::Error, fmt, slice};

use super::{guarded::contains, render};
use crate::{SharedError, hooks::FramePolicy, identity};

/// A collection of independent errors for single-threaded use.
///
/// You can think of an [`ErrorList`] as a wrapper around a `Vec<SharedError>`
/// that is itself an error. It has the operations of [`ErrorAggregate`]
/// without the lock, so writers take `&mut self`.
///
/// When an error might never occur, keep an `Option<ErrorList>` instead and
/// use the [`AggregateOptionExt`] methods on it: the list is only allocated
/// once there is an error to store.
///
/// # Examples
///
/// ```
/// use stackcause::{ErrorList, StackError};
///
/// let mut errors = ErrorList::new();
/// for name in ["a.toml", "b.toml"] {
///     errors.add(StackError::new(format!("{name} is missing")));
/// }
///
/// assert_eq!(errors.to_string(), "a.toml is missing\nb.toml is missing");
/// ```
///
/// [`ErrorAggregate`]: crate::ErrorAggregate
/// [`AggregateOptionExt`]: crate::AggregateOptionExt
#[derive(Clone, Default)]
pub struct ErrorList {
    items: Vec<SharedError>,
}

impl ErrorList {
    /// Creates an empty list. Nothing is allocated until an error is added.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty list with room for `capacity` errors.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends an error.
    pub fn add(&mut self, error: impl Into<SharedError>) {
        self.items.push(error.into());
    }

    /// Appends every error, in order.
    pub fn add_all<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>,
    {
        self.items.extend(errors.into_iter().map(Into::into));
    }

    /// Appends an error unless it is found in the chain of a stored error.
    ///
    /// Returns `true` if the error was added.
    pub fn add_once(&mut self, error: impl Into<SharedError>) -> bool {
        let error = error.into();
        if contains(&self.items, &error) {
            return false;
        }
        self.items.push(error);
        true
    }

    /// Calls [`add_once`](Self::add_once) for every error, in order.
    pub fn add_once_all<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>,
    {
        for error in errors {
            self.add_once(error);
        }
    }

    /// Returns a copy of the stored errors, in insertion order.
    #[must_use]
    pub fn errors(&self) -> Vec<SharedError> {
        self.items.clone()
    }

    /// Returns the stored errors.
    #[must_use]
    pub fn as_slice(&self) -> &[SharedError] {
        &self.items
    }

    /// Returns an iterator over the stored errors.
    pub fn iter(&self) -> slice::Iter<'_, SharedError> {
        self.items.iter()
    }

    /// Returns the number of stored errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no error is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the first stored error.
    #[must_use]
    pub fn first(&self) -> Option<&SharedError> {
        self.items.first()
    }

    /// Returns `None` if empty, the stored error itself if there is exactly
    /// one, and a copy of the list otherwise.
    #[must_use]
    pub fn err_or_nil(&self) -> Option<SharedError> {
        match self.items.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            _ => Some(SharedError::from(self.clone())),
        }
    }

    /// Consumes the list: `Ok(())` if empty, the stored error itself if
    /// there is exactly one, and the list otherwise.
    ///
    /// ```
    /// use stackcause::{ErrorList, StackError};
    ///
    /// fn validate(values: &[i32]) -> Result<(), stackcause::SharedError> {
    ///     let mut errors = ErrorList::new();
    ///     for value in values {
    ///         if *value < 0 {
    ///             errors.add(StackError::new(format!("{value} is negative")));
    ///         }
    ///     }
    ///     errors.into_result()
    /// }
    ///
    /// assert!(validate(&[1, 2]).is_ok());
    /// assert_eq!(validate(&[-1, 2]).unwrap_err().to_string(), "-1 is negative");
    /// ```
    pub fn into_result(mut self) -> Result<(), SharedError> {
        match self.items.len() {
            0 => Ok(()),
            1 => Err(self.items.remove(0)),
            _ => Err(SharedError::from(self)),
        }
    }

    /// Returns a new list with every stored error but the first, or `None` if
    /// at most one error is stored.
    #[must_use]
    pub fn rest(&self) -> Option<Self> {
        match self.items.split_first() {
            Some((_, rest)) if !rest.is_empty() => Some(Self {
                items: rest.to_vec(),
            }),
            _ => None,
        }
    }

    /// Removes every stored error, keeping the allocated capacity.
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// Returns `true` if `target` is one of the stored errors or is found in
    /// the chain of one of them.
    #[must_use]
    pub fn is(&self, target: &(dyn Error + 'static)) -> bool {
        identity::is(self, target)
    }

    /// Returns a clone of the first error of type `T` found among the stored
    /// errors and their chains.
    #[must_use]
    pub fn extract<T: Error + Clone + 'static>(&self) -> Option<T> {
        identity::extract::<T>(self)
    }

    /// Renders every stored error with its frames, using `policy` instead of
    /// the process-wide one.
    #[must_use]
    pub fn display_with<'a>(&'a self, policy: &'a FramePolicy) -> impl fmt::Display + 'a {
        render::VerboseItems {
            items: Cow::Borrowed(self.items.as_slice()),
            policy,
        }
    }

    /// Returns the stored errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<SharedError> {
        self.items
    }
}

impl From<Vec<SharedError>> for ErrorList {
    fn from(items: Vec<SharedError>) -> Self {
        Self { items }
    }
}

impl<E: Into<SharedError>> FromIterator<E> for ErrorList {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<E: Into<SharedError>> Extend<E> for ErrorList {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl IntoIterator for ErrorList {
    type Item = SharedError;
    type IntoIter = std::vec::IntoIter<SharedError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a SharedError;
    type IntoIter = slice::Iter<'a, SharedError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            render::write_verbose(f, &self.items, &FramePolicy::current())
        } else {
            render::write_text(f, &self.items)
        }
    }
}

impl fmt::Debug for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_verbose(f, &self.items, &FramePolicy::current())
    }
}

impl Error for ErrorList {}
