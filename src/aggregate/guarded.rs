use std::{borrow::Cow, error::Error, fmt};

use spin::RwLock;

use super::{ErrorList, render};
use crate::{SharedError, hooks::FramePolicy, identity};

/// A thread-safe collection of independent errors.
///
/// Every method takes `&self`: share the aggregate by reference (or in an
/// [`Arc`](std::sync::Arc)) between threads and have each of them
/// [`add`](Self::add) its failure. Readers and writers are serialized by a
/// read/write lock that is never held while calling into code outside this
/// crate: rendering works on a snapshot of the stored errors.
///
/// Once the work is done, turn the aggregate into a single error with
/// [`err_or_nil`](Self::err_or_nil) or [`into_result`](Self::into_result).
///
/// For single-threaded use, [`ErrorList`] has the same operations without the
/// lock.
///
/// # Examples
///
/// ```
/// use stackcause::{ErrorAggregate, StackError};
///
/// let aggregate = ErrorAggregate::new();
/// std::thread::scope(|scope| {
///     for worker in 0..4 {
///         let aggregate = &aggregate;
///         scope.spawn(move || {
///             if worker % 2 == 1 {
///                 aggregate.add(StackError::new(format!("worker {worker} failed")));
///             }
///         });
///     }
/// });
///
/// assert_eq!(aggregate.len(), 2);
/// assert!(aggregate.into_result().is_err());
/// ```
pub struct ErrorAggregate {
    items: RwLock<Vec<SharedError>>,
}

impl ErrorAggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Creates an empty aggregate with room for `capacity` errors.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends an error.
    pub fn add(&self, error: impl Into<SharedError>) {
        let error = error.into();
        self.items.write().push(error);
    }

    /// Appends every error, in order.
    ///
    /// An [`Option`] is an iterator too, so `add_all(maybe_error)` adds the
    /// error only if there is one:
    ///
    /// ```
    /// use stackcause::ErrorAggregate;
    ///
    /// let aggregate = ErrorAggregate::new();
    /// aggregate.add_all(None::<std::io::Error>);
    /// aggregate.add_all([std::io::Error::other("a"), std::io::Error::other("b")]);
    /// assert_eq!(aggregate.to_string(), "a\nb");
    /// ```
    pub fn add_all<I>(&self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<SharedError>,
    {
        let errors: Vec<SharedError> = errors.into_iter().map(Into::into).collect();
        if !errors.is_empty() {
            self.items.write().extend(errors);
        }
    }

    /// Appends an error unless it is already stored.
    ///
    /// The error counts as stored if it is found by walking the chain of any
    /// stored error (see [`identity::is`]). The check and the append happen
    /// under one lock, so concurrent calls never store the same error twice.
    ///
    /// Returns `true` if the error was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcause::{ErrorAggregate, SharedError, StackError};
    ///
    /// let timeout = SharedError::from(StackError::new("timed out"));
    /// let aggregate = ErrorAggregate::new();
    ///
    /// assert!(aggregate.add_once(StackError::wrap(timeout.clone(), "fetching a")));
    /// assert!(!aggregate.add_once(timeout));
    /// assert_eq!(aggregate.len(), 1);
    /// ```
    pub fn add_once(&self, error: impl Into<SharedError>) -> bool {
        let error = error.into();
        let mut items = self.items.write();
        if contains(&items, &error) {
            return false;
        }
        items.push(error);
        true
    }

    /// Calls [`add_once`](Self::add_once) for every error, in order.
    pub fn add_once_all<I>(&self, errors: I)
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
        self.items.read().clone()
    }

    /// Returns the number of stored errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if no error is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the first stored error.
    #[must_use]
    pub fn first(&self) -> Option<SharedError> {
        self.items.read().first().cloned()
    }

    /// Returns the stored errors as one error.
    ///
    /// - No error: `None`.
    /// - One error: that very error, not wrapped in an aggregate.
    /// - More: a snapshot of this aggregate.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcause::{ErrorAggregate, SharedError, StackError};
    ///
    /// let aggregate = ErrorAggregate::new();
    /// assert!(aggregate.err_or_nil().is_none());
    ///
    /// let only = SharedError::from(StackError::new("only"));
    /// aggregate.add(only.clone());
    /// assert!(aggregate.err_or_nil().is_some_and(|error| error.ptr_eq(&only)));
    ///
    /// aggregate.add(StackError::new("second"));
    /// assert_eq!(
    ///     aggregate.err_or_nil().map(|error| error.to_string()).as_deref(),
    ///     Some("only\nsecond")
    /// );
    /// ```
    #[must_use]
    pub fn err_or_nil(&self) -> Option<SharedError> {
        let items = self.items.read();
        match items.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            _ => Some(SharedError::from(Self {
                items: RwLock::new(items.clone()),
            })),
        }
    }

    /// Consumes the aggregate: `Ok(())` if no error is stored, otherwise
    /// the same error [`err_or_nil`](Self::err_or_nil) returns, with the
    /// aggregate itself standing for two or more errors.
    pub fn into_result(self) -> Result<(), SharedError> {
        let mut items = self.items.into_inner();
        match items.len() {
            0 => Ok(()),
            1 => Err(items.remove(0)),
            _ => Err(SharedError::from(Self {
                items: RwLock::new(items),
            })),
        }
    }

    /// Returns a new aggregate with every stored error but the first.
    ///
    /// Returns `None` if at most one error is stored: a lone error is fully
    /// described by itself.
    #[must_use]
    pub fn rest(&self) -> Option<Self> {
        let items = self.items.read();
        match items.split_first() {
            Some((_, rest)) if !rest.is_empty() => Some(Self {
                items: RwLock::new(rest.to_vec()),
            }),
            _ => None,
        }
    }

    /// Removes every stored error, keeping the allocated capacity.
    pub fn reset(&self) {
        self.items.write().clear();
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
            items: Cow::Owned(self.errors()),
            policy,
        }
    }

    /// Converts into the lock-free [`ErrorList`].
    #[must_use]
    pub fn into_list(self) -> ErrorList {
        ErrorList::from(self.items.into_inner())
    }
}

/// Returns `true` if `candidate` is found in the chain of any stored error.
pub(super) fn contains(items: &[SharedError], candidate: &SharedError) -> bool {
    items
        .iter()
        .any(|stored| identity::is(stored.as_dyn(), candidate.as_dyn()))
}

impl Default for ErrorAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ErrorAggregate {
    fn clone(&self) -> Self {
        Self {
            items: RwLock::new(self.errors()),
        }
    }
}

impl From<ErrorList> for ErrorAggregate {
    fn from(list: ErrorList) -> Self {
        Self {
            items: RwLock::new(list.into_vec()),
        }
    }
}

impl<E: Into<SharedError>> FromIterator<E> for ErrorAggregate {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            items: RwLock::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

impl fmt::Display for ErrorAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self.errors();
        if f.alternate() {
            render::write_verbose(f, &items, &FramePolicy::current())
        } else {
            render::write_text(f, &items)
        }
    }
}

impl fmt::Debug for ErrorAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_verbose(f, &self.errors(), &FramePolicy::current())
    }
}

impl Error for ErrorAggregate {}
