use std::{error::Error, fmt, sync::Arc};

/// A reference-counted handle to any error.
///
/// This is how aggregates store their items and how a [`StackError`] holds its
/// cause. Clones point at the same error, so identity survives being stored:
/// an error added to an aggregate can later be found with
/// [`ErrorAggregate::is`](crate::ErrorAggregate::is).
///
/// `SharedError` deliberately does not implement [`Error`] itself, which is
/// what allows converting from every error type with `?` or `.into()`. Use
/// [`as_dyn`](Self::as_dyn) where a `&dyn Error` is needed.
///
/// # Examples
///
/// ```
/// use stackcause::SharedError;
///
/// let io_error = std::io::Error::other("disk full");
/// let shared = SharedError::from(io_error);
/// let clone = shared.clone();
///
/// assert!(shared.ptr_eq(&clone));
/// assert_eq!(clone.to_string(), "disk full");
/// assert!(clone.downcast_ref::<std::io::Error>().is_some());
/// ```
///
/// [`StackError`]: crate::StackError
#[derive(Clone)]
pub struct SharedError(Arc<dyn Error + Send + Sync + 'static>);

impl SharedError {
    /// Wraps an already shared error without allocating.
    #[must_use]
    pub fn from_arc(error: Arc<dyn Error + Send + Sync + 'static>) -> Self {
        Self(error)
    }

    /// Takes ownership of a boxed error.
    ///
    /// Boxed trait objects do not implement [`Error`], so they cannot go
    /// through [`From`].
    #[must_use]
    pub fn from_boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self(Arc::from(error))
    }

    /// Returns the underlying [`Arc`].
    #[must_use]
    pub fn into_inner(self) -> Arc<dyn Error + Send + Sync + 'static> {
        self.0
    }

    /// Returns the wrapped error as a trait object.
    #[must_use]
    pub fn as_dyn(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Returns `true` if both handles point at the same error.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Returns the wrapped error if it is of type `T`.
    ///
    /// Only the wrapped error itself is checked. Use
    /// [`extract`](Self::extract) to search its whole chain.
    #[must_use]
    pub fn downcast_ref<T: Error + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns `true` if `target` is this error or is found by walking its
    /// chain. See [`identity::is`](crate::identity::is).
    #[must_use]
    pub fn is(&self, target: &(dyn Error + 'static)) -> bool {
        crate::identity::is(self.as_dyn(), target)
    }

    /// Returns a clone of the first error of type `T` in the chain. See
    /// [`identity::extract`](crate::identity::extract).
    #[must_use]
    pub fn extract<T: Error + Clone + 'static>(&self) -> Option<T> {
        crate::identity::extract::<T>(self.as_dyn())
    }
}

impl<E> From<E> for SharedError
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self(Arc::new(error))
    }
}

impl From<SharedError> for Box<dyn Error + Send + Sync + 'static> {
    fn from(error: SharedError) -> Self {
        Box::new(error.0)
    }
}

impl From<SharedError> for Arc<dyn Error + Send + Sync + 'static> {
    fn from(error: SharedError) -> Self {
        error.0
    }
}

impl AsRef<dyn Error + Send + Sync + 'static> for SharedError {
    fn as_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.as_dyn()
    }
}

impl fmt::Display for SharedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for SharedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
