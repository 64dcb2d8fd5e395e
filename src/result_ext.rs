use std::borrow::Cow;

use crate::{SharedError, StackError};

/// Wrapping the error of a [`Result`] in a [`StackError`].
///
/// `Ok` values pass through untouched. An `Err` is wrapped with the given
/// message, recording the frame of the `wrap_err` call.
///
/// # Examples
///
/// ```
/// use stackcause::prelude::*;
///
/// fn read_config(path: &str) -> Result<String, StackError> {
///     std::fs::read_to_string(path).wrap_err("failed to read configuration file")
/// }
///
/// let error = read_config("/does/not/exist").unwrap_err();
/// assert!(error.to_string().starts_with("failed to read configuration file: "));
/// ```
pub trait ResultExt<T> {
    /// Wraps the error with `message`.
    fn wrap_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, StackError>;

    /// Wraps the error with the message returned by `message`, which is only
    /// called if there is an error.
    ///
    /// ```
    /// use stackcause::prelude::*;
    ///
    /// let id = 7;
    /// let result: Result<u8, std::num::ParseIntError> = "300".parse();
    /// let error = result.wrap_err_with(|| format!("parsing field {id}")).unwrap_err();
    /// assert_eq!(
    ///     error.to_string(),
    ///     "parsing field 7: number too large to fit in target type"
    /// );
    /// ```
    fn wrap_err_with<M, F>(self, message: F) -> Result<T, StackError>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<SharedError>,
{
    #[inline(never)]
    fn wrap_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, StackError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(StackError::from_parts(
                message.into(),
                Some(error.into()),
                1,
            )),
        }
    }

    #[inline(never)]
    fn wrap_err_with<M, F>(self, message: F) -> Result<T, StackError>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(StackError::from_parts(
                message().into(),
                Some(error.into()),
                1,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("upstream failed")]
    struct Upstream;

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u8, Upstream> = Ok(3);
        assert_eq!(result.wrap_err("unused").ok(), Some(3));

        let result: Result<u8, Upstream> = Ok(4);
        let wrapped = result.wrap_err_with(|| -> String { unreachable!("not called for Ok") });
        assert_eq!(wrapped.ok(), Some(4));
    }

    #[test]
    fn test_err_is_wrapped() {
        let result: Result<(), Upstream> = Err(Upstream);
        let error = result.wrap_err("calling upstream").unwrap_err();
        assert_eq!(error.to_string(), "calling upstream: upstream failed");
        assert!(
            error
                .cause()
                .is_some_and(|cause| cause.downcast_ref::<Upstream>().is_some())
        );
    }

    #[test]
    fn test_wrap_site_is_the_caller() {
        let result: Result<(), StackError> = Err(StackError::new("inner"));
        let inner_len = result.as_ref().map_err(|inner| inner.frames().len()).err();

        let error = result.wrap_err("outer").unwrap_err();
        assert_eq!(Some(error.frames().len() - 1), inner_len);

        let resolved = error.resolved_frames();
        assert!(
            resolved[0].function.ends_with("test_wrap_site_is_the_caller"),
            "{:?}",
            resolved[0]
        );
    }

    #[test]
    fn test_shared_errors_keep_identity() {
        let shared = SharedError::from(Upstream);
        let result: Result<(), SharedError> = Err(shared.clone());
        let error = result.wrap_err_with(|| "context").unwrap_err();
        assert!(error.cause().is_some_and(|cause| cause.ptr_eq(&shared)));
    }
}
