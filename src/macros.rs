/// Creates a [`StackError`](crate::StackError) from a format string.
///
/// The arguments are interpreted the same way as for the [`format!()`] macro.
/// A format string without arguments is stored as a `&'static str`, so no
/// allocation happens for it.
///
/// The stack is captured at the macro call site.
///
/// [`format!()`]: std::format
///
/// # Examples
///
/// ```
/// use stackcause::stack_error;
///
/// let path = "/etc/app.toml";
/// let error = stack_error!("cannot read {path}");
/// assert_eq!(error.to_string(), "cannot read /etc/app.toml");
///
/// let error = stack_error!("something broke");
/// assert_eq!(error.message(), Some("something broke"));
/// ```
#[macro_export]
macro_rules! stack_error {
    ($($arg:tt)+) => {
        $crate::StackError::new($crate::__private::format_message(
            $crate::__private::format_args!($($arg)+),
        ))
    };
}

/// Wraps an error with a message built from a format string.
///
/// `wrap_error!(err, "...", args)` is [`StackError::wrap`] with a
/// [`format!()`]-style message. The frame of the macro call site is recorded.
///
/// [`StackError::wrap`]: crate::StackError::wrap
/// [`format!()`]: std::format
///
/// # Examples
///
/// ```
/// use stackcause::wrap_error;
///
/// let user_id = 42;
/// let io_error = std::io::Error::other("connection reset");
/// let error = wrap_error!(io_error, "loading user {user_id}");
/// assert_eq!(error.to_string(), "loading user 42: connection reset");
/// ```
#[macro_export]
macro_rules! wrap_error {
    ($error:expr, $($arg:tt)+) => {
        $crate::StackError::wrap(
            $error,
            $crate::__private::format_message($crate::__private::format_args!($($arg)+)),
        )
    };
}

/// Returns early with a new [`StackError`](crate::StackError).
///
/// `bail!(...)` is `return Err(stack_error!(...).into())`, so it works in any
/// function whose error type can be built from a `StackError`.
///
/// # Examples
///
/// ```
/// use stackcause::{StackError, bail};
///
/// fn check_port(port: u32) -> Result<u16, StackError> {
///     if port > u32::from(u16::MAX) {
///         bail!("port {port} is out of range");
///     }
///     Ok(port as u16)
/// }
///
/// assert_eq!(check_port(80).ok(), Some(80));
/// assert_eq!(
///     check_port(70_000).unwrap_err().to_string(),
///     "port 70000 is out of range"
/// );
/// ```
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return $crate::__private::Err($crate::stack_error!($($arg)+).into())
    };
}
