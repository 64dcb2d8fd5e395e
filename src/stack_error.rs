use std::{borrow::Cow, error::Error, fmt};

use stackcause_internals::{
    MAX_STACK_FRAMES, RawFrame, ResolvedFrame, capture_stack, resolve_frame,
};

use crate::{SharedError, hooks::FramePolicy};

/// An error carrying a message, an optional cause and the call stack of the
/// place it was created.
///
/// # Creating errors
///
/// - [`StackError::new`] or [`stack_error!`](crate::stack_error) for a new
///   error.
/// - [`StackError::wrap`], [`wrap_error!`](crate::wrap_error) or
///   [`ResultExt::wrap_err`](crate::ResultExt::wrap_err) to add a message to
///   an existing error.
///
/// A new error captures up to [`MAX_STACK_FRAMES`] frames, starting with the
/// function that created it. Wrapping a `StackError` captures only the frame
/// of the wrapping call and appends the frames of the wrapped error, so a
/// chain of wraps accumulates one frame per wrap. Wrapping any other error
/// captures a full stack.
///
/// # Rendering
///
/// | Format    | Output                                                  |
/// |-----------|---------------------------------------------------------|
/// | `{}`      | `message: cause` (see below)                            |
/// | `{:#}`    | the text of `{}`, then one block per frame               |
/// | `{:?}`    | same as `{:#}`                                          |
///
/// The text is the message, the text of the cause, or both joined by `": "`.
/// A frame block is the function name on its own line followed by the
/// tab-indented `file:line`:
///
/// ```text
/// loading config: file not found
/// my_app::config::load
/// 	src/config.rs:42
/// my_app::main
/// 	src/main.rs:7
/// ```
///
/// Frames are resolved when rendered, through the process-wide
/// [`FramePolicy`]. Use [`display_with`](Self::display_with) to render with
/// an explicit policy instead.
pub struct StackError {
    /// Empty means no message.
    message: Cow<'static, str>,
    cause: Option<SharedError>,
    frames: Vec<RawFrame>,
}

impl StackError {
    /// Creates an error with a message, capturing the stack of the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcause::StackError;
    ///
    /// let error = StackError::new("disk full");
    /// assert_eq!(error.to_string(), "disk full");
    /// assert!(!error.frames().is_empty());
    /// ```
    #[inline(never)]
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(message.into(), None, 1)
    }

    /// Wraps `cause` with a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcause::StackError;
    ///
    /// let root = StackError::new("connection refused");
    /// let error = StackError::wrap(root, "fetching user");
    /// assert_eq!(error.to_string(), "fetching user: connection refused");
    /// ```
    #[inline(never)]
    #[must_use]
    pub fn wrap(cause: impl Into<SharedError>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(message.into(), Some(cause.into()), 1)
    }

    /// Wraps `cause` with a message if there is a cause.
    ///
    /// No error stays no error: `None` is returned unchanged instead of being
    /// turned into an error.
    ///
    /// ```
    /// use stackcause::StackError;
    ///
    /// let nothing: Option<std::io::Error> = None;
    /// assert!(StackError::wrap_option(nothing, "reading").is_none());
    /// ```
    #[inline(never)]
    #[must_use]
    pub fn wrap_option<E: Into<SharedError>>(
        cause: Option<E>,
        message: impl Into<Cow<'static, str>>,
    ) -> Option<Self> {
        let cause = cause?;
        Some(Self::from_parts(message.into(), Some(cause.into()), 1))
    }

    /// Creates the error, dropping `skip` frames above this function.
    #[inline(never)]
    pub(crate) fn from_parts(
        message: Cow<'static, str>,
        cause: Option<SharedError>,
        skip: usize,
    ) -> Self {
        let inner_frames = cause
            .as_ref()
            .and_then(|cause| cause.downcast_ref::<StackError>())
            .map(|inner| inner.frames.as_slice());

        let frames = match inner_frames {
            Some(inner_frames) => {
                let mut frames = Vec::with_capacity(inner_frames.len() + 1);
                frames.extend(capture_stack(skip + 1, 1));
                frames.extend_from_slice(inner_frames);
                frames
            }
            None => capture_stack(skip + 1, MAX_STACK_FRAMES),
        };

        Self {
            message,
            cause,
            frames,
        }
    }

    /// Returns the message, if there is one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    /// Returns the wrapped error, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }

    /// Returns the captured frames, innermost first.
    #[must_use]
    pub fn frames(&self) -> &[RawFrame] {
        &self.frames
    }

    /// Resolves every captured frame, innermost first.
    ///
    /// Resolution reads debug info and is comparatively slow.
    #[must_use]
    pub fn resolved_frames(&self) -> Vec<ResolvedFrame> {
        self.frames.iter().copied().map(resolve_frame).collect()
    }

    /// Returns `true` if `target` is this error or is found in its chain.
    #[must_use]
    pub fn is(&self, target: &(dyn Error + 'static)) -> bool {
        crate::identity::is(self, target)
    }

    /// Returns a clone of the first error of type `T` in the chain.
    #[must_use]
    pub fn extract<T: Error + Clone + 'static>(&self) -> Option<T> {
        crate::identity::extract::<T>(self)
    }

    /// Renders the error with its frames, using `policy` instead of the
    /// process-wide one.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcause::{StackError, hooks::FramePolicy};
    ///
    /// let error = StackError::new("disk full");
    /// let policy = FramePolicy::new().filter(|_: &str, _: &str| true);
    /// assert_eq!(format!("{}", error.display_with(&policy)), "disk full");
    /// ```
    #[must_use]
    pub fn display_with<'a>(&'a self, policy: &'a FramePolicy) -> impl fmt::Display + 'a {
        VerboseStackError {
            error: self,
            policy,
        }
    }

    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(cause) = &self.cause {
            if !self.message.is_empty() {
                f.write_str(": ")?;
            }
            write!(f, "{cause}")?;
        }
        Ok(())
    }

    pub(crate) fn write_verbose(
        &self,
        f: &mut fmt::Formatter<'_>,
        policy: &FramePolicy,
    ) -> fmt::Result {
        self.write_text(f)?;

        for &frame in &self.frames {
            let resolved = resolve_frame(frame);
            if policy.should_skip(&resolved.function, &resolved.file) {
                continue;
            }

            write!(
                f,
                "\n{}\n\t{}:{}",
                policy.format_name(&resolved.function),
                resolved.file,
                resolved.line
            )?;
        }

        Ok(())
    }
}

struct VerboseStackError<'a> {
    error: &'a StackError,
    policy: &'a FramePolicy,
}

impl fmt::Display for VerboseStackError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.write_verbose(f, self.policy)
    }
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_verbose(f, &FramePolicy::current())
        } else {
            self.write_text(f)
        }
    }
}

impl fmt::Debug for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_verbose(f, &FramePolicy::current())
    }
}

impl Error for StackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| cause.as_dyn() as &(dyn Error + 'static))
    }
}
