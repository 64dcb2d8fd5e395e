//! Interoperability with other error handling libraries.
//!
//! # Available Integrations
//!
//! - [`anyhow1`] - Conversions to and from `anyhow` 1.x (requires the
//!   `compat-anyhow1` feature flag)
//! - [`eyre06`] - Conversions to and from `eyre` 0.6.x (requires the
//!   `compat-eyre06` feature flag)
//!
//! Errors coming from another library become a [`SharedError`], which can be
//! wrapped in a [`StackError`](crate::StackError) or stored in an aggregate
//! like any other error. In the other direction, a [`SharedError`] becomes the
//! other library's error type with its text and source chain intact.
//!
//! Without any feature flag, [`SharedError`] already converts into
//! `Box<dyn Error + Send + Sync>` and back through
//! [`SharedError::from_boxed`].

use crate::SharedError;

/// Converts errors from other libraries into [`SharedError`]s.
///
/// Implemented for both the error types and `Result`s carrying them.
///
/// # Examples
///
/// ```
/// use stackcause::prelude::*;
///
/// # #[cfg(feature = "compat-anyhow1")] {
/// fn uses_anyhow() -> anyhow::Result<i32> {
///     Ok(42)
/// }
///
/// fn uses_stackcause() -> Result<i32, StackError> {
///     let value = uses_anyhow().into_stackcause().wrap_err("asking anyhow")?;
///     Ok(value)
/// }
///
/// assert_eq!(uses_stackcause().ok(), Some(42));
/// # }
/// ```
pub trait IntoStackcause {
    /// [`SharedError`] for error types, `Result<T, SharedError>` for results.
    type Output;

    /// Performs the conversion.
    fn into_stackcause(self) -> Self::Output;
}

impl IntoStackcause for Box<dyn std::error::Error + Send + Sync + 'static> {
    type Output = SharedError;

    fn into_stackcause(self) -> Self::Output {
        SharedError::from_boxed(self)
    }
}

#[cfg(feature = "compat-anyhow1")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-anyhow1")))]
pub mod anyhow1;

#[cfg(feature = "compat-eyre06")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-eyre06")))]
pub mod eyre06;
