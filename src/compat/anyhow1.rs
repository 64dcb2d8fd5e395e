//! Bidirectional integration with the [`anyhow`] 1.x error handling library.
//!
//! # Converting from anyhow
//!
//! ```
//! use stackcause::prelude::*;
//!
//! fn anyhow_function() -> anyhow::Result<String> {
//!     anyhow::bail!("something went wrong");
//! }
//!
//! fn stackcause_function() -> Result<String, StackError> {
//!     let value = anyhow_function()
//!         .into_stackcause()
//!         .wrap_err("calling the anyhow function")?;
//!     Ok(value)
//! }
//!
//! assert_eq!(
//!     stackcause_function().unwrap_err().to_string(),
//!     "calling the anyhow function: something went wrong"
//! );
//! ```
//!
//! The error behind the [`anyhow::Error`] is kept, so it can still be found
//! by type:
//!
//! ```
//! use stackcause::prelude::*;
//!
//! let error = anyhow::Error::new(std::io::Error::other("disk full"));
//! let shared = error.into_stackcause();
//! assert!(shared.downcast_ref::<std::io::Error>().is_some());
//! ```
//!
//! # Converting to anyhow
//!
//! ```
//! use stackcause::{compat::anyhow1::IntoAnyhow, prelude::*};
//!
//! fn stackcause_function() -> Result<(), SharedError> {
//!     Err(StackError::new("disk full").into())
//! }
//!
//! fn anyhow_function() -> anyhow::Result<()> {
//!     stackcause_function().into_anyhow()?;
//!     Ok(())
//! }
//!
//! assert_eq!(anyhow_function().unwrap_err().to_string(), "disk full");
//! ```
//!
//! A [`StackError`](crate::StackError) or an aggregate can be handed to
//! anyhow directly with `?` or [`anyhow::Error::new`], since they implement
//! [`Error`](std::error::Error).

use super::IntoStackcause;
use crate::SharedError;

impl IntoStackcause for anyhow::Error {
    type Output = SharedError;

    #[inline]
    fn into_stackcause(self) -> Self::Output {
        let boxed: Box<dyn std::error::Error + Send + Sync + 'static> = self.into();
        SharedError::from_boxed(boxed)
    }
}

impl<T> IntoStackcause for anyhow::Result<T> {
    type Output = Result<T, SharedError>;

    #[inline]
    fn into_stackcause(self) -> Self::Output {
        self.map_err(IntoStackcause::into_stackcause)
    }
}

/// Converts [`SharedError`]s into [`anyhow::Error`]s.
pub trait IntoAnyhow {
    /// [`anyhow::Error`] for errors, `anyhow::Result<T>` for results.
    type Output;

    /// Performs the conversion.
    fn into_anyhow(self) -> Self::Output;
}

impl IntoAnyhow for SharedError {
    type Output = anyhow::Error;

    fn into_anyhow(self) -> Self::Output {
        anyhow::Error::new(self.into_inner())
    }
}

impl<T> IntoAnyhow for Result<T, SharedError> {
    type Output = anyhow::Result<T>;

    fn into_anyhow(self) -> Self::Output {
        self.map_err(IntoAnyhow::into_anyhow)
    }
}
