//! Bidirectional integration with the [`eyre`] 0.6.x error handling library.
//!
//! ```
//! use stackcause::{compat::eyre06::IntoEyre, prelude::*};
//!
//! fn eyre_function() -> eyre::Result<u16> {
//!     eyre::bail!("port missing");
//! }
//!
//! fn stackcause_function() -> Result<u16, StackError> {
//!     eyre_function().into_stackcause().wrap_err("reading settings")
//! }
//!
//! let error = stackcause_function().unwrap_err();
//! assert_eq!(error.to_string(), "reading settings: port missing");
//!
//! let report: eyre::Report = SharedError::from(error).into_eyre();
//! assert_eq!(report.to_string(), "reading settings: port missing");
//! ```

use super::IntoStackcause;
use crate::SharedError;

impl IntoStackcause for eyre::Report {
    type Output = SharedError;

    #[inline]
    fn into_stackcause(self) -> Self::Output {
        let boxed: Box<dyn std::error::Error + Send + Sync + 'static> = self.into();
        SharedError::from_boxed(boxed)
    }
}

impl<T> IntoStackcause for eyre::Result<T> {
    type Output = Result<T, SharedError>;

    #[inline]
    fn into_stackcause(self) -> Self::Output {
        self.map_err(IntoStackcause::into_stackcause)
    }
}

/// Converts [`SharedError`]s into [`eyre::Report`]s.
pub trait IntoEyre {
    /// [`eyre::Report`] for errors, `eyre::Result<T>` for results.
    type Output;

    /// Performs the conversion.
    fn into_eyre(self) -> Self::Output;
}

impl IntoEyre for SharedError {
    type Output = eyre::Report;

    fn into_eyre(self) -> Self::Output {
        eyre::Report::new(self.into_inner())
    }
}

impl<T> IntoEyre for Result<T, SharedError> {
    type Output = eyre::Result<T>;

    fn into_eyre(self) -> Self::Output {
        self.map_err(IntoEyre::into_eyre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StackError;

    #[test]
    fn test_from_eyre() {
        let report = eyre::Report::new(std::io::Error::other("disk full"));
        let shared = report.into_stackcause();
        assert_eq!(shared.to_string(), "disk full");
        assert!(shared.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_into_eyre_keeps_chain() {
        let result: Result<(), SharedError> = Err(SharedError::from(StackError::wrap(
            std::io::Error::other("disk full"),
            "saving",
        )));
        let report = result.into_eyre().unwrap_err();

        assert_eq!(report.to_string(), "saving: disk full");
        assert_eq!(report.chain().count(), 2);
    }
}
