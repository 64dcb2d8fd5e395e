//! Commonly used items for convenient importing.
//!
//! ```rust
//! use stackcause::prelude::*;
//!
//! fn divide(a: i32, b: i32) -> Result<i32, StackError> {
//!     if b == 0 {
//!         bail!("cannot divide {a} by zero");
//!     }
//!     Ok(a / b)
//! }
//!
//! assert_eq!(divide(10, 2).ok(), Some(5));
//! assert_eq!(divide(1, 0).unwrap_err().to_string(), "cannot divide 1 by zero");
//! ```
//!
//! # What's Included
//!
//! - **[`StackError`]**, **[`SharedError`]**, **[`ErrorAggregate`]** and
//!   **[`ErrorList`]**: the error types
//! - **[`ResultExt`]**, **[`IteratorExt`]** and **[`AggregateOptionExt`]**:
//!   extension traits
//! - **[`IntoStackcause`]**: conversions from other error libraries
//! - **[`stack_error!`]**, **[`wrap_error!`]** and **[`bail!`]**: macros for
//!   creating and returning errors

pub use crate::{
    AggregateOptionExt, ErrorAggregate, ErrorList, IteratorExt, ResultExt, SharedError,
    StackError, bail, compat::IntoStackcause, stack_error, wrap_error,
};
