#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Errors that carry the call stack of the place they were created, and
//! thread-safe aggregates for reporting many independent errors as one.
//!
//! ## Overview
//!
//! This crate has two halves that work together:
//!
//! - **[`StackError`]**: an error with a message, an optional cause and a
//!   captured call stack. Wrapping one `StackError` in another records only
//!   the frame of the wrapping call, so a chain of wraps shows the path the
//!   error took without repeating the frames it shares.
//! - **[`ErrorAggregate`]** and **[`ErrorList`]**: collections of independent
//!   failures, for example from concurrent workers, that are themselves
//!   errors. Stored errors keep their identity, so they can still be looked
//!   up after being collected.
//!
//! ## Quick Example
//!
//! ```
//! use stackcause::prelude::*;
//!
//! fn read_config(path: &str) -> Result<String, StackError> {
//!     std::fs::read_to_string(path).wrap_err("failed to read configuration file")
//! }
//!
//! let error = read_config("/does/not/exist").unwrap_err();
//!
//! // `{}` is the message chain...
//! assert!(error.to_string().starts_with("failed to read configuration file: "));
//! // ...and `{:#}` or `{:?}` adds one block per captured frame.
//! let verbose = format!("{error:#}");
//! assert!(verbose.lines().count() > 1);
//! ```
//!
//! ## Rendering
//!
//! `{}` renders the plain text and `{:#}` / `{:?}` the verbose form with
//! frames. Which frames are shown, and how function names are printed, is
//! decided by a [`FramePolicy`](hooks::FramePolicy): either the process-wide
//! one configured through the [`hooks`] module or one passed explicitly to
//! `display_with`.
//!
//! ## Identity
//!
//! Every error is stored behind a [`SharedError`] handle. Clones of a handle
//! are the same error, and the [`identity`] module finds an error in a chain of
//! causes and aggregates either by identity or by type.
//!
//! For the stack capture itself, see the [`stackcause-internals`] crate.
//!
//! [`stackcause-internals`]: stackcause_internals

#[macro_use]
mod macros;

pub mod aggregate;
pub mod compat;
pub mod hooks;
pub mod identity;
pub mod option_ext;
pub mod prelude;

mod iterator_ext;
mod result_ext;
mod shared;
mod stack_error;

pub use stackcause_internals::{MAX_STACK_FRAMES, RawFrame, ResolvedFrame};

pub use self::{
    aggregate::{ErrorAggregate, ErrorList},
    iterator_ext::IteratorExt,
    option_ext::AggregateOptionExt,
    result_ext::ResultExt,
    shared::SharedError,
    stack_error::StackError,
};

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use std::{borrow::Cow, fmt};

    #[doc(hidden)]
    pub use core::{format_args, result::Result::Err};

    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub fn format_message(args: fmt::Arguments<'_>) -> Cow<'static, str> {
        match args.as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(fmt::format(args)),
        }
    }
}
