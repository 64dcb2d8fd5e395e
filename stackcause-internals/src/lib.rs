#![forbid(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
//! Internal implementation crate for [`stackcause`].
//!
//! # Overview
//!
//! This crate owns the two primitive operations the [`stackcause`] error types
//! are built on:
//!
//! - **[`capture_stack`]**: walk the current call stack and keep a bounded
//!   number of raw return addresses ([`RawFrame`]s).
//! - **[`resolve_frame`]**: map a [`RawFrame`] to a function name, file and
//!   line ([`ResolvedFrame`]).
//!
//! Capturing is cheap (no symbolication happens); resolution is expensive and
//! is deferred until an error is actually rendered. Resolution of a given
//! frame is stable for the lifetime of the process, which is what makes
//! deferring it sound.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`stackcause`] crate,
//! not this one.
//!
//! [`stackcause`]: https://docs.rs/stackcause/latest/stackcause/

mod capture;
mod resolve;

pub use capture::{MAX_STACK_FRAMES, RawFrame, capture_stack};
pub use resolve::{ResolvedFrame, resolve_frame};
