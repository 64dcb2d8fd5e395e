//! Collections of independent errors that are themselves errors.
//!
//! | Type                        | Writers      | Use when                               |
//! |-----------------------------|--------------|----------------------------------------|
//! | [`ErrorAggregate`]          | `&self`      | several threads report into one place  |
//! | [`ErrorList`]               | `&mut self`  | a single thread collects failures      |
//! | `Option<ErrorList>`         | `&mut self`  | failures are rare and should cost nothing until they happen |
//!
//! The last row works through [`AggregateOptionExt`](crate::AggregateOptionExt).
//!
//! All three render the same way:
//!
//! - `{}`: the text of every stored error, one per line.
//! - `{:#}` and `{:?}`: for each stored error an `error #n` line followed by
//!   its verbose rendering (frames included for [`StackError`]s).
//!
//! Aggregates have no [`source`](std::error::Error::source). Their items are
//! visited by the walks in [`identity`](crate::identity) instead, and one
//! level at a time by `rest()`.
//!
//! [`StackError`]: crate::StackError

mod guarded;
mod list;
mod render;

pub use self::{guarded::ErrorAggregate, list::ErrorList};
