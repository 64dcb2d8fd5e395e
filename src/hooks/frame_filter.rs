//! Frame filters decide which captured frames are left out of a verbose
//! rendering.
//!
//! Filters are composed as a chain: each link either skips a frame itself or
//! defers to the next link. [`AllowFrame`] ends the chain by admitting
//! everything.
//!
//! ```
//! use stackcause::hooks::frame_filter::{AllowFrame, FrameFilter, SkipRustSrc};
//!
//! // Skip standard library frames, then skip frames from the tokio runtime.
//! let skip_tokio = |function: &str, _file: &str| function.starts_with("tokio::");
//! let filter = SkipRustSrc(skip_tokio);
//!
//! assert!(filter.should_skip("tokio::runtime::park", "/src/main.rs"));
//! assert!(!filter.should_skip("my_app::main", "/src/main.rs"));
//! assert!(!SkipRustSrc(AllowFrame).should_skip("my_app::main", "/src/main.rs"));
//! ```
//!
//! Filtering happens at render time only. The frames of an error are captured
//! in full and a filter installed later applies to later renders of the same
//! error.

use std::sync::OnceLock;

/// Decides whether a frame is left out of a verbose rendering.
///
/// Implemented for every `Fn(&str, &str) -> bool` closure taking the
/// function name and the file of the frame.
pub trait FrameFilter: Send + Sync + 'static {
    /// Returns `true` if the frame should not be rendered.
    fn should_skip(&self, function: &str, file: &str) -> bool;
}

impl<F> FrameFilter for F
where
    F: Fn(&str, &str) -> bool + Send + Sync + 'static,
{
    fn should_skip(&self, function: &str, file: &str) -> bool {
        self(function, file)
    }
}

/// A filter that admits every frame.
///
/// This is the default filter, and the natural last link of a filter chain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowFrame;

impl FrameFilter for AllowFrame {
    fn should_skip(&self, _function: &str, _file: &str) -> bool {
        false
    }
}

/// A chain link skipping frames whose file lies in the Rust standard library
/// sources, deferring every other frame to the next link.
///
/// # Examples
///
/// ```
/// use stackcause::hooks::{
///     FramePolicy,
///     frame_filter::{AllowFrame, SkipRustSrc},
/// };
///
/// let policy = FramePolicy::new().filter(SkipRustSrc(AllowFrame));
/// assert!(policy.should_skip(
///     "std::rt::lang_start",
///     "/rustc/17067e9ac6d7e98f18d4a2d0ee5d9e2bb7ca3e1c/library/std/src/rt.rs",
/// ));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipRustSrc<N = AllowFrame>(pub N);

impl<N: FrameFilter> FrameFilter for SkipRustSrc<N> {
    fn should_skip(&self, function: &str, file: &str) -> bool {
        if is_rust_src_path(file) {
            return true;
        }

        self.0.should_skip(function, file)
    }
}

/// Returns `true` if `file` points into the sources of the standard library
/// crates (`std`, `core`, `alloc`, `test` and their siblings).
///
/// Two layouts are recognized, with either path separator:
/// - `/rustc/{40-char-hash}/library/...`, the remapped paths baked into
///   the precompiled standard library.
/// - `.../lib/rustlib/src/rust/library/...`, the `rust-src` component of a
///   local toolchain.
#[must_use]
pub fn is_rust_src_path(file: &str) -> bool {
    static RUST_SRC_REGEX: OnceLock<regex::Regex> = OnceLock::new();
    let regex = RUST_SRC_REGEX.get_or_init(|| {
        regex::Regex::new(
            r"(?:[/\\]lib[/\\]rustlib[/\\]src[/\\]rust|^[/\\]rustc[/\\][0-9a-f]{40})[/\\]library[/\\]",
        )
        .expect("built-in regex pattern for std library paths should be valid")
    });

    regex.is_match(file)
}
