//! Raw stack capture.
//!
//! Frames are located relative to [`capture_stack`] itself: the walk keeps
//! looking for the frame whose symbol address is the address of
//! [`capture_stack`], and everything up to and including that frame (the
//! unwinder's own frames) is dropped. This does not depend on how many frames
//! the unwinder happens to push on a given platform or optimization level.

use core::fmt;

/// The maximum number of frames recorded by a full capture.
pub const MAX_STACK_FRAMES: usize = 32;

/// How many frames past the requested depth the walk may visit while it is
/// still looking for its own anchor frame.
const ANCHOR_SEARCH_LIMIT: usize = 64;

/// An unresolved stack frame.
///
/// This is a return address captured from the call stack. It is only
/// meaningful inside the process that captured it, and only becomes readable
/// once passed to [`resolve_frame`](crate::resolve_frame).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawFrame {
    /// The instruction pointer of the frame (the return address).
    ip: usize,
}

impl RawFrame {
    /// Creates a frame from a raw instruction pointer.
    #[must_use]
    pub const fn from_ip(ip: usize) -> Self {
        Self { ip }
    }

    /// Returns the instruction pointer of the frame.
    #[must_use]
    pub const fn ip(self) -> usize {
        self.ip
    }

    /// Returns the address used for symbol lookup.
    ///
    /// The instruction pointer of every frame except the innermost one is a
    /// return address, which points at the instruction *after* the call. One
    /// byte back lands inside the call instruction, so the lookup reports the
    /// call site.
    #[must_use]
    pub(crate) const fn lookup_address(self) -> usize {
        self.ip.saturating_sub(1)
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawFrame({:#x})", self.ip)
    }
}

/// Captures the current call stack.
///
/// The returned frames start at the caller of `capture_stack`, with `skip`
/// further frames removed, and hold at most `max_depth` frames. They are
/// ordered from the innermost frame to the outermost one.
///
/// With `skip == 0` the first frame is the function that called
/// `capture_stack`; a constructor that wants to report *its* caller passes
/// `skip == 1`.
///
/// # Examples
///
/// ```
/// use stackcause_internals::{capture_stack, resolve_frame};
///
/// let frames = capture_stack(0, 8);
/// assert!(frames.len() <= 8);
/// for frame in frames {
///     let resolved = resolve_frame(frame);
///     println!("{} ({}:{})", resolved.function, resolved.file, resolved.line);
/// }
/// ```
#[inline(never)]
#[must_use]
pub fn capture_stack(skip: usize, max_depth: usize) -> Vec<RawFrame> {
    if max_depth == 0 {
        return Vec::new();
    }

    let anchor = capture_stack as fn(usize, usize) -> Vec<RawFrame> as usize;
    let walk_limit = max_depth
        .saturating_add(skip)
        .saturating_add(ANCHOR_SEARCH_LIMIT);

    let mut walked: Vec<(usize, usize)> = Vec::with_capacity(walk_limit.min(128));
    let mut anchor_index = None;

    backtrace::trace(|frame| {
        let symbol_address = frame.symbol_address() as usize;
        if anchor_index.is_none() && symbol_address == anchor {
            anchor_index = Some(walked.len());
        }
        walked.push((frame.ip() as usize, symbol_address));
        walked.len() < walk_limit
    });

    let start = match anchor_index {
        Some(index) => index + 1 + skip,
        None => skip,
    };

    walked
        .into_iter()
        .skip(start)
        .take(max_depth)
        .map(|(ip, _)| RawFrame::from_ip(ip))
        .collect()
}
