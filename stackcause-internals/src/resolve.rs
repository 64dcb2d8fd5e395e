//! Symbol resolution for captured frames.

use core::ffi::c_void;

use crate::RawFrame;

/// A frame mapped to its source location.
///
/// Every field is best effort: symbols stripped from the binary resolve to an
/// empty function name, frames without debug info to an empty file and line
/// `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResolvedFrame {
    /// The demangled function name, without the trailing symbol hash.
    ///
    /// Example: `my_app::config::load`
    pub function: String,
    /// The source file the frame belongs to.
    pub file: String,
    /// The line number inside [`file`](Self::file).
    pub line: u32,
}

/// Resolves a captured frame to function, file and line.
///
/// When the address belongs to inlined code, the innermost inlined function is
/// reported, since that is the code that was actually executing.
///
/// # Examples
///
/// ```
/// use stackcause_internals::{capture_stack, resolve_frame};
///
/// if let Some(&frame) = capture_stack(0, 1).first() {
///     let resolved = resolve_frame(frame);
///     assert_eq!(resolved, resolve_frame(frame));
/// }
/// ```
#[must_use]
pub fn resolve_frame(frame: RawFrame) -> ResolvedFrame {
    let mut resolved = ResolvedFrame::default();
    let mut found = false;

    backtrace::resolve(frame.lookup_address() as *mut c_void, |symbol| {
        if found {
            return;
        }
        found = true;

        if let Some(name) = symbol.name() {
            resolved.function = format!("{name:#}");
        }
        if let Some(file) = symbol.filename() {
            resolved.file = file.display().to_string();
        }
        resolved.line = symbol.lineno().unwrap_or(0);
    });

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_frame_resolves_to_nothing() {
        let resolved = resolve_frame(RawFrame::from_ip(0));
        assert_eq!(resolved, ResolvedFrame::default());
    }
}
