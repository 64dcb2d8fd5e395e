//! Name formatters shorten function names in verbose renderings.
//!
//! A formatter is applied when an error is rendered, never when it is
//! captured, so installing one changes how every existing error is printed.
//!
//! The built-in formatters work on demangled Rust symbol paths. Paths are split
//! on the `::` separators that are not nested inside `<...>`, so
//! `<my_app::Config as core::fmt::Display>::fmt` has two segments. The
//! *function* of a path is its last identifier segment together with any
//! segments that follow it, such as `{{closure}}` or generic arguments:
//!
//! | Path                                | [`ShortFunctionName`]   | [`OnlyFunctionName`] | [`NoDomainFunctionName`] |
//! |-------------------------------------|-------------------------|----------------------|--------------------------|
//! | `my_app::config::load`              | `config::load`          | `load`               | `config::load`           |
//! | `my_app::worker::run::{{closure}}`  | `worker::run::{{closure}}` | `run::{{closure}}` | `worker::run::{{closure}}` |
//! | `<my_app::Config as Display>::fmt`  | `<my_app::Config as Display>::fmt` | `fmt`     | unchanged                |
//!
//! Paths that contain no identifier segment at all are returned unchanged.

use std::borrow::Cow;

/// Transforms a function name before it is rendered.
///
/// Implemented for every `Fn(&str) -> String` closure.
///
/// # Examples
///
/// ```
/// use stackcause::hooks::name_formatter::FrameNameFormatter;
///
/// let upper = |name: &str| name.to_uppercase();
/// assert_eq!(upper.format("app::run"), "APP::RUN");
/// ```
pub trait FrameNameFormatter: Send + Sync + 'static {
    /// Returns the text to render in place of `function`.
    fn format<'a>(&self, function: &'a str) -> Cow<'a, str>;
}

impl<F> FrameNameFormatter for F
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn format<'a>(&self, function: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(function))
    }
}

/// Keeps the function and the path segment right before it.
///
/// `my_app::config::load` becomes `config::load`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortFunctionName;

impl FrameNameFormatter for ShortFunctionName {
    fn format<'a>(&self, function: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(short_function_name(function))
    }
}

/// Keeps only the function.
///
/// `my_app::config::load` becomes `load`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OnlyFunctionName;

impl FrameNameFormatter for OnlyFunctionName {
    fn format<'a>(&self, function: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(only_function_name(function))
    }
}

/// Drops the leading crate name.
///
/// `my_app::config::load` becomes `config::load`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoDomainFunctionName;

impl FrameNameFormatter for NoDomainFunctionName {
    fn format<'a>(&self, function: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(no_domain_function_name(function))
    }
}

/// Returns the function of `path` and the segment before it.
#[must_use]
pub fn short_function_name(path: &str) -> &str {
    let segments = Segments::split(path);
    match segments.function_index() {
        Some(0) | None => path,
        Some(index) => segments.tail(index - 1),
    }
}

/// Returns the function of `path`.
#[must_use]
pub fn only_function_name(path: &str) -> &str {
    let segments = Segments::split(path);
    match segments.function_index() {
        Some(index) => segments.tail(index),
        None => path,
    }
}

/// Returns `path` without its first segment, if that segment is a plain
/// identifier and is not the function itself.
#[must_use]
pub fn no_domain_function_name(path: &str) -> &str {
    let segments = Segments::split(path);
    match segments.function_index() {
        Some(index) if index > 0 && is_identifier(segments.get(0)) => segments.tail(1),
        _ => path,
    }
}

/// The top-level `::` segments of a symbol path.
struct Segments<'a> {
    path: &'a str,
    /// Byte offset where each segment starts. Never empty.
    starts: Vec<usize>,
}

impl<'a> Segments<'a> {
    fn split(path: &'a str) -> Self {
        let bytes = path.as_bytes();
        let mut starts = vec![0];
        let mut depth = 0usize;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'-' if bytes.get(i + 1) == Some(&b'>') => i += 1,
                b'<' => depth += 1,
                b'>' => depth = depth.saturating_sub(1),
                b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                    i += 1;
                    starts.push(i + 1);
                }
                _ => {}
            }
            i += 1;
        }

        Self { path, starts }
    }

    fn len(&self) -> usize {
        self.starts.len()
    }

    fn get(&self, index: usize) -> &'a str {
        let start = self.starts[index];
        let end = match self.starts.get(index + 1) {
            Some(next) => next - 2,
            None => self.path.len(),
        };
        &self.path[start..end]
    }

    /// Everything from segment `index` to the end of the path.
    fn tail(&self, index: usize) -> &'a str {
        &self.path[self.starts[index]..]
    }

    fn function_index(&self) -> Option<usize> {
        (0..self.len()).rev().find(|&index| is_identifier(self.get(index)))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first == '_' || unicode_ident::is_xid_start(first)) && chars.all(unicode_ident::is_xid_continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_nested_separators() {
        let segments = Segments::split("<my_app::Config as core::fmt::Display>::fmt");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments.get(0), "<my_app::Config as core::fmt::Display>");
        assert_eq!(segments.get(1), "fmt");

        let segments = Segments::split("<fn() -> u8 as app::Call>::call");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments.get(1), "call");

        let segments = Segments::split("");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments.get(0), "");
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("load"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("{{closure}}"));
        assert!(!is_identifier("<impl app::Foo>"));
        assert!(!is_identifier("Foo<T>"));
        assert!(!is_identifier("0abc"));
    }

    #[test]
    fn test_short_function_name() {
        let cases = [
            ("my_app::config::load", "config::load"),
            ("my_app::worker::run::{{closure}}", "worker::run::{{closure}}"),
            (
                "std::rt::lang_start::<()>::{{closure}}",
                "rt::lang_start::<()>::{{closure}}",
            ),
            (
                "<my_app::Config as core::fmt::Display>::fmt",
                "<my_app::Config as core::fmt::Display>::fmt",
            ),
            ("main", "main"),
            ("{{closure}}", "{{closure}}"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(short_function_name(input), expected, "{input}");
        }
    }

    #[test]
    fn test_only_function_name() {
        let cases = [
            ("my_app::config::load", "load"),
            ("my_app::worker::run::{{closure}}", "run::{{closure}}"),
            ("<my_app::Config as core::fmt::Display>::fmt", "fmt"),
            ("my_app::Stack<T>::push", "push"),
            ("main", "main"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(only_function_name(input), expected, "{input}");
        }
    }

    #[test]
    fn test_no_domain_function_name() {
        let cases = [
            ("my_app::config::load", "config::load"),
            ("my_app::load", "load"),
            ("my_app::worker::run::{{closure}}", "worker::run::{{closure}}"),
            (
                "<my_app::Config as core::fmt::Display>::fmt",
                "<my_app::Config as core::fmt::Display>::fmt",
            ),
            ("main", "main"),
            ("main::{{closure}}", "main::{{closure}}"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(no_domain_function_name(input), expected, "{input}");
        }
    }

    #[test]
    fn test_formatters_borrow() {
        let name = "my_app::config::load";
        assert!(matches!(ShortFunctionName.format(name), Cow::Borrowed("config::load")));
        assert!(matches!(OnlyFunctionName.format(name), Cow::Borrowed("load")));
        assert!(matches!(
            NoDomainFunctionName.format(name),
            Cow::Borrowed("config::load")
        ));

        let closure = |name: &str| format!("[{name}]");
        assert!(matches!(closure.format(name), Cow::Owned(_)));
        assert_eq!(closure.format(name), "[my_app::config::load]");
    }
}
