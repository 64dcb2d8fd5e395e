//! The process-wide frame policy lives in its own test binary, so replacing it
//! cannot race the renderings of other tests. Everything here runs inside a
//! single test for the same reason.

use stackcause::{
    ErrorAggregate, StackError,
    hooks::{
        FramePolicy,
        frame_filter::{AllowFrame, SkipRustSrc},
        name_formatter::{OnlyFunctionName, ShortFunctionName},
        reset_frame_policy, set_frame_name_processor, set_skip_frame,
    },
};

fn skip_everything(_function: &str, _file: &str) -> bool {
    true
}

fn only_this_binary(function: &str, _file: &str) -> bool {
    !function.starts_with("global_policy::")
}

#[test]
fn frame_policy_is_process_wide() {
    let error = StackError::new("disk full");

    // A filter that hides every frame leaves only the text.
    set_skip_frame(skip_everything);
    assert_eq!(format!("{error:#}"), "disk full");
    assert_eq!(format!("{error:?}"), "disk full");
    assert_eq!(format!("{error}"), "disk full");

    let aggregate = ErrorAggregate::new();
    aggregate.add(StackError::new("a"));
    aggregate.add(std::io::Error::other("b"));
    assert_eq!(format!("{aggregate:#}"), "error #1\na\nerror #2\nb");
    assert_eq!(format!("{aggregate}"), "a\nb");

    // Changing the name formatter keeps the filter.
    set_frame_name_processor(OnlyFunctionName);
    assert_eq!(format!("{error:#}"), "disk full");

    // Changing the filter keeps the name formatter.
    set_skip_frame(only_this_binary);
    let rendered = format!("{error:#}");
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "disk full", "{rendered}");
    assert_eq!(lines[1], "frame_policy_is_process_wide", "{rendered}");
    assert!(lines[2].starts_with('\t'), "{rendered}");
    assert!(lines[2].contains("global_policy.rs:"), "{rendered}");

    // An explicit policy ignores the installed one.
    let explicit = FramePolicy::new().filter(skip_everything);
    assert_eq!(error.display_with(&explicit).to_string(), "disk full");

    // Installing returns what it replaces.
    let previous = FramePolicy::new()
        .filter(SkipRustSrc(AllowFrame))
        .name_formatter(ShortFunctionName)
        .install();
    assert!(previous.is_some());
    assert!(FramePolicy::current().should_skip(
        "std::rt::lang_start",
        "/rustc/17067e9ac6d7e98f18d4a2d0ee5d9e2bb7ca3e1c/library/std/src/rt.rs"
    ));

    // Resetting falls back to the environment.
    assert!(reset_frame_policy().is_some());
    assert!(reset_frame_policy().is_none());
    let current = format!("{:?}", FramePolicy::current());
    let from_env = format!("{:?}", FramePolicy::from_env());
    assert_eq!(current, from_env);
}
