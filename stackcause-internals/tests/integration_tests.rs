//! Integration tests for stack capture and frame resolution.
//!
//! These tests rely on debug info being present, which is the case for the
//! default `test` profile.

use stackcause_internals::{MAX_STACK_FRAMES, RawFrame, capture_stack, resolve_frame};

#[inline(never)]
fn capture_here() -> Vec<RawFrame> {
    capture_stack(0, MAX_STACK_FRAMES)
}

#[inline(never)]
fn capture_for_caller() -> Vec<RawFrame> {
    capture_stack(1, MAX_STACK_FRAMES)
}

#[inline(never)]
fn outer_capture_for_caller() -> Vec<RawFrame> {
    capture_for_caller()
}

#[test]
fn test_first_frame_is_the_calling_function() {
    let frames = capture_here();
    let first = resolve_frame(frames[0]);

    assert!(
        first.function.ends_with("capture_here"),
        "unexpected function: {first:?}"
    );
    assert!(
        first.file.ends_with("integration_tests.rs"),
        "unexpected file: {first:?}"
    );
    assert!(first.line > 0);
}

#[test]
fn test_caller_frame_follows() {
    let frames = capture_here();
    let second = resolve_frame(frames[1]);
    assert!(
        second.function.contains("test_caller_frame_follows"),
        "unexpected function: {second:?}"
    );
}

#[test]
fn test_skip_reports_the_caller() {
    let frames = outer_capture_for_caller();
    let first = resolve_frame(frames[0]);
    assert!(
        first.function.ends_with("outer_capture_for_caller"),
        "unexpected function: {first:?}"
    );
}

#[test]
fn test_symbols_are_demangled_without_hash() {
    let frames = capture_here();
    let first = resolve_frame(frames[0]);
    assert!(first.function.contains("::"));
    assert!(!first.function.contains("::h"), "hash leaked: {}", first.function);
}

#[test]
fn test_resolution_is_stable() {
    let frames = capture_here();
    for frame in frames {
        assert_eq!(resolve_frame(frame), resolve_frame(frame));
    }
}

#[test]
fn test_capture_never_exceeds_depth() {
    for depth in [1, 2, 5, MAX_STACK_FRAMES] {
        let frames = capture_stack(0, depth);
        assert!(!frames.is_empty());
        assert!(frames.len() <= depth);
    }
}
