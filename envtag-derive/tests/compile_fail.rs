//! Compile-fail tests to verify error messages
//!
//! These tests ensure that unsupported targets and attributes produce clear,
//! spanned error messages instead of confusing trait errors.

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}
