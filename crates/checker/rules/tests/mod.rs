//! # Rule Tests
//!
//! Tests are organized by concern:
//!
//! - `primitives/` - One constraint primitive at a time
//! - `tags/` - The full contract of each tag
//! - `properties` - Round-level properties and end-to-end scenarios
//!
//! ## Test Utilities
//!
//! - `assert_codes!(diagnostics, [Code, ...])` - Assert the exact codes reported, in order
//! - `assert_clean!(diagnostics)` - Assert nothing was reported

pub use common::*;

/// Assert the exact sequence of diagnostic codes in a collection
#[macro_export]
macro_rules! assert_codes {
    ($diagnostics:expr, [$($code:ident),* $(,)?]) => {{
        let diagnostics = &$diagnostics;
        let expected: Vec<forgecheck_diagnostics::DiagnosticCode> =
            vec![$(forgecheck_diagnostics::DiagnosticCode::$code),*];
        assert_eq!(
            $crate::codes(diagnostics),
            expected,
            "unexpected diagnostics:\n{}",
            $crate::render(diagnostics)
        );
    }};
}

/// Assert that a round reported nothing
#[macro_export]
macro_rules! assert_clean {
    ($diagnostics:expr) => {{
        let diagnostics = &$diagnostics;
        assert!(
            diagnostics.is_empty(),
            "expected no diagnostics, got:\n{}",
            $crate::render(diagnostics)
        );
    }};
}
