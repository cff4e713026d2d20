//! # Forgecheck Diagnostics
//!
//! The diagnostic catalog: a closed set of violation codes, each with a fixed
//! severity and message template, plus the sink violations are reported to
//! and the renderer that turns them into annotated reports.

mod diagnostics;
mod reporting;

pub use diagnostics::{
    Anchor, CollectingSink, Diagnostic, DiagnosticCode, DiagnosticCollection,
    DiagnosticSeverity, DiagnosticSink,
};
pub use reporting::{build_diagnostic_message, locate};
