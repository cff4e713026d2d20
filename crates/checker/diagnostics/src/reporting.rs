//! # Diagnostic Reporting
//!
//! Resolves an [`Anchor`] to a source location and renders annotated
//! reports with ariadne.

use std::ops::Range;

use ariadne::{Label, Report, Source};
use forgecheck_model::{ProgramModel, SourceLocation};

use crate::{Anchor, Diagnostic};

/// The most precise location the model knows for `anchor`.
///
/// A value falls back to its attachment, an attachment to its declaration.
pub fn locate(model: &dyn ProgramModel, anchor: &Anchor) -> Option<SourceLocation> {
    let attachment = anchor
        .attachment()
        .and_then(|id| model.attachment(id).ok());

    let precise = match (attachment, anchor.value()) {
        (Some(attachment), Some(name)) => attachment.value_location(name),
        (Some(attachment), None) => attachment.location.as_ref(),
        (None, _) => None,
    };

    precise
        .or_else(|| model.location_of(anchor.declaration()))
        .cloned()
}

/// Build a formatted report for a diagnostic pointing at `span` in `source`.
pub fn build_diagnostic_message(
    source: &str,
    diagnostic: &Diagnostic,
    span: Range<usize>,
    with_color: bool,
) -> std::io::Result<String> {
    let mut write_buffer = Vec::new();
    let code_u32: u32 = diagnostic.code.into();
    Report::build(diagnostic.severity.into(), ((), span.clone()))
        .with_config(
            ariadne::Config::new()
                .with_index_type(ariadne::IndexType::Byte)
                .with_color(with_color),
        )
        .with_code(code_u32)
        .with_message(&diagnostic.message)
        .with_label(Label::new(((), span)).with_message(&diagnostic.message))
        .finish()
        .write(Source::from(source), &mut write_buffer)?;
    Ok(String::from_utf8_lossy(&write_buffer).to_string())
}
