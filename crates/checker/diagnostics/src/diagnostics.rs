//! # Diagnostic Catalog
//!
//! Every violation the checker can report is one [`DiagnosticCode`]. A code
//! fixes the severity and the message template; callers only supply the
//! prefix (what is wrong) and suffix (what was expected).

use std::cell::RefCell;
use std::fmt;

use ariadne::ReportKind;
use forgecheck_model::{AttachmentId, DeclId};

/// A reported violation, anchored to the program element it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: DiagnosticCode,
    pub message: String,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    /// The build must fail.
    Error,
    /// Advisory; the build proceeds.
    Warning,
}

impl From<DiagnosticSeverity> for ReportKind<'static> {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => ReportKind::Error,
            DiagnosticSeverity::Warning => ReportKind::Warning,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// What a diagnostic is pinned to, from coarsest to most precise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Anchor {
    Declaration(DeclId),
    Attachment(DeclId, AttachmentId),
    /// A single named value inside an attachment.
    Value(DeclId, AttachmentId, String),
}

impl Anchor {
    pub const fn declaration(&self) -> DeclId {
        match self {
            Self::Declaration(decl) | Self::Attachment(decl, _) | Self::Value(decl, _, _) => *decl,
        }
    }

    pub const fn attachment(&self) -> Option<AttachmentId> {
        match self {
            Self::Declaration(_) => None,
            Self::Attachment(_, attachment) | Self::Value(_, attachment, _) => Some(*attachment),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(_, _, name) => Some(name),
            _ => None,
        }
    }
}

impl From<DeclId> for Anchor {
    fn from(decl: DeclId) -> Self {
        Self::Declaration(decl)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Modifier violations (1000-1999)
    NonPublic,
    Static,
    NonStatic,
    Final,
    NonFinal,
    Abstract,
    NonAbstract,

    // Member and signature violations (2000-2999)
    MissingConstructor,
    InvalidParameters,
    InvalidReturn,
    TooMany,
    NotEnough,

    // Type relationship violations (3000-3999)
    NotSubtype,
    NotAssignable,

    // Advisory (4000-4999)
    NotFound,
    NotSame,
    MissingAnnotation,
}

impl From<DiagnosticCode> for u32 {
    fn from(code: DiagnosticCode) -> Self {
        match code {
            DiagnosticCode::NonPublic => 1001,
            DiagnosticCode::Static => 1002,
            DiagnosticCode::NonStatic => 1003,
            DiagnosticCode::Final => 1004,
            DiagnosticCode::NonFinal => 1005,
            DiagnosticCode::Abstract => 1006,
            DiagnosticCode::NonAbstract => 1007,
            DiagnosticCode::MissingConstructor => 2001,
            DiagnosticCode::InvalidParameters => 2002,
            DiagnosticCode::InvalidReturn => 2003,
            DiagnosticCode::TooMany => 2004,
            DiagnosticCode::NotEnough => 2005,
            DiagnosticCode::NotSubtype => 3001,
            DiagnosticCode::NotAssignable => 3002,
            DiagnosticCode::NotFound => 4001,
            DiagnosticCode::NotSame => 4002,
            DiagnosticCode::MissingAnnotation => 4003,
        }
    }
}

impl DiagnosticCode {
    pub const ALL: [Self; 17] = [
        Self::NonPublic,
        Self::Static,
        Self::NonStatic,
        Self::Final,
        Self::NonFinal,
        Self::Abstract,
        Self::NonAbstract,
        Self::MissingConstructor,
        Self::InvalidParameters,
        Self::InvalidReturn,
        Self::TooMany,
        Self::NotEnough,
        Self::NotSubtype,
        Self::NotAssignable,
        Self::NotFound,
        Self::NotSame,
        Self::MissingAnnotation,
    ];

    pub const fn severity(self) -> DiagnosticSeverity {
        match self {
            Self::NotFound | Self::NotSame | Self::MissingAnnotation => DiagnosticSeverity::Warning,
            _ => DiagnosticSeverity::Error,
        }
    }

    /// The fixed text placed between the prefix and the suffix.
    pub const fn template(self) -> &'static str {
        match self {
            Self::NonPublic => " must be public",
            Self::Static => " cannot be static",
            Self::NonStatic => " must be static",
            Self::Final => " cannot be final",
            Self::NonFinal => " must be final",
            Self::Abstract => " cannot be abstract",
            Self::NonAbstract => " must be abstract",
            Self::MissingConstructor => " is missing required constructor with parameters ",
            Self::InvalidParameters => " has invalid parameters. Must be ",
            Self::InvalidReturn => " has an invalid return type. Must be ",
            Self::TooMany => " is invalid because there are too many members annotated with ",
            Self::NotEnough => " is invalid because there are not enough members annotated with ",
            Self::NotSubtype => " needs to be a subtype of ",
            Self::NotAssignable => " needs to be assignable to ",
            Self::NotFound => " not found",
            Self::NotSame => " should be of type ",
            Self::MissingAnnotation => "'s owner should be annotated with ",
        }
    }

    /// Composes `prefix + template + suffix` into a diagnostic.
    pub fn render(self, prefix: &str, suffix: &str, anchor: Anchor) -> Diagnostic {
        Diagnostic {
            severity: self.severity(),
            code: self,
            message: format!("{prefix}{}{suffix}", self.template()),
            anchor,
        }
    }

    /// Renders and hands the diagnostic to `sink`.
    pub fn report(self, sink: &dyn DiagnosticSink, prefix: &str, suffix: &str, anchor: Anchor) {
        let diagnostic = self.render(prefix, suffix, anchor);
        tracing::trace!(code = ?self, anchor = ?diagnostic.anchor, "{}", diagnostic.message);
        sink.push(diagnostic);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code: u32 = self.code.into();
        write!(f, "{}[{code}]: {}", self.severity, self.message)
    }
}

/// Append-only destination for diagnostics.
pub trait DiagnosticSink {
    fn push(&self, diagnostic: Diagnostic);
}

/// A sink that keeps everything it receives, in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn into_collection(self) -> DiagnosticCollection {
        DiagnosticCollection::from(self.diagnostics.into_inner())
    }
}

impl DiagnosticSink for CollectingSink {
    fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Collection of diagnostics from one round
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.with_severity(DiagnosticSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.with_severity(DiagnosticSeverity::Warning)
    }

    fn with_severity(&self, severity: DiagnosticSeverity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub const fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by severity (errors first) and then by message
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.severity.cmp(&b.severity).then(a.message.cmp(&b.message)));
    }

    pub fn summary(&self) -> String {
        let errors = self.errors().len();
        let warnings = self.warnings().len();

        if self.diagnostics.is_empty() {
            "No issues found".to_string()
        } else {
            format!("{errors} errors, {warnings} warnings")
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl From<Vec<Diagnostic>> for DiagnosticCollection {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
