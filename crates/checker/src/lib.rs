//! # Forgecheck
//!
//! Host side of the checker: loads a program snapshot, runs one validation
//! round over it and renders what the round reported.
//!
//! ```text
//! snapshot.json ──► Program ──► ForgeValidator ──► DiagnosticCollection ──► report
//! ```

use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use forgecheck_diagnostics::{
    build_diagnostic_message, locate, CollectingSink, Diagnostic, DiagnosticCollection,
};
use forgecheck_model::{DeclKind, ModifierSet, Program, ProgramModel, Snapshot};
use forgecheck_rules::{CheckResult, ForgeValidator, FrameworkProfile, RoundSummary, TagKind};

pub mod config;

pub use config::{CheckerConfig, FrameworkConfig, ReportConfig};

/// A checked snapshot.
#[derive(Debug)]
pub struct CheckOutcome {
    pub program: Program,
    pub diagnostics: DiagnosticCollection,
    pub summary: RoundSummary,
}

/// Reads and loads the snapshot at `path`.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Program> {
    let snapshot = Snapshot::from_path(path)
        .with_context(|| format!("Error reading snapshot '{}'", path.display()))?;
    snapshot
        .into_program()
        .with_context(|| format!("Failed to load snapshot '{}'", path.display()))
}

/// Loads the snapshot at `path` and runs one round over it.
pub fn check_snapshot(path: &Path, profile: &FrameworkProfile) -> anyhow::Result<CheckOutcome> {
    let program = load_snapshot(path)?;
    let sink = CollectingSink::new();
    let summary = {
        let validator = ForgeValidator::new(&program, profile)
            .with_context(|| format!("Cannot check '{}'", path.display()))?;
        validator
            .validate(&sink)
            .with_context(|| format!("Validation of '{}' aborted", path.display()))?
    };
    tracing::info!(
        tags = summary.tags,
        checked = summary.checked,
        diagnostics = sink.len(),
        "round finished"
    );
    Ok(CheckOutcome {
        program,
        diagnostics: sink.into_collection(),
        summary,
    })
}

/// Renders `diagnostic` against the source file its anchor points into.
///
/// Source files are looked up relative to `base_dir`. A diagnostic without
/// a location, or whose file cannot be read, renders as a single line.
pub fn render_diagnostic(
    model: &dyn ProgramModel,
    diagnostic: &Diagnostic,
    base_dir: &Path,
    with_color: bool,
) -> String {
    let Some(location) = locate(model, &diagnostic.anchor) else {
        return diagnostic.to_string();
    };
    let path = base_dir.join(&location.file);
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            tracing::debug!(path = %path.display(), "source unavailable: {e}");
            return diagnostic.to_string();
        }
    };
    if location.start > location.end || location.end > source.len() {
        tracing::debug!(path = %path.display(), ?location, "location outside of source");
        return diagnostic.to_string();
    }
    build_diagnostic_message(&source, diagnostic, location.span(), with_color).unwrap_or_else(|e| {
        tracing::debug!("failed to render report: {e}");
        diagnostic.to_string()
    })
}

/// How a check run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Clean,
    Failed,
    Fault,
}

impl Status {
    /// `Failed` when an error was reported, or any diagnostic at all when
    /// warnings are denied.
    pub fn of(diagnostics: &DiagnosticCollection, deny_warnings: bool) -> Self {
        let failed = if deny_warnings {
            !diagnostics.is_empty()
        } else {
            diagnostics.has_errors()
        };
        if failed {
            Self::Failed
        } else {
            Self::Clean
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Failed => 1,
            Self::Fault => 2,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        Self::from(status.code())
    }
}

/// One tagged declaration, as listed by `--inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedDeclaration {
    pub tag: TagKind,
    pub kind: DeclKind,
    pub name: String,
    pub modifiers: ModifierSet,
}

impl fmt::Display for TaggedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{} {} {} [{}] access=0x{:04x}",
            self.tag,
            self.kind,
            self.name,
            self.modifiers,
            self.modifiers.access_mask()
        )
    }
}

/// Every declaration carrying a recognized tag, grouped by tag in catalog
/// order. Types are listed by qualified name, members by simple name.
pub fn inspect(
    model: &dyn ProgramModel,
    profile: &FrameworkProfile,
) -> CheckResult<Vec<TaggedDeclaration>> {
    let validator = ForgeValidator::new(model, profile)?;
    let mut listed = Vec::new();
    for tag in TagKind::ALL {
        for decl in validator.tagged(tag) {
            let kind = model.kind_of(decl)?;
            let name = if kind.is_type() {
                model.type_name(model.type_of(decl)?)?
            } else {
                model.name_of(decl)?
            };
            listed.push(TaggedDeclaration {
                tag,
                kind,
                name: name.to_string(),
                modifiers: model.modifiers_of(decl)?,
            });
        }
    }
    Ok(listed)
}
