//! # Rule Orchestrator
//!
//! Runs every tag's contract over every declaration carrying it. A contract
//! always runs to the end, so one declaration may collect several
//! diagnostics in a round.

use forgecheck_diagnostics::{CollectingSink, DiagnosticCollection, DiagnosticSink};
use forgecheck_model::{DeclId, ProgramModel};

use crate::{CheckError, CheckResult, FrameworkProfile, FrameworkTypes, RuleContext, TagKind};

/// What a round looked at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Tag kinds carried by at least one declaration.
    pub tags: usize,
    /// `(tag, declaration)` pairs whose contract ran.
    pub checked: usize,
}

/// The validator for one compilation round.
pub struct ForgeValidator<'a> {
    model: &'a dyn ProgramModel,
    framework: FrameworkTypes,
}

impl<'a> ForgeValidator<'a> {
    /// Resolves the framework types of `profile` in `model`.
    pub fn new(model: &'a dyn ProgramModel, profile: &FrameworkProfile) -> CheckResult<Self> {
        let framework = FrameworkTypes::resolve(model, profile)?;
        Ok(Self { model, framework })
    }

    pub const fn framework(&self) -> &FrameworkTypes {
        &self.framework
    }

    /// Declarations carrying `tag`, in declaration order.
    pub fn tagged(&self, tag: TagKind) -> Vec<DeclId> {
        self.framework
            .tag(tag)
            .map(|annotation| self.model.declarations_with_tag(annotation))
            .unwrap_or_default()
    }

    /// Runs one round, reporting every violation to `sink`.
    ///
    /// # Errors
    ///
    /// Fails on the first model fault or misplaced tag. Diagnostics already
    /// pushed to `sink` describe a model that is known to be inconsistent and
    /// should be discarded.
    pub fn validate(&self, sink: &dyn DiagnosticSink) -> CheckResult<RoundSummary> {
        let _span = tracing::debug_span!("round", package = self.framework.profile().package())
            .entered();
        let cx = RuleContext::new(self.model, &self.framework, sink);
        let mut summary = RoundSummary::default();

        for tag in TagKind::ALL {
            let declarations = self.tagged(tag);
            if declarations.is_empty() {
                continue;
            }
            tracing::debug!(%tag, count = declarations.len(), "checking tag");
            summary.tags += 1;

            for decl in declarations {
                self.check(&cx, tag, decl)?;
                summary.checked += 1;
            }
        }

        Ok(summary)
    }

    /// Runs the contract of `tag` against a single declaration.
    pub fn check(&self, cx: &RuleContext<'_>, tag: TagKind, decl: DeclId) -> CheckResult {
        let kind = self.model.kind_of(decl)?;
        if !tag.accepts(kind) {
            return Err(CheckError::UnexpectedTarget {
                tag,
                kind,
                name: self.model.name_of(decl)?.to_string(),
            });
        }
        tracing::debug!(%tag, declaration = self.model.name_of(decl)?, "checking declaration");
        for rule in tag.rules() {
            rule(cx, decl)?;
        }
        Ok(())
    }
}

/// Runs one round against `model` and collects its diagnostics.
pub fn validate_round(
    model: &dyn ProgramModel,
    profile: &FrameworkProfile,
) -> CheckResult<DiagnosticCollection> {
    let validator = ForgeValidator::new(model, profile)?;
    let sink = CollectingSink::new();
    validator.validate(&sink)?;
    Ok(sink.into_collection())
}
