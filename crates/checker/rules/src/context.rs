use forgecheck_diagnostics::{Anchor, DiagnosticCode, DiagnosticSink};
use forgecheck_model::{AttachmentId, DeclId, ProgramModel, TypeId};

use crate::{CheckError, CheckResult, FrameworkProfile, TagKind};

/// Framework types resolved once per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkTypes {
    profile: FrameworkProfile,
    /// Tag annotation types, indexed by [`TagKind::index`]. A tag whose
    /// annotation is absent from the model cannot be carried by anything.
    tags: [Option<TypeId>; TagKind::COUNT],
    pub fml_event: TypeId,
    pub event: TypeId,
    pub mod_metadata: TypeId,
    pub side: TypeId,
    pub string: TypeId,
    pub void: TypeId,
    pub boolean: TypeId,
}

impl FrameworkTypes {
    /// Resolves every designated type under `profile`.
    ///
    /// # Errors
    ///
    /// [`CheckError::MissingFrameworkType`] when a designated type is absent.
    pub fn resolve(model: &dyn ProgramModel, profile: &FrameworkProfile) -> CheckResult<Self> {
        let require = |name: String| {
            model
                .resolve_type_by_name(&name)
                .ok_or(CheckError::MissingFrameworkType { name })
        };

        let tags = TagKind::ALL.map(|tag| model.resolve_type_by_name(&tag.annotation_name(profile)));
        for tag in TagKind::ALL {
            if tags[tag.index()].is_none() {
                tracing::debug!(%tag, "annotation type not declared, tag is inert");
            }
        }

        Ok(Self {
            profile: profile.clone(),
            tags,
            fml_event: require(profile.fml_event())?,
            event: require(profile.event())?,
            mod_metadata: require(profile.mod_metadata())?,
            side: require(profile.side())?,
            string: require("java.lang.String".to_string())?,
            void: require("void".to_string())?,
            boolean: require("boolean".to_string())?,
        })
    }

    pub fn profile(&self) -> &FrameworkProfile {
        &self.profile
    }

    pub const fn tag(&self, tag: TagKind) -> Option<TypeId> {
        self.tags[tag.index()]
    }
}

/// Everything a rule needs: the model it reads, the framework types and the
/// sink it reports to.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub model: &'a dyn ProgramModel,
    pub framework: &'a FrameworkTypes,
    pub sink: &'a dyn DiagnosticSink,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        model: &'a dyn ProgramModel,
        framework: &'a FrameworkTypes,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            model,
            framework,
            sink,
        }
    }

    pub fn report(&self, code: DiagnosticCode, prefix: &str, suffix: &str, anchor: Anchor) {
        code.report(self.sink, prefix, suffix, anchor);
    }

    /// Whether `decl` carries an attachment of `tag`.
    pub fn carries(&self, decl: DeclId, tag: TagKind) -> CheckResult<bool> {
        match self.framework.tag(tag) {
            Some(annotation) => Ok(self.model.has_attachment(decl, annotation)?),
            None => Ok(false),
        }
    }

    /// The attachment that put `decl` under `tag`.
    pub fn tag_attachment(&self, decl: DeclId, tag: TagKind) -> CheckResult<AttachmentId> {
        let found = match self.framework.tag(tag) {
            Some(annotation) => self.model.find_attachment(decl, annotation)?,
            None => None,
        };
        match found {
            Some(id) => Ok(id),
            None => Err(CheckError::MissingAttachment {
                tag,
                kind: self.model.kind_of(decl)?,
                name: self.model.name_of(decl)?.to_string(),
            }),
        }
    }

    /// The enclosing declaration of a member.
    pub fn owner(&self, decl: DeclId) -> CheckResult<DeclId> {
        match self.model.enclosing_of(decl)? {
            Some(owner) => Ok(owner),
            None => Err(forgecheck_model::ModelError::NoEnclosing {
                kind: self.model.kind_of(decl)?,
                name: self.model.name_of(decl)?.to_string(),
            }
            .into()),
        }
    }
}
