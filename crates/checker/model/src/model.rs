//! The read-only query surface the checker runs against.

use indexmap::IndexMap;

use crate::definition::{AttachmentId, DeclId, DeclKind, SourceLocation, TypeId};
use crate::modifiers::ModifierSet;
use crate::value::{Attachment, Value};

pub type ModelResult<T> = Result<T, ModelError>;

/// An inconsistent answer from the program model.
///
/// These are faults of the model, not of the program being checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown declaration {0:?}")]
    UnknownDeclaration(DeclId),
    #[error("unknown attachment {0:?}")]
    UnknownAttachment(AttachmentId),
    #[error("unknown type {0:?}")]
    UnknownType(TypeId),
    #[error("{kind} `{name}` has no declared type")]
    NoDeclaredType { kind: DeclKind, name: String },
    #[error("{kind} `{name}` is not a method or constructor")]
    NotExecutable { kind: DeclKind, name: String },
    #[error("{kind} `{name}` has no enclosing declaration")]
    NoEnclosing { kind: DeclKind, name: String },
}

/// Program Model Adapter.
///
/// Everything is answered for the current compilation round only. Type
/// relationship queries answer `false` for ids they do not know.
pub trait ProgramModel {
    /// Declarations carrying an attachment of `annotation`, in declaration order.
    fn declarations_with_tag(&self, annotation: TypeId) -> Vec<DeclId>;

    fn kind_of(&self, decl: DeclId) -> ModelResult<DeclKind>;

    /// Simple name of the declaration.
    fn name_of(&self, decl: DeclId) -> ModelResult<&str>;

    /// Declared type of a type or field declaration.
    fn type_of(&self, decl: DeclId) -> ModelResult<TypeId>;

    fn modifiers_of(&self, decl: DeclId) -> ModelResult<ModifierSet>;

    fn enclosing_of(&self, decl: DeclId) -> ModelResult<Option<DeclId>>;

    /// Directly declared members, in declaration order.
    fn members_of(&self, decl: DeclId) -> ModelResult<&[DeclId]>;

    fn parameters_of(&self, decl: DeclId) -> ModelResult<&[TypeId]>;

    fn return_type_of(&self, decl: DeclId) -> ModelResult<TypeId>;

    fn attachments_of(&self, decl: DeclId) -> ModelResult<&[AttachmentId]>;

    fn attachment(&self, id: AttachmentId) -> ModelResult<&Attachment>;

    /// The declaration introducing `ty`, when the type is declared in this program.
    fn declaration_of_type(&self, ty: TypeId) -> Option<DeclId>;

    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool;

    /// Whether a value of `source` can be assigned to a variable of `target`.
    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool;

    fn is_same_type(&self, a: TypeId, b: TypeId) -> bool;

    fn resolve_type_by_name(&self, name: &str) -> Option<TypeId>;

    /// Canonical name: qualified for declared types, the keyword for primitives.
    fn type_name(&self, ty: TypeId) -> ModelResult<&str>;

    fn location_of(&self, _decl: DeclId) -> Option<&SourceLocation> {
        None
    }

    fn values_of(&self, id: AttachmentId) -> ModelResult<&IndexMap<String, Value>> {
        Ok(&self.attachment(id)?.values)
    }

    fn find_attachment(
        &self,
        decl: DeclId,
        annotation: TypeId,
    ) -> ModelResult<Option<AttachmentId>> {
        for &id in self.attachments_of(decl)? {
            if self.attachment(id)?.annotation == annotation {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    fn has_attachment(&self, decl: DeclId, annotation: TypeId) -> ModelResult<bool> {
        Ok(self.find_attachment(decl, annotation)?.is_some())
    }

    fn simple_type_name(&self, ty: TypeId) -> ModelResult<&str> {
        let name = self.type_name(ty)?;
        Ok(name.rsplit('.').next().unwrap_or(name))
    }

    /// `"<Kind> <name>"`, e.g. `Method onInit`.
    fn describe(&self, decl: DeclId) -> ModelResult<String> {
        Ok(format!(
            "{} {}",
            self.kind_of(decl)?.label(),
            self.name_of(decl)?
        ))
    }
}
