use forgecheck_model::{DeclKind, ModelError};

use crate::TagKind;

pub type CheckResult<T = ()> = Result<T, CheckError>;

/// A fault that aborts the round.
///
/// Violations of the checked program are never errors; they are reported to
/// the diagnostic sink and checking continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("framework type `{name}` is not present in the program model")]
    MissingFrameworkType { name: String },

    #[error("@{tag} cannot be applied to {kind} `{name}`")]
    UnexpectedTarget {
        tag: TagKind,
        kind: DeclKind,
        name: String,
    },

    #[error("{kind} `{name}` is listed as carrying @{tag} but has no such attachment")]
    MissingAttachment {
        tag: TagKind,
        kind: DeclKind,
        name: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}
