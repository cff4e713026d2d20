//! # Forgecheck Program Model
//!
//! This crate describes the program the checker validates: declarations,
//! declared types and the metadata attachments carried by declarations.
//!
//! ## Architecture
//!
//! 1. **Model trait**: [`ProgramModel`] is the read-only query surface the rules
//!    are written against. A compiler host implements it over its own element
//!    model.
//! 2. **In-memory program**: [`Program`] and [`ProgramBuilder`] implement the
//!    trait over plain arenas. Tests and the command-line host use it.
//! 3. **Snapshots**: [`Snapshot`] loads a JSON description of one compilation
//!    round into a [`Program`].
//!
//! Ids handed out by a model are only meaningful for that model. A new round
//! means a new model, and nothing here caches ids across rounds.

pub mod definition;
pub mod model;
pub mod modifiers;
pub mod program;
pub mod snapshot;
pub mod value;

pub use definition::{
    AttachmentId, DeclId, DeclKind, Primitive, SourceLocation, TypeId, TypeKind,
};
pub use model::{ModelError, ModelResult, ProgramModel};
pub use modifiers::{Modifier, ModifierSet};
pub use program::{Program, ProgramBuilder};
pub use snapshot::{load_program, AnnotationSpec, DeclSpec, LoadError, Snapshot, TypeSpec};
pub use value::{Attachment, NestedAttachment, Value};
