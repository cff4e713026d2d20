//! # Forgecheck Rules
//!
//! The validation engine: constraint primitives, each testing one structural
//! fact, composed into an ordered contract per recognized framework tag.
//!
//! ```text
//! ProgramModel ──► FrameworkTypes ──► ForgeValidator ──► TagKind::rules ──► primitives ──► DiagnosticSink
//! ```

mod context;
mod contracts;
mod error;
mod orchestrator;
pub mod primitives;
mod profile;
mod tags;

pub use context::{FrameworkTypes, RuleContext};
pub use error::{CheckError, CheckResult};
pub use orchestrator::{validate_round, ForgeValidator, RoundSummary};
pub use profile::{FrameworkProfile, ProfileName, UnknownProfile};
pub use tags::{Rule, TagKind};
