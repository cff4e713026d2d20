//! JSON snapshots of a compilation round.
//!
//! A snapshot lists library types by name and the program's declarations as a
//! tree. Type declarations are named by their qualified name, members by
//! their simple name. Loading resolves every type name, so a snapshot that
//! loads is a consistent [`Program`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::definition::{DeclId, DeclKind, SourceLocation, TypeId};
use crate::modifiers::{Modifier, ModifierSet};
use crate::program::{Program, ProgramBuilder, VOID};
use crate::value::{NestedAttachment, Value};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read snapshot {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
    #[error("{kind} `{name}` cannot declare `{field}`")]
    MisplacedField {
        kind: DeclKind,
        name: String,
        field: &'static str,
    },
    #[error("field `{0}` has no type")]
    MissingFieldType(String),
    #[error("{kind} `{name}` must be declared inside a type")]
    OrphanMember { kind: DeclKind, name: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Library types referenced by the program but not declared in it.
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub declarations: Vec<DeclSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclSpec {
    pub kind: DeclKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationSpec>,
    #[serde(default)]
    pub members: Vec<DeclSpec>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationSpec {
    #[serde(rename = "type")]
    pub annotation: String,
    #[serde(default)]
    pub values: IndexMap<String, ValueSpec>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub value_locations: IndexMap<String, SourceLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Bool(bool),
    Int(i64),
    Str(String),
    Class { class: String },
    Annotation { annotation: AnnotationSpec },
    List(Vec<ValueSpec>),
}

impl Snapshot {
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn into_program(self) -> Result<Program, LoadError> {
        let mut loader = Loader {
            builder: ProgramBuilder::new(),
        };
        loader.declare_types(&self)?;
        for spec in &self.declarations {
            loader.declaration(spec, None)?;
        }
        let program = loader.builder.build();
        debug!(
            declarations = program.declaration_count(),
            "loaded program snapshot"
        );
        Ok(program)
    }
}

/// Parses and loads a snapshot in one step.
pub fn load_program(text: &str) -> Result<Program, LoadError> {
    Snapshot::from_json(text)?.into_program()
}

struct Loader {
    builder: ProgramBuilder,
}

impl Loader {
    /// Registers every type name first so declarations may refer to types
    /// declared later in the snapshot.
    fn declare_types(&mut self, snapshot: &Snapshot) -> Result<(), LoadError> {
        let mut named: Vec<(&str, &[String])> = snapshot
            .types
            .iter()
            .map(|spec| (spec.name.as_str(), spec.supertypes.as_slice()))
            .collect();
        collect_type_declarations(&snapshot.declarations, &mut named);

        let mut seen = FxHashSet::default();
        for (name, _) in &named {
            if !seen.insert(*name) {
                return Err(LoadError::DuplicateType(name.to_string()));
            }
            self.builder.declare_type(name, &[]);
        }
        for (name, supertypes) in named {
            let ty = self.resolve(name)?;
            for sup in supertypes {
                let sup = self.resolve(sup)?;
                self.builder.add_supertype(ty, sup);
            }
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<TypeId, LoadError> {
        self.builder
            .lookup(name)
            .ok_or_else(|| LoadError::UnknownType(name.to_string()))
    }

    fn resolve_all(&self, names: &[String]) -> Result<Vec<TypeId>, LoadError> {
        names.iter().map(|name| self.resolve(name)).collect()
    }

    fn declaration(&mut self, spec: &DeclSpec, enclosing: Option<DeclId>) -> Result<DeclId, LoadError> {
        let modifiers: ModifierSet = spec.modifiers.iter().copied().collect();
        let misplaced = |field| LoadError::MisplacedField {
            kind: spec.kind,
            name: spec.name.clone(),
            field,
        };

        if spec.kind.is_type() {
            if spec.field_type.is_some() {
                return Err(misplaced("type"));
            }
            if !spec.parameters.is_empty() {
                return Err(misplaced("parameters"));
            }
            if spec.returns.is_some() {
                return Err(misplaced("returns"));
            }
        } else if !spec.supertypes.is_empty() {
            return Err(misplaced("supertypes"));
        } else if !spec.members.is_empty() {
            return Err(misplaced("members"));
        }

        let decl = match (spec.kind, enclosing) {
            (kind, _) if kind.is_type() => {
                let ty = self.resolve(&spec.name)?;
                self.builder
                    .type_declaration(kind, ty, modifiers, enclosing)
            }
            (kind, None) => {
                return Err(LoadError::OrphanMember {
                    kind,
                    name: spec.name.clone(),
                })
            }
            (DeclKind::Method, Some(owner)) => {
                if spec.field_type.is_some() {
                    return Err(misplaced("type"));
                }
                let parameters = self.resolve_all(&spec.parameters)?;
                let returns = self.resolve(spec.returns.as_deref().unwrap_or(VOID))?;
                self.builder
                    .method(owner, &spec.name, modifiers, &parameters, returns)
            }
            (DeclKind::Constructor, Some(owner)) => {
                if spec.returns.is_some() {
                    return Err(misplaced("returns"));
                }
                if spec.field_type.is_some() {
                    return Err(misplaced("type"));
                }
                let parameters = self.resolve_all(&spec.parameters)?;
                self.builder.constructor(owner, modifiers, &parameters)
            }
            (_, Some(owner)) => {
                if !spec.parameters.is_empty() {
                    return Err(misplaced("parameters"));
                }
                if spec.returns.is_some() {
                    return Err(misplaced("returns"));
                }
                let ty = spec
                    .field_type
                    .as_deref()
                    .ok_or_else(|| LoadError::MissingFieldType(spec.name.clone()))?;
                let ty = self.resolve(ty)?;
                self.builder.field(owner, &spec.name, modifiers, ty)
            }
        };

        if let Some(location) = &spec.location {
            self.builder.set_location(decl, location.clone());
        }
        for annotation in &spec.annotations {
            let (ty, values) = self.annotation(annotation)?;
            let id = self.builder.attach_with(decl, ty, values);
            self.builder.set_attachment_location(
                id,
                annotation.location.clone(),
                annotation
                    .value_locations
                    .iter()
                    .map(|(name, location)| (name.clone(), location.clone())),
            );
        }
        for member in &spec.members {
            self.declaration(member, Some(decl))?;
        }
        Ok(decl)
    }

    fn annotation(
        &self,
        spec: &AnnotationSpec,
    ) -> Result<(TypeId, IndexMap<String, Value>), LoadError> {
        let ty = self.resolve(&spec.annotation)?;
        let values = spec
            .values
            .iter()
            .map(|(name, value)| -> Result<(String, Value), LoadError> {
                Ok((name.clone(), self.value(value)?))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        Ok((ty, values))
    }

    fn value(&self, spec: &ValueSpec) -> Result<Value, LoadError> {
        Ok(match spec {
            ValueSpec::Bool(b) => Value::Bool(*b),
            ValueSpec::Int(i) => Value::Int(*i),
            ValueSpec::Str(s) => Value::Str(s.clone()),
            ValueSpec::Class { class } => Value::Type(self.resolve(class)?),
            ValueSpec::Annotation { annotation } => {
                let (annotation, values) = self.annotation(annotation)?;
                Value::Annotation(NestedAttachment { annotation, values })
            }
            ValueSpec::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.value(item))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn collect_type_declarations<'a>(specs: &'a [DeclSpec], out: &mut Vec<(&'a str, &'a [String])>) {
    for spec in specs {
        if spec.kind.is_type() {
            out.push((spec.name.as_str(), spec.supertypes.as_slice()));
        }
        collect_type_declarations(&spec.members, out);
    }
}
