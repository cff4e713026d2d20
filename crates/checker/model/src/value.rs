//! Metadata attachments and the values they carry.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::definition::{DeclId, SourceLocation, TypeId};

/// A parameter value held by an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    /// A class literal.
    Type(TypeId),
    List(Vec<Value>),
    Annotation(NestedAttachment),
}

/// An attachment used as a value of another attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedAttachment {
    pub annotation: TypeId,
    pub values: IndexMap<String, Value>,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_type(&self) -> Option<TypeId> {
        match self {
            Self::Type(ty) => Some(*ty),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Every type reference reachable from this value, in order.
    pub fn type_refs(&self) -> Vec<TypeId> {
        let mut refs = Vec::new();
        self.collect_type_refs(&mut refs);
        refs
    }

    fn collect_type_refs(&self, refs: &mut Vec<TypeId>) {
        match self {
            Self::Type(ty) => refs.push(*ty),
            Self::List(values) => values.iter().for_each(|v| v.collect_type_refs(refs)),
            Self::Annotation(nested) => nested
                .values
                .values()
                .for_each(|v| v.collect_type_refs(refs)),
            Self::Bool(_) | Self::Int(_) | Self::Str(_) => {}
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<TypeId> for Value {
    fn from(value: TypeId) -> Self {
        Self::Type(value)
    }
}

/// A tag instance attached to one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub owner: DeclId,
    pub annotation: TypeId,
    pub values: IndexMap<String, Value>,
    pub location: Option<SourceLocation>,
    pub value_locations: FxHashMap<String, SourceLocation>,
}

impl Attachment {
    pub fn new(owner: DeclId, annotation: TypeId) -> Self {
        Self {
            owner,
            annotation,
            values: IndexMap::new(),
            location: None,
            value_locations: FxHashMap::default(),
        }
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    pub fn type_value(&self, name: &str) -> Option<TypeId> {
        self.value(name).and_then(Value::as_type)
    }

    pub fn type_refs(&self) -> Vec<TypeId> {
        self.values.values().flat_map(Value::type_refs).collect()
    }

    /// Location of a single value, falling back to the whole attachment.
    pub fn value_location(&self, name: &str) -> Option<&SourceLocation> {
        self.value_locations
            .get(name)
            .or(self.location.as_ref())
    }
}
