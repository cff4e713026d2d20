//! Identifiers and closed vocabularies shared by every model implementation.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

index_vec::define_index_type! {
    /// A declaration node: a type, method, constructor or field.
    pub struct DeclId = u32;
}

index_vec::define_index_type! {
    /// An opaque handle to a declared or primitive type.
    pub struct TypeId = u32;
}

index_vec::define_index_type! {
    /// A metadata attachment. Belongs to exactly one declaration.
    pub struct AttachmentId = u32;
}

/// The kind of a declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    Method,
    Constructor,
    Field,
}

impl DeclKind {
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::AnnotationType
        )
    }

    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }

    /// Capitalized label used as the first word of diagnostic messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Enum => "Enum",
            Self::AnnotationType => "Annotation type",
            Self::Method => "Method",
            Self::Constructor => "Constructor",
            Self::Field => "Field",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::AnnotationType => "annotation type",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Field => "field",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Qualified name of the reference type this primitive boxes to.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Char => "java.lang.Character",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    /// Widening primitive conversion, reflexive.
    pub const fn widens_to(self, target: Self) -> bool {
        use Primitive::*;
        matches!(
            (self, target),
            (Boolean, Boolean)
                | (Byte, Byte | Short | Int | Long | Float | Double)
                | (Short, Short | Int | Long | Float | Double)
                | (Char, Char | Int | Long | Float | Double)
                | (Int, Int | Long | Float | Double)
                | (Long, Long | Float | Double)
                | (Float, Float | Double)
                | (Double, Double)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Void,
    Primitive(Primitive),
    /// Classes, interfaces, enums and annotation types.
    Declared,
}

/// Where a declaration, attachment or attachment value was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub start: usize,
    pub end: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            file: file.into(),
            start: span.start,
            end: span.end,
        }
    }

    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}
