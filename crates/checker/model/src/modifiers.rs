//! Declaration modifiers.
//!
//! The bits of [`ModifierSet`] are the JVM access flags, so the set doubles as
//! the access mask a class file would carry for the declaration.

use std::fmt;

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierSet: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICTFP = 0x0800;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    /// Source order, as a declaration would spell them.
    pub const ALL: [Self; 11] = [
        Self::Public,
        Self::Protected,
        Self::Private,
        Self::Abstract,
        Self::Static,
        Self::Final,
        Self::Transient,
        Self::Volatile,
        Self::Synchronized,
        Self::Native,
        Self::Strictfp,
    ];

    pub const fn access_flag(self) -> u16 {
        match self {
            Self::Public => 0x0001,
            Self::Private => 0x0002,
            Self::Protected => 0x0004,
            Self::Static => 0x0008,
            Self::Final => 0x0010,
            Self::Synchronized => 0x0020,
            Self::Volatile => 0x0040,
            Self::Transient => 0x0080,
            Self::Native => 0x0100,
            Self::Abstract => 0x0400,
            Self::Strictfp => 0x0800,
        }
    }

    pub const fn flag(self) -> ModifierSet {
        ModifierSet::from_bits_retain(self.access_flag())
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ModifierSet {
    pub const fn has(self, modifier: Modifier) -> bool {
        self.contains(modifier.flag())
    }

    pub const fn access_mask(self) -> u16 {
        self.bits()
    }

    pub fn modifiers(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.has(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, modifier| set | modifier.flag())
    }
}

impl From<Modifier> for ModifierSet {
    fn from(modifier: Modifier) -> Self {
        modifier.flag()
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for modifier in self.modifiers() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}
