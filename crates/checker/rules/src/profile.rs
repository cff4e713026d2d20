//! Framework package roots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where the framework's classes live. Every tag annotation and designated
/// type name is derived from the package root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameworkProfile {
    package: String,
}

impl FrameworkProfile {
    pub const FORGE_17_PACKAGE: &'static str = "cpw.mods";
    pub const FORGE_18_PACKAGE: &'static str = "net.minecraftforge";

    pub fn forge_17() -> Self {
        Self::with_package(Self::FORGE_17_PACKAGE)
    }

    pub fn forge_18() -> Self {
        Self::with_package(Self::FORGE_18_PACKAGE)
    }

    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// `<package>.fml.common.<path>`
    pub fn common(&self, path: &str) -> String {
        format!("{}.fml.common.{path}", self.package)
    }

    /// `<package>.fml.<path>`
    pub fn fml(&self, path: &str) -> String {
        format!("{}.fml.{path}", self.package)
    }

    pub fn fml_event(&self) -> String {
        self.common("event.FMLEvent")
    }

    pub fn event(&self) -> String {
        self.common("eventhandler.Event")
    }

    pub fn mod_metadata(&self) -> String {
        self.common("ModMetadata")
    }

    pub fn side(&self) -> String {
        self.fml("relauncher.Side")
    }
}

impl Default for FrameworkProfile {
    fn default() -> Self {
        ProfileName::default().profile()
    }
}

/// A named, released framework line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileName {
    #[serde(rename = "forge-1.7")]
    Forge17,
    #[default]
    #[serde(rename = "forge-1.8")]
    Forge18,
}

impl ProfileName {
    pub const ALL: [Self; 2] = [Self::Forge17, Self::Forge18];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forge17 => "forge-1.7",
            Self::Forge18 => "forge-1.8",
        }
    }

    pub fn profile(self) -> FrameworkProfile {
        match self {
            Self::Forge17 => FrameworkProfile::forge_17(),
            Self::Forge18 => FrameworkProfile::forge_18(),
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown framework profile `{0}` (expected forge-1.7 or forge-1.8)")]
pub struct UnknownProfile(pub String);

impl FromStr for ProfileName {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownProfile(s.to_string()))
    }
}

impl From<ProfileName> for FrameworkProfile {
    fn from(name: ProfileName) -> Self {
        name.profile()
    }
}
