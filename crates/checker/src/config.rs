use std::path::Path;

use forgecheck_rules::{FrameworkProfile, ProfileName};
use serde::{Deserialize, Serialize};

/// Checker configuration, read from `forgecheck.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub framework: FrameworkConfig,
    pub report: ReportConfig,
}

/// Which framework release the checked program is built against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameworkConfig {
    pub profile: ProfileName,
    /// Package root replacing the profile's own, for repackaged frameworks
    pub package: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Fail on warnings as well as errors
    pub deny_warnings: bool,
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            deny_warnings: false,
            color: true,
        }
    }
}

impl CheckerConfig {
    pub const FILE_NAME: &'static str = "forgecheck.toml";

    /// Load configuration from a file path
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_file_content(&content)
    }

    pub fn from_file_content(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            tracing::error!("Failed to parse TOML: {}", e);
            e
        })?;
        Ok(config)
    }

    /// Loads `forgecheck.toml` from `dir`, falling back to the defaults when
    /// the directory has none.
    pub fn discover(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(Self::FILE_NAME);
        if !path.is_file() {
            tracing::debug!(dir = %dir.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_path(&path)
    }

    /// The framework profile, with the package override applied.
    pub fn profile(&self) -> FrameworkProfile {
        match &self.framework.package {
            Some(package) => FrameworkProfile::with_package(package.clone()),
            None => self.framework.profile.profile(),
        }
    }
}
