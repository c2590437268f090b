//! Parser for plugin `.info.toml` manifest files.
//!
//! Each plugin directory carries a `{name}.info.toml` file declaring its
//! metadata: machine name, human title, description, version, author.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Plugin metadata parsed from `.info.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginInfo {
    /// Plugin machine name (must match directory and file names).
    pub name: String,

    /// Human-readable title.
    pub title: String,

    /// Human-readable description.
    pub description: String,

    /// Semantic version (e.g., "1.0.0").
    pub version: String,

    /// Author, if declared.
    #[serde(default)]
    pub author: String,
}

impl PluginInfo {
    /// Parse a plugin info file from the given path.
    pub fn parse(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plugin info file: {}", path.display()))?;

        Self::parse_str(&content, path)
    }

    /// Parse plugin info from a TOML string.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let info: PluginInfo = toml::from_str(content)
            .with_context(|| format!("failed to parse plugin info TOML at {}", path.display()))?;

        info.validate(path)?;
        Ok(info)
    }

    /// Validate the parsed plugin info.
    fn validate(&self, path: &Path) -> Result<()> {
        if self.name.is_empty() {
            anyhow::bail!("plugin info at {} has empty 'name' field", path.display());
        }

        // Machine names appear in URLs, form values, and filenames.
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!(
                "plugin '{}' at {} has invalid characters in 'name' \
                 (allowed: alphanumeric, '_', '-')",
                self.name,
                path.display()
            );
        }

        if self.version.is_empty() {
            anyhow::bail!(
                "plugin '{}' at {} has empty 'version' field",
                self.name,
                path.display()
            );
        }

        Ok(())
    }
}
