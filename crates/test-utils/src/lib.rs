//! Preferito test utilities.
//!
//! Helpers for integration testing: plugin directory fixtures written in
//! the on-disk manifest format the kernel discovers.

use std::io;
use std::path::Path;

use serde::Serialize;

/// Create a test plugin with default metadata.
pub fn test_plugin(name: &str) -> TestPlugin {
    TestPlugin {
        name: name.to_string(),
        title: format!("The {name} plugin"),
        description: format!("Test fixture for {name}."),
        version: "1.0.0".to_string(),
        author: "Test Suite".to_string(),
    }
}

/// A plugin fixture builder.
#[derive(Debug, Clone, Serialize)]
pub struct TestPlugin {
    pub name: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub author: String,
}

impl TestPlugin {
    /// Set a custom title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set a custom description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set a custom version.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Write this plugin under `plugins_dir` as `{name}/{name}.info.toml`.
    pub fn write_into(&self, plugins_dir: &Path) -> io::Result<()> {
        let dir = plugins_dir.join(&self.name);
        std::fs::create_dir_all(&dir)?;

        let manifest = toml::to_string(self).map_err(io::Error::other)?;
        std::fs::write(dir.join(format!("{}.info.toml", self.name)), manifest)
    }
}

/// Create a temporary plugins directory populated with default fixtures.
pub fn plugins_fixture(names: &[&str]) -> io::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    for name in names {
        test_plugin(name).write_into(dir.path())?;
    }
    Ok(dir)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn write_into_creates_the_manifest() {
        let dir = tempfile::tempdir().unwrap();
        test_plugin("alpha").write_into(dir.path()).unwrap();

        let manifest = dir.path().join("alpha").join("alpha.info.toml");
        let content = std::fs::read_to_string(manifest).unwrap();
        assert!(content.contains("name = \"alpha\""));
        assert!(content.contains("version = \"1.0.0\""));
    }

    #[test]
    fn plugins_fixture_writes_every_plugin() {
        let dir = plugins_fixture(&["a", "b"]).unwrap();
        assert!(dir.path().join("a/a.info.toml").exists());
        assert!(dir.path().join("b/b.info.toml").exists());
    }
}
