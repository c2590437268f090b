//! Plugin inventory discovery.
//!
//! The inventory is re-read from disk on every admin page render so the
//! screen reflects plugins added or removed since the last request. A few
//! hundred directory reads per page load is nothing at admin traffic.

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::PluginInfo;

/// One installed plugin as shown in the admin tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRecord {
    /// Unique identifier (the plugin's machine name).
    pub name: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub author: String,
}

impl From<PluginInfo> for PluginRecord {
    fn from(info: PluginInfo) -> Self {
        Self {
            name: info.name,
            title: info.title,
            description: info.description,
            version: info.version,
            author: info.author,
        }
    }
}

/// Discover installed plugins under `plugins_dir`, in name order.
///
/// Each plugin is a directory containing `{dirname}.info.toml`. Directories
/// without a manifest are ignored; manifests that fail to parse are skipped
/// with a warning. A missing plugins directory yields an empty inventory.
pub fn discover(plugins_dir: &Path) -> Vec<PluginRecord> {
    let Ok(entries) = std::fs::read_dir(plugins_dir) else {
        return Vec::new();
    };

    let mut records: Vec<PluginRecord> = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy().to_string();
        let info_path = path.join(format!("{dir_name}.info.toml"));
        if !info_path.exists() {
            continue;
        }

        match PluginInfo::parse(&info_path) {
            Ok(info) => records.push(info.into()),
            Err(e) => {
                warn!(plugin = %dir_name, error = %e, "skipping plugin with invalid manifest");
            }
        }
    }

    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}
