//! Panel configuration: display region ids and the fixed user-facing labels.
//!
//! Stored as `propbox.json` in the config dir (see [`crate::paths`]). Every
//! field is optional on disk; missing fields fall back to the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::paths::{self, PathConfig};

/// Config file name inside the config dir.
pub const CONFIG_FILE: &str = "propbox.json";

/// Fixed-language strings shown by the panel.
///
/// Kept in one table so a translation only has to replace this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    /// Title prefix, followed by the object id
    pub properties_of: String,
    pub nothing_selected: String,
    pub apply: String,
    pub add_row: String,
    pub delete_row: String,
    pub add_column: String,
    pub delete_column: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            properties_of: "Properties of".to_string(),
            nothing_selected: "Nothing selected".to_string(),
            apply: "Apply new properties".to_string(),
            add_row: "Add row".to_string(),
            delete_row: "Delete row".to_string(),
            add_column: "Add column".to_string(),
            delete_column: "Delete column".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    /// Region receiving the panel title
    pub title_region: String,
    /// Region receiving the property table and buttons
    pub body_region: String,
    pub labels: Labels,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title_region: "elementPropertiesTitle".to_string(),
            body_region: "elementProperties".to_string(),
            labels: Labels::default(),
        }
    }
}

impl PanelConfig {
    /// Read config from a JSON file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No panel config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read panel config: {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse panel config: {}", path.display()))?;
        log::info!("Loaded panel config from {}", path.display());
        Ok(config)
    }

    /// Resolve `propbox.json` through the path priority chain and load it.
    pub fn load(paths: &PathConfig) -> Result<Self> {
        Self::from_file(&paths::config_file(CONFIG_FILE, paths))
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write panel config: {}", path.display()))
    }
}
