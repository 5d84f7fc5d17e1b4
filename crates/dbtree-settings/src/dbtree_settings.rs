//! dbtree Settings
//!
//! Persisted user preferences for the connection tree:
//! - Tree settings (system schema visibility)
//! - Action settings (status message lifetime)
//!
//! Settings live in `<config_dir>/dbtree/settings.json`. Missing files and
//! missing keys fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod settings_file;

pub use settings_file::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DbTreeSettings {
    pub tree: TreeSettings,
    pub actions: ActionSettings,
}

impl DbTreeSettings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    /// Write the settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    /// Load settings from an explicit file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    pub fn settings_path() -> Result<PathBuf> {
        config_dir().map(|p| p.join("settings.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    /// Hide `mysql` and the InnoDB cluster / REST service metadata schemas
    pub hide_system_schemas: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            hide_system_schemas: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    pub message_timeout_ms: u64,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            message_timeout_ms: 5000,
        }
    }
}

impl ActionSettings {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }
}
