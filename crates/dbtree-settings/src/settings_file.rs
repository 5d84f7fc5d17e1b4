//! Settings file utilities

use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("dbtree"))
}

fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .context("Could not determine data directory")
        .map(|p| p.join("dbtree"))
}

/// Directory for the rolling log files
pub fn logs_dir() -> Result<PathBuf> {
    data_dir().map(|p| p.join("logs"))
}
