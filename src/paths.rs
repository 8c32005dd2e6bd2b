//! Common paths for Snapshelf data storage
//!
//! All Snapshelf data is stored under ~/.config/snapshelf/ on all platforms:
//! - config.toml - User configuration
//! - snapshelf.sqlite - Favorites and recent searches
//! - downloads/ - Images saved for sharing

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Snapshelf data directory (~/.config/snapshelf/)
pub fn snapshelf_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("snapshelf");
    fs::create_dir_all(&dir).context("Failed to create snapshelf directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/snapshelf/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(snapshelf_dir()?.join("config.toml"))
}

/// Get the database file path (~/.config/snapshelf/snapshelf.sqlite)
pub fn database_path() -> Result<PathBuf> {
    Ok(snapshelf_dir()?.join("snapshelf.sqlite"))
}

/// Get the default download directory (~/.config/snapshelf/downloads)
pub fn downloads_dir() -> Result<PathBuf> {
    Ok(snapshelf_dir()?.join("downloads"))
}
