use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::gallery::DEFAULT_CONTAINER;

/// Gallery rendering defaults (optional `[gallery]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// CSS selector the gallery widget mounts into.
    pub container: String,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
        }
    }
}

/// Bulk legacy-locator migration parameters (optional `[migration]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Worker threads used by `migrate_batch`; values below 1 are treated as 1.
    pub workers: usize,
    /// Version string stamped on every migrated record.
    pub plugin_version: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            plugin_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/mediakit/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediakitConfig {
    #[serde(default)]
    pub gallery: GallerySettings,
    #[serde(default)]
    pub migration: MigrationConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mediakit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MediakitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MediakitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<MediakitConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: MediakitConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
