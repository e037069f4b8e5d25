//! Optional configuration file for the CLI.
//!
//! Configurations are loaded from YAML files using [`load_config`]. Every
//! field is optional; command-line flags take precedence over the file, and
//! the file over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::Acceleration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// User configuration for model storage and defaults.
pub struct Config {
    /// Directory holding model artifacts. Defaults to `~/.cache/tts-arabic`.
    pub storage_root: Option<PathBuf>,
    /// Default vocoder identifier.
    pub vocoder: Option<String>,
    /// Default acceleration preference.
    pub acceleration: Option<Acceleration>,
}

/// Load a configuration from a YAML file.
///
/// # Errors
///
/// Returns an error if the file doesn't exist or contains invalid YAML.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    let data = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&data)?;
    Ok(config)
}

/// Resolve a possibly relative path against a config file location.
pub fn resolve_relative_path(config_path: &Path, maybe_relative: &Path) -> PathBuf {
    if maybe_relative.is_absolute() {
        return maybe_relative.to_path_buf();
    }
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(maybe_relative)
}

/// Create the default storage directory if it doesn't exist.
///
/// Returns the path to `~/.cache/tts-arabic/`.
pub fn default_storage_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    let storage_dir = Path::new(&home).join(".cache").join("tts-arabic");
    fs::create_dir_all(&storage_dir)?;
    Ok(storage_dir)
}
