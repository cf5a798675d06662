//! Configuration file loading.
//!
//! This module handles loading locator-guard configuration from TOML files
//! at XDG-compliant locations.

use crate::config::types::GuardConfig;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Default configuration file name for project-local config.
const LOCAL_CONFIG_NAME: &str = "locator-guard.toml";

/// Default configuration file name within XDG config directory.
const XDG_CONFIG_NAME: &str = "config.toml";

/// Application name for XDG directory lookup.
const APP_NAME: &str = "locator-guard";

/// Loads configuration from the default search paths.
///
/// Search order:
/// 1. `./locator-guard.toml` (project-local)
/// 2. `~/.config/locator-guard/config.toml` (XDG config)
///
/// Returns an empty configuration if no config file is found.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed.
pub fn load() -> Result<GuardConfig, ConfigError> {
    for path in search_paths() {
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            return from_path(&path);
        }
    }

    Ok(GuardConfig::default())
}

/// Loads configuration from a specific file path.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid TOML
/// - The TOML doesn't match the expected schema
pub fn from_path(path: &Path) -> Result<GuardConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::invalid_config_file(path.display().to_string(), format!("failed to read: {e}"))
    })?;

    from_str(&contents).map_err(|e| match e.kind {
        crate::error::ConfigErrorKind::InvalidConfigFile { reason, .. } => {
            ConfigError::invalid_config_file(path.display().to_string(), reason)
        }
        _ => e,
    })
}

/// Parses configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or doesn't match the schema.
pub fn from_str(toml_str: &str) -> Result<GuardConfig, ConfigError> {
    toml::from_str(toml_str)
        .map_err(|e| ConfigError::invalid_config_file("<string>", format!("invalid TOML: {e}")))
}

/// Returns the paths that would be searched for configuration files.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];

    if let Some(dir) = xdg_config_dir() {
        paths.push(dir.join(XDG_CONFIG_NAME));
    }

    paths
}

/// Returns the path to the XDG config directory for locator-guard.
///
/// This is `~/.config/locator-guard` on most systems.
#[must_use]
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}
