//! Path utilities for wavefx configuration files

use std::path::PathBuf;

/// Name of the config file inside the config directory
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the default config directory
///
/// Returns: `<platform config dir>/wavefx`, or `./wavefx` when the platform
/// has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wavefx")
}

/// Get the default config file path
///
/// Returns: `<platform config dir>/wavefx/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILENAME)
}
