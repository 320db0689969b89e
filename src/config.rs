/// Configuration module for Metaview.
///
/// Persists the little state worth keeping between runs (currently the
/// last browsed directory) as a `config.json` in the platform-specific
/// application data directory (~/.local/share on Linux, %APPDATA% on
/// Windows, ~/Library/Application Support on macOS).
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// State restored on the next launch
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AppConfig {
    /// Directory the browser was showing when last saved
    pub last_directory: Option<PathBuf>,
}

/// Metaview's data directory, created on first use.
pub fn get_data_directory() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "Metaview")
        .ok_or_else(|| anyhow!("Failed to determine user data directory"))?;

    let data_dir = project_dirs.data_dir();

    fs::create_dir_all(data_dir)
        .map_err(|e| anyhow!("Failed to create data directory: {}", e))?;

    Ok(data_dir.to_path_buf())
}

/// Read config.json. Lenient on purpose: a missing or corrupt file just
/// means starting from defaults, never an error dialog at launch.
pub fn load_config() -> AppConfig {
    let Ok(data_dir) = get_data_directory() else {
        return AppConfig::default();
    };

    let config_path = data_dir.join("config.json");

    if !config_path.exists() {
        return AppConfig::default();
    }

    let Ok(contents) = fs::read_to_string(&config_path) else {
        return AppConfig::default();
    };

    serde_json::from_str(&contents).unwrap_or_default()
}

/// Write config.json. Callers treat failure as a warning, not fatal.
pub fn save_config(config: &AppConfig) -> Result<()> {
    let data_dir = get_data_directory()?;
    let config_path = data_dir.join("config.json");

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

    fs::write(&config_path, json)
        .map_err(|e| anyhow!("Failed to write config.json: {}", e))?;

    Ok(())
}
