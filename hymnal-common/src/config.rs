//! Configuration loading and root folder resolution
//!
//! The root folder holds the database file and anything else the service
//! persists. Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `HYMNAL_ROOT` environment variable
//! 3. TOML config file (`root_folder` key)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the root folder
pub const ROOT_ENV_VAR: &str = "HYMNAL_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "hymnal.db";

/// Resolve the root folder from CLI argument, environment, config file, or
/// platform default, in that order.
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    if !root.exists() {
        std::fs::create_dir_all(root)?;
        info!("Created root folder: {}", root.display());
    }
    Ok(())
}

/// Path of the database file inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Locate the platform config file, if present
fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir()
        .map(|d| d.join("hymnal").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if user_config.exists() {
        return Ok(user_config);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/hymnal/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hymnal"))
        .unwrap_or_else(|| PathBuf::from("./hymnal_data"))
}
