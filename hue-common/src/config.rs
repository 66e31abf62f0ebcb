//! Configuration loading and root folder resolution

use crate::db::get_setting_or;
use crate::time::millis_to_duration;
use crate::{Error, Result};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "HUE_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "hue.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Ok(config_path) = config_file_path() {
        match root_folder_from_toml(&config_path) {
            Ok(Some(root)) => return root,
            Ok(None) => debug!("No root_folder in {}", config_path.display()),
            Err(e) => debug!("Ignoring config file: {}", e),
        }
    }

    default_root_folder()
}

/// Read `root_folder` from a TOML config file
pub fn root_folder_from_toml(config_path: &Path) -> Result<Option<PathBuf>> {
    let content = std::fs::read_to_string(config_path)?;
    let config: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", config_path.display(), e)))?;

    Ok(config
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from))
}

/// Get default configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("hue").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/hue/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("hue"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/hue"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("hue"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/hue"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("hue"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\hue"))
    } else {
        PathBuf::from("./hue_data")
    }
}

/// Database path inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Service settings read from the settings table
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub http_port: u16,
    /// Vision analysis endpoint; `None` disables image analysis
    pub vision_endpoint: Option<String>,
    pub vision_timeout: Duration,
    pub max_image_bytes: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            http_port: 5740,
            vision_endpoint: None,
            vision_timeout: Duration::from_millis(8000),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServiceSettings {
    /// Load settings, using defaults for anything missing
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let defaults = Self::default();

        let http_port = get_setting_or(pool, "http_port", defaults.http_port).await?;
        let endpoint: String = get_setting_or(pool, "vision_endpoint", String::new()).await?;
        let timeout_ms: u64 = get_setting_or(pool, "vision_timeout_ms", 8000u64).await?;
        let max_image_bytes = get_setting_or(pool, "max_image_bytes", defaults.max_image_bytes).await?;

        if timeout_ms == 0 {
            return Err(Error::Config("vision_timeout_ms must be positive".to_string()));
        }

        Ok(Self {
            http_port,
            vision_endpoint: Some(endpoint.trim().to_string()).filter(|e| !e.is_empty()),
            vision_timeout: millis_to_duration(timeout_ms),
            max_image_bytes,
        })
    }
}
