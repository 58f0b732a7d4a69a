//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] by reading a JSON document whose path is named
//! by the `RCC_CONFIG` environment variable.  Any field left out of the
//! document keeps its default.

use std::path::PathBuf;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ControllerConfig;

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "RCC_CONFIG";

pub struct JsonFileConfig {
    path: Option<PathBuf>,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Take the path from `RCC_CONFIG`; unset means no file.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        }
    }

    /// Load, falling back to defaults only when no file is configured or the
    /// file does not exist.  A file that exists but is broken is an error.
    pub fn load_or_default(&self) -> Result<ControllerConfig, ConfigError> {
        match self.load() {
            Err(ConfigError::NotFound) => {
                info!("Config: no file, using defaults");
                Ok(ControllerConfig::default())
            }
            other => other,
        }
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::NotFound)?;
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let cfg = ControllerConfig::from_json(&text)?;
        info!("Config: loaded {}", path.display());
        Ok(cfg)
    }
}
