use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ats_core::NotificationTimings;
use ats_engine::ClientSettings;
use ats_logging::ats_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "ats_client.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enter_delay_ms: u64,
    pub display_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        let timings = NotificationTimings::default();
        Self {
            enter_delay_ms: timings.enter_delay.as_millis() as u64,
            display_ms: timings.display.as_millis() as u64,
            exit_ms: timings.exit.as_millis() as u64,
        }
    }
}

/// Settings read from the optional RON file. Command-line flags override these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub analyze_path: String,
    pub output_dir: PathBuf,
    pub notifications: NotificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_url: client.base_url,
            analyze_path: client.analyze_path,
            output_dir: PathBuf::from("."),
            notifications: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        ats_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            analyze_path: self.analyze_path.clone(),
        }
    }

    pub fn notification_timings(&self) -> NotificationTimings {
        NotificationTimings {
            enter_delay: Duration::from_millis(self.notifications.enter_delay_ms),
            display: Duration::from_millis(self.notifications.display_ms),
            exit: Duration::from_millis(self.notifications.exit_ms),
        }
    }
}
