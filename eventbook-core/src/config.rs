//! Event book configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{EventbookError, EventbookResult};
use crate::slot::{EVENTS_SLOT, FileSlot};

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("eventbook"))
        .unwrap_or_else(|| PathBuf::from("~/.eventbook"))
        .join(format!("{EVENTS_SLOT}.json"))
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

/// Configuration at ~/.config/eventbook/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EventbookConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for EventbookConfig {
    fn default() -> Self {
        EventbookConfig {
            data_file: default_data_file(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl EventbookConfig {
    pub fn config_path() -> EventbookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventbookError::Config("Could not determine config directory".into()))?
            .join("eventbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// no config file exists yet.
    pub fn load() -> EventbookResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> EventbookResult<Self> {
        let config: EventbookConfig = ::config::Config::builder()
            .add_source(::config::File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| EventbookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventbookError::Config(e.to_string()))?;

        if config.refresh_interval_secs == 0 {
            return Err(EventbookError::Config(
                "refresh_interval_secs must be at least 1".into(),
            ));
        }

        Ok(config)
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned())
    }

    pub fn slot(&self) -> FileSlot {
        FileSlot::new(self.data_path())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventbookResult<()> {
        let data_file = toml::Value::String(default_data_file().display().to_string());
        let contents = format!(
            "\
# eventbook configuration

# Where events are stored:
# data_file = {}

# How often (seconds) to re-check which events are in the past:
# refresh_interval_secs = {}
",
            data_file, DEFAULT_REFRESH_INTERVAL_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventbookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventbookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
