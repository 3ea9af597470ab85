//! Startup preferences loaded from `config.toml`.
//!
//! Only initial UI preferences live here. Timer durations are fixed and
//! nothing the app does at runtime is written back.

use crate::error::{PomodoError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pomodo";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_name: String,
    pub dark_mode: bool,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Mirror toasts as desktop notifications
    pub desktop: bool,
    /// Seconds before a toast is dismissed
    pub toast_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_name: String::new(),
            dark_mode: true,
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            desktop: false,
            toast_seconds: 3,
        }
    }
}

impl Config {
    /// `<config_dir>/pomodo/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the config from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file just yields the
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| PomodoError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
