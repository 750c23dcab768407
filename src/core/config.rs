use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::analyzer::{default_gaming_keywords, default_streaming_keywords};
use crate::core::profiles::ActivationPolicy;
use crate::core::telemetry::{clamp_interval, DEFAULT_POLLING_INTERVAL_MS};

const APP_DIR: &str = "pctune";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub polling_interval_ms: u64,
    pub gaming_keywords: Vec<String>,
    pub streaming_keywords: Vec<String>,
    /// Defaults to `<config dir>/pctune/profiles` when unset
    pub profiles_dir: Option<PathBuf>,
    /// Defaults to `<config dir>/pctune/layout.json` when unset
    pub layout_path: Option<PathBuf>,
    pub activation_policy: ActivationPolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polling_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
            gaming_keywords: default_gaming_keywords(),
            streaming_keywords: default_streaming_keywords(),
            profiles_dir: None,
            layout_path: None,
            activation_policy: ActivationPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Missing or empty file yields defaults; so does a corrupt one, with a warning.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring corrupt config file {:?} ({}), using defaults",
                config_path,
                e
            );
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    fn app_dir() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;
        Ok(config_dir.join(APP_DIR))
    }

    pub fn profiles_dir(&self) -> Result<PathBuf> {
        match &self.profiles_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::app_dir()?.join("profiles")),
        }
    }

    pub fn layout_path(&self) -> Result<PathBuf> {
        match &self.layout_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::app_dir()?.join("layout.json")),
        }
    }

    /// Store the interval clamped into the supported range and return it.
    pub fn set_polling_interval(&mut self, milliseconds: u64) -> u64 {
        self.polling_interval_ms = clamp_interval(milliseconds).as_millis() as u64;
        self.polling_interval_ms
    }
}
