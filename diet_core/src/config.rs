//! Configuration file support for the diet tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/diet/config.toml`.

use crate::summary::DEFAULT_GOAL_KCAL;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_file: default_state_file(),
        }
    }
}

/// Daily summary configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Goal used when no goal has been set yet
    #[serde(default = "default_goal_kcal")]
    pub default_goal_kcal: i64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_goal_kcal: default_goal_kcal(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("diet")
}

fn default_state_file() -> String {
    "diet_data.json".into()
}

fn default_goal_kcal() -> i64 {
    DEFAULT_GOAL_KCAL
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("diet")
            .join("config.toml")
    }

    /// Path of the state document inside `data_dir`
    pub fn state_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.state_file)
    }

    fn validate(&self) -> Result<()> {
        let file = self.data.state_file.trim();
        if file.is_empty() || file.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "state_file must be a plain file name, got {:?}",
                self.data.state_file
            )));
        }
        Ok(())
    }
}
