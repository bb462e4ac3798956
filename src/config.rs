//! Game configuration loaded from YAML

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::landscape::DEFAULT_ASPHALT_FREQUENCY;
use crate::systems::{PAVED_SPEED, UNPAVED_SPEED};

fn default_seed() -> u64 {
    7
}

fn default_tile_size() -> u32 {
    32
}

fn default_view_size() -> u32 {
    640
}

fn default_asphalt_frequency() -> f64 {
    DEFAULT_ASPHALT_FREQUENCY
}

fn default_paved_speed() -> f64 {
    PAVED_SPEED
}

fn default_unpaved_speed() -> f64 {
    UNPAVED_SPEED
}

fn default_framerate() -> u32 {
    50
}

fn default_output_dir() -> String {
    "saves".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,
    #[serde(default = "default_view_size")]
    pub view_width: u32,
    #[serde(default = "default_view_size")]
    pub view_height: u32,
    #[serde(default = "default_asphalt_frequency")]
    pub asphalt_frequency: f64,
    /// Tiles per tick when starting on a paved tile.
    #[serde(default = "default_paved_speed")]
    pub paved_speed: f64,
    #[serde(default = "default_unpaved_speed")]
    pub unpaved_speed: f64,
    /// Nominal frames per second; also the status log period in frames.
    #[serde(default = "default_framerate")]
    pub framerate: u32,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Autosave period in frames; 0 disables autosaves.
    #[serde(default)]
    pub interval_frames: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            interval_frames: 0,
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            tile_width: default_tile_size(),
            tile_height: default_tile_size(),
            view_width: default_view_size(),
            view_height: default_view_size(),
            asphalt_frequency: default_asphalt_frequency(),
            paved_speed: default_paved_speed(),
            unpaved_speed: default_unpaved_speed(),
            framerate: default_framerate(),
            snapshot: SnapshotConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("asphalt_frequency must be within [0, 1], got {0}")]
    FrequencyOutOfRange(f64),
}

impl GameConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: GameConfig = serde_yaml::from_str(text).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("framerate", self.framerate),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigError::NotPositive { field });
            }
        }
        // Written so NaN fails too.
        if !(self.paved_speed > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "paved_speed",
            });
        }
        if !(self.unpaved_speed > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "unpaved_speed",
            });
        }
        if !(0.0..=1.0).contains(&self.asphalt_frequency) {
            return Err(ConfigError::FrequencyOutOfRange(self.asphalt_frequency));
        }
        Ok(())
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<GameConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        GameConfig::from_yaml(&data).with_context(|| format!("Failed to load {}", path.display()))
    }
}
