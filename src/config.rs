//! Startup configuration read from `config.json`.
//!
//! Every field has a default, so a partial (or absent) file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::window::WindowConfig;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize one JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// 0.0 mutes music entirely.
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { music_volume: 0.5, sfx_volume: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    /// Directory scanned for images and sounds.
    pub asset_root: PathBuf,
    pub level_path: PathBuf,
    pub language_path: PathBuf,
    pub keybinds_path: PathBuf,
    pub font_path: PathBuf,
    pub audio: AudioSettings,
    pub initial_zoom: f32,
    /// Game ticks per second.
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            asset_root: PathBuf::from("assets"),
            level_path: PathBuf::from("level/level0.lvl"),
            language_path: PathBuf::from("lang/ru_ru.json"),
            keybinds_path: PathBuf::from("keybinds.json"),
            font_path: PathBuf::from("assets/fonts/default.json"),
            audio: AudioSettings::default(),
            initial_zoom: 4.0,
            tick_rate: 60,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    /// The file's settings, or the defaults when it is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => {
                log::info!("loaded configuration from {}", path.as_ref().display());
                config
            }
            Err(ConfigError::Io { .. }) => {
                log::info!("no {} found, using defaults", path.as_ref().display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }
}
