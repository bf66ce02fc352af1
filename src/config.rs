//! Application settings, loadable from a TOML file.
//!
//! Settings live at `<config dir>/padscroll/config.toml`; a missing file
//! falls back to the documented defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::gesture::{EngineSettings, RecognizerSettings};
use crate::input::GamepadSettings;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct AppSettings {
    pub engine: EngineSettings,
    pub recognizer: RecognizerSettings,
    pub gamepad: GamepadSettings,

    /// Number of items in the demo list view.
    pub demo_item_count: usize,

    /// Rows per page in the demo list view.
    pub demo_page_size: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            recognizer: RecognizerSettings::default(),
            gamepad: GamepadSettings::default(),
            demo_item_count: 100,
            demo_page_size: 10,
        }
    }
}

impl AppSettings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padscroll").join("config.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_path() else {
            info!("No config directory available, using default settings");
            return Ok(Self::default());
        };

        if !path.exists() {
            info!("No config file at {:?}, using default settings", path);
            return Ok(Self::default());
        }

        debug!("Loading settings from {:?}", path);
        let contents = fs::read_to_string(&path)?;
        let settings = toml::from_str(&contents)?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }
}
