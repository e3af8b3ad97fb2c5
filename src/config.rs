use std::path::PathBuf;

use eyre::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::clip::EndsIn;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_ends_in: Option<String>,
    pub autoplay: Option<bool>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.config/ytdeck/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Configured duration default, ignored with a warning when unparsable
    pub fn ends_in_default(&self) -> Option<EndsIn> {
        match self.default_ends_in.as_deref()?.parse::<EndsIn>() {
            Ok(choice) => Some(choice),
            Err(e) => {
                warn!("Ignoring default_ends_in from config: {e}");
                None
            }
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytdeck")
        .join("config.toml")
}
