//! Startup configuration, optionally read from `piviz.json` next to the
//! binary. Anything missing or malformed falls back to defaults.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 800,
            height: 800,
            target_fps: 30,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed {path}: {e}");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }
}
