//  ____       _      ____
// |  _ \ __ _(_)_ __|  _ \ __ _ ___ ___
// | |_) / _` | | '__| |_) / _` / __/ __|
// |  __/ (_| | | |  |  __/ (_| \__ \__ \
// |_|   \__,_|_|_|  |_|   \__,_|___/___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-12
// Version : 0.1.0
// License : Mulan PSL v2
//
// Config Tools

use std::{fs, io, path::{Path, PathBuf}};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PassError;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "PAIRPASS_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "OPENAI_API_KEY";
pub const ENV_API_URL: &str = "PAIRPASS_API_URL";
pub const ENV_MODEL: &str = "PAIRPASS_MODEL";

/// Settings for the remote moderation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ModerationSettings {
    /// Defaults, then the config file, then the environment.
    pub fn load() -> Result<Self, PassError> {
        let mut settings = match get_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, PassError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(PassError::config(format!(
                    "Failed to read config file {}: {}", path.display(), e
                )))
            }
        };
        let settings = serde_json::from_str(&content).map_err(|e| {
            PassError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(settings)
    }

    /// Overlays environment variables. `lookup` is injectable for tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(ENV_API_KEY).or_else(|| non_empty(ENV_API_KEY_FALLBACK)) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.endpoint = url;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.model = model;
        }
    }

    /// Command line flags win over everything else.
    pub fn apply_overrides(&mut self, endpoint: Option<String>, model: Option<String>) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(model) = model {
            self.model = model;
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("pairpass"))
}

pub fn get_config_file() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.json"))
}
