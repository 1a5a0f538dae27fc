use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::provider_client::DEFAULT_PROVIDER_URL;

const APP_DIR: &str = "bitlens";
const CONFIG_FILE: &str = "config.json";

pub const PROVIDER_URL_ENV: &str = "BITLENS_PROVIDER_URL";
pub const TOKEN_ENV: &str = "BITLENS_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider_url: String,
    /// Bearer token. Read from a hand-written file but never written back.
    #[serde(skip_serializing)]
    pub credential: Option<String>,
    pub default_network: String,
    pub default_limit: u32,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            credential: None,
            default_network: bitlens_model::DEFAULT_NETWORK.to_string(),
            default_limit: bitlens_model::DEFAULT_BALANCE_LIMIT.get(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Defaults, then the user config file, then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .map(|path| Self::load_from_path(&path))
            .unwrap_or_default();

        if let Ok(provider_url) = std::env::var(PROVIDER_URL_ENV) {
            config.provider_url = provider_url;
        }
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            config.credential = Some(token);
        }

        config
    }

    /// Read `path`, falling back to defaults if it is missing or unreadable.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<Config>(&content)
                    .map_err(|e| e.to_string())
            }) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "[Config] Ignoring unreadable config at {}: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(path) = Self::config_path() {
            self.save_to_path(&path)?;
        }
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
