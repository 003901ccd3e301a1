//! Runtime settings for the collaborators (history, report).
//! The scoring core itself takes no configuration.
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::database::DEFAULT_HISTORY_LIMIT;
use crate::error::StoreError;

const ENV_PREFIX: &str = "PHISHSENSE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub history_path: PathBuf,
    pub history_limit: usize,
    pub top_features: usize,
    pub record_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            history_path: data_dir().join("history.db"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            top_features: 10,
            record_history: true,
        }
    }
}

/// Per-user data directory, or the working directory when there is none.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("phishsense"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    data_dir().join("phishsense.json")
}

impl Settings {
    /// Defaults, then the JSON file, then `.env`, then the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, StoreError> {
        let dotenv = fs::read_to_string(".env").ok();
        Self::resolve(explicit, dotenv.as_deref(), prefixed_env(std::env::vars_os()))
    }

    fn resolve(
        explicit: Option<&Path>,
        dotenv: Option<&str>,
        env: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, StoreError> {
        // 1. JSON file
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Settings::default()
                }
            }
        };

        // 2. .env (project relative)
        if let Some(content) = dotenv {
            for (key, val) in parse_env(content) {
                settings.apply(&key, &val)?;
            }
        }

        // 3. Environment
        for (key, val) in env {
            settings.apply(&key, &val)?;
        }

        debug!(?settings, "settings resolved");
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Apply one `PHISHSENSE_*` override. Unknown keys are ignored.
    pub fn apply(&mut self, key: &str, val: &str) -> Result<(), StoreError> {
        let invalid = || StoreError::Config {
            key: key.to_string(),
            value: val.to_string(),
        };
        match key {
            "PHISHSENSE_HISTORY_PATH" => self.history_path = PathBuf::from(val),
            "PHISHSENSE_HISTORY_LIMIT" => self.history_limit = val.parse().map_err(|_| invalid())?,
            "PHISHSENSE_TOP_FEATURES" => self.top_features = val.parse().map_err(|_| invalid())?,
            "PHISHSENSE_RECORD_HISTORY" => self.record_history = parse_bool(val).ok_or_else(invalid)?,
            _ => {}
        }
        Ok(())
    }
}

/// `PHISHSENSE_*` pairs from the process environment. Entries that are not
/// valid Unicode are skipped.
fn prefixed_env(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Vec<(String, String)> {
    vars.into_iter()
        .filter_map(|(key, val)| {
            let key = key.into_string().ok()?;
            if !key.starts_with(ENV_PREFIX) {
                return None;
            }
            match val.into_string() {
                Ok(val) => Some((key, val)),
                Err(_) => {
                    warn!(key = %key, "ignoring non-unicode environment value");
                    None
                }
            }
        })
        .collect()
}

fn parse_env(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.splitn(2, '=').collect();
        if parts.len() == 2 {
            let key = parts[0].trim();
            let val = parts[1].trim().trim_matches('"');
            if val.is_empty() || !key.starts_with(ENV_PREFIX) {
                continue;
            }
            pairs.push((key.to_string(), val.to_string()));
        }
    }
    pairs
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
