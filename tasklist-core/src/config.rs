//! User configuration from `<home>/.tasklist/config.yaml`.
//!
//! Every field is optional in the file. Precedence, highest first: explicit
//! overrides (CLI flags) > `GEMINI_API_KEY` > file > defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default model used for subtask generation.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default base URL of the generation API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Values given on the command line; `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl Config {
    /// Apply the environment layer (`GEMINI_API_KEY`) read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Apply CLI overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.api_key.is_some() {
            self.api_key = overrides.api_key;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        self
    }

    /// API key to send; empty when none is configured.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}

/// `<home>/.tasklist/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".tasklist").join("config.yaml")
}

/// Read the config file under `home`. A missing file yields defaults.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(home: &Path, body: &str) {
        let path = config_path_at(home);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let home = TempDir::new().expect("tempdir");
        assert_eq!(load_at(home.path()).expect("load"), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let home = TempDir::new().expect("tempdir");
        write_config(home.path(), "api_key: abc\n");
        let config = load_at(home.path()).expect("load");
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn malformed_file_reports_path() {
        let home = TempDir::new().expect("tempdir");
        write_config(home.path(), "model: [unclosed\n");
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn env_then_flags_take_precedence() {
        let config = Config { api_key: Some("file".into()), ..Config::default() };
        let from_env = config.with_env(|k| (k == API_KEY_ENV).then(|| "env".to_string()));
        assert_eq!(from_env.api_key.as_deref(), Some("env"));

        let flagged = from_env.with_overrides(Overrides {
            api_key: Some("flag".into()),
            model: Some("other-model".into()),
        });
        assert_eq!(flagged.api_key.as_deref(), Some("flag"));
        assert_eq!(flagged.model, "other-model");
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let config = Config::default().with_env(|_| Some(String::new()));
        assert_eq!(config.api_key_or_empty(), "");
    }
}
