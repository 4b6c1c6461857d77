//! JSON configuration file support for platter.
//!
//! One file configures every layer: substitution defaults for the normalizer,
//! the remote service client, where drafts live on disk, and whether the
//! built-in sample recipes ride along. Every field has a default, so `{}` is
//! a valid config and so is no file at all.
//!
//! ## Example JSON configuration
//!
//! ```json
//! {
//!   "normalize": {
//!     "placeholder_name": "Untitled",
//!     "fallback_cuisine": "Other"
//!   },
//!   "http": {
//!     "base_url": "http://localhost:8080",
//!     "request_timeout_ms": 10000
//!   },
//!   "drafts_path": "platter-drafts.json",
//!   "include_samples": true
//! }
//! ```
//!
//! Deployment-specific values can also come from the environment
//! (`PLATTER_BASE_URL`, `PLATTER_DRAFTS_PATH`, `PLATTER_INCLUDE_SAMPLES`) via
//! [`PlatterConfig::apply_env`], which the demo binary calls after loading
//! `.env`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use normalize::NormalizeConfig;
use store::HttpConfig;

/// Errors that can occur when loading configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level configuration for the whole aggregation stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlatterConfig {
    /// Normalizer substitution defaults.
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Remote CRUD service client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Draft file location, the stand-in for browser local storage.
    #[serde(default = "default_drafts_path")]
    pub drafts_path: PathBuf,

    /// Whether the built-in sample recipes join the local list on every load.
    #[serde(default = "true_value")]
    pub include_samples: bool,
}

impl PlatterConfig {
    /// Load a JSON configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse JSON configuration from a string
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: PlatterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.normalize
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("normalize: {err}")))?;
        self.http
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("http: {err}")))?;
        if self.drafts_path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "drafts_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlay environment variables onto the loaded config. Unset or
    /// unparseable variables leave the current value in place.
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var("PLATTER_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.http.base_url = base_url;
            }
        }
        if let Ok(path) = std::env::var("PLATTER_DRAFTS_PATH") {
            if !path.trim().is_empty() {
                self.drafts_path = PathBuf::from(path);
            }
        }
        if let Ok(flag) = std::env::var("PLATTER_INCLUDE_SAMPLES") {
            if let Ok(value) = flag.parse::<bool>() {
                self.include_samples = value;
            }
        }
    }
}

impl Default for PlatterConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            http: HttpConfig::default(),
            drafts_path: default_drafts_path(),
            include_samples: true,
        }
    }
}

// Helper functions for serde defaults
fn default_drafts_path() -> PathBuf {
    PathBuf::from("platter-drafts.json")
}
fn true_value() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_json() {
        let json = r#"
{
  "normalize": { "fallback_cuisine": "Fusion" },
  "http": { "base_url": "http://recipes.internal:9090" },
  "include_samples": false
}
"#;

        let config = PlatterConfig::from_json(json).unwrap();
        assert_eq!(config.normalize.fallback_cuisine, "Fusion");
        assert_eq!(config.normalize.placeholder_name, "Untitled");
        assert_eq!(config.http.base_url, "http://recipes.internal:9090");
        assert!(!config.include_samples);
    }

    #[test]
    fn test_load_from_file() {
        let json = r#"{ "drafts_path": "/tmp/drafts.json" }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json.as_bytes()).unwrap();

        let config = PlatterConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.drafts_path, PathBuf::from("/tmp/drafts.json"));
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let config = PlatterConfig::from_json("{}").unwrap();
        assert_eq!(config.http, HttpConfig::default());
        assert!(config.include_samples);
    }

    #[test]
    fn test_blank_fallback_rejected() {
        let json = r#"{ "normalize": { "fallback_cuisine": "  " } }"#;

        let result = PlatterConfig::from_json(json);
        assert!(
            matches!(result, Err(ConfigLoadError::Validation(msg)) if msg.contains("normalize"))
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let json = r#"{ "http": { "request_timeout_ms": 0 } }"#;

        let result = PlatterConfig::from_json(json);
        assert!(matches!(result, Err(ConfigLoadError::Validation(msg)) if msg.contains("http")));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = PlatterConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigLoadError::JsonParse(_))));
    }
}
