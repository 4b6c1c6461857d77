//! Settings for the remote service client.
//!
//! Lives outside the `http` feature gate so embedding configs can carry an
//! `[http]` section even in builds that never link reqwest.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by [`HttpConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{0} must not be blank")]
    BlankField(&'static str),

    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

/// Where the remote CRUD service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Service origin, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request deadline per call, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl HttpConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::BlankField("base_url"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::NonPositive("request_timeout_ms"));
        }
        Ok(())
    }
}
