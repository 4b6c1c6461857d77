//! Configuration for the normalization stage.
//!
//! [`NormalizeConfig`] holds the two substitution defaults the normalizer
//! applies when a raw record is missing a display field. It is cheap to clone
//! and deserializes from external configuration formats such as JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use normalize::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! config.validate().expect("default config is valid");
//! assert_eq!(config.placeholder_name, "Untitled");
//! assert_eq!(config.fallback_cuisine, "Other");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for raw-record normalization.
///
/// Both fields are display defaults, not validation rules: normalization is
/// total and never rejects a record, it substitutes these values instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Title substituted when a raw record carries no usable name.
    #[serde(default = "default_placeholder_name")]
    pub placeholder_name: String,
    /// Cuisine substituted when a raw record carries neither a cuisine nor a
    /// category label.
    #[serde(default = "default_fallback_cuisine")]
    pub fallback_cuisine: String,
}

fn default_placeholder_name() -> String {
    "Untitled".to_string()
}

fn default_fallback_cuisine() -> String {
    "Other".to_string()
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            placeholder_name: default_placeholder_name(),
            fallback_cuisine: default_fallback_cuisine(),
        }
    }
}

impl NormalizeConfig {
    /// Validate the configuration.
    ///
    /// Blank substitution values would reintroduce the empty-field states the
    /// normalizer exists to remove, so both must be non-blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder_name.trim().is_empty() {
            return Err(ConfigError::BlankField("placeholder_name"));
        }
        if self.fallback_cuisine.trim().is_empty() {
            return Err(ConfigError::BlankField("fallback_cuisine"));
        }
        Ok(())
    }
}

/// Errors that can occur when validating a [`NormalizeConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A substitution default was empty or whitespace-only.
    #[error("normalize config field `{0}` must not be blank")]
    BlankField(&'static str),
}
