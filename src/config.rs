//! Evaluator settings.
//!
//! The calculator variants differ only in a few policies, gathered here and
//! loadable from a TOML file:
//!
//! ```toml
//! precision = 10
//! plain_limit = 1e15
//! log_alias = true
//! percent = false
//! ```

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading [`Settings`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("could not read settings: {0}")]
    Io(#[from] io::Error),
    /// The settings file is not valid TOML, or has fields of the wrong type
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Policies applied by the [`Evaluator`](crate::Evaluator)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Decimal places kept for non integral results
    pub precision: usize,
    /// Results with a magnitude at or above this are shown in scientific
    /// notation
    pub plain_limit: f64,
    /// Rewrite a bare `log` name to `log10`
    pub log_alias: bool,
    /// Rewrite `%` to `/100`
    pub percent: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: 10,
            plain_limit: 1e15,
            log_alias: true,
            percent: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Missing keys keep their default value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
