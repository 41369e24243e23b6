//! Error types for the card controller.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error reading {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Color parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// Missing leading '#'.
    #[error("Color must start with '#': {0}")]
    MissingHash(String),

    /// Wrong number of hex digits.
    #[error("Color must have 6 or 8 hex digits: {0}")]
    BadLength(String),

    /// Non-hex character.
    #[error("Invalid hex digit in color: {0}")]
    BadDigit(String),
}
