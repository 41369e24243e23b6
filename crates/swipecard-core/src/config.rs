//! Configuration types.
//!
//! Defaults reproduce the stock card behavior. A TOML file at
//! `<config_dir>/swipecard/config.toml` may override any field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Tunables for gesture capture, resolution, layout and animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Release distance that counts as a deliberate open/close swipe.
    pub swipe_threshold: f32,

    /// Width of a single action button.
    pub action_width: f32,

    /// Minimum horizontal travel before a gesture may be captured.
    pub capture_slop: f32,

    /// Required |dx| : |dy| dominance for a horizontal capture.
    pub horizontal_ratio: f32,

    /// Spring used for every settle animation.
    pub spring: SpringConfig,

    /// Extra touch area around each action button.
    pub hit_slop: HitSlop,

    /// Light, dark, or follow system.
    pub theme: Appearance,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 60.0,
            action_width: 70.0,
            capture_slop: 10.0,
            horizontal_ratio: 2.0,
            spring: SpringConfig::default(),
            hit_slop: HitSlop::default(),
            theme: Appearance::System,
        }
    }
}

impl SwipeConfig {
    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("swipe_threshold", self.swipe_threshold)?;
        positive("action_width", self.action_width)?;
        non_negative("capture_slop", self.capture_slop)?;
        if self.horizontal_ratio.is_nan() || self.horizontal_ratio < 1.0 {
            return Err(ConfigError::Invalid {
                field: "horizontal_ratio",
                reason: format!("must be at least 1, got {}", self.horizontal_ratio),
            });
        }
        non_negative("spring.tension", self.spring.tension)?;
        non_negative("spring.friction", self.spring.friction)?;
        non_negative("hit_slop.top", self.hit_slop.top)?;
        non_negative("hit_slop.bottom", self.hit_slop.bottom)?;
        non_negative("hit_slop.left", self.hit_slop.left)?;
        non_negative("hit_slop.right", self.hit_slop.right)?;
        Ok(())
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", v),
        })
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v >= 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a non-negative number, got {}", v),
        })
    }
}

/// Spring parameters in tension/friction form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub tension: f32,
    pub friction: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            tension: 100.0,
            friction: 8.0,
        }
    }
}

/// Touch area extension around a button, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitSlop {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for HitSlop {
    fn default() -> Self {
        Self {
            top: 10.0,
            bottom: 10.0,
            left: 5.0,
            right: 5.0,
        }
    }
}

/// Appearance mode preference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    System,
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("swipecard"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load config from the default location.
///
/// A missing file yields the defaults.
pub fn load_config() -> Result<SwipeConfig, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    if !path.exists() {
        tracing::info!("No config found at {:?}, using defaults", path);
        return Ok(SwipeConfig::default());
    }
    load_config_from(&path)
}

/// Load and validate config from a specific file.
pub fn load_config_from(path: &Path) -> Result<SwipeConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let config: SwipeConfig = toml::from_str(&text)?;
    config.validate()?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SwipeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.swipe_threshold, 60.0);
        assert_eq!(config.action_width, 70.0);
        assert_eq!(config.spring.tension, 100.0);
        assert_eq!(config.hit_slop.left, 5.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "action_width = 80.0").unwrap();
        writeln!(file, "theme = \"dark\"").unwrap();
        writeln!(file, "[spring]").unwrap();
        writeln!(file, "friction = 10.0").unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.action_width, 80.0);
        assert_eq!(config.theme, Appearance::Dark);
        assert_eq!(config.spring.friction, 10.0);
        assert_eq!(config.spring.tension, 100.0);
        assert_eq!(config.swipe_threshold, 60.0);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "action_width = 0.0").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "action_width",
                ..
            }
        ));
    }

    #[test]
    fn test_ratio_below_one_rejected() {
        let config = SwipeConfig {
            horizontal_ratio: 0.5,
            ..SwipeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "action_width = \"wide\"").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
