//! Core types for the swipe-to-reveal card controller.
//!
//! This crate contains the data model shared by the controller and its hosts:
//! - Actions and action sets bound to a card
//! - The two settled reveal states
//! - Colors and appearance
//! - Configuration types
//! - Error types

mod action;
mod color;
mod config;
mod error;
mod state;

pub use action::{Action, ActionCallback, ActionSet};
pub use color::Color;
pub use config::{
    config_dir, config_path, load_config, load_config_from, Appearance, HitSlop, SpringConfig,
    SwipeConfig,
};
pub use error::{ColorError, ConfigError};
pub use state::RevealState;
