//! Capture decision for in-progress gestures.
//!
//! A card only claims a touch sequence once it is clearly a horizontal swipe
//! in a direction the card can act on. Everything else stays with ancestor
//! handlers (list scrolling, page swipers).

use serde::Deserialize;
use swipecard_core::{RevealState, SwipeConfig};

/// Cumulative displacement since the touch started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
}

impl GestureSample {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// Why a gesture was or was not claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDecision {
    /// Claim the gesture.
    Capture,
    /// Vertical or diagonal movement.
    NotHorizontal,
    /// Has not travelled far enough yet.
    BelowSlop,
    /// Rightward drag on a closed card belongs to ancestors.
    RightwardWhileClosed,
    /// The sample carried a NaN or infinite coordinate.
    NonFinite,
}

impl CaptureDecision {
    pub fn is_capture(self) -> bool {
        matches!(self, CaptureDecision::Capture)
    }
}

/// Stateless horizontal-swipe classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    horizontal_ratio: f32,
    capture_slop: f32,
}

impl GestureClassifier {
    pub fn new(horizontal_ratio: f32, capture_slop: f32) -> Self {
        Self {
            horizontal_ratio,
            capture_slop,
        }
    }

    pub fn from_config(config: &SwipeConfig) -> Self {
        Self::new(config.horizontal_ratio, config.capture_slop)
    }

    /// Touch-down alone never claims; taps must reach the content.
    pub fn should_capture_on_start(&self) -> bool {
        false
    }

    /// Decide whether a move sample should claim the gesture.
    pub fn classify(&self, sample: GestureSample, state: RevealState) -> CaptureDecision {
        let GestureSample { dx, dy } = sample;

        if !dx.is_finite() || !dy.is_finite() {
            return CaptureDecision::NonFinite;
        }
        if dx.abs() <= dy.abs() * self.horizontal_ratio {
            return CaptureDecision::NotHorizontal;
        }
        if dx.abs() <= self.capture_slop {
            return CaptureDecision::BelowSlop;
        }
        if dx > 0.0 && !state.is_revealed() {
            return CaptureDecision::RightwardWhileClosed;
        }
        CaptureDecision::Capture
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::from_config(&SwipeConfig::default())
    }
}
