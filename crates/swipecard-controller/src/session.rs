//! Generation tokens and per-drag sessions.

use serde::Serialize;

/// Version of the card's recognizer and action bindings.
///
/// Bumped whenever the card is rebuilt from scratch. Anything tagged with an
/// older generation is stale and must not act on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }

    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A claimed drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Recognizer generation that claimed the drag.
    pub generation: Generation,
    /// Settled offset before this drag began.
    pub base_offset: f32,
    /// Whether the card was revealed when the drag was claimed. Rightward
    /// travel is gated on this, not on the live state.
    pub revealed_at_grant: bool,
}

impl GestureSession {
    pub fn new(generation: Generation, base_offset: f32, revealed_at_grant: bool) -> Self {
        Self {
            generation,
            base_offset,
            revealed_at_grant,
        }
    }

    /// Whether a rightward drag may move the card in this session.
    pub fn can_drag_right(&self) -> bool {
        self.revealed_at_grant && self.base_offset < 0.0
    }

    /// Check whether the session belongs to the live recognizer.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }
}
