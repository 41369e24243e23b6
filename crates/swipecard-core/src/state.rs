//! Settled reveal states.

use serde::{Deserialize, Serialize};

/// The two stable positions a card can rest in.
///
/// Exactly one holds whenever the card is not being dragged. At rest,
/// `Closed` sits at offset `0` and `Revealed` at `-reveal_width`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    /// Card covers the action row.
    #[default]
    Closed,
    /// Card is shifted left so the full action row is visible.
    Revealed,
}

impl RevealState {
    /// Check if the action row is revealed.
    pub fn is_revealed(self) -> bool {
        matches!(self, RevealState::Revealed)
    }

    /// Canonical resting offset for this state.
    pub fn canonical_offset(self, reveal_width: f32) -> f32 {
        match self {
            RevealState::Closed => 0.0,
            RevealState::Revealed => -reveal_width,
        }
    }
}
