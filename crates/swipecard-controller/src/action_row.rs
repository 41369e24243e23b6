//! Layout of the button row behind the card.
//!
//! Buttons are anchored to the card's trailing edge. Positions are measured
//! leftwards from that edge, so the last action sits at `right = 0` and is
//! uncovered first.

use serde::Serialize;
use swipecard_core::{ActionSet, Color};

use crate::session::Generation;

/// A press target for one action, valid for one generation.
///
/// Bindings from a previous generation are rejected, so a press can never
/// reach a callback from an action set the card no longer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActionBinding {
    pub generation: Generation,
    pub index: usize,
}

/// Render data for one action button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonFrame {
    pub id: String,
    pub icon: String,
    pub color: Color,
    pub background_color: Color,
    /// Distance of the button's right edge from the trailing edge.
    pub right: f32,
    pub width: f32,
    /// True while any part of the button is uncovered.
    pub hit_testable: bool,
    pub binding: ActionBinding,
}

impl ButtonFrame {
    /// Horizontal span `[start, end)` measured from the trailing edge.
    pub fn span(&self) -> (f32, f32) {
        (self.right, self.right + self.width)
    }
}

/// Lay out every action for the given live offset.
pub fn layout_buttons(
    actions: &ActionSet,
    action_width: f32,
    live: f32,
    generation: Generation,
) -> Vec<ButtonFrame> {
    let count = actions.len();
    let uncovered = -live;

    actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let right = (count - 1 - index) as f32 * action_width;
            ButtonFrame {
                id: action.id.clone(),
                icon: action.icon.clone(),
                color: action.color,
                background_color: action.background_color,
                right,
                width: action_width,
                hit_testable: uncovered > right,
                binding: ActionBinding { generation, index },
            }
        })
        .collect()
}
