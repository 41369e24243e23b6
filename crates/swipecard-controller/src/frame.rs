//! Per-frame render snapshot of a card.
//!
//! The host reads a `CardFrame` every frame and draws from it; it never
//! touches the controller's internals. Hit testing lives here too, since it
//! depends only on what is on screen.

use serde::Serialize;
use swipecard_core::{Color, HitSlop, RevealState};

use crate::action_row::{ActionBinding, ButtonFrame};

/// What the host should draw for one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardFrame {
    /// Horizontal transform applied to the card body.
    pub translate_x: f32,
    /// Card surface color from the theme.
    pub background: Color,
    pub state: RevealState,
    /// Invisible full-card tap catcher, present while revealed.
    pub overlay_visible: bool,
    /// A drag currently owns the offset.
    pub dragging: bool,
    /// A spring is moving the offset.
    pub animating: bool,
    pub buttons: Vec<ButtonFrame>,
    pub hit_slop: HitSlop,
}

/// Where a tap landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// An uncovered action button.
    Action(ActionBinding),
    /// The dismiss overlay.
    Overlay,
    /// The card body with its content.
    Body,
}

impl CardFrame {
    /// Check the settled-state invariant against the rendered offset.
    pub fn is_consistent(&self, reveal_width: f32) -> bool {
        self.dragging || self.animating || self.translate_x == self.state.canonical_offset(reveal_width)
    }

    /// Resolve a tap at `x`, measured leftwards from the trailing edge.
    ///
    /// Buttons sit above the overlay, and the overlay above the body.
    pub fn hit_test(&self, x: f32) -> HitTarget {
        let uncovered = -self.translate_x;

        let best = self
            .buttons
            .iter()
            .filter(|b| b.hit_testable)
            .filter(|b| {
                let (start, end) = b.span();
                let visible_end = end.min(uncovered);
                x >= start - self.hit_slop.right && x < visible_end + self.hit_slop.left
            })
            .min_by(|a, b| {
                let da = (x - (a.right + a.width / 2.0)).abs();
                let db = (x - (b.right + b.width / 2.0)).abs();
                da.total_cmp(&db)
            });

        match best {
            Some(button) => HitTarget::Action(button.binding),
            None if self.overlay_visible => HitTarget::Overlay,
            None => HitTarget::Body,
        }
    }
}
