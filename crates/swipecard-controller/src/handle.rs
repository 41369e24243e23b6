//! Owner-side capability for a mounted card.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Weak;

use swipecard_core::RevealState;

use crate::card::CardCore;

/// Lets the owner of a card (its list or screen) close it.
///
/// The handle does not keep the card alive. Once the card is dropped every
/// call is a no-op.
#[derive(Clone)]
pub struct CardHandle {
    core: Weak<Mutex<CardCore>>,
}

impl CardHandle {
    pub(crate) fn new(core: Weak<Mutex<CardCore>>) -> Self {
        Self { core }
    }

    /// Close the card.
    ///
    /// Returns `false` if the card no longer exists.
    pub fn close(&self) -> bool {
        match self.core.upgrade() {
            Some(core) => {
                core.lock().close();
                true
            }
            None => false,
        }
    }

    /// Current state, if the card still exists.
    pub fn state(&self) -> Option<RevealState> {
        self.core.upgrade().map(|core| core.lock().state())
    }

    /// Check if the card is still mounted.
    pub fn is_alive(&self) -> bool {
        self.core.strong_count() > 0
    }
}

impl fmt::Debug for CardHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::card::SwipeableCard;
    use crate::classifier::GestureSample;
    use std::time::Duration;
    use swipecard_core::{Action, ActionSet, Color, RevealState, SwipeConfig};

    fn card() -> SwipeableCard {
        let actions = ActionSet::from(vec![Action::new(
            "report",
            "flag",
            Color::WHITE,
            Color::rgb(0xFF, 0x98, 0x00),
            || {},
        )]);
        SwipeableCard::new(actions, SwipeConfig::default()).unwrap()
    }

    #[test]
    fn test_handle_closes_card() {
        let card = card();
        let handle = card.handle();

        card.pointer_move(GestureSample::new(-20.0, 0.0));
        card.pointer_move(GestureSample::new(-65.0, 0.0));
        card.pointer_release(GestureSample::new(-65.0, 0.0));
        assert_eq!(handle.state(), Some(RevealState::Revealed));

        assert!(handle.close());
        assert_eq!(card.state(), RevealState::Closed);
        while card.tick(Duration::from_millis(16)) {}
        assert_eq!(card.live_offset(), 0.0);
    }

    #[test]
    fn test_handle_outlives_card() {
        let card = card();
        let handle = card.handle();
        assert!(handle.is_alive());

        drop(card);
        assert!(!handle.is_alive());
        assert!(!handle.close());
        assert_eq!(handle.state(), None);
    }
}
