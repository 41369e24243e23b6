//! A host-side focus source wired to a card from outside the crate.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use swipecard_controller::{
    Action, ActionSet, Color, FocusListener, FocusSource, GestureSample, RevealState,
    SubscriptionId, SwipeConfig, SwipeableCard,
};

/// Navigation-style focus events keyed by the host's own listener ids.
#[derive(Default)]
struct ScreenFocus {
    next: Mutex<u64>,
    listeners: Mutex<HashMap<SubscriptionId, FocusListener>>,
}

impl ScreenFocus {
    fn focus(&self) {
        let listeners: Vec<FocusListener> = self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    fn len(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl FocusSource for ScreenFocus {
    fn subscribe(&self, listener: FocusListener) -> SubscriptionId {
        let mut next = self.next.lock();
        *next += 100;
        let id = SubscriptionId::from(*next);
        self.listeners.lock().insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().remove(&id);
    }
}

fn card() -> SwipeableCard {
    let actions = ActionSet::from(vec![Action::new(
        "delete",
        "trash",
        Color::WHITE,
        Color::rgb(0xF4, 0x43, 0x36),
        || {},
    )]);
    SwipeableCard::new(actions, SwipeConfig::default()).unwrap()
}

#[test]
fn test_host_focus_source_resets_card() {
    let screen = Arc::new(ScreenFocus::default());
    let card = card().with_focus_source(screen.clone());
    assert_eq!(screen.len(), 1);

    card.pointer_move(GestureSample::new(-20.0, 0.0));
    card.pointer_move(GestureSample::new(-65.0, 0.0));
    card.pointer_release(GestureSample::new(-65.0, 0.0));
    assert_eq!(card.state(), RevealState::Revealed);

    screen.focus();
    assert_eq!(card.state(), RevealState::Closed);
    while card.tick(Duration::from_millis(16)) {}
    assert_eq!(card.live_offset(), 0.0);

    drop(card);
    assert_eq!(screen.len(), 0);
}

#[test]
fn test_subscription_id_round_trips_raw_value() {
    assert_eq!(SubscriptionId::new(7).get(), 7);
    assert_eq!(SubscriptionId::from(7), SubscriptionId::new(7));
}
