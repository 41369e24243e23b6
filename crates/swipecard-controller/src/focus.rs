//! Focus-lifecycle subscriptions.
//!
//! The hosting screen owns a focus source and fires it whenever the screen
//! becomes focused again. Cards subscribe so they can drop a stale reveal.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback fired when the hosting screen regains focus.
pub type FocusListener = Arc<dyn Fn() + Send + Sync>;

/// Handle for removing a focus listener.
///
/// Sources choose their own ids; they only need to be unique per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubscriptionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Something a card can register focus callbacks with.
#[cfg_attr(test, mockall::automock)]
pub trait FocusSource: Send + Sync {
    /// Register a listener. It stays registered until unsubscribed.
    fn subscribe(&self, listener: FocusListener) -> SubscriptionId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// In-process focus source.
///
/// Listeners run in registration order, outside the registry lock, so a
/// listener may subscribe or unsubscribe while being notified.
#[derive(Default)]
pub struct FocusBroadcaster {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, FocusListener)>>,
}

impl FocusBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every listener that the screen is focused.
    pub fn notify_focused(&self) {
        let listeners: Vec<FocusListener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        tracing::debug!("Screen focused, notifying {} listeners", listeners.len());
        for listener in listeners {
            listener();
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl FocusSource for FocusBroadcaster {
    fn subscribe(&self, listener: FocusListener) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut listeners = self.listeners.write();
        if let Some(pos) = listeners.iter().position(|(sid, _)| *sid == id) {
            listeners.remove(pos);
        }
    }
}

impl std::fmt::Debug for FocusBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusBroadcaster")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered for as long as it lives.
pub(crate) struct FocusSubscription {
    source: Arc<dyn FocusSource>,
    id: SubscriptionId,
}

impl FocusSubscription {
    pub(crate) fn new(source: Arc<dyn FocusSource>, listener: FocusListener) -> Self {
        let id = source.subscribe(listener);
        Self { source, id }
    }
}

impl Drop for FocusSubscription {
    fn drop(&mut self) {
        self.source.unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_and_unsubscribe() {
        let source = FocusBroadcaster::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let id = source.subscribe(Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(source.listener_count(), 1);

        source.notify_focused();
        source.notify_focused();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        source.unsubscribe(id);
        source.notify_focused();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_subscription_guard_unsubscribes_on_drop() {
        let source = Arc::new(FocusBroadcaster::new());
        let guard = FocusSubscription::new(source.clone(), Arc::new(|| {}));
        assert_eq!(source.listener_count(), 1);

        drop(guard);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        let source = Arc::new(FocusBroadcaster::new());
        let slot: Arc<parking_lot::Mutex<Option<SubscriptionId>>> = Arc::default();

        let s = source.clone();
        let sl = slot.clone();
        let id = source.subscribe(Arc::new(move || {
            if let Some(id) = sl.lock().take() {
                s.unsubscribe(id);
            }
        }));
        *slot.lock() = Some(id);

        source.notify_focused();
        assert_eq!(source.listener_count(), 0);
    }
}
