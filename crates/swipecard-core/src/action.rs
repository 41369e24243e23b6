//! Action types bound to a card's hidden button row.

use std::fmt;
use std::sync::Arc;

use crate::color::Color;

/// Callback invoked when an action button is pressed.
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// A single button behind the card.
#[derive(Clone)]
pub struct Action {
    /// Stable identifier, unique within its set.
    pub id: String,

    /// Icon identifier (named icon, rendered by the host).
    pub icon: String,

    /// Icon tint.
    pub color: Color,

    /// Button fill.
    pub background_color: Color,

    /// Invoked synchronously on press, before the card closes.
    pub on_press: ActionCallback,
}

impl Action {
    /// Create an action.
    pub fn new(
        id: impl Into<String>,
        icon: impl Into<String>,
        color: Color,
        background_color: Color,
        on_press: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            color,
            background_color,
            on_press: Arc::new(on_press),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("icon", &self.icon)
            .field("color", &self.color)
            .field("background_color", &self.background_color)
            .finish_non_exhaustive()
    }
}

/// An ordered, shared, immutable sequence of actions.
///
/// Order is visual: the last action sits nearest the card's trailing edge.
/// Two sets are "the same" only if they share the same allocation; building
/// a new set with equal contents still counts as a change.
#[derive(Debug, Clone)]
pub struct ActionSet(Arc<[Action]>);

impl ActionSet {
    /// An empty set (nothing to reveal).
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no actions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an action by index.
    pub fn get(&self, index: usize) -> Option<&Action> {
        self.0.get(index)
    }

    /// Iterate actions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    /// Check whether both handles refer to the same set.
    pub fn same_as(&self, other: &ActionSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Total width of the button row.
    pub fn reveal_width(&self, action_width: f32) -> f32 {
        self.0.len() as f32 * action_width
    }
}

impl From<Vec<Action>> for ActionSet {
    fn from(actions: Vec<Action>) -> Self {
        Self(Arc::from(actions))
    }
}

impl<'a> IntoIterator for &'a ActionSet {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn action(id: &str) -> Action {
        Action::new(id, "trash-can", Color::WHITE, Color::rgb(0xE5, 0x39, 0x35), || {})
    }

    #[test]
    fn test_reveal_width() {
        let set = ActionSet::from(vec![action("edit"), action("delete")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.reveal_width(70.0), 140.0);
        assert_eq!(ActionSet::empty().reveal_width(70.0), 0.0);
    }

    #[test]
    fn test_identity_is_by_allocation() {
        let a = ActionSet::from(vec![action("edit")]);
        let b = a.clone();
        let c = ActionSet::from(vec![action("edit")]);

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn test_callback_invocation() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let a = Action::new("like", "heart", Color::WHITE, Color::WHITE, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        (a.on_press)();
        (a.on_press)();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_omits_callback() {
        let dbg = format!("{:?}", action("edit"));
        assert!(dbg.contains("\"edit\""));
        assert!(!dbg.contains("on_press"));
    }
}
