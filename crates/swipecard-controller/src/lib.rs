//! Headless swipe-to-reveal card controller.
//!
//! This crate provides the interaction logic for a list row that slides left
//! to uncover a row of action buttons:
//! - Gesture capture (horizontal dominance, slop, direction gating)
//! - Offset tracking with clamping and base-offset composition
//! - Release resolution into `Closed` / `Revealed` with spring settling
//! - Action row layout, hit testing and press handling
//! - Owner handle, focus-driven reset and action-set rebuilds
//!
//! All types are independent of any UI toolkit. The host forwards pointer
//! events and frame ticks, and draws from [`CardFrame`].

pub mod action_row;
pub mod card;
pub mod classifier;
pub mod focus;
pub mod frame;
pub mod handle;
pub mod offset;
pub mod resolve;
pub mod session;
pub mod spring;
pub mod theme;

// Re-export commonly used types
pub use action_row::{ActionBinding, ButtonFrame};
pub use card::{MoveOutcome, PressOutcome, SwipeableCard, TapOutcome};
pub use classifier::{CaptureDecision, GestureClassifier, GestureSample};
pub use focus::{FocusBroadcaster, FocusListener, FocusSource, SubscriptionId};
pub use frame::{CardFrame, HitTarget};
pub use handle::CardHandle;
pub use offset::AnimatedValue;
pub use resolve::{resolve, ReleaseInput, ReleaseRule, Resolution};
pub use session::{Generation, GestureSession};
pub use spring::{Completion, Spring, SpringAnimation};
pub use swipecard_core::{
    Action, ActionSet, Appearance, Color, ConfigError, RevealState, SwipeConfig,
};
pub use theme::{CardPalette, StaticTheme, ThemeProvider};
