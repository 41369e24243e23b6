//! The swipe-to-reveal card controller.
//!
//! `SwipeableCard` owns one card's offset and reveal state. The host feeds
//! it pointer samples and frame ticks and draws whatever `frame()` returns.
//!
//! ## Locking
//!
//! State lives behind a `parking_lot::Mutex` shared with the owner's
//! [`CardHandle`] and the focus subscription. User callbacks (`on_press`,
//! `on_swipe_open`) always run with the lock released, so they may call
//! back into the card.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use swipecard_core::{ActionCallback, ActionSet, ConfigError, RevealState, SwipeConfig};
use tokio::sync::watch;
use uuid::Uuid;

use crate::action_row::{layout_buttons, ActionBinding};
use crate::classifier::{CaptureDecision, GestureClassifier, GestureSample};
use crate::focus::{FocusSource, FocusSubscription};
use crate::frame::{CardFrame, HitTarget};
use crate::handle::CardHandle;
use crate::offset::AnimatedValue;
use crate::resolve::{resolve, ReleaseInput, Resolution};
use crate::session::{Generation, GestureSession};
use crate::spring::{Completion, Spring, SpringAnimation};
use crate::theme::{CardPalette, StaticTheme, ThemeProvider};

// =============================================================================
// Outcomes
// =============================================================================

/// Result of feeding a move sample to the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The card did not claim the gesture; ancestors may handle it.
    Ignored(CaptureDecision),
    /// This sample claimed the gesture.
    Captured,
    /// The card already owns the gesture and tracked the sample.
    Tracking,
    /// The gesture was claimed by a recognizer that has since been rebuilt.
    Stale,
}

impl MoveOutcome {
    /// Whether the card owns the gesture after this sample.
    pub fn is_owned(self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }
}

/// Result of pressing an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The callback ran and the card is closing.
    Pressed,
    /// The binding belongs to an older action set; nothing ran.
    Stale,
    /// No action at that index.
    Unknown,
}

/// Result of a tap routed through the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// A button was pressed.
    Action(PressOutcome),
    /// The tap closed the reveal and must not reach the content.
    Dismissed,
    /// The card was closed; the content should handle the tap.
    Forwarded,
}

// =============================================================================
// Card Core
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    Active(GestureSession),
}

/// Mutable per-card state.
pub(crate) struct CardCore {
    id: Uuid,
    config: SwipeConfig,
    classifier: GestureClassifier,
    spring: Spring,
    actions: ActionSet,
    state: RevealState,
    offset: AnimatedValue,
    animation: Option<SpringAnimation>,
    generation: Generation,
    tracking: Tracking,
    on_swipe_open: Option<ActionCallback>,
    theme: Arc<dyn ThemeProvider>,
    palette: CardPalette,
    state_tx: watch::Sender<RevealState>,
    state_rx: watch::Receiver<RevealState>,
}

impl CardCore {
    fn new(actions: ActionSet, config: SwipeConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(RevealState::Closed);
        Self {
            id: Uuid::new_v4(),
            classifier: GestureClassifier::from_config(&config),
            spring: Spring::from_config(config.spring),
            theme: Arc::new(StaticTheme::new(config.theme)),
            config,
            actions,
            state: RevealState::Closed,
            offset: AnimatedValue::new(0.0),
            animation: None,
            generation: Generation::default(),
            tracking: Tracking::Idle,
            on_swipe_open: None,
            palette: CardPalette::default(),
            state_tx,
            state_rx,
        }
    }

    pub(crate) fn state(&self) -> RevealState {
        self.state
    }

    fn reveal_width(&self) -> f32 {
        self.actions.reveal_width(self.config.action_width)
    }

    fn live_session(&self) -> Option<GestureSession> {
        match self.tracking {
            Tracking::Active(session) if session.is_current(self.generation) => Some(session),
            _ => None,
        }
    }

    fn set_state(&mut self, state: RevealState) {
        if self.state != state {
            self.state = state;
            let _ = self.state_tx.send(state);
        }
    }

    fn stop_animation(&mut self) {
        self.animation = None;
    }

    /// Start a spring toward `target`, or finish at once if already there.
    fn animate_to(&mut self, target: f32, completion: Completion) {
        self.stop_animation();
        self.offset.flatten_offset();

        if self.offset.current() == target {
            self.finish_animation(target, completion);
        } else {
            self.animation = Some(SpringAnimation::new(self.spring, target, completion));
        }
    }

    fn finish_animation(&mut self, target: f32, completion: Completion) {
        match completion {
            Completion::Settle => self.offset.reset(target),
            Completion::HardReset => self.offset.reset(0.0),
        }
    }

    fn grant(&mut self) {
        self.stop_animation();
        let base = self.offset.current();
        self.offset.extract_offset();
        self.tracking = Tracking::Active(GestureSession::new(
            self.generation,
            base,
            self.state.is_revealed(),
        ));
        tracing::debug!(card = %self.id, "Captured swipe at offset {}", base);
    }

    fn apply_move(&mut self, session: GestureSession, dx: f32) {
        let min = -self.reveal_width();
        let candidate = session.base_offset + dx;

        // The finger owns the offset; anything still animating gives way.
        self.stop_animation();

        let live = if dx <= 0.0 {
            candidate.max(min).min(0.0)
        } else if session.can_drag_right() {
            candidate.min(0.0).max(min)
        } else {
            return;
        };

        let base = self.offset.offset();
        self.offset.set_value(live - base);
    }

    fn release(&mut self, dx: f32) -> Option<(Resolution, bool)> {
        let tracking = std::mem::replace(&mut self.tracking, Tracking::Idle);
        let session = match tracking {
            Tracking::Active(session) if session.is_current(self.generation) => session,
            Tracking::Active(_) => {
                tracing::debug!(card = %self.id, "Dropped release from stale recognizer");
                return None;
            }
            Tracking::Idle => return None,
        };

        self.offset.flatten_offset();
        let live = self.offset.current();
        let previous = self.state;
        let resolution = resolve(ReleaseInput {
            dx,
            live,
            state: previous,
            reveal_width: self.reveal_width(),
            swipe_threshold: self.config.swipe_threshold,
        });

        tracing::debug!(
            card = %self.id,
            dx,
            live,
            base = session.base_offset,
            "Swipe released in {:?}: {:?} -> {:?}",
            previous,
            resolution.rule,
            resolution.state
        );

        self.set_state(resolution.state);
        self.animate_to(resolution.target, Completion::Settle);

        let opened = resolution.fires_open() && !previous.is_revealed();
        Some((resolution, opened))
    }

    fn cancel(&mut self) {
        if let Tracking::Active(session) = std::mem::replace(&mut self.tracking, Tracking::Idle) {
            if session.is_current(self.generation) {
                tracing::debug!(card = %self.id, "Swipe cancelled in {:?}", self.state);
                let target = self.state.canonical_offset(self.reveal_width());
                self.animate_to(target, Completion::Settle);
            }
        }
    }

    /// Stop, spring to closed, then re-sync the value to exactly zero.
    pub(crate) fn close(&mut self) {
        tracing::debug!(card = %self.id, "Closing card from {:?}", self.state);
        self.stop_animation();
        self.set_state(RevealState::Closed);
        self.animate_to(0.0, Completion::HardReset);
    }

    fn rebuild(&mut self, reason: &str) {
        self.close();
        self.generation = self.generation.next();
        tracing::info!(
            card = %self.id,
            "Rebuilt recognizer ({}), generation {}",
            reason,
            self.generation.get()
        );
    }

    fn set_actions(&mut self, actions: ActionSet) -> bool {
        if self.actions.same_as(&actions) {
            return false;
        }
        self.actions = actions;
        let min = -self.reveal_width();
        self.offset.clamp_into(min, 0.0);
        self.rebuild("action set changed");
        true
    }

    pub(crate) fn focus_regained(&mut self) {
        if self.state.is_revealed() {
            self.rebuild("screen focused while revealed");
        }
    }

    fn tick(&mut self, dt: Duration) -> bool {
        if self.live_session().is_some() {
            return false;
        }
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let min = -self.actions.reveal_width(self.config.action_width);
        let mut position = self.offset.current();
        let done = animation.step(&mut position, dt, min, 0.0);
        self.offset.reset(position);

        if done {
            let target = animation.target();
            let completion = animation.completion();
            self.animation = None;
            self.finish_animation(target, completion);
            tracing::debug!(card = %self.id, "Settled at {} ({:?})", target, self.state);
        }
        !done
    }

    fn frame(&self) -> CardFrame {
        let live = self.offset.current();
        CardFrame {
            translate_x: live,
            background: self.palette.background(self.theme.as_ref()),
            state: self.state,
            overlay_visible: self.state.is_revealed(),
            dragging: self.live_session().is_some(),
            animating: self.animation.is_some(),
            buttons: layout_buttons(&self.actions, self.config.action_width, live, self.generation),
            hit_slop: self.config.hit_slop,
        }
    }
}

// =============================================================================
// SwipeableCard
// =============================================================================

/// One swipe-to-reveal row.
///
/// ## Usage
///
/// ```ignore
/// let card = SwipeableCard::new(actions, SwipeConfig::default())?
///     .with_on_swipe_open(|| println!("opened"))
///     .with_focus_source(screen_focus.clone());
///
/// card.pointer_move(GestureSample::new(-30.0, 2.0));
/// card.pointer_move(GestureSample::new(-80.0, 3.0));
/// card.pointer_release(GestureSample::new(-80.0, 3.0));
/// while card.tick(frame_dt) {}
/// ```
pub struct SwipeableCard {
    core: Arc<Mutex<CardCore>>,
    _focus: Option<FocusSubscription>,
}

impl SwipeableCard {
    /// Mount a closed card.
    ///
    /// Fails if `config` does not pass [`SwipeConfig::validate`]; widths and
    /// thresholds feed the offset range directly.
    pub fn new(actions: ActionSet, config: SwipeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let core = CardCore::new(actions, config);
        tracing::debug!(card = %core.id, "Mounted card with {} actions", core.actions.len());
        Ok(Self {
            core: Arc::new(Mutex::new(core)),
            _focus: None,
        })
    }

    /// Callback fired once each time a user swipe opens the card.
    pub fn with_on_swipe_open(self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.core.lock().on_swipe_open = Some(Arc::new(callback));
        self
    }

    /// Theme used to pick the card surface color.
    pub fn with_theme(self, theme: Arc<dyn ThemeProvider>) -> Self {
        self.core.lock().theme = theme;
        self
    }

    /// Surface colors for light and dark appearance.
    pub fn with_palette(self, palette: CardPalette) -> Self {
        self.core.lock().palette = palette;
        self
    }

    /// Close a stale reveal whenever `source` reports focus.
    ///
    /// The listener is removed when the card is dropped.
    pub fn with_focus_source(mut self, source: Arc<dyn FocusSource>) -> Self {
        let weak = Arc::downgrade(&self.core);
        let listener = Arc::new(move || {
            if let Some(core) = weak.upgrade() {
                core.lock().focus_regained();
            }
        });
        self._focus = Some(FocusSubscription::new(source, listener));
        self
    }

    // =========================================================================
    // Owner-facing surface
    // =========================================================================

    /// Capability the owner can use to close this card.
    pub fn handle(&self) -> CardHandle {
        CardHandle::new(Arc::downgrade(&self.core))
    }

    /// Watch settled state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<RevealState> {
        self.core.lock().state_rx.clone()
    }

    /// Close the card, independent of any gesture in progress.
    pub fn close(&self) {
        self.core.lock().close();
    }

    /// Replace the action set.
    ///
    /// A different set closes the card and rebuilds the recognizer; returns
    /// `false` if `actions` is the set already bound.
    pub fn set_actions(&self, actions: ActionSet) -> bool {
        self.core.lock().set_actions(actions)
    }

    /// The hosting screen regained focus or visibility.
    pub fn focus_regained(&self) {
        self.core.lock().focus_regained();
    }

    // =========================================================================
    // Gesture input
    // =========================================================================

    /// Touch-down. Never claims, so taps reach the content.
    pub fn pointer_start(&self) -> bool {
        self.core.lock().classifier.should_capture_on_start()
    }

    /// Cumulative move sample since touch-down.
    pub fn pointer_move(&self, sample: GestureSample) -> MoveOutcome {
        let mut core = self.core.lock();
        let tracking = core.tracking;

        match tracking {
            Tracking::Active(session) if session.is_current(core.generation) => {
                core.apply_move(session, sample.dx);
                MoveOutcome::Tracking
            }
            Tracking::Active(_) => MoveOutcome::Stale,
            Tracking::Idle => {
                let decision = core.classifier.classify(sample, core.state);
                if decision.is_capture() {
                    core.grant();
                    if let Some(session) = core.live_session() {
                        core.apply_move(session, sample.dx);
                    }
                    MoveOutcome::Captured
                } else {
                    if decision == CaptureDecision::RightwardWhileClosed {
                        tracing::debug!(card = %core.id, "Blocked rightward swipe on closed card");
                    }
                    MoveOutcome::Ignored(decision)
                }
            }
        }
    }

    /// An ancestor asks to take over the gesture. Refused while owned.
    pub fn request_termination(&self) -> bool {
        matches!(self.core.lock().tracking, Tracking::Idle)
    }

    /// Finger lifted. Returns the resolution if the card owned the gesture.
    pub fn pointer_release(&self, sample: GestureSample) -> Option<Resolution> {
        let (resolution, on_open) = {
            let mut core = self.core.lock();
            let (resolution, opened) = core.release(sample.dx)?;
            let on_open = if opened {
                core.on_swipe_open.clone()
            } else {
                None
            };
            (resolution, on_open)
        };

        if let Some(callback) = on_open {
            callback();
        }
        Some(resolution)
    }

    /// Abort the current drag and snap back to the current state.
    pub fn cancel_gesture(&self) {
        self.core.lock().cancel();
    }

    /// Advance animations. Returns `true` while still moving.
    pub fn tick(&self, dt: Duration) -> bool {
        self.core.lock().tick(dt)
    }

    // =========================================================================
    // Taps
    // =========================================================================

    /// Press an action button.
    ///
    /// Runs the action's callback, then closes the card.
    pub fn press_action(&self, binding: ActionBinding) -> PressOutcome {
        let callback = {
            let core = self.core.lock();
            if binding.generation != core.generation {
                tracing::warn!(
                    card = %core.id,
                    "Ignored press bound to generation {} (current {})",
                    binding.generation.get(),
                    core.generation.get()
                );
                return PressOutcome::Stale;
            }
            match core.actions.get(binding.index) {
                Some(action) => {
                    tracing::debug!(card = %core.id, "Action pressed: {}", action.id);
                    action.on_press.clone()
                }
                None => return PressOutcome::Unknown,
            }
        };

        callback();
        self.core.lock().close();
        PressOutcome::Pressed
    }

    /// Tap on the card body.
    pub fn tap_body(&self) -> TapOutcome {
        let mut core = self.core.lock();
        if core.state.is_revealed() {
            core.close();
            TapOutcome::Dismissed
        } else {
            TapOutcome::Forwarded
        }
    }

    /// Route a tap resolved by [`CardFrame::hit_test`].
    pub fn tap(&self, target: HitTarget) -> TapOutcome {
        match target {
            HitTarget::Action(binding) => TapOutcome::Action(self.press_action(binding)),
            HitTarget::Overlay => {
                self.close();
                TapOutcome::Dismissed
            }
            HitTarget::Body => self.tap_body(),
        }
    }

    // =========================================================================
    // Read methods
    // =========================================================================

    /// Snapshot for rendering.
    pub fn frame(&self) -> CardFrame {
        self.core.lock().frame()
    }

    pub fn state(&self) -> RevealState {
        self.core.lock().state
    }

    /// The rendered horizontal offset.
    pub fn live_offset(&self) -> f32 {
        self.core.lock().offset.current()
    }

    pub fn generation(&self) -> Generation {
        self.core.lock().generation
    }

    pub fn reveal_width(&self) -> f32 {
        self.core.lock().reveal_width()
    }

    pub fn is_dragging(&self) -> bool {
        self.core.lock().live_session().is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.core.lock().animation.is_some()
    }

    /// Neither dragging nor animating.
    pub fn is_settled(&self) -> bool {
        let core = self.core.lock();
        core.tracking == Tracking::Idle && core.animation.is_none()
    }
}

impl fmt::Debug for SwipeableCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.lock();
        f.debug_struct("SwipeableCard")
            .field("id", &core.id)
            .field("state", &core.state)
            .field("offset", &core.offset.current())
            .field("generation", &core.generation)
            .field("actions", &core.actions.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
