//! Gesture trace format and replay.
//!
//! A trace is a JSON document with an initial action set and an ordered list
//! of host events. Replaying it drives a real card and records the frame the
//! host would draw after each event.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use swipecard_controller::{
    CardFrame, FocusBroadcaster, GestureSample, HitTarget, MoveOutcome, PressOutcome,
    StaticTheme, SwipeableCard, TapOutcome,
};
use swipecard_core::{Action, ActionSet, Color, ConfigError, SwipeConfig};

/// Frame interval used by `tick` and `settle`.
const FRAME: Duration = Duration::from_millis(16);
/// Upper bound on frames spent settling.
const MAX_SETTLE_FRAMES: usize = 1000;

/// Errors while loading or replaying a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error reading {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Invalid trace: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A `press` event names an action that is not on the card.
    #[error("Unknown action at step {step}: {id}")]
    UnknownAction { step: usize, id: String },
}

/// An action as written in a trace. Pressing it only logs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionSpec {
    pub id: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: Color,
    pub background_color: Color,
}

fn default_icon() -> String {
    "dots-horizontal".to_string()
}

fn default_color() -> Color {
    Color::WHITE
}

/// One host event.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    Move { dx: f32, dy: f32 },
    Release { dx: f32, dy: f32 },
    Cancel,
    Tick { ms: u64 },
    /// Tick until the card stops moving.
    Settle,
    /// Tap at a distance from the trailing edge.
    Tap { x: f32 },
    TapBody,
    Press { id: String },
    Close,
    Focus,
    SetActions { actions: Vec<ActionSpec> },
}

/// A recorded session.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    pub actions: Vec<ActionSpec>,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Load a trace from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let text = std::fs::read_to_string(path).map_err(|e| TraceError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// What happened at one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub event: TraceEvent,
    /// Short description of the card's response.
    pub outcome: String,
    pub frame: CardFrame,
}

fn build_actions(specs: Vec<ActionSpec>) -> ActionSet {
    let actions: Vec<Action> = specs
        .into_iter()
        .map(|spec| {
            let id = spec.id.clone();
            Action::new(spec.id, spec.icon, spec.color, spec.background_color, move || {
                tracing::info!("Action fired: {}", id);
            })
        })
        .collect();
    ActionSet::from(actions)
}

/// Replay `trace` against a fresh card.
pub fn replay(trace: Trace, config: SwipeConfig) -> Result<Vec<StepReport>, TraceError> {
    let focus = Arc::new(FocusBroadcaster::new());
    let theme = Arc::new(StaticTheme::new(config.theme));
    let card = SwipeableCard::new(build_actions(trace.actions), config)?
        .with_theme(theme)
        .with_focus_source(focus.clone())
        .with_on_swipe_open(|| tracing::info!("Swipe opened"));

    let mut reports = Vec::with_capacity(trace.events.len());
    for (step, event) in trace.events.into_iter().enumerate() {
        let outcome = apply(&card, &focus, step, &event)?;
        tracing::debug!("Step {}: {:?} -> {}", step, event, outcome);
        reports.push(StepReport {
            step,
            event,
            outcome,
            frame: card.frame(),
        });
    }
    Ok(reports)
}

fn apply(
    card: &SwipeableCard,
    focus: &FocusBroadcaster,
    step: usize,
    event: &TraceEvent,
) -> Result<String, TraceError> {
    let outcome = match event {
        TraceEvent::Move { dx, dy } => match card.pointer_move(GestureSample::new(*dx, *dy)) {
            MoveOutcome::Ignored(reason) => format!("ignored ({:?})", reason),
            other => format!("{:?}", other).to_lowercase(),
        },
        TraceEvent::Release { dx, dy } => match card.pointer_release(GestureSample::new(*dx, *dy))
        {
            Some(resolution) => format!("{:?} -> {:?}", resolution.rule, resolution.state),
            None => "not owned".to_string(),
        },
        TraceEvent::Cancel => {
            card.cancel_gesture();
            "cancelled".to_string()
        }
        TraceEvent::Tick { ms } => {
            let mut remaining = *ms;
            while remaining > 0 {
                let slice = remaining.min(FRAME.as_millis() as u64);
                card.tick(Duration::from_millis(slice));
                remaining -= slice;
            }
            format!("ticked {}ms", ms)
        }
        TraceEvent::Settle => {
            let mut frames = 0;
            while frames < MAX_SETTLE_FRAMES && card.tick(FRAME) {
                frames += 1;
            }
            format!("settled after {} frames", frames)
        }
        TraceEvent::Tap { x } => {
            let target = card.frame().hit_test(*x);
            describe_tap(card.tap(target), target)
        }
        TraceEvent::TapBody => describe_tap(card.tap_body(), HitTarget::Body),
        TraceEvent::Press { id } => {
            let binding = card
                .frame()
                .buttons
                .iter()
                .find(|b| &b.id == id)
                .map(|b| b.binding)
                .ok_or_else(|| TraceError::UnknownAction {
                    step,
                    id: id.clone(),
                })?;
            format!("{:?}", card.press_action(binding)).to_lowercase()
        }
        TraceEvent::Close => {
            card.close();
            "closed".to_string()
        }
        TraceEvent::Focus => {
            focus.notify_focused();
            "focused".to_string()
        }
        TraceEvent::SetActions { actions } => {
            if card.set_actions(build_actions(actions.clone())) {
                format!("rebuilt at generation {}", card.generation().get())
            } else {
                "unchanged".to_string()
            }
        }
    };
    Ok(outcome)
}

fn describe_tap(outcome: TapOutcome, target: HitTarget) -> String {
    match outcome {
        TapOutcome::Action(PressOutcome::Pressed) => format!("pressed {:?}", target),
        TapOutcome::Action(other) => format!("press {:?}", other).to_lowercase(),
        TapOutcome::Dismissed => "dismissed".to_string(),
        TapOutcome::Forwarded => "forwarded to content".to_string(),
    }
}
