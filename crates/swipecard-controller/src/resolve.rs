//! Release-time state machine.
//!
//! Maps the final drag distance, the flattened offset and the current state
//! to one of the two stable states plus the offset to spring toward.

use swipecard_core::RevealState;

/// Everything the policy looks at when the finger lifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseInput {
    /// Final cumulative horizontal displacement.
    pub dx: f32,
    /// Flattened offset at release.
    pub live: f32,
    /// State before this release.
    pub state: RevealState,
    /// Full width of the action row.
    pub reveal_width: f32,
    /// Distance that counts as a deliberate swipe.
    pub swipe_threshold: f32,
}

/// Which rule fired, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseRule {
    /// Deliberate leftward swipe from a mostly-closed position.
    Open,
    /// Deliberate rightward swipe, or dragged past halfway, while revealed.
    Close,
    /// Rightward release on a closed card.
    SnapBackClosed,
    /// Not enough movement; return to the current state.
    Hold,
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub rule: ReleaseRule,
    /// State after the release.
    pub state: RevealState,
    /// Offset to animate to.
    pub target: f32,
}

impl Resolution {
    /// Only a user-driven open transition notifies the owner.
    pub fn fires_open(&self) -> bool {
        matches!(self.rule, ReleaseRule::Open)
    }
}

/// Resolve a release. Rules are evaluated top to bottom.
pub fn resolve(input: ReleaseInput) -> Resolution {
    let ReleaseInput {
        dx,
        live,
        state,
        reveal_width,
        swipe_threshold,
    } = input;
    let halfway = -reveal_width / 2.0;

    if dx < -swipe_threshold && live > halfway {
        return Resolution {
            rule: ReleaseRule::Open,
            state: RevealState::Revealed,
            target: -reveal_width,
        };
    }

    if state.is_revealed() && (dx > swipe_threshold || live > halfway) {
        return Resolution {
            rule: ReleaseRule::Close,
            state: RevealState::Closed,
            target: 0.0,
        };
    }

    if !state.is_revealed() && dx > 0.0 {
        return Resolution {
            rule: ReleaseRule::SnapBackClosed,
            state: RevealState::Closed,
            target: 0.0,
        };
    }

    Resolution {
        rule: ReleaseRule::Hold,
        state,
        target: state.canonical_offset(reveal_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(dx: f32, live: f32, state: RevealState) -> Resolution {
        resolve(ReleaseInput {
            dx,
            live,
            state,
            reveal_width: 140.0,
            swipe_threshold: 60.0,
        })
    }

    #[test]
    fn test_open_past_threshold() {
        let r = release(-65.0, -65.0, RevealState::Closed);
        assert_eq!(r.rule, ReleaseRule::Open);
        assert_eq!(r.state, RevealState::Revealed);
        assert_eq!(r.target, -140.0);
        assert!(r.fires_open());
    }

    #[test]
    fn test_short_drag_holds_closed() {
        let r = release(-30.0, -30.0, RevealState::Closed);
        assert_eq!(r.rule, ReleaseRule::Hold);
        assert_eq!(r.state, RevealState::Closed);
        assert_eq!(r.target, 0.0);
        assert!(!r.fires_open());
    }

    #[test]
    fn test_long_drag_past_halfway_holds_closed() {
        // Offset already beyond halfway fails the open rule's second clause.
        let r = release(-100.0, -100.0, RevealState::Closed);
        assert_eq!(r.rule, ReleaseRule::Hold);
        assert_eq!(r.state, RevealState::Closed);
        assert_eq!(r.target, 0.0);
    }

    #[test]
    fn test_close_by_swipe_right() {
        let r = release(65.0, -75.0, RevealState::Revealed);
        assert_eq!(r.rule, ReleaseRule::Close);
        assert_eq!(r.target, 0.0);
    }

    #[test]
    fn test_close_past_halfway() {
        let r = release(40.0, -100.0 + 40.0, RevealState::Revealed);
        assert_eq!(r.rule, ReleaseRule::Close);
        assert_eq!(r.state, RevealState::Closed);
    }

    #[test]
    fn test_small_drag_holds_revealed_without_firing() {
        let r = release(20.0, -120.0, RevealState::Revealed);
        assert_eq!(r.rule, ReleaseRule::Hold);
        assert_eq!(r.state, RevealState::Revealed);
        assert_eq!(r.target, -140.0);
        assert!(!r.fires_open());
    }

    #[test]
    fn test_rightward_on_closed_snaps_back() {
        let r = release(40.0, 0.0, RevealState::Closed);
        assert_eq!(r.rule, ReleaseRule::SnapBackClosed);
        assert_eq!(r.target, 0.0);
    }

    #[test]
    fn test_open_rule_evaluated_first() {
        // Open wins over the halfway close clause when both match.
        let r = release(-70.0, -60.0, RevealState::Revealed);
        assert_eq!(r.rule, ReleaseRule::Open);
    }
}
