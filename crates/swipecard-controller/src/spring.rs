//! Damped spring used for every settle animation.
//!
//! Tension/friction are converted to stiffness/damping with the same
//! mapping mobile animation libraries use, then integrated with fixed
//! sub-steps so results do not depend on the host's frame rate.

use std::time::Duration;

use swipecard_core::SpringConfig;

/// Integration sub-step, seconds.
const STEP: f32 = 0.001;
/// Distance from target below which the spring may rest.
const REST_DISPLACEMENT: f32 = 0.001;
/// Speed below which the spring may rest.
const REST_SPEED: f32 = 0.001;

/// Spring physics in stiffness/damping form (mass 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring {
    /// Convert tension/friction to stiffness/damping.
    pub fn from_config(config: SpringConfig) -> Self {
        Self {
            stiffness: (config.tension - 30.0) * 3.62 + 194.0,
            damping: (config.friction - 8.0) * 3.0 + 25.0,
        }
    }
}

/// What to do to the animated value once the spring rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Leave the value at the target.
    Settle,
    /// Re-sync both components of the value to exactly zero.
    HardReset,
}

/// An in-flight spring toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringAnimation {
    spring: Spring,
    target: f32,
    velocity: f32,
    completion: Completion,
}

impl SpringAnimation {
    /// Start a spring from rest.
    pub fn new(spring: Spring, target: f32, completion: Completion) -> Self {
        Self {
            spring,
            target,
            velocity: 0.0,
            completion,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Advance `position` by `dt`, keeping it within `[min, max]`.
    ///
    /// Returns `true` once the spring has come to rest; `position` is then
    /// exactly `target`.
    pub fn step(&mut self, position: &mut f32, dt: Duration, min: f32, max: f32) -> bool {
        let mut remaining = dt.as_secs_f32();

        while remaining > 0.0 {
            if self.at_rest(*position) {
                break;
            }
            let h = remaining.min(STEP);
            remaining -= h;

            let spring_force = self.spring.stiffness * (self.target - *position);
            let damping_force = -self.spring.damping * self.velocity;
            self.velocity += (spring_force + damping_force) * h;
            *position += self.velocity * h;

            if *position < min || *position > max {
                *position = position.clamp(min, max);
                self.velocity = 0.0;
            }
        }

        if self.at_rest(*position) {
            *position = self.target;
            self.velocity = 0.0;
            true
        } else {
            false
        }
    }

    fn at_rest(&self, position: f32) -> bool {
        (position - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(anim: &mut SpringAnimation, position: &mut f32, min: f32, max: f32) -> usize {
        for frame in 1..=600 {
            if anim.step(position, Duration::from_millis(16), min, max) {
                return frame;
            }
        }
        panic!("spring did not settle");
    }

    #[test]
    fn test_default_conversion() {
        let spring = Spring::from_config(SpringConfig::default());
        assert!((spring.stiffness - 447.4).abs() < 1e-3);
        assert_eq!(spring.damping, 25.0);
    }

    #[test]
    fn test_settles_exactly_on_target() {
        let spring = Spring::from_config(SpringConfig::default());
        let mut anim = SpringAnimation::new(spring, -140.0, Completion::Settle);
        let mut x = -65.0;

        run(&mut anim, &mut x, -140.0, 0.0);
        assert_eq!(x, -140.0);
    }

    #[test]
    fn test_never_leaves_range() {
        let spring = Spring::from_config(SpringConfig::default());
        let mut anim = SpringAnimation::new(spring, 0.0, Completion::HardReset);
        let mut x = -140.0;

        for _ in 0..600 {
            let done = anim.step(&mut x, Duration::from_millis(4), -140.0, 0.0);
            assert!((-140.0..=0.0).contains(&x), "out of range: {}", x);
            if done {
                break;
            }
        }
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_overdamped_still_settles() {
        let spring = Spring::from_config(SpringConfig {
            tension: 40.0,
            friction: 30.0,
        });
        let mut anim = SpringAnimation::new(spring, 0.0, Completion::Settle);
        let mut x = -30.0;

        run(&mut anim, &mut x, -140.0, 0.0);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_already_at_target_rests_immediately() {
        let spring = Spring::from_config(SpringConfig::default());
        let mut anim = SpringAnimation::new(spring, 0.0, Completion::Settle);
        let mut x = 0.0;

        assert!(anim.step(&mut x, Duration::ZERO, -140.0, 0.0));
    }
}
