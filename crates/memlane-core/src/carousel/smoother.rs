//! L3 Molecular Layer: Display position smoothing
//!
//! The engine moves its target instantly; the smoother makes the displayed
//! position follow it, either by frame-rate independent exponential decay or
//! by integrating a mass-spring-damper.
//!
//! Positions are never wrapped here. Only the derived focused index is
//! normalized, so a retarget mid-animation never causes a jump.

use std::time::Duration;

use crate::config::Smoothing;

/// Reference frame length the decay factor is expressed against (60fps)
const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

/// Largest integration step for the spring; bigger `dt`s are sub-stepped
const MAX_SPRING_STEP_SECS: f64 = 1.0 / 240.0;

/// Spring is at rest when both offset and speed drop below these
const SPRING_REST_DELTA: f64 = 0.001;
const SPRING_REST_SPEED: f64 = 0.01;

/// Damping coefficient that makes a spring critically damped
pub fn critical_damping(stiffness: f64, mass: f64) -> f64 {
    2.0 * (stiffness.max(0.0001) * mass.max(0.0001)).sqrt()
}

/// Continuous display position chasing a target position
#[derive(Debug, Clone)]
pub struct PositionSmoother {
    strategy: Smoothing,
    display: f64,
    target: f64,
    /// Spring velocity in positions per second; always 0 for decay
    velocity: f64,
}

impl PositionSmoother {
    pub fn new(strategy: Smoothing, position: f64) -> Self {
        Self {
            strategy,
            display: position,
            target: position,
            velocity: 0.0,
        }
    }

    #[inline]
    pub fn display(&self) -> f64 {
        self.display
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn strategy(&self) -> &Smoothing {
        &self.strategy
    }

    /// Retarget without touching the displayed position or velocity
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Place both display and target at `position` and stop all motion
    pub fn jump_to(&mut self, position: f64) {
        self.display = position;
        self.target = position;
        self.velocity = 0.0;
    }

    /// True when the display has reached the target and nothing is moving
    pub fn is_settled(&self) -> bool {
        self.display == self.target && self.velocity == 0.0
    }

    /// Advance the display by `dt` and return it.
    ///
    /// Pure with respect to `(display, target, velocity, dt)`: rerunning a
    /// step from the same state yields the same result.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        let secs = dt.as_secs_f64();
        if secs <= 0.0 {
            return self.display;
        }

        match self.strategy {
            Smoothing::Decay { factor, epsilon } => self.step_decay(secs, factor, epsilon),
            Smoothing::Spring {
                stiffness,
                damping,
                mass,
            } => self.step_spring(secs, stiffness, damping, mass),
        }

        self.display
    }

    fn step_decay(&mut self, secs: f64, factor: f64, epsilon: f64) {
        let diff = self.target - self.display;
        if diff.abs() < epsilon.max(0.0) {
            self.display = self.target;
            return;
        }
        let factor = factor.clamp(1e-6, 1.0 - 1e-6);
        // Same convergence per second regardless of frame rate
        let frames = secs / REFERENCE_FRAME_SECS;
        let k = 1.0 - (1.0 - factor).powf(frames);
        self.display += diff * k;
    }

    fn step_spring(&mut self, secs: f64, stiffness: f64, damping: f64, mass: f64) {
        let k = stiffness.max(0.0001);
        let c = damping.max(0.0);
        let m = mass.max(0.0001);

        let steps = (secs / MAX_SPRING_STEP_SECS).ceil().max(1.0) as u32;
        let h = secs / steps as f64;
        for _ in 0..steps {
            let accel = (k * (self.target - self.display) - c * self.velocity) / m;
            self.velocity += accel * h;
            self.display += self.velocity * h;
        }

        if (self.target - self.display).abs() < SPRING_REST_DELTA
            && self.velocity.abs() < SPRING_REST_SPEED
        {
            self.display = self.target;
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn decay() -> Smoothing {
        Smoothing::Decay {
            factor: 0.1,
            epsilon: 0.005,
        }
    }

    fn critical_spring() -> Smoothing {
        Smoothing::Spring {
            stiffness: 120.0,
            damping: critical_damping(120.0, 1.0),
            mass: 1.0,
        }
    }

    #[test]
    fn test_decay_approaches_monotonically_without_overshoot() {
        let mut s = PositionSmoother::new(decay(), 0.0);
        s.set_target(4.0);
        let mut prev_gap = 4.0;
        for _ in 0..600 {
            let d = s.tick(FRAME);
            assert!(d <= 4.0, "overshot: {d}");
            let gap = 4.0 - d;
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
        assert!(s.is_settled());
        assert_eq!(s.display(), 4.0);
    }

    #[test]
    fn test_decay_backward_target() {
        let mut s = PositionSmoother::new(decay(), 0.0);
        s.set_target(-2.0);
        for _ in 0..600 {
            assert!(s.tick(FRAME) >= -2.0);
        }
        assert_eq!(s.display(), -2.0);
    }

    #[test]
    fn test_decay_is_frame_rate_independent() {
        let mut a = PositionSmoother::new(decay(), 0.0);
        let mut b = PositionSmoother::new(decay(), 0.0);
        a.set_target(10.0);
        b.set_target(10.0);
        for _ in 0..4 {
            a.tick(Duration::from_millis(25));
        }
        b.tick(Duration::from_millis(100));
        assert!((a.display() - b.display()).abs() < 1e-9);
    }

    #[test]
    fn test_retarget_mid_flight_keeps_display_continuous() {
        let mut s = PositionSmoother::new(decay(), 0.0);
        s.set_target(5.0);
        for _ in 0..10 {
            s.tick(FRAME);
        }
        let before = s.display();
        s.set_target(-3.0);
        assert_eq!(s.display(), before);
        let after = s.tick(FRAME);
        assert!(after < before);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut s = PositionSmoother::new(critical_spring(), 1.0);
        s.set_target(3.0);
        assert_eq!(s.tick(Duration::ZERO), 1.0);
        assert_eq!(s.velocity(), 0.0);
    }

    #[test]
    fn test_same_state_same_step() {
        let mut a = PositionSmoother::new(critical_spring(), 0.0);
        a.set_target(2.0);
        a.tick(FRAME);
        let mut b = a.clone();
        assert_eq!(a.tick(FRAME), b.tick(FRAME));
    }

    #[test]
    fn test_critical_spring_settles_in_finite_time() {
        for offset in [0.5, 3.0, -7.0, 40.0] {
            let mut s = PositionSmoother::new(critical_spring(), 0.0);
            s.set_target(offset);
            let mut frames = 0;
            while !s.is_settled() {
                s.tick(FRAME);
                frames += 1;
                assert!(frames < 60 * 10, "spring did not settle for offset {offset}");
            }
            assert_eq!(s.display(), offset);
        }
    }

    #[test]
    fn test_critical_spring_does_not_overshoot_from_rest() {
        let mut s = PositionSmoother::new(critical_spring(), 0.0);
        s.set_target(1.0);
        for _ in 0..300 {
            assert!(s.tick(FRAME) <= 1.0 + SPRING_REST_DELTA);
        }
    }

    #[test]
    fn test_overdamped_timeline_spring_settles() {
        let mut s = PositionSmoother::new(
            Smoothing::Spring {
                stiffness: 50.0,
                damping: 18.0,
                mass: 1.0,
            },
            0.0,
        );
        s.set_target(3.0);
        for _ in 0..60 * 10 {
            s.tick(FRAME);
        }
        assert!(s.is_settled());
    }

    #[test]
    fn test_jump_to_stops_motion() {
        let mut s = PositionSmoother::new(critical_spring(), 0.0);
        s.set_target(5.0);
        s.tick(FRAME);
        s.jump_to(2.0);
        assert!(s.is_settled());
        assert_eq!(s.target(), 2.0);
    }
}
