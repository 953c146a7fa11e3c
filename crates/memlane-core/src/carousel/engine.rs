//! L2 Organism Layer: Carousel position engine
//!
//! One engine drives every presentation style. It owns the unbounded target
//! position, the smoothed display position and the focused index derived
//! from it. Projection is left to [`super::CardLayoutProjector`].
//!
//! Positions are measured in items: position `p` means "item `p mod len`
//! is in focus", increasing positions move forward through the collection.

use std::time::Duration;

use tracing::debug;

use super::rate_limit::RateLimiter;
use super::smoother::PositionSmoother;
use super::wrap::{normalize_index, wrap_delta};
use crate::config::{EngineTuning, InputMode};

/// Callback run once for every change of the focused index
pub type IndexListener = Box<dyn FnMut(usize) + Send>;

#[derive(Debug, Clone)]
struct Autoplay {
    enabled: bool,
    interval: Duration,
    elapsed: Duration,
    suspended: bool,
}

impl Autoplay {
    fn running(&self, len: usize) -> bool {
        self.enabled && !self.suspended && len > 1 && !self.interval.is_zero()
    }
}

pub struct CarouselEngine {
    len: usize,
    tuning: EngineTuning,
    limiter: RateLimiter,
    smoother: PositionSmoother,
    focused: usize,
    autoplay: Autoplay,
    listeners: Vec<IndexListener>,
}

impl std::fmt::Debug for CarouselEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("len", &self.len)
            .field("target", &self.smoother.target())
            .field("display", &self.smoother.display())
            .field("focused", &self.focused)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CarouselEngine {
    /// Engine over `len` items, starting at rest on `start`
    pub fn new(len: usize, start: usize, tuning: EngineTuning) -> Self {
        let start = if len == 0 { 0 } else { start % len };
        Self {
            len,
            tuning,
            limiter: RateLimiter::new(tuning.min_interval_ms),
            smoother: PositionSmoother::new(tuning.smoothing, start as f64),
            focused: start,
            autoplay: Autoplay {
                enabled: false,
                interval: Duration::from_millis(6000),
                elapsed: Duration::ZERO,
                suspended: false,
            },
            listeners: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Currently focused item; 0 for an empty collection
    #[inline]
    pub fn focused_index(&self) -> usize {
        self.focused
    }

    #[inline]
    pub fn display(&self) -> f64 {
        self.smoother.display()
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.smoother.target()
    }

    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    /// True when the display has reached the target
    pub fn is_settled(&self) -> bool {
        self.smoother.is_settled()
    }

    /// Register a focused-index listener
    pub fn subscribe(&mut self, listener: IndexListener) {
        self.listeners.push(listener);
    }

    /// Swap the tuning (e.g. on a style change) keeping position and motion
    /// target
    pub fn set_tuning(&mut self, tuning: EngineTuning) {
        let display = self.smoother.display();
        let target = self.smoother.target();
        self.smoother = PositionSmoother::new(tuning.smoothing, display);
        self.smoother.set_target(target);
        self.limiter = RateLimiter::new(tuning.min_interval_ms);
        self.tuning = tuning;
    }

    /// Start over on a (possibly different) collection at rest on `start`.
    /// No stale fractional position carries over. Listeners hear about the
    /// new index when it differs from the old one.
    pub fn reset(&mut self, len: usize, start: usize) {
        self.len = len;
        let start = if len == 0 { 0 } else { start % len };
        self.smoother.jump_to(start as f64);
        self.limiter.reset();
        self.autoplay.elapsed = Duration::ZERO;
        if start != self.focused {
            self.set_focused(start);
        }
    }

    /// Set the target position directly
    pub fn set_target(&mut self, target: f64) {
        if self.is_empty() || !target.is_finite() {
            return;
        }
        self.smoother.set_target(target);
    }

    /// Wheel / trackpad input. Returns true if the event moved the target.
    pub fn continuous_input(&mut self, delta: f64, now_ms: u64) -> bool {
        if self.is_empty() || !delta.is_finite() {
            return false;
        }

        match self.tuning.input {
            InputMode::Continuous => {
                if !self.limiter.accept(now_ms) {
                    return false;
                }
                let moved = clamp_delta(delta, &self.tuning) * self.tuning.sensitivity;
                if !moved.is_finite() {
                    return false;
                }
                self.smoother.set_target(self.smoother.target() + moved);
                debug!(delta, moved, target = self.smoother.target(), "continuous input");
            }
            InputMode::Discrete { threshold } => {
                // Small deltas neither move nor consume the rate window
                if delta.abs() <= threshold || !self.limiter.accept(now_ms) {
                    return false;
                }
                let direction = if delta > 0.0 { 1 } else { -1 };
                self.smoother.set_target(self.smoother.target() + direction as f64);
                debug!(delta, direction, "discrete input step");
            }
        }
        self.autoplay.elapsed = Duration::ZERO;
        true
    }

    /// Move exactly `direction` items from the current target
    pub fn step(&mut self, direction: i64) {
        if self.is_empty() || direction == 0 {
            return;
        }
        self.smoother
            .set_target(self.smoother.target() + direction as f64);
        self.autoplay.elapsed = Duration::ZERO;
    }

    /// Navigate to `index` along the shortest way around the loop
    pub fn select(&mut self, index: usize) {
        if index >= self.len {
            debug!(index, len = self.len, "ignoring out of range select");
            return;
        }
        self.retarget_to(index);
        self.autoplay.elapsed = Duration::ZERO;
    }

    /// Follow an index set by an outside controller. Returns false when the
    /// engine is already headed there.
    pub fn sync_external_index(&mut self, index: usize) -> bool {
        if index >= self.len || normalize_index(self.smoother.target(), self.len) == index {
            return false;
        }
        self.retarget_to(index);
        true
    }

    fn retarget_to(&mut self, index: usize) {
        let base = self.smoother.target().round();
        let from = normalize_index(base, self.len);
        let delta = wrap_delta(from, index, self.len);
        self.smoother.set_target(base + delta as f64);
        debug!(from, to = index, delta, "retarget");
    }

    /// Enable or disable autoplay; the countdown restarts either way
    pub fn set_autoplay(&mut self, enabled: bool, duration_ms: u64) {
        self.autoplay.enabled = enabled;
        self.autoplay.interval = Duration::from_millis(duration_ms);
        self.autoplay.elapsed = Duration::ZERO;
    }

    /// Pause the autoplay countdown without forgetting the setting
    pub fn suspend_autoplay(&mut self, suspended: bool) {
        if self.autoplay.suspended != suspended {
            self.autoplay.suspended = suspended;
            self.autoplay.elapsed = Duration::ZERO;
        }
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.enabled
    }

    /// Fraction of the current autoplay interval already elapsed, in `[0, 1]`
    pub fn autoplay_progress(&self) -> f64 {
        if !self.autoplay.running(self.len) {
            return 0.0;
        }
        (self.autoplay.elapsed.as_secs_f64() / self.autoplay.interval.as_secs_f64()).min(1.0)
    }

    /// One autoplay advance: a single item forward
    pub fn autoplay_tick(&mut self) {
        if self.len > 1 {
            self.smoother.set_target(self.smoother.target() + 1.0);
        }
    }

    /// Advance time by `dt`: run autoplay, smooth the display and derive the
    /// focused index. Returns the new index when it changed.
    pub fn tick(&mut self, dt: Duration) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        if self.autoplay.running(self.len) {
            self.autoplay.elapsed += dt;
            while self.autoplay.elapsed >= self.autoplay.interval {
                self.autoplay.elapsed -= self.autoplay.interval;
                self.autoplay_tick();
            }
        }

        let display = self.smoother.tick(dt);
        let focused = normalize_index(display, self.len);
        if focused == self.focused {
            return None;
        }

        self.set_focused(focused);
        Some(focused)
    }

    fn set_focused(&mut self, focused: usize) {
        self.focused = focused;
        for listener in self.listeners.iter_mut() {
            listener(focused);
        }
    }
}

/// Clamp `delta` into the tuning's range, tolerating swapped or NaN bounds
fn clamp_delta(delta: f64, tuning: &EngineTuning) -> f64 {
    let (lo, hi) = if tuning.delta_min <= tuning.delta_max {
        (tuning.delta_min, tuning.delta_max)
    } else {
        (tuning.delta_max, tuning.delta_min)
    };
    delta.max(lo).min(hi)
}
