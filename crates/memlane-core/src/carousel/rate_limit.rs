//! L4 Atomic Layer: Input throttling
//!
//! Wheel and trackpad input arrives far faster than the carousel can show
//! meaningful motion. The limiter drops events that arrive within
//! `min_interval_ms` of the last accepted one.

/// Gate that admits at most one input event per `min_interval_ms`.
///
/// Timestamps are milliseconds on any monotonic clock the caller owns.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval_ms: u64,
    /// Timestamp of the last accepted event; `None` while cold
    last_accepted_ms: Option<u64>,
}

impl RateLimiter {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// Returns true and records `now_ms` if enough time has passed since the
    /// last accepted event. Rejected events leave the state untouched.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        let admitted = match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.min_interval_ms,
        };
        if admitted {
            self.last_accepted_ms = Some(now_ms);
        }
        admitted
    }

    /// Forget the last accepted event so the next one is always admitted
    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }
}
