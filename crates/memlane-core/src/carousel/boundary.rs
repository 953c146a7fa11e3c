//! L3 Molecular Layer: Cover view <-> carousel transitions
//!
//! [`BoundaryHandler`] decides whether an input event at the start of the
//! collection leaves the carousel. [`ModeController`] owns the current
//! [`Mode`] and turns transition signals into delayed, cooldown-gated mode
//! switches. Pending switches carry a generation so a cancelled one can
//! never fire later.

use tracing::debug;

use crate::config::HeroConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Non-navigable cover presentation
    #[default]
    Hero,
    /// Live carousel
    Carousel,
}

/// Request to change mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSignal {
    ShowHero,
    EnterCarousel,
}

impl TransitionSignal {
    pub fn destination(&self) -> Mode {
        match self {
            TransitionSignal::ShowHero => Mode::Hero,
            TransitionSignal::EnterCarousel => Mode::Carousel,
        }
    }
}

/// Detects "backward past the first item"
#[derive(Debug, Clone, Copy)]
pub struct BoundaryHandler {
    exit_threshold: f64,
}

impl BoundaryHandler {
    pub fn new(exit_threshold: f64) -> Self {
        Self {
            exit_threshold: exit_threshold.abs(),
        }
    }

    /// Signal a return to the cover view when the first item is focused and
    /// `delta` points backward by more than the threshold. Must run before
    /// the event reaches the rate limiter or the engine.
    pub fn check_boundary(&self, focused: usize, delta: f64) -> Option<TransitionSignal> {
        if focused == 0 && delta < -self.exit_threshold {
            Some(TransitionSignal::ShowHero)
        } else {
            None
        }
    }
}

/// Handle to a scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket {
    generation: u64,
    pub to: Mode,
    pub due_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    delay_ms: u64,
    cooldown_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    enter: Timing,
    exit: Timing,
    pending: Option<TransitionTicket>,
    generation: u64,
    /// No new transition is accepted before this instant
    cooldown_until_ms: u64,
}

impl ModeController {
    pub fn new(initial: Mode, config: &HeroConfig) -> Self {
        Self {
            mode: initial,
            enter: Timing {
                delay_ms: config.enter_delay_ms,
                cooldown_ms: config.enter_cooldown_ms,
            },
            exit: Timing {
                delay_ms: config.exit_delay_ms,
                cooldown_ms: config.exit_cooldown_ms,
            },
            pending: None,
            generation: 0,
            cooldown_until_ms: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending(&self) -> Option<TransitionTicket> {
        self.pending
    }

    /// True while a transition is scheduled or its cooldown is running
    pub fn is_busy(&self, now_ms: u64) -> bool {
        self.pending.is_some() || now_ms < self.cooldown_until_ms
    }

    /// Schedule the transition described by `signal`. Ignored when it would
    /// not change the mode or while a previous transition is still busy.
    pub fn request(&mut self, signal: TransitionSignal, now_ms: u64) -> Option<TransitionTicket> {
        let to = signal.destination();
        if to == self.mode {
            return None;
        }
        if self.is_busy(now_ms) {
            debug!(?signal, now_ms, "transition suppressed by cooldown");
            return None;
        }
        let timing = self.timing(to);
        let ticket = TransitionTicket {
            generation: self.generation,
            to,
            due_ms: now_ms.saturating_add(timing.delay_ms),
        };
        self.pending = Some(ticket);
        debug!(?to, due_ms = ticket.due_ms, "transition scheduled");
        Some(ticket)
    }

    /// Apply `ticket` if it is still the live pending transition. Stale
    /// tickets are a no-op.
    pub fn fire(&mut self, ticket: TransitionTicket) -> Option<Mode> {
        match self.pending {
            Some(pending) if pending == ticket && ticket.generation == self.generation => {
                self.pending = None;
                self.mode = ticket.to;
                self.cooldown_until_ms = ticket
                    .due_ms
                    .saturating_add(self.timing(ticket.to).cooldown_ms);
                Some(ticket.to)
            }
            _ => {
                debug!(?ticket, "stale transition ignored");
                None
            }
        }
    }

    /// Fire the pending transition once it is due
    pub fn poll(&mut self, now_ms: u64) -> Option<Mode> {
        let ticket = self.pending.filter(|t| now_ms >= t.due_ms)?;
        self.fire(ticket)
    }

    /// Drop any pending transition; its ticket becomes stale
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Switch immediately (explicit user intent), cancelling anything pending
    pub fn force(&mut self, mode: Mode, now_ms: u64) -> bool {
        self.cancel();
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.cooldown_until_ms = now_ms.saturating_add(self.timing(mode).cooldown_ms);
        true
    }

    fn timing(&self, to: Mode) -> Timing {
        match to {
            Mode::Carousel => self.enter,
            Mode::Hero => self.exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(initial: Mode) -> ModeController {
        ModeController::new(initial, &HeroConfig::default())
    }

    #[test]
    fn test_boundary_only_at_first_item() {
        let boundary = BoundaryHandler::new(30.0);
        assert_eq!(
            boundary.check_boundary(0, -31.0),
            Some(TransitionSignal::ShowHero)
        );
        assert_eq!(boundary.check_boundary(1, -31.0), None);
        assert_eq!(boundary.check_boundary(0, -30.0), None);
        assert_eq!(boundary.check_boundary(0, 80.0), None);
    }

    #[test]
    fn test_enter_carousel_after_delay() {
        let mut modes = controller(Mode::Hero);
        let ticket = modes.request(TransitionSignal::EnterCarousel, 1_000).unwrap();
        assert_eq!(ticket.due_ms, 1_100);
        assert_eq!(modes.poll(1_099), None);
        assert_eq!(modes.mode(), Mode::Hero);
        assert_eq!(modes.poll(1_100), Some(Mode::Carousel));
        assert_eq!(modes.mode(), Mode::Carousel);
    }

    #[test]
    fn test_cooldown_blocks_immediate_return() {
        let mut modes = controller(Mode::Hero);
        modes.request(TransitionSignal::EnterCarousel, 0);
        modes.poll(100);
        // Enter cooldown runs until 100 + 1000
        assert!(modes.request(TransitionSignal::ShowHero, 500).is_none());
        assert!(modes.request(TransitionSignal::ShowHero, 1_099).is_none());
        let ticket = modes.request(TransitionSignal::ShowHero, 1_100).unwrap();
        assert_eq!(ticket.due_ms, 1_150);
        assert_eq!(modes.poll(1_150), Some(Mode::Hero));
        assert!(modes.is_busy(1_150 + 1_199));
        assert!(!modes.is_busy(1_150 + 1_200));
    }

    #[test]
    fn test_repeated_requests_schedule_once() {
        let mut modes = controller(Mode::Hero);
        assert!(modes.request(TransitionSignal::EnterCarousel, 0).is_some());
        assert!(modes.request(TransitionSignal::EnterCarousel, 10).is_none());
        assert!(modes.request(TransitionSignal::ShowHero, 10).is_none());
    }

    #[test]
    fn test_cancelled_ticket_never_fires() {
        let mut modes = controller(Mode::Hero);
        let ticket = modes.request(TransitionSignal::EnterCarousel, 0).unwrap();
        modes.cancel();
        assert_eq!(modes.fire(ticket), None);
        assert_eq!(modes.poll(10_000), None);
        assert_eq!(modes.mode(), Mode::Hero);
        // A fresh request after cancellation is not blocked
        assert!(modes.request(TransitionSignal::EnterCarousel, 20).is_some());
        assert_eq!(modes.fire(ticket), None);
    }

    #[test]
    fn test_force_switches_and_cancels_pending() {
        let mut modes = controller(Mode::Carousel);
        let ticket = modes.request(TransitionSignal::ShowHero, 0).unwrap();
        assert!(!modes.force(Mode::Carousel, 10));
        assert_eq!(modes.fire(ticket), None);
        assert!(modes.force(Mode::Hero, 20));
        assert_eq!(modes.mode(), Mode::Hero);
    }
}
