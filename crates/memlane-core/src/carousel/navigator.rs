//! L1 Page Layer: Session controller
//!
//! The presentation layer talks to a single [`Navigator`]. It wires the
//! boundary check, the hero/carousel mode controller and the engine together
//! in the order input must flow through them, and reports what happened
//! through an explicit event queue.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use super::boundary::{BoundaryHandler, Mode, ModeController, TransitionSignal};
use super::engine::CarouselEngine;
use super::projector::{CardLayout, CardLayoutProjector};
use crate::config::{AppConfig, CarouselOverrides, CarouselStyle, HeroConfig};
use crate::memory::CollectionId;

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorEvent {
    IndexChanged(usize),
    ModeChanged(Mode),
}

/// What became of one scroll / click event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The carousel target moved
    Moved,
    /// Dropped (rate limited, below threshold, wrong mode or torn down)
    Ignored,
    /// Consumed by a mode transition; `scheduled` is false when a cooldown
    /// suppressed it
    Transition {
        signal: TransitionSignal,
        scheduled: bool,
    },
}

pub struct Navigator {
    engine: CarouselEngine,
    boundary: BoundaryHandler,
    modes: ModeController,
    enter_threshold: f64,
    style: CarouselStyle,
    overrides: CarouselOverrides,
    projector: Box<dyn CardLayoutProjector>,
    collection: CollectionId,
    events: VecDeque<NavigatorEvent>,
    torn_down: bool,
}

impl Navigator {
    /// Navigator over a collection of `len` items, set up from `config`
    pub fn new(len: usize, collection: CollectionId, config: &AppConfig) -> Self {
        let initial = if config.hero.start_in_hero {
            Mode::Hero
        } else {
            Mode::Carousel
        };
        let mut navigator = Self::with_settings(
            len,
            collection,
            config.ui.carousel_style,
            config.carousel.clone(),
            &config.hero,
            initial,
        );
        navigator.set_autoplay(
            config.autoplay.enabled,
            config.autoplay.effective_duration_ms(),
        );
        navigator
    }

    pub fn with_settings(
        len: usize,
        collection: CollectionId,
        style: CarouselStyle,
        overrides: CarouselOverrides,
        hero: &HeroConfig,
        initial: Mode,
    ) -> Self {
        let mut engine = CarouselEngine::new(len, 0, overrides.tuning(style));
        engine.suspend_autoplay(initial == Mode::Hero);
        Self {
            engine,
            boundary: BoundaryHandler::new(hero.exit_threshold),
            modes: ModeController::new(initial, hero),
            enter_threshold: hero.enter_threshold.abs(),
            style,
            projector: style.projector(),
            overrides,
            collection,
            events: VecDeque::new(),
            torn_down: false,
        }
    }

    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn style(&self) -> CarouselStyle {
        self.style
    }

    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    pub fn focused_index(&self) -> usize {
        self.engine.focused_index()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Wheel / trackpad input
    pub fn handle_scroll(&mut self, delta: f64, now_ms: u64) -> InputOutcome {
        if self.torn_down || self.engine.is_empty() {
            return InputOutcome::Ignored;
        }

        match self.modes.mode() {
            Mode::Hero => {
                if delta > self.enter_threshold {
                    self.request(TransitionSignal::EnterCarousel, now_ms)
                } else {
                    InputOutcome::Ignored
                }
            }
            Mode::Carousel => {
                // A boundary event never reaches the limiter or the engine
                if let Some(signal) = self
                    .boundary
                    .check_boundary(self.engine.focused_index(), delta)
                {
                    return self.request(signal, now_ms);
                }
                if self.engine.continuous_input(delta, now_ms) {
                    InputOutcome::Moved
                } else {
                    InputOutcome::Ignored
                }
            }
        }
    }

    /// Click anywhere on the cover view
    pub fn handle_click(&mut self, now_ms: u64) -> InputOutcome {
        if self.torn_down || self.engine.is_empty() || self.modes.mode() != Mode::Hero {
            return InputOutcome::Ignored;
        }
        self.request(TransitionSignal::EnterCarousel, now_ms)
    }

    fn request(&mut self, signal: TransitionSignal, now_ms: u64) -> InputOutcome {
        let scheduled = self.modes.request(signal, now_ms).is_some();
        InputOutcome::Transition { signal, scheduled }
    }

    pub fn step(&mut self, direction: i64) {
        if !self.torn_down {
            self.engine.step(direction);
        }
    }

    pub fn select(&mut self, index: usize) {
        if !self.torn_down {
            self.engine.select(index);
        }
    }

    pub fn sync_external_index(&mut self, index: usize) -> bool {
        !self.torn_down && self.engine.sync_external_index(index)
    }

    pub fn set_autoplay(&mut self, enabled: bool, duration_ms: u64) {
        if !self.torn_down {
            self.engine.set_autoplay(enabled, duration_ms);
        }
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.engine.autoplay_enabled()
    }

    /// Explicit jump to the cover view or the carousel
    pub fn show(&mut self, mode: Mode, now_ms: u64) {
        if self.torn_down {
            return;
        }
        if self.modes.force(mode, now_ms) {
            self.mode_changed(mode);
        }
    }

    /// Switch presentation style, keeping the current position
    pub fn set_style(&mut self, style: CarouselStyle) {
        if style == self.style {
            return;
        }
        self.style = style;
        self.projector = style.projector();
        self.engine.set_tuning(self.overrides.tuning(style));
        debug!(style = style.name(), "carousel style changed");
    }

    /// Advance one frame: fire due transitions, run autoplay and smoothing
    pub fn tick(&mut self, dt: Duration, now_ms: u64) {
        if self.torn_down {
            return;
        }
        if let Some(mode) = self.modes.poll(now_ms) {
            self.mode_changed(mode);
        }
        if let Some(index) = self.engine.tick(dt) {
            self.events.push_back(NavigatorEvent::IndexChanged(index));
        }
    }

    fn mode_changed(&mut self, mode: Mode) {
        info!(?mode, "mode changed");
        self.engine.suspend_autoplay(mode == Mode::Hero);
        self.events.push_back(NavigatorEvent::ModeChanged(mode));
    }

    /// Point the navigator at another collection. A different identity or
    /// size resets the position to `start`; returns whether it did.
    pub fn replace_collection(&mut self, len: usize, collection: CollectionId, start: usize) -> bool {
        if self.torn_down || (collection == self.collection && len == self.engine.len()) {
            return false;
        }
        let before = self.engine.focused_index();
        self.collection = collection;
        self.engine.reset(len, start);
        self.modes.cancel();
        if self.engine.focused_index() != before {
            self.events
                .push_back(NavigatorEvent::IndexChanged(self.engine.focused_index()));
        }
        debug!(len, start, "collection replaced");
        true
    }

    /// Stop everything. Pending transitions are cancelled and every later
    /// call is a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.modes.cancel();
        self.engine.set_autoplay(false, 0);
        self.events.clear();
        self.torn_down = true;
        info!("navigator torn down");
    }

    /// Take all queued events in the order they happened
    pub fn drain_events(&mut self) -> Vec<NavigatorEvent> {
        self.events.drain(..).collect()
    }

    /// Layout of one card at the current display position
    pub fn layout(&self, index: usize) -> Option<CardLayout> {
        self.projector
            .project(index, self.engine.display(), self.engine.len())
    }

    /// Layouts of every card in paint order
    pub fn layouts(&self) -> Vec<(usize, CardLayout)> {
        self.projector
            .project_all(self.engine.display(), self.engine.len())
    }
}
