use std::time::Duration;

use memlane_core::carousel::{
    wrap_delta, CarouselEngine, InputOutcome, Mode, Navigator, NavigatorEvent, TransitionSignal,
};
use memlane_core::config::{CarouselOverrides, CarouselStyle, EngineTuning, HeroConfig};
use memlane_core::memory::{CollectionId, MemoryStore};
use memlane_core::AppConfig;

const FRAME: Duration = Duration::from_millis(16);

fn carousel_navigator(len: usize, style: CarouselStyle) -> Navigator {
    Navigator::with_settings(
        len,
        CollectionId::new(),
        style,
        CarouselOverrides::default(),
        &HeroConfig::default(),
        Mode::Carousel,
    )
}

fn settle(nav: &mut Navigator, mut now_ms: u64) -> (u64, Vec<NavigatorEvent>) {
    let mut events = Vec::new();
    for _ in 0..60 * 20 {
        now_ms += 16;
        nav.tick(FRAME, now_ms);
        events.extend(nav.drain_events());
        if nav.engine().is_settled() {
            break;
        }
    }
    assert!(nav.engine().is_settled());
    (now_ms, events)
}

#[test]
fn select_takes_the_short_way_around() {
    assert_eq!(wrap_delta(0, 4, 6), -2);

    for style in CarouselStyle::ALL {
        let mut nav = carousel_navigator(6, style);
        nav.select(4);
        let (_, events) = settle(&mut nav, 0);

        assert_eq!(nav.focused_index(), 4, "{:?}", style);
        assert!((nav.engine().display() - -2.0).abs() < 1e-9, "{:?}", style);
        // Went 0 -> 5 -> 4, never through 1..3
        assert_eq!(
            events,
            vec![
                NavigatorEvent::IndexChanged(5),
                NavigatorEvent::IndexChanged(4)
            ],
            "{:?}",
            style
        );
    }
}

#[test]
fn autoplay_cycles_back_to_start() {
    let mut engine = CarouselEngine::new(3, 0, EngineTuning::for_style(CarouselStyle::Orbit));
    engine.set_autoplay(true, 1000);

    let mut changes = Vec::new();
    for _ in 0..300 {
        if let Some(i) = engine.tick(Duration::from_millis(10)) {
            changes.push(i);
        }
    }
    assert_eq!(engine.target(), 3.0);

    engine.set_autoplay(false, 1000);
    for _ in 0..60 * 10 {
        if let Some(i) = engine.tick(FRAME) {
            changes.push(i);
        }
    }
    assert!(engine.is_settled());
    assert_eq!(engine.focused_index(), 0);
    assert_eq!(changes, vec![1, 2, 0]);
}

#[test]
fn boundary_only_fires_on_first_item() {
    let mut nav = carousel_navigator(6, CarouselStyle::Orbit);
    let outcome = nav.handle_scroll(-60.0, 10_000);
    assert_eq!(
        outcome,
        InputOutcome::Transition {
            signal: TransitionSignal::ShowHero,
            scheduled: true
        }
    );
    assert_eq!(nav.engine().target(), 0.0);

    let mut nav = carousel_navigator(6, CarouselStyle::Orbit);
    nav.select(1);
    let (now, _) = settle(&mut nav, 0);
    assert_eq!(nav.focused_index(), 1);
    let target = nav.engine().target();
    assert_eq!(nav.handle_scroll(-60.0, now + 10_000), InputOutcome::Moved);
    assert!(nav.engine().target() < target);
    assert_eq!(nav.mode(), Mode::Carousel);
}

#[test]
fn focused_index_does_not_oscillate_at_rest() {
    for style in CarouselStyle::ALL {
        let mut nav = carousel_navigator(5, style);
        nav.step(2);
        let (mut now, _) = settle(&mut nav, 0);
        let focused = nav.focused_index();
        for _ in 0..300 {
            now += 16;
            nav.tick(FRAME, now);
            assert_eq!(nav.focused_index(), focused, "{:?}", style);
        }
        assert!(nav.drain_events().is_empty());
    }
}

#[test]
fn hero_round_trip_with_cooldowns() {
    let config = AppConfig::default();
    let store = MemoryStore::samples();
    let mut nav = Navigator::new(store.len(), store.collection_id(), &config);
    assert_eq!(nav.mode(), Mode::Hero);

    nav.handle_scroll(80.0, 0);
    let (now, events) = settle_time(&mut nav, 0, 200);
    assert_eq!(events, vec![NavigatorEvent::ModeChanged(Mode::Carousel)]);

    // Still inside the enter cooldown: consumed but not scheduled
    assert_eq!(
        nav.handle_scroll(-80.0, now),
        InputOutcome::Transition {
            signal: TransitionSignal::ShowHero,
            scheduled: false
        }
    );
    let (now, _) = settle_time(&mut nav, now, 1_000);
    assert_eq!(nav.mode(), Mode::Carousel);

    assert!(matches!(
        nav.handle_scroll(-80.0, now),
        InputOutcome::Transition { scheduled: true, .. }
    ));
    let (_, events) = settle_time(&mut nav, now, 100);
    assert_eq!(events, vec![NavigatorEvent::ModeChanged(Mode::Hero)]);
}

fn settle_time(nav: &mut Navigator, mut now_ms: u64, duration_ms: u64) -> (u64, Vec<NavigatorEvent>) {
    let end = now_ms + duration_ms;
    let mut events = Vec::new();
    while now_ms < end {
        now_ms += 16;
        nav.tick(FRAME, now_ms);
        events.extend(nav.drain_events());
    }
    (now_ms, events)
}
