//! L2 Organism Layer: Per-card visual parameters
//!
//! A projector turns "item `index` while the carousel shows position
//! `display`" into a [`CardLayout`]. All styles share the same contract:
//!
//! - spatial offset grows with `|diff|`
//! - scale and opacity never increase with `|diff|`, blur never decreases
//! - every value is clamped to its floor / ceiling
//! - stacking order is highest for the closest card
//! - everything is continuous in `display`, including at `diff == 0`
//!
//! Offsets are in abstract pixels; the presentation layer scales them.

use super::wrap::wrap_offset;
use crate::config::{CarouselStyle, EngineTuning};

/// Visual parameters for one card at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    /// Shortest signed offset of the card from the display position, in items
    pub diff: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Distance toward the viewer (positive is closer)
    pub depth: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
    pub blur: f64,
    pub z_index: i32,
}

impl CardLayout {
    /// The card nearest to the display position
    pub fn is_focused(&self) -> bool {
        self.diff.abs() < 0.5
    }
}

/// Strategy that places cards for one presentation style
pub trait CardLayoutProjector: Send + Sync {
    fn style(&self) -> CarouselStyle;

    /// Layout for a card `diff` items away from focus on a loop of `len`
    fn layout(&self, diff: f64, len: usize) -> CardLayout;

    /// Layout for item `index` while the carousel displays `display`.
    /// Nothing is projected for an empty collection.
    fn project(&self, index: usize, display: f64, len: usize) -> Option<CardLayout> {
        if len == 0 || index >= len {
            return None;
        }
        let diff = wrap_offset(index as f64 - display, len);
        Some(self.layout(diff, len))
    }

    /// Every card of the collection in paint order (back to front)
    fn project_all(&self, display: f64, len: usize) -> Vec<(usize, CardLayout)> {
        let mut cards: Vec<(usize, CardLayout)> = (0..len)
            .filter_map(|i| self.project(i, display, len).map(|l| (i, l)))
            .collect();
        cards.sort_by(|a, b| {
            a.1.z_index
                .cmp(&b.1.z_index)
                .then_with(|| b.1.diff.abs().total_cmp(&a.1.diff.abs()))
        });
        cards
    }
}

fn stacking(distance: f64) -> i32 {
    (100.0 - distance).round() as i32
}

/// Ring of cards rotating around the viewer
#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitProjector;

impl OrbitProjector {
    pub const RADIUS: f64 = 550.0;
    pub const WAVE_AMPLITUDE: f64 = 80.0;
    pub const WAVE_LIFT: f64 = 40.0;
    pub const MAX_BLUR: f64 = 6.0;
    pub const MIN_OPACITY: f64 = 0.35;
    pub const MIN_SCALE: f64 = 0.75;
}

impl CardLayoutProjector for OrbitProjector {
    fn style(&self) -> CarouselStyle {
        CarouselStyle::Orbit
    }

    fn layout(&self, diff: f64, len: usize) -> CardLayout {
        let angle = diff * 360.0 / len.max(1) as f64;
        let rad = angle.to_radians();
        let distance = angle.abs();
        CardLayout {
            diff,
            offset_x: rad.sin() * Self::RADIUS,
            offset_y: rad.sin() * Self::WAVE_AMPLITUDE + (rad / 2.0).cos() * Self::WAVE_LIFT,
            depth: rad.cos() * Self::RADIUS,
            rotation_deg: angle,
            scale: (0.85 + rad.cos() * 0.15).max(Self::MIN_SCALE),
            opacity: (1.0 - distance / 180.0).max(Self::MIN_OPACITY),
            blur: (distance / 18.0).min(Self::MAX_BLUR),
            z_index: stacking(distance),
        }
    }
}

/// Horizontal timeline, cards spaced evenly along a line
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineProjector;

impl TimelineProjector {
    pub const SPACING: f64 = 280.0;
}

impl CardLayoutProjector for TimelineProjector {
    fn style(&self) -> CarouselStyle {
        CarouselStyle::Timeline
    }

    fn layout(&self, diff: f64, _len: usize) -> CardLayout {
        let d = diff.abs();
        CardLayout {
            diff,
            offset_x: diff * Self::SPACING,
            offset_y: 0.0,
            depth: -d,
            rotation_deg: 0.0,
            scale: (1.0 - d * 0.1).max(0.7),
            opacity: (1.0 - d * 0.18).max(0.3),
            blur: (d * 2.0).min(5.0),
            z_index: stacking(d * 10.0),
        }
    }
}

/// Wide horizontal strip with stronger falloff
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowProjector;

impl FlowProjector {
    /// Card width plus gap
    pub const SPACING: f64 = 360.0;
}

impl CardLayoutProjector for FlowProjector {
    fn style(&self) -> CarouselStyle {
        CarouselStyle::Flow
    }

    fn layout(&self, diff: f64, _len: usize) -> CardLayout {
        let d = diff.abs();
        CardLayout {
            diff,
            offset_x: diff * Self::SPACING,
            offset_y: 0.0,
            depth: -d,
            rotation_deg: 0.0,
            scale: (1.0 - d * 0.12).max(0.7),
            opacity: (1.0 - d * 0.25).max(0.3),
            blur: (d * 3.0).min(8.0),
            z_index: stacking(d * 10.0),
        }
    }
}

/// Pile of cards; the focused one on top, neighbours peeking out tilted
#[derive(Debug, Clone, Copy, Default)]
pub struct StackProjector;

impl StackProjector {
    pub const ROTATION_STEP_DEG: f64 = 4.0;
    pub const SCALE_STEP: f64 = 0.06;
    pub const LIFT_STEP: f64 = 14.0;
    pub const MIN_SCALE: f64 = 0.7;
    pub const MIN_OPACITY: f64 = 0.4;
}

impl CardLayoutProjector for StackProjector {
    fn style(&self) -> CarouselStyle {
        CarouselStyle::Stack
    }

    fn layout(&self, diff: f64, _len: usize) -> CardLayout {
        let d = diff.abs();
        CardLayout {
            diff,
            offset_x: 0.0,
            offset_y: -d * Self::LIFT_STEP,
            depth: -d,
            rotation_deg: diff * Self::ROTATION_STEP_DEG,
            scale: (1.0 - d * Self::SCALE_STEP).max(Self::MIN_SCALE),
            opacity: (1.0 - d * 0.2).max(Self::MIN_OPACITY),
            blur: 0.0,
            z_index: stacking(d * 10.0),
        }
    }
}

/// Full-screen stories: neighbours crossfade over the focused card
#[derive(Debug, Clone, Copy, Default)]
pub struct StoriesProjector;

impl StoriesProjector {
    pub const MIN_SCALE: f64 = 0.98;
}

impl CardLayoutProjector for StoriesProjector {
    fn style(&self) -> CarouselStyle {
        CarouselStyle::Stories
    }

    fn layout(&self, diff: f64, _len: usize) -> CardLayout {
        let d = diff.abs();
        CardLayout {
            diff,
            offset_x: 0.0,
            offset_y: 0.0,
            depth: -d,
            rotation_deg: 0.0,
            scale: (1.0 - d * 0.02).max(Self::MIN_SCALE),
            opacity: (1.0 - d).max(0.0),
            blur: 0.0,
            z_index: stacking(d * 10.0),
        }
    }
}

impl CarouselStyle {
    /// Projector that lays out cards for this style
    pub fn projector(&self) -> Box<dyn CardLayoutProjector> {
        match self {
            CarouselStyle::Orbit => Box::new(OrbitProjector),
            CarouselStyle::Timeline => Box::new(TimelineProjector),
            CarouselStyle::Stack => Box::new(StackProjector),
            CarouselStyle::Stories => Box::new(StoriesProjector),
            CarouselStyle::Flow => Box::new(FlowProjector),
        }
    }

    /// Built-in engine tuning for this style
    pub fn tuning(&self) -> EngineTuning {
        EngineTuning::for_style(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEN: usize = 6;

    fn sweep(projector: &dyn CardLayoutProjector) -> Vec<CardLayout> {
        // |diff| from 0 to just below LEN / 2
        (0..300)
            .map(|i| projector.layout(i as f64 * 0.01, LEN))
            .collect()
    }

    #[test]
    fn test_falloff_is_monotonic_for_every_style() {
        for style in CarouselStyle::ALL {
            let projector = style.projector();
            let layouts = sweep(projector.as_ref());
            for pair in layouts.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(b.scale <= a.scale + 1e-12, "{:?} scale at {}", style, b.diff);
                assert!(b.opacity <= a.opacity + 1e-12, "{:?} opacity at {}", style, b.diff);
                assert!(b.blur >= a.blur - 1e-12, "{:?} blur at {}", style, b.diff);
                assert!(b.z_index <= a.z_index, "{:?} z at {}", style, b.diff);
            }
        }
    }

    #[test]
    fn test_values_respect_floors_and_ceilings() {
        for style in CarouselStyle::ALL {
            let projector = style.projector();
            for i in 0..=600 {
                let diff = -3.0 + i as f64 * 0.01;
                let l = projector.layout(diff, LEN);
                assert!((0.7..=1.0).contains(&l.scale), "{:?} scale {}", style, l.scale);
                assert!((0.0..=1.0).contains(&l.opacity), "{:?} opacity {}", style, l.opacity);
                assert!((0.0..=8.0).contains(&l.blur), "{:?} blur {}", style, l.blur);
            }
        }
        let far = OrbitProjector.layout(3.0, LEN);
        assert_eq!(far.opacity, OrbitProjector::MIN_OPACITY);
        assert_eq!(far.blur, OrbitProjector::MAX_BLUR);
        assert_eq!(far.scale, OrbitProjector::MIN_SCALE);
    }

    #[test]
    fn test_no_step_at_focus() {
        for style in CarouselStyle::ALL {
            let projector = style.projector();
            let at = projector.layout(0.0, LEN);
            for eps in [1e-6, -1e-6] {
                let near = projector.layout(eps, LEN);
                assert!((near.scale - at.scale).abs() < 1e-4, "{:?}", style);
                assert!((near.opacity - at.opacity).abs() < 1e-4, "{:?}", style);
                assert!((near.blur - at.blur).abs() < 1e-4, "{:?}", style);
                assert!((near.offset_x - at.offset_x).abs() < 1e-2, "{:?}", style);
            }
            assert!((at.scale - 1.0).abs() < 1e-12, "{:?}", style);
            assert!((at.opacity - 1.0).abs() < 1e-12, "{:?}", style);
            assert_eq!(at.blur, 0.0);
        }
    }

    #[test]
    fn test_spatial_offset_grows_with_distance() {
        for projector in [
            Box::new(TimelineProjector) as Box<dyn CardLayoutProjector>,
            Box::new(FlowProjector),
        ] {
            let near = projector.layout(1.0, LEN).offset_x;
            let far = projector.layout(2.0, LEN).offset_x;
            assert!(far > near && near > 0.0);
            assert_eq!(projector.layout(-1.0, LEN).offset_x, -near);
        }
        let a = StackProjector.layout(1.0, LEN);
        let b = StackProjector.layout(2.0, LEN);
        assert!(b.rotation_deg.abs() > a.rotation_deg.abs());
        assert!(b.offset_y.abs() > a.offset_y.abs());
    }

    #[test]
    fn test_orbit_places_cards_on_a_ring() {
        let front = OrbitProjector.layout(0.0, LEN);
        assert!(front.offset_x.abs() < 1e-9);
        assert!((front.depth - OrbitProjector::RADIUS).abs() < 1e-9);
        assert!((front.offset_y - OrbitProjector::WAVE_LIFT).abs() < 1e-9);

        let back = OrbitProjector.layout(3.0, LEN);
        assert!((back.rotation_deg - 180.0).abs() < 1e-9);
        assert!((back.depth + OrbitProjector::RADIUS).abs() < 1e-9);

        // Quarter turn on a ring of four
        let side = OrbitProjector.layout(1.0, 4);
        assert!((side.offset_x - OrbitProjector::RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_project_uses_shortest_wrap() {
        let l = TimelineProjector.project(5, 0.0, LEN).unwrap();
        assert_eq!(l.diff, -1.0);
        let l = TimelineProjector.project(0, 5.5, LEN).unwrap();
        assert!((l.diff - 0.5).abs() < 1e-9);
        // Unbounded display positions project the same as their reduced form
        let a = FlowProjector.project(2, -4.25, LEN).unwrap();
        let b = FlowProjector.project(2, 1.75, LEN).unwrap();
        assert!((a.diff - b.diff).abs() < 1e-9);
    }

    #[test]
    fn test_empty_collection_projects_nothing() {
        assert!(OrbitProjector.project(0, 0.0, 0).is_none());
        assert!(OrbitProjector.project_all(0.0, 0).is_empty());
        assert!(OrbitProjector.project(6, 0.0, LEN).is_none());
    }

    #[test]
    fn test_project_all_paints_focused_card_last() {
        let cards = StackProjector.project_all(2.0, LEN);
        assert_eq!(cards.len(), LEN);
        let (index, top) = cards[LEN - 1];
        assert_eq!(index, 2);
        assert!(top.is_focused());
        for pair in cards.windows(2) {
            assert!(pair[0].1.z_index <= pair[1].1.z_index);
        }
    }

    #[test]
    fn test_style_selects_matching_projector() {
        for style in CarouselStyle::ALL {
            assert_eq!(style.projector().style(), style);
            assert_eq!(style.tuning(), EngineTuning::for_style(style));
        }
    }
}
