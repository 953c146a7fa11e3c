//! Carousel position and navigation engine
//!
//! Layered bottom-up:
//! - L4 atomic: [`wrap`] index arithmetic, [`RateLimiter`]
//! - L3 molecular: [`PositionSmoother`], [`BoundaryHandler`] / [`ModeController`]
//! - L2 organism: [`CarouselEngine`], [`CardLayoutProjector`] per style
//! - L1 page: [`Navigator`], the only type a presentation layer drives

mod boundary;
mod engine;
mod navigator;
mod projector;
mod rate_limit;
mod smoother;
pub mod wrap;

pub use boundary::{BoundaryHandler, Mode, ModeController, TransitionSignal, TransitionTicket};
pub use engine::{CarouselEngine, IndexListener};
pub use navigator::{InputOutcome, Navigator, NavigatorEvent};
pub use projector::{
    CardLayout, CardLayoutProjector, FlowProjector, OrbitProjector, StackProjector,
    StoriesProjector, TimelineProjector,
};
pub use rate_limit::RateLimiter;
pub use smoother::{critical_damping, PositionSmoother};
pub use wrap::{normalize_index, wrap_delta, wrap_offset};
