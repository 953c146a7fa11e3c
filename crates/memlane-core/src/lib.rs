pub mod carousel;
pub mod config;
pub mod error;
pub mod memory;
pub mod upload;

pub use carousel::{CarouselEngine, Mode, Navigator, NavigatorEvent};
pub use config::{AppConfig, CarouselStyle, CardStyle, EngineTuning};
pub use error::{Error, Result};
pub use memory::{Memory, MemoryStore};
