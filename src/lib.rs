// Character Carousel - responsive, self-rebuilding character slider
//
// This is the library crate containing the carousel lifecycle, the slide
// count resolver, the entrance animation and the data feed client.
// The binary crate (main.rs) wires them to a headless viewport.

pub mod animation;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{AppEnvironment, ConfigManager};
pub use metrics::CarouselMetrics;
pub use models::{BreakpointTable, CarouselOptions, CarouselSettings, CharacterEntry};
pub use state::{SlideCountChange, SlideCountResolver};
pub use ui::{CarouselController, ControllerHandle, PostLayout};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
