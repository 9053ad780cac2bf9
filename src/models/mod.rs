//! Data models for the character carousel.
//!
//! - [`CharacterEntry`]: One record of the remote character feed
//! - [`CarouselOptions`]: Options a carousel instance is constructed with
//! - [`BreakpointTable`]: Monotonic width → slide count mapping
//! - [`CarouselSettings`]: Static settings loaded from `Carousel Settings.yaml`

pub mod breakpoints;
pub mod character;
pub mod config;
pub mod options;

pub use breakpoints::{Breakpoint, BreakpointError, BreakpointTable, SlideCount};
pub use character::CharacterEntry;
pub use config::{CarouselSettings, DEFAULT_REPOSITORY_URL, LoggingSettings};
pub use options::{CarouselKind, CarouselOptions};
