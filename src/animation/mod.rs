//! Entrance animation.
//!
//! - [`timeline`]: Step definitions and their resolution into tweens
//! - [`sequencer`]: Fire-and-forget scheduling of a resolved timeline
//! - [`entrance`]: The first-paint timeline played after the initial mount

pub mod entrance;
pub mod sequencer;
pub mod timeline;

pub use entrance::entrance_timeline;
pub use sequencer::{AnimationDriver, AnimationSequencer, TracingDriver};
pub use timeline::{
    AnimationStep, DEFAULT_STEP_DURATION, Delay, Keyframes, ScheduledTween, TimelinePlan, Timing,
    ValueRange,
};
