//! Timeline definitions and their resolution into per-target tweens.

use crate::ui::handles::ElementHandle;
use indexmap::IndexMap;
use std::fmt;
use std::time::Duration;

/// Duration used by steps that do not declare one.
pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(300);

/// Start and end value of one animated property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub from: f64,
    pub to: f64,
}

impl ValueRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Animated properties in declaration order (`opacity`, `y`, ...).
pub type Keyframes = IndexMap<String, ValueRange>;

/// How a step's targets are offset from the step start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delay {
    #[default]
    None,
    /// Every target waits the same amount
    Fixed(Duration),
    /// Target `i` waits `i * interval`
    Stagger(Duration),
}

impl Delay {
    pub fn for_index(&self, index: usize) -> Duration {
        match *self {
            Delay::None => Duration::ZERO,
            Delay::Fixed(delay) => delay,
            Delay::Stagger(interval) => interval * index as u32,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timing {
    /// Falls back to [`DEFAULT_STEP_DURATION`]
    pub duration: Option<Duration>,
    pub delay: Delay,
    /// Absolute offset into the timeline. When unset the step starts where
    /// the previous one ended.
    pub at: Option<Duration>,
}

/// One entry of a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationStep {
    pub targets: Vec<ElementHandle>,
    pub keyframes: Keyframes,
    pub timing: Timing,
}

impl AnimationStep {
    pub fn new(targets: Vec<ElementHandle>) -> Self {
        Self {
            targets,
            keyframes: Keyframes::new(),
            timing: Timing::default(),
        }
    }

    pub fn keyframe(mut self, property: &str, from: f64, to: f64) -> Self {
        self.keyframes
            .insert(property.to_string(), ValueRange::new(from, to));
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.timing.duration = Some(duration);
        self
    }

    pub fn delay(mut self, delay: Delay) -> Self {
        self.timing.delay = delay;
        self
    }

    pub fn at(mut self, offset: Duration) -> Self {
        self.timing.at = Some(offset);
        self
    }
}

/// A single target's animation, positioned on the shared timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTween {
    /// Index of the step this tween came from
    pub step: usize,
    pub target: ElementHandle,
    pub keyframes: Keyframes,
    /// Offset from the moment the timeline was played
    pub start: Duration,
    pub duration: Duration,
}

impl ScheduledTween {
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// A timeline flattened into tweens, ordered by step then target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelinePlan {
    pub tweens: Vec<ScheduledTween>,
    pub total: Duration,
}

impl TimelinePlan {
    /// Position every target of every step on the timeline.
    ///
    /// Steps may overlap: an explicit `at` can place a step before the
    /// previous one has finished. A step without targets contributes nothing
    /// and leaves the cursor where it starts.
    pub fn resolve(sequence: &[AnimationStep]) -> Self {
        let mut tweens = Vec::new();
        let mut cursor = Duration::ZERO;
        let mut total = Duration::ZERO;

        for (index, step) in sequence.iter().enumerate() {
            let start = step.timing.at.unwrap_or(cursor);
            let duration = step.timing.duration.unwrap_or(DEFAULT_STEP_DURATION);

            if step.targets.is_empty() {
                cursor = start;
                continue;
            }

            let mut step_end = start;
            for (position, target) in step.targets.iter().enumerate() {
                let tween = ScheduledTween {
                    step: index,
                    target: *target,
                    keyframes: step.keyframes.clone(),
                    start: start + step.timing.delay.for_index(position),
                    duration,
                };
                step_end = step_end.max(tween.end());
                tweens.push(tween);
            }

            cursor = step_end;
            total = total.max(step_end);
        }

        Self { tweens, total }
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
