use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slides shown per carousel page.
pub type SlideCount = u32;

/// One row of the breakpoint table: viewports narrower than `below` pixels
/// show `slides` slides per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub below: u32,
    pub slides: SlideCount,
}

/// Errors raised when a breakpoint table is not monotonic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreakpointError {
    #[error("Slide count must be at least 1 (breakpoint below {0}px)")]
    ZeroSlides(u32),

    #[error("Breakpoint thresholds must strictly increase ({previous}px then {next}px)")]
    ThresholdsNotIncreasing { previous: u32, next: u32 },

    #[error("Slide counts must not decrease as width grows ({previous} then {next})")]
    SlidesDecreasing { previous: SlideCount, next: SlideCount },
}

/// Ordered, monotonic mapping from viewport width to slide count.
///
/// The table is a list of thresholds plus the count used at or above the last
/// threshold. Widths below the first threshold fall into the first row, so
/// the narrowest and widest viewports clamp to the table's minimum and maximum
/// counts.
///
/// Default table: `{ <640: 1, <1024: 2, >=1024: 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBreakpointTable", into = "RawBreakpointTable")]
pub struct BreakpointTable {
    steps: Vec<Breakpoint>,
    widest: SlideCount,
}

#[derive(Serialize, Deserialize)]
struct RawBreakpointTable {
    #[serde(default)]
    steps: Vec<Breakpoint>,
    widest: SlideCount,
}

impl BreakpointTable {
    /// Build a table, rejecting anything that is not monotonic.
    pub fn new(steps: Vec<Breakpoint>, widest: SlideCount) -> Result<Self, BreakpointError> {
        for pair in steps.windows(2) {
            if pair[1].below <= pair[0].below {
                return Err(BreakpointError::ThresholdsNotIncreasing {
                    previous: pair[0].below,
                    next: pair[1].below,
                });
            }
            if pair[1].slides < pair[0].slides {
                return Err(BreakpointError::SlidesDecreasing {
                    previous: pair[0].slides,
                    next: pair[1].slides,
                });
            }
        }

        if let Some(zero) = steps.iter().find(|step| step.slides == 0) {
            return Err(BreakpointError::ZeroSlides(zero.below));
        }
        if widest == 0 {
            return Err(BreakpointError::ZeroSlides(u32::MAX));
        }
        if let Some(last) = steps.last() {
            if widest < last.slides {
                return Err(BreakpointError::SlidesDecreasing {
                    previous: last.slides,
                    next: widest,
                });
            }
        }

        Ok(Self { steps, widest })
    }

    /// Slide count for a viewport width.
    pub fn slides_for(&self, width: u32) -> SlideCount {
        self.steps
            .iter()
            .find(|step| width < step.below)
            .map(|step| step.slides)
            .unwrap_or(self.widest)
    }

    /// Fewest slides the table can produce.
    pub fn min_slides(&self) -> SlideCount {
        self.steps.first().map(|step| step.slides).unwrap_or(self.widest)
    }

    /// Most slides the table can produce.
    pub fn max_slides(&self) -> SlideCount {
        self.widest
    }

    pub fn steps(&self) -> &[Breakpoint] {
        &self.steps
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            steps: vec![
                Breakpoint {
                    below: 640,
                    slides: 1,
                },
                Breakpoint {
                    below: 1024,
                    slides: 2,
                },
            ],
            widest: 3,
        }
    }
}

impl TryFrom<RawBreakpointTable> for BreakpointTable {
    type Error = BreakpointError;

    fn try_from(raw: RawBreakpointTable) -> Result<Self, Self::Error> {
        Self::new(raw.steps, raw.widest)
    }
}

impl From<BreakpointTable> for RawBreakpointTable {
    fn from(table: BreakpointTable) -> Self {
        Self {
            steps: table.steps,
            widest: table.widest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = BreakpointTable::default();

        assert_eq!(table.slides_for(0), 1);
        assert_eq!(table.slides_for(639), 1);
        assert_eq!(table.slides_for(640), 2);
        assert_eq!(table.slides_for(1023), 2);
        assert_eq!(table.slides_for(1024), 3);
        assert_eq!(table.slides_for(u32::MAX), 3);
        assert_eq!(table.min_slides(), 1);
        assert_eq!(table.max_slides(), 3);
    }

    #[test]
    fn test_single_row_table() {
        let table = BreakpointTable::new(Vec::new(), 4).unwrap();

        assert_eq!(table.slides_for(10), 4);
        assert_eq!(table.min_slides(), 4);
    }

    #[test]
    fn test_rejects_unsorted_thresholds() {
        let result = BreakpointTable::new(
            vec![
                Breakpoint { below: 1024, slides: 1 },
                Breakpoint { below: 640, slides: 2 },
            ],
            3,
        );

        assert_eq!(
            result,
            Err(BreakpointError::ThresholdsNotIncreasing {
                previous: 1024,
                next: 640
            })
        );
    }

    #[test]
    fn test_rejects_decreasing_slides() {
        let result = BreakpointTable::new(vec![Breakpoint { below: 640, slides: 4 }], 2);

        assert!(matches!(result, Err(BreakpointError::SlidesDecreasing { .. })));
    }

    #[test]
    fn test_rejects_zero_slides() {
        let result = BreakpointTable::new(vec![Breakpoint { below: 640, slides: 0 }], 2);

        assert_eq!(result, Err(BreakpointError::ZeroSlides(640)));
    }

    #[test]
    fn test_yaml_validation() {
        let yaml = "steps:\n  - below: 800\n    slides: 2\n  - below: 400\n    slides: 3\nwidest: 4\n";
        let result: Result<BreakpointTable, _> = serde_yaml_ng::from_str(yaml);

        assert!(result.is_err());
    }
}
