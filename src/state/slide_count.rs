use crate::models::{BreakpointTable, SlideCount};
use std::sync::Mutex;
use tokio::sync::watch;

/// Change emitted when the observed viewport crosses a breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideCountChange {
    pub width: u32,
    pub previous: SlideCount,
    pub current: SlideCount,
}

/// Responsive slide-count resolver
///
/// Owns the current slide count and publishes it through a
/// [`tokio::sync::watch`] channel. Subscribers only wake when the count
/// actually changes: observing the same width twice, or a new width that maps
/// to the same count, never re-emits.
///
/// # Usage
///
/// ```ignore
/// let resolver = SlideCountResolver::new(BreakpointTable::default(), 500);
/// let mut slides = resolver.subscribe();
///
/// // Called from the viewport resize hook
/// resolver.observe_width(1200);
/// assert_eq!(*slides.borrow_and_update(), 3);
/// ```
#[derive(Debug)]
pub struct SlideCountResolver {
    table: BreakpointTable,

    /// Last width seen, kept so repeated observations short-circuit
    width: Mutex<u32>,

    count_tx: watch::Sender<SlideCount>,
}

impl SlideCountResolver {
    /// Create a resolver seeded with the viewport width at startup.
    pub fn new(table: BreakpointTable, initial_width: u32) -> Self {
        let initial = table.slides_for(initial_width);
        let (count_tx, _) = watch::channel(initial);

        tracing::debug!(
            "Slide count resolver initialized: width={}px, slides={}",
            initial_width,
            initial
        );

        Self {
            table,
            width: Mutex::new(initial_width),
            count_tx,
        }
    }

    /// Slide count for `width` under this resolver's table. Pure.
    pub fn resolve(&self, width: u32) -> SlideCount {
        self.table.slides_for(width)
    }

    /// Current slide count.
    pub fn current(&self) -> SlideCount {
        *self.count_tx.borrow()
    }

    /// Last observed viewport width.
    pub fn width(&self) -> u32 {
        *self.width.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to slide count changes.
    pub fn subscribe(&self) -> watch::Receiver<SlideCount> {
        self.count_tx.subscribe()
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Re-evaluate after a viewport resize.
    ///
    /// Returns the change when the slide count moved, `None` otherwise.
    /// Subscribers are only notified in the first case.
    pub fn observe_width(&self, width: u32) -> Option<SlideCountChange> {
        {
            let mut last = self.width.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if *last == width {
                return None;
            }
            *last = width;
        }

        let next = self.resolve(width);
        let mut change = None;

        self.count_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            change = Some(SlideCountChange {
                width,
                previous: *current,
                current: next,
            });
            *current = next;
            true
        });

        match change {
            Some(change) => tracing::info!(
                "Viewport {}px: slides per page {} -> {}",
                change.width,
                change.previous,
                change.current
            ),
            None => tracing::trace!("Viewport {}px: slides per page unchanged", width),
        }

        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_from_width() {
        let resolver = SlideCountResolver::new(BreakpointTable::default(), 800);
        assert_eq!(resolver.current(), 2);
        assert_eq!(resolver.width(), 800);
    }

    #[test]
    fn test_idempotent_recompute() {
        let resolver = SlideCountResolver::new(BreakpointTable::default(), 500);
        let rx = resolver.subscribe();

        assert_eq!(resolver.observe_width(500), None);
        assert_eq!(resolver.observe_width(500), None);

        assert_eq!(resolver.current(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_same_bucket_does_not_emit() {
        let resolver = SlideCountResolver::new(BreakpointTable::default(), 500);
        let rx = resolver.subscribe();

        assert_eq!(resolver.observe_width(600), None);
        assert_eq!(resolver.width(), 600);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_crossing_breakpoint_emits() {
        let resolver = SlideCountResolver::new(BreakpointTable::default(), 500);
        let mut rx = resolver.subscribe();

        let change = resolver.observe_width(1200).unwrap();

        assert_eq!(change.previous, 1);
        assert_eq!(change.current, 3);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 3);
    }

    #[test]
    fn test_clamping() {
        let resolver = SlideCountResolver::new(BreakpointTable::default(), 800);

        assert_eq!(resolver.resolve(0), resolver.table().min_slides());
        assert_eq!(resolver.resolve(10_000), resolver.table().max_slides());
    }
}
