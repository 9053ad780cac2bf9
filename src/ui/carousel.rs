// Carousel backend seam
//
// A backend constructs carousel instances over a container. An instance
// reports viewport resizes (with the new width) through listeners and
// creates its own navigation arrows. The controller is the only caller of this trait pair.

use crate::models::CarouselOptions;
use crate::ui::handles::ElementHandle;
use thiserror::Error;

/// Listener invoked by an instance when it detects a viewport resize.
///
/// Receives the new viewport width in pixels.
pub type ResizeListener = Box<dyn Fn(u32) + Send + Sync>;

/// Errors raised while constructing a carousel instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    #[error("Carousel container is missing from the page")]
    MissingContainer,

    #[error("Carousel cannot be mounted while {0}")]
    InvalidPhase(&'static str),

    #[error("Carousel backend failed to mount: {0}")]
    Backend(String),
}

/// Handle to one registered listener.
///
/// Calling [`dispose`](Self::dispose) (or dropping the subscription) detaches
/// the listener. Disposal runs at most once.
pub struct Subscription {
    disposer: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new<F>(disposer: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    /// A subscription with nothing to release.
    pub fn empty() -> Self {
        Self { disposer: None }
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.disposer.is_some())
            .finish()
    }
}

/// A live carousel bound to a container.
pub trait CarouselInstance: Send {
    /// Register a resize listener.
    fn on_resize(&mut self, listener: ResizeListener) -> Subscription;

    /// Navigation arrows this instance created on mount.
    fn arrows(&self) -> Vec<ElementHandle>;

    /// Release the instance's own listeners and timers.
    fn destroy(&mut self);
}

/// Constructs carousel instances.
pub trait CarouselBackend: Send {
    fn mount(
        &mut self,
        container: &ElementHandle,
        slides: &[ElementHandle],
        options: &CarouselOptions,
    ) -> Result<Box<dyn CarouselInstance>, MountError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_dispose_runs_once() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);

        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        subscription.dispose();

        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_disposes() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);

        {
            let _subscription = Subscription::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_subscription() {
        Subscription::empty().dispose();
    }
}
