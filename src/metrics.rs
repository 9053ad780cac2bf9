// Lifecycle metrics
//
// Counters for the carousel lifecycle, shared between the controller, the
// animation sequencer and the data provider via Arc.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Carousel lifecycle metrics
///
/// Lock-free counters, logged on shutdown via [`CarouselMetrics::log_summary`].
#[derive(Debug)]
pub struct CarouselMetrics {
    /// Instances constructed (initial mount and every rebuild)
    pub mounts: AtomicU64,

    /// Instances torn down
    pub destroys: AtomicU64,

    /// Resize-driven destroy/recreate cycles
    pub rebuilds: AtomicU64,

    /// Notifications folded into a rebuild already triggered in the same turn
    pub coalesced_notifications: AtomicU64,

    /// Notifications from instances that were already destroyed
    pub stale_notifications: AtomicU64,

    /// Timeline steps handed to the sequencer
    pub animation_steps: AtomicU64,

    /// Per-target tweens scheduled
    pub tweens_scheduled: AtomicU64,

    /// Data feed requests that degraded to an empty list
    pub fetch_failures: AtomicU64,

    start_time: Instant,
}

impl CarouselMetrics {
    pub fn new() -> Self {
        Self {
            mounts: AtomicU64::new(0),
            destroys: AtomicU64::new(0),
            rebuilds: AtomicU64::new(0),
            coalesced_notifications: AtomicU64::new(0),
            stale_notifications: AtomicU64::new(0),
            animation_steps: AtomicU64::new(0),
            tweens_scheduled: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_mount(&self) {
        self.mounts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_destroy(&self) {
        self.destroys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rebuild(&self) {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_coalesced(&self, count: u64) {
        self.coalesced_notifications.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_stale(&self) {
        self.stale_notifications.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a played timeline
    pub fn record_timeline(&self, steps: u64, tweens: u64) {
        self.animation_steps.fetch_add(steps, Ordering::Relaxed);
        self.tweens_scheduled.fetch_add(tweens, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Instances mounted and not yet destroyed.
    pub fn live_instances(&self) -> u64 {
        self.mounts
            .load(Ordering::Relaxed)
            .saturating_sub(self.destroys.load(Ordering::Relaxed))
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Carousel Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Instances: {} mounted, {} destroyed, {} rebuilds",
            self.mounts.load(Ordering::Relaxed),
            self.destroys.load(Ordering::Relaxed),
            self.rebuilds.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Resize notifications: {} coalesced, {} stale",
            self.coalesced_notifications.load(Ordering::Relaxed),
            self.stale_notifications.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Animation: {} steps, {} tweens",
            self.animation_steps.load(Ordering::Relaxed),
            self.tweens_scheduled.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Data feed failures: {}",
            self.fetch_failures.load(Ordering::Relaxed)
        );
    }
}

impl Default for CarouselMetrics {
    fn default() -> Self {
        Self::new()
    }
}
