use crate::animation::timeline::{AnimationStep, ScheduledTween, TimelinePlan};
use crate::metrics::CarouselMetrics;
use std::sync::Arc;

/// Applies a tween to the rendered element.
///
/// Called once per tween, at the tween's start offset, from a tokio task.
pub trait AnimationDriver: Send + Sync + 'static {
    fn animate(&self, tween: &ScheduledTween);
}

/// Fire-and-forget timeline player
///
/// [`play`](Self::play) resolves the timeline, spawns one task per tween on
/// the runtime and returns immediately. Nothing about a played timeline is
/// kept: the sequencer can be cloned and reused freely, and in-flight tweens
/// cannot be cancelled.
#[derive(Clone)]
pub struct AnimationSequencer {
    driver: Arc<dyn AnimationDriver>,
    runtime: tokio::runtime::Handle,
    metrics: Arc<CarouselMetrics>,
}

impl AnimationSequencer {
    pub fn new(
        driver: Arc<dyn AnimationDriver>,
        runtime: tokio::runtime::Handle,
        metrics: Arc<CarouselMetrics>,
    ) -> Self {
        Self {
            driver,
            runtime,
            metrics,
        }
    }

    /// Schedule every step of `sequence`. Does not wait for any of them.
    pub fn play(&self, sequence: Vec<AnimationStep>) {
        let plan = TimelinePlan::resolve(&sequence);
        self.metrics
            .record_timeline(sequence.len() as u64, plan.tweens.len() as u64);

        if plan.is_empty() {
            tracing::debug!("Timeline has no targets, nothing to play");
            return;
        }

        tracing::debug!(
            "Playing timeline: {} steps, {} tweens, {:?} total",
            sequence.len(),
            plan.tweens.len(),
            plan.total
        );

        for tween in plan.tweens {
            let driver = Arc::clone(&self.driver);
            self.runtime.spawn(async move {
                if !tween.start.is_zero() {
                    tokio::time::sleep(tween.start).await;
                }
                driver.animate(&tween);
            });
        }
    }
}

impl std::fmt::Debug for AnimationSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSequencer").finish_non_exhaustive()
    }
}

/// Driver that only logs each tween.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDriver;

impl AnimationDriver for TracingDriver {
    fn animate(&self, tween: &ScheduledTween) {
        let properties: Vec<String> = tween
            .keyframes
            .iter()
            .map(|(property, range)| format!("{} {}", property, range))
            .collect();

        tracing::debug!(
            "Animate {} ({:?}) at {:?} for {:?}: {}",
            tween.target.id,
            tween.target.role,
            tween.start,
            tween.duration,
            properties.join(", ")
        );
    }
}
