// Carousel Controller - owns the lifecycle of the single live carousel instance
//
// The controller coordinates between:
// - CarouselBackend (constructs instances over the slide container)
// - SlideCountResolver (per-page value; fed the widths instances report)
// - AnimationSequencer (entrance timeline after the first mount)
//
// It handles:
// - Deferred first mount behind a post-layout hook
// - Resize notifications and slide count changes → destroy + recreate
// - Teardown of the hosting view
//
// A viewport change reaches the controller as one message: the instance's
// resize notification carries the new width, and the controller hands it to
// the resolver itself before rebuilding.

use crate::animation::{AnimationSequencer, entrance_timeline};
use crate::metrics::CarouselMetrics;
use crate::models::{CarouselOptions, SlideCount};
use crate::state::SlideCountResolver;
use crate::ui::carousel::{CarouselBackend, CarouselInstance, MountError, Subscription};
use crate::ui::handles::{CarouselHandles, ElementHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

/// Lifecycle phase of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselPhase {
    /// No instance yet (or the last construction failed)
    Uninitialized,
    /// Exactly one instance is live
    Mounted,
    /// Between destroying the old instance and constructing the new one
    Resizing,
    /// Torn down for good
    Destroyed,
}

/// Notifications delivered to the controller task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    /// An instance detected a viewport resize to `width` pixels
    InstanceResized { generation: u64, width: u32 },
    /// The hosting view is going away
    Teardown,
}

/// Cloneable handle used by the hosting view to talk to a running controller.
///
/// Dropping every handle has the same effect as [`teardown`](Self::teardown).
#[derive(Clone, Debug)]
pub struct ControllerHandle {
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl ControllerHandle {
    /// Tear the carousel down, cancelling the deferred mount if it is still
    /// pending.
    pub fn teardown(&self) {
        if self.events_tx.send(ControllerEvent::Teardown).is_err() {
            tracing::debug!("Teardown requested but the controller has already stopped");
        }
    }

    /// Whether the controller task is still running.
    pub fn is_running(&self) -> bool {
        !self.events_tx.is_closed()
    }
}

/// The layout barrier was dropped without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAbandoned;

/// Post-layout hook the first mount waits on.
///
/// Either a barrier the renderer commits once slide nodes exist, or a plain
/// delay for hosts that cannot signal layout.
#[derive(Debug)]
pub enum PostLayout {
    Barrier(oneshot::Receiver<()>),
    Delay(Duration),
    Immediate,
}

/// Sending half of [`PostLayout::Barrier`].
#[derive(Debug)]
pub struct LayoutCommit(oneshot::Sender<()>);

impl LayoutCommit {
    /// Signal that slide nodes are in place.
    pub fn commit(self) {
        let _ = self.0.send(());
    }
}

impl PostLayout {
    pub fn barrier() -> (LayoutCommit, PostLayout) {
        let (tx, rx) = oneshot::channel();
        (LayoutCommit(tx), PostLayout::Barrier(rx))
    }

    pub fn after(delay: Duration) -> Self {
        if delay.is_zero() {
            PostLayout::Immediate
        } else {
            PostLayout::Delay(delay)
        }
    }

    /// Single suspension point before the first mount.
    pub async fn wait(self) -> Result<(), LayoutAbandoned> {
        match self {
            PostLayout::Barrier(rx) => rx.await.map_err(|_| LayoutAbandoned),
            PostLayout::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            PostLayout::Immediate => Ok(()),
        }
    }
}

struct LiveInstance {
    generation: u64,
    instance: Box<dyn CarouselInstance>,
    resize: Subscription,
}

enum Wake {
    Event(Option<ControllerEvent>),
    SlideCount,
}

#[derive(Default)]
struct Batch {
    rebuild_requests: u64,
    /// Last width reported in the batch, by any instance
    width: Option<u32>,
    teardown: bool,
}

/// Owns the lifecycle of a single carousel instance.
///
/// All state transitions go through `&mut self`, and the async driver
/// ([`run`](Self::run)) processes notifications one batch at a time, so two
/// rebuilds can never overlap. Every notification queued by the time a batch
/// is picked up is folded into at most one rebuild.
///
/// The resolver is shared with the host. Widths reported by the live
/// instance are applied to it inside the batch, so the slide count change
/// they cause is consumed by the same rebuild instead of waking the loop a
/// second time.
///
/// # Example
/// ```ignore
/// let (controller, handle) = CarouselController::new(
///     Box::new(backend),
///     page.handles(),
///     settings.options.clone(),
///     Arc::clone(&resolver),
///     sequencer,
///     metrics,
/// );
/// let task = tokio::spawn(controller.run(PostLayout::after(settings.mount_delay())));
/// // ... later, when the view goes away
/// handle.teardown();
/// task.await??;
/// ```
pub struct CarouselController {
    backend: Box<dyn CarouselBackend>,
    handles: CarouselHandles,
    base_options: CarouselOptions,
    resolver: Arc<SlideCountResolver>,
    slide_count: watch::Receiver<SlideCount>,
    sequencer: AnimationSequencer,
    metrics: Arc<CarouselMetrics>,

    phase: CarouselPhase,
    live: Option<LiveInstance>,

    /// Incremented on every successful construction; resize listeners are
    /// tagged with it so notifications from destroyed instances are ignored
    generation: u64,

    /// Weak so that dropping every [`ControllerHandle`] closes the channel
    events_weak: mpsc::WeakUnboundedSender<ControllerEvent>,
    events_rx: mpsc::UnboundedReceiver<ControllerEvent>,
}

impl CarouselController {
    pub fn new(
        backend: Box<dyn CarouselBackend>,
        handles: CarouselHandles,
        base_options: CarouselOptions,
        resolver: Arc<SlideCountResolver>,
        sequencer: AnimationSequencer,
        metrics: Arc<CarouselMetrics>,
    ) -> (Self, ControllerHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let slide_count = resolver.subscribe();

        let controller = Self {
            backend,
            handles,
            base_options,
            resolver,
            slide_count,
            sequencer,
            metrics,
            phase: CarouselPhase::Uninitialized,
            live: None,
            generation: 0,
            events_weak: events_tx.downgrade(),
            events_rx,
        };

        (controller, ControllerHandle { events_tx })
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// Generation of the live instance, if any.
    pub fn live_generation(&self) -> Option<u64> {
        self.live.as_ref().map(|live| live.generation)
    }

    /// Initial mount: construct the instance and play the entrance timeline.
    ///
    /// The timeline is only handed to the sequencer once construction has
    /// succeeded.
    pub fn mount(&mut self) -> Result<(), MountError> {
        match self.phase {
            CarouselPhase::Uninitialized => {}
            CarouselPhase::Mounted | CarouselPhase::Resizing => {
                return Err(MountError::InvalidPhase("an instance is already mounted"));
            }
            CarouselPhase::Destroyed => {
                return Err(MountError::InvalidPhase("the carousel has been destroyed"));
            }
        }

        let arrows = self.construct().inspect_err(|e| {
            tracing::error!("Carousel mount failed: {}", e);
        })?;
        self.phase = CarouselPhase::Mounted;

        tracing::info!(
            "Carousel mounted: generation {}, {} slides",
            self.generation,
            self.handles.slides.len()
        );

        self.sequencer.play(entrance_timeline(&self.handles, &arrows));

        Ok(())
    }

    /// Destroy the live instance and construct a new one with the current
    /// slide count, within the same call.
    ///
    /// Returns `Ok(false)` when there was nothing to rebuild, including a
    /// request that arrives while a rebuild is already running.
    pub fn rebuild(&mut self) -> Result<bool, MountError> {
        match self.phase {
            CarouselPhase::Mounted => {}
            CarouselPhase::Resizing => {
                tracing::warn!("Rebuild requested while another rebuild is in progress, ignoring");
                return Ok(false);
            }
            phase => {
                tracing::debug!("Rebuild requested in phase {:?}, ignoring", phase);
                return Ok(false);
            }
        }

        self.phase = CarouselPhase::Resizing;
        self.release();

        match self.construct() {
            Ok(_) => {
                self.phase = CarouselPhase::Mounted;
                self.metrics.record_rebuild();
                tracing::info!("Carousel rebuilt: generation {}", self.generation);
                Ok(true)
            }
            Err(e) => {
                self.phase = CarouselPhase::Uninitialized;
                tracing::error!("Carousel rebuild failed: {}", e);
                Err(e)
            }
        }
    }

    /// Release everything. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.release();
        if self.phase != CarouselPhase::Destroyed {
            tracing::info!("Carousel destroyed");
        }
        self.phase = CarouselPhase::Destroyed;
    }

    /// Drive the lifecycle until teardown.
    ///
    /// Waits for `layout`, mounts, then rebuilds on every batch of resize
    /// notifications or slide count changes. A teardown before layout commits
    /// cancels the mount. Construction failures end the loop and are returned.
    pub async fn run(mut self, layout: PostLayout) -> Result<(), MountError> {
        let layout_ready = layout.wait();
        tokio::pin!(layout_ready);

        loop {
            tokio::select! {
                biased;

                event = self.events_rx.recv() => match event {
                    Some(ControllerEvent::Teardown) | None => {
                        tracing::info!("Torn down before the first mount, cancelling deferred mount");
                        self.destroy();
                        return Ok(());
                    }
                    Some(event) => {
                        self.metrics.record_stale();
                        tracing::trace!("Ignoring {:?} before the first mount", event);
                    }
                },

                ready = &mut layout_ready => match ready {
                    Ok(()) => break,
                    Err(LayoutAbandoned) => {
                        tracing::warn!("Layout barrier dropped before commit, carousel will not mount");
                        self.destroy();
                        return Ok(());
                    }
                },
            }
        }

        self.mount()?;

        loop {
            let wake = tokio::select! {
                event = self.events_rx.recv() => Wake::Event(event),
                // The sender lives in `self.resolver`, so this never errors
                _ = self.slide_count.changed() => Wake::SlideCount,
            };

            let batch = self.collect_batch(wake);

            if batch.teardown {
                break;
            }

            if batch.rebuild_requests > 0 {
                if batch.rebuild_requests > 1 {
                    self.metrics.record_coalesced(batch.rebuild_requests - 1);
                    tracing::debug!(
                        "Coalesced {} resize notifications into one rebuild",
                        batch.rebuild_requests
                    );
                }
                self.rebuild()?;
            }
        }

        self.destroy();
        Ok(())
    }

    /// Gather everything that is already queued behind `first`.
    fn collect_batch(&mut self, first: Wake) -> Batch {
        let mut batch = Batch::default();

        match first {
            Wake::Event(None) => batch.teardown = true,
            Wake::Event(Some(event)) => self.classify(event, &mut batch),
            Wake::SlideCount => batch.rebuild_requests += 1,
        }

        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.classify(event, &mut batch),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    batch.teardown = true;
                    break;
                }
            }
        }

        // Changes made elsewhere, before our own width update below
        if self.slide_count.has_changed().unwrap_or(false) {
            batch.rebuild_requests += 1;
        }

        if let Some(width) = batch.width {
            self.resolver.observe_width(width);
        }

        batch
    }

    fn classify(&self, event: ControllerEvent, batch: &mut Batch) {
        match event {
            ControllerEvent::Teardown => batch.teardown = true,
            ControllerEvent::InstanceResized { generation, width } => {
                // A destroyed instance still saw a real viewport width
                batch.width = Some(width);
                if self.live_generation() == Some(generation) {
                    batch.rebuild_requests += 1;
                } else {
                    self.metrics.record_stale();
                    tracing::trace!("Ignoring resize from destroyed instance {}", generation);
                }
            }
        }
    }

    /// Construct a new instance and register it as current.
    ///
    /// Nothing is registered unless the backend succeeds.
    fn construct(&mut self) -> Result<Vec<ElementHandle>, MountError> {
        debug_assert!(self.live.is_none(), "previous instance must be released first");

        let container = self.handles.container.ok_or(MountError::MissingContainer)?;
        let per_page = *self.slide_count.borrow_and_update();
        let options = self.base_options.with_per_page(per_page);

        let mut instance = self
            .backend
            .mount(&container, &self.handles.slides, &options)?;

        let generation = self.generation + 1;
        let events = self.events_weak.clone();
        let resize = instance.on_resize(Box::new(move |width| {
            if let Some(tx) = events.upgrade() {
                let _ = tx.send(ControllerEvent::InstanceResized { generation, width });
            }
        }));
        let arrows = instance.arrows();

        self.generation = generation;
        self.live = Some(LiveInstance {
            generation,
            instance,
            resize,
        });
        self.metrics.record_mount();

        tracing::debug!(
            "Constructed instance {} with {} per page",
            generation,
            options.per_page
        );

        Ok(arrows)
    }

    /// Detach listeners, then destroy the instance.
    fn release(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.resize.dispose();
            live.instance.destroy();
            self.metrics.record_destroy();
            tracing::debug!("Released instance {}", live.generation);
        }
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("live", &self.live_generation())
            .finish_non_exhaustive()
    }
}
