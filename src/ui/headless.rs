// Headless carousel backend
//
// Models carousel instances without a rendering surface. The viewport keeps
// a registry of resize listeners; the hosting process reports width changes
// to it and every live instance gets notified, the same way a browser
// carousel listens to window resizes.

use crate::models::CarouselOptions;
use crate::state::SlideCountResolver;
use crate::ui::carousel::{
    CarouselBackend, CarouselInstance, MountError, ResizeListener, Subscription,
};
use crate::ui::handles::{ArrowDirection, ElementHandle, ElementIds, ElementRole};
use indexmap::IndexMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type SharedListener = Arc<dyn Fn(u32) + Send + Sync>;

/// Viewport shared by the hosting process and every headless instance.
pub struct HeadlessViewport {
    width: AtomicU32,
    next_listener: AtomicU64,
    listeners: Mutex<IndexMap<u64, SharedListener>>,
}

impl HeadlessViewport {
    pub fn new(width: u32) -> Arc<Self> {
        Arc::new(Self {
            width: AtomicU32::new(width),
            next_listener: AtomicU64::new(0),
            listeners: Mutex::new(IndexMap::new()),
        })
    }

    pub fn width(&self) -> u32 {
        self.width.load(Ordering::SeqCst)
    }

    /// Record a new width and notify every registered listener.
    ///
    /// Returns the number of listeners notified; zero when the width did not
    /// change.
    pub fn resize(&self, width: u32) -> usize {
        if self.width.swap(width, Ordering::SeqCst) == width {
            return 0;
        }

        // Listeners may unregister themselves, so call them outside the lock
        let listeners: Vec<SharedListener> = match self.listeners.lock() {
            Ok(guard) => guard.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        };

        tracing::debug!(
            "Viewport resized to {}px, notifying {} listeners",
            width,
            listeners.len()
        );

        for listener in &listeners {
            listener(width);
        }
        listeners.len()
    }

    /// Report a viewport width coming from the host.
    ///
    /// A live instance hears about it through its resize listener and its
    /// controller re-resolves the slide count. With no instance listening yet
    /// the resolver is updated directly, so the first mount picks it up.
    pub fn apply_width(&self, width: u32, resolver: &SlideCountResolver) -> usize {
        let notified = self.resize(width);
        if notified == 0 {
            resolver.observe_width(width);
        }
        notified
    }

    pub fn listener_count(&self) -> usize {
        self.with_listeners(|listeners| listeners.len())
    }

    fn register(&self, listener: ResizeListener) -> u64 {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        let listener: SharedListener = Arc::from(listener);
        self.with_listeners(|listeners| {
            listeners.insert(id, listener);
        });
        id
    }

    fn unregister(&self, id: u64) -> bool {
        self.with_listeners(|listeners| listeners.shift_remove(&id).is_some())
    }

    fn with_listeners<R>(&self, f: impl FnOnce(&mut IndexMap<u64, SharedListener>) -> R) -> R {
        match self.listeners.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl std::fmt::Debug for HeadlessViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessViewport")
            .field("width", &self.width())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Backend that creates [`HeadlessInstance`]s bound to a shared viewport.
#[derive(Debug)]
pub struct HeadlessBackend {
    viewport: Arc<HeadlessViewport>,
    ids: Arc<ElementIds>,
}

impl HeadlessBackend {
    pub fn new(viewport: Arc<HeadlessViewport>, ids: Arc<ElementIds>) -> Self {
        Self { viewport, ids }
    }
}

impl CarouselBackend for HeadlessBackend {
    fn mount(
        &mut self,
        container: &ElementHandle,
        slides: &[ElementHandle],
        options: &CarouselOptions,
    ) -> Result<Box<dyn CarouselInstance>, MountError> {
        if container.role != ElementRole::Container {
            return Err(MountError::Backend(format!(
                "{} is a {:?}, not a carousel container",
                container.id, container.role
            )));
        }

        let arrows = vec![
            self.ids.allocate(ElementRole::Arrow(ArrowDirection::Prev)),
            self.ids.allocate(ElementRole::Arrow(ArrowDirection::Next)),
        ];

        tracing::info!(
            "Mounted {:?} carousel on {}: {} slides, {} per page, autoplay every {:?}",
            options.kind,
            container.id,
            slides.len(),
            options.per_page,
            options.interval
        );

        Ok(Box::new(HeadlessInstance {
            viewport: Arc::clone(&self.viewport),
            container: *container,
            arrows,
            listeners: Arc::new(Mutex::new(Vec::new())),
            destroyed: false,
        }))
    }
}

/// A mounted headless carousel.
pub struct HeadlessInstance {
    viewport: Arc<HeadlessViewport>,
    container: ElementHandle,
    arrows: Vec<ElementHandle>,
    listeners: Arc<Mutex<Vec<u64>>>,
    destroyed: bool,
}

impl CarouselInstance for HeadlessInstance {
    fn on_resize(&mut self, listener: ResizeListener) -> Subscription {
        let id = self.viewport.register(listener);
        if let Ok(mut owned) = self.listeners.lock() {
            owned.push(id);
        }

        let viewport = Arc::clone(&self.viewport);
        let owned = Arc::clone(&self.listeners);
        Subscription::new(move || {
            viewport.unregister(id);
            if let Ok(mut owned) = owned.lock() {
                owned.retain(|other| *other != id);
            }
        })
    }

    fn arrows(&self) -> Vec<ElementHandle> {
        self.arrows.clone()
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        let remaining = match self.listeners.lock() {
            Ok(mut owned) => std::mem::take(&mut *owned),
            Err(_) => Vec::new(),
        };
        for id in remaining {
            self.viewport.unregister(id);
        }

        tracing::debug!("Destroyed carousel on {}", self.container.id);
    }
}

impl Drop for HeadlessInstance {
    fn drop(&mut self) {
        self.destroy();
    }
}
