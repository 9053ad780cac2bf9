// UI module - page rendering and carousel lifecycle
//
// This module contains:
// - handles: Typed element references passed to the controller
// - carousel: Backend/instance seam and resize subscriptions
// - controller: CarouselController, the single owner of the live instance
// - headless: Backend used when there is no rendering surface
// - page: Page model and HTML rendering

pub mod carousel;
pub mod controller;
pub mod handles;
pub mod headless;
pub mod page;

pub use carousel::{CarouselBackend, CarouselInstance, MountError, ResizeListener, Subscription};
pub use controller::{
    CarouselController, CarouselPhase, ControllerEvent, ControllerHandle, LayoutAbandoned,
    LayoutCommit, PostLayout,
};
pub use handles::{ArrowDirection, CarouselHandles, ElementHandle, ElementId, ElementIds, ElementRole};
pub use headless::{HeadlessBackend, HeadlessInstance, HeadlessViewport};
pub use page::{DocumentHead, MetaKey, MetaTag, PageModel, Slide, escape_html};
