//! Typed references to the elements the carousel works on.
//!
//! The controller never looks elements up by selector. Whoever renders the
//! page allocates a handle per element and passes them in as
//! [`CarouselHandles`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    Prev,
    Next,
}

/// What an element is on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// The section the carousel instance is bound to
    Container,
    /// Slide at this position of the feed
    Slide(usize),
    Logo,
    RepositoryLink,
    /// Navigation arrow created by a live instance
    Arrow(ArrowDirection),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    pub id: ElementId,
    pub role: ElementRole,
}

/// Hands out unique element ids.
#[derive(Debug, Default)]
pub struct ElementIds {
    next: AtomicU64,
}

impl ElementIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self, role: ElementRole) -> ElementHandle {
        let id = ElementId(self.next.fetch_add(1, Ordering::Relaxed));
        ElementHandle { id, role }
    }
}

/// Everything the controller needs from the rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselHandles {
    /// `None` when the page was rendered without a carousel section; mounting
    /// then fails with [`MountError::MissingContainer`](crate::ui::MountError)
    pub container: Option<ElementHandle>,
    pub slides: Vec<ElementHandle>,
    pub logo: ElementHandle,
    pub repository_link: ElementHandle,
}
