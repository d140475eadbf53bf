//! Geometry seam between the splitter and whatever renders the DOM.
//!
//! The splitter never computes line breaks itself: it commits a tree, asks a
//! [`LayoutHost`] for one [`LayoutSnapshot`], and reads element offsets back.
//! [`FlowLayout`] is a deterministic host that lays inline content into fixed-width lines.
use html::{Document, Id};
use std::collections::HashMap;

mod flow;
mod text;

pub use flow::FlowLayout;
pub use text::{MonospaceMeasurer, TextMeasurer};

/// A rectangle in CSS px units, relative to the laid-out container's content box.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Element boxes produced by one layout pass.
///
/// For inline elements that span several lines the rect describes the first fragment, so
/// `y` is the DOM `offsetTop` equivalent.
#[derive(Clone, Debug, Default)]
pub struct LayoutSnapshot {
    boxes: HashMap<Id, Rect>,
}

impl LayoutSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// First writer wins: a box keeps the position of its first fragment.
    pub fn insert(&mut self, id: Id, rect: Rect) {
        self.boxes.entry(id).or_insert(rect);
    }

    pub fn rect(&self, id: Id) -> Option<Rect> {
        self.boxes.get(&id).copied()
    }

    pub fn offset_top(&self, id: Id) -> Option<f32> {
        self.rect(id).map(|r| r.y)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl FromIterator<(Id, Rect)> for LayoutSnapshot {
    fn from_iter<I: IntoIterator<Item = (Id, Rect)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (id, rect) in iter {
            snapshot.insert(id, rect);
        }
        snapshot
    }
}

/// Whatever renders the DOM. One call to [`LayoutHost::layout`] is one layout flush.
pub trait LayoutHost {
    /// Lays out the subtree of `container` and reports element boxes inside it.
    /// Unknown containers yield an empty snapshot.
    fn layout(&mut self, document: &Document, container: Id) -> LayoutSnapshot;
}

impl<T: LayoutHost + ?Sized> LayoutHost for &mut T {
    fn layout(&mut self, document: &Document, container: Id) -> LayoutSnapshot {
        (**self).layout(document, container)
    }
}

impl<T: LayoutHost + ?Sized> LayoutHost for Box<T> {
    fn layout(&mut self, document: &Document, container: Id) -> LayoutSnapshot {
        (**self).layout(document, container)
    }
}
