//! The element tree a card lays out.
//!
//! A card shows an ordered list of top-level [`Element`]s. Each one wraps a
//! [`Milestone`] and may carry child milestones, which makes it a group.
//! Children are plain milestones, so the tree can never be deeper than two
//! levels.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::defaults;
use crate::path::MilestoneShape;
use crate::types::Length;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a milestone, stable for as long as the data is kept around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a fresh, process-unique id
    pub fn next() -> Self {
        ElementId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Use a caller-chosen id (for data that has its own keys)
    pub const fn from_raw(raw: u64) -> Self {
        ElementId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Title/subtitle pair shown by the built-in description view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    pub subtitle: String,
}

impl Caption {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self { title: title.into(), subtitle: subtitle.into() }
    }
}

/// Caller-drawn description content. Only its height matters here; the
/// width is always the description column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomContent {
    pub height: Length,
}

impl CustomContent {
    pub fn new(height: Length) -> Self {
        Self { height }
    }
}

/// Opaque image reference handed back to the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(pub String);

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Icon(name.into())
    }
}

/// One milestone on the spine: a marker plus an optional description
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: ElementId,
    pub shape: MilestoneShape,
    pub caption: Option<Caption>,
    pub content: Option<CustomContent>,
    pub icon: Option<Icon>,
}

impl Milestone {
    /// Milestone described by a title and subtitle
    pub fn captioned(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            caption: Some(Caption::new(title, subtitle)),
            ..Self::bare()
        }
    }

    /// Milestone described by caller content of the given height
    pub fn custom(height: Length) -> Self {
        Self {
            content: Some(CustomContent::new(height)),
            ..Self::bare()
        }
    }

    /// Milestone with no description at all; its slot is still reserved
    pub fn bare() -> Self {
        Self {
            id: ElementId::next(),
            shape: MilestoneShape::default(),
            caption: None,
            content: None,
            icon: None,
        }
    }

    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn with_shape(mut self, shape: impl Into<MilestoneShape>) -> Self {
        self.shape = shape.into();
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Height the description occupies: the custom content's own height, or
    /// the built-in description height when there is none.
    pub fn content_height(&self) -> Length {
        self.content
            .map(|c| c.height)
            .unwrap_or(defaults::DESCRIPTION_HEIGHT)
    }

    /// Whether anything will be placed in the description column
    pub fn has_description(&self) -> bool {
        self.content.is_some() || self.caption.is_some()
    }
}

/// Top-level entry of a card: a standalone milestone or a group
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub milestone: Milestone,
    /// `Some` marks a group, even when the list is empty
    pub children: Option<Vec<Milestone>>,
}

impl Element {
    pub fn item(milestone: Milestone) -> Self {
        Self { milestone, children: None }
    }

    pub fn group(milestone: Milestone, children: Vec<Milestone>) -> Self {
        Self { milestone, children: Some(children) }
    }

    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }

    /// Children of a group, empty for standalone milestones
    pub fn children(&self) -> &[Milestone] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Milestone addressed by `(index, sub_index)`-style lookup
    pub fn child(&self, sub_index: usize) -> Option<&Milestone> {
        self.children().get(sub_index)
    }
}

impl From<Milestone> for Element {
    fn from(milestone: Milestone) -> Self {
        Element::item(milestone)
    }
}
