//! Vertical metrics for a card.
//!
//! [`compute_layout`] is a pure function of the element tree and a
//! [`SizingConfig`]. It returns a [`LayoutPlan`]: origin and height of every
//! icon slot and description slot, plus the total content height. The plan
//! is rebuilt from scratch on every reload and never patched.

pub mod gaps;

use crate::config::SizingConfig;
use crate::element::Element;
use crate::types::Length;

/// Address of a milestone: a top-level index plus an optional child index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex {
    pub index: usize,
    pub sub_index: Option<usize>,
}

impl SlotIndex {
    pub const fn top(index: usize) -> Self {
        Self { index, sub_index: None }
    }

    pub const fn sub(index: usize, sub_index: usize) -> Self {
        Self { index, sub_index: Some(sub_index) }
    }

    pub fn is_sub(&self) -> bool {
        self.sub_index.is_some()
    }
}

/// Vertical span of one slot, with child spans when the owner is a group
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceBounds {
    pub origin: Length,
    pub height: Length,
    pub children: Option<Vec<SpaceBounds>>,
}

impl SpaceBounds {
    pub fn new(origin: Length, height: Length) -> Self {
        Self { origin, height, children: None }
    }

    fn with_children(mut self) -> Self {
        self.children = Some(Vec::new());
        self
    }

    pub fn end(&self) -> Length {
        self.origin + self.height
    }

    pub fn center(&self) -> Length {
        self.origin + self.height / 2.0
    }

    /// Child spans, empty for non-groups
    pub fn children(&self) -> &[SpaceBounds] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Result of one metrics pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutPlan {
    pub total_height: Length,
    /// One entry per top-level element
    pub description_spaces: Vec<SpaceBounds>,
    /// One entry per top-level element, parallel to `description_spaces`
    pub icon_spaces: Vec<SpaceBounds>,
}

impl LayoutPlan {
    pub fn icon_bounds(&self, slot: SlotIndex) -> Option<&SpaceBounds> {
        lookup(&self.icon_spaces, slot)
    }

    pub fn description_bounds(&self, slot: SlotIndex) -> Option<&SpaceBounds> {
        lookup(&self.description_spaces, slot)
    }

    /// Every slot in spine order
    pub fn slots(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.icon_spaces.iter().enumerate().flat_map(|(index, bounds)| {
            std::iter::once(SlotIndex::top(index))
                .chain((0..bounds.children().len()).map(move |sub| SlotIndex::sub(index, sub)))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.icon_spaces.is_empty()
    }
}

fn lookup(spaces: &[SpaceBounds], slot: SlotIndex) -> Option<&SpaceBounds> {
    let top = spaces.get(slot.index)?;
    match slot.sub_index {
        None => Some(top),
        Some(sub) => top.children().get(sub),
    }
}

/// Compute vertical metrics for `elements`.
///
/// The cursor starts at the top margin. Each milestone records its
/// description slot (raw content height) and icon slot (configured slot
/// height) at the same origin, then the cursor advances by the larger of
/// the two plus the spacing chosen by [`gaps`]. The bottom margin closes
/// the pass.
pub fn compute_layout(elements: &[Element], config: &SizingConfig) -> LayoutPlan {
    let mut plan = LayoutPlan::default();
    let mut cursor = config.margins.top;

    for visit in gaps::walk(elements, config) {
        let description = SpaceBounds::new(cursor, visit.content_height);
        let icon = SpaceBounds::new(cursor, visit.slot_height);

        if visit.slot.is_sub() {
            let parents = (
                plan.description_spaces.last_mut().and_then(|b| b.children.as_mut()),
                plan.icon_spaces.last_mut().and_then(|b| b.children.as_mut()),
            );
            if let (Some(descriptions), Some(icons)) = parents {
                descriptions.push(description);
                icons.push(icon);
            }
        } else if visit.opens_group {
            plan.description_spaces.push(description.with_children());
            plan.icon_spaces.push(icon.with_children());
        } else {
            plan.description_spaces.push(description);
            plan.icon_spaces.push(icon);
        }

        cursor += visit.extent();
        cursor += visit.gap_after;
    }

    cursor += config.margins.bottom;
    plan.total_height = cursor;

    crate::log::debug!(
        elements = elements.len(),
        total_height = plan.total_height.raw(),
        "computed layout plan"
    );

    plan
}
