//! Spacing decisions shared by the metrics engine and the spine builder.
//!
//! Both consumers walk the same ordered list of [`Visit`]s. The metrics
//! engine turns each visit into slot bounds; the spine builder turns it into
//! a marker plus the line leading to the next one. Keeping the spacing rules
//! here is what keeps markers sitting exactly on their icon slots.

use crate::config::SizingConfig;
use crate::element::{Element, Milestone};
use crate::types::Length;

use super::SlotIndex;

/// One milestone in spine order, with the spacing that follows it
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub slot: SlotIndex,
    pub milestone: &'a Milestone,
    /// Configured icon slot height for this kind of milestone
    pub slot_height: Length,
    /// Raw description height (custom content or the built-in default)
    pub content_height: Length,
    pub gap_after: Length,
    /// Top-level element that owns a child list (possibly empty)
    pub opens_group: bool,
}

impl Visit<'_> {
    /// Vertical span reserved for the milestone itself
    pub fn extent(&self) -> Length {
        self.slot_height.max(self.content_height)
    }

    /// Distance from the bottom of this milestone's icon slot to the top of
    /// the next one: description overflow plus the following gap.
    pub fn line_to_next(&self) -> Length {
        self.content_height.overflow_past(self.slot_height) + self.gap_after
    }
}

/// Spacing after a standalone top-level element at `index`
pub fn after_item(elements: &[Element], index: usize, config: &SizingConfig) -> Length {
    match elements.get(index + 1) {
        Some(next) if next.is_group() => config.padding_around_group,
        Some(_) => config.padding_between_items,
        None => Length::ZERO,
    }
}

/// Spacing between a group's own milestone and its child block. Always
/// applied, even when the child list is empty.
pub fn entering_children(config: &SizingConfig) -> Length {
    config.padding_between_sub_items
}

/// Spacing after child `child_index` of a group with `child_count` children
pub fn after_child(
    child_index: usize,
    child_count: usize,
    parent_is_last: bool,
    config: &SizingConfig,
) -> Length {
    if child_index + 1 < child_count {
        config.padding_between_sub_items
    } else if parent_is_last {
        Length::ZERO
    } else {
        config.padding_around_group
    }
}

/// Flatten the element tree into spine order
pub fn walk<'a>(elements: &'a [Element], config: &SizingConfig) -> Vec<Visit<'a>> {
    let mut visits = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let milestone = &element.milestone;
        let is_last = index + 1 == elements.len();

        match &element.children {
            None => visits.push(Visit {
                slot: SlotIndex::top(index),
                milestone,
                slot_height: config.top_level_shape_height(false),
                content_height: milestone.content_height(),
                gap_after: after_item(elements, index, config),
                opens_group: false,
            }),
            Some(children) => {
                visits.push(Visit {
                    slot: SlotIndex::top(index),
                    milestone,
                    slot_height: config.top_level_shape_height(true),
                    content_height: milestone.content_height(),
                    gap_after: entering_children(config),
                    opens_group: true,
                });

                for (sub_index, child) in children.iter().enumerate() {
                    visits.push(Visit {
                        slot: SlotIndex::sub(index, sub_index),
                        milestone: child,
                        slot_height: config.sub_item_shape_height,
                        content_height: child.content_height(),
                        gap_after: after_child(sub_index, children.len(), is_last, config),
                        opens_group: false,
                    });
                }
            }
        }
    }

    visits
}
