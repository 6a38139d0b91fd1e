//! Frames for description views and icon images.
//!
//! All frames are in card-content coordinates: x from the card's left edge,
//! y from the top of the timeline area (below any header).

use glam::dvec2;

use crate::config::SizingConfig;
use crate::element::{Caption, CustomContent, Element, ElementId, Icon, Milestone};
use crate::layout::{LayoutPlan, SlotIndex, SpaceBounds};
use crate::path::PathDescription;
use crate::types::Rect;

/// What goes into a description slot
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionBody {
    /// Caller content; the surface looks it up by milestone id
    Custom(CustomContent),
    /// Built-in title/subtitle view
    Caption(Caption),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionPlacement {
    pub slot: SlotIndex,
    pub id: ElementId,
    pub frame: Rect,
    pub body: DescriptionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconPlacement {
    pub slot: SlotIndex,
    pub id: ElementId,
    pub icon: Icon,
    pub frame: Rect,
    /// Marker outline in the image's own coordinates, used to clip it
    pub mask: PathDescription,
}

/// Everything a surface needs to place besides the spine
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placements {
    pub descriptions: Vec<DescriptionPlacement>,
    pub icons: Vec<IconPlacement>,
}

/// Milestone addressed by `slot`
pub fn milestone_at(elements: &[Element], slot: SlotIndex) -> Option<&Milestone> {
    let element = elements.get(slot.index)?;
    match slot.sub_index {
        None => Some(&element.milestone),
        Some(sub) => element.child(sub),
    }
}

/// Frame for a description, or `None` when the milestone has nothing to show
pub fn place_description(
    milestone: &Milestone,
    slot: SlotIndex,
    bounds: &SpaceBounds,
    config: &SizingConfig,
    card_width: f64,
) -> Option<DescriptionPlacement> {
    let body = match (&milestone.content, &milestone.caption) {
        (Some(content), _) => DescriptionBody::Custom(*content),
        (None, Some(caption)) => DescriptionBody::Caption(caption.clone()),
        (None, None) => return None,
    };

    Some(DescriptionPlacement {
        slot,
        id: milestone.id,
        frame: Rect::new(
            config.description_column_x(),
            bounds.origin.raw(),
            config.description_width(card_width),
            bounds.height.raw(),
        ),
        body,
    })
}

/// Frame and mask for an icon, or `None` when the milestone has no icon
pub fn place_icon(
    milestone: &Milestone,
    slot: SlotIndex,
    bounds: &SpaceBounds,
    config: &SizingConfig,
) -> Option<IconPlacement> {
    let icon = milestone.icon.clone()?;

    let shape_height = bounds.height.raw();
    let scale = config.icon_scale_factor;
    let width = shape_height * scale;
    let height = bounds.height.raw() * scale;
    let pad_x = (shape_height - width) / 2.0;
    let pad_y = (bounds.height.raw() - height) / 2.0;

    let column_offset = (config.icon_column_width().raw() - shape_height) / 2.0;
    let x = config.margins.left.raw() + column_offset + pad_x;
    let y = bounds.origin.raw() + pad_y;

    let mask_height = (bounds.height - config.line_width).raw().max(0.0);
    let mask =
        PathDescription::marker(milestone.shape, dvec2(width / 2.0, height / 2.0), mask_height);

    Some(IconPlacement {
        slot,
        id: milestone.id,
        icon,
        frame: Rect::new(x, y, width, height),
        mask,
    })
}

/// Place every description and icon named by `plan`
pub fn place_all(
    elements: &[Element],
    plan: &LayoutPlan,
    config: &SizingConfig,
    card_width: f64,
) -> Placements {
    let mut placements = Placements::default();

    for slot in plan.slots() {
        let Some(milestone) = milestone_at(elements, slot) else {
            continue;
        };

        if let Some(bounds) = plan.description_bounds(slot) {
            placements
                .descriptions
                .extend(place_description(milestone, slot, bounds, config, card_width));
        }
        if let Some(bounds) = plan.icon_bounds(slot) {
            placements.icons.extend(place_icon(milestone, slot, bounds, config));
        }
    }

    crate::log::debug!(
        descriptions = placements.descriptions.len(),
        icons = placements.icons.len(),
        "placed views"
    );
    placements
}
