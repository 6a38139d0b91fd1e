//! Hit-testing a point against a layout plan.

use glam::DVec2;

use crate::layout::{LayoutPlan, SlotIndex, SpaceBounds};
use crate::types::Rect;

/// Horizontal extent of a column in card-content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan {
    pub x: f64,
    pub width: f64,
}

impl ColumnSpan {
    pub fn new(x: f64, width: f64) -> Self {
        Self { x, width }
    }

    /// Rectangle covering `bounds` within this column
    pub fn rect(&self, bounds: &SpaceBounds) -> Rect {
        Rect::new(self.x, bounds.origin.raw(), self.width, bounds.height.raw())
    }
}

/// Find the milestone under `point`.
///
/// Icon slots are checked first, then description slots. Within each pass a
/// top-level slot is checked before its children, and the first match wins.
///
/// Containment is half-open, so a zero-height slot (for example custom
/// content of height 0) is never hit in that column. Its icon slot still
/// has the configured height and stays hittable.
pub fn locate(
    point: DVec2,
    plan: &LayoutPlan,
    icon_column: ColumnSpan,
    description_column: ColumnSpan,
) -> Option<SlotIndex> {
    let hit = locate_in(point, &plan.icon_spaces, icon_column)
        .or_else(|| locate_in(point, &plan.description_spaces, description_column));

    crate::log::trace!(x = point.x, y = point.y, ?hit, "hit test");
    hit
}

fn locate_in(point: DVec2, spaces: &[SpaceBounds], column: ColumnSpan) -> Option<SlotIndex> {
    for (index, bounds) in spaces.iter().enumerate() {
        if column.rect(bounds).contains(point) {
            return Some(SlotIndex::top(index));
        }
        for (sub_index, child) in bounds.children().iter().enumerate() {
            if column.rect(child).contains(point) {
                return Some(SlotIndex::sub(index, sub_index));
            }
        }
    }
    None
}
