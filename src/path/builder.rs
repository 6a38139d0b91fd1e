//! Spine builder.
//!
//! The spine is a vertical line at the icon column's center, broken at every
//! milestone by that milestone's marker. Marker positions are re-derived here
//! from raw description heights (overflow past the slot plus the gap chosen
//! by [`crate::layout::gaps`]) rather than read off the [`LayoutPlan`]; the
//! plan is only used to report drift.

use glam::dvec2;

use crate::config::SizingConfig;
use crate::element::Element;
use crate::layout::{LayoutPlan, SlotIndex, gaps};

use super::{MarkerStamp, MilestoneShape, Outline, PathDescription, PathOp, SpineSegment};

/// Positions closer than this are treated as the same point
const DRIFT_TOLERANCE: f64 = 1e-6;

/// Incrementally assembles a [`PathDescription`] down a fixed x.
///
/// Each [`stamp`](SpineBuilder::stamp) first joins the previous marker's
/// bottom to the new marker's top with a straight segment, then appends the
/// marker outline. A shape that draws nothing gets a straight line across
/// its slot instead, so the spine stays continuous.
#[derive(Debug)]
pub struct SpineBuilder {
    x: f64,
    path: PathDescription,
    /// Bottom edge of the previous marker, `None` before the first stamp
    last_bottom: Option<f64>,
}

impl SpineBuilder {
    pub fn new(x: f64) -> Self {
        Self {
            x,
            path: PathDescription::default(),
            last_bottom: None,
        }
    }

    /// Stamp a marker occupying `top..top + height` and connect it to the
    /// previous one.
    pub fn stamp(&mut self, slot: SlotIndex, shape: MilestoneShape, top: f64, height: f64) {
        if let Some(from_y) = self.last_bottom {
            self.path.ops.push(PathOp::MoveTo(dvec2(self.x, from_y)));
            self.path.ops.push(PathOp::LineTo(dvec2(self.x, top)));
            self.path.segments.push(SpineSegment { from_y, to_y: top });
        }

        let center = dvec2(self.x, top + height / 2.0);
        if shape.is_visible() {
            self.path.ops.extend(shape.outline(center, height));
        } else {
            self.path.ops.push(PathOp::MoveTo(dvec2(self.x, top)));
            self.path.ops.push(PathOp::LineTo(dvec2(self.x, top + height)));
        }
        self.path.stamps.push(MarkerStamp { slot, shape, center, height });

        self.last_bottom = Some(top + height);
    }

    pub fn len(&self) -> usize {
        self.path.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.stamps.is_empty()
    }

    pub fn build(self) -> PathDescription {
        self.path
    }
}

/// Build the spine for `elements`.
///
/// `plan` must come from [`crate::compute_layout`] with the same elements and
/// config; markers land on its icon slots, and any disagreement is logged.
pub fn build_path(
    elements: &[Element],
    plan: &LayoutPlan,
    config: &SizingConfig,
) -> PathDescription {
    let mut spine = SpineBuilder::new(config.spine_x());
    let mut top = config.margins.top;

    for visit in gaps::walk(elements, config) {
        match plan.icon_bounds(visit.slot) {
            Some(bounds) if (bounds.origin - top).raw().abs() > DRIFT_TOLERANCE => {
                crate::log::warn!(
                    index = visit.slot.index,
                    sub_index = ?visit.slot.sub_index,
                    spine_top = top.raw(),
                    slot_origin = bounds.origin.raw(),
                    "spine marker drifted from its icon slot"
                );
            }
            Some(_) => {}
            None => {
                crate::log::warn!(
                    index = visit.slot.index,
                    "layout plan has no icon slot for milestone"
                );
            }
        }

        spine.stamp(visit.slot, visit.milestone.shape, top.raw(), visit.slot_height.raw());
        top = top + visit.slot_height + visit.line_to_next();
    }

    crate::log::debug!(markers = spine.len(), "built spine path");
    spine.build()
}
