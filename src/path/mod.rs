//! Spine path: the connected line and milestone markers drawn down the
//! icon column.
//!
//! - `shapes`: marker outlines, one generator per [`MilestoneShape`] variant
//! - `builder`: [`build_path`] and the [`SpineBuilder`] state it drives

pub mod builder;
pub mod shapes;

pub use builder::{SpineBuilder, build_path};
pub use shapes::{Blank, Circle, Diamond, MilestoneShape, Outline, Square};

use std::f64::consts::{PI, TAU};
use std::fmt;

use glam::{DVec2, dvec2};

use crate::layout::SlotIndex;

/// A single draw instruction for the rendering surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Circular arc from `start_angle`, sweeping `sweep` radians
    /// (positive is clockwise on a y-down surface)
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    Close,
}

/// Where a marker was stamped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStamp {
    pub slot: SlotIndex,
    pub shape: MilestoneShape,
    pub center: DVec2,
    pub height: f64,
}

impl MarkerStamp {
    pub fn top(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.height / 2.0
    }
}

/// Straight spine piece joining two consecutive markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpineSegment {
    pub from_y: f64,
    pub to_y: f64,
}

impl SpineSegment {
    pub fn length(&self) -> f64 {
        self.to_y - self.from_y
    }
}

/// Ordered draw ops for one card, plus the structure they were built from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDescription {
    pub ops: Vec<PathOp>,
    pub stamps: Vec<MarkerStamp>,
    pub segments: Vec<SpineSegment>,
}

impl PathDescription {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Stamp placed for `slot`, if any
    pub fn stamp(&self, slot: SlotIndex) -> Option<&MarkerStamp> {
        self.stamps.iter().find(|s| s.slot == slot)
    }

    /// Single marker outline as its own description, e.g. for icon masks
    pub fn marker(shape: MilestoneShape, center: DVec2, height: f64) -> Self {
        Self {
            ops: shape.outline(center, height),
            stamps: Vec::new(),
            segments: Vec::new(),
        }
    }
}

/// Renders SVG path data (the `d` attribute)
impl fmt::Display for PathDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for op in &self.ops {
            f.write_str(sep)?;
            sep = " ";
            match *op {
                PathOp::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathOp::LineTo(p) => write!(f, "L{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathOp::Arc { center, radius, start_angle, sweep } => {
                    // SVG arcs can't describe a full turn, so split it in two
                    let pieces = if sweep.abs() >= TAU - 1e-9 { 2 } else { 1 };
                    let step = sweep / pieces as f64;
                    let sweep_flag = if sweep >= 0.0 { 1 } else { 0 };
                    let large_arc = if step.abs() > PI { 1 } else { 0 };
                    for i in 1..=pieces {
                        if i > 1 {
                            f.write_str(" ")?;
                        }
                        let end = center + polar(radius, start_angle + step * i as f64);
                        write!(
                            f,
                            "A{r},{r} 0 {large_arc},{sweep_flag} {},{}",
                            fmt_num(end.x),
                            fmt_num(end.y),
                            r = fmt_num(radius),
                        )?;
                    }
                }
                PathOp::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

fn polar(radius: f64, angle: f64) -> DVec2 {
    dvec2(radius * angle.cos(), radius * angle.sin())
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.abs() < 1e-9 {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(5 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (5 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
