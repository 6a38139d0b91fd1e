//! Milestone marker shapes
//!
//! Each shape is its own type that knows how to trace its outline around a
//! center point. Every outline starts at the top-center point of the marker,
//! which is where the incoming spine segment ends.

use std::f64::consts::{FRAC_PI_2, TAU};

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::PathOp;

/// Common behavior for all marker shapes
#[enum_dispatch]
pub trait Outline {
    /// Draw ops for a marker of total `height`, centred at `center`
    fn outline(&self, center: DVec2, height: f64) -> Vec<PathOp>;

    /// Name used by [`MilestoneShape::from_name`]
    fn name(&self) -> &'static str;
}

/// Full circle whose diameter is the slot height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Circle;

impl Outline for Circle {
    fn outline(&self, center: DVec2, height: f64) -> Vec<PathOp> {
        let radius = height / 2.0;
        vec![
            PathOp::MoveTo(center - dvec2(0.0, radius)),
            PathOp::Arc {
                center,
                radius,
                start_angle: -FRAC_PI_2,
                sweep: TAU,
            },
            PathOp::Close,
        ]
    }

    fn name(&self) -> &'static str {
        "circle"
    }
}

/// Axis-aligned square, side equal to the slot height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Square;

impl Outline for Square {
    fn outline(&self, center: DVec2, height: f64) -> Vec<PathOp> {
        let h = height / 2.0;
        vec![
            PathOp::MoveTo(center + dvec2(0.0, -h)),
            PathOp::LineTo(center + dvec2(h, -h)),
            PathOp::LineTo(center + dvec2(h, h)),
            PathOp::LineTo(center + dvec2(-h, h)),
            PathOp::LineTo(center + dvec2(-h, -h)),
            PathOp::Close,
        ]
    }

    fn name(&self) -> &'static str {
        "square"
    }
}

/// Square rotated by 45°, corners touching the slot edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diamond;

impl Outline for Diamond {
    fn outline(&self, center: DVec2, height: f64) -> Vec<PathOp> {
        let h = height / 2.0;
        vec![
            PathOp::MoveTo(center + dvec2(0.0, -h)),
            PathOp::LineTo(center + dvec2(h, 0.0)),
            PathOp::LineTo(center + dvec2(0.0, h)),
            PathOp::LineTo(center + dvec2(-h, 0.0)),
            PathOp::Close,
        ]
    }

    fn name(&self) -> &'static str {
        "diamond"
    }
}

/// No marker; the spine runs straight through the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blank;

impl Outline for Blank {
    fn outline(&self, _center: DVec2, _height: f64) -> Vec<PathOp> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "blank"
    }
}

/// Marker stamped at a milestone's icon slot
#[enum_dispatch(Outline)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneShape {
    Circle(Circle),
    Square(Square),
    Diamond(Diamond),
    Blank(Blank),
}

impl Default for MilestoneShape {
    fn default() -> Self {
        MilestoneShape::Circle(Circle)
    }
}

impl MilestoneShape {
    pub const ALL: [MilestoneShape; 4] = [
        MilestoneShape::Circle(Circle),
        MilestoneShape::Square(Square),
        MilestoneShape::Diamond(Diamond),
        MilestoneShape::Blank(Blank),
    ];

    /// Look a shape up by name. Names this version doesn't know map to
    /// [`Blank`], so newer data still lays out, just without a marker.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .unwrap_or(MilestoneShape::Blank(Blank))
    }

    /// Whether this shape stamps anything at all
    pub fn is_visible(&self) -> bool {
        !matches!(self, MilestoneShape::Blank(_))
    }
}
