//! Default sizes and settings (all in logical points)

use crate::types::Length;

/// Icon slot of a standalone milestone
pub const ITEM_SHAPE_HEIGHT: Length = Length::pt(40.0);
/// Icon slot of a sub-item inside a group
pub const SUB_ITEM_SHAPE_HEIGHT: Length = Length::pt(30.0);
/// Icon slot of a group's own milestone
pub const GROUP_ITEM_SHAPE_HEIGHT: Length = Length::pt(50.0);
/// Share of the slot an icon image covers
pub const ICON_SCALE_FACTOR: f64 = 0.65;

pub const PADDING_BETWEEN_ITEMS: Length = Length::pt(10.0);
pub const PADDING_BETWEEN_SUB_ITEMS: Length = Length::pt(10.0);
pub const PADDING_AROUND_ITEM_GROUP: Length = Length::pt(40.0);
pub const MARGIN: Length = Length::pt(20.0);
/// Gap between the icon column and the description column
pub const MARGIN_AROUND_TIMELINE: Length = Length::pt(20.0);
pub const LINE_WIDTH: Length = Length::pt(2.0);

/// Height of a description when the milestone has no custom content
pub const DESCRIPTION_HEIGHT: Length = Length::pt(40.0);

pub const CORNER_RADIUS: f64 = 20.0;
pub const BORDER_WIDTH: f64 = 1.0;
pub const BORDER_COLOR: &str = "lightgray";
pub const LINE_COLOR: &str = "darkgray";

pub const PADDING_BETWEEN_CARDS: f64 = 20.0;
pub const FEED_HEADER_HEIGHT: f64 = 60.0;
pub const FEED_HEADER_PADDING: f64 = 10.0;
