//! Layout and geometry for timeline cards: a vertical run of milestones,
//! optionally grouped one level deep, joined by a drawn spine.
//!
//! The core is three pure functions:
//!
//! - [`compute_layout`]: element tree + [`SizingConfig`] to a [`LayoutPlan`]
//! - [`build_path`]: the spine and milestone markers as a [`PathDescription`]
//! - [`locate`]: which milestone sits under a point
//!
//! [`TimelineCard`] runs them as one reload cycle and hands the result to a
//! [`RenderSurface`]; [`TimelineFeed`] binds cards to rows of a scrolling
//! feed.

pub mod card;
pub mod config;
pub mod defaults;
pub mod element;
pub mod errors;
pub mod feed;
pub mod hit;
pub mod layout;
pub mod log;
pub mod path;
pub mod placement;
pub mod types;

pub use card::{
    CardDataProvider, CardEvents, CardFrame, CardState, RenderSurface, TimelineCard, Touch,
};
pub use config::{CardStyle, Margins, SizingConfig, SizingConfigBuilder};
pub use element::{Caption, CustomContent, Element, ElementId, Icon, Milestone};
pub use errors::ConfigError;
pub use feed::{FeedCell, FeedDataSource, FeedDelegate, FeedHeader, TimelineFeed};
pub use hit::{ColumnSpan, locate};
pub use layout::{LayoutPlan, SlotIndex, SpaceBounds, compute_layout};
pub use path::{MilestoneShape, PathDescription, PathOp, build_path};
pub use placement::{
    DescriptionBody, DescriptionPlacement, IconPlacement, Placements, place_all,
};
pub use types::{Color, Length, Rect};

/// Lay out `elements` and return the spine as SVG path data.
pub fn spine_path_data(elements: &[Element], config: &SizingConfig) -> String {
    let plan = compute_layout(elements, config);
    build_path(elements, &plan, config).to_string()
}
