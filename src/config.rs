//! Sizing and appearance configuration.
//!
//! [`SizingConfig`] is an immutable snapshot. Changing it means building a
//! new one (usually from [`SizingConfig::to_builder`]) and handing it to
//! [`crate::TimelineCard::set_config`], which is the single place a reload
//! gets triggered.

use crate::defaults;
use crate::errors::ConfigError;
use crate::types::{Color, Length};

/// Four-sided card margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: Length,
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
}

impl Margins {
    pub fn uniform(value: Length) -> Self {
        Self { left: value, top: value, right: value, bottom: value }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::uniform(defaults::MARGIN)
    }
}

/// Every size the metrics engine and the spine builder depend on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingConfig {
    pub item_shape_height: Length,
    pub sub_item_shape_height: Length,
    pub group_item_shape_height: Length,
    pub icon_scale_factor: f64,
    pub padding_between_items: Length,
    pub padding_between_sub_items: Length,
    pub padding_around_group: Length,
    pub margins: Margins,
    pub line_width: Length,
    /// Gap between the icon column and the description column
    pub column_gap: Length,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            item_shape_height: defaults::ITEM_SHAPE_HEIGHT,
            sub_item_shape_height: defaults::SUB_ITEM_SHAPE_HEIGHT,
            group_item_shape_height: defaults::GROUP_ITEM_SHAPE_HEIGHT,
            icon_scale_factor: defaults::ICON_SCALE_FACTOR,
            padding_between_items: defaults::PADDING_BETWEEN_ITEMS,
            padding_between_sub_items: defaults::PADDING_BETWEEN_SUB_ITEMS,
            padding_around_group: defaults::PADDING_AROUND_ITEM_GROUP,
            margins: Margins::default(),
            line_width: defaults::LINE_WIDTH,
            column_gap: defaults::MARGIN_AROUND_TIMELINE,
        }
    }
}

impl SizingConfig {
    pub fn builder() -> SizingConfigBuilder {
        SizingConfigBuilder::default()
    }

    /// Start a builder pre-filled with this snapshot's values
    pub fn to_builder(&self) -> SizingConfigBuilder {
        let m = &self.margins;
        SizingConfigBuilder {
            item_shape_height: self.item_shape_height.raw(),
            sub_item_shape_height: self.sub_item_shape_height.raw(),
            group_item_shape_height: self.group_item_shape_height.raw(),
            icon_scale_factor: self.icon_scale_factor,
            padding_between_items: self.padding_between_items.raw(),
            padding_between_sub_items: self.padding_between_sub_items.raw(),
            padding_around_group: self.padding_around_group.raw(),
            margins: [m.left.raw(), m.top.raw(), m.right.raw(), m.bottom.raw()],
            line_width: self.line_width.raw(),
            column_gap: self.column_gap.raw(),
        }
    }

    /// Width of the icon column: wide enough for the largest marker
    pub fn icon_column_width(&self) -> Length {
        self.item_shape_height
            .max(self.sub_item_shape_height)
            .max(self.group_item_shape_height)
    }

    /// Horizontal position of the spine
    pub fn spine_x(&self) -> f64 {
        (self.margins.left + self.icon_column_width() / 2.0).raw()
    }

    /// Left edge of the description column
    pub fn description_column_x(&self) -> f64 {
        (self.margins.left + self.icon_column_width() + self.column_gap).raw()
    }

    /// Width left for description content in a card of `card_width`
    pub fn description_width(&self, card_width: f64) -> f64 {
        card_width - (self.description_column_x() + self.margins.right.raw())
    }

    /// Icon slot height for a top-level element
    pub fn top_level_shape_height(&self, is_group: bool) -> Length {
        if is_group {
            self.group_item_shape_height
        } else {
            self.item_shape_height
        }
    }
}

/// Builder producing a validated [`SizingConfig`]
#[derive(Debug, Clone)]
pub struct SizingConfigBuilder {
    item_shape_height: f64,
    sub_item_shape_height: f64,
    group_item_shape_height: f64,
    icon_scale_factor: f64,
    padding_between_items: f64,
    padding_between_sub_items: f64,
    padding_around_group: f64,
    margins: [f64; 4],
    line_width: f64,
    column_gap: f64,
}

impl Default for SizingConfigBuilder {
    fn default() -> Self {
        SizingConfig::default().to_builder()
    }
}

impl SizingConfigBuilder {
    pub fn item_shape_height(mut self, v: f64) -> Self {
        self.item_shape_height = v;
        self
    }

    pub fn sub_item_shape_height(mut self, v: f64) -> Self {
        self.sub_item_shape_height = v;
        self
    }

    pub fn group_item_shape_height(mut self, v: f64) -> Self {
        self.group_item_shape_height = v;
        self
    }

    pub fn icon_scale_factor(mut self, v: f64) -> Self {
        self.icon_scale_factor = v;
        self
    }

    pub fn padding_between_items(mut self, v: f64) -> Self {
        self.padding_between_items = v;
        self
    }

    pub fn padding_between_sub_items(mut self, v: f64) -> Self {
        self.padding_between_sub_items = v;
        self
    }

    pub fn padding_around_group(mut self, v: f64) -> Self {
        self.padding_around_group = v;
        self
    }

    /// Margins in left, top, right, bottom order
    pub fn margins(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.margins = [left, top, right, bottom];
        self
    }

    pub fn line_width(mut self, v: f64) -> Self {
        self.line_width = v;
        self
    }

    pub fn column_gap(mut self, v: f64) -> Self {
        self.column_gap = v;
        self
    }

    pub fn build(self) -> Result<SizingConfig, ConfigError> {
        let len = |field: &'static str, v: f64| {
            Length::try_non_negative(v)
                .map_err(|source| ConfigError::InvalidLength { field, source })
        };

        if !(0.0..=1.0).contains(&self.icon_scale_factor) {
            return Err(ConfigError::IconScaleOutOfRange { value: self.icon_scale_factor });
        }

        let [left, top, right, bottom] = self.margins;

        Ok(SizingConfig {
            item_shape_height: len("item_shape_height", self.item_shape_height)?,
            sub_item_shape_height: len("sub_item_shape_height", self.sub_item_shape_height)?,
            group_item_shape_height: len("group_item_shape_height", self.group_item_shape_height)?,
            icon_scale_factor: self.icon_scale_factor,
            padding_between_items: len("padding_between_items", self.padding_between_items)?,
            padding_between_sub_items: len(
                "padding_between_sub_items",
                self.padding_between_sub_items,
            )?,
            padding_around_group: len("padding_around_group", self.padding_around_group)?,
            margins: Margins {
                left: len("margins.left", left)?,
                top: len("margins.top", top)?,
                right: len("margins.right", right)?,
                bottom: len("margins.bottom", bottom)?,
            },
            line_width: len("line_width", self.line_width)?,
            column_gap: len("column_gap", self.column_gap)?,
        })
    }
}

/// Card appearance handed to the rendering surface as-is
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub line_color: Color,
    pub corner_radius: f64,
    pub border_color: Color,
    pub border_width: f64,
    pub background: Option<Color>,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            line_color: Color::named(defaults::LINE_COLOR),
            corner_radius: defaults::CORNER_RADIUS,
            border_color: Color::named(defaults::BORDER_COLOR),
            border_width: defaults::BORDER_WIDTH,
            background: None,
        }
    }
}
