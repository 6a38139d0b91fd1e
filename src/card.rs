//! The timeline card: owns configuration and data, runs reload cycles, and
//! dispatches touches.
//!
//! A reload is synchronous and always replaces the previous [`CardFrame`]
//! wholesale:
//!
//! ```text
//! Idle -> CleaningUp -> ComputingMetrics -> BuildingPath -> PlacingViews -> Ready
//! ```
//!
//! Mutations made through the `set_*` methods restart the cycle when
//! autoreload is on. With autoreload off the previous frame stays in place
//! and the card reports itself stale until [`TimelineCard::reload`] runs.

use glam::{DVec2, dvec2};

use crate::config::{CardStyle, SizingConfig};
use crate::element::Element;
use crate::errors::ConfigError;
use crate::hit::{ColumnSpan, locate};
use crate::layout::{LayoutPlan, SlotIndex, compute_layout};
use crate::path::{PathDescription, build_path};
use crate::placement::{DescriptionPlacement, IconPlacement, Placements, place_all};
use crate::types::{Length, Rect};

/// Supplies the element tree on [`TimelineCard::reload_data`]
pub trait CardDataProvider {
    /// `content_width` is the width available to description content
    fn elements_for_card(&mut self, content_width: f64) -> Vec<Element>;
}

impl<F> CardDataProvider for F
where
    F: FnMut(f64) -> Vec<Element>,
{
    fn elements_for_card(&mut self, content_width: f64) -> Vec<Element> {
        self(content_width)
    }
}

/// Receives the outcome of [`TimelineCard::touch_down`]
pub trait CardEvents {
    fn element_selected(&mut self, index: usize);
    fn sub_element_selected(&mut self, index: usize, sub_index: usize);
    fn header_touched(&mut self) {}
    fn footer_touched(&mut self) {}
}

/// Drawing backend that receives the result of every reload.
///
/// Placements and the spine are in content coordinates; `content_origin`
/// passed to [`begin`](RenderSurface::begin) is where content starts inside
/// the card (below the header).
pub trait RenderSurface {
    /// Drop everything drawn by the previous reload
    fn clear(&mut self);
    fn begin(&mut self, size: DVec2, content_origin: DVec2, style: &CardStyle);
    fn stroke_spine(&mut self, path: &PathDescription, style: &CardStyle, line_width: f64);
    fn place_description(&mut self, placement: &DescriptionPlacement);
    fn place_icon(&mut self, placement: &IconPlacement);
}

/// Reload phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    CleaningUp,
    ComputingMetrics,
    BuildingPath,
    PlacingViews,
    Ready,
}

/// What a touch landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Header,
    Footer,
    Element(usize),
    SubElement(usize, usize),
}

impl From<SlotIndex> for Touch {
    fn from(slot: SlotIndex) -> Self {
        match slot.sub_index {
            None => Touch::Element(slot.index),
            Some(sub) => Touch::SubElement(slot.index, sub),
        }
    }
}

/// Everything one reload produced
#[derive(Debug, Clone, PartialEq)]
pub struct CardFrame {
    pub plan: LayoutPlan,
    pub path: PathDescription,
    pub placements: Placements,
    /// Full card size including header and footer
    pub size: DVec2,
}

pub struct TimelineCard {
    width: Length,
    config: SizingConfig,
    style: CardStyle,
    autoreload: bool,
    header_height: Option<Length>,
    footer_height: Option<Length>,
    source: Vec<Element>,
    provider: Option<Box<dyn CardDataProvider>>,
    surface: Option<Box<dyn RenderSurface>>,
    state: CardState,
    stale: bool,
    frame: Option<CardFrame>,
}

impl std::fmt::Debug for TimelineCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineCard")
            .field("width", &self.width)
            .field("config", &self.config)
            .field("autoreload", &self.autoreload)
            .field("elements", &self.source.len())
            .field("state", &self.state)
            .field("stale", &self.stale)
            .finish_non_exhaustive()
    }
}

impl TimelineCard {
    /// Card of fixed `width`; its height follows from the data on reload
    pub fn new(width: f64) -> Result<Self, ConfigError> {
        let width = Length::try_non_negative(width)
            .map_err(|_| ConfigError::InvalidWidth { value: width })?;
        Ok(Self {
            width,
            config: SizingConfig::default(),
            style: CardStyle::default(),
            autoreload: true,
            header_height: None,
            footer_height: None,
            source: Vec::new(),
            provider: None,
            surface: None,
            state: CardState::Idle,
            stale: false,
            frame: None,
        })
    }

    pub fn with_config(mut self, config: SizingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_surface(mut self, surface: impl RenderSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    pub fn with_provider(mut self, provider: impl CardDataProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn width(&self) -> f64 {
        self.width.raw()
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn source(&self) -> &[Element] {
        &self.source
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Whether a mutation happened since the last reload
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn autoreload(&self) -> bool {
        self.autoreload
    }

    /// Result of the last reload
    pub fn frame(&self) -> Option<&CardFrame> {
        self.frame.as_ref()
    }

    pub fn plan(&self) -> Option<&LayoutPlan> {
        self.frame.as_ref().map(|f| &f.plan)
    }

    /// Width available to description content
    pub fn description_width(&self) -> f64 {
        self.config.description_width(self.width.raw())
    }

    /// Timeline height plus header and footer
    pub fn height(&self) -> f64 {
        (self.content_height() + self.header() + self.footer()).raw()
    }

    pub fn header_frame(&self) -> Option<Rect> {
        self.header_height
            .map(|h| Rect::new(0.0, 0.0, self.width.raw(), h.raw()))
    }

    pub fn footer_frame(&self) -> Option<Rect> {
        let top = self.header() + self.content_height();
        self.footer_height
            .map(|h| Rect::new(0.0, top.raw(), self.width.raw(), h.raw()))
    }

    fn header(&self) -> Length {
        self.header_height.unwrap_or(Length::ZERO)
    }

    fn footer(&self) -> Length {
        self.footer_height.unwrap_or(Length::ZERO)
    }

    fn content_height(&self) -> Length {
        self.frame
            .as_ref()
            .map(|f| f.plan.total_height)
            .unwrap_or(Length::ZERO)
    }

    pub fn set_config(&mut self, config: SizingConfig) {
        self.config = config;
        self.mutated("config");
    }

    pub fn set_style(&mut self, style: CardStyle) {
        self.style = style;
        self.mutated("style");
    }

    pub fn set_source(&mut self, source: Vec<Element>) {
        self.source = source;
        self.mutated("source");
    }

    pub fn set_header(&mut self, height: Option<Length>) {
        self.header_height = height;
        self.mutated("header");
    }

    pub fn set_footer(&mut self, height: Option<Length>) {
        self.footer_height = height;
        self.mutated("footer");
    }

    pub fn set_provider(&mut self, provider: Option<Box<dyn CardDataProvider>>) {
        self.provider = provider;
    }

    pub fn set_surface(&mut self, surface: Option<Box<dyn RenderSurface>>) {
        self.surface = surface;
    }

    /// Turning autoreload on always reloads
    pub fn set_autoreload(&mut self, autoreload: bool) {
        self.autoreload = autoreload;
        if autoreload {
            self.reload();
        }
    }

    fn mutated(&mut self, _what: &'static str) {
        if self.autoreload {
            self.reload();
        } else {
            crate::log::debug!(what = _what, "card mutated, reload deferred");
            self.stale = true;
        }
    }

    /// Pull fresh elements from the data provider, then reload.
    ///
    /// Without a provider this does nothing.
    pub fn reload_data(&mut self) {
        let content_width = self.description_width();
        let Some(provider) = self.provider.as_mut() else {
            return;
        };
        self.source = provider.elements_for_card(content_width);
        self.reload();
    }

    /// Run a full reload cycle and hand the result to the surface
    pub fn reload(&mut self) {
        self.enter(CardState::CleaningUp);
        self.frame = None;
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }

        self.enter(CardState::ComputingMetrics);
        let plan = compute_layout(&self.source, &self.config);

        self.enter(CardState::BuildingPath);
        let path = build_path(&self.source, &plan, &self.config);

        self.enter(CardState::PlacingViews);
        let placements = place_all(&self.source, &plan, &self.config, self.width.raw());
        let size = dvec2(
            self.width.raw(),
            (plan.total_height + self.header() + self.footer()).raw(),
        );
        let frame = CardFrame { plan, path, placements, size };

        if let Some(surface) = self.surface.as_deref_mut() {
            let content_origin = dvec2(0.0, self.header_height.unwrap_or(Length::ZERO).raw());
            hand_off(surface, &frame, &self.style, &self.config, content_origin);
        }

        self.frame = Some(frame);
        self.stale = false;
        self.enter(CardState::Ready);
    }

    fn enter(&mut self, state: CardState) {
        crate::log::debug!(from = ?self.state, to = ?state, "card state");
        self.state = state;
    }

    /// Resolve a touch at `point` (card coordinates) and notify `events`.
    ///
    /// The header wins over the footer, which wins over the timeline. At most
    /// one callback fires.
    pub fn touch_down(&self, point: DVec2, events: &mut dyn CardEvents) -> Option<Touch> {
        let touch = self.resolve_touch(point);
        crate::log::debug!(x = point.x, y = point.y, ?touch, "touch down");

        match touch? {
            Touch::Header => events.header_touched(),
            Touch::Footer => events.footer_touched(),
            Touch::Element(index) => events.element_selected(index),
            Touch::SubElement(index, sub_index) => events.sub_element_selected(index, sub_index),
        }
        touch
    }

    fn resolve_touch(&self, point: DVec2) -> Option<Touch> {
        if self.header_frame().is_some_and(|r| r.contains(point)) {
            return Some(Touch::Header);
        }
        if self.footer_frame().is_some_and(|r| r.contains(point)) {
            return Some(Touch::Footer);
        }

        let plan = self.plan()?;
        let local = point - dvec2(0.0, self.header().raw());
        let icon_column = ColumnSpan::new(
            self.config.margins.left.raw(),
            (self.config.icon_column_width() + self.config.column_gap).raw(),
        );
        let description_column =
            ColumnSpan::new(self.config.description_column_x(), self.description_width());

        locate(local, plan, icon_column, description_column).map(Touch::from)
    }
}

fn hand_off(
    surface: &mut dyn RenderSurface,
    frame: &CardFrame,
    style: &CardStyle,
    config: &SizingConfig,
    content_origin: DVec2,
) {
    surface.begin(frame.size, content_origin, style);
    surface.stroke_spine(&frame.path, style, config.line_width.raw());
    for description in &frame.placements.descriptions {
        surface.place_description(description);
    }
    for icon in &frame.placements.icons {
        surface.place_icon(icon);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::element::{Icon, Milestone};

    #[derive(Debug, Default)]
    struct Recorded {
        events: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct RecordingSurface(Rc<RefCell<Recorded>>);

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self) {
            self.0.borrow_mut().events.push("clear".into());
        }
        fn begin(&mut self, size: DVec2, content_origin: DVec2, _: &CardStyle) {
            self.0
                .borrow_mut()
                .events
                .push(format!("begin {}x{} at {}", size.x, size.y, content_origin.y));
        }
        fn stroke_spine(&mut self, path: &PathDescription, _: &CardStyle, line_width: f64) {
            self.0
                .borrow_mut()
                .events
                .push(format!("spine {} markers, width {line_width}", path.stamps.len()));
        }
        fn place_description(&mut self, placement: &DescriptionPlacement) {
            self.0
                .borrow_mut()
                .events
                .push(format!("description {:?}", placement.slot));
        }
        fn place_icon(&mut self, placement: &IconPlacement) {
            self.0.borrow_mut().events.push(format!("icon {}", placement.icon.0));
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Events(Vec<Touch>);

    impl CardEvents for Events {
        fn element_selected(&mut self, index: usize) {
            self.0.push(Touch::Element(index));
        }
        fn sub_element_selected(&mut self, index: usize, sub_index: usize) {
            self.0.push(Touch::SubElement(index, sub_index));
        }
        fn header_touched(&mut self) {
            self.0.push(Touch::Header);
        }
        fn footer_touched(&mut self) {
            self.0.push(Touch::Footer);
        }
    }

    fn three_items() -> Vec<Element> {
        (0..3)
            .map(|i| Element::item(Milestone::captioned(format!("item {i}"), "")))
            .collect()
    }

    #[test]
    fn rejects_bad_width() {
        assert_eq!(
            TimelineCard::new(-1.0).unwrap_err(),
            ConfigError::InvalidWidth { value: -1.0 }
        );
        assert!(TimelineCard::new(f64::NAN).is_err());
    }

    #[test]
    fn new_card_is_idle() {
        let card = TimelineCard::new(320.0).unwrap();
        assert_eq!(card.state(), CardState::Idle);
        assert!(card.frame().is_none());
        assert_eq!(card.height(), 0.0);
    }

    #[test]
    fn setting_source_reloads() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_source(three_items());
        assert_eq!(card.state(), CardState::Ready);
        assert_eq!(card.height(), 180.0);
        assert!(!card.is_stale());
    }

    #[test]
    fn autoreload_off_defers_until_reload() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_autoreload(false);
        card.set_source(three_items());
        assert!(card.is_stale());
        assert!(card.frame().is_none());

        card.reload();
        assert!(!card.is_stale());
        assert_eq!(card.plan().unwrap().icon_spaces.len(), 3);
    }

    #[test]
    fn stale_plan_stays_until_explicit_reload() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_source(three_items());
        let before = card.frame().cloned();
        assert_eq!(card.height(), 180.0);

        card.set_autoreload(false);
        let tighter = SizingConfig::builder().padding_between_items(0.0).build().unwrap();
        card.set_config(tighter);

        assert!(card.is_stale());
        assert_eq!(card.state(), CardState::Ready);
        assert_eq!(card.frame().cloned(), before);
        assert_eq!(card.height(), 180.0);

        card.reload();
        assert!(!card.is_stale());
        assert_eq!(card.height(), 160.0);
    }

    #[test]
    fn enabling_autoreload_reloads() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_autoreload(false);
        card.set_source(three_items());
        card.set_autoreload(true);
        assert!(!card.is_stale());
        assert_eq!(card.height(), 180.0);
    }

    #[test]
    fn config_change_relayouts() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_source(three_items());
        let config = SizingConfig::builder().padding_between_items(0.0).build().unwrap();
        card.set_config(config);
        assert_eq!(card.height(), 160.0);
    }

    #[test]
    fn reload_data_passes_description_width() {
        let seen = Rc::new(RefCell::new(None));
        let seen_in = Rc::clone(&seen);
        let mut card = TimelineCard::new(320.0).unwrap().with_provider(move |width: f64| {
            *seen_in.borrow_mut() = Some(width);
            vec![Element::item(Milestone::bare())]
        });
        card.reload_data();
        assert_eq!(*seen.borrow(), Some(210.0));
        assert_eq!(card.source().len(), 1);
    }

    #[test]
    fn surface_receives_hand_off() {
        let surface = RecordingSurface::default();
        let mut card = TimelineCard::new(320.0).unwrap().with_surface(surface.clone());
        card.set_header(Some(Length(30.0)));
        card.set_source(vec![
            Element::item(Milestone::captioned("a", "").with_icon(Icon::new("star"))),
            Element::item(Milestone::bare()),
        ]);

        let recorded = surface.0.borrow();
        let last_clear = recorded.events.iter().rposition(|e| e == "clear").unwrap();
        assert_eq!(
            &recorded.events[last_clear..],
            [
                "clear",
                "begin 320x160 at 30",
                "spine 2 markers, width 2",
                "description SlotIndex { index: 0, sub_index: None }",
                "icon star",
            ]
        );
    }

    #[test]
    fn touch_precedence() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_header(Some(Length(50.0)));
        card.set_footer(Some(Length(40.0)));
        card.set_source(vec![Element::group(
            Milestone::captioned("g", ""),
            vec![Milestone::captioned("c", "")],
        )]);

        let mut events = Events::default();
        assert_eq!(card.touch_down(dvec2(10.0, 10.0), &mut events), Some(Touch::Header));
        // timeline is 20 + 50 + 10 + 40 + 20 = 140 tall, footer starts at 190
        assert_eq!(card.touch_down(dvec2(10.0, 200.0), &mut events), Some(Touch::Footer));
        assert_eq!(card.touch_down(dvec2(45.0, 50.0 + 45.0), &mut events), Some(Touch::Element(0)));
        assert_eq!(
            card.touch_down(dvec2(150.0, 50.0 + 100.0), &mut events),
            Some(Touch::SubElement(0, 0))
        );
        assert_eq!(card.touch_down(dvec2(5.0, 60.0), &mut events), None);
        assert_eq!(
            events.0,
            vec![
                Touch::Header,
                Touch::Footer,
                Touch::Element(0),
                Touch::SubElement(0, 0)
            ]
        );
    }

    #[test]
    fn touch_before_reload_only_hits_header() {
        let mut card = TimelineCard::new(320.0).unwrap();
        card.set_autoreload(false);
        card.set_header(Some(Length(20.0)));
        let mut events = Events::default();
        assert_eq!(card.touch_down(dvec2(1.0, 1.0), &mut events), Some(Touch::Header));
    }
}
