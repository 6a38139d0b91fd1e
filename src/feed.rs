//! A scrolling feed of cards.
//!
//! The feed keeps one [`FeedCell`] per visible card index and a pool of
//! recycled cells. Binding a cell to an index always pulls a fresh card and
//! elements from the [`FeedDataSource`] and reloads it, so a reused cell
//! never shows a stale plan.

use std::collections::BTreeMap;

use glam::{DVec2, dvec2};

use crate::card::{CardEvents, TimelineCard, Touch};
use crate::defaults;
use crate::element::Element;
use crate::types::{Length, Rect};

/// Supplies cards and their data to a [`TimelineFeed`]
pub trait FeedDataSource {
    fn card_count(&self) -> usize;

    /// A configured card for `index`; its elements are filled in by the feed
    fn card(&self, index: usize) -> TimelineCard;

    fn elements(&self, index: usize, content_width: f64) -> Vec<Element>;

    /// Height of a custom header shown above the card
    fn header_content(&self, _index: usize) -> Option<Length> {
        None
    }

    /// Title and optional subtitle for the simple header
    fn title_subtitle(&self, _index: usize) -> Option<(String, Option<String>)> {
        None
    }
}

/// Receives touches from any card in the feed
pub trait FeedDelegate {
    fn element_selected(&mut self, index: usize, card_index: usize);
    fn sub_element_selected(&mut self, index: usize, sub_index: usize, card_index: usize);
    fn header_touched(&mut self, _card_index: usize) {}
    fn footer_touched(&mut self, _card_index: usize) {}
}

/// Header shown above a card inside its cell
#[derive(Debug, Clone, PartialEq)]
pub enum FeedHeader {
    Custom { height: Length },
    Simple { title: String, subtitle: Option<String> },
}

impl FeedHeader {
    pub fn height(&self) -> Length {
        match self {
            FeedHeader::Custom { height } => *height,
            FeedHeader::Simple { .. } => {
                Length(defaults::FEED_HEADER_HEIGHT + defaults::FEED_HEADER_PADDING)
            }
        }
    }
}

/// One row of the feed
#[derive(Debug, Default)]
pub struct FeedCell {
    header: Option<FeedHeader>,
    card: Option<TimelineCard>,
    bottom_padding: f64,
    width: f64,
}

impl FeedCell {
    pub fn header(&self) -> Option<&FeedHeader> {
        self.header.as_ref()
    }

    pub fn card(&self) -> Option<&TimelineCard> {
        self.card.as_ref()
    }

    pub fn bottom_padding(&self) -> f64 {
        self.bottom_padding
    }

    fn header_height(&self) -> f64 {
        self.header.as_ref().map_or(0.0, |h| h.height().raw())
    }

    /// Header frame spanning the full cell width, if the cell has a header
    pub fn header_frame(&self) -> Option<Rect> {
        let header = self.header.as_ref()?;
        Some(Rect::new(0.0, 0.0, self.width, header.height().raw()))
    }

    /// Where the card sits inside the cell
    pub fn card_frame(&self) -> Option<Rect> {
        let card = self.card.as_ref()?;
        Some(Rect::new(0.0, self.header_height(), card.width(), card.height()))
    }

    /// Header, card and bottom padding stacked
    pub fn height(&self) -> f64 {
        let card = self.card.as_ref().map_or(0.0, TimelineCard::height);
        self.header_height() + card + self.bottom_padding
    }

    fn clean_up(&mut self) {
        self.header = None;
        self.card = None;
        self.bottom_padding = 0.0;
        self.width = 0.0;
    }
}

pub struct TimelineFeed {
    width: f64,
    padding_between_cards: f64,
    source: Option<Box<dyn FeedDataSource>>,
    visible: BTreeMap<usize, FeedCell>,
    pool: Vec<FeedCell>,
}

impl std::fmt::Debug for TimelineFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineFeed")
            .field("width", &self.width)
            .field("padding_between_cards", &self.padding_between_cards)
            .field("visible", &self.visible.keys().collect::<Vec<_>>())
            .field("pooled", &self.pool.len())
            .finish_non_exhaustive()
    }
}

impl TimelineFeed {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            padding_between_cards: defaults::PADDING_BETWEEN_CARDS,
            source: None,
            visible: BTreeMap::new(),
            pool: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl FeedDataSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn padding_between_cards(&self) -> f64 {
        self.padding_between_cards
    }

    /// Changes the padding and rebinds every visible cell
    pub fn set_padding_between_cards(&mut self, padding: f64) {
        self.padding_between_cards = padding;
        self.reload_data();
    }

    pub fn set_source(&mut self, source: Option<Box<dyn FeedDataSource>>) {
        self.source = source;
        self.reload_data();
    }

    pub fn card_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.card_count())
    }

    /// Indexes that currently have a bound cell
    pub fn visible_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible.keys().copied()
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    pub fn cell(&self, card_index: usize) -> Option<&FeedCell> {
        self.visible.get(&card_index)
    }

    /// Bind a cell to `card_index`, reusing a pooled one when possible.
    ///
    /// Returns `None` without a data source or when the index is out of
    /// range. An index that is already visible is rebound in place.
    pub fn cell_for_card(&mut self, card_index: usize) -> Option<&FeedCell> {
        let source = self.source.as_deref()?;
        let count = source.card_count();
        if card_index >= count {
            return None;
        }

        let mut cell = match self.visible.remove(&card_index) {
            Some(mut cell) => {
                cell.clean_up();
                cell
            }
            None => self.pool.pop().unwrap_or_default(),
        };

        cell.width = self.width;
        cell.bottom_padding = if card_index + 1 < count {
            self.padding_between_cards
        } else {
            0.0
        };

        let mut card = source.card(card_index);
        card.set_source(source.elements(card_index, card.description_width()));

        cell.header = match source.header_content(card_index) {
            Some(height) => Some(FeedHeader::Custom { height }),
            None => source
                .title_subtitle(card_index)
                .map(|(title, subtitle)| FeedHeader::Simple { title, subtitle }),
        };

        // cards with autoreload off still get a fresh plan on rebind
        if card.is_stale() || card.frame().is_none() {
            card.reload();
        }
        cell.card = Some(card);

        crate::log::debug!(card_index, height = cell.height(), "bound feed cell");
        Some(&*self.visible.entry(card_index).or_insert(cell))
    }

    /// Return the cell at `card_index` to the pool
    pub fn recycle(&mut self, card_index: usize) {
        if let Some(mut cell) = self.visible.remove(&card_index) {
            cell.clean_up();
            self.pool.push(cell);
        }
    }

    /// Rebind every visible cell; cells past the end are recycled
    pub fn reload_data(&mut self) {
        let indexes: Vec<usize> = self.visible.keys().copied().collect();
        let count = self.card_count();
        for index in indexes {
            if index < count {
                self.cell_for_card(index);
            } else {
                self.recycle(index);
            }
        }
    }

    /// Height of the row at `card_index`, if it is bound
    pub fn row_height(&self, card_index: usize) -> Option<f64> {
        self.visible.get(&card_index).map(FeedCell::height)
    }

    /// Forward a touch in cell coordinates to the card bound at `card_index`.
    ///
    /// Touches on the cell header (above the card) are not reported.
    pub fn touch_down(
        &self,
        card_index: usize,
        point_in_cell: DVec2,
        delegate: &mut dyn FeedDelegate,
    ) -> Option<Touch> {
        let cell = self.visible.get(&card_index)?;
        let card = cell.card.as_ref()?;

        let offset = cell.header_height();
        if point_in_cell.y < offset {
            return None;
        }

        let mut events = Forward { card_index, delegate };
        card.touch_down(point_in_cell - dvec2(0.0, offset), &mut events)
    }
}

struct Forward<'a> {
    card_index: usize,
    delegate: &'a mut dyn FeedDelegate,
}

impl CardEvents for Forward<'_> {
    fn element_selected(&mut self, index: usize) {
        self.delegate.element_selected(index, self.card_index);
    }

    fn sub_element_selected(&mut self, index: usize, sub_index: usize) {
        self.delegate.sub_element_selected(index, sub_index, self.card_index);
    }

    fn header_touched(&mut self) {
        self.delegate.header_touched(self.card_index);
    }

    fn footer_touched(&mut self) {
        self.delegate.footer_touched(self.card_index);
    }
}
