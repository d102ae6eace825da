//! UI state container.
//!
//! All transient front-end state lives in [`Store`] and changes only through
//! [`Store::dispatch`]. Side effects are returned as [`Effect`] values for the
//! caller to run; their completions come back in as actions. Search
//! completions carry the [`SearchTicket`] they were issued with, and anything
//! but the newest ticket is dropped.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::availability::{RoomAvailability, SearchOutcome};
use crate::catalog::{Catalog, Studio};
use crate::filter::{Filter, HourField};
use crate::present::{self, Marker, ResultCard};
use crate::selection::ToggleAllPolicy;

pub const DEFAULT_MAP_CENTER: (f64, f64) = (37.556, 126.924);
pub const MAP_ZOOM: u8 = 15;
pub const SHEET_MIN_PERCENT: f64 = 15.0;
pub const SHEET_MAX_PERCENT: f64 = 85.0;
pub const SHEET_DEFAULT_PERCENT: f64 = 35.0;

/// Identifies one issued search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Which way the result sheet is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetLayout {
    /// Narrow touch screens: the sheet height is dragged by hand.
    Touch { viewport_height_px: f64 },
    /// Wide layouts ignore drags and size the sheet automatically.
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetHeight {
    Percent(f64),
    Auto,
}

/// The visible top-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    SearchOpen,
    Browsing,
    ResultsShown,
    FaqOpen,
}

/// Inline message in the search sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Warning(String),
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Notice::Error(t) | Notice::Warning(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// "Find rooms" from the map, or "change conditions" from the results.
    OpenSearch,
    /// "Map only": close the search sheet without searching.
    DismissSearch,
    OpenFaq,
    CloseFaq,
    /// Drop the current results and start over with the search sheet open.
    Reset,
    SetDate(NaiveDate),
    SetHour(HourField, u8),
    Increment(HourField),
    Decrement(HourField),
    ToggleStudio(String),
    ToggleRegion(String),
    ToggleAll,
    ToggleRegionExpanded(String),
    StudiosLoaded(Vec<Studio>),
    StudiosLoadFailed,
    SubmitSearch,
    SearchSucceeded {
        ticket: SearchTicket,
        outcome: SearchOutcome,
    },
    SearchFailed {
        ticket: SearchTicket,
    },
    LoadingTick,
    SetLayout(SheetLayout),
    DragStart {
        y_px: f64,
    },
    DragMove {
        y_px: f64,
    },
    DragEnd,
    ShareCopied,
    DismissToast,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue one search request for `filter` and report back with `ticket`.
    Search { ticket: SearchTicket, filter: Filter },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_y_px: f64,
    start_percent: f64,
    preview_percent: f64,
}

#[derive(Debug, Clone)]
pub struct Store {
    catalog: Catalog,
    filter: Filter,
    toggle_all_policy: ToggleAllPolicy,
    studios: Vec<Studio>,
    rooms: Vec<RoomAvailability>,
    unresolved: Vec<String>,
    searched: bool,
    search_open: bool,
    faq_open: bool,
    loading: bool,
    loading_index: usize,
    notice: Option<Notice>,
    banner: Option<String>,
    toast: Option<String>,
    map_center: (f64, f64),
    expanded_regions: BTreeSet<String>,
    layout: SheetLayout,
    sheet_percent: f64,
    drag: Option<Drag>,
    next_ticket: u64,
    pending: Option<SearchTicket>,
}

impl Store {
    /// Fresh state: search sheet open, nothing selected, default map view.
    #[must_use]
    pub fn new(catalog: Catalog, filter: Filter) -> Self {
        Self {
            catalog,
            filter,
            toggle_all_policy: ToggleAllPolicy::default(),
            studios: Vec::new(),
            rooms: Vec::new(),
            unresolved: Vec::new(),
            searched: false,
            search_open: true,
            faq_open: false,
            loading: false,
            loading_index: 0,
            notice: None,
            banner: None,
            toast: None,
            map_center: DEFAULT_MAP_CENTER,
            expanded_regions: BTreeSet::new(),
            layout: SheetLayout::Wide,
            sheet_percent: SHEET_DEFAULT_PERCENT,
            drag: None,
            next_ticket: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn with_toggle_all_policy(mut self, policy: ToggleAllPolicy) -> Self {
        self.toggle_all_policy = policy;
        self
    }

    /// Apply `action` and return the side effect the caller must run.
    #[must_use]
    pub fn dispatch(&mut self, action: Action) -> Effect {
        // The FAQ scrim swallows interaction with everything beneath it;
        // network, timer and environment events still land.
        if self.faq_open && Self::is_blocked_by_faq(&action) {
            return Effect::None;
        }

        match action {
            Action::OpenSearch => self.search_open = true,
            Action::DismissSearch => self.search_open = false,
            Action::OpenFaq => self.faq_open = true,
            Action::CloseFaq => self.faq_open = false,
            Action::Reset => self.reset(),
            Action::SetDate(date) => self.filter.date = date,
            Action::SetHour(field, value) => self.filter.set_hour(field, value),
            Action::Increment(field) => self.filter.increment(field),
            Action::Decrement(field) => self.filter.decrement(field),
            Action::ToggleStudio(name) => self.filter.selection.toggle_studio(&name),
            Action::ToggleRegion(name) => {
                if let Some(region) = self.catalog.region(&name) {
                    self.filter.selection.toggle_region(region);
                }
            }
            Action::ToggleAll => {
                let universe = self.catalog.selectable_studio_names();
                self.filter
                    .selection
                    .toggle_all(universe, self.toggle_all_policy);
            }
            Action::ToggleRegionExpanded(name) => {
                if !self.expanded_regions.remove(&name) {
                    self.expanded_regions.insert(name);
                }
            }
            Action::StudiosLoaded(studios) => {
                self.studios = studios;
                let universe = self.catalog.selectable_studio_names();
                self.filter.selection.select_all(universe);
            }
            Action::StudiosLoadFailed => self.studios.clear(),
            Action::SubmitSearch => return self.submit_search(),
            Action::SearchSucceeded { ticket, outcome } => {
                if self.accept(ticket) {
                    self.apply_outcome(outcome);
                }
            }
            Action::SearchFailed { ticket } => {
                if self.accept(ticket) {
                    self.notice = Some(Notice::Error(present::SERVER_FAILURE.to_string()));
                }
            }
            Action::LoadingTick => {
                if self.loading {
                    self.loading_index = (self.loading_index + 1) % present::LOADING_MESSAGES.len();
                }
            }
            Action::SetLayout(layout) => {
                self.layout = layout;
                self.drag = None;
            }
            Action::DragStart { y_px } => self.drag_start(y_px),
            Action::DragMove { y_px } => self.drag_move(y_px),
            Action::DragEnd => {
                if let Some(drag) = self.drag.take() {
                    self.sheet_percent = drag.preview_percent;
                }
            }
            Action::ShareCopied => self.toast = Some(present::SHARE_COPIED.to_string()),
            Action::DismissToast => self.toast = None,
        }
        Effect::None
    }

    fn is_blocked_by_faq(action: &Action) -> bool {
        !matches!(
            action,
            Action::CloseFaq
                | Action::OpenFaq
                | Action::StudiosLoaded(_)
                | Action::StudiosLoadFailed
                | Action::SearchSucceeded { .. }
                | Action::SearchFailed { .. }
                | Action::LoadingTick
                | Action::SetLayout(_)
                | Action::DismissToast
        )
    }

    fn reset(&mut self) {
        self.searched = false;
        self.rooms.clear();
        self.unresolved.clear();
        self.banner = None;
        self.notice = None;
        self.search_open = true;
        self.loading = false;
        self.pending = None;
        self.drag = None;
    }

    fn submit_search(&mut self) -> Effect {
        if self.filter.validate().is_err() {
            // Drops any in-flight search.
            self.pending = None;
            self.loading = false;
            self.search_open = true;
            self.notice = Some(Notice::Error(present::NO_STUDIO_SELECTED.to_string()));
            return Effect::None;
        }
        self.notice = None;
        self.loading = true;
        self.loading_index = 0;
        self.next_ticket += 1;
        let ticket = SearchTicket(self.next_ticket);
        self.pending = Some(ticket);
        Effect::Search {
            ticket,
            filter: self.filter.clone(),
        }
    }

    /// True when `ticket` is the outstanding request; consumes it.
    fn accept(&mut self, ticket: SearchTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.loading = false;
        true
    }

    fn apply_outcome(&mut self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::NoMatches => {
                self.notice = Some(Notice::Error(present::NO_MATCHES.to_string()));
            }
            SearchOutcome::AllUnresolved { studios } => {
                self.notice = Some(Notice::Warning(present::unresolved_warning(&studios)));
            }
            SearchOutcome::Found { rooms, unresolved } => {
                if let Some(center) = rooms.first().and_then(RoomAvailability::coordinates) {
                    self.map_center = center;
                }
                self.banner =
                    (!unresolved.is_empty()).then(|| present::unresolved_banner(&unresolved));
                self.rooms = rooms;
                self.unresolved = unresolved;
                self.searched = true;
                self.search_open = false;
                self.notice = None;
            }
        }
    }

    fn drag_start(&mut self, y_px: f64) {
        if !matches!(self.layout, SheetLayout::Touch { .. })
            || !self.result_sheet_visible()
            || !y_px.is_finite()
        {
            return;
        }
        self.drag = Some(Drag {
            start_y_px: y_px,
            start_percent: self.sheet_percent,
            preview_percent: self.sheet_percent,
        });
    }

    fn drag_move(&mut self, y_px: f64) {
        let SheetLayout::Touch { viewport_height_px } = self.layout else {
            return;
        };
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if !y_px.is_finite() || !viewport_height_px.is_finite() || viewport_height_px <= 0.0 {
            return;
        }
        // Dragging up (smaller y) grows the sheet.
        let delta = (drag.start_y_px - y_px) / viewport_height_px * 100.0;
        drag.preview_percent =
            (drag.start_percent + delta).clamp(SHEET_MIN_PERCENT, SHEET_MAX_PERCENT);
    }

    #[must_use]
    pub fn mode(&self) -> UiMode {
        if self.faq_open {
            UiMode::FaqOpen
        } else if self.search_open {
            UiMode::SearchOpen
        } else if self.result_sheet_visible() {
            UiMode::ResultsShown
        } else {
            UiMode::Browsing
        }
    }

    #[must_use]
    pub fn result_sheet_visible(&self) -> bool {
        self.searched && !self.rooms.is_empty() && !self.search_open
    }

    /// Height to render the sheet at, including an in-progress drag.
    #[must_use]
    pub fn sheet_height(&self) -> SheetHeight {
        match self.layout {
            SheetLayout::Wide => SheetHeight::Auto,
            SheetLayout::Touch { .. } => SheetHeight::Percent(
                self.drag
                    .map_or(self.sheet_percent, |d| d.preview_percent),
            ),
        }
    }

    /// Last height committed by a finished drag.
    #[must_use]
    pub fn committed_sheet_percent(&self) -> f64 {
        self.sheet_percent
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        if self.searched {
            present::result_markers(&self.rooms, &self.unresolved)
        } else {
            present::browse_markers(&self.studios)
        }
    }

    #[must_use]
    pub fn cards(&self) -> Vec<ResultCard> {
        self.rooms.iter().map(ResultCard::from_room).collect()
    }

    /// Share text for the `index`-th result.
    #[must_use]
    pub fn share_text(&self, index: usize) -> Option<String> {
        self.rooms
            .get(index)
            .map(|room| present::share_text(self.filter.date, room))
    }

    #[must_use]
    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading
            .then(|| present::LOADING_MESSAGES[self.loading_index])
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    #[must_use]
    pub fn studios(&self) -> &[Studio] {
        &self.studios
    }

    #[must_use]
    pub fn rooms(&self) -> &[RoomAvailability] {
        &self.rooms
    }

    #[must_use]
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    #[must_use]
    pub fn is_searched(&self) -> bool {
        self.searched
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    #[must_use]
    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    #[must_use]
    pub fn map_center(&self) -> (f64, f64) {
        self.map_center
    }

    #[must_use]
    pub fn is_region_expanded(&self, region: &str) -> bool {
        self.expanded_regions.contains(region)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
