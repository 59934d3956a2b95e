//! Location routing
//!
//! Maps a [`Location`] (`Home` or `Details(slug)`) to a view, keeps a
//! [`History`] in sync and hands every resolved view to a [`Renderer`].
//!
//! The router owns one explicit [`SessionState`] value and is mutated only
//! through `&mut self`, so page state cannot change underneath a render.
//! Detail content arrives asynchronously: entering a detail view returns a
//! [`DetailTicket`], and [`Router::complete_details`] only renders content
//! whose ticket still belongs to the latest navigation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::{Catalog, Record};
use crate::detail::DetailContent;
use crate::filter::filter;
use crate::pagination::{clamp_page, paginate, total_pages, PAGE_SIZE};
use crate::render::{DetailState, DetailsView, ListView, Renderer, View};

/// Logical view location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Home,
    Details(String),
}

impl Location {
    /// Derive from an address: a non-empty fragment names a record
    ///
    /// # Examples
    /// ```
    /// use cratedig_browser::router::Location;
    ///
    /// assert_eq!(Location::from_address("/index.html"), Location::Home);
    /// assert_eq!(Location::from_address("/#"), Location::Home);
    /// assert_eq!(
    ///     Location::from_address("/index.html#queen-jazz"),
    ///     Location::Details("queen-jazz".into())
    /// );
    /// ```
    pub fn from_address(address: &str) -> Self {
        match address.split_once('#') {
            Some((_, fragment)) if !fragment.is_empty() => Location::Details(fragment.to_string()),
            _ => Location::Home,
        }
    }
}

/// State payload pushed with each history entry
///
/// Serializes as `{"view":"home"}` or `{"view":"details","slug":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum HistoryState {
    Home,
    Details { slug: String },
}

impl From<HistoryState> for Location {
    fn from(state: HistoryState) -> Self {
        match state {
            HistoryState::Home => Location::Home,
            HistoryState::Details { slug } => Location::Details(slug),
        }
    }
}

/// Navigable history surface
pub trait History {
    /// Push a new entry with its state payload and address
    fn push(&mut self, state: HistoryState, address: &str);
}

/// One entry of a [`MemoryHistory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// `None` for entries that were not pushed by the router (initial load)
    pub state: Option<HistoryState>,
    pub address: String,
}

/// In-memory history with back/forward navigation
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial_address: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                state: None,
                address: initial_address.into(),
            }],
            index: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// Step back; returns the entry now current (the popped-to entry)
    pub fn back(&mut self) -> Option<HistoryEntry> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current().clone())
    }

    /// Step forward; returns the entry now current
    pub fn forward(&mut self) -> Option<HistoryEntry> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl History for MemoryHistory {
    fn push(&mut self, state: HistoryState, address: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            state: Some(state),
            address: address.to_string(),
        });
        self.index = self.entries.len() - 1;
    }
}

/// Application state owned by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub location: Location,
    /// Last submitted query (kept across detail navigation)
    pub query: String,
    /// Current list page, 1-indexed
    pub current_page: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            location: Location::Home,
            query: String::new(),
            current_page: 1,
        }
    }
}

/// Handle for detail content requested by a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    pub record: Record,
}

/// Resolved route for a location
enum Route {
    List,
    Details(Record),
}

/// Location router driving a renderer
pub struct Router<H, R> {
    catalog: Arc<Catalog>,
    history: H,
    renderer: R,
    state: SessionState,
    base_address: String,
    generation: u64,
}

impl<H: History, R: Renderer> Router<H, R> {
    /// Build the router and render the view for `address`
    ///
    /// Returns a ticket when the initial view is a detail view.
    pub fn start(
        catalog: Arc<Catalog>,
        history: H,
        renderer: R,
        address: &str,
    ) -> (Self, Option<DetailTicket>) {
        let base_address = address
            .split_once('#')
            .map(|(base, _)| base)
            .unwrap_or(address)
            .to_string();

        let mut router = Self {
            catalog,
            history,
            renderer,
            state: SessionState::default(),
            base_address,
            generation: 0,
        };
        let ticket = router.transition(Location::from_address(address));
        (router, ticket)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Push a detail entry for `slug` and show it
    ///
    /// An unknown slug falls back to the list view without pushing.
    pub fn navigate_to_details(&mut self, slug: &str) -> Option<DetailTicket> {
        if !self.catalog.contains(slug) {
            debug!(slug = %slug, "Unknown slug, showing list");
            self.transition(Location::Home);
            return None;
        }

        let address = format!("{}#{}", self.base_address, slug);
        self.history.push(
            HistoryState::Details {
                slug: slug.to_string(),
            },
            &address,
        );
        self.transition(Location::Details(slug.to_string()))
    }

    /// Push a home entry and show the list
    pub fn navigate_home(&mut self) {
        let address = self.base_address.clone();
        self.history.push(HistoryState::Home, &address);
        self.transition(Location::Home);
    }

    /// Re-derive the view from a popped history entry
    ///
    /// Entries without state (never pushed by this router) show the list
    /// with the last known query.
    pub fn handle_pop(&mut self, state: Option<HistoryState>) -> Option<DetailTicket> {
        let location = state.map(Location::from).unwrap_or(Location::Home);
        debug!(?location, "History pop");
        self.transition(location)
    }

    /// Submit a new query: page resets to 1 and the list is shown
    pub fn search(&mut self, query: &str) {
        self.state.query = query.to_string();
        self.state.current_page = 1;
        if self.state.location == Location::Home {
            self.transition(Location::Home);
        } else {
            self.navigate_home();
        }
    }

    /// Move to `page`, clamped to the available pages
    pub fn go_to_page(&mut self, page: usize) {
        let total = total_pages(self.results_len(), PAGE_SIZE);
        self.state.current_page = clamp_page(page, total);
        if self.state.location == Location::Home {
            self.transition(Location::Home);
        }
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.state.current_page.saturating_sub(1));
    }

    /// Deliver resolved content for a ticket
    ///
    /// Returns `false` (and renders nothing) if another navigation happened
    /// since the ticket was issued.
    pub fn complete_details(&mut self, ticket: DetailTicket, content: Option<DetailContent>) -> bool {
        if ticket.generation != self.generation {
            debug!(slug = %ticket.record.slug, "Discarding stale detail content");
            return false;
        }

        let content = match content {
            Some(content) => DetailState::Loaded(content),
            None => DetailState::NotFound,
        };
        self.renderer.render(&View::Details(DetailsView {
            record: ticket.record,
            content,
        }));
        true
    }

    /// Records on the current list page
    pub fn current_page_records(&self) -> Vec<Record> {
        let results = filter(self.catalog.records(), &self.state.query);
        paginate(&results, self.state.current_page, PAGE_SIZE)
            .items
            .iter()
            .map(|r| (*r).clone())
            .collect()
    }

    fn results_len(&self) -> usize {
        filter(self.catalog.records(), &self.state.query).len()
    }

    /// Route table: location to view
    fn transition(&mut self, location: Location) -> Option<DetailTicket> {
        self.generation += 1;

        let route = match &location {
            Location::Home => Route::List,
            Location::Details(slug) => match self.catalog.find(slug) {
                Some(record) => Route::Details(record.clone()),
                None => {
                    debug!(slug = %slug, "Unknown slug, showing list");
                    Route::List
                }
            },
        };

        match route {
            Route::List => {
                self.state.location = Location::Home;
                let view = View::List(self.list_view());
                self.renderer.render(&view);
                None
            }
            Route::Details(record) => {
                self.state.location = Location::Details(record.slug.clone());
                self.renderer.render(&View::Details(DetailsView {
                    record: record.clone(),
                    content: DetailState::Loading,
                }));
                Some(DetailTicket {
                    generation: self.generation,
                    record,
                })
            }
        }
    }

    fn list_view(&self) -> ListView {
        ListView::build(self.catalog.records(), &self.state.query, self.state.current_page)
    }
}
