//! The catalog browser controller.
//!
//! [`Browser`] owns the search state, issues requests through a
//! [`FoodsApi`] and pushes projected views to a [`Surface`]. Every failure is
//! logged and shown to the user as a generic alert; nothing is retried.

pub mod event;
pub mod state;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::api::{ApiError, FoodDetail, FoodPage, FoodSummary, FoodsApi};
use crate::view::{self, DetailView, ResultsView};

use event::Event;
use state::{SearchForm, SearchState};

pub const LOAD_FAILED: &str = "Error loading data.";
pub const SEARCH_FAILED: &str = "Error during search.";
pub const DETAIL_FAILED: &str = "Error loading details.";
pub const NO_SUCH_CARD: &str = "No such card on this page.";
pub const NO_SUCH_YEAR: &str = "That year is not one of the available options.";

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid year option '{value}'")]
    InvalidYear { value: String },

    #[error("year '{value}' is not an available option")]
    UnknownYear { value: String },

    #[error("no card at position {position}")]
    UnknownCard { position: usize },
}

/// Where the browser draws. Implementations decide how each piece looks.
pub trait Surface {
    fn set_loading(&mut self, visible: bool);
    fn set_year_options(&mut self, years: &[String]);
    fn clear_results(&mut self);
    fn show_results(&mut self, view: &ResultsView);
    fn show_detail(&mut self, view: &DetailView);
    fn hide_detail(&mut self);
    fn alert(&mut self, message: &str);
}

/// Which part of the open detail view received a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

/// Tags a request so only the newest response on each path is applied.
///
/// [`Browser::search`] and [`Browser::load_detail`] hold `&mut self` until
/// their response lands, so they never overlap each other. Tickets only
/// matter when `begin_*` and `finish_*` are driven separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

pub struct Browser<A, S> {
    api: A,
    surface: S,
    state: SearchState,
    form: SearchForm,
    cards: Vec<FoodSummary>,
    detail_open: Option<i64>,
    issued: u64,
    latest_search: u64,
    latest_detail: u64,
    in_flight: usize,
}

impl<A: FoodsApi, S: Surface> Browser<A, S> {
    pub fn new(api: A, surface: S, page_size: u32) -> Self {
        Self {
            api,
            surface,
            state: SearchState::new(page_size),
            form: SearchForm::default(),
            cards: Vec::new(),
            detail_open: None,
            issued: 0,
            latest_search: 0,
            latest_detail: 0,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn cards(&self) -> &[FoodSummary] {
        &self.cards
    }

    /// Id of the food whose detail view is showing.
    pub fn detail_open(&self) -> Option<i64> {
        self.detail_open
    }

    /// Fills the year options, then runs the first search from the current
    /// form (unfiltered unless the form was pre-filled). The loading indicator
    /// stays up across both steps.
    pub async fn init(&mut self, years: Vec<String>) -> Result<(), BrowseError> {
        self.raise_loading();
        let result = self.init_inner(years).await;
        self.settle_loading();
        result
    }

    async fn init_inner(&mut self, years: Vec<String>) -> Result<(), BrowseError> {
        if let Some(bad) = years.iter().find(|y| !crate::utils::is_valid_year(y)) {
            let err = BrowseError::InvalidYear { value: bad.clone() };
            error!(error = %err, "failed to load year options");
            self.surface.alert(LOAD_FAILED);
            return Err(err);
        }
        self.surface.set_year_options(&years);
        self.state.set_available_years(years);
        info!(years = self.state.available_years().len(), "year options loaded");
        self.handle_search().await
    }

    /// Reads the form into the state, goes back to page 1 and searches.
    pub async fn handle_search(&mut self) -> Result<(), BrowseError> {
        self.state.apply_form(&self.form);
        self.search().await
    }

    pub async fn search(&mut self) -> Result<(), BrowseError> {
        let ticket = self.begin_search();
        let query = self.state.to_query();
        let result = self.api.list_foods(&query).await;
        self.finish_search(ticket, result)
    }

    pub(crate) fn begin_search(&mut self) -> RequestTicket {
        let ticket = self.issue();
        self.latest_search = ticket.0;
        self.raise_loading();
        self.cards.clear();
        self.surface.clear_results();
        debug!(
            ticket = ticket.0,
            page = self.state.current_page(),
            term = self.state.search_term(),
            "search issued"
        );
        ticket
    }

    pub(crate) fn finish_search(
        &mut self,
        ticket: RequestTicket,
        result: Result<FoodPage, ApiError>,
    ) -> Result<(), BrowseError> {
        self.settle_loading();
        if ticket.0 != self.latest_search {
            debug!(ticket = ticket.0, latest = self.latest_search, "dropping stale search response");
            return Ok(());
        }
        match result {
            Ok(page) => {
                self.state.set_total_items(page.total);
                let results = view::project_results(&self.state, &page.items);
                info!(
                    total = page.total,
                    shown = page.items.len(),
                    page = self.state.current_page(),
                    "search finished"
                );
                self.cards = page.items;
                self.surface.show_results(&results);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "search failed");
                self.surface.alert(SEARCH_FAILED);
                Err(e.into())
            }
        }
    }

    pub async fn previous_page(&mut self) -> Result<(), BrowseError> {
        if !self.state.go_previous() {
            return Ok(());
        }
        self.search().await
    }

    pub async fn next_page(&mut self) -> Result<(), BrowseError> {
        if !self.state.go_next() {
            return Ok(());
        }
        self.search().await
    }

    pub async fn load_detail(&mut self, id: i64) -> Result<(), BrowseError> {
        let ticket = self.begin_detail(id);
        let result = self.api.get_food(id).await;
        self.finish_detail(ticket, result)
    }

    /// Opens the card at `position` (1-based) on the current page.
    pub async fn open_card(&mut self, position: usize) -> Result<(), BrowseError> {
        let id = match position
            .checked_sub(1)
            .and_then(|i| self.cards.get(i))
            .map(|card| card.id)
        {
            Some(id) => id,
            None => {
                self.surface.alert(NO_SUCH_CARD);
                return Err(BrowseError::UnknownCard { position });
            }
        };
        self.load_detail(id).await
    }

    pub(crate) fn begin_detail(&mut self, id: i64) -> RequestTicket {
        let ticket = self.issue();
        self.latest_detail = ticket.0;
        self.raise_loading();
        debug!(ticket = ticket.0, id, "detail issued");
        ticket
    }

    pub(crate) fn finish_detail(
        &mut self,
        ticket: RequestTicket,
        result: Result<FoodDetail, ApiError>,
    ) -> Result<(), BrowseError> {
        self.settle_loading();
        if ticket.0 != self.latest_detail {
            debug!(ticket = ticket.0, latest = self.latest_detail, "dropping stale detail response");
            return Ok(());
        }
        match result {
            Ok(food) => {
                let detail = view::project_detail(&food);
                self.detail_open = Some(food.id);
                self.surface.show_detail(&detail);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "detail failed");
                self.surface.alert(DETAIL_FAILED);
                Err(e.into())
            }
        }
    }

    pub fn close_detail(&mut self) {
        if self.detail_open.take().is_some() {
            self.surface.hide_detail();
        }
    }

    pub fn click_detail(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close_detail();
        }
    }

    pub async fn select_year(&mut self, year: String) -> Result<(), BrowseError> {
        if !year.is_empty() && !self.state.available_years().contains(&year) {
            self.surface.alert(NO_SUCH_YEAR);
            return Err(BrowseError::UnknownYear { value: year });
        }
        self.form.year_select = year;
        self.handle_search().await
    }

    pub async fn dispatch(&mut self, event: Event) -> Result<(), BrowseError> {
        match event {
            Event::SetSearchTerm(term) => {
                self.form.search_input = term;
                self.handle_search().await
            }
            Event::Submit => self.handle_search().await,
            Event::SelectYear(year) => self.select_year(year).await,
            Event::SetMaker(maker) => {
                self.form.maker_input = maker;
                self.handle_search().await
            }
            Event::SetCode(code) => {
                self.form.code_input = code;
                self.handle_search().await
            }
            Event::PreviousPage => self.previous_page().await,
            Event::NextPage => self.next_page().await,
            Event::OpenCard(position) => self.open_card(position).await,
            Event::OpenFood(id) => self.load_detail(id).await,
            Event::CloseDetail => {
                self.close_detail();
                Ok(())
            }
            Event::ClickBackdrop => {
                self.click_detail(ClickTarget::Backdrop);
                Ok(())
            }
            Event::ClickContent => {
                self.click_detail(ClickTarget::Content);
                Ok(())
            }
        }
    }

    fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    fn raise_loading(&mut self) {
        self.in_flight += 1;
        if self.in_flight == 1 {
            self.surface.set_loading(true);
        }
    }

    fn settle_loading(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.surface.set_loading(false);
        }
    }
}
