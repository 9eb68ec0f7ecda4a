//! Search-and-pagination query lifecycle
//!
//! `QueryState` owns the current query text, page number, request status and
//! the last page of results. It never performs I/O itself: every operation
//! that needs data hands back a [`FetchTicket`], and the caller reports the
//! outcome through [`QueryState::complete`]. Tickets carry a generation
//! number, and only the most recently issued generation may change state, so
//! a slow response for an old (query, page) pair can never overwrite a newer
//! one.

use std::fmt::Display;

use thiserror::Error;

use super::notifications::NotificationKind;
use super::types::{MAX_PAGE, MovieSummary, RequestStatus, ResultPage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("no active search")]
    NoActiveQuery,
    #[error("page {requested} is outside 1..={total_pages}")]
    PageOutOfRange { requested: u32, total_pages: u32 },
    #[error("movie {0} is not on the current page")]
    NotOnActivePage(u64),
}

/// A request for one (query, page) pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

/// What happened when a fetch result was handed back
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// A newer ticket was issued in the meantime; nothing changed
    Superseded,
    Applied(Option<NotificationKind>),
}

#[derive(Clone, Debug, Default)]
pub struct QueryState {
    query: String,
    page: u32,
    status: RequestStatus,
    /// Active page on success, retained previous page while loading
    data: Option<ResultPage>,
    selected: Option<MovieSummary>,
    known_total_pages: Option<u32>,
    generation: u64,
    /// Query whose latest result was empty, so `NoResults` fires once per transition
    empty_query: Option<String>,
}

impl QueryState {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current page number, 0 when no search has been made yet
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.known_total_pages
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    /// Page to draw: the active page, or the previous one while a request is in flight
    pub fn displayed_page(&self) -> Option<&ResultPage> {
        self.data.as_ref()
    }

    /// The page matching the current (query, page) pair, once it has arrived
    pub fn active_page(&self) -> Option<&ResultPage> {
        match self.status {
            RequestStatus::Success => self.data.as_ref(),
            _ => None,
        }
    }

    pub fn is_showing_stale(&self) -> bool {
        self.status == RequestStatus::Loading && self.data.is_some()
    }

    pub fn submit_search(&mut self, text: &str) -> Result<Option<FetchTicket>, QueryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        self.selected = None;

        if text == self.query && self.page == 1 && self.is_current_pair_settled_or_pending() {
            tracing::debug!(query = text, "Search unchanged, reusing current request");
            return Ok(None);
        }

        if text != self.query {
            self.known_total_pages = None;
            self.query = text.to_string();
        }
        self.page = 1;
        Ok(Some(self.begin_fetch()))
    }

    pub fn change_page(&mut self, page: u32) -> Result<Option<FetchTicket>, QueryError> {
        if self.query.is_empty() {
            return Err(QueryError::NoActiveQuery);
        }
        let total_pages = self.known_total_pages.unwrap_or(0);
        if page < 1 || page > total_pages {
            return Err(QueryError::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        if page == self.page && self.is_current_pair_settled_or_pending() {
            return Ok(None);
        }

        self.selected = None;
        self.page = page;
        Ok(Some(self.begin_fetch()))
    }

    pub fn next_page(&mut self) -> Result<Option<FetchTicket>, QueryError> {
        self.change_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<Option<FetchTicket>, QueryError> {
        self.change_page(self.page.saturating_sub(1))
    }

    pub fn select_movie(&mut self, movie: &MovieSummary) -> Result<(), QueryError> {
        match self.active_page() {
            Some(page) if page.contains(movie.id) => {
                self.selected = Some(movie.clone());
                Ok(())
            }
            _ => Err(QueryError::NotOnActivePage(movie.id)),
        }
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    /// Apply the outcome of a fetch. Results for superseded tickets are dropped.
    pub fn complete<E: Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ResultPage, E>,
    ) -> Completion {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                query = %ticket.query,
                page = ticket.page,
                "Discarding superseded fetch result"
            );
            return Completion::Superseded;
        }

        match result {
            Ok(mut page) => {
                page.total_pages = page.total_pages.min(MAX_PAGE);
                self.known_total_pages = Some(page.total_pages);
                self.status = RequestStatus::Success;

                let notification = if page.is_empty() {
                    if self.empty_query.as_deref() == Some(ticket.query.as_str()) {
                        None
                    } else {
                        self.empty_query = Some(ticket.query.clone());
                        Some(NotificationKind::NoResults {
                            query: ticket.query.clone(),
                        })
                    }
                } else {
                    self.empty_query = None;
                    None
                };

                tracing::info!(
                    query = %ticket.query,
                    page = ticket.page,
                    items = page.items.len(),
                    total_pages = page.total_pages,
                    "Search page loaded"
                );
                self.data = Some(page);
                Completion::Applied(notification)
            }
            Err(e) => {
                tracing::error!(
                    query = %ticket.query,
                    page = ticket.page,
                    error = %e,
                    "Search request failed"
                );
                self.status = RequestStatus::Error;
                self.data = None;
                self.empty_query = None;
                Completion::Applied(Some(NotificationKind::FetchFailed {
                    generation: ticket.generation,
                }))
            }
        }
    }

    fn is_current_pair_settled_or_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Loading | RequestStatus::Success)
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.status = RequestStatus::Loading;
        tracing::debug!(
            generation = self.generation,
            query = %self.query,
            page = self.page,
            "Fetch started"
        );
        FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
        }
    }
}
