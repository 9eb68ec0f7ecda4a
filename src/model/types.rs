//! Core type definitions for the application

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const ORIGINAL_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
pub const POSTER_PLACEHOLDER: &str = "https://placehold.co/500x750/cccccc/333333?text=No+Image";
pub const MODAL_PLACEHOLDER: &str =
    "https://placehold.co/1280x720/cccccc/333333?text=No+Image+Available";

/// TMDB refuses `page` values above this, whatever `total_pages` says
pub const MAX_PAGE: u32 = 500;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Results,
}

impl ActiveSection {
    pub fn toggle(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }
}

/// A single movie as returned by the search endpoint
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    /// Poster shown on the grid card
    pub fn poster_url(&self) -> String {
        match &self.poster_path {
            Some(path) => format!("{}{}", POSTER_BASE_URL, path),
            None => POSTER_PLACEHOLDER.to_string(),
        }
    }

    /// Full-size image for the detail modal: backdrop, then poster, then placeholder
    pub fn modal_image_url(&self) -> String {
        self.backdrop_path
            .as_ref()
            .or(self.poster_path.as_ref())
            .map(|path| format!("{}{}", ORIGINAL_BASE_URL, path))
            .unwrap_or_else(|| MODAL_PLACEHOLDER.to_string())
    }

    /// Overview text, empty when TMDB has none
    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }

    pub fn release_date(&self) -> &str {
        self.release_date.as_deref().unwrap_or_default()
    }

    pub fn release_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(self.release_date(), "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average.unwrap_or_default())
    }
}

/// One page of search results
#[derive(Clone, Debug, PartialEq)]
pub struct ResultPage {
    pub page: u32,
    pub items: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl ResultPage {
    pub fn contains(&self, movie_id: u64) -> bool {
        self.items.iter().any(|m| m.id == movie_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Status of the request for the current (query, page) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// UI state that is not part of the query lifecycle
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_input: String,
    pub grid_selected: usize,
    pub grid_columns: usize,
    pub show_help_popup: bool,
    /// Human readable cause of the last failed request
    pub error_detail: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_input: String::new(),
            grid_selected: 0,
            grid_columns: 1,
            show_help_popup: false,
            error_detail: None,
        }
    }
}
