//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (movies, result pages, UI state)
//! - `query`: Search-and-pagination query lifecycle
//! - `notifications`: Deduplicated transient notifications
//! - `tmdb_client`: TMDB API client wrapper
//! - `app_model`: Main application model with state management methods

mod types;
mod query;
mod notifications;
mod tmdb_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, MovieSummary, RequestStatus, ResultPage, UiState,
};

pub use query::{Completion, FetchTicket, QueryError, QueryState};

pub use notifications::{Notification, NotificationKind};

pub use tmdb_client::{ClientError, MetadataClient, TmdbClient};

pub use app_model::AppModel;
