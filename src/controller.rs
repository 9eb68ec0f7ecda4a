//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! drives the query lifecycle and runs search requests in the background.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Search, pagination and fetch dispatch

mod input;
mod search;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::model::{AppModel, ClientError, FetchTicket, MetadataClient, ResultPage};

/// Result of a background search request, delivered back to the event loop
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<ResultPage, ClientError>,
}

pub struct AppController {
    pub(crate) model: AppModel,
    client: Arc<dyn MetadataClient>,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
}

impl AppController {
    /// Build a controller for one session. Fetch results arrive on the returned receiver
    /// and must be handed back through [`AppController::apply_fetch_outcome`].
    pub fn new(client: Arc<dyn MetadataClient>) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            model: AppModel::new(),
            client,
            outcomes,
            in_flight: None,
        };
        (controller, receiver)
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn should_quit(&self) -> bool {
        self.model.should_quit()
    }

    pub fn set_grid_columns(&mut self, columns: usize) {
        self.model.set_grid_columns(columns);
    }

    pub fn tick(&mut self) {
        self.model.auto_clear_old_notifications();
    }

    pub(crate) fn format_error(error: &ClientError) -> String {
        match error {
            ClientError::Api { status: 401, .. } => {
                "Authentication failed. Check your TMDB access token.".to_string()
            }
            ClientError::Api { status: 404, .. } => {
                "Search endpoint not found. Check the configured API base URL.".to_string()
            }
            ClientError::Api { status: 429, .. } => {
                "Rate limited. Please wait a moment.".to_string()
            }
            ClientError::Api { status, .. } if *status >= 500 => {
                format!("TMDB is having trouble (HTTP {}).", status)
            }
            ClientError::Http(e) if e.is_timeout() => "The request timed out.".to_string(),
            ClientError::Http(e) if e.is_connect() => {
                "Could not reach TMDB. Check your network connection.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}

impl Drop for AppController {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
