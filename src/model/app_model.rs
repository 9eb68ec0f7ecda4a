//! Main application model with state management

use super::notifications::{NotificationKind, Notifications};
use super::query::{Completion, FetchTicket, QueryError, QueryState};
use super::types::{ActiveSection, MovieSummary, ResultPage, UiState};

/// Main application model containing all state.
///
/// Owned by the controller and mutated only from the event loop.
#[derive(Debug, Default)]
pub struct AppModel {
    pub ui_state: UiState,
    pub query: QueryState,
    pub notifications: Notifications,
    should_quit: bool,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // Search box
    // ========================================================================

    pub fn append_to_search(&mut self, c: char) {
        self.ui_state.search_input.push(c);
    }

    pub fn backspace_search(&mut self) {
        self.ui_state.search_input.pop();
    }

    pub fn clear_search_input(&mut self) {
        self.ui_state.search_input.clear();
    }

    pub fn set_active_section(&mut self, section: ActiveSection) {
        self.ui_state.active_section = section;
    }

    pub fn toggle_section(&mut self) {
        self.ui_state.active_section = self.ui_state.active_section.toggle();
    }

    // ========================================================================
    // Query lifecycle
    // ========================================================================

    pub fn submit_search(&mut self) -> Result<Option<FetchTicket>, QueryError> {
        let input = self.ui_state.search_input.clone();
        let result = self.query.submit_search(&input);
        self.after_query_action(&result);
        result
    }

    pub fn change_page(&mut self, page: u32) -> Result<Option<FetchTicket>, QueryError> {
        let result = self.query.change_page(page);
        self.after_query_action(&result);
        result
    }

    pub fn next_page(&mut self) -> Result<Option<FetchTicket>, QueryError> {
        let result = self.query.next_page();
        self.after_query_action(&result);
        result
    }

    pub fn previous_page(&mut self) -> Result<Option<FetchTicket>, QueryError> {
        let result = self.query.previous_page();
        self.after_query_action(&result);
        result
    }

    pub fn complete_fetch<E: std::fmt::Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ResultPage, E>,
    ) -> Completion {
        let completion = self.query.complete(ticket, result);
        if let Completion::Applied(Some(kind)) = &completion {
            self.notifications.push(kind.clone());
        }
        if let Completion::Applied(_) = &completion {
            self.clamp_grid_selection();
        }
        completion
    }

    /// Open the modal for the card under the grid cursor
    pub fn select_highlighted_movie(&mut self) -> Result<(), QueryError> {
        match self.highlighted_movie() {
            Some(movie) => self.query.select_movie(&movie),
            None => Err(QueryError::NoActiveQuery),
        }
    }

    pub fn close_modal(&mut self) {
        self.query.close_modal();
    }

    pub fn is_modal_open(&self) -> bool {
        self.query.selected().is_some()
    }

    fn after_query_action(&mut self, result: &Result<Option<FetchTicket>, QueryError>) {
        match result {
            Ok(Some(_)) => {
                self.ui_state.grid_selected = 0;
            }
            Ok(None) => {}
            Err(QueryError::EmptyQuery) => {
                self.notifications.push(NotificationKind::EmptyQuery);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Query action rejected");
            }
        }
    }

    // ========================================================================
    // Results grid
    // ========================================================================

    pub fn set_grid_columns(&mut self, columns: usize) {
        self.ui_state.grid_columns = columns.max(1);
    }

    fn grid_len(&self) -> usize {
        self.query
            .displayed_page()
            .map(|page| page.items.len())
            .unwrap_or(0)
    }

    pub fn highlighted_movie(&self) -> Option<MovieSummary> {
        self.query
            .displayed_page()
            .and_then(|page| page.items.get(self.ui_state.grid_selected))
            .cloned()
    }

    pub fn grid_move_left(&mut self) {
        let state = &mut self.ui_state;
        if state.grid_selected % state.grid_columns > 0 {
            state.grid_selected -= 1;
        }
    }

    /// Returns `false` when the cursor is already on the last column
    pub fn grid_move_right(&mut self) -> bool {
        let len = self.grid_len();
        let state = &mut self.ui_state;
        let at_row_end = state.grid_selected % state.grid_columns == state.grid_columns - 1;
        if at_row_end || state.grid_selected + 1 >= len {
            return false;
        }
        state.grid_selected += 1;
        true
    }

    pub fn grid_move_up(&mut self) {
        let state = &mut self.ui_state;
        if state.grid_selected >= state.grid_columns {
            state.grid_selected -= state.grid_columns;
        }
    }

    pub fn grid_move_down(&mut self) {
        let len = self.grid_len();
        let state = &mut self.ui_state;
        if state.grid_selected + state.grid_columns < len {
            state.grid_selected += state.grid_columns;
        }
    }

    fn clamp_grid_selection(&mut self) {
        let len = self.grid_len();
        self.ui_state.grid_selected = self.ui_state.grid_selected.min(len.saturating_sub(1));
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub fn show_help_popup(&mut self) {
        self.ui_state.show_help_popup = true;
    }

    pub fn hide_help_popup(&mut self) {
        self.ui_state.show_help_popup = false;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui_state.show_help_popup
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }

    pub fn dismiss_notifications(&mut self) {
        self.notifications.dismiss_all();
    }

    pub fn auto_clear_old_notifications(&mut self) {
        self.notifications.expire();
    }
}
