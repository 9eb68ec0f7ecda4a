//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, popup placement)
//! - `layout`: Search bar and status bar
//! - `content`: Results grid and loading/error/empty states
//! - `overlays`: Movie modal, notifications, help popup

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::AppModel;

pub use content::grid_columns;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + page
                Constraint::Min(0),    // Results grid
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], &model.ui_state, &model.query);

        content::render_main_content(frame, chunks[1], &model.ui_state, &model.query);

        layout::render_status_bar(frame, chunks[2], &model.query);

        if let Some(movie) = model.query.selected() {
            overlays::render_movie_modal(frame, movie);
        }

        if model.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Notifications stay on top of everything else
        if model.has_notifications() {
            overlays::render_notifications(frame, model.notifications.visible());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MovieSummary, ResultPage};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(model: &AppModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| AppView::render(f, model)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn batman_page() -> ResultPage {
        ResultPage {
            page: 1,
            items: vec![MovieSummary {
                id: 268,
                title: "Batman".to_string(),
                poster_path: Some("/poster.jpg".to_string()),
                backdrop_path: None,
                overview: Some("The Dark Knight of Gotham City begins his war on crime.".to_string()),
                release_date: Some("1989-06-21".to_string()),
                vote_average: Some(7.2),
            }],
            total_pages: 5,
            total_results: 97,
        }
    }

    #[test]
    fn renders_idle_hint() {
        let screen = draw(&AppModel::new());
        assert!(screen.contains("press Enter to search"));
    }

    #[test]
    fn renders_grid_modal_and_loading_states() {
        let mut model = AppModel::new();
        model.ui_state.search_input = "batman".to_string();
        let ticket = model.submit_search().unwrap().unwrap();
        assert!(draw(&model).contains("Loading..."));

        model.complete_fetch(&ticket, Ok::<_, String>(batman_page()));
        let screen = draw(&model);
        assert!(screen.contains("Batman"));
        assert!(screen.contains("page 1 of 5"));

        model.select_highlighted_movie().unwrap();
        let screen = draw(&model);
        assert!(screen.contains("Release Date:"));
        assert!(screen.contains("7.2/10"));
        assert!(screen.contains("https://image.tmdb.org/t/p/w500/poster.jpg"));

        model.close_modal();
        model.next_page().unwrap();
        let screen = draw(&model);
        assert!(screen.contains("Loading page 2..."));
        assert!(screen.contains("Batman"));
    }

    #[test]
    fn renders_error_and_notification() {
        let mut model = AppModel::new();
        model.ui_state.search_input = "batman".to_string();
        let ticket = model.submit_search().unwrap().unwrap();
        model.complete_fetch(&ticket, Err::<ResultPage, _>("timeout"));
        let screen = draw(&model);
        assert!(screen.contains("There was an error, please try again..."));
    }

    #[test]
    fn empty_page_shows_no_results_toast() {
        let mut model = AppModel::new();
        model.ui_state.search_input = "zzzz".to_string();
        let ticket = model.submit_search().unwrap().unwrap();
        let empty = ResultPage {
            page: 1,
            items: Vec::new(),
            total_pages: 0,
            total_results: 0,
        };
        model.complete_fetch(&ticket, Ok::<_, String>(empty));
        let screen = draw(&model);
        assert!(screen.contains(" No results "));
        assert!(screen.contains("No movies found for your request."));
    }
}
