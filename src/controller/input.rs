//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.model.set_should_quit(true);
            return;
        }

        // Movie modal blocks all other interactions
        if self.model.is_modal_open() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q')
            ) {
                self.close_modal();
            }
            return;
        }

        if self.model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.hide_help_popup();
            }
            return;
        }

        // The search box keeps Esc for clearing the query
        if key.code == KeyCode::Esc
            && self.model.has_notifications()
            && self.model.ui_state.active_section != ActiveSection::Search
        {
            self.model.dismiss_notifications();
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.model.toggle_section();
                return;
            }
            KeyCode::PageDown => {
                self.next_page();
                return;
            }
            KeyCode::PageUp => {
                self.previous_page();
                return;
            }
            _ => {}
        }

        match self.model.ui_state.active_section {
            ActiveSection::Search => self.handle_search_key(key),
            ActiveSection::Results => self.handle_results_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Esc => {
                self.model.clear_search_input();
                self.model.dismiss_notifications();
            }
            KeyCode::Backspace => self.model.backspace_search(),
            KeyCode::Down => self.model.set_active_section(ActiveSection::Results),
            KeyCode::Char(c) => self.model.append_to_search(c),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                if self.model.ui_state.grid_selected < self.model.ui_state.grid_columns {
                    self.model.set_active_section(ActiveSection::Search);
                } else {
                    self.model.grid_move_up();
                }
            }
            KeyCode::Down => self.model.grid_move_down(),
            KeyCode::Left => self.model.grid_move_left(),
            KeyCode::Right => {
                self.model.grid_move_right();
            }
            KeyCode::Enter => self.select_highlighted_movie(),
            KeyCode::Home => self.change_page(1),
            KeyCode::End => {
                if let Some(last) = self.model.query.total_pages() {
                    self.change_page(last);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_page(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.previous_page(),
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                self.model.set_active_section(ActiveSection::Search);
            }
            KeyCode::Char('h') | KeyCode::Char('H') => self.model.show_help_popup(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true),
            _ => {}
        }
    }
}
