//! Main content area rendering (results grid, loader, error and empty states)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, MovieSummary, QueryState, RequestStatus, ResultPage, UiState};
use super::utils::truncate_string;

pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 5;

/// Number of card columns that fit in a content area of the given outer width
pub fn grid_columns(area_width: u16) -> usize {
    // outer borders + horizontal padding
    let inner = area_width.saturating_sub(4);
    ((inner / CARD_WIDTH) as usize).max(1)
}

pub fn render_main_content(frame: &mut Frame, area: Rect, ui_state: &UiState, query: &QueryState) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match (query.status(), query.displayed_page()) {
        (RequestStatus::Idle, _) => {
            let content = Paragraph::new("Type a movie title and press Enter to search\n\nUse Tab to move between the search box and results\nUse arrow keys to pick a movie, Enter to open it\nPress n / p to change page")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(content, area);
        }
        (RequestStatus::Loading, None) => {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Movies ")
                        .border_style(border_style),
                );
            frame.render_widget(loading, area);
        }
        (RequestStatus::Error, _) => {
            let mut lines = vec![Line::from("There was an error, please try again...")];
            if let Some(detail) = &ui_state.error_detail {
                lines.push(Line::from(""));
                lines.push(Line::styled(detail.clone(), Style::default().fg(Color::DarkGray)));
            }
            let error = Paragraph::new(lines)
                .style(Style::default().fg(Color::Red))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Movies ")
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(error, area);
        }
        (_, Some(page)) if page.is_empty() => {
            let empty = Paragraph::new(format!("Showing results for: \"{}\"", query.query()))
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Movies ")
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(empty, area);
        }
        (_, Some(page)) => {
            let stale = query.is_showing_stale();
            let title = if stale {
                format!(" Loading page {}... ", query.page())
            } else {
                format!(
                    " Results for \"{}\" (page {} of {}, {} movies) ",
                    query.query(),
                    query.page(),
                    page.total_pages,
                    page.total_results
                )
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1))
                .border_style(border_style);
            render_grid(frame, area, block, page, ui_state, is_focused, stale);
        }
        (RequestStatus::Success, None) => {}
    }
}

fn render_grid(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    page: &ResultPage,
    ui_state: &UiState,
    is_focused: bool,
    stale: bool,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = ui_state.grid_columns.max(1);
    let visible_rows = ((inner.height / CARD_HEIGHT) as usize).max(1);
    let selected_row = ui_state.grid_selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + row_offset;
        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CARD_WIDTH); columns])
            .split(*row_area);

        for (col, card_area) in card_areas.iter().enumerate() {
            let index = row * columns + col;
            if let Some(movie) = page.items.get(index) {
                let highlighted = index == ui_state.grid_selected;
                render_card(frame, *card_area, movie, highlighted && is_focused, stale);
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, movie: &MovieSummary, highlighted: bool, stale: bool) {
    let text_width = area.width.saturating_sub(2) as usize;

    let border_style = if highlighted {
        Style::default().fg(Color::Green)
    } else if stale {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let title_style = if stale {
        Style::default().fg(Color::DarkGray)
    } else if highlighted {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let poster = if movie.poster_path.is_some() { "▣" } else { "□" };

    let lines = vec![
        Line::styled(truncate_string(&movie.title, text_width), title_style),
        Line::styled(
            format!("{} {}  ★ {}", poster, year, movie.rating_label()),
            Style::default().fg(Color::DarkGray),
        ),
        Line::styled(
            truncate_string(movie.overview(), text_width),
            Style::default().fg(Color::Gray),
        ),
    ];

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_width() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(33), 1);
        assert_eq!(grid_columns(64), 2);
        assert_eq!(grid_columns(124), 4);
    }
}
