//! Layout rendering (search bar, status bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, QueryState, RequestStatus, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, query: &QueryState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(22), // Page indicator
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_input.is_empty() && !is_focused {
        "Search movies..."
    } else {
        ui_state.search_input.as_str()
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if is_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[0]);

    if is_focused {
        // border + padding
        let cursor_x = chunks[0].x + 2 + ui_state.search_input.chars().count() as u16;
        if cursor_x < chunks[0].right().saturating_sub(1) {
            frame.set_cursor_position((cursor_x, chunks[0].y + 1));
        }
    }

    let page_label = match (query.page(), query.total_pages()) {
        (0, _) => "-".to_string(),
        (page, Some(total)) if total > 0 => format!("{} / {}", page, total),
        (page, _) => format!("{}", page),
    };
    let page = Paragraph::new(page_label)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Page "));
    frame.render_widget(page, chunks[1]);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, query: &QueryState) {
    let (label, color) = match query.status() {
        RequestStatus::Idle => ("Idle", Color::DarkGray),
        RequestStatus::Loading => ("Loading", Color::Yellow),
        RequestStatus::Success => ("Ready", Color::Green),
        RequestStatus::Error => ("Error", Color::Red),
    };

    let mut spans = vec![
        Span::styled(format!(" ● {} ", label), Style::default().fg(color)),
    ];
    if let Some(page) = query.displayed_page() {
        spans.push(Span::styled(
            format!(" {} movies ", page.total_results),
            Style::default().fg(Color::White),
        ));
    }
    spans.push(Span::styled(
        " Enter search · Tab focus · n/p page · H help · Ctrl+Q quit ",
        Style::default().fg(Color::DarkGray),
    ));

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
