//! Overlay rendering (movie modal, notifications, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{MovieSummary, Notification, NotificationKind};
use super::utils::centered_popup;

pub fn render_movie_modal(frame: &mut Frame, movie: &MovieSummary) {
    let popup_area = centered_popup(frame.area(), 80, 22);

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let overview = match movie.overview() {
        "" => "No overview available.",
        text => text,
    };
    let release_date = match movie.release_date() {
        "" => "Unknown",
        date => date,
    };

    let lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            movie.modal_image_url(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(overview.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Release Date: ", label),
            Span::raw(release_date.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Rating: ", label),
            Span::raw(movie.rating_label()),
        ]),
        Line::from(vec![
            Span::styled("Poster: ", label),
            Span::styled(movie.poster_url(), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Movie (Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(modal, popup_area);
}

/// Toast-style notifications stacked below the search bar
pub fn render_notifications(frame: &mut Frame, notifications: &[Notification]) {
    let area = frame.area();
    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_x = area.width.saturating_sub(popup_width) / 2;

    for (i, notification) in notifications.iter().enumerate() {
        let popup_y = 3 + (i as u16) * 3;
        if popup_y + 3 > area.height {
            break;
        }
        let popup_area = Rect {
            x: popup_x,
            y: popup_y,
            width: popup_width,
            height: 3,
        };

        let (color, title) = match notification.kind {
            NotificationKind::FetchFailed { .. } => (Color::Red, " Error "),
            NotificationKind::EmptyQuery => (Color::Yellow, " Search "),
            NotificationKind::NoResults { .. } => (Color::Yellow, " No results "),
        };

        frame.render_widget(Clear, popup_area);
        let toast = Paragraph::new(notification.kind.message())
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(Color::Black)),
            );
        frame.render_widget(toast, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = vec![
        ("", "── Search ──"),
        ("type", "Edit query"),
        ("Enter", "Search"),
        ("Esc", "Clear query and notices"),
        ("", ""),
        ("", "── Results ──"),
        ("Tab", "Switch search / results"),
        ("← ↑ ↓ →", "Move between movies"),
        ("Enter", "Open movie details"),
        ("/ or G", "Back to search"),
        ("N / PgDn", "Next page"),
        ("P / PgUp", "Previous page"),
        ("Home / End", "First / last page"),
        ("", ""),
        ("", "── General ──"),
        ("Esc", "Close modal / dismiss notices"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_area = centered_popup(frame.area(), 56, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^36}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>14}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
