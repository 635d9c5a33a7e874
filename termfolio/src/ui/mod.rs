//! Shared rendering helpers
//!
//! Screens compose their frames from these pieces so headers, footers and
//! loading/error states look the same everywhere. Render functions have no
//! side effects.

pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use self::theme::Palette;

/// Bordered, centered title bar (three rows tall)
pub fn header(title: &str, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    )
}

/// One-line keybinding legend: `key desc • key desc`
pub fn key_hints(hints: &[(&str, &str)], palette: &Palette) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(palette.help)));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(palette.help)));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Split a screen into header, body and footer rows
pub fn frame_layout(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Key hints
        ])
        .areas(area)
}

/// Placeholder drawn before the terminal size is known
pub fn render_waiting(frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new("Loading..."), area);
}

/// Centered box with a progress message
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let popup_area = centered_rect(60, 30, area);

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(palette.accent),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(text, popup_area);
}

/// Centered error box with a hint on how to recover
pub fn render_error(frame: &mut Frame, area: Rect, title: &str, error: &str, hint: &str, palette: &Palette) {
    let popup_area = centered_rect(70, 40, area);

    let error_text = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(palette.help))),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Helper to create centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cut `text` to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
