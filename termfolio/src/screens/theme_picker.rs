//! Theme selection with a live preview panel

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Request, Update};
use crate::app::event::{is_press, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui::{self, theme::ThemeId};

pub struct ThemePickerScreen {
    themes: &'static [ThemeId],
    cursor: usize,
}

impl Default for ThemePickerScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemePickerScreen {
    pub fn new() -> Self {
        Self {
            themes: &ThemeId::ALL,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Theme under the cursor; only the preview panel uses it
    pub fn preview(&self) -> ThemeId {
        self.themes[self.cursor]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        let len = self.themes.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = (self.cursor + len - 1) % len,
            KeyCode::Down | KeyCode::Char('j') => self.cursor = (self.cursor + 1) % len,
            KeyCode::Enter | KeyCode::Char(' ') => return Update::request(Request::ChangeTheme(self.preview())),
            KeyCode::Esc | KeyCode::Char('b') => return Update::navigate(ScreenId::Menu),
            _ => {}
        }
        Update::none()
    }
}

impl Screen for ThemePickerScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ThemePicker
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        Vec::new()
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let [header, body, footer] = ui::frame_layout(area);
        frame.render_widget(ui::header("CHANGE REALM", palette), header);

        let [list_area, preview_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);

        let items: Vec<ListItem> = self
            .themes
            .iter()
            .enumerate()
            .map(|(i, theme)| {
                let selected = i == self.cursor;
                let active = *theme == app.theme;
                let style = if selected {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.secondary)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "▶ " } else { "  " }, Style::default().fg(palette.accent)),
                    Span::raw(format!("{} ", theme.icon())),
                    Span::styled(theme.display_name(), style),
                    Span::styled(if active { "  (active)" } else { "" }, Style::default().fg(palette.help)),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent))
                    .title(" Realms "),
            ),
            list_area,
        );

        let preview = self.preview();
        let p = preview.palette();
        let sample = vec![
            Line::from(Span::styled(
                format!("{} {}", preview.icon(), preview.display_name()),
                Style::default().fg(p.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(preview.description(), Style::default().fg(p.secondary))),
            Line::from(""),
            Line::from(Span::styled("▶ Selected item", Style::default().fg(p.accent))),
            Line::from(Span::styled("✓ Success message", Style::default().fg(p.success))),
            Line::from(Span::styled("✗ Error message", Style::default().fg(p.error))),
            Line::from(Span::styled("enter select • esc back", Style::default().fg(p.help))),
        ];
        frame.render_widget(
            Paragraph::new(sample)
                .wrap(Wrap { trim: false })
                .style(Style::default().bg(p.background))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(p.accent))
                        .title(" Preview "),
                ),
            preview_area,
        );

        frame.render_widget(
            ui::key_hints(&[("↑/↓", "browse"), ("enter", "apply"), ("esc", "back")], palette),
            footer,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut ThemePickerScreen, code: KeyCode) -> Update {
        screen.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn test_moving_updates_preview_only() {
        let mut screen = ThemePickerScreen::new();
        let update = press(&mut screen, KeyCode::Down);
        assert!(update.is_empty());
        assert_eq!(screen.preview(), ThemeId::Hacker);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut screen = ThemePickerScreen::new();
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.preview(), ThemeId::Digimon);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_confirm_requests_theme_change() {
        let mut screen = ThemePickerScreen::new();
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        let update = press(&mut screen, KeyCode::Enter);
        assert!(matches!(update.request, Some(Request::ChangeTheme(ThemeId::Dracula))));
    }
}
