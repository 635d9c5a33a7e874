//! Contact links with copy to clipboard

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use libtermfolio::portfolio::{Contact, CONTACTS, PROFILE};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Job, Update};
use crate::app::event::{is_press, AsyncResult, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui;

/// Outcome of the last copy, shown until the cursor moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    Copied(String),
    Failed,
}

impl CopyStatus {
    pub fn message(&self) -> String {
        match self {
            CopyStatus::Copied(label) => format!("Copied {} to clipboard!", label),
            CopyStatus::Failed => "Failed to copy to clipboard.".to_string(),
        }
    }
}

pub struct ContactScreen {
    contacts: &'static [Contact],
    cursor: usize,
    status: Option<CopyStatus>,
}

impl Default for ContactScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactScreen {
    pub fn new() -> Self {
        Self {
            contacts: CONTACTS,
            cursor: 0,
            status: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> Option<&CopyStatus> {
        self.status.as_ref()
    }

    fn move_to(&mut self, cursor: usize) {
        if cursor != self.cursor {
            self.cursor = cursor;
            self.status = None;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_to((self.cursor + 1).min(self.contacts.len().saturating_sub(1)))
            }
            KeyCode::Char('c') | KeyCode::Enter => {
                if let Some(contact) = self.contacts.get(self.cursor) {
                    return Update::command(Command::Fetch(Job::CopyToClipboard {
                        label: contact.label.to_string(),
                        text: contact.value.to_string(),
                    }));
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => return Update::navigate(ScreenId::Menu),
            _ => {}
        }
        Update::none()
    }
}

impl Screen for ContactScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Contact
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        Vec::new()
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Completed {
                result: AsyncResult::Copied { label, result },
                ..
            } => {
                self.status = Some(match result {
                    Ok(()) => CopyStatus::Copied(label),
                    Err(error) => {
                        tracing::warn!(%error, "clipboard copy failed");
                        CopyStatus::Failed
                    }
                });
                Update::none()
            }
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let [header, body, footer] = ui::frame_layout(area);
        frame.render_widget(ui::header("SUMMON WARRIOR", palette), header);

        let [intro_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(body);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    PROFILE.name,
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(PROFILE.title, Style::default().fg(palette.secondary))),
                Line::from(Span::styled(PROFILE.location, Style::default().fg(palette.help))),
            ])
            .alignment(Alignment::Center),
            intro_area,
        );

        let items: Vec<ListItem> = self
            .contacts
            .iter()
            .enumerate()
            .map(|(i, contact)| {
                let selected = i == self.cursor;
                let label_style = if selected {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.secondary)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "▶ " } else { "  " }, Style::default().fg(palette.accent)),
                    Span::raw(format!("{} ", contact.icon)),
                    Span::styled(format!("{:<10}", contact.label), label_style),
                    Span::styled(contact.link, Style::default().fg(palette.help)),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent)),
            ),
            list_area,
        );

        if let Some(status) = &self.status {
            let color = match status {
                CopyStatus::Copied(_) => palette.success,
                CopyStatus::Failed => palette.error,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(status.message(), Style::default().fg(color)))
                    .alignment(Alignment::Center),
                status_area,
            );
        }

        frame.render_widget(
            ui::key_hints(&[("↑/↓", "select"), ("c/enter", "copy"), ("b/esc", "back")], palette),
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
    use libtermfolio::SourceError;

    fn press(screen: &mut ContactScreen, code: KeyCode) -> Update {
        screen.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn copied(label: &str, result: Result<(), SourceError>) -> Event {
        Event::Completed {
            origin: ScreenId::Contact,
            result: AsyncResult::Copied {
                label: label.to_string(),
                result,
            },
        }
    }

    #[test]
    fn test_copy_requests_clipboard_job() {
        let mut screen = ContactScreen::new();
        press(&mut screen, KeyCode::Down);
        let update = press(&mut screen, KeyCode::Char('c'));
        assert_eq!(
            update.commands,
            vec![Command::Fetch(Job::CopyToClipboard {
                label: "GitHub".to_string(),
                text: "github.com/Polqt".to_string(),
            })]
        );
    }

    #[test]
    fn test_copy_messages() {
        let mut screen = ContactScreen::new();
        screen.handle_event(copied("Email", Ok(())));
        assert_eq!(screen.status().map(|s| s.message()), Some("Copied Email to clipboard!".to_string()));

        screen.handle_event(copied("Email", Err(SourceError::Clipboard("none".into()))));
        assert_eq!(screen.status().map(|s| s.message()), Some("Failed to copy to clipboard.".to_string()));
    }

    #[test]
    fn test_message_cleared_on_cursor_move() {
        let mut screen = ContactScreen::new();
        screen.handle_event(copied("LinkedIn", Ok(())));
        press(&mut screen, KeyCode::Down);
        assert!(screen.status().is_none());
    }

    #[test]
    fn test_message_kept_when_cursor_cannot_move() {
        let mut screen = ContactScreen::new();
        screen.handle_event(copied("LinkedIn", Ok(())));
        press(&mut screen, KeyCode::Up);
        assert!(screen.status().is_some());
    }
}
