//! Experience timeline with an overview and a detailed mode

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use libtermfolio::portfolio::{Experience, ExperienceKind, EXPERIENCE};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Update};
use crate::app::event::{is_press, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui::{self, theme::Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceView {
    Overview,
    Detailed,
}

impl ExperienceView {
    fn label(self) -> &'static str {
        match self {
            ExperienceView::Overview => "timeline",
            ExperienceView::Detailed => "detailed",
        }
    }
}

/// Entries per kind: (work, education, certification)
pub fn counts_by_kind(entries: &[Experience]) -> (usize, usize, usize) {
    entries.iter().fold((0, 0, 0), |(w, e, c), exp| match exp.kind {
        ExperienceKind::Work => (w + 1, e, c),
        ExperienceKind::Education => (w, e + 1, c),
        ExperienceKind::Certification => (w, e, c + 1),
    })
}

pub struct ExperienceScreen {
    entries: &'static [Experience],
    cursor: usize,
    view: ExperienceView,
}

impl Default for ExperienceScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceScreen {
    pub fn new() -> Self {
        Self {
            entries: EXPERIENCE,
            cursor: 0,
            view: ExperienceView::Overview,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn view(&self) -> ExperienceView {
        self.view
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.view = match self.view {
                    ExperienceView::Overview => ExperienceView::Detailed,
                    ExperienceView::Detailed => ExperienceView::Overview,
                };
            }
            KeyCode::Esc | KeyCode::Char('b') => {
                if self.view == ExperienceView::Detailed {
                    self.view = ExperienceView::Overview;
                } else {
                    return Update::navigate(ScreenId::Menu);
                }
            }
            _ => {}
        }
        Update::none()
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, exp)| {
                let selected = i == self.cursor;
                let title_style = if selected {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.secondary)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(if selected { "● " } else { "○ " }, Style::default().fg(palette.accent)),
                        Span::raw(format!("{} ", exp.icon())),
                        Span::styled(exp.title, title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("│   {} • {} - {}", exp.organization, exp.start, exp.end),
                        Style::default().fg(palette.help),
                    )),
                    Line::from(Span::styled("│", Style::default().fg(palette.accent))),
                ])
            })
            .collect();
        frame.render_widget(List::new(items), area);
    }

    fn render_detailed(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let Some(exp) = self.entries.get(self.cursor) else {
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} {}", exp.icon(), exp.title),
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} • {}", exp.organization, exp.location),
                Style::default().fg(palette.secondary),
            )),
            Line::from(Span::styled(
                format!("{} - {}", exp.start, exp.end),
                Style::default().fg(palette.help),
            )),
            Line::from(""),
            Line::from(Span::styled("Highlights", Style::default().fg(palette.accent))),
        ];
        lines.extend(exp.highlights.iter().map(|h| Line::from(format!("  ▸ {}", h))));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Skills: ", Style::default().fg(palette.accent)),
            Span::raw(exp.skills.join(" • ")),
        ]));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.primary)),
                ),
            area,
        );
    }
}

impl Screen for ExperienceScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Experience
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
        frame.render_widget(ui::header("COMBAT HISTORY", palette), header);

        let [stats_area, content] = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(body);
        let (work, education, certification) = counts_by_kind(self.entries);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "💼 {} Work   🎓 {} Education   📜 {} Certifications   👁  {} view",
                    work,
                    education,
                    certification,
                    self.view.label()
                ),
                Style::default().fg(palette.secondary),
            ))
            .alignment(Alignment::Center),
            stats_area,
        );

        match self.view {
            ExperienceView::Overview => self.render_overview(frame, content, palette),
            ExperienceView::Detailed => self.render_detailed(frame, content, palette),
        }

        frame.render_widget(
            ui::key_hints(&[("↑/↓", "select"), ("enter", "toggle view"), ("b/esc", "back")], palette),
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
    use crate::app::command::Request;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut ExperienceScreen, code: KeyCode) -> Update {
        screen.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn test_enter_toggles_view() {
        let mut screen = ExperienceScreen::new();
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.view(), ExperienceView::Detailed);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.view(), ExperienceView::Overview);
    }

    #[test]
    fn test_escape_leaves_detail_before_menu() {
        let mut screen = ExperienceScreen::new();
        press(&mut screen, KeyCode::Enter);
        assert!(press(&mut screen, KeyCode::Esc).request.is_none());
        assert_eq!(screen.view(), ExperienceView::Overview);
        assert!(matches!(
            press(&mut screen, KeyCode::Esc).request,
            Some(Request::Navigate(req)) if req.target == ScreenId::Menu
        ));
    }

    #[test]
    fn test_cursor_bounded() {
        let mut screen = ExperienceScreen::new();
        for _ in 0..10 {
            press(&mut screen, KeyCode::Down);
        }
        assert_eq!(screen.cursor(), EXPERIENCE.len() - 1);
    }

    #[test]
    fn test_counts_by_kind() {
        assert_eq!(counts_by_kind(EXPERIENCE), (1, 1, 0));
    }
}
