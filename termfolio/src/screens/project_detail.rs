//! A single repository with its rendered README

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use libtermfolio::{Repository, SourceError};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Job, Update};
use crate::app::event::{is_press, AsyncResult, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui::{
    self,
    theme::{language_color, Palette, GOLD},
};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    /// No repository opened yet
    Empty,
    Loading,
    Loaded(Text<'static>),
    Failed(SourceError),
}

pub struct ProjectDetailScreen {
    repo: Option<Repository>,
    phase: DetailPhase,
    scroll: u16,
    height: u16,
}

impl Default for ProjectDetailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDetailScreen {
    pub fn new() -> Self {
        Self {
            repo: None,
            phase: DetailPhase::Empty,
            scroll: 0,
            height: 0,
        }
    }

    pub fn repo(&self) -> Option<&Repository> {
        self.repo.as_ref()
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn content_lines(&self) -> u16 {
        match &self.phase {
            DetailPhase::Loaded(text) => u16::try_from(text.lines.len()).unwrap_or(u16::MAX),
            _ => 0,
        }
    }

    fn page(&self) -> u16 {
        self.height.saturating_sub(10).max(1)
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.content_lines().saturating_sub(1));
        let next = (i32::from(self.scroll) + delta).clamp(0, max);
        self.scroll = next as u16;
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        let page = i32::from(self.page());
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => return Update::navigate(ScreenId::Projects),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
        Update::none()
    }

    fn repo_header(repo: &Repository, palette: &Palette) -> Paragraph<'static> {
        let language = repo.language_or_unknown();
        let lines = vec![
            Line::from(Span::styled(
                format!("📁 {}", repo.name),
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                repo.description_or_default().to_string(),
                Style::default().fg(palette.secondary),
            )),
            Line::from(vec![
                Span::styled(
                    format!("● {}", language),
                    Style::default().fg(language_color(language)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  ★ {}", repo.stars), Style::default().fg(GOLD)),
            ]),
            Line::from(Span::styled(format!("🔗 {}", repo.url), Style::default().fg(palette.help))),
        ];
        Paragraph::new(lines)
    }
}

impl Screen for ProjectDetailScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ProjectDetail
    }

    fn initialize(&mut self, payload: Option<NavPayload>) -> Vec<Command> {
        let Some(NavPayload::Project { repo, readme }) = payload else {
            return Vec::new();
        };

        self.scroll = 0;
        let commands = match readme {
            Ok(markdown) => {
                self.phase = DetailPhase::Loading;
                vec![Command::Fetch(Job::RenderMarkdown {
                    repo_name: repo.name.clone(),
                    markdown,
                })]
            }
            Err(error) => {
                self.phase = DetailPhase::Failed(error);
                Vec::new()
            }
        };
        self.repo = Some(repo);
        commands
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Resize(_, height) => {
                self.height = height;
                Update::none()
            }
            Event::Completed {
                result: AsyncResult::Markdown { repo_name, rendered },
                ..
            } => {
                // A render for a repository opened earlier is stale
                if self.repo.as_ref().map(|r| r.name.as_str()) == Some(repo_name.as_str()) {
                    self.phase = match rendered {
                        Ok(text) => DetailPhase::Loaded(text),
                        Err(error) => DetailPhase::Failed(error),
                    };
                }
                Update::none()
            }
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let [header, body, footer] = ui::frame_layout(area);
        frame.render_widget(ui::header("Project Details", palette), header);
        frame.render_widget(
            ui::key_hints(&[("↑/↓", "scroll"), ("pgup/pgdn", "page"), ("esc", "back")], palette),
            footer,
        );

        let Some(repo) = &self.repo else {
            frame.render_widget(Paragraph::new("No project selected."), body);
            return;
        };

        let [info, readme] = Layout::vertical([Constraint::Length(5), Constraint::Min(1)]).areas(body);
        frame.render_widget(Self::repo_header(repo, palette), info);

        match &self.phase {
            DetailPhase::Empty | DetailPhase::Loading => {
                ui::render_loading(frame, readme, "Rendering markdown...", palette);
            }
            DetailPhase::Failed(error) => ui::render_error(
                frame,
                readme,
                "Error loading project details",
                &error.to_string(),
                "Press esc to go back",
                palette,
            ),
            DetailPhase::Loaded(text) => {
                let widget = Paragraph::new(text.clone())
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(palette.primary))
                            .title(" README "),
                    )
                    .wrap(Wrap { trim: false })
                    .scroll((self.scroll, 0));
                frame.render_widget(widget, readme);
            }
        }
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
    use libtermfolio::mock::sample_repositories;

    fn open(screen: &mut ProjectDetailScreen, readme: Result<String, SourceError>) -> Vec<Command> {
        let repo = sample_repositories(1).remove(0);
        screen.initialize(Some(NavPayload::Project { repo, readme }))
    }

    fn rendered(repo_name: &str, lines: usize) -> Event {
        let text = Text::from((0..lines).map(|i| Line::from(format!("line {}", i))).collect::<Vec<_>>());
        Event::Completed {
            origin: ScreenId::ProjectDetail,
            result: AsyncResult::Markdown {
                repo_name: repo_name.to_string(),
                rendered: Ok(text),
            },
        }
    }

    #[test]
    fn test_initialize_schedules_render() {
        let mut screen = ProjectDetailScreen::new();
        let commands = open(&mut screen, Ok("# hi".to_string()));
        assert_eq!(
            commands,
            vec![Command::Fetch(Job::RenderMarkdown {
                repo_name: "repo-00".to_string(),
                markdown: "# hi".to_string(),
            })]
        );
        assert_eq!(screen.phase(), &DetailPhase::Loading);
    }

    #[test]
    fn test_readme_failure_shows_error_without_render() {
        let mut screen = ProjectDetailScreen::new();
        let commands = open(&mut screen, Err(SourceError::NotFound("README".into())));
        assert!(commands.is_empty());
        assert!(matches!(screen.phase(), DetailPhase::Failed(SourceError::NotFound(_))));
    }

    #[test]
    fn test_stale_render_ignored() {
        let mut screen = ProjectDetailScreen::new();
        open(&mut screen, Ok("# hi".to_string()));
        screen.handle_event(rendered("some-other-repo", 3));
        assert_eq!(screen.phase(), &DetailPhase::Loading);
        screen.handle_event(rendered("repo-00", 3));
        assert!(matches!(screen.phase(), DetailPhase::Loaded(_)));
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut screen = ProjectDetailScreen::new();
        open(&mut screen, Ok("x".to_string()));
        screen.handle_event(rendered("repo-00", 3));
        for _ in 0..10 {
            screen.handle_event(Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        }
        assert_eq!(screen.scroll(), 2);
    }

    #[test]
    fn test_back_returns_to_projects() {
        let mut screen = ProjectDetailScreen::new();
        let update = screen.handle_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        match update.request {
            Some(Request::Navigate(req)) => assert_eq!(req.target, ScreenId::Projects),
            other => panic!("Expected navigation to projects, got {:?}", other),
        }
    }
}
