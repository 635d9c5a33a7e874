//! Repository list with a scrolling window
//!
//! The list is fetched the first time the screen is shown and kept for the
//! rest of the session; `r` fetches it again. Opening a repository fetches
//! its README here and hands it to the detail screen.

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use libtermfolio::{Repository, SourceError};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Job, Request, Update};
use crate::app::event::{is_press, AsyncResult, Event, NavPayload, NavigationRequest};
use crate::app::state::{AppState, ScreenId};
use crate::ui::{
    self,
    theme::{language_color, Palette, GOLD},
};

/// Smallest number of rows the window ever shows
pub const MIN_PAGE_SIZE: usize = 3;

/// Rows each repository occupies on screen
const ROWS_PER_ITEM: usize = 3;

/// Window size for a terminal `height` rows tall
pub fn page_size_for_height(height: u16) -> usize {
    (usize::from(height).saturating_sub(8) / ROWS_PER_ITEM).max(MIN_PAGE_SIZE)
}

/// Cursor plus the visible slice `[offset, offset + page_size)` of a list
///
/// After every operation `offset <= cursor < offset + page_size` and
/// `offset + page_size <= max(page_size, len)`. The offset only moves when
/// the cursor would leave the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    cursor: usize,
    offset: usize,
    page_size: usize,
    len: usize,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self::new(0, MIN_PAGE_SIZE)
    }
}

impl ScrollWindow {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            page_size: page_size.max(1),
            len,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Visible index range
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.offset..(self.offset + self.page_size).min(self.len)
    }

    /// 1-based current page and total pages
    pub fn page(&self) -> (usize, usize) {
        let total = self.len.div_ceil(self.page_size).max(1);
        (self.offset / self.page_size + 1, total)
    }

    /// Replace the list length; a list shorter than the cursor resets to the top
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.cursor >= len {
            self.cursor = 0;
            self.offset = 0;
        }
        self.ensure_cursor_in_window();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.ensure_cursor_in_window();
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.ensure_cursor_in_window();
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
        self.ensure_cursor_in_window();
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size);
        self.ensure_cursor_in_window();
    }

    pub fn page_down(&mut self) {
        self.cursor = (self.cursor + self.page_size).min(self.len.saturating_sub(1));
        self.ensure_cursor_in_window();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_in_window();
    }

    pub fn end(&mut self) {
        self.cursor = self.len.saturating_sub(1);
        self.ensure_cursor_in_window();
    }

    fn ensure_cursor_in_window(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.page_size {
            self.offset = self.cursor + 1 - self.page_size;
        }
        self.offset = self.offset.min(self.len.saturating_sub(self.page_size));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectsPhase {
    /// Never shown yet
    Idle,
    Loading,
    Loaded,
    Failed(SourceError),
}

pub struct ProjectsScreen {
    phase: ProjectsPhase,
    repositories: Vec<Repository>,
    window: ScrollWindow,
    /// Repository whose README is being fetched
    pending_readme: Option<String>,
    width: u16,
    height: u16,
}

impl Default for ProjectsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectsScreen {
    pub fn new() -> Self {
        Self {
            phase: ProjectsPhase::Idle,
            repositories: Vec::new(),
            window: ScrollWindow::default(),
            pending_readme: None,
            width: 0,
            height: 0,
        }
    }

    pub fn phase(&self) -> &ProjectsPhase {
        &self.phase
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn window(&self) -> &ScrollWindow {
        &self.window
    }

    pub fn cursor(&self) -> usize {
        self.window.cursor()
    }

    pub fn pending_readme(&self) -> Option<&str> {
        self.pending_readme.as_deref()
    }

    /// Width from the last resize
    pub fn width(&self) -> u16 {
        self.width
    }

    fn fetch(&mut self) -> Command {
        self.phase = ProjectsPhase::Loading;
        Command::Fetch(Job::Repositories)
    }

    fn open_selected(&mut self) -> Update {
        if self.pending_readme.is_some() {
            return Update::none();
        }
        let Some(repo) = self.repositories.get(self.window.cursor()) else {
            return Update::none();
        };
        tracing::debug!(repo = %repo.name, "fetching README");
        self.pending_readme = Some(repo.name.clone());
        Update::command(Command::Fetch(Job::Readme(repo.clone())))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => return Update::navigate(ScreenId::Menu),
            KeyCode::Char('r') if self.phase != ProjectsPhase::Loading => {
                return Update::command(self.fetch());
            }
            _ => {}
        }

        if self.phase != ProjectsPhase::Loaded {
            return Update::none();
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.window.up(),
            KeyCode::Down | KeyCode::Char('j') => self.window.down(),
            KeyCode::PageUp => self.window.page_up(),
            KeyCode::PageDown => self.window.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.window.home(),
            KeyCode::End | KeyCode::Char('G') => self.window.end(),
            KeyCode::Enter => return self.open_selected(),
            _ => {}
        }
        Update::none()
    }

    fn handle_result(&mut self, result: AsyncResult) -> Update {
        match result {
            AsyncResult::Repositories(Ok(repositories)) => {
                tracing::debug!(count = repositories.len(), "repositories loaded");
                self.window.set_len(repositories.len());
                self.repositories = repositories;
                self.phase = ProjectsPhase::Loaded;
                Update::none()
            }
            AsyncResult::Repositories(Err(error)) => {
                tracing::warn!(%error, "repository fetch failed");
                self.phase = ProjectsPhase::Failed(error);
                Update::none()
            }
            AsyncResult::Readme { repo, markdown } => {
                if self.pending_readme.as_deref() != Some(repo.name.as_str()) {
                    return Update::none();
                }
                self.pending_readme = None;
                Update::request(Request::Navigate(NavigationRequest::with_payload(
                    ScreenId::ProjectDetail,
                    NavPayload::Project { repo, readme: markdown },
                )))
            }
            _ => Update::none(),
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let [summary_area, list_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

        let range = self.window.visible();
        let (page, pages) = self.window.page();
        let mut summary = format!(
            "Showing {}-{} of {} • Page {}/{}",
            range.start + 1,
            range.end,
            self.window.len(),
            page,
            pages
        );
        if let Some(name) = &self.pending_readme {
            summary.push_str(&format!(" • opening {}...", name));
        }
        frame.render_widget(
            Paragraph::new(Span::styled(summary, Style::default().fg(palette.secondary))),
            summary_area,
        );

        let description_width = usize::from(area.width.saturating_sub(6)).max(10);
        let items: Vec<ListItem> = self.repositories[range.clone()]
            .iter()
            .enumerate()
            .map(|(i, repo)| {
                let selected = range.start + i == self.window.cursor();
                let marker = if selected { "▸ " } else { "  " };
                let name_style = if selected {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.secondary).add_modifier(Modifier::BOLD)
                };
                let language = repo.language_or_unknown();
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(palette.accent)),
                        Span::styled(repo.name.clone(), name_style),
                        Span::styled(format!("  ★ {}", repo.stars), Style::default().fg(GOLD)),
                        Span::styled("  ● ", Style::default().fg(language_color(language))),
                        Span::styled(language.to_string(), Style::default().fg(language_color(language))),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", ui::truncate(repo.description_or_default(), description_width)),
                        Style::default().fg(palette.help),
                    )),
                    Line::from(""),
                ])
            })
            .collect();

        frame.render_widget(List::new(items), list_area);
    }
}

impl Screen for ProjectsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Projects
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        if self.phase == ProjectsPhase::Idle {
            vec![self.fetch()]
        } else {
            Vec::new()
        }
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Resize(width, height) => {
                self.width = width;
                self.height = height;
                self.window.set_page_size(page_size_for_height(height));
                Update::none()
            }
            Event::Completed { result, .. } => self.handle_result(result),
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let [header, body, footer] = ui::frame_layout(area);
        frame.render_widget(ui::header("⚡ Battle Records ⚡", palette), header);

        let hints: &[(&str, &str)] = match &self.phase {
            ProjectsPhase::Idle | ProjectsPhase::Loading => {
                ui::render_loading(frame, body, "Loading GitHub repos...", palette);
                &[("esc", "back")]
            }
            ProjectsPhase::Failed(error) => {
                ui::render_error(
                    frame,
                    body,
                    "Could not load repositories",
                    &error.to_string(),
                    "Press r to retry or esc to go back",
                    palette,
                );
                &[("r", "retry"), ("esc", "back")]
            }
            ProjectsPhase::Loaded if self.repositories.is_empty() => {
                frame.render_widget(
                    Paragraph::new("No repositories found.").style(Style::default().fg(palette.help)),
                    body,
                );
                &[("r", "refresh"), ("esc", "back")]
            }
            ProjectsPhase::Loaded => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent));
                let inner = block.inner(body);
                frame.render_widget(block, body);
                self.render_list(frame, inner, palette);
                &[
                    ("↑/↓", "navigate"),
                    ("pgup/pgdn", "page"),
                    ("enter", "open"),
                    ("r", "refresh"),
                    ("esc", "back"),
                ]
            }
        };
        frame.render_widget(ui::key_hints(hints, palette), footer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
