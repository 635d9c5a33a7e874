//! Live GitHub account statistics with periodic refresh
//!
//! The refresh timer is armed on first activation and keeps running for the
//! rest of the session, also while other screens are active.

use std::any::Any;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use libtermfolio::{AccountStats, SourceError};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Job, TimerId, Update};
use crate::app::event::{is_press, AsyncResult, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui::{self, theme::Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

pub struct StatsScreen {
    refresh_every: Duration,
    started: bool,
    in_flight: bool,
    stats: Option<AccountStats>,
    error: Option<SourceError>,
}

impl StatsScreen {
    pub fn new(refresh_every: Duration) -> Self {
        Self {
            refresh_every,
            started: false,
            in_flight: false,
            stats: None,
            error: None,
        }
    }

    /// Loaded whenever some stats were received, even if a later refresh failed
    pub fn phase(&self) -> StatsPhase {
        match (&self.stats, &self.error, self.in_flight) {
            (Some(_), _, _) => StatsPhase::Loaded,
            (None, _, true) => StatsPhase::Loading,
            (None, Some(_), false) => StatsPhase::Failed,
            (None, None, false) => StatsPhase::Idle,
        }
    }

    pub fn stats(&self) -> Option<&AccountStats> {
        self.stats.as_ref()
    }

    pub fn error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight
    }

    /// Fetch unless one is already running
    fn refresh(&mut self) -> Update {
        if self.in_flight {
            return Update::none();
        }
        self.in_flight = true;
        Update::command(Command::Fetch(Job::AccountStats))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        match key.code {
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Esc | KeyCode::Char('b') => Update::navigate(ScreenId::Menu),
            _ => Update::none(),
        }
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, stats: &AccountStats, palette: &Palette) {
        let cards = [
            ("📦", "Repositories", stats.repo_count.to_string()),
            ("⭐", "Stars", stats.star_count.to_string()),
            ("👥", "Followers", stats.follower_count.to_string()),
            ("👤", "Following", stats.following_count.to_string()),
            ("📝", "Public Gists", stats.gist_count.to_string()),
        ];

        let [top, bottom] = Layout::vertical([Constraint::Length(5), Constraint::Length(5)]).areas(area);
        let top_cells = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(top);
        let bottom_cells = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(bottom);

        for ((icon, label, value), cell) in cards.iter().zip(top_cells.iter().chain(bottom_cells.iter())) {
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    value.clone(),
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(format!("{} {}", icon, label), Style::default().fg(palette.secondary))),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent)),
            );
            frame.render_widget(card, *cell);
        }
    }
}

impl Screen for StatsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Stats
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        let mut commands = self.refresh().commands;
        commands.push(Command::StartTimer {
            timer: TimerId::Refresh,
            period: self.refresh_every,
        });
        commands
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Tick {
                timer: TimerId::Refresh,
                ..
            } => self.refresh(),
            Event::Completed {
                result: AsyncResult::Stats(result),
                ..
            } => {
                self.in_flight = false;
                match result {
                    Ok(stats) => {
                        self.stats = Some(stats);
                        self.error = None;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "stats refresh failed");
                        self.error = Some(error);
                    }
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
        frame.render_widget(ui::header("📊 WARRIOR STATS", palette), header);
        frame.render_widget(
            ui::key_hints(&[("r", "refresh"), ("b/esc", "back")], palette),
            footer,
        );

        match (self.phase(), &self.stats, &self.error) {
            (StatsPhase::Loaded, Some(stats), error) => {
                let [cards, status] = Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).areas(body);
                self.render_cards(frame, cards, stats, palette);

                let local = stats.fetched_at.with_timezone(&chrono::Local);
                let mut line = vec![Span::styled(
                    format!("Last updated {}", local.format("%H:%M:%S")),
                    Style::default().fg(palette.help),
                )];
                if self.in_flight {
                    line.push(Span::styled("  • refreshing...", Style::default().fg(palette.accent)));
                } else if let Some(error) = error {
                    line.push(Span::styled(format!("  • {}", error), Style::default().fg(palette.error)));
                }
                frame.render_widget(Paragraph::new(Line::from(line)).alignment(Alignment::Center), status);
            }
            (StatsPhase::Failed, _, Some(error)) => ui::render_error(
                frame,
                body,
                "Could not load stats",
                &error.to_string(),
                "Press r to retry or esc to go back",
                palette,
            ),
            _ => ui::render_loading(frame, body, "Gathering battle statistics...", palette),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
