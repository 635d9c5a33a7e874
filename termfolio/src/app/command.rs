//! Work requested by screens and by the dispatcher
//!
//! Screens never perform I/O. Handling an event yields an [`Update`]: zero or
//! more [`Command`]s for the scheduler plus at most one [`Request`] for the
//! dispatcher. The dispatcher tags each command with the screen that issued
//! it, so whatever comes back can be routed home.

use std::time::Duration;

use libtermfolio::Repository;

use super::event::NavigationRequest;
use super::state::ScreenId;
use crate::ui::theme::ThemeId;

/// Recurring timers a screen may own
///
/// At most one timer per (screen, id) pair runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerId {
    /// Intro typewriter and banner reveal
    Typewriter,
    /// Matrix rain frames
    Animation,
    /// Periodic stats refresh
    Refresh,
}

/// Background work, each producing exactly one `AsyncResult`
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Repository list of the configured user
    Repositories,

    /// Raw README of one repository
    Readme(Repository),

    /// Convert README markdown to styled text
    RenderMarkdown { repo_name: String, markdown: String },

    /// Account-level numbers of the configured user
    AccountStats,

    /// Put `text` on the clipboard
    CopyToClipboard { label: String, text: String },
}

/// Something a screen wants the scheduler to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a job, bounded by the fetch timeout when it is a network call
    Fetch(Job),

    /// Deliver `Event::Tick` every `period` until stopped; replaces a running timer with the same id
    StartTimer { timer: TimerId, period: Duration },

    /// Stop a running timer; a no-op when it is not running
    StopTimer(TimerId),
}

/// Something a screen wants the dispatcher to do
#[derive(Debug, Clone)]
pub enum Request {
    Navigate(NavigationRequest),
    ChangeTheme(ThemeId),
    Quit,
}

/// Outcome of `Screen::handle_event`
#[derive(Debug, Clone, Default)]
pub struct Update {
    pub commands: Vec<Command>,
    pub request: Option<Request>,
}

impl Update {
    /// Nothing to do
    pub fn none() -> Self {
        Self::default()
    }

    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            request: None,
        }
    }

    pub fn navigate(target: ScreenId) -> Self {
        Self::request(Request::Navigate(NavigationRequest::to(target)))
    }

    pub fn request(request: Request) -> Self {
        Self {
            commands: Vec::new(),
            request: Some(request),
        }
    }

    pub fn quit() -> Self {
        Self::request(Request::Quit)
    }

    /// Add a command to this update
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Does this update carry neither commands nor a request?
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.request.is_none()
    }
}

/// Side effect emitted by `Dispatcher::dispatch`
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Execute a screen's command; results and ticks are tagged with `origin`
    Run { origin: ScreenId, command: Command },

    /// Persist the chosen theme name
    SaveTheme(ThemeId),
}
