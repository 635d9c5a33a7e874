//! Events processed by the dispatcher
//!
//! Everything that can change state arrives as an [`Event`]: terminal input,
//! timer ticks, finished background work, and navigation requests. Ticks and
//! results carry the [`ScreenId`] that asked for them so they reach that
//! screen even when another one is active.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libtermfolio::{AccountStats, Repository, SourceError};
use ratatui::text::Text;

use super::command::TimerId;
use super::state::ScreenId;
use crate::ui::theme::ThemeId;

/// Input to the dispatcher
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize (width, height)
    Resize(u16, u16),

    /// A recurring timer registered by `origin` fired
    Tick { origin: ScreenId, timer: TimerId },

    /// Background work started by `origin` finished
    Completed { origin: ScreenId, result: AsyncResult },

    /// Switch the active screen
    Navigate(NavigationRequest),

    /// Switch the global color scheme
    ThemeChange(ThemeId),
}

/// Outcome of one background task
///
/// Failures are already converted to [`SourceError`] inside the task.
#[derive(Debug, Clone)]
pub enum AsyncResult {
    Repositories(Result<Vec<Repository>, SourceError>),

    Readme {
        repo: Repository,
        markdown: Result<String, SourceError>,
    },

    Markdown {
        repo_name: String,
        rendered: Result<Text<'static>, SourceError>,
    },

    Stats(Result<AccountStats, SourceError>),

    Copied {
        label: String,
        result: Result<(), SourceError>,
    },
}

/// Request to make `target` the active screen
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub target: ScreenId,
    pub payload: Option<NavPayload>,
}

impl NavigationRequest {
    pub fn to(target: ScreenId) -> Self {
        Self { target, payload: None }
    }

    pub fn with_payload(target: ScreenId, payload: NavPayload) -> Self {
        Self {
            target,
            payload: Some(payload),
        }
    }
}

/// Data handed to the target screen's `initialize`
#[derive(Debug, Clone)]
pub enum NavPayload {
    /// The repository opened from the projects list and its README fetch outcome
    Project {
        repo: Repository,
        readme: Result<String, SourceError>,
    },

    /// Open the menu with its search box focused
    OpenSearch,
}

/// Ctrl+C ends the session from any screen
pub fn is_hard_quit(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Key presses and repeats; releases are ignored by every screen
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Keys with a meaning on every screen unless the active one claims them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    /// `q` ends the session
    Quit,
    /// `/` jumps to the menu search
    Search,
}

impl GlobalKey {
    pub fn of(key: &KeyEvent) -> Option<Self> {
        if !is_press(key) || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => Some(GlobalKey::Quit),
            KeyCode::Char('/') => Some(GlobalKey::Search),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_is_hard_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_hard_quit(&key));
    }

    #[test]
    fn test_plain_c_is_not_hard_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!is_hard_quit(&key));
    }

    #[test]
    fn test_global_keys() {
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(GlobalKey::of(&q), Some(GlobalKey::Quit));
        let slash = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert_eq!(GlobalKey::of(&slash), Some(GlobalKey::Search));
        let alt_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);
        assert_eq!(GlobalKey::of(&alt_q), None);
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(GlobalKey::of(&j), None);
    }

    #[test]
    fn test_navigation_request_constructors() {
        let req = NavigationRequest::to(ScreenId::Menu);
        assert_eq!(req.target, ScreenId::Menu);
        assert!(req.payload.is_none());
    }
}
