//! Dispatcher-owned application state

use std::fmt;

use crate::ui::theme::{Palette, ThemeId};

/// Identifier of one navigable screen
///
/// Doubles as the key of the screen registry and as the routing tag on
/// timer ticks and background results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenId {
    Intro,
    Menu,
    Projects,
    ProjectDetail,
    Skills,
    Experience,
    Contact,
    ThemePicker,
    Stats,
    Matrix,
}

impl ScreenId {
    pub const ALL: [ScreenId; 10] = [
        ScreenId::Intro,
        ScreenId::Menu,
        ScreenId::Projects,
        ScreenId::ProjectDetail,
        ScreenId::Skills,
        ScreenId::Experience,
        ScreenId::Contact,
        ScreenId::ThemePicker,
        ScreenId::Stats,
        ScreenId::Matrix,
    ];
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenId::Intro => "Intro",
            ScreenId::Menu => "Menu",
            ScreenId::Projects => "Projects",
            ScreenId::ProjectDetail => "Project Detail",
            ScreenId::Skills => "Skills",
            ScreenId::Experience => "Experience",
            ScreenId::Contact => "Contact",
            ScreenId::ThemePicker => "Theme",
            ScreenId::Stats => "Stats",
            ScreenId::Matrix => "Matrix",
        };
        f.write_str(name)
    }
}

/// Global state every screen may read while rendering
///
/// Only the dispatcher mutates it, and only while processing an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Screen receiving input and drawn each frame
    pub current_screen: ScreenId,

    /// Terminal width in cells, 0 until the first resize
    pub width: u16,

    /// Terminal height in cells, 0 until the first resize
    pub height: u16,

    /// Active color scheme
    pub theme: ThemeId,

    /// Should the session end?
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_screen: ScreenId::Intro,
            width: 0,
            height: 0,
            theme: ThemeId::Default,
            should_quit: false,
        }
    }
}

impl AppState {
    /// Create new application state with the given theme
    pub fn new(theme: ThemeId) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// Has the terminal reported its size yet?
    pub fn has_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
