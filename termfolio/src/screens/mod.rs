//! Screens
//!
//! Every navigable mode of the application implements [`Screen`]. A screen
//! owns its state outright and only changes it inside `initialize` and
//! `handle_event`; rendering reads the state and the shared [`AppState`].

pub mod contact;
pub mod experience;
pub mod intro;
pub mod matrix;
pub mod menu;
pub mod project_detail;
pub mod projects;
pub mod skills;
pub mod stats;
pub mod theme_picker;

use std::any::Any;
use std::time::Duration;

use crossterm::event::KeyEvent;
use libtermfolio::Config;
use ratatui::{layout::Rect, Frame};

use crate::app::command::{Command, Update};
use crate::app::event::{Event, NavPayload};
use crate::app::state::{AppState, ScreenId};

pub use contact::ContactScreen;
pub use experience::ExperienceScreen;
pub use intro::IntroScreen;
pub use matrix::MatrixScreen;
pub use menu::MenuScreen;
pub use project_detail::ProjectDetailScreen;
pub use projects::ProjectsScreen;
pub use skills::SkillsScreen;
pub use stats::StatsScreen;
pub use theme_picker::ThemePickerScreen;

/// The three-operation contract every screen fulfils
pub trait Screen: Send {
    fn id(&self) -> ScreenId;

    /// Called on every transition to this screen, never per frame
    fn initialize(&mut self, payload: Option<NavPayload>) -> Vec<Command>;

    /// The only mutation point after construction; unknown events are no-ops
    fn handle_event(&mut self, event: Event) -> Update;

    /// Draw the current state; must not block
    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState);

    /// Keep `key` from the global `q` and `/` shortcuts, e.g. while typing
    fn claims_key(&self, _key: &KeyEvent) -> bool {
        false
    }

    /// Concrete access for tests and diagnostics
    fn as_any(&self) -> &dyn Any;
}

/// Construction-time knobs shared by the screen factory
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSettings {
    pub intro_tick: Duration,
    pub matrix_tick: Duration,
    pub stats_refresh: Duration,

    /// Decorative banner revealed after the intro line; empty skips the reveal
    pub intro_banner: Vec<String>,

    /// Fixed seed for the matrix rain, random when `None`
    pub matrix_seed: Option<u64>,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            intro_tick: Duration::from_millis(35),
            matrix_tick: Duration::from_millis(50),
            stats_refresh: Duration::from_secs(30),
            intro_banner: intro::default_banner(),
            matrix_seed: None,
        }
    }
}

impl ScreenSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            intro_tick: config.timing.intro_tick,
            matrix_tick: config.timing.matrix_tick,
            stats_refresh: config.timing.stats_refresh,
            ..Self::default()
        }
    }
}

/// Construct the screen for `id`
pub fn build(id: ScreenId, settings: &ScreenSettings) -> Box<dyn Screen> {
    match id {
        ScreenId::Intro => Box::new(IntroScreen::new(settings.intro_tick, settings.intro_banner.clone())),
        ScreenId::Menu => Box::new(MenuScreen::new()),
        ScreenId::Projects => Box::new(ProjectsScreen::new()),
        ScreenId::ProjectDetail => Box::new(ProjectDetailScreen::new()),
        ScreenId::Skills => Box::new(SkillsScreen::new()),
        ScreenId::Experience => Box::new(ExperienceScreen::new()),
        ScreenId::Contact => Box::new(ContactScreen::new()),
        ScreenId::ThemePicker => Box::new(ThemePickerScreen::new()),
        ScreenId::Stats => Box::new(StatsScreen::new(settings.stats_refresh)),
        ScreenId::Matrix => Box::new(MatrixScreen::new(settings.matrix_tick, settings.matrix_seed)),
    }
}
