//! Screen-navigation state machine
//!
//! The dispatcher owns [`AppState`] and the screen arena. Each call to
//! [`Dispatcher::dispatch`] processes exactly one event and returns the side
//! effects the runtime must schedule. It performs no I/O itself.
//!
//! Routing, in priority order:
//! 1. Ctrl+C ends the session.
//! 2. A resize updates the stored size and is broadcast to every constructed screen.
//! 3. A navigation request switches the active screen, constructing it on
//!    first use, and calls its `initialize`.
//! 4. A theme change updates the global theme, asks for it to be saved and
//!    returns to the menu.
//! 5. Ticks and async results go to the screen that scheduled them.
//! 6. `q` quits and `/` opens the menu search, unless the active screen
//!    claims the key.
//! 7. Other keys go to the active screen.

use ratatui::{style::Style, widgets::Block, Frame};

use super::command::{Command, Effect, Request, Update};
use super::event::{is_hard_quit, Event, GlobalKey, NavPayload, NavigationRequest};
use super::registry::ScreenRegistry;
use super::state::{AppState, ScreenId};
use crate::screens::{Screen, ScreenSettings};
use crate::ui::{self, theme::ThemeId};

pub struct Dispatcher {
    state: AppState,
    registry: ScreenRegistry,
}

impl Dispatcher {
    /// Create a dispatcher sitting on the intro screen
    pub fn new(theme: ThemeId, settings: ScreenSettings) -> Self {
        let mut registry = ScreenRegistry::new(settings);
        registry.ensure(ScreenId::Intro);
        Self {
            state: AppState::new(theme),
            registry,
        }
    }

    /// Initialize the entry screen; call once before the first event
    pub fn start(&mut self) -> Vec<Effect> {
        let current = self.state.current_screen;
        tracing::info!(screen = %current, theme = %self.state.theme, "session started");
        let commands = self.screen_mut(current).initialize(None);
        tag(current, commands)
    }

    /// Process one event
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Key(key) if is_hard_quit(&key) => {
                tracing::info!("hard quit requested");
                self.state.should_quit = true;
                Vec::new()
            }
            Event::Resize(width, height) => self.resize(width, height),
            Event::Navigate(request) => self.navigate(request),
            Event::ThemeChange(theme) => self.change_theme(theme),
            Event::Tick { origin, timer } => {
                let update = self.screen_mut(origin).handle_event(Event::Tick { origin, timer });
                self.apply(origin, update)
            }
            Event::Completed { origin, result } => {
                let update = self.screen_mut(origin).handle_event(Event::Completed { origin, result });
                self.apply(origin, update)
            }
            Event::Key(key) => {
                let current = self.state.current_screen;
                let update = match GlobalKey::of(&key) {
                    Some(global) if !self.screen_mut(current).claims_key(&key) => global_update(global),
                    _ => self.screen_mut(current).handle_event(Event::Key(key)),
                };
                self.apply(current, update)
            }
        }
    }

    /// Draw the active screen over the whole frame
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if !self.state.has_size() || area.width == 0 || area.height == 0 {
            ui::render_waiting(frame, area);
            return;
        }

        let palette = self.state.palette();
        frame.render_widget(Block::default().style(Style::default().bg(palette.background)), area);

        let current = self.state.current_screen;
        match self.registry.get(current) {
            Some(screen) => screen.render(frame, area, &self.state),
            None => panic!("active screen {} was never constructed", current),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Has `id` been constructed?
    pub fn is_instantiated(&self, id: ScreenId) -> bool {
        self.registry.contains(id)
    }

    /// Ids of all constructed screens
    pub fn instantiated(&self) -> Vec<ScreenId> {
        self.registry.instantiated()
    }

    /// Borrow a constructed screen as its concrete type
    pub fn screen_as<T: 'static>(&self, id: ScreenId) -> Option<&T> {
        self.registry.get(id).and_then(|s| s.as_any().downcast_ref::<T>())
    }

    fn screen_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match self.registry.get_mut(id) {
            Some(screen) => screen,
            None => panic!("event routed to screen {} which was never constructed", id),
        }
    }

    fn resize(&mut self, width: u16, height: u16) -> Vec<Effect> {
        tracing::debug!(width, height, "terminal resized");
        self.state.width = width;
        self.state.height = height;

        let mut effects = Vec::new();
        for id in self.registry.instantiated() {
            let update = self.screen_mut(id).handle_event(Event::Resize(width, height));
            effects.extend(self.apply(id, update));
        }
        effects
    }

    fn navigate(&mut self, request: NavigationRequest) -> Vec<Effect> {
        let NavigationRequest { target, payload } = request;
        let previous = self.state.current_screen;
        self.state.current_screen = target;
        tracing::debug!(from = %previous, to = %target, "navigating");

        let mut effects = Vec::new();
        if self.registry.ensure(target) && self.state.has_size() {
            let (width, height) = (self.state.width, self.state.height);
            let update = self.screen_mut(target).handle_event(Event::Resize(width, height));
            effects.extend(self.apply(target, update));
        }

        let commands = self.screen_mut(target).initialize(payload);
        effects.extend(tag(target, commands));
        effects
    }

    fn change_theme(&mut self, theme: ThemeId) -> Vec<Effect> {
        tracing::info!(theme = %theme, "theme changed");
        self.state.theme = theme;
        let mut effects = vec![Effect::SaveTheme(theme)];
        effects.extend(self.navigate(NavigationRequest::to(ScreenId::Menu)));
        effects
    }

    /// Turn a screen's update into effects, honouring its request if it is still active
    fn apply(&mut self, origin: ScreenId, update: Update) -> Vec<Effect> {
        let Update { commands, request } = update;
        let mut effects = tag(origin, commands);

        let Some(request) = request else {
            return effects;
        };

        if origin != self.state.current_screen {
            tracing::debug!(
                origin = %origin,
                active = %self.state.current_screen,
                ?request,
                "dropping request from inactive screen"
            );
            return effects;
        }

        match request {
            Request::Navigate(nav) => effects.extend(self.navigate(nav)),
            Request::ChangeTheme(theme) => effects.extend(self.change_theme(theme)),
            Request::Quit => {
                tracing::info!(screen = %origin, "quit requested");
                self.state.should_quit = true;
            }
        }
        effects
    }
}

fn global_update(key: GlobalKey) -> Update {
    match key {
        GlobalKey::Quit => Update::quit(),
        GlobalKey::Search => Update::request(Request::Navigate(NavigationRequest::with_payload(
            ScreenId::Menu,
            NavPayload::OpenSearch,
        ))),
    }
}

fn tag(origin: ScreenId, commands: Vec<Command>) -> Vec<Effect> {
    commands
        .into_iter()
        .map(|command| Effect::Run { origin, command })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::TimerId;
    use crate::screens::{MenuScreen, ProjectsScreen};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn dispatcher() -> Dispatcher {
        let mut d = Dispatcher::new(ThemeId::Default, ScreenSettings::default());
        d.start();
        d.dispatch(Event::Resize(80, 24));
        d
    }

    #[test]
    fn test_starts_on_intro_with_only_intro_constructed() {
        let d = Dispatcher::new(ThemeId::Default, ScreenSettings::default());
        assert_eq!(d.state().current_screen, ScreenId::Intro);
        assert_eq!(d.instantiated(), vec![ScreenId::Intro]);
    }

    #[test]
    fn test_start_arms_intro_timer() {
        let mut d = Dispatcher::new(ThemeId::Default, ScreenSettings::default());
        let effects = d.start();
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Run { origin: ScreenId::Intro, command: Command::StartTimer { timer: TimerId::Typewriter, .. } }
        )));
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut d = dispatcher();
        d.dispatch(Event::Navigate(NavigationRequest::to(ScreenId::Skills)));
        d.dispatch(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(d.should_quit());
    }

    #[test]
    fn test_navigation_constructs_lazily() {
        let mut d = dispatcher();
        assert!(!d.is_instantiated(ScreenId::Menu));
        d.dispatch(Event::Navigate(NavigationRequest::to(ScreenId::Menu)));
        assert!(d.is_instantiated(ScreenId::Menu));
        assert_eq!(d.state().current_screen, ScreenId::Menu);
    }

    #[test]
    fn test_navigation_event_not_delivered_as_input() {
        let mut d = dispatcher();
        d.dispatch(Event::Navigate(NavigationRequest::to(ScreenId::Menu)));
        let menu = d.screen_as::<MenuScreen>(ScreenId::Menu).map(|m| m.cursor());
        assert_eq!(menu, Some(0));
    }

    #[test]
    fn test_new_screen_sees_current_size_before_initialize() {
        let mut d = dispatcher();
        d.dispatch(Event::Navigate(NavigationRequest::to(ScreenId::Projects)));
        let projects = d.screen_as::<ProjectsScreen>(ScreenId::Projects);
        assert_eq!(projects.map(|p| p.width()), Some(80));
    }

    #[test]
    fn test_theme_change_saves_and_returns_to_menu() {
        let mut d = dispatcher();
        let effects = d.dispatch(Event::ThemeChange(ThemeId::Dracula));
        assert_eq!(d.state().theme, ThemeId::Dracula);
        assert_eq!(d.state().current_screen, ScreenId::Menu);
        assert!(effects.contains(&Effect::SaveTheme(ThemeId::Dracula)));
    }

    #[test]
    fn test_request_from_inactive_screen_is_dropped() {
        use crate::app::event::AsyncResult;
        use libtermfolio::mock::sample_repositories;

        let mut d = dispatcher();
        d.dispatch(Event::Navigate(NavigationRequest::to(ScreenId::Projects)));
        d.dispatch(Event::Completed {
            origin: ScreenId::Projects,
            result: AsyncResult::Repositories(Ok(sample_repositories(3))),
        });
        d.dispatch(key(KeyCode::Enter));
        d.dispatch(Event::Navigate(NavigationRequest::to(ScreenId::Menu)));

        let repo = sample_repositories(1).remove(0);
        d.dispatch(Event::Completed {
            origin: ScreenId::Projects,
            result: AsyncResult::Readme {
                repo,
                markdown: Ok("# hi".to_string()),
            },
        });
        assert_eq!(d.state().current_screen, ScreenId::Menu);
        assert!(!d.is_instantiated(ScreenId::ProjectDetail));
    }

    #[test]
    #[should_panic(expected = "never constructed")]
    fn test_tick_for_unconstructed_screen_panics() {
        let mut d = dispatcher();
        d.dispatch(Event::Tick {
            origin: ScreenId::Matrix,
            timer: TimerId::Animation,
        });
    }
}
