//! Rendering through ratatui's `TestBackend`

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libtermfolio::mock::sample_repositories;
use ratatui::{backend::TestBackend, Terminal};
use termfolio::app::{AsyncResult, Event, NavigationRequest, ScreenId};
use termfolio::screens::menu::MENU_ITEMS;
use termfolio::screens::{MatrixScreen, ProjectsScreen, SkillsScreen};
use termfolio::ui::theme::ThemeId;
use termfolio::{Dispatcher, ScreenSettings};

fn settings() -> ScreenSettings {
    ScreenSettings {
        intro_banner: Vec::new(),
        matrix_seed: Some(11),
        ..ScreenSettings::default()
    }
}

fn draw(dispatcher: &Dispatcher, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| dispatcher.render(frame)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn navigate(d: &mut Dispatcher, target: ScreenId) {
    d.dispatch(Event::Navigate(NavigationRequest::to(target)));
}

#[test]
fn test_loading_placeholder_before_first_resize() {
    let mut d = Dispatcher::new(ThemeId::Default, settings());
    d.start();
    assert!(draw(&d, 40, 10).contains("Loading..."));
}

#[test]
fn test_intro_shows_greeting_after_skip() {
    let mut d = Dispatcher::new(ThemeId::Default, settings());
    d.start();
    d.dispatch(Event::Resize(80, 24));
    d.dispatch(Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));

    let screen = draw(&d, 80, 24);
    assert!(screen.contains("Janpol Hidalgo"));
}

#[test]
fn test_menu_lists_every_destination() {
    let mut d = Dispatcher::new(ThemeId::Default, settings());
    d.dispatch(Event::Resize(100, 40));
    navigate(&mut d, ScreenId::Menu);

    let screen = draw(&d, 100, 40);
    for item in MENU_ITEMS.iter() {
        assert!(screen.contains(item.title), "menu is missing {}", item.title);
    }
}

#[test]
fn test_projects_summary_line() {
    let mut d = Dispatcher::new(ThemeId::Default, settings());
    d.dispatch(Event::Resize(100, 30));
    navigate(&mut d, ScreenId::Projects);
    d.dispatch(Event::Completed {
        origin: ScreenId::Projects,
        result: AsyncResult::Repositories(Ok(sample_repositories(20))),
    });

    let screen = draw(&d, 100, 30);
    assert!(screen.contains("Showing 1-7 of 20"));
    assert!(screen.contains("repo-00"));
}

#[test]
fn test_projects_empty_state() {
    let mut d = Dispatcher::new(ThemeId::Default, settings());
    d.dispatch(Event::Resize(100, 30));
    navigate(&mut d, ScreenId::Projects);
    d.dispatch(Event::Completed {
        origin: ScreenId::Projects,
        result: AsyncResult::Repositories(Ok(Vec::new())),
    });

    assert!(draw(&d, 100, 30).contains("No repositories found"));
}

#[test]
fn test_resize_reaches_inactive_screens() {
    let mut d = Dispatcher::new(ThemeId::Default, settings());
    d.dispatch(Event::Resize(80, 24));
    for id in [ScreenId::Projects, ScreenId::Skills, ScreenId::Matrix, ScreenId::Menu] {
        navigate(&mut d, id);
    }

    d.dispatch(Event::Resize(120, 40));

    assert_eq!((d.state().width, d.state().height), (120, 40));
    assert_eq!(d.screen_as::<ProjectsScreen>(ScreenId::Projects).unwrap().width(), 120);
    assert_eq!(d.screen_as::<SkillsScreen>(ScreenId::Skills).unwrap().width(), 120);
    assert_eq!(d.screen_as::<MatrixScreen>(ScreenId::Matrix).unwrap().width(), 120);
    assert_eq!(d.screen_as::<MatrixScreen>(ScreenId::Matrix).unwrap().columns().len(), 120);

    // and the active screen draws at the new size without trouble
    let screen = draw(&d, 120, 40);
    assert!(screen.contains("Battle Records"));
}

#[test]
fn test_every_screen_renders_at_minimum_size() {
    for id in ScreenId::ALL {
        let mut d = Dispatcher::new(ThemeId::Hacker, settings());
        d.dispatch(Event::Resize(20, 6));
        navigate(&mut d, id);
        draw(&d, 20, 6);
    }
}
