//! Intro: typewriter greeting followed by a banner reveal

use std::any::Any;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;

use super::Screen;
use crate::app::command::{Command, TimerId, Update};
use crate::app::event::{is_press, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};

const GREETING: &str = "Hi! I'm Janpol Hidalgo,";

/// Banner shown under the greeting
pub fn default_banner() -> Vec<String> {
    [
        r"     _                         _ ",
        r"    | | __ _ _ __  _ __   ___ | |",
        r" _  | |/ _` | '_ \| '_ \ / _ \| |",
        r"| |_| | (_| | | | | |_) | (_) | |",
        r" \___/ \__,_|_| |_| .__/ \___/|_|",
        r"                  |_|            ",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    Typing,
    Reveal,
    Done,
}

pub struct IntroScreen {
    graphemes: Vec<String>,
    typed: usize,
    banner: Vec<String>,
    revealed: usize,
    phase: IntroPhase,
    tick: Duration,
}

impl IntroScreen {
    pub fn new(tick: Duration, banner: Vec<String>) -> Self {
        Self::with_text(GREETING, tick, banner)
    }

    pub fn with_text(text: &str, tick: Duration, banner: Vec<String>) -> Self {
        let mut screen = Self {
            graphemes: text.graphemes(true).map(str::to_string).collect(),
            typed: 0,
            banner,
            revealed: 0,
            phase: IntroPhase::Typing,
            tick,
        };
        screen.settle();
        screen
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Done
    }

    /// Greeting typed so far
    pub fn typed_text(&self) -> String {
        self.graphemes[..self.typed].concat()
    }

    /// Number of banner lines on screen
    pub fn revealed_lines(&self) -> usize {
        self.revealed
    }

    /// Move past any phase that has nothing left to show
    fn settle(&mut self) {
        if self.phase == IntroPhase::Typing && self.typed >= self.graphemes.len() {
            self.phase = IntroPhase::Reveal;
        }
        if self.phase == IntroPhase::Reveal && self.revealed >= self.banner.len() {
            self.phase = IntroPhase::Done;
        }
    }

    fn advance(&mut self) {
        match self.phase {
            IntroPhase::Typing => self.typed += 1,
            IntroPhase::Reveal => self.revealed += 1,
            IntroPhase::Done => {}
        }
        self.settle();
    }

    fn skip(&mut self) {
        self.typed = self.graphemes.len();
        self.revealed = self.banner.len();
        self.phase = IntroPhase::Done;
    }
}

impl Screen for IntroScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Intro
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        if self.is_done() {
            return Vec::new();
        }
        vec![Command::StartTimer {
            timer: TimerId::Typewriter,
            period: self.tick,
        }]
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Tick {
                timer: TimerId::Typewriter,
                ..
            } => {
                self.advance();
                if self.is_done() {
                    Update::command(Command::StopTimer(TimerId::Typewriter))
                } else {
                    Update::none()
                }
            }
            Event::Key(key) if is_press(&key) => {
                if self.is_done() {
                    Update::navigate(ScreenId::Menu)
                } else {
                    self.skip();
                    Update::command(Command::StopTimer(TimerId::Typewriter))
                }
            }
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();

        let mut greeting = vec![Span::styled(
            self.typed_text(),
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        )];
        if self.phase == IntroPhase::Typing {
            greeting.push(Span::styled("▌", Style::default().fg(palette.accent)));
        }

        let mut lines = vec![Line::from(greeting), Line::from("")];
        lines.extend(
            self.banner[..self.revealed]
                .iter()
                .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(palette.accent)))),
        );
        if self.is_done() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press any key to continue...",
                Style::default().fg(palette.help).add_modifier(Modifier::ITALIC),
            )));
        }

        let content_height = self.banner.len() as u16 + 4;
        let top = area.height.saturating_sub(content_height) / 2;
        let body = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    }

    /// `/` is just another key here; `q` still quits
    fn claims_key(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('/')
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

    fn tick() -> Event {
        Event::Tick {
            origin: ScreenId::Intro,
            timer: TimerId::Typewriter,
        }
    }

    fn any_key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
    }

    #[test]
    fn test_types_one_grapheme_per_tick() {
        let mut intro = IntroScreen::with_text("héllo", Duration::from_millis(35), vec![]);
        intro.handle_event(tick());
        intro.handle_event(tick());
        assert_eq!(intro.typed_text(), "hé");
        assert_eq!(intro.phase(), IntroPhase::Typing);
    }

    #[test]
    fn test_typing_then_reveal_then_done() {
        let banner = vec!["one".to_string(), "two".to_string()];
        let mut intro = IntroScreen::with_text("ab", Duration::from_millis(35), banner);

        intro.handle_event(tick());
        intro.handle_event(tick());
        assert_eq!(intro.phase(), IntroPhase::Reveal);

        intro.handle_event(tick());
        assert_eq!(intro.revealed_lines(), 1);

        let update = intro.handle_event(tick());
        assert!(intro.is_done());
        assert_eq!(update.commands, vec![Command::StopTimer(TimerId::Typewriter)]);
    }

    #[test]
    fn test_without_banner_goes_straight_to_done() {
        let mut intro = IntroScreen::with_text("a", Duration::from_millis(35), vec![]);
        intro.handle_event(tick());
        assert!(intro.is_done());
    }

    #[test]
    fn test_key_while_typing_skips_to_end() {
        let mut intro = IntroScreen::new(Duration::from_millis(35), default_banner());
        let update = intro.handle_event(any_key());
        assert!(intro.is_done());
        assert_eq!(intro.typed_text(), GREETING);
        assert_eq!(intro.revealed_lines(), default_banner().len());
        assert!(update.request.is_none());
    }

    #[test]
    fn test_key_when_done_goes_to_menu() {
        let mut intro = IntroScreen::new(Duration::from_millis(35), vec![]);
        intro.handle_event(any_key());
        let update = intro.handle_event(any_key());
        match update.request {
            Some(Request::Navigate(req)) => assert_eq!(req.target, ScreenId::Menu),
            other => panic!("Expected navigation to menu, got {:?}", other),
        }
    }

    #[test]
    fn test_slash_is_claimed_but_q_is_not() {
        let intro = IntroScreen::new(Duration::from_millis(35), vec![]);
        assert!(intro.claims_key(&KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE)));
        assert!(!intro.claims_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_initialize_arms_timer_until_done() {
        let mut intro = IntroScreen::new(Duration::from_millis(35), vec![]);
        assert_eq!(intro.initialize(None).len(), 1);
        intro.handle_event(any_key());
        assert!(intro.initialize(None).is_empty());
    }
}
