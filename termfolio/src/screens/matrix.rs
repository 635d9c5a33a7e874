//! Matrix rain screensaver

use std::any::Any;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Request, TimerId, Update};
use crate::app::event::{is_press, Event, NavPayload, NavigationRequest};
use crate::app::state::{AppState, ScreenId};

const GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()-_=+[]{}|;:',.<>?/`~";

/// Extra glyphs generated beyond the screen height so tails never repeat visibly
const GLYPH_SLACK: usize = 20;

const HEAD: Color = Color::White;
const TAIL: Color = Color::Rgb(0x00, 0x33, 0x00);

/// One falling stream of glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub chars: Vec<char>,
    /// Row of the head; negative while still above the screen
    pub y: i32,
    /// Frames per step, 1..=3
    pub speed: u32,
    /// Trail length, 5..=19
    pub length: i32,
}

impl Column {
    fn random(rng: &mut StdRng, height: u16, y: i32) -> Self {
        Self {
            chars: random_glyphs(rng, usize::from(height) + GLYPH_SLACK),
            y,
            speed: rng.gen_range(1..=3),
            length: rng.gen_range(5..=19),
        }
    }

    /// Glyph drawn at `row`, if the trail covers it
    fn glyph_at(&self, row: i32) -> Option<(char, i32)> {
        let distance = self.y - row;
        if distance < 0 || distance >= self.length || self.chars.is_empty() {
            return None;
        }
        let index = (row + distance).rem_euclid(self.chars.len() as i32) as usize;
        Some((self.chars[index], distance))
    }
}

fn random_glyphs(rng: &mut StdRng, count: usize) -> Vec<char> {
    (0..count)
        .map(|_| char::from(GLYPHS[rng.gen_range(0..GLYPHS.len())]))
        .collect()
}

pub struct MatrixScreen {
    columns: Vec<Column>,
    width: u16,
    height: u16,
    frame: u64,
    tick: Duration,
    rng: StdRng,
}

impl MatrixScreen {
    pub fn new(tick: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            columns: Vec::new(),
            width: 0,
            height: 0,
            frame: 0,
            tick,
            rng,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn init_columns(&mut self) {
        let height = i32::from(self.height.max(1));
        self.columns = (0..self.width)
            .map(|_| {
                let y = self.rng.gen_range(0..height) - height;
                Column::random(&mut self.rng, self.height, y)
            })
            .collect();
    }

    fn step(&mut self) {
        self.frame += 1;
        let bottom = i32::from(self.height);
        for i in 0..self.columns.len() {
            if self.frame % u64::from(self.columns[i].speed) != 0 {
                continue;
            }
            self.columns[i].y += 1;
            let col = &self.columns[i];
            if col.y > bottom + col.length {
                let mut fresh = Column::random(&mut self.rng, self.height, 0);
                fresh.y = -fresh.length;
                self.columns[i] = fresh;
            }
        }
    }

    fn color_for(distance: i32, length: i32, primary: Color, secondary: Color) -> Color {
        if distance == 0 {
            HEAD
        } else if distance < length / 3 {
            primary
        } else if distance < length * 2 / 3 {
            secondary
        } else {
            TAIL
        }
    }
}

impl Screen for MatrixScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Matrix
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        vec![Command::StartTimer {
            timer: TimerId::Animation,
            period: self.tick,
        }]
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Resize(width, height) => {
                self.width = width;
                self.height = height;
                self.init_columns();
                Update::none()
            }
            Event::Tick {
                timer: TimerId::Animation,
                ..
            } => {
                self.step();
                Update::none()
            }
            Event::Key(key) if is_press(&key) => {
                let request = if key.code == KeyCode::Char('/') {
                    NavigationRequest::with_payload(ScreenId::Menu, NavPayload::OpenSearch)
                } else {
                    NavigationRequest::to(ScreenId::Menu)
                };
                Update::request(Request::Navigate(request)).with_command(Command::StopTimer(TimerId::Animation))
            }
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let rows = area.height.min(self.height);
        let cols = usize::from(area.width).min(self.columns.len());

        let lines: Vec<Line> = (0..i32::from(rows))
            .map(|row| {
                let spans: Vec<Span> = self.columns[..cols]
                    .iter()
                    .map(|col| match col.glyph_at(row) {
                        Some((glyph, distance)) => Span::styled(
                            glyph.to_string(),
                            Style::default().fg(Self::color_for(
                                distance,
                                col.length,
                                palette.primary,
                                palette.secondary,
                            )),
                        ),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(Color::Black)), area);
    }

    /// Leaving through `/` must still stop the animation
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
    use crossterm::event::KeyModifiers;

    fn tick() -> Event {
        Event::Tick {
            origin: ScreenId::Matrix,
            timer: TimerId::Animation,
        }
    }

    fn sized(width: u16, height: u16) -> MatrixScreen {
        let mut screen = MatrixScreen::new(Duration::from_millis(50), Some(7));
        screen.handle_event(Event::Resize(width, height));
        screen
    }

    #[test]
    fn test_resize_builds_one_column_per_cell() {
        let screen = sized(40, 12);
        assert_eq!(screen.columns().len(), 40);
        for col in screen.columns() {
            assert!((1..=3).contains(&col.speed));
            assert!((5..=19).contains(&col.length));
            assert!(col.y < 0 && col.y >= -12);
            assert_eq!(col.chars.len(), 12 + GLYPH_SLACK);
        }
    }

    #[test]
    fn test_columns_fall_at_their_speed() {
        let mut screen = sized(10, 12);
        let before = screen.columns().to_vec();
        for _ in 0..6 {
            screen.handle_event(tick());
        }
        for (old, new) in before.iter().zip(screen.columns()) {
            assert_eq!(new.y - old.y, 6 / old.speed as i32);
        }
    }

    #[test]
    fn test_column_wraps_after_leaving_screen() {
        let mut screen = sized(5, 4);
        for _ in 0..400 {
            screen.handle_event(tick());
            for col in screen.columns() {
                assert!(col.y <= 4 + col.length);
            }
        }
    }

    #[test]
    fn test_same_seed_same_rain() {
        assert_eq!(sized(8, 8).columns(), sized(8, 8).columns());
    }

    #[test]
    fn test_any_key_exits_to_menu_and_stops_timer() {
        let mut screen = sized(5, 5);
        let update = screen.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)));
        assert_eq!(update.commands, vec![Command::StopTimer(TimerId::Animation)]);
        assert!(matches!(update.request, Some(Request::Navigate(req)) if req.target == ScreenId::Menu));
    }

    #[test]
    fn test_slash_exits_to_menu_search() {
        let mut screen = sized(5, 5);
        let slash = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert!(screen.claims_key(&slash));
        let update = screen.handle_event(Event::Key(slash));
        assert_eq!(update.commands, vec![Command::StopTimer(TimerId::Animation)]);
        assert!(matches!(
            update.request,
            Some(Request::Navigate(NavigationRequest { target: ScreenId::Menu, payload: Some(NavPayload::OpenSearch) }))
        ));
    }

    #[test]
    fn test_glyph_trail() {
        let col = Column {
            chars: vec!['a', 'b', 'c'],
            y: 2,
            speed: 1,
            length: 2,
        };
        assert_eq!(col.glyph_at(2).map(|(_, d)| d), Some(0));
        assert_eq!(col.glyph_at(1).map(|(_, d)| d), Some(1));
        assert!(col.glyph_at(0).is_none());
        assert!(col.glyph_at(3).is_none());
    }
}
