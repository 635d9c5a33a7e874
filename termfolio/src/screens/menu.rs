//! Main menu with wraparound cursor and title search
//!
//! The search box is opened by the global `/` key, which arrives here as an
//! [`NavPayload::OpenSearch`] navigation.

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tui_textarea::TextArea;

use super::Screen;
use crate::app::command::{Command, Update};
use crate::app::event::{is_press, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui::{self, theme::Palette};

/// One destination on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub badge: &'static str,
    pub target: ScreenId,
}

pub const MENU_ITEMS: [MenuItem; 7] = [
    MenuItem {
        title: "Battle Records",
        description: "Chronicles of completed quests",
        icon: "⚡",
        badge: "GitHub",
        target: ScreenId::Projects,
    },
    MenuItem {
        title: "Abilities",
        description: "Warrior's skills and mastery",
        icon: "✨",
        badge: "Tech Stack",
        target: ScreenId::Skills,
    },
    MenuItem {
        title: "Combat History",
        description: "Journey through battles past",
        icon: "📖",
        badge: "Career",
        target: ScreenId::Experience,
    },
    MenuItem {
        title: "Summon Warrior",
        description: "Reach out to the Dev-Warrior",
        icon: "📜",
        badge: "Social",
        target: ScreenId::Contact,
    },
    MenuItem {
        title: "Warrior Stats",
        description: "Live battle statistics",
        icon: "📊",
        badge: "Analytics",
        target: ScreenId::Stats,
    },
    MenuItem {
        title: "Change Realm",
        description: "Shift between realms",
        icon: "🌙",
        badge: "Customize",
        target: ScreenId::ThemePicker,
    },
    MenuItem {
        title: "Matrix Realm",
        description: "Enter the forbidden realm...",
        icon: "🟢",
        badge: "Secret",
        target: ScreenId::Matrix,
    },
];

/// Index of the first item whose title contains `query`, ignoring case
pub fn find_item(items: &[MenuItem], query: &str) -> Option<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    items
        .iter()
        .position(|item| item.title.to_lowercase().contains(&needle))
}

pub struct MenuScreen {
    items: &'static [MenuItem],
    cursor: usize,
    search: Option<TextArea<'static>>,
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuScreen {
    pub fn new() -> Self {
        Self {
            items: &MENU_ITEMS,
            cursor: 0,
            search: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &MenuItem {
        &self.items[self.cursor]
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Current search text, empty when not searching
    pub fn query(&self) -> String {
        self.search
            .as_ref()
            .map(|s| s.lines().join(""))
            .unwrap_or_default()
    }

    fn move_up(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.items.len() - 1
        } else {
            self.cursor - 1
        };
    }

    fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.items.len();
    }

    fn open_search(&mut self) {
        let mut input = TextArea::default();
        input.set_placeholder_text("Search commands...");
        input.set_cursor_line_style(Style::default());
        self.search = Some(input);
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Update {
        match key.code {
            KeyCode::Esc => self.search = None,
            KeyCode::Enter => {
                if let Some(index) = find_item(self.items, &self.query()) {
                    self.cursor = index;
                }
                self.search = None;
            }
            _ => {
                if let Some(input) = self.search.as_mut() {
                    input.input(key);
                }
            }
        }
        Update::none()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        if self.is_searching() {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Enter | KeyCode::Char(' ') => return Update::navigate(self.selected().target),
            KeyCode::Char('m') => return Update::navigate(ScreenId::Matrix),
            _ => {}
        }
        Update::none()
    }

    fn render_items(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == self.cursor;
                let marker = if selected { "▶ " } else { "  " };
                let title_style = if selected {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.secondary)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(palette.accent)),
                        Span::raw(format!("{} ", item.icon)),
                        Span::styled(item.title, title_style),
                        Span::styled(format!("  [{}]", item.badge), Style::default().fg(palette.accent)),
                    ]),
                    Line::from(Span::styled(
                        format!("     {}", item.description),
                        Style::default().fg(palette.help),
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Choose your path "),
        );
        frame.render_widget(list, area);
    }
}

impl Screen for MenuScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Menu
    }

    fn initialize(&mut self, payload: Option<NavPayload>) -> Vec<Command> {
        if matches!(payload, Some(NavPayload::OpenSearch)) && !self.is_searching() {
            self.open_search();
        }
        Vec::new()
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let [header, body, footer] = ui::frame_layout(area);

        frame.render_widget(ui::header("⚔  Dev-Warrior Portfolio  ⚔", palette), header);

        match &self.search {
            Some(input) => {
                let [search_area, list_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(body);
                let mut input = input.clone();
                input.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.primary))
                        .title(" Search "),
                );
                frame.render_widget(&input, search_area);
                self.render_items(frame, list_area, palette);
            }
            None => self.render_items(frame, body, palette),
        }

        let hints: &[(&str, &str)] = if self.is_searching() {
            &[("enter", "jump"), ("esc", "cancel")]
        } else {
            &[("↑/↓", "move"), ("enter", "select"), ("/", "search"), ("q", "retreat")]
        };
        frame.render_widget(ui::key_hints(hints, palette), footer);
    }

    fn claims_key(&self, _key: &KeyEvent) -> bool {
        self.is_searching()
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

    fn press(menu: &mut MenuScreen, code: KeyCode) -> Update {
        menu.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn target(update: Update) -> Option<ScreenId> {
        match update.request {
            Some(Request::Navigate(req)) => Some(req.target),
            _ => None,
        }
    }

    #[test]
    fn test_down_three_times() {
        let mut menu = MenuScreen::new();
        for _ in 0..3 {
            press(&mut menu, KeyCode::Down);
        }
        assert_eq!(menu.cursor(), 3);
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut menu = MenuScreen::new();
        press(&mut menu, KeyCode::Up);
        assert_eq!(menu.cursor(), MENU_ITEMS.len() - 1);
        press(&mut menu, KeyCode::Char('j'));
        assert_eq!(menu.cursor(), 0);
    }

    #[test]
    fn test_enter_navigates_to_item_target() {
        let mut menu = MenuScreen::new();
        press(&mut menu, KeyCode::Down);
        assert_eq!(target(press(&mut menu, KeyCode::Enter)), Some(ScreenId::Skills));
    }

    #[test]
    fn test_search_moves_cursor_to_first_match() {
        let mut menu = MenuScreen::new();
        menu.initialize(Some(NavPayload::OpenSearch));
        assert!(menu.is_searching());
        for c in "STATS".chars() {
            press(&mut menu, KeyCode::Char(c));
        }
        assert_eq!(menu.query(), "STATS");
        let update = press(&mut menu, KeyCode::Enter);
        assert!(update.is_empty());
        assert!(!menu.is_searching());
        assert_eq!(menu.selected().target, ScreenId::Stats);
    }

    #[test]
    fn test_search_escape_keeps_cursor() {
        let mut menu = MenuScreen::new();
        press(&mut menu, KeyCode::Down);
        menu.initialize(Some(NavPayload::OpenSearch));
        press(&mut menu, KeyCode::Char('m'));
        press(&mut menu, KeyCode::Esc);
        assert!(!menu.is_searching());
        assert_eq!(menu.cursor(), 1);
    }

    #[test]
    fn test_search_without_match_keeps_cursor() {
        let mut menu = MenuScreen::new();
        press(&mut menu, KeyCode::Down);
        menu.initialize(Some(NavPayload::OpenSearch));
        press(&mut menu, KeyCode::Char('z'));
        press(&mut menu, KeyCode::Enter);
        assert_eq!(menu.cursor(), 1);
    }

    #[test]
    fn test_matrix_shortcut() {
        let mut menu = MenuScreen::new();
        assert_eq!(target(press(&mut menu, KeyCode::Char('m'))), Some(ScreenId::Matrix));
    }

    #[test]
    fn test_claims_keys_only_while_searching() {
        let mut menu = MenuScreen::new();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!menu.claims_key(&q));
        menu.initialize(Some(NavPayload::OpenSearch));
        assert!(menu.claims_key(&q));
        press(&mut menu, KeyCode::Char('q'));
        assert_eq!(menu.query(), "q");
    }

    #[test]
    fn test_find_item_is_case_insensitive() {
        assert_eq!(find_item(&MENU_ITEMS, "realm"), Some(5));
        assert_eq!(find_item(&MENU_ITEMS, ""), None);
    }
}
