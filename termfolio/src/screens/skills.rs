//! Skills by category with derived statistics

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use libtermfolio::portfolio::{skills_in, Skill, SkillCategory};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use super::Screen;
use crate::app::command::{Command, Update};
use crate::app::event::{is_press, Event, NavPayload};
use crate::app::state::{AppState, ScreenId};
use crate::ui;

/// Aggregates over one category, always recomputed from the skill table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillStats {
    pub count: usize,
    pub average_level: f64,
    pub total_projects: u32,
    pub max_years: u8,
}

impl SkillStats {
    pub fn of(skills: &[&Skill]) -> Self {
        let count = skills.len();
        let level_sum: u32 = skills.iter().map(|s| u32::from(s.level)).sum();
        Self {
            count,
            average_level: if count == 0 {
                0.0
            } else {
                f64::from(level_sum) / count as f64
            },
            total_projects: skills.iter().map(|s| s.projects).sum(),
            max_years: skills.iter().map(|s| s.years).max().unwrap_or(0),
        }
    }

    /// Average level with one decimal, as displayed
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_level)
    }
}

pub struct SkillsScreen {
    category: SkillCategory,
    cursor: usize,
    width: u16,
}

impl Default for SkillsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillsScreen {
    pub fn new() -> Self {
        Self {
            category: SkillCategory::ALL[0],
            cursor: 0,
            width: 0,
        }
    }

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Skills of the selected category
    pub fn visible_skills(&self) -> Vec<&'static Skill> {
        skills_in(self.category).collect()
    }

    pub fn stats(&self) -> SkillStats {
        SkillStats::of(&self.visible_skills())
    }

    fn select(&mut self, category: SkillCategory) {
        self.category = category;
        self.cursor = 0;
    }

    fn handle_key(&mut self, key: KeyEvent) -> Update {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.select(self.category.previous()),
            KeyCode::Right | KeyCode::Char('l') => self.select(self.category.next()),
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                self.select(SkillCategory::ALL[index]);
            }
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_skills().len();
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => return Update::navigate(ScreenId::Menu),
            _ => {}
        }
        Update::none()
    }
}

fn level_bar(level: u8) -> String {
    let filled = usize::from(level.min(5));
    format!("{}{}", "█".repeat(filled), "░".repeat(5 - filled))
}

impl Screen for SkillsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Skills
    }

    fn initialize(&mut self, _payload: Option<NavPayload>) -> Vec<Command> {
        Vec::new()
    }

    fn handle_event(&mut self, event: Event) -> Update {
        match event {
            Event::Resize(width, _) => {
                self.width = width;
                Update::none()
            }
            Event::Key(key) if is_press(&key) => self.handle_key(key),
            _ => Update::none(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let palette = app.palette();
        let [header, body, footer] = ui::frame_layout(area);
        frame.render_widget(ui::header("SKILLS & EXPERTISE", palette), header);

        let [tabs_area, info_area, stats_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(body);

        let titles = SkillCategory::ALL
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} {} {}", i + 1, c.icon(), c.display_name()));
        let tabs = Tabs::new(titles)
            .select(self.category.index())
            .style(Style::default().fg(palette.help))
            .highlight_style(Style::default().fg(palette.primary).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, tabs_area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "{} {} - {}",
                    self.category.icon(),
                    self.category.display_name(),
                    self.category.description()
                ),
                Style::default().fg(palette.secondary).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
            info_area,
        );

        let stats = self.stats();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("Skills: {}", stats.count), Style::default().fg(palette.accent)),
                Span::raw("  •  "),
                Span::styled(
                    format!("Avg Level: {}", stats.average_display()),
                    Style::default().fg(palette.accent),
                ),
                Span::raw("  •  "),
                Span::styled(
                    format!("Projects: {}", stats.total_projects),
                    Style::default().fg(palette.accent),
                ),
                Span::raw("  •  "),
                Span::styled(
                    format!("Max Years: {}", stats.max_years),
                    Style::default().fg(palette.accent),
                ),
            ]))
            .alignment(Alignment::Center),
            stats_area,
        );

        let items: Vec<ListItem> = self
            .visible_skills()
            .into_iter()
            .enumerate()
            .map(|(i, skill)| {
                let color = skill.color.parse::<Color>().unwrap_or(palette.primary);
                let selected = i == self.cursor;
                let name_style = if selected {
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.secondary)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "▶ " } else { "  " }, Style::default().fg(palette.accent)),
                    Span::raw(format!("{} ", skill.icon)),
                    Span::styled(format!("{:<14}", skill.name), name_style),
                    Span::styled(level_bar(skill.level), Style::default().fg(color)),
                    Span::styled(
                        format!("  {}y • {} projects", skill.years, skill.projects),
                        Style::default().fg(palette.help),
                    ),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(palette.accent)),
            ),
            list_area,
        );

        frame.render_widget(
            ui::key_hints(
                &[("←→/h/l", "switch category"), ("1-6", "quick select"), ("b/esc", "back"), ("q", "quit")],
                palette,
            ),
            footer,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
