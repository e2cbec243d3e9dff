use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

/// The one-time welcome panel with its suggestion shortcuts.
#[derive(Debug)]
pub struct SplashScreen {
    pub selected_idx: usize,
    pub suggestions: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SplashScreenAction {
    /// Pre-fill and immediately submit this suggestion.
    Ask(String),
}

impl SplashScreen {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self {
            selected_idx: 0,
            suggestions,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, title: &str, body: &str) {
        let vsplit = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Min(self.suggestions.len() as u16),
            ])
            .split(area);

        let title_par = Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title_par, vsplit[1]);

        let body_par = Paragraph::new(body.to_string())
            .alignment(Alignment::Center)
            .block(Block::default())
            .wrap(Wrap { trim: true });
        f.render_widget(body_par, vsplit[2]);

        let menu_lines: Vec<Line> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == self.selected_idx;
                let style = if selected {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(
                    format!("{} {}", if selected { "▶" } else { " " }, item),
                    style,
                ))
            })
            .collect();

        f.render_widget(
            Paragraph::new(menu_lines).alignment(Alignment::Center),
            vsplit[3],
        );
    }

    /// Handles navigation keys. Returns an action when a suggestion is chosen.
    ///
    /// `input_empty` tells whether the user has started typing: Enter only
    /// picks a suggestion while the input line is still empty.
    pub fn handle_input(&mut self, key: KeyEvent, input_empty: bool) -> Option<SplashScreenAction> {
        if self.suggestions.is_empty() {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.selected_idx = (self.selected_idx + 1) % self.suggestions.len();
                None
            }
            (KeyModifiers::NONE, KeyCode::Up) => {
                if self.selected_idx == 0 {
                    self.selected_idx = self.suggestions.len() - 1;
                } else {
                    self.selected_idx -= 1;
                }
                None
            }
            (KeyModifiers::NONE, KeyCode::Enter) if input_empty => self
                .suggestions
                .get(self.selected_idx)
                .cloned()
                .map(SplashScreenAction::Ask),
            _ => None,
        }
    }
}
