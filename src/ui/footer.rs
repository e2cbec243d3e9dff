use crate::app::AppState;
use crate::locale::Strings;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, state: AppState, strings: &Strings) {
    let instructions = match state {
        AppState::Welcome => strings.welcome_hint,
        AppState::Chat => strings.chat_hint,
        AppState::QuitConfirm | AppState::Quit => "",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
