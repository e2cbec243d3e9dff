use crate::constants::{HEAVY_DOWN_AND_LEFT, HEAVY_DOWN_AND_RIGHT, HEAVY_HORIZONTAL};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn header_lines(title: &str, width: u16) -> Vec<Line<'static>> {
    let rule_len = (width as usize).saturating_sub(2);
    let rule: String = std::iter::once(HEAVY_DOWN_AND_RIGHT)
        .chain(std::iter::repeat(HEAVY_HORIZONTAL).take(rule_len))
        .chain(std::iter::once(HEAVY_DOWN_AND_LEFT))
        .collect();

    vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray))),
    ]
}

pub fn draw_header(f: &mut Frame<'_>, area: Rect, title: &str) {
    f.render_widget(Paragraph::new(header_lines(title, area.width)), area);
}
