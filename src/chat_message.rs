use crate::models::Sender;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Renders one transcript entry as boxed, word-wrapped lines.
#[derive(Debug, Clone)]
pub struct ChatMessage<'a> {
    sender: Sender,
    text: &'a str,
    label: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn new(sender: Sender, text: &'a str, label: &'a str) -> Self {
        Self {
            sender,
            text,
            label,
        }
    }

    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, width, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn base_style(&self) -> Style {
        Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128), // Warmer yellow
            Sender::Bot => Color::Rgb(144, 238, 144),  // Softer green
        })
    }

    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─ ".to_string(), style),
            Span::styled(self.label.to_string(), style.add_modifier(Modifier::BOLD)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, width: u16, style: Style) {
        let indent = self.indent();
        let wrap_width = (width as usize)
            .saturating_sub(indent.len() + 2)
            .max(1);

        for paragraph in self.text.split('\n') {
            // `wrap` drops empty input entirely; keep blank lines visible.
            if paragraph.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│ ".to_string(), style),
                ]));
                continue;
            }

            for wrapped_line in wrap(paragraph, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped_line.to_string(), style),
                ]));
            }
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}
