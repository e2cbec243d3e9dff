use crate::constants::SPINNER_FRAMES;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// The transient "thinking" line shown under the transcript.
#[derive(Debug)]
pub struct StatusIndicator {
    thinking: bool,
    label: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            thinking: false,
            label: label.into(),
            spinner_idx: 0,
        }
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn line(&self) -> Line<'_> {
        if !self.thinking {
            return Line::from("");
        }

        let frame = SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()];
        Line::from(vec![
            Span::styled(frame, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.label.as_str(), Style::default().fg(Color::DarkGray)),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(self.line()).alignment(Alignment::Left),
            area,
        );
    }
}
