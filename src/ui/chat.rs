use crate::chat_message::ChatMessage;
use crate::locale::Strings;
use crate::models::Sender;
use crate::transcript::ChatView;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// All transcript lines for a given width, messages separated by a blank line.
pub fn transcript_lines(view: &ChatView, strings: &Strings, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (sender, text) in view.rendered() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let label = match sender {
            Sender::User => strings.you,
            Sender::Bot => strings.assistant,
        };
        lines.extend(ChatMessage::new(sender, &text, label).render(width));
    }
    lines
}

/// First visible line when the view is `scroll_back` lines above the bottom.
pub fn scroll_offset(total_lines: usize, height: u16, scroll_back: u16) -> u16 {
    let max_scroll = total_lines.saturating_sub(height as usize);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    max_scroll.saturating_sub(scroll_back)
}

pub fn draw_transcript(
    f: &mut Frame<'_>,
    area: Rect,
    view: &ChatView,
    strings: &Strings,
    scroll_back: u16,
) {
    let lines = transcript_lines(view, strings, area.width);
    let scroll = scroll_offset(lines.len(), area.height, scroll_back);

    let msgs_para = Paragraph::new(lines).block(Block::default());
    f.render_widget(msgs_para.scroll((scroll, 0)), area);
}

pub fn draw_input(f: &mut Frame<'_>, area: Rect, input: &str) {
    let separator = "─".repeat(area.width as usize);
    let separator_style = Style::default().fg(Color::DarkGray);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.clone(), separator_style))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prompt = "→ ";
    let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX);
    let (scroll_offset, cursor_x) = input_cursor(area, prompt_width, input.width());

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::DarkGray)),
        Span::styled(input, Style::default().fg(Color::White)),
    ]);

    f.render_widget(
        Paragraph::new(line).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator, separator_style))),
        Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        },
    );

    f.set_cursor_position((cursor_x, area.y + 1));
}

/// Horizontal scroll of the input line and the cursor column, keeping the
/// end of the input in view. Widths past `u16::MAX` clamp rather than wrap.
pub fn input_cursor(area: Rect, prompt_width: u16, text_width: usize) -> (u16, u16) {
    let text_width = u16::try_from(text_width).unwrap_or(u16::MAX);
    let visible_width = area.width.saturating_sub(prompt_width);
    let scroll_offset = text_width.saturating_sub(visible_width);
    let cursor_x = area
        .x
        .saturating_add(prompt_width)
        .saturating_add(text_width - scroll_offset);
    let last_column = area.x.saturating_add(area.width.saturating_sub(1));
    (scroll_offset, cursor_x.min(last_column))
}
