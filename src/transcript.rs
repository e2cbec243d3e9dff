// src/transcript.rs

use crate::constants::TYPING_CURSOR;
use crate::models::{Message, Sender};
use crate::session::{ChatEvent, ExchangeToken};

/// Ordered, append-only list of displayed messages.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RevealPhase {
    /// Words shown so far.
    Typing(String),
    /// Full text with the typing cursor still visible.
    Cursor,
}

#[derive(Debug, Clone)]
struct ActiveReveal {
    token: ExchangeToken,
    index: usize,
    phase: RevealPhase,
}

/// Everything a front end needs to draw the chat, built by folding
/// [`ChatEvent`]s in arrival order.
#[derive(Debug)]
pub struct ChatView {
    transcript: Transcript,
    input: String,
    welcome_visible: bool,
    indicator: Option<ExchangeToken>,
    reveal: Option<ActiveReveal>,
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            welcome_visible: true,
            indicator: None,
            reveal: None,
        }
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::WelcomeDismissed => self.welcome_visible = false,
            ChatEvent::InputCleared => self.input.clear(),
            ChatEvent::UserMessage { message, .. } => {
                // At most one reveal runs at a time: a new exchange settles the old one.
                self.reveal = None;
                self.transcript.push(message);
            }
            ChatEvent::Thinking(token) => self.indicator = Some(token),
            ChatEvent::ThinkingDone(token) => {
                if self.indicator == Some(token) {
                    self.indicator = None;
                }
            }
            ChatEvent::BotMessage {
                token,
                message,
                animated,
            } => {
                let index = self.transcript.push(message);
                self.reveal = animated.then(|| ActiveReveal {
                    token,
                    index,
                    phase: RevealPhase::Typing(String::new()),
                });
            }
            ChatEvent::RevealStep { token, shown } => {
                if let Some(reveal) = self.active_reveal_mut(token) {
                    reveal.phase = RevealPhase::Typing(shown);
                }
            }
            ChatEvent::RevealDone { token } => {
                if let Some(reveal) = self.active_reveal_mut(token) {
                    reveal.phase = RevealPhase::Cursor;
                }
            }
            ChatEvent::CursorHidden { token } => {
                if self.active_reveal_mut(token).is_some() {
                    self.reveal = None;
                }
            }
        }
    }

    fn active_reveal_mut(&mut self, token: ExchangeToken) -> Option<&mut ActiveReveal> {
        self.reveal.as_mut().filter(|r| r.token == token)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }

    pub fn indicator(&self) -> Option<ExchangeToken> {
        self.indicator
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    /// What is currently visible for the message at `index`, cursor included.
    pub fn rendered_text(&self, index: usize) -> Option<String> {
        let message = self.transcript.get(index)?;
        match &self.reveal {
            Some(reveal) if reveal.index == index => match &reveal.phase {
                RevealPhase::Typing(shown) => Some(shown.clone()),
                RevealPhase::Cursor => Some(format!("{}{}", message.text, TYPING_CURSOR)),
            },
            _ => Some(message.text.clone()),
        }
    }

    /// Messages paired with their visible text, in transcript order.
    pub fn rendered(&self) -> Vec<(Sender, String)> {
        (0..self.transcript.len())
            .filter_map(|i| {
                let sender = self.transcript.get(i)?.sender;
                Some((sender, self.rendered_text(i)?))
            })
            .collect()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot(token: ExchangeToken, text: &str, animated: bool) -> ChatEvent {
        ChatEvent::BotMessage {
            token,
            message: Message::bot(text),
            animated,
        }
    }

    fn user(token: ExchangeToken, text: &str) -> ChatEvent {
        ChatEvent::UserMessage {
            token,
            message: Message::user(text),
        }
    }

    #[test]
    fn test_transcript_is_append_only_in_order() {
        let mut view = ChatView::new();
        view.apply(user(1, "q"));
        view.apply(bot(1, "a", false));

        let rendered = view.rendered();
        assert_eq!(
            rendered,
            vec![(Sender::User, "q".to_string()), (Sender::Bot, "a".to_string())]
        );
    }

    #[test]
    fn test_indicator_only_cleared_by_its_own_token() {
        let mut view = ChatView::new();
        view.apply(ChatEvent::Thinking(1));
        view.apply(ChatEvent::Thinking(2));
        view.apply(ChatEvent::ThinkingDone(1));
        assert_eq!(view.indicator(), Some(2));
        view.apply(ChatEvent::ThinkingDone(2));
        assert_eq!(view.indicator(), None);
    }

    #[test]
    fn test_indicator_never_enters_transcript() {
        let mut view = ChatView::new();
        view.apply(ChatEvent::Thinking(1));
        assert!(view.transcript().is_empty());
    }

    #[test]
    fn test_reveal_phases() {
        let mut view = ChatView::new();
        view.apply(bot(1, "one two", true));
        assert_eq!(view.rendered_text(0).as_deref(), Some(""));

        view.apply(ChatEvent::RevealStep {
            token: 1,
            shown: "one".to_string(),
        });
        assert_eq!(view.rendered_text(0).as_deref(), Some("one"));

        view.apply(ChatEvent::RevealDone { token: 1 });
        assert_eq!(view.rendered_text(0).as_deref(), Some("one two|"));

        view.apply(ChatEvent::CursorHidden { token: 1 });
        assert_eq!(view.rendered_text(0).as_deref(), Some("one two"));
        assert!(!view.is_revealing());
    }

    #[test]
    fn test_new_question_settles_running_reveal() {
        let mut view = ChatView::new();
        view.apply(bot(1, "a b c", true));
        view.apply(ChatEvent::RevealStep {
            token: 1,
            shown: "a".to_string(),
        });
        view.apply(user(2, "next"));

        assert_eq!(view.rendered_text(0).as_deref(), Some("a b c"));

        // Late events from the settled reveal are ignored.
        view.apply(ChatEvent::RevealStep {
            token: 1,
            shown: "a b".to_string(),
        });
        view.apply(ChatEvent::RevealDone { token: 1 });
        assert_eq!(view.rendered_text(0).as_deref(), Some("a b c"));
        assert!(!view.is_revealing());
    }

    #[test]
    fn test_welcome_and_input() {
        let mut view = ChatView::new();
        assert!(view.welcome_visible());
        view.push_char('h');
        view.push_char('i');
        view.pop_char();
        assert_eq!(view.input(), "h");

        view.apply(ChatEvent::InputCleared);
        view.apply(ChatEvent::WelcomeDismissed);
        assert_eq!(view.input(), "");
        assert!(!view.welcome_visible());
    }
}
