// src/session.rs

use crate::api::AnswerService;
use crate::config::Config;
use crate::models::Message;
use crate::reveal::{paced, WordReveal};
use futures::StreamExt;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Sequence number of a submission within one session.
pub type ExchangeToken = u64;

/// Everything the controller wants shown. Front ends fold these into their
/// view; the controller never holds on to rendered messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    WelcomeDismissed,
    InputCleared,
    UserMessage { token: ExchangeToken, message: Message },
    Thinking(ExchangeToken),
    ThinkingDone(ExchangeToken),
    BotMessage {
        token: ExchangeToken,
        message: Message,
        animated: bool,
    },
    RevealStep { token: ExchangeToken, shown: String },
    RevealDone { token: ExchangeToken },
    CursorHidden { token: ExchangeToken },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Answered,
    Fallback,
    Superseded,
}

/// One-shot welcome flag, owned per session.
#[derive(Debug)]
pub struct SessionState {
    welcome_pending: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            welcome_pending: true,
        }
    }

    pub fn welcome_pending(&self) -> bool {
        self.welcome_pending
    }

    /// True exactly once: on the first call.
    fn take_first_submission(&mut self) -> bool {
        std::mem::replace(&mut self.welcome_pending, false)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub animate: bool,
    pub word_delay: Duration,
    pub cursor_linger: Duration,
    pub show_indicator: bool,
    pub fallback: String,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            animate: config.animate_replies,
            word_delay: Duration::from_millis(config.word_delay_ms),
            cursor_linger: Duration::from_millis(config.cursor_linger_ms),
            show_indicator: config.show_thinking_indicator,
            fallback: config.locale.strings().fallback.to_string(),
        }
    }
}

/// The chat session controller.
pub struct ChatSession<S> {
    service: Arc<S>,
    state: SessionState,
    latest: watch::Sender<ExchangeToken>,
    options: Arc<SessionOptions>,
    events: UnboundedSender<ChatEvent>,
}

impl<S> ChatSession<S>
where
    S: AnswerService + 'static,
{
    pub fn new(service: S, options: SessionOptions, events: UnboundedSender<ChatEvent>) -> Self {
        Self {
            service: Arc::new(service),
            state: SessionState::new(),
            latest: watch::Sender::new(0),
            options: Arc::new(options),
            events,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Submits a question. Blank input is ignored and returns `None`.
    ///
    /// The welcome transition, the user message, the input clear and the
    /// indicator are all emitted before this returns; the request itself
    /// runs on the spawned task.
    pub fn submit(&mut self, text: &str) -> Option<JoinHandle<ExchangeOutcome>> {
        let question = text.trim();
        if question.is_empty() {
            return None;
        }

        if self.state.take_first_submission() {
            self.emit(ChatEvent::WelcomeDismissed);
        }

        // Issuing a new token supersedes every exchange still in flight.
        let token = *self.latest.borrow() + 1;
        self.latest.send_replace(token);
        info!("exchange {} submitted ({} chars)", token, question.chars().count());

        self.emit(ChatEvent::UserMessage {
            token,
            message: Message::user(question),
        });
        self.emit(ChatEvent::InputCleared);
        if self.options.show_indicator {
            self.emit(ChatEvent::Thinking(token));
        }

        let exchange = Exchange {
            token,
            question: question.to_string(),
            service: Arc::clone(&self.service),
            latest: self.latest.subscribe(),
            options: Arc::clone(&self.options),
            events: self.events.clone(),
        };
        Some(tokio::spawn(exchange.run()))
    }

    fn emit(&self, event: ChatEvent) {
        // The receiver is gone only once the front end has shut down.
        let _ = self.events.send(event);
    }
}

struct Exchange<S> {
    token: ExchangeToken,
    question: String,
    service: Arc<S>,
    latest: watch::Receiver<ExchangeToken>,
    options: Arc<SessionOptions>,
    events: UnboundedSender<ChatEvent>,
}

impl<S: AnswerService> Exchange<S> {
    async fn run(mut self) -> ExchangeOutcome {
        let result = self.service.ask(&self.question).await;

        if self.options.show_indicator {
            self.emit(ChatEvent::ThinkingDone(self.token));
        }

        if !self.is_current() {
            debug!("exchange {} superseded, discarding its result", self.token);
            return ExchangeOutcome::Superseded;
        }

        let (text, outcome) = match result {
            Ok(answer) => {
                debug!(
                    "exchange {} answered (context_count={:?}, cache_hit={})",
                    self.token, answer.context_count, answer.cache_hit
                );
                (answer.text, ExchangeOutcome::Answered)
            }
            Err(e) => {
                warn!("exchange {} failed ({:?}): {}", self.token, e.kind(), e);
                (self.options.fallback.clone(), ExchangeOutcome::Fallback)
            }
        };

        let animated = self.options.animate;
        self.emit(ChatEvent::BotMessage {
            token: self.token,
            message: Message::bot(text.clone()),
            animated,
        });

        if animated {
            self.reveal(text).await;
        }

        outcome
    }

    async fn reveal(&mut self, text: String) {
        let mut steps = Box::pin(paced(WordReveal::new(text), self.options.word_delay));

        loop {
            let step = tokio::select! {
                step = steps.next() => step,
                // Fires on a newer submission, or when the session is dropped.
                _ = self.latest.changed() => {
                    debug!("exchange {} reveal cut short", self.token);
                    None
                }
            };
            match step {
                Some(shown) => self.emit(ChatEvent::RevealStep {
                    token: self.token,
                    shown,
                }),
                None => break,
            }
        }

        self.emit(ChatEvent::RevealDone { token: self.token });
        if !self.options.cursor_linger.is_zero() {
            tokio::time::sleep(self.options.cursor_linger).await;
        }
        self.emit(ChatEvent::CursorHidden { token: self.token });
    }

    fn is_current(&self) -> bool {
        *self.latest.borrow() == self.token
    }

    fn emit(&self, event: ChatEvent) {
        let _ = self.events.send(event);
    }
}
