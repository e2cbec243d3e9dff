use crate::api::AnswerService;
use crate::config::Config;
use crate::constants::SCROLL_STEP;
use crate::locale::Strings;
use crate::session::{ChatEvent, ChatSession};
use crate::splash_screen::SplashScreen;
use crate::status_indicator::StatusIndicator;
use crate::transcript::ChatView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Chat,
    QuitConfirm,
    Quit,
}

pub struct App<S> {
    pub state: AppState,
    pub view: ChatView,
    pub session: ChatSession<S>,
    pub splash_screen: SplashScreen,
    pub status_indicator: StatusIndicator,
    pub strings: &'static Strings,
    /// Lines scrolled back from the bottom of the transcript.
    pub scroll_back: u16,
}

impl<S: AnswerService + 'static> App<S> {
    pub fn new(config: &Config, session: ChatSession<S>) -> App<S> {
        let strings = config.locale.strings();
        App {
            state: AppState::Welcome,
            view: ChatView::new(),
            session,
            splash_screen: SplashScreen::new(config.suggestions()),
            status_indicator: StatusIndicator::new(strings.thinking),
            strings,
            scroll_back: 0,
        }
    }

    /// Folds one controller event into the view.
    pub fn apply(&mut self, event: ChatEvent) {
        let new_message = matches!(
            event,
            ChatEvent::UserMessage { .. } | ChatEvent::BotMessage { .. }
        );

        self.view.apply(event);
        self.status_indicator
            .set_thinking(self.view.indicator().is_some());

        if new_message {
            self.scroll_back = 0;
        }
        if !self.view.welcome_visible() && self.state == AppState::Welcome {
            self.state = AppState::Chat;
        }
    }

    /// Submits the input line. The session ignores blank input.
    pub fn submit_input(&mut self) {
        let text = self.view.take_input();
        // Exchanges run detached; their effects arrive as events.
        let _ = self.session.submit(&text);
    }

    /// Pre-fills the input with `question` and submits it at once.
    pub fn ask_suggestion(&mut self, question: String) {
        self.view.set_input(question);
        self.submit_input();
    }

    /// The screen to return to when a quit is cancelled.
    pub fn home_state(&self) -> AppState {
        if self.view.welcome_visible() {
            AppState::Welcome
        } else {
            AppState::Chat
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP);
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}
