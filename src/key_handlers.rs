use crate::api::AnswerService;
use crate::app::{App, AppState};
use crate::splash_screen::SplashScreenAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key<S: AnswerService + 'static>(key: KeyEvent, app: &mut App<S>) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.state {
        AppState::QuitConfirm => handle_quit_confirm_input(key, app),
        AppState::Welcome => {
            if let Some(SplashScreenAction::Ask(question)) = app
                .splash_screen
                .handle_input(key, app.view.input().is_empty())
            {
                app.ask_suggestion(question);
                return;
            }
            handle_chat_input(key, app);
        }
        AppState::Chat => handle_chat_input(key, app),
        AppState::Quit => {}
    }
}

pub fn handle_chat_input<S: AnswerService + 'static>(key: KeyEvent, app: &mut App<S>) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => app.submit_input(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Up if app.state == AppState::Chat => app.scroll_up(),
        KeyCode::Down if app.state == AppState::Chat => app.scroll_down(),
        KeyCode::Backspace => app.view.pop_char(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.view.push_char(c);
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input<S: AnswerService + 'static>(key: KeyEvent, app: &mut App<S>) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = app.home_state();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.state = AppState::Quit;
        }
        _ => {}
    }
}
