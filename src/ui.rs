// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::api::{AnswerService, HttpAnswerService};
use crate::app::{App, AppState};
use crate::config::Config;
use crate::constants::TICK_RATE_MS;
use crate::errors::ChatResult;
use crate::key_handlers::handle_key;
use crate::session::{ChatEvent, ChatSession, SessionOptions};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;

/// Runs the full-screen terminal UI until the user quits.
pub async fn run_ui(config: Config) -> ChatResult<()> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let service = HttpAnswerService::new(config.endpoint.clone());
    let session = ChatSession::new(service, SessionOptions::from_config(&config), events_tx);
    let app = App::new(&config, session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, events_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!("terminal UI stopped with an error: {}", e);
    }
    res
}

/// Main loop of the application.
async fn run_app<B: Backend, S: AnswerService + 'static>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
    mut chat_events: mpsc::UnboundedReceiver<ChatEvent>,
) -> ChatResult<()> {
    let (input_tx, mut input_rx) = mpsc::channel::<CEvent>(100);

    // Crossterm's poll blocks, so it gets a thread of its own.
    tokio::task::spawn_blocking(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if input_tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                Err(_) => return,
            },
            Ok(false) => {
                if input_tx.is_closed() {
                    return;
                }
            }
            Err(_) => return,
        }
    });

    let mut tick = tokio::time::interval(Duration::from_millis(TICK_RATE_MS));
    info!("terminal UI started");

    loop {
        terminal.draw(|f| draw(f, &app))?;

        tokio::select! {
            Some(event) = input_rx.recv() => {
                if let CEvent::Key(key) = event {
                    handle_key(key, &mut app);
                }
            }
            Some(event) = chat_events.recv() => {
                app.apply(event);
            }
            _ = tick.tick() => {
                if app.status_indicator.is_thinking() {
                    app.status_indicator.update_spinner();
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    info!("terminal UI closed");
    Ok(())
}

/// Renders the UI components.
pub fn draw<S: AnswerService + 'static>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Welcome panel or transcript
            Constraint::Length(1), // Thinking indicator
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::draw_header(f, chunks[0], app.strings.title);

    if app.view.welcome_visible() {
        app.splash_screen.draw(
            f,
            chunks[1],
            app.strings.welcome_title,
            app.strings.welcome_body,
        );
    } else {
        chat::draw_transcript(f, chunks[1], &app.view, app.strings, app.scroll_back);
    }

    app.status_indicator.render(f, chunks[2]);
    chat::draw_input(f, chunks[3], app.view.input());

    let footer_state = match app.state {
        AppState::QuitConfirm => app.home_state(),
        state => state,
    };
    footer::draw_footer(f, chunks[4], footer_state, app.strings);

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, f.area(), app.strings);
    }
}
