// src/line_mode.rs

use crate::api::{AnswerService, HttpAnswerService};
use crate::config::Config;
use crate::errors::ChatResult;
use crate::locale::Strings;
use crate::session::{ChatEvent, ChatSession, SessionOptions};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Prints controller events to a plain terminal.
struct LinePrinter<W> {
    out: W,
    strings: &'static Strings,
    spinner: Option<ProgressBar>,
    /// Bytes of the current bot message already printed.
    printed: usize,
}

impl<W: Write> LinePrinter<W> {
    fn new(out: W, strings: &'static Strings) -> Self {
        Self {
            out,
            strings,
            spinner: None,
            printed: 0,
        }
    }

    fn apply(&mut self, event: ChatEvent) -> io::Result<()> {
        match event {
            ChatEvent::Thinking(_) => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.set_message(self.strings.thinking);
                pb.enable_steady_tick(Duration::from_millis(80));
                self.spinner = Some(pb);
            }
            ChatEvent::ThinkingDone(_) => {
                if let Some(pb) = self.spinner.take() {
                    pb.finish_and_clear();
                }
            }
            ChatEvent::BotMessage {
                message, animated, ..
            } => {
                write!(self.out, "{} ", format!("{}:", self.strings.assistant).green().bold())?;
                if animated {
                    self.printed = 0;
                } else {
                    writeln!(self.out, "{}", message.text)?;
                }
            }
            ChatEvent::RevealStep { shown, .. } => {
                // Steps are cumulative; print only what is new.
                if let Some(delta) = shown.get(self.printed..) {
                    write!(self.out, "{}", delta)?;
                    self.printed = shown.len();
                }
            }
            ChatEvent::RevealDone { .. } => {
                writeln!(self.out)?;
                self.printed = 0;
            }
            // The user's own line is already on screen.
            ChatEvent::UserMessage { .. }
            | ChatEvent::WelcomeDismissed
            | ChatEvent::InputCleared
            | ChatEvent::CursorHidden { .. } => {}
        }
        self.out.flush()
    }
}

/// Maps a bare number typed before the first question onto a suggestion.
fn resolve_suggestion(line: &str, suggestions: &[String], welcome_pending: bool) -> String {
    if welcome_pending {
        if let Ok(n) = line.trim().parse::<usize>() {
            if let Some(s) = n.checked_sub(1).and_then(|i| suggestions.get(i)) {
                return s.clone();
            }
        }
    }
    line.to_string()
}

fn print_welcome(strings: &Strings, suggestions: &[String]) {
    println!("{}", strings.title.bold().cyan());
    println!("{}", strings.welcome_title.bold());
    println!("{}\n", strings.welcome_body);
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).yellow(), suggestion);
    }
    println!();
}

/// Runs the plain line-oriented chat until the user quits.
pub async fn run_line_mode(config: Config) -> ChatResult<()> {
    let strings = config.locale.strings();
    let suggestions = config.suggestions();

    let mut options = SessionOptions::from_config(&config);
    options.cursor_linger = Duration::ZERO;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = ChatSession::new(HttpAnswerService::new(config.endpoint.clone()), options, tx);
    let mut printer = LinePrinter::new(io::stdout(), strings);
    let mut editor = DefaultEditor::new()?;

    print_welcome(strings, &suggestions);
    info!("line mode started");

    loop {
        let line = match editor.readline(&format!("{} ", "›".cyan())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }
        let _ = editor.add_history_entry(line.as_str());

        let question = resolve_suggestion(&line, &suggestions, session.state().welcome_pending());
        if let Some(handle) = session.submit(&question) {
            run_exchange(handle, &mut rx, &mut printer).await?;
        }
    }

    info!("line mode closed");
    Ok(())
}

async fn run_exchange<W: Write, T>(
    mut handle: tokio::task::JoinHandle<T>,
    rx: &mut UnboundedReceiver<ChatEvent>,
    printer: &mut LinePrinter<W>,
) -> ChatResult<()> {
    loop {
        tokio::select! {
            Some(event) = rx.recv() => printer.apply(event)?,
            _ = &mut handle => break,
        }
    }
    // Everything the exchange sent is queued by the time it finishes.
    while let Ok(event) = rx.try_recv() {
        printer.apply(event)?;
    }
    Ok(())
}

/// Answers each of `lines` in turn, printing to `out`. Used when questions
/// are piped in rather than typed.
pub async fn run_script<S, W>(
    service: S,
    options: SessionOptions,
    strings: &'static Strings,
    lines: impl IntoIterator<Item = String>,
    out: W,
) -> ChatResult<W>
where
    S: AnswerService + 'static,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = ChatSession::new(service, options, tx);
    let mut printer = LinePrinter::new(out, strings);

    for line in lines {
        if let Some(handle) = session.submit(&line) {
            run_exchange(handle, &mut rx, &mut printer).await?;
        }
    }
    Ok(printer.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChatError;
    use crate::locale::Locale;
    use crate::models::Answer;
    use std::sync::Mutex;

    struct Canned(Mutex<Vec<ChatResult<Answer>>>);

    impl AnswerService for Canned {
        async fn ask(&self, _question: &str) -> ChatResult<Answer> {
            self.0
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ChatError::unavailable("empty")))
        }
    }

    fn answer(text: &str) -> ChatResult<Answer> {
        Ok(Answer {
            text: text.to_string(),
            question: None,
            context_count: None,
            cache_hit: false,
        })
    }

    fn options(animate: bool) -> SessionOptions {
        SessionOptions {
            animate,
            word_delay: Duration::ZERO,
            cursor_linger: Duration::ZERO,
            show_indicator: false,
            fallback: Locale::En.strings().fallback.to_string(),
        }
    }

    #[test]
    fn test_resolve_suggestion() {
        let suggestions = vec!["a?".to_string(), "b?".to_string()];
        assert_eq!(resolve_suggestion("2", &suggestions, true), "b?");
        assert_eq!(resolve_suggestion("2", &suggestions, false), "2");
        assert_eq!(resolve_suggestion("0", &suggestions, true), "0");
        assert_eq!(resolve_suggestion("9", &suggestions, true), "9");
        assert_eq!(resolve_suggestion("hello", &suggestions, true), "hello");
    }

    #[tokio::test]
    async fn test_script_prints_animated_answer_once() {
        colored::control::set_override(false);
        let service = Canned(Mutex::new(vec![answer("one two three")]));
        let out = run_script(
            service,
            options(true),
            Locale::En.strings(),
            vec!["  ".to_string(), "question".to_string()],
            Vec::new(),
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "assistant: one two three\n");
    }

    #[tokio::test]
    async fn test_script_prints_fallback() {
        colored::control::set_override(false);
        let service = Canned(Mutex::new(vec![Err(ChatError::unavailable("nope"))]));
        let out = run_script(
            service,
            options(false),
            Locale::En.strings(),
            vec!["question".to_string()],
            Vec::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("assistant: {}\n", Locale::En.strings().fallback)
        );
    }
}
