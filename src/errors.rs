// src/errors.rs

use thiserror::Error;

/// Errors raised anywhere in the chat client.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("no usable answer: {0}")]
    AnswerUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

/// The two ways an exchange can fail, plus everything that is not an exchange failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    AnswerUnavailable,
    Other,
}

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        ChatError::AnswerUnavailable(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Transport(_) | ChatError::HttpStatus { .. } => ErrorKind::Transport,
            ChatError::AnswerUnavailable(_) => ErrorKind::AnswerUnavailable,
            _ => ErrorKind::Other,
        }
    }

    /// HTTP status carried by the error, if a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::HttpStatus { status, .. } => Some(*status),
            ChatError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
