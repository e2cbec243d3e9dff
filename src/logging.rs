// src/logging.rs

use crate::config::Config;
use crate::constants::{LOG_BASENAME, LOG_FILES_KEPT, LOG_ROTATE_BYTES, REQUEST_SUMMARY_CHARS};
use crate::errors::ChatResult;
use crate::models::ApiCallLog;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use log::info;

/// Starts the file logger. The returned handle must stay alive for the
/// lifetime of the program or buffered lines are lost.
///
/// Logs go to rotated files rather than stderr so the full-screen UI is
/// never drawn over.
pub fn init_logging(config: &Config) -> ChatResult<LoggerHandle> {
    let log_dir = config.log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_FILES_KEPT),
        )
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}

/// Logs an API call on the `api` target.
pub fn log_api_call(log: &ApiCallLog) {
    info!(target: "api", "{}", format_api_call(log));
}

pub fn format_api_call(log: &ApiCallLog) -> String {
    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    )
}

/// Shortens a question for log lines without splitting a character.
pub fn summarize_question(question: &str) -> String {
    let mut chars = question.chars();
    let head: String = chars.by_ref().take(REQUEST_SUMMARY_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
