use crate::{
    errors::{ChatError, ChatResult},
    logging::{log_api_call, summarize_question},
    models::{Answer, ApiCallLog, AskRequest},
};
use chrono::Utc;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Instant;

/// Anything that can answer a question. The session only talks to this trait,
/// so tests can swap the HTTP client for a scripted one.
pub trait AnswerService: Send + Sync {
    fn ask(&self, question: &str) -> impl Future<Output = ChatResult<Answer>> + Send;
}

/// Answers questions by POSTing them to a remote endpoint.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: Client,
    endpoint: String,
}

impl HttpAnswerService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn record(&self, question: &str, status: u16, started: Instant) {
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            request_summary: summarize_question(question),
            response_status: status,
            response_time_ms: started.elapsed().as_millis(),
        });
    }
}

impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str) -> ChatResult<Answer> {
        let started = Instant::now();

        // `json` sets Content-Type: application/json
        let response = match self
            .client
            .post(&self.endpoint)
            .json(&AskRequest { question })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.record(question, 0, started);
                return Err(ChatError::Transport(e));
            }
        };

        let status = response.status();
        self.record(question, status.as_u16(), started);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        debug!("answer service replied: {}", body);
        extract_answer(body)
    }
}

/// Turns a 2xx response body into an answer, or reports why it has none.
///
/// Only `status` and `data.answer` decide the outcome. The other fields are
/// informational and a value of the wrong type is read as absent.
pub fn extract_answer(body: Value) -> ChatResult<Answer> {
    let status = body.get("status").and_then(Value::as_str);
    if status != Some("success") {
        return Err(ChatError::unavailable(format!(
            "status {:?} ({})",
            status.unwrap_or("missing"),
            service_error_detail(&body)
        )));
    }

    let data = body
        .get("data")
        .ok_or_else(|| ChatError::unavailable("response missing data"))?;

    let text = match data.get("answer") {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::String(_)) => return Err(ChatError::unavailable("data.answer is empty")),
        Some(other) => {
            return Err(ChatError::unavailable(format!(
                "data.answer is not a string: {}",
                other
            )))
        }
        None => return Err(ChatError::unavailable("response missing data.answer")),
    };

    Ok(Answer {
        text,
        question: data
            .get("question")
            .and_then(Value::as_str)
            .map(str::to_string),
        context_count: data
            .get("context_count")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok()),
        cache_hit: body
            .get("cache_hit")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// `type: message` from the service's error object, for the log line.
fn service_error_detail(body: &Value) -> String {
    let error = body.get("error");
    let field = |name: &str| error.and_then(|e| e.get(name)).and_then(Value::as_str);
    match (field("type"), field("message")) {
        (Some(kind), Some(message)) => format!("{}: {}", kind, message),
        (None, Some(message)) => message.to_string(),
        (Some(kind), None) => kind.to_string(),
        (None, None) => "no detail".to_string(),
    }
}
