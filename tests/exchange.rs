use qa_chat::api::HttpAnswerService;
use qa_chat::models::Sender;
use qa_chat::session::{ChatEvent, ChatSession, ExchangeOutcome, SessionOptions};
use qa_chat::transcript::ChatView;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

const FALLBACK: &str = "There was an error connecting to the assistant. Please try again later.";

fn options(animate: bool) -> SessionOptions {
    SessionOptions {
        animate,
        word_delay: Duration::from_millis(1),
        cursor_linger: Duration::from_millis(1),
        show_indicator: true,
        fallback: FALLBACK.to_string(),
    }
}

fn fold(view: &mut ChatView, rx: &mut UnboundedReceiver<ChatEvent>) {
    while let Ok(event) = rx.try_recv() {
        view.apply(event);
    }
}

async fn mock_reply(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/rag"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn session(
    server: &MockServer,
    animate: bool,
) -> (ChatSession<HttpAnswerService>, UnboundedReceiver<ChatEvent>) {
    let (tx, rx) = unbounded_channel();
    let service = HttpAnswerService::new(format!("{}/rag", server.uri()));
    (ChatSession::new(service, options(animate), tx), rx)
}

#[tokio::test]
async fn test_blank_input_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (mut session, mut rx) = session(&server, false);
    let mut view = ChatView::new();

    assert!(session.submit("   ").is_none());
    assert!(session.submit("").is_none());
    fold(&mut view, &mut rx);

    assert!(view.transcript().is_empty());
    assert!(view.welcome_visible());
    server.verify().await;
}

#[tokio::test]
async fn test_success_answer_is_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rag"))
        .and(body_json(json!({"question": "What is X?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"answer": "X"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut session, mut rx) = session(&server, false);
    let mut view = ChatView::new();

    let handle = session.submit(" What is X? ").unwrap();
    fold(&mut view, &mut rx);
    // The user message is in place before the request has gone out.
    assert_eq!(view.transcript().len(), 1);
    assert_eq!(view.transcript().get(0).unwrap().sender, Sender::User);
    assert!(view.indicator().is_some());

    assert_eq!(handle.await.unwrap(), ExchangeOutcome::Answered);
    fold(&mut view, &mut rx);

    let last = view.transcript().last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert_eq!(view.rendered_text(1).as_deref(), Some("X"));
    assert!(view.indicator().is_none());
}

#[tokio::test]
async fn test_animated_answer_ends_fully_revealed() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"answer": "Theo điều 8, bộ luật dân sự"}
        })),
    )
    .await;

    let (mut session, mut rx) = session(&server, true);
    let mut view = ChatView::new();

    session.submit("q").unwrap().await.unwrap();
    fold(&mut view, &mut rx);

    assert_eq!(
        view.rendered_text(1).as_deref(),
        Some("Theo điều 8, bộ luật dân sự")
    );
    assert!(!view.is_revealing());
}

#[tokio::test]
async fn test_missing_answer_renders_fallback() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": {}})),
    )
    .await;

    let (mut session, mut rx) = session(&server, false);
    let mut view = ChatView::new();

    assert_eq!(
        session.submit("q").unwrap().await.unwrap(),
        ExchangeOutcome::Fallback
    );
    fold(&mut view, &mut rx);

    assert_eq!(view.transcript().last().unwrap().text, FALLBACK);
    assert_eq!(view.transcript().len(), 2);
}

#[tokio::test]
async fn test_answer_survives_mistyped_extras() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"answer": "X", "context_count": "5"},
            "cache_hit": 1
        })),
    )
    .await;

    let (mut session, mut rx) = session(&server, false);
    let mut view = ChatView::new();

    assert_eq!(
        session.submit("q").unwrap().await.unwrap(),
        ExchangeOutcome::Answered
    );
    fold(&mut view, &mut rx);

    assert_eq!(view.rendered_text(1).as_deref(), Some("X"));
}

#[tokio::test]
async fn test_http_error_renders_fallback_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rag"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let (mut session, mut rx) = session(&server, false);
    let mut view = ChatView::new();

    session.submit("q").unwrap().await.unwrap();
    fold(&mut view, &mut rx);

    assert_eq!(view.transcript().last().unwrap().text, FALLBACK);
    assert!(view.indicator().is_none());
    server.verify().await;
}

#[tokio::test]
async fn test_session_survives_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"answer": "recovered"}
        })))
        .mount(&server)
        .await;

    let (mut session, mut rx) = session(&server, false);
    let mut view = ChatView::new();

    session.submit("first").unwrap().await.unwrap();
    session.submit("second").unwrap().await.unwrap();
    fold(&mut view, &mut rx);

    let texts: Vec<String> = view.rendered().into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["first", FALLBACK, "second", "recovered"]);
}

#[tokio::test]
async fn test_welcome_transition_happens_once() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"answer": "ok"}
        })),
    )
    .await;

    let (mut session, mut rx) = session(&server, false);
    let mut dismissals = 0;

    for question in ["one", "two"] {
        session.submit(question).unwrap().await.unwrap();
        while let Ok(event) = rx.try_recv() {
            if event == ChatEvent::WelcomeDismissed {
                dismissals += 1;
            }
        }
    }

    assert_eq!(dismissals, 1);
}
