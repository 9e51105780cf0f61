//! End-to-end runs against a local fixture site served by axum.

use async_trait::async_trait;
use axum::{Router, http::HeaderMap, http::StatusCode, response::Html, routing::get};
use ground_page::crawlers::HttpFetcher;
use ground_page::delay::RecordingDelay;
use ground_page::generation::{APOLOGY, GenerativeBackend};
use ground_page::{AnswerPath, Error, GroundingConfig, Orchestrator, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const HOME: &str = r##"<html><body>
    <nav><a href="#main">Skip</a> <a href="mailto:hello@fixture.test">Email</a></nav>
    <p>Learn about our youth programs <a href="/about">About Us</a></p>
    <p>Support young adults in foster care <a href="/blocked">Transitions</a></p>
    <p>Read our annual report <a href="/report">Report</a></p>
</body></html>"##;

const ABOUT: &str = "<h1>About Us</h1><p>We empower youth through mentoring.</p>";

async fn serve_site() -> String {
    let app = Router::new()
        .route("/", get(|| async { Html(HOME) }))
        .route("/about", get(|| async { Html(ABOUT) }))
        .route(
            "/blocked",
            // Only the last identity in the test config gets through.
            get(|headers: HeaderMap| async move {
                let agent = headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                if agent == "agent-c" {
                    (StatusCode::OK, Html("<p>Transition housing for youth.</p>"))
                } else {
                    (StatusCode::FORBIDDEN, Html("<p>Access denied</p>"))
                }
            }),
        )
        .route("/empty", get(|| async { Html("<html><body></body></html>") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Default)]
struct StubBackend {
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        if self.fail {
            Err(Error::Backend("unavailable".into()))
        } else {
            Ok(format!("generated by {model}"))
        }
    }
}

fn config() -> GroundingConfig {
    GroundingConfig {
        identities: vec!["agent-a".into(), "agent-b".into(), "agent-c".into()],
        primary_model: "primary".into(),
        fallback_model: "fallback".into(),
        request_timeout_secs: Some(5),
        ..GroundingConfig::default()
    }
}

fn orchestrator(backend: Arc<StubBackend>, delay: Arc<RecordingDelay>) -> Orchestrator {
    let config = config();
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    Orchestrator::with_delay(config, Arc::new(fetcher), backend, delay)
}

#[tokio::test]
async fn grounded_answer_from_fixture_site() {
    let base = serve_site().await;
    let backend = Arc::new(StubBackend::default());
    let delay = Arc::new(RecordingDelay::new());
    let orchestrator = orchestrator(backend.clone(), delay.clone());

    let answer = orchestrator
        .answer(&format!("{base}/"), "How does Foster Nation help empower youth?")
        .await;

    assert_eq!(answer.path, AnswerPath::Grounded);
    assert_eq!(answer.text, "generated by primary");

    let calls = backend.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    let (model, prompt) = &calls[0];
    assert_eq!(model, "primary");
    assert!(prompt.contains(
        "Website Content:\nAbout Us\nWe empower youth through mentoring.\nTransition housing for youth.\n\n"
    ));
    assert!(!prompt.contains("annual report"));

    // /blocked needed two pacing pauses before the third identity succeeded.
    assert_eq!(delay.waits(), vec![Duration::from_millis(500); 2]);
}

#[tokio::test]
async fn seed_without_relevant_links_falls_back() {
    let base = serve_site().await;
    let backend = Arc::new(StubBackend::default());
    let orchestrator = orchestrator(backend.clone(), Arc::new(RecordingDelay::new()));

    let answer = orchestrator
        .answer(&format!("{base}/empty"), "How does X help?")
        .await;

    assert_eq!(answer.path, AnswerPath::Fallback);
    assert_eq!(answer.model, "fallback");
    let calls = backend.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "fallback");
}

#[tokio::test]
async fn missing_seed_page_falls_back() {
    let base = serve_site().await;
    let backend = Arc::new(StubBackend::default());
    let orchestrator = orchestrator(backend.clone(), Arc::new(RecordingDelay::new()));

    let answer = orchestrator
        .answer(&format!("{base}/does-not-exist"), "youth")
        .await;
    assert_eq!(answer.path, AnswerPath::Fallback);
}

#[tokio::test]
async fn failing_backend_never_errors() {
    let base = serve_site().await;
    let backend = Arc::new(StubBackend {
        fail: true,
        ..StubBackend::default()
    });
    let delay = Arc::new(RecordingDelay::new());
    let orchestrator = orchestrator(backend.clone(), delay.clone());

    let answer = orchestrator.answer(&format!("{base}/empty"), "help").await;
    assert_eq!(answer.text, APOLOGY);
    assert_eq!(backend.calls.lock().unwrap().len(), 4);
    assert_eq!(delay.waits(), vec![Duration::from_secs(2); 3]);
}
