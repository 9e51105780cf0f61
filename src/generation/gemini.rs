//! Gemini backend over the Generative Language API (`generateContent`).

use crate::error::{Error, Result};
use crate::generation::GenerativeBackend;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
struct ReqPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ReqContent<'a> {
    parts: Vec<ReqPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiReq<'a> {
    contents: Vec<ReqContent<'a>>,
}

/// Calls `models/{model}:generateContent` with an API key
#[derive(Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config("Gemini API key is empty".into()));
        }
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            api_key,
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the backend at another API host (a proxy, or a local fixture)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

impl fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Concatenates `candidates[0].content.parts[*].text`
fn response_text(body: &serde_json::Value) -> Result<String> {
    let candidate = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| {
            let reason = body
                .pointer("/promptFeedback/blockReason")
                .and_then(|r| r.as_str())
                .unwrap_or("no candidates");
            Error::Backend(format!("empty response: {reason}"))
        })?;

    let text = candidate
        .pointer("/content/parts")
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let req = GeminiReq {
            contents: vec![ReqContent {
                parts: vec![ReqPart { text: prompt }],
            }],
        };

        ::log::debug!("Requesting {} ({} prompt chars)", model, prompt.len());
        let resp = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            let detail: String = detail.chars().take(300).collect();
            return Err(Error::Backend(format!("{model} returned {status}: {detail}")));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Backend(format!("bad JSON from {model}: {e}")))?;
        response_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}}]
        });
        assert_eq!(response_text(&body).unwrap(), "Hello, world");
    }

    #[test]
    fn test_blocked_prompt_is_backend_error() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = response_text(&body).unwrap_err();
        assert!(matches!(err, Error::Backend(msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(GeminiBackend::new("  "), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_generate_against_fixture() {
        let app = Router::new().route(
            "/v1beta/models/:call",
            post(
                |axum::extract::Path(call): axum::extract::Path<String>,
                 headers: HeaderMap,
                 Json(req): Json<serde_json::Value>| async move {
                    let key = headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("");
                    let prompt = req
                        .pointer("/contents/0/parts/0/text")
                        .and_then(|t| t.as_str())
                        .unwrap_or("");
                    Json(json!({
                        "candidates": [{"content": {"parts": [
                            {"text": format!("{call}|{key}|{prompt}")}
                        ]}}]
                    }))
                },
            ),
        );
        let base = serve(app).await;

        let backend = GeminiBackend::new("secret").unwrap().with_base_url(base + "/");
        let text = backend.generate("test-model", "hi there").await.unwrap();
        assert_eq!(text, "test-model:generateContent|secret|hi there");
    }

    #[tokio::test]
    async fn test_non_success_status_is_backend_error() {
        let app = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exhausted") }),
        );
        let base = serve(app).await;

        let backend = GeminiBackend::new("secret").unwrap().with_base_url(base);
        let err = backend.generate("m", "p").await.unwrap_err();
        assert!(matches!(err, Error::Backend(msg) if msg.contains("429")));
    }
}
