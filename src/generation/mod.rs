//! Text generation with bounded retries.
//!
//! [`ResilientClient`] wraps a [`GenerativeBackend`] for one model. A failed call is
//! retried after a fixed backoff until the retry budget runs out, at which point the
//! client answers with [`APOLOGY`]. Every path out of [`ResilientClient::generate`]
//! is a string.

pub mod gemini;

use crate::config::GroundingConfig;
use crate::delay::Delay;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use gemini::GeminiBackend;

/// Returned when the backend keeps failing
pub const APOLOGY: &str =
    "I'm sorry, but I'm currently unable to assist you. Please try again later.";

/// A text generation service addressed by model name
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate a completion for `prompt`; errors are `Error::Backend` or transport errors
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

/// Which of the two configured models a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Primary,
    Fallback,
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelRole::Primary => f.write_str("primary"),
            ModelRole::Fallback => f.write_str("fallback"),
        }
    }
}

/// Retry budget and pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &GroundingConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: config.backoff(),
        }
    }
}

/// One generation call in flight; `retries_remaining` counts down on each failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub retries_remaining: u32,
}

/// Generation client for a single model with retry and backoff
#[derive(Clone)]
pub struct ResilientClient {
    backend: Arc<dyn GenerativeBackend>,
    role: ModelRole,
    model: String,
    policy: RetryPolicy,
    delay: Arc<dyn Delay>,
}

impl ResilientClient {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        role: ModelRole,
        model: impl Into<String>,
        policy: RetryPolicy,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            backend,
            role,
            model: model.into(),
            policy,
            delay,
        }
    }

    /// Client for the configured primary model
    pub fn primary(
        backend: Arc<dyn GenerativeBackend>,
        config: &GroundingConfig,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self::new(
            backend,
            ModelRole::Primary,
            config.primary_model.clone(),
            RetryPolicy::from_config(config),
            delay,
        )
    }

    /// Client for the configured fallback model
    pub fn fallback(
        backend: Arc<dyn GenerativeBackend>,
        config: &GroundingConfig,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self::new(
            backend,
            ModelRole::Fallback,
            config.fallback_model.clone(),
            RetryPolicy::from_config(config),
            delay,
        )
    }

    pub fn role(&self) -> ModelRole {
        self.role
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate with the full retry budget of the policy
    pub async fn generate(&self, prompt: &str) -> String {
        self.generate_with_retries(prompt, self.policy.max_retries)
            .await
    }

    /// Generate, retrying at most `retries_remaining` times after the first failure
    pub async fn generate_with_retries(&self, prompt: &str, retries_remaining: u32) -> String {
        let mut request = GenerationRequest {
            prompt: prompt.to_string(),
            model: self.model.clone(),
            retries_remaining,
        };

        loop {
            match self.backend.generate(&request.model, &request.prompt).await {
                Ok(text) => return text,
                Err(e) => {
                    ::log::error!(
                        "Error generating {} response with {}: {}",
                        self.role,
                        request.model,
                        e
                    );
                    if request.retries_remaining == 0 {
                        ::log::error!("Giving up on {} model {}", self.role, request.model);
                        return APOLOGY.to_string();
                    }
                    request.retries_remaining -= 1;
                    ::log::warn!(
                        "Retrying {} generation ({} retries left after this one)",
                        self.role,
                        request.retries_remaining
                    );
                    self.delay.wait(self.policy.backoff).await;
                }
            }
        }
    }
}
