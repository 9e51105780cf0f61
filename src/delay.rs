use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Suspends the caller for a pacing or backoff interval.
///
/// Injected so tests can replace real sleeping with a recorder.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records every requested wait and returns immediately
#[derive(Debug, Default)]
pub struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far, in order
    pub fn waits(&self) -> Vec<Duration> {
        self.waits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(duration);
    }
}
