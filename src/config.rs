use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for the grounding pipeline and the generation clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConfig {
    /// User-agent strings tried in order when fetching a page
    #[serde(default = "default_identities")]
    pub identities: Vec<String>,

    /// Maximum number of relevant links fetched for grounding
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Pause between two identities for the same page, in milliseconds
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Number of retries after a failed generation call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause between two generation attempts, in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Model used when grounding content was found
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model used when no grounding content is available
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Name of the site shown in the grounded prompt (defaults to the seed host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Transport timeout for page fetches; none unless set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Default identity rotation: desktop Firefox, Chrome and Edge
fn default_identities() -> Vec<String> {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:104.0) Gecko/20100101 Firefox/104.0"
            .to_string(),
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            .to_string(),
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36 Edg/91.0.864.64"
            .to_string(),
    ]
}

fn default_max_links() -> usize {
    5
}

fn default_pacing_ms() -> u64 {
    500
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    2000
}

fn default_primary_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_fallback_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            identities: default_identities(),
            max_links: default_max_links(),
            pacing_ms: default_pacing_ms(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            site_name: None,
            request_timeout_secs: None,
        }
    }
}

impl GroundingConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.identities.is_empty() {
            return Err(Error::Config("at least one identity is required".into()));
        }
        if self.identities.iter().any(|id| id.trim().is_empty()) {
            return Err(Error::Config("identities must not be blank".into()));
        }
        if self.max_links == 0 {
            return Err(Error::Config("max_links must be at least 1".into()));
        }
        if self.primary_model.trim().is_empty() || self.fallback_model.trim().is_empty() {
            return Err(Error::Config("model names must not be empty".into()));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
