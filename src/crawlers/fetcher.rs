use crate::config::GroundingConfig;
use crate::error::{Error, Result};
use crate::results::FetchedPage;
use async_trait::async_trait;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Single-shot page retrieval under a given identity.
///
/// Implementations never return an error: any failure is logged and reported as
/// `None`. Retrying is up to the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, identity: &str) -> Option<FetchedPage>;
}

/// Fetches pages over HTTP with a browser-like header profile
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher; `timeout` is left to the transport default when `None`
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Create a fetcher using the configured request timeout
    pub fn from_config(config: &GroundingConfig) -> Result<Self> {
        Self::new(config.request_timeout())
    }

    /// Headers sent with every request, identified as `identity`
    pub fn header_profile(identity: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(identity)
                .map_err(|e| Error::Transport(format!("invalid identity {identity:?}: {e}")))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        Ok(headers)
    }

    async fn try_fetch(&self, url: &str, identity: &str) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url)
            .headers(Self::header_profile(identity)?)
            .send()
            .await?
            .error_for_status()?;

        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(FetchedPage { body, headers })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, identity: &str) -> Option<FetchedPage> {
        ::log::trace!("GET {} as {:?}", url, identity);
        match self.try_fetch(url, identity).await {
            Ok(page) => {
                ::log::debug!("Fetched {} ({} bytes)", url, page.body.len());
                Some(page)
            }
            Err(e) => {
                ::log::warn!("Error fetching content from {}: {}", url, e);
                None
            }
        }
    }
}
