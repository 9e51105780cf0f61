use crate::config::GroundingConfig;
use crate::crawlers::fetcher::PageFetcher;
use crate::delay::Delay;
use crate::parsers::{links, text};
use crate::results::LinkCandidate;
use std::sync::Arc;
use url::Url;

/// Network side of the pipeline: reads the seed page's links and the text of
/// linked pages, one request at a time.
#[derive(Clone)]
pub struct SiteCrawler {
    fetcher: Arc<dyn PageFetcher>,
    config: Arc<GroundingConfig>,
    delay: Arc<dyn Delay>,
}

impl SiteCrawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        config: Arc<GroundingConfig>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            fetcher,
            config,
            delay,
        }
    }

    /// Fetches `page_url` with the first identity and returns its link candidates.
    ///
    /// Any failure (bad URL, no identity, failed fetch) yields an empty list.
    pub async fn harvest_links(&self, page_url: &str) -> Vec<LinkCandidate> {
        let base = match Url::parse(page_url) {
            Ok(url) => url,
            Err(e) => {
                ::log::error!("Invalid page URL {}: {}", page_url, e);
                return Vec::new();
            }
        };

        let Some(identity) = self.config.identities.first() else {
            ::log::error!("No identity configured, cannot fetch {}", page_url);
            return Vec::new();
        };

        let Some(page) = self.fetcher.fetch(base.as_str(), identity).await else {
            ::log::error!("No HTML content fetched from {}", page_url);
            return Vec::new();
        };

        links::parse_links(&page.body, &base)
    }

    /// Returns the text of `url`, rotating through the identities until one works.
    ///
    /// An identity that fails or yields no text is followed by the pacing delay
    /// before the next one is tried. If every identity fails the result is "".
    pub async fn fetch_page_text_resilient(&self, url: &str) -> String {
        let identities = &self.config.identities;

        for (attempt, identity) in identities.iter().enumerate() {
            if let Some(page) = self.fetcher.fetch(url, identity).await {
                let content = text::extract_text(&page.body);
                if !content.is_empty() {
                    ::log::debug!(
                        "Got {} chars from {} with identity #{}",
                        content.len(),
                        url,
                        attempt + 1
                    );
                    return content;
                }
                ::log::debug!("No text content on {} with identity #{}", url, attempt + 1);
            }

            if attempt + 1 < identities.len() {
                self.delay.wait(self.config.pacing()).await;
            }
        }

        ::log::warn!(
            "No content from {} after {} identities",
            url,
            identities.len()
        );
        String::new()
    }
}
