use crate::config::GroundingConfig;
use crate::crawlers::{GroundingAssembler, PageFetcher, SiteCrawler};
use crate::delay::{Delay, TokioDelay};
use crate::filter::KeywordSet;
use crate::generation::{GenerativeBackend, ResilientClient};
use crate::prompt;
use crate::results::{Answer, AnswerPath};
use std::sync::Arc;

/// Answers a query from a seed site, falling back to an ungrounded prompt.
///
/// Runs `Start -> Harvesting -> Grounded | Fallback -> Done`: keywords are taken
/// from the query, the grounding document is assembled, and a non-empty document
/// sends the grounded prompt to the primary model while an empty one sends the
/// bare query to the fallback model.
pub struct Orchestrator {
    config: Arc<GroundingConfig>,
    assembler: GroundingAssembler,
    primary: ResilientClient,
    fallback: ResilientClient,
}

impl Orchestrator {
    /// Create an orchestrator that paces and backs off on the tokio timer
    pub fn new(
        config: GroundingConfig,
        fetcher: Arc<dyn PageFetcher>,
        backend: Arc<dyn GenerativeBackend>,
    ) -> Self {
        Self::with_delay(config, fetcher, backend, Arc::new(TokioDelay))
    }

    /// Create an orchestrator with a custom delay source
    pub fn with_delay(
        config: GroundingConfig,
        fetcher: Arc<dyn PageFetcher>,
        backend: Arc<dyn GenerativeBackend>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        let config = Arc::new(config);
        let crawler = SiteCrawler::new(fetcher, Arc::clone(&config), Arc::clone(&delay));
        let assembler = GroundingAssembler::new(crawler, config.max_links);
        let primary = ResilientClient::primary(Arc::clone(&backend), &config, Arc::clone(&delay));
        let fallback = ResilientClient::fallback(backend, &config, delay);

        Self {
            config,
            assembler,
            primary,
            fallback,
        }
    }

    /// Configuration the orchestrator was built with
    pub fn config(&self) -> &GroundingConfig {
        &self.config
    }

    /// Answer `query` using content found one hop from `seed_url`
    pub async fn answer(&self, seed_url: &str, query: &str) -> Answer {
        let keywords = KeywordSet::from_query(query);
        ::log::debug!("Derived {} keywords from query", keywords.len());

        ::log::info!("Harvesting {} for grounding content", seed_url);
        let document = self
            .assembler
            .build_grounding_document(seed_url, &keywords)
            .await;

        let (path, client, prompt) = if document.is_empty() {
            ::log::warn!(
                "No content could be extracted from {}; answering without grounding",
                seed_url
            );
            (
                AnswerPath::Fallback,
                &self.fallback,
                prompt::fallback_prompt(query),
            )
        } else {
            let site = prompt::site_label(self.config.site_name.as_deref(), seed_url);
            ::log::info!(
                "Answering from {} chars of {} content",
                document.len(),
                site
            );
            (
                AnswerPath::Grounded,
                &self.primary,
                prompt::grounded_prompt(&site, &document, query),
            )
        };

        let text = client.generate(&prompt).await;
        ::log::info!("Answer produced by {} model {}", client.role(), client.model());

        Answer {
            text,
            path,
            model: client.model().to_string(),
        }
    }
}
