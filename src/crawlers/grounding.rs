use crate::crawlers::web::SiteCrawler;
use crate::filter::{self, KeywordSet};

/// Turns a seed page and a keyword set into a grounding document
#[derive(Clone)]
pub struct GroundingAssembler {
    crawler: SiteCrawler,
    max_links: usize,
}

impl GroundingAssembler {
    pub fn new(crawler: SiteCrawler, max_links: usize) -> Self {
        Self { crawler, max_links }
    }

    /// Harvests the seed page, keeps the relevant links and joins their text.
    ///
    /// Pages are fetched one after another in link order. Pages that yield no text
    /// are left out. An empty string means no grounding is available.
    pub async fn build_grounding_document(&self, seed_url: &str, keywords: &KeywordSet) -> String {
        let candidates = self.crawler.harvest_links(seed_url).await;
        if candidates.is_empty() {
            ::log::warn!("No links with surrounding text found on {}", seed_url);
            return String::new();
        }

        ::log::debug!("User keywords: {:?}", keywords.as_slice());
        let relevant = filter::filter_relevant(&candidates, keywords, self.max_links);
        if relevant.is_empty() {
            ::log::warn!("No relevant links found matching user keywords");
            return String::new();
        }
        ::log::debug!(
            "Relevant links: {:?}",
            relevant.iter().map(|l| l.url.as_str()).collect::<Vec<_>>()
        );

        let mut contents = Vec::with_capacity(relevant.len());
        for link in &relevant {
            ::log::info!("Fetching content from relevant link: {}", link.url);
            let content = self.crawler.fetch_page_text_resilient(&link.url).await;
            if !content.is_empty() {
                contents.push(content);
            }
        }

        ::log::info!(
            "Grounding document built from {} of {} relevant pages",
            contents.len(),
            relevant.len()
        );
        contents.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroundingConfig;
    use crate::crawlers::fetcher::PageFetcher;
    use crate::delay::RecordingDelay;
    use crate::results::FetchedPage;
    use async_trait::async_trait;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;

    /// Serves the same body to every identity
    struct StaticSite(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl PageFetcher for StaticSite {
        async fn fetch(&self, url: &str, _identity: &str) -> Option<FetchedPage> {
            self.0.get(url).map(|body| FetchedPage {
                body: body.to_string(),
                headers: BTreeMap::new(),
            })
        }
    }

    fn assembler(pages: &[(&'static str, &'static str)]) -> GroundingAssembler {
        let config = Arc::new(GroundingConfig {
            pacing_ms: 0,
            ..GroundingConfig::default()
        });
        let max_links = config.max_links;
        let crawler = SiteCrawler::new(
            Arc::new(StaticSite(pages.iter().copied().collect())),
            config,
            Arc::new(RecordingDelay::new()),
        );
        GroundingAssembler::new(crawler, max_links)
    }

    #[tokio::test]
    async fn test_seed_without_anchors_is_empty() {
        let assembler = assembler(&[("https://site.org/", "<p>No links here</p>")]);
        let keywords = KeywordSet::from_query("links");
        assert_eq!(
            assembler
                .build_grounding_document("https://site.org/", &keywords)
                .await,
            ""
        );
    }

    #[tokio::test]
    async fn test_no_relevant_links_is_empty() {
        let assembler = assembler(&[
            ("https://site.org/", r#"<p>Donate <a href="/give">Give</a></p>"#),
            ("https://site.org/give", "<p>Give money</p>"),
        ]);
        let keywords = KeywordSet::from_query("youth");
        assert_eq!(
            assembler
                .build_grounding_document("https://site.org/", &keywords)
                .await,
            ""
        );
    }

    #[tokio::test]
    async fn test_joins_pages_and_skips_failures() {
        let assembler = assembler(&[
            (
                "https://site.org/",
                r#"<ul>
                    <li>youth mentoring <a href="/mentor">Mentor</a></li>
                    <li>youth housing <a href="/missing">Housing</a></li>
                    <li>youth camps <a href="/camps">Camps</a></li>
                </ul>"#,
            ),
            ("https://site.org/mentor", "<h2>Mentoring</h2><p>Weekly sessions.</p>"),
            ("https://site.org/camps", "<p>Summer camps.</p>"),
        ]);
        let keywords = KeywordSet::from_query("Youth?");
        let document = assembler
            .build_grounding_document("https://site.org/", &keywords)
            .await;
        assert_eq!(document, "Mentoring\nWeekly sessions.\nSummer camps.");
    }

    #[tokio::test]
    async fn test_unreachable_seed_is_empty() {
        let assembler = assembler(&[]);
        let keywords = KeywordSet::from_query("anything");
        assert_eq!(
            assembler
                .build_grounding_document("https://down.example/", &keywords)
                .await,
            ""
        );
    }
}
