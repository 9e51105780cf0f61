use crate::parsers::{Dom, DomElement, HtmlDom};
use crate::results::LinkCandidate;
use url::Url;

/// Prefixes of `href` values that never lead to another page
const SKIPPED_PREFIXES: [&str; 3] = ["#", "mailto:", "tel:"];

/// Whether an `href` is blank, an in-page fragment or a mail/phone link
pub fn is_skipped_href(href: &str) -> bool {
    href.trim().is_empty()
        || SKIPPED_PREFIXES
            .iter()
            .any(|prefix| href.starts_with(prefix))
}

/// Parses HTML and returns every outbound link candidate in document order
pub fn parse_links(html: &str, page_url: &Url) -> Vec<LinkCandidate> {
    let dom = HtmlDom::parse(html);
    links_from_dom(&dom, page_url)
}

/// Collects link candidates from an already parsed document.
///
/// Anchors without `href`, with a blank or skipped `href`, with an `href` that cannot be
/// resolved against `page_url`, or with blank text are dropped. Duplicate URLs
/// are kept.
pub fn links_from_dom<D: Dom>(dom: &D, page_url: &Url) -> Vec<LinkCandidate> {
    let mut links = Vec::new();

    for anchor in dom.select("a") {
        let Some(href) = anchor.attribute("href") else {
            continue;
        };
        if is_skipped_href(href) {
            continue;
        }

        let url = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                ::log::debug!("Skipping unresolvable href {:?}: {}", href, e);
                continue;
            }
        };

        let link_text = anchor.inner_text().to_lowercase().trim().to_string();
        if link_text.is_empty() {
            continue;
        }
        let surrounding_text = anchor.parent_text().to_lowercase().trim().to_string();

        links.push(LinkCandidate::new(link_text, surrounding_text, url.to_string()));
    }

    ::log::debug!("Found {} link candidates on {}", links.len(), page_url);
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links
                .iter()
                .take(5)
                .map(|l| (&l.link_text, &l.surrounding_text))
                .collect::<Vec<_>>()
        );
    }

    links
}
