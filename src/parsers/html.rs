use crate::parsers::{Dom, DomElement};
use scraper::{ElementRef, Html, Selector};

/// A page parsed with `scraper`. Parsing is lenient and never fails.
pub struct HtmlDom {
    doc: Html,
}

impl HtmlDom {
    /// Parses a full HTML document
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        if !doc.errors.is_empty() {
            ::log::trace!("HTML parser recovered from {} errors", doc.errors.len());
        }
        Self { doc }
    }
}

impl Dom for HtmlDom {
    type Element<'a>
        = ElementRef<'a>
    where
        Self: 'a;

    fn select<'a>(&'a self, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(selector) => self.doc.select(&selector).collect(),
            Err(e) => {
                ::log::warn!("Ignoring invalid selector {:?}: {}", selector, e);
                Vec::new()
            }
        }
    }
}

impl DomElement for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn inner_text(&self) -> String {
        self.text().collect()
    }

    fn parent_text(&self) -> String {
        self.parent()
            .and_then(ElementRef::wrap)
            .map(|parent| parent.text().collect())
            .unwrap_or_default()
    }
}
