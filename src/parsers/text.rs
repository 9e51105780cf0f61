use crate::parsers::{Dom, DomElement, HtmlDom};

/// Elements whose text makes up a page's content
pub const CONTENT_SELECTOR: &str = "section, p, h1, h2, h3, h4, h5, h6";

/// Extracts the readable text of an HTML page.
///
/// Every section, paragraph and heading contributes its text followed by a line
/// break, in document order. Nested matches (a paragraph inside a section) appear
/// twice. The result is trimmed; a page with no such elements yields "".
pub fn extract_text(html: &str) -> String {
    let dom = HtmlDom::parse(html);
    text_from_dom(&dom)
}

/// Same as [`extract_text`] on an already parsed document
pub fn text_from_dom<D: Dom>(dom: &D) -> String {
    let mut text = String::new();
    for element in dom.select(CONTENT_SELECTOR) {
        text.push_str(&element.inner_text());
        text.push('\n');
    }
    text.trim().to_string()
}
