//! HTML access for the pipeline.
//!
//! Link harvesting and text extraction only need three things from a parsed page:
//! select elements by a CSS selector, read an attribute, and read the text of an
//! element or of its parent. [`Dom`] and [`DomElement`] name exactly that surface so
//! the scraper-backed [`HtmlDom`] can be swapped out or faked in tests.

pub mod html;
pub mod links;
pub mod text;


pub use html::HtmlDom;

/// A parsed document that can be queried by selector
pub trait Dom {
    /// Element handle borrowed from the document
    type Element<'a>: DomElement
    where
        Self: 'a;

    /// Elements matching `selector`, in document order.
    ///
    /// An invalid selector yields no elements.
    fn select<'a>(&'a self, selector: &str) -> Vec<Self::Element<'a>>;
}

/// The element operations the pipeline relies on
pub trait DomElement {
    /// Raw value of an attribute, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text of the element and all its descendants
    fn inner_text(&self) -> String;

    /// Text of the nearest enclosing element, or empty at the document root
    fn parent_text(&self) -> String;
}
