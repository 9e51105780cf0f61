use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An outbound hyperlink found on the seed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    /// Lowercased, trimmed anchor text (never empty)
    pub link_text: String,

    /// Lowercased, trimmed text of the anchor's parent element
    pub surrounding_text: String,

    /// Absolute URL the anchor points to
    pub url: String,
}

impl LinkCandidate {
    /// Create a new link candidate
    pub fn new(link_text: String, surrounding_text: String, url: String) -> Self {
        Self {
            link_text,
            surrounding_text,
            url,
        }
    }
}

/// A link candidate that passed the relevance filter
pub type RelevantLink = LinkCandidate;

/// A successfully fetched page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Response body decoded as text
    pub body: String,

    /// Response headers (lowercase names)
    pub headers: BTreeMap<String, String>,
}

/// Which branch of the orchestrator produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerPath {
    /// Site content was found and embedded in the prompt
    Grounded,
    /// No site content was found; the query was sent on its own
    Fallback,
}

/// Final result of answering a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Generated text, or the apology if every attempt failed
    pub text: String,

    /// Path taken through the orchestrator
    pub path: AnswerPath,

    /// Model the answer was requested from
    pub model: String,
}
