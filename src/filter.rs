use crate::results::{LinkCandidate, RelevantLink};
use regex::Regex;
use std::sync::LazyLock;

/// Characters that are neither word characters nor whitespace
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Lowercase query tokens used for relevance matching
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Derive keywords from a free-text query: lowercase, split on whitespace.
    ///
    /// No stemming or stopword removal; "how" and "does" are keywords too.
    pub fn from_query(query: &str) -> Self {
        Self {
            keywords: query
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Keywords in query order
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Keywords as matched against link context, with punctuation stripped.
    ///
    /// A keyword made only of punctuation becomes "" and matches every link.
    fn match_terms(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| PUNCTUATION.replace_all(k, "").into_owned())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keywords: iter.into_iter().map(|k| k.into().to_lowercase()).collect(),
        }
    }
}

/// Whether any keyword occurs inside the candidate's surrounding text.
///
/// This is plain substring containment, so "art" matches "start".
pub fn is_relevant(candidate: &LinkCandidate, terms: &[String]) -> bool {
    terms
        .iter()
        .any(|term| candidate.surrounding_text.contains(term.as_str()))
}

/// Select the candidates whose surrounding text mentions a keyword.
///
/// Harvest order is kept and the result is cut off after `max_links` entries.
pub fn filter_relevant(
    candidates: &[LinkCandidate],
    keywords: &KeywordSet,
    max_links: usize,
) -> Vec<RelevantLink> {
    let terms = keywords.match_terms();
    let relevant: Vec<RelevantLink> = candidates
        .iter()
        .filter(|c| is_relevant(c, &terms))
        .take(max_links)
        .cloned()
        .collect();

    ::log::debug!(
        "{} of {} links matched keywords {:?}",
        relevant.len(),
        candidates.len(),
        terms
    );

    relevant
}
