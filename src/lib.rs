//! Answers questions about a website by grounding a generative model in the site's
//! own pages.
//!
//! The seed page's links are scored against the query's keywords using the text
//! around each link, the matching pages are fetched under a rotating set of
//! user agents, and their text becomes the context of the prompt. When nothing
//! relevant can be fetched the query is answered without grounding.

pub mod config;
pub mod crawlers;
pub mod delay;
pub mod error;
pub mod filter;
pub mod generation;
pub mod orchestrator;
pub mod parsers;
pub mod prompt;
pub mod results;

// Re-export commonly used types for convenience
pub use config::GroundingConfig;
pub use error::{Error, Result};
pub use filter::KeywordSet;
pub use orchestrator::Orchestrator;
pub use results::{Answer, AnswerPath, LinkCandidate, RelevantLink};
