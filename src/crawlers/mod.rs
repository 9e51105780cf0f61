pub mod fetcher;
pub mod grounding;
pub mod web;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use grounding::GroundingAssembler;
pub use web::SiteCrawler;
