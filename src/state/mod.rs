//! State module for tracking crawl progress
//!
//! The Frontier Crawler is a two-state machine: it is `Running` while the
//! pending frontier holds identifiers and `Done` once it is exhausted (or the
//! configured page cap stops it early).

mod crawl_state;

pub use crawl_state::CrawlState;
