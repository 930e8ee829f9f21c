//! Crawler module for document discovery
//!
//! This module contains the Frontier Crawler and its collaborators:
//! - Fetching raw content through the [`Fetcher`] contract
//! - Link extraction and markup stripping
//! - The depth-first pending frontier
//! - Overall crawl coordination, sequential or concurrent

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{
    crawl_concurrent, run_crawl, CrawlOptions, CrawlOutput, CrawlSummary, Crawler,
};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher, InMemoryFetcher};
pub use frontier::Frontier;
pub use parser::{extract_links, parse_document, to_plain_text, ParsedDocument};

use crate::graph::LinkGraph;
use crate::index::InvertedIndex;

/// Crawls from `seed` until no unvisited identifiers remain
///
/// This is the main synchronous entry point. It blocks until the frontier is
/// exhausted and returns the frozen index and link graph.
///
/// # Example
///
/// ```
/// use ripple_search::crawler::crawl;
///
/// let fetcher = |_id: &str| "hello world".to_string();
/// let (index, graph) = crawl("seed", fetcher);
///
/// assert_eq!(graph.links("seed").unwrap().len(), 0);
/// assert_eq!(index.lookup("hello").unwrap(), &["seed".to_string()]);
/// ```
pub fn crawl<F: Fetcher>(seed: &str, fetcher: F) -> (InvertedIndex, LinkGraph) {
    Crawler::new(fetcher).run(seed).into_parts()
}
