//! Ripple-Search: a minimal self-contained search engine
//!
//! This crate crawls documents reachable from a seed location, builds a
//! keyword-to-document index, records the link graph between documents and
//! ranks documents by structural importance so keyword lookups can return
//! results ordered by relevance.
//!
//! Data flows strictly forward:
//! crawler → {index, graph} → rank → query.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod index;
pub mod output;
pub mod query;
pub mod rank;
pub mod state;

use thiserror::Error;

/// Main error type for Ripple-Search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(#[from] query::QueryError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Fetch worker did not complete: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Ripple-Search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, crawl_concurrent, CrawlOutput, Crawler, Fetcher};
pub use graph::LinkGraph;
pub use index::InvertedIndex;
pub use query::{look_up, lookup, ranked_lookup, LookupOptions, LookupRequest};
pub use rank::{compute_ranks, RankConfig, RankVector};
pub use state::CrawlState;
