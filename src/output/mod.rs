//! Output module for crawl summaries
//!
//! This module handles:
//! - Deriving statistics from a finished crawl
//! - Printing statistics and the crawled structures to stdout

pub mod stats;

pub use stats::{print_graph, print_index, print_statistics, CrawlStatistics};
