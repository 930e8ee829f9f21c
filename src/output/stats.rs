//! Statistics generation from a finished crawl
//!
//! This module provides functionality for extracting and displaying
//! crawl statistics from the frozen index and link graph.

use crate::crawler::CrawlOutput;
use crate::graph::LinkGraph;
use crate::index::InvertedIndex;
use crate::state::CrawlState;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of documents fetched (keys of the link graph)
    pub documents: usize,

    /// Documents whose content came back empty
    pub empty_documents: usize,

    /// Total number of outbound links, duplicates included
    pub total_links: usize,

    /// Links whose target was never crawled
    pub dangling_links: usize,

    /// Number of distinct tokens in the index
    pub distinct_tokens: usize,

    /// Whether the page cap stopped the crawl early
    pub truncated: bool,

    /// Identifiers left pending when the crawl stopped
    pub frontier_remaining: usize,

    /// Final crawl state
    pub state: CrawlState,

    /// Wall-clock duration in milliseconds
    pub duration_ms: i64,
}

impl CrawlStatistics {
    /// Derives statistics from a crawl result
    pub fn from_output(output: &CrawlOutput) -> Self {
        let summary = &output.summary;

        Self {
            documents: output.graph.len(),
            empty_documents: summary.empty_documents,
            total_links: output.graph.edge_count(),
            dangling_links: output.graph.dangling_count(),
            distinct_tokens: output.index.token_count(),
            truncated: summary.truncated,
            frontier_remaining: summary.frontier_remaining,
            state: summary.state,
            duration_ms: (summary.finished_at - summary.started_at).num_milliseconds(),
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Documents crawled: {}", stats.documents);
    println!("  Empty documents: {}", stats.empty_documents);
    println!("  Total links found: {}", stats.total_links);
    println!("  Dangling links: {}", stats.dangling_links);
    println!("  Distinct tokens: {}", stats.distinct_tokens);
    println!();

    println!("Run:");
    println!("  State: {}", stats.state);
    println!("  Duration: {}ms", stats.duration_ms);
    if stats.truncated {
        println!(
            "  Stopped at page cap with {} identifiers still pending",
            stats.frontier_remaining
        );
    }
    println!();

    let fetched = stats.documents - stats.empty_documents.min(stats.documents);
    let success_rate = if stats.documents > 0 {
        (fetched as f64 / stats.documents as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} documents returned content)",
        success_rate, fetched, stats.documents
    );
}

/// Prints every token with its posting list, sorted by token
pub fn print_index(index: &InvertedIndex) {
    println!("=== Index ({} tokens) ===\n", index.token_count());

    let mut entries: Vec<_> = index.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (token, documents) in entries {
        println!("  {}: {}", token, documents.join(", "));
    }
    println!();
}

/// Prints every document with its outbound links, in crawl order
pub fn print_graph(graph: &LinkGraph) {
    println!("=== Link Graph ({} documents) ===\n", graph.len());

    for (document, links) in graph.iter() {
        if links.is_empty() {
            println!("  {} -> (none)", document);
        } else {
            println!("  {} -> {}", document, links.join(", "));
        }
    }
    println!();
}
