//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the Frontier Crawler: it owns the visited set, the
//! pending frontier, the inverted index and the link graph for one run, and
//! hands the index and graph over read-only once the frontier is exhausted.
//!
//! Two drivers share the same state:
//! - [`Crawler::run`] is the sequential reference crawl with a reproducible
//!   depth-first order
//! - [`crawl_concurrent`] runs several fetches at once on tokio's blocking
//!   pool while a single coordinator task performs every state mutation; the
//!   crawl order is best-effort

use crate::config::Config;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_document;
use crate::graph::LinkGraph;
use crate::index::InvertedIndex;
use crate::state::CrawlState;
use crate::SearchError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Run-level crawl options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Stop after this many documents have been visited
    pub max_pages: Option<usize>,

    /// Maximum number of fetches in flight (concurrent crawl only)
    pub concurrency: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: None,
            concurrency: 1,
        }
    }
}

/// Summary of a finished crawl run
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSummary {
    /// Documents fetched (successfully or not)
    pub documents_visited: usize,

    /// Visited documents whose fetch returned empty content
    pub empty_documents: usize,

    /// Unvisited identifiers still pending when the run stopped
    pub frontier_remaining: usize,

    /// True if the page cap stopped the run with unvisited identifiers left
    pub truncated: bool,

    /// Final state of the run
    pub state: CrawlState,

    /// When the seed was queued
    pub started_at: DateTime<Utc>,

    /// When the frontier drained or the cap stopped the run
    pub finished_at: DateTime<Utc>,
}

/// Frozen result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub index: InvertedIndex,
    pub graph: LinkGraph,
    pub summary: CrawlSummary,
}

impl CrawlOutput {
    /// Splits the output into the index and the graph
    pub fn into_parts(self) -> (InvertedIndex, LinkGraph) {
        (self.index, self.graph)
    }
}

/// Mutable state of a single crawl run
struct CrawlRun {
    frontier: Frontier,
    visited: HashSet<String>,
    index: InvertedIndex,
    graph: LinkGraph,
    empty_documents: usize,
    max_pages: Option<usize>,
    started_at: DateTime<Utc>,
}

impl CrawlRun {
    fn start(seed: &str, max_pages: Option<usize>) -> Self {
        tracing::info!("Starting crawl from {}", seed);

        Self {
            frontier: Frontier::with_seed(seed),
            visited: HashSet::new(),
            index: InvertedIndex::new(),
            graph: LinkGraph::new(),
            empty_documents: 0,
            max_pages,
            started_at: Utc::now(),
        }
    }

    fn cap_reached(&self) -> bool {
        self.max_pages
            .is_some_and(|max_pages| self.visited.len() >= max_pages)
    }

    fn state(&self) -> CrawlState {
        if self.cap_reached() {
            CrawlState::Done
        } else {
            CrawlState::from_frontier_len(self.frontier.len())
        }
    }

    /// Pops identifiers until one that has not been visited turns up, and
    /// marks it visited
    fn next_unvisited(&mut self) -> Option<String> {
        if self.cap_reached() {
            return None;
        }

        while let Some(id) = self.frontier.pop() {
            if self.visited.contains(&id) {
                tracing::trace!("Skipping already visited {}", id);
                continue;
            }
            self.visited.insert(id.clone());
            return Some(id);
        }

        None
    }

    /// Indexes a fetched document, records its links and grows the frontier
    fn record(&mut self, id: String, raw: &str) {
        if raw.is_empty() {
            self.empty_documents += 1;
            tracing::debug!("Empty content for {}", id);
        }

        let parsed = parse_document(raw);
        self.index.add_document(&id, &parsed.text);
        let added = self.frontier.merge(&parsed.links);

        tracing::debug!(
            "Visited {}: {} links, {} new in frontier",
            id,
            parsed.links.len(),
            added
        );

        self.graph.insert(id, parsed.links);

        let recorded = self.graph.len();
        if recorded % 10 == 0 {
            tracing::info!(
                "Progress: {} documents visited, {} in frontier, state {}",
                recorded,
                self.frontier.len(),
                self.state()
            );
        }
    }

    fn finish(self) -> CrawlOutput {
        let remaining = self.frontier.unvisited_len(&self.visited);
        let truncated = self.cap_reached() && remaining > 0;
        let summary = CrawlSummary {
            documents_visited: self.visited.len(),
            empty_documents: self.empty_documents,
            frontier_remaining: remaining,
            truncated,
            state: self.state(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl completed: {} documents visited, {} tokens indexed in {}ms",
            summary.documents_visited,
            self.index.token_count(),
            (summary.finished_at - summary.started_at).num_milliseconds()
        );
        if truncated {
            tracing::info!(
                "Page cap reached with {} identifiers still pending",
                summary.frontier_remaining
            );
        }

        CrawlOutput {
            index: self.index,
            graph: self.graph,
            summary,
        }
    }
}

/// Sequential Frontier Crawler
///
/// # Example
///
/// ```
/// use ripple_search::crawler::{Crawler, InMemoryFetcher};
///
/// let fetcher = InMemoryFetcher::new()
///     .with_document("home", r#"welcome <a href="about">about</a>"#)
///     .with_document("about", "about us");
///
/// let output = Crawler::new(fetcher).run("home");
/// assert_eq!(output.graph.len(), 2);
/// assert_eq!(output.index.lookup("us").unwrap(), &["about".to_string()]);
/// ```
pub struct Crawler<F> {
    fetcher: F,
    max_pages: Option<usize>,
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a crawler around a fetcher
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_pages: None,
        }
    }

    /// Caps the number of documents visited
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Crawls from `seed` until the frontier is exhausted
    ///
    /// Each step pops the most recently added identifier, skips it if it was
    /// already visited, and otherwise fetches it, indexes its plain text,
    /// records its outbound links and merges them into the frontier. Fetch
    /// failures are recorded like empty documents and never retried.
    ///
    /// Without a page cap this does not return for an effectively infinite
    /// link graph.
    pub fn run(&self, seed: &str) -> CrawlOutput {
        let mut run = CrawlRun::start(seed, self.max_pages);

        while let Some(id) = run.next_unvisited() {
            let raw = self.fetcher.fetch(&id);
            run.record(id, &raw);
        }

        run.finish()
    }
}

/// Concurrent Frontier Crawler
///
/// At most `options.concurrency` fetches run at a time on tokio's blocking
/// pool. The calling task is the only writer of the frontier, visited set,
/// index and graph; workers only return `(identifier, content)`. An
/// identifier is marked visited when it is dispatched, so no document is
/// fetched twice. A worker that panics is treated as a failed fetch.
///
/// # Returns
///
/// * `Ok(CrawlOutput)` - The frontier was exhausted or the cap was reached
/// * `Err(SearchError::Worker)` - A fetch task was cancelled by the runtime
pub async fn crawl_concurrent<F>(
    seed: &str,
    fetcher: Arc<F>,
    options: CrawlOptions,
) -> Result<CrawlOutput, SearchError>
where
    F: Fetcher + 'static,
{
    let concurrency = options.concurrency.max(1);
    let mut run = CrawlRun::start(seed, options.max_pages);
    let mut inflight: JoinSet<(String, String)> = JoinSet::new();

    loop {
        while inflight.len() < concurrency {
            let Some(id) = run.next_unvisited() else {
                break;
            };
            let fetcher = Arc::clone(&fetcher);
            inflight.spawn_blocking(move || {
                let raw = panic::catch_unwind(AssertUnwindSafe(|| fetcher.fetch(&id)))
                    .unwrap_or_else(|_| {
                        tracing::warn!("Fetcher panicked on {}, treating as empty", id);
                        String::new()
                    });
                (id, raw)
            });
        }

        let Some(joined) = inflight.join_next().await else {
            break;
        };
        let (id, raw) = joined.map_err(|e| SearchError::Worker(e.to_string()))?;
        run.record(id, &raw);
    }

    Ok(run.finish())
}

/// Runs a crawl described by a configuration file over HTTP
///
/// A concurrency of 1 runs the sequential reference crawl; anything higher
/// runs [`crawl_concurrent`] on a dedicated tokio runtime.
///
/// # Example
///
/// ```no_run
/// use ripple_search::config::load_config;
/// use ripple_search::crawler::run_crawl;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let output = run_crawl(&config)?;
/// println!("{} documents", output.graph.len());
/// # Ok(())
/// # }
/// ```
pub fn run_crawl(config: &Config) -> Result<CrawlOutput, SearchError> {
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.fetcher)?;
    let options = config.crawler.crawl_options();

    if options.concurrency <= 1 {
        let mut crawler = Crawler::new(fetcher);
        if let Some(max_pages) = options.max_pages {
            crawler = crawler.with_max_pages(max_pages);
        }
        return Ok(crawler.run(&config.crawler.seed));
    }

    let fetcher = Arc::new(fetcher);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(crawl_concurrent(
        &config.crawler.seed,
        Arc::clone(&fetcher),
        options,
    ));

    // The blocking HTTP client must not be dropped inside the runtime
    drop(runtime);
    drop(fetcher);

    output
}
