//! Ripple-Search main entry point
//!
//! This is the command-line interface for the Ripple-Search engine.

use anyhow::Context;
use clap::Parser;
use ripple_search::config::{load_config_with_hash, Config};
use ripple_search::crawler::{run_crawl, CrawlOutput};
use ripple_search::output::{print_graph, print_index, print_statistics, CrawlStatistics};
use ripple_search::query::{look_up, LookupOptions};
use ripple_search::rank::compute_ranks_with;
use ripple_search::{LinkGraph, RankVector};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Search: a minimal self-contained search engine
///
/// Ripple-Search crawls every document reachable from a seed, indexes the
/// words each one contains, ranks documents by their link structure and
/// answers single-keyword queries.
#[derive(Parser, Debug)]
#[command(name = "ripple-search")]
#[command(version = "1.0.0")]
#[command(about = "A minimal crawl, index and rank search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["dump", "top", "queries"])]
    dry_run: bool,

    /// Print the full index and link graph after the crawl
    #[arg(long)]
    dump: bool,

    /// Print the N highest ranked documents
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Look up a token after the crawl (repeatable)
    #[arg(long = "query", value_name = "TOKEN")]
    queries: Vec<String>,

    /// Order query results by rank
    #[arg(long, requires = "queries")]
    ranked: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // The crawl must run outside any tokio runtime: it may build its own
    let output = run_crawl(&config).context("Crawl failed")?;
    print_statistics(&CrawlStatistics::from_output(&output));

    if cli.dump {
        println!();
        print_index(&output.index);
        print_graph(&output.graph);
    }

    let rank_fn = |graph: &LinkGraph| compute_ranks_with(graph, &config.rank);

    if let Some(limit) = cli.top {
        handle_top(&rank_fn(&output.graph), limit);
    }

    for token in &cli.queries {
        handle_query(&output, token, cli.ranked, &rank_fn)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_search=info,warn"),
            1 => EnvFilter::new("ripple_search=debug,info"),
            2 => EnvFilter::new("ripple_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Search Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    match config.crawler.max_pages {
        Some(max_pages) => println!("  Max pages: {}", max_pages),
        None => println!("  Max pages: unlimited"),
    }
    println!("  Concurrency: {}", config.crawler.concurrency);

    println!("\nFetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Connect timeout: {}s", config.fetcher.connect_timeout_secs);
    println!("  User-Agent: {}", config.user_agent.header_value());

    println!("\nRank:");
    println!("  Damping: {}", config.rank.damping);
    println!("  Iterations: {}", config.rank.iterations);
    println!("  Propagation: {:?}", config.rank.propagation);
    println!("  Parallel: {}", config.rank.parallel);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", config.crawler.seed);
}

/// Handles --top: prints the highest ranked documents
fn handle_top(ranks: &RankVector, limit: usize) {
    println!("\n=== Top {} Documents ===\n", limit);
    for (position, (document, rank)) in ranks.top(limit).into_iter().enumerate() {
        println!("  {:>3}. {:.6}  {}", position + 1, rank, document);
    }
    println!("\nTotal rank: {:.6}", ranks.total());
}

/// Handles one --query token
fn handle_query(
    output: &CrawlOutput,
    token: &str,
    ranked: bool,
    rank_fn: &dyn Fn(&LinkGraph) -> RankVector,
) -> anyhow::Result<()> {
    let options = if ranked {
        LookupOptions::new()
            .with_graph(&output.graph)
            .with_rank_fn(rank_fn)
    } else {
        LookupOptions::new()
    };

    println!("\nQuery '{}':", token);
    match look_up(&output.index, token, options)? {
        None => println!("  not found"),
        Some(documents) if documents.is_empty() => println!("  no ranked matches"),
        Some(documents) => {
            for document in documents {
                println!("  - {}", document);
            }
        }
    }

    Ok(())
}
