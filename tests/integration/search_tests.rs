//! End-to-end tests for crawl, rank and query over an in-memory corpus

use ripple_search::crawler::{crawl, Crawler, InMemoryFetcher};
use ripple_search::query::{look_up, lookup, ranked_lookup, LookupOptions, QueryError};
use ripple_search::rank::{compute_ranks, compute_ranks_with, Propagation};
use ripple_search::{LinkGraph, RankConfig, RankVector};

fn corpus() -> InMemoryFetcher {
    InMemoryFetcher::new()
        .with_document(
            "home",
            r#"<h1>rust search</h1><a href="guide">guide</a><a href="blog">blog</a>"#,
        )
        .with_document(
            "guide",
            r#"<p>rust guide</p><a href="home">home</a><a href="blog">blog</a>"#,
        )
        .with_document("blog", r#"rust blog rust <a href="home">home</a>"#)
        .with_document("orphan", "rust orphan")
}

#[test]
fn test_two_page_cycle_converges_to_half() {
    let fetcher = InMemoryFetcher::new()
        .with_document("A", r#"<a href="B">b</a>"#)
        .with_document("B", r#"<a href="A">a</a>"#);

    let (_index, graph) = crawl("A", fetcher);
    let ranks = compute_ranks(&graph);

    assert_eq!(ranks.len(), 2);
    assert!((ranks.get("A").unwrap() - 0.5).abs() < 1e-9);
    assert!((ranks.get("B").unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn test_seed_without_links() {
    let fetcher = InMemoryFetcher::new().with_document("seed", "<p>just some words</p>");

    let (index, graph) = crawl("seed", fetcher);

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.links("seed").unwrap().len(), 0);
    assert_eq!(index.token_count(), 3);
    for token in ["just", "some", "words"] {
        assert_eq!(index.lookup(token).unwrap(), &["seed".to_string()]);
    }
}

#[test]
fn test_missing_token_is_absent_not_empty() {
    let (index, _graph) = crawl("home", corpus());

    assert!(lookup(&index, "nonexistent_token").is_none());
    assert_eq!(
        look_up(&index, "nonexistent_token", LookupOptions::new()).unwrap(),
        None
    );
}

#[test]
fn test_fetcher_always_empty() {
    let (index, graph) = crawl("seed", |_id: &str| String::new());

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.links("seed").unwrap().len(), 0);
    assert!(index.is_empty());
}

#[test]
fn test_partial_rank_arguments_rejected() {
    let (index, graph) = crawl("home", corpus());

    let only_graph = look_up(&index, "rust", LookupOptions::new().with_graph(&graph));
    assert_eq!(
        only_graph,
        Err(QueryError::InvalidConfiguration {
            graph_supplied: true,
            rank_fn_supplied: false,
        })
    );

    let only_rank_fn = look_up(
        &index,
        "rust",
        LookupOptions::new().with_rank_fn(&compute_ranks),
    );
    assert_eq!(
        only_rank_fn,
        Err(QueryError::InvalidConfiguration {
            graph_supplied: false,
            rank_fn_supplied: true,
        })
    );
}

#[test]
fn test_ranked_lookup_sorted_by_rank() {
    let (index, graph) = crawl("home", corpus());
    let ranks = compute_ranks(&graph);

    let ranked = look_up(
        &index,
        "rust",
        LookupOptions::new()
            .with_graph(&graph)
            .with_rank_fn(&compute_ranks),
    )
    .unwrap()
    .unwrap();

    // "orphan" is never linked, so it was never crawled and has no rank
    assert_eq!(ranked.len(), 3);
    let scores: Vec<f64> = ranked.iter().map(|id| ranks.get(id).unwrap()).collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));

    // home is linked from both other pages
    assert_eq!(ranked[0], "home");
}

#[test]
fn test_each_crawled_document_is_one_graph_key() {
    let output = Crawler::new(corpus()).run("home");

    let keys: Vec<&str> = output.graph.documents().collect();
    assert_eq!(keys.len(), 3);
    for id in ["home", "guide", "blog"] {
        assert_eq!(keys.iter().filter(|key| **key == id).count(), 1);
    }

    // "rust" appears twice in blog but is recorded once
    let rust = output.index.lookup("rust").unwrap();
    assert_eq!(rust.iter().filter(|id| *id == "blog").count(), 1);
}

#[test]
fn test_rank_strategies_agree_on_crawled_graph() {
    let (_index, graph) = crawl("home", corpus());

    let naive = compute_ranks(&graph);
    let in_links = compute_ranks_with(
        &graph,
        &RankConfig {
            propagation: Propagation::InLinks,
            parallel: true,
            ..RankConfig::default()
        },
    );

    assert_eq!(naive, in_links);
    assert!((naive.total() - 1.0).abs() < 1e-9);
}

#[test]
fn test_ranked_lookup_with_custom_rank_fn() {
    let (index, graph) = crawl("home", corpus());

    // Reverse alphabetical scores
    let by_name = |graph: &LinkGraph| -> RankVector {
        graph
            .documents()
            .map(|id| (id.to_string(), f64::from(u32::from(id.as_bytes()[0]))))
            .collect::<std::collections::HashMap<_, _>>()
            .into()
    };

    let ranked = ranked_lookup(&index, "rust", &graph, &by_name);
    assert_eq!(ranked, vec!["home", "guide", "blog"]);
}
