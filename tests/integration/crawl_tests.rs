//! Integration tests for the HTTP crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use ripple_search::config::{Config, CrawlerConfig, FetcherConfig, UserAgentConfig};
use ripple_search::crawler::{run_crawl, CrawlOutput};
use ripple_search::rank::compute_ranks;
use ripple_search::state::CrawlState;
use ripple_search::RankConfig;
use std::collections::HashSet;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "TestBot/1.0.0 (+https://example.com/contact; test@example.com)";

/// Creates a test configuration crawling from `seed`
fn create_test_config(seed: String, max_pages: Option<usize>, concurrency: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed,
            max_pages,
            concurrency,
        },
        fetcher: FetcherConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        rank: RankConfig::default(),
    }
}

/// Runs the crawl on a plain OS thread
///
/// The blocking HTTP client and the concurrent driver's own runtime must both
/// live outside the test's runtime.
async fn crawl_over_http(config: Config) -> CrawlOutput {
    tokio::task::spawn_blocking(move || {
        std::thread::spawn(move || run_crawl(&config))
            .join()
            .expect("crawl thread panicked")
    })
    .await
    .expect("blocking task failed")
    .expect("crawl failed")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

/// Mounts a small site: / -> page1, page2; page1 -> /; page2 -> missing
async fn mount_site(mock_server: &MockServer) {
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&format!(
            r#"<html><body><p>welcome home</p>
            <a href="{base_url}/page1">Page 1</a>
            <a href="{base_url}/page2">Page 2</a>
            </body></html>"#
        )))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(&format!(
            r#"<html><body><p>first page</p> <a href="{base_url}/">Home</a></body></html>"#
        )))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(&format!(
            r#"<html><body><p>second page</p> <a href="{base_url}/missing">Gone</a></body></html>"#
        )))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let config = create_test_config(format!("{base_url}/"), None, 1);
    let output = crawl_over_http(config).await;

    let home = format!("{base_url}/");
    let page1 = format!("{base_url}/page1");
    let page2 = format!("{base_url}/page2");
    let missing = format!("{base_url}/missing");

    // Depth-first: page2 was merged last so it is visited right after the seed
    let order: Vec<&str> = output.graph.documents().collect();
    assert_eq!(
        order,
        vec![home.as_str(), page2.as_str(), missing.as_str(), page1.as_str()]
    );

    assert_eq!(output.graph.links(&home).unwrap(), &[page1.clone(), page2.clone()]);
    assert_eq!(output.graph.links(&missing).unwrap().len(), 0);

    assert_eq!(output.index.lookup("welcome").unwrap(), &[home.clone()]);
    let pages: HashSet<&String> = output.index.lookup("page").unwrap().iter().collect();
    assert_eq!(pages, HashSet::from([&page1, &page2]));

    assert_eq!(output.summary.documents_visited, 4);
    assert_eq!(output.summary.empty_documents, 1);
    assert_eq!(output.summary.state, CrawlState::Done);
}

#[tokio::test]
async fn test_crawl_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    // Only a correctly identified request gets content
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(html("<p>identified</p>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/", mock_server.uri()), None, 1);
    let output = crawl_over_http(config).await;

    assert!(output.index.contains_token("identified"));
    assert_eq!(output.summary.empty_documents, 0);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_document() {
    // Nothing listens on the discard port
    let config = create_test_config("http://127.0.0.1:9/".to_string(), None, 1);
    let output = crawl_over_http(config).await;

    assert_eq!(output.graph.len(), 1);
    assert_eq!(output.graph.links("http://127.0.0.1:9/").unwrap().len(), 0);
    assert!(output.index.is_empty());
    assert_eq!(output.summary.empty_documents, 1);
}

#[tokio::test]
async fn test_max_pages_caps_http_crawl() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(format!("{}/", mock_server.uri()), Some(2), 1);
    let output = crawl_over_http(config).await;

    assert_eq!(output.graph.len(), 2);
    assert!(output.summary.truncated);
    // page1 from the seed and missing from page2 are still pending
    assert_eq!(output.summary.frontier_remaining, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_crawl_matches_sequential() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let seed = format!("{}/", mock_server.uri());

    let sequential = crawl_over_http(create_test_config(seed.clone(), None, 1)).await;
    let concurrent = crawl_over_http(create_test_config(seed, None, 4)).await;

    let sequential_docs: HashSet<&str> = sequential.graph.documents().collect();
    let concurrent_docs: HashSet<&str> = concurrent.graph.documents().collect();
    assert_eq!(sequential_docs, concurrent_docs);

    for document in &sequential_docs {
        assert_eq!(
            sequential.graph.links(document),
            concurrent.graph.links(document)
        );
    }

    let mut sequential_tokens: Vec<&str> = sequential.index.iter().map(|(t, _)| t).collect();
    let mut concurrent_tokens: Vec<&str> = concurrent.index.iter().map(|(t, _)| t).collect();
    sequential_tokens.sort_unstable();
    concurrent_tokens.sort_unstable();
    assert_eq!(sequential_tokens, concurrent_tokens);

    assert_eq!(concurrent.summary.documents_visited, 4);
}

#[tokio::test]
async fn test_crawled_site_ranks_sum_to_one() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // A closed cycle: / -> a -> b -> /
    for (from, to) in [("/", "/a"), ("/a", "/b"), ("/b", "/")] {
        Mock::given(method("GET"))
            .and(path(from))
            .respond_with(html(&format!(r#"<a href="{base_url}{to}">next</a>"#)))
            .mount(&mock_server)
            .await;
    }

    let output = crawl_over_http(create_test_config(format!("{base_url}/"), None, 1)).await;
    let ranks = compute_ranks(&output.graph);

    assert_eq!(ranks.len(), 3);
    assert!((ranks.total() - 1.0).abs() < 1e-9);
    for (_, rank) in ranks.iter() {
        assert!((rank - 1.0 / 3.0).abs() < 1e-9);
    }
}
