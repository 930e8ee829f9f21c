//! Document fetcher implementations
//!
//! The crawler only sees the [`Fetcher`] contract: given an identifier,
//! return its raw content, or an empty string on any failure. Fetchers never
//! raise; an empty string from a failed fetch is indistinguishable from a
//! genuinely empty document.

use crate::config::{FetcherConfig, UserAgentConfig};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Retrieves raw document content by identifier
pub trait Fetcher: Send + Sync {
    /// Returns the raw content of `id`, or `""` if it could not be retrieved
    fn fetch(&self, id: &str) -> String;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn fetch(&self, id: &str) -> String {
        self(id)
    }
}

/// Fetches documents over HTTP(S)
///
/// Transport errors, timeouts, non-success statuses and unreadable bodies all
/// yield an empty string.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher around an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        fetcher: &FetcherConfig,
    ) -> Result<Self, reqwest::Error> {
        build_http_client(user_agent, fetcher).map(Self::new)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, id: &str) -> String {
        let response = match self.client.get(id).send() {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Request timeout for {}", id);
                } else if e.is_connect() {
                    tracing::debug!("Connection failed for {}: {}", id, e);
                } else {
                    tracing::debug!("Request failed for {}: {}", id, e);
                }
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}", status.as_u16(), id);
            return String::new();
        }

        match response.bytes() {
            Ok(body) => String::from_utf8_lossy(&body).into_owned(),
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", id, e);
                String::new()
            }
        }
    }
}

/// Serves documents from a fixed in-memory corpus
///
/// Unknown identifiers yield an empty string, like a failed fetch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    documents: HashMap<String, String>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a document
    pub fn with_document(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(id.into(), content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for InMemoryFetcher
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            documents: iter
                .into_iter()
                .map(|(id, content)| (id.into(), content.into()))
                .collect(),
        }
    }
}

impl Fetcher for InMemoryFetcher {
    fn fetch(&self, id: &str) -> String {
        self.documents.get(id).cloned().unwrap_or_default()
    }
}

/// Builds a blocking HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use ripple_search::config::{FetcherConfig, UserAgentConfig};
/// use ripple_search::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "RippleSearch".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
