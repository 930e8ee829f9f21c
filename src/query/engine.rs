use crate::graph::LinkGraph;
use crate::index::InvertedIndex;
use crate::query::QueryError;
use crate::rank::{compute_ranks, RankVector};
use std::fmt;

/// A rank computation usable by ranked lookups, e.g. [`compute_ranks`]
pub type RankFn<'a> = &'a dyn Fn(&LinkGraph) -> RankVector;

/// Optional ranking inputs for [`look_up`]
///
/// Either both fields are set (ranked lookup) or neither is (plain lookup).
#[derive(Clone, Copy, Default)]
pub struct LookupOptions<'a> {
    pub graph: Option<&'a LinkGraph>,
    pub rank_fn: Option<RankFn<'a>>,
}

impl<'a> LookupOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(mut self, graph: &'a LinkGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_rank_fn(mut self, rank_fn: RankFn<'a>) -> Self {
        self.rank_fn = Some(rank_fn);
        self
    }
}

impl fmt::Debug for LookupOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupOptions")
            .field("graph", &self.graph.map(LinkGraph::len))
            .field("rank_fn", &self.rank_fn.is_some())
            .finish()
    }
}

/// A validated lookup
#[derive(Clone, Copy)]
pub enum LookupRequest<'a> {
    /// Return the index's document list as recorded
    Plain { token: &'a str },

    /// Return matching documents ordered by descending rank
    Ranked {
        token: &'a str,
        graph: &'a LinkGraph,
        rank_fn: RankFn<'a>,
    },
}

impl<'a> LookupRequest<'a> {
    /// Builds a request from optional ranking inputs
    ///
    /// # Returns
    ///
    /// * `Ok(LookupRequest::Plain)` - neither graph nor rank function given
    /// * `Ok(LookupRequest::Ranked)` - both given
    /// * `Err(QueryError::InvalidConfiguration)` - only one of them given
    pub fn from_options(token: &'a str, options: LookupOptions<'a>) -> Result<Self, QueryError> {
        match (options.graph, options.rank_fn) {
            (None, None) => Ok(Self::Plain { token }),
            (Some(graph), Some(rank_fn)) => Ok(Self::Ranked {
                token,
                graph,
                rank_fn,
            }),
            (graph, rank_fn) => {
                tracing::warn!(
                    token,
                    graph_supplied = graph.is_some(),
                    rank_fn_supplied = rank_fn.is_some(),
                    "rejecting partial ranking configuration"
                );
                Err(QueryError::InvalidConfiguration {
                    graph_supplied: graph.is_some(),
                    rank_fn_supplied: rank_fn.is_some(),
                })
            }
        }
    }

    pub fn token(&self) -> &'a str {
        match *self {
            Self::Plain { token } | Self::Ranked { token, .. } => token,
        }
    }

    /// Runs the request against `index`
    ///
    /// Plain requests return `None` for a token that was never indexed.
    /// Ranked requests always return `Some`, empty when the token is unknown.
    pub fn execute(&self, index: &InvertedIndex) -> Option<Vec<String>> {
        match *self {
            Self::Plain { token } => lookup(index, token).map(<[String]>::to_vec),
            Self::Ranked {
                token,
                graph,
                rank_fn,
            } => Some(ranked_lookup(index, token, graph, rank_fn)),
        }
    }
}

impl fmt::Debug for LookupRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain { token } => f.debug_struct("Plain").field("token", token).finish(),
            Self::Ranked { token, graph, .. } => f
                .debug_struct("Ranked")
                .field("token", token)
                .field("graph_documents", &graph.len())
                .finish_non_exhaustive(),
        }
    }
}

/// Single entry point selecting plain or ranked lookup from `options`
pub fn look_up(
    index: &InvertedIndex,
    token: &str,
    options: LookupOptions<'_>,
) -> Result<Option<Vec<String>>, QueryError> {
    let request = LookupRequest::from_options(token, options)?;
    Ok(request.execute(index))
}

/// Plain lookup: the recorded documents for `token`, or `None` if absent
pub fn lookup<'i>(index: &'i InvertedIndex, token: &str) -> Option<&'i [String]> {
    index.lookup(token)
}

/// Ranked lookup: documents containing `token`, highest rank first
///
/// Ranks are recomputed from `graph` on every call. Documents missing from
/// the rank vector are dropped. Equal ranks keep index insertion order.
pub fn ranked_lookup(
    index: &InvertedIndex,
    token: &str,
    graph: &LinkGraph,
    rank_fn: &dyn Fn(&LinkGraph) -> RankVector,
) -> Vec<String> {
    let Some(documents) = index.lookup(token) else {
        return Vec::new();
    };

    let ranks = rank_fn(graph);
    let mut scored: Vec<(&String, f64)> = documents
        .iter()
        .filter_map(|id| ranks.get(id).map(|rank| (id, rank)))
        .collect();

    // Stable sort keeps insertion order among exactly equal ranks
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    tracing::debug!(token, matches = scored.len(), "ranked lookup");

    scored.into_iter().map(|(id, _)| id.clone()).collect()
}

/// Ranked lookup using [`compute_ranks`] with its default parameters
pub fn ranked_lookup_with_defaults(
    index: &InvertedIndex,
    token: &str,
    graph: &LinkGraph,
) -> Vec<String> {
    ranked_lookup(index, token, graph, &compute_ranks)
}
