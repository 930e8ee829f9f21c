use crate::graph::LinkGraph;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// How contributions from linking documents are gathered in each pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Propagation {
    /// Scan every document's outbound links for each target: O(N²) per pass
    #[default]
    Naive,

    /// Precompute the in-links of every document once: O(E) per pass
    ///
    /// Contributors are summed in the same order as the naive scan, so the
    /// results are bit-identical.
    InLinks,
}

/// Rank computation parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RankConfig {
    /// Probability of following a link rather than teleporting
    pub damping: f64,

    /// Fixed number of propagation passes; convergence is never checked
    pub iterations: u32,

    /// Contribution gathering strategy
    pub propagation: Propagation,

    /// Compute each pass across documents on the rayon pool
    pub parallel: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.8,
            iterations: 10,
            propagation: Propagation::Naive,
            parallel: false,
        }
    }
}

/// Importance score per document of the graph it was computed from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankVector {
    ranks: HashMap<String, f64>,
}

impl RankVector {
    /// Rank of `id`, if it was a key of the graph
    pub fn get(&self, id: &str) -> Option<f64> {
        self.ranks.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ranks.iter().map(|(id, rank)| (id.as_str(), *rank))
    }

    /// Sum of all ranks; below 1 when rank leaked through dangling links
    pub fn total(&self) -> f64 {
        self.ranks.values().sum()
    }

    /// Documents sorted by descending rank, ties broken by identifier
    ///
    /// For display only. Ranked lookups order ties by index insertion order
    /// instead, see [`crate::query::ranked_lookup`].
    pub fn top(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }

    pub fn into_inner(self) -> HashMap<String, f64> {
        self.ranks
    }
}

impl From<HashMap<String, f64>> for RankVector {
    fn from(ranks: HashMap<String, f64>) -> Self {
        Self { ranks }
    }
}

/// Computes ranks with damping 0.8 over 10 passes
///
/// This is the signature expected by ranked lookups, see
/// [`crate::query::ranked_lookup`].
pub fn compute_ranks(graph: &LinkGraph) -> RankVector {
    compute_ranks_with(graph, &RankConfig::default())
}

/// Computes ranks with explicit parameters
///
/// Every document starts at `1/N`. Each pass gives a document
/// `(1 - damping) / N` plus `damping * rank[q] / out_degree(q)` for every
/// document `q` linking to it, where `out_degree` counts dangling links too.
/// Passes are synchronous: all of them read the previous pass only.
///
/// An empty graph yields an empty vector.
pub fn compute_ranks_with(graph: &LinkGraph, config: &RankConfig) -> RankVector {
    let n = graph.len();
    if n == 0 {
        return RankVector::default();
    }

    tracing::debug!(
        documents = n,
        iterations = config.iterations,
        damping = config.damping,
        propagation = ?config.propagation,
        parallel = config.parallel,
        "computing ranks"
    );

    let count = n as f64;
    let base = (1.0 - config.damping) / count;
    let documents: Vec<&str> = graph.documents().collect();
    let in_links = match config.propagation {
        Propagation::Naive => None,
        Propagation::InLinks => Some(graph.in_links()),
    };

    let mut ranks: HashMap<&str, f64> = documents.iter().map(|id| (*id, 1.0 / count)).collect();

    for _ in 0..config.iterations {
        let previous = &ranks;
        let share = |source: &str| -> f64 {
            config.damping * (previous[source] / graph.out_degree(source) as f64)
        };
        let next_rank = |page: &str| -> f64 {
            let mut rank = base;
            match &in_links {
                Some(reverse) => {
                    for source in reverse.get(page).into_iter().flatten() {
                        rank += share(source);
                    }
                }
                None => {
                    for source in documents.iter().filter(|s| links_to(graph, s, page)) {
                        rank += share(source);
                    }
                }
            }
            rank
        };

        let next: HashMap<&str, f64> = if config.parallel {
            documents.par_iter().map(|page| (*page, next_rank(page))).collect()
        } else {
            documents.iter().map(|page| (*page, next_rank(page))).collect()
        };
        ranks = next;
    }

    RankVector {
        ranks: ranks
            .into_iter()
            .map(|(id, rank)| (id.to_string(), rank))
            .collect(),
    }
}

fn links_to(graph: &LinkGraph, source: &str, target: &str) -> bool {
    graph
        .links(source)
        .is_some_and(|outbound| outbound.iter().any(|t| t == target))
}
