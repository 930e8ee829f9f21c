use std::collections::{HashMap, HashSet};

/// Adjacency mapping from document identifier to its outbound links
///
/// Keys are kept in insertion (crawl) order so every traversal of the graph,
/// and therefore every rank computation, is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    order: Vec<String>,
    links: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `outbound` as the links of `id`
    ///
    /// A document keeps its first position in the key order; recording it
    /// again replaces its links.
    pub fn insert(&mut self, id: impl Into<String>, outbound: Vec<String>) {
        let id = id.into();
        if !self.links.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.links.insert(id, outbound);
    }

    /// Returns the outbound links of `id`, if it is a key
    pub fn links(&self, id: &str) -> Option<&[String]> {
        self.links.get(id).map(Vec::as_slice)
    }

    /// Returns true if `id` is a key of the graph
    pub fn contains(&self, id: &str) -> bool {
        self.links.contains_key(id)
    }

    /// Number of keys (fetched documents)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no document has been recorded
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in insertion order
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(document, outbound links)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().map(move |id| {
            let outbound = self.links.get(id).map(Vec::as_slice).unwrap_or(&[]);
            (id.as_str(), outbound)
        })
    }

    /// Length of the recorded link sequence of `id`, duplicates and dangling
    /// links included; zero for unknown documents
    pub fn out_degree(&self, id: &str) -> usize {
        self.links.get(id).map_or(0, Vec::len)
    }

    /// Total number of recorded links
    pub fn edge_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// Number of recorded links whose target is not a key
    pub fn dangling_count(&self) -> usize {
        self.links
            .values()
            .flatten()
            .filter(|target| !self.links.contains_key(target.as_str()))
            .count()
    }

    /// Builds the reverse adjacency: for every key, the keys linking to it
    ///
    /// A source appears at most once per target even when it links there
    /// several times, and sources are listed in key order. Summing over this
    /// list visits contributors in exactly the order a full scan of the graph
    /// would.
    pub fn in_links(&self) -> HashMap<&str, Vec<&str>> {
        let mut reverse: HashMap<&str, Vec<&str>> =
            self.order.iter().map(|id| (id.as_str(), Vec::new())).collect();

        for (source, outbound) in self.iter() {
            let mut seen: HashSet<&str> = HashSet::new();
            for target in outbound {
                if !seen.insert(target.as_str()) {
                    continue;
                }
                if let Some(sources) = reverse.get_mut(target.as_str()) {
                    sources.push(source);
                }
            }
        }

        reverse
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for LinkGraph {
    fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (id, outbound) in iter {
            graph.insert(id, outbound);
        }
        graph
    }
}
