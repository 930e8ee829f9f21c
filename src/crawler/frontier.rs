//! Pending frontier of discovered-but-not-yet-fetched identifiers
//!
//! The frontier is a stack: the most recently added identifier is popped
//! first, giving a depth-first crawl order. A hash set mirrors the stack so
//! membership checks during merges are O(1).

use std::collections::HashSet;

/// Ordered, duplicate-free collection of identifiers waiting to be fetched
///
/// Uniqueness is only enforced against identifiers currently pending. An
/// identifier that was already popped (and visited) may be merged again; the
/// crawler discards it when it is popped a second time.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// Pending identifiers, next to pop at the end
    stack: Vec<String>,

    /// Membership mirror of `stack`
    pending: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only `seed`
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed.into());
        frontier
    }

    /// Appends `id` unless it is already pending
    ///
    /// # Returns
    ///
    /// `true` if the identifier was added
    pub fn push(&mut self, id: String) -> bool {
        if self.pending.contains(&id) {
            return false;
        }
        self.pending.insert(id.clone());
        self.stack.push(id);
        true
    }

    /// Set-union merge of `links`, preserving their order
    ///
    /// # Returns
    ///
    /// The number of identifiers actually added
    pub fn merge<'a, I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        links
            .into_iter()
            .filter(|link| self.push((*link).clone()))
            .count()
    }

    /// Removes and returns the most recently added identifier
    pub fn pop(&mut self) -> Option<String> {
        let id = self.stack.pop()?;
        self.pending.remove(&id);
        Some(id)
    }

    /// Returns true if `id` is currently pending
    pub fn contains(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    /// Returns the number of pending identifiers
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of pending identifiers that are not in `visited`
    ///
    /// Pending entries that were already visited would be discarded when
    /// popped, so they are not outstanding work.
    pub fn unvisited_len(&self, visited: &HashSet<String>) -> usize {
        self.stack.iter().filter(|id| !visited.contains(*id)).count()
    }
}
