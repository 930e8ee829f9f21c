use std::collections::{HashMap, HashSet};

/// Token → documents mapping built while crawling
///
/// Each token's document list holds an identifier at most once, in the order
/// documents were first added under that token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<String>>,
}

impl InvertedIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every whitespace token of `plain_text` as pointing to `id`
    ///
    /// Repeated tokens in one document contribute a single entry, and adding
    /// the same document twice never duplicates it under a token.
    pub fn add_document(&mut self, id: &str, plain_text: &str) {
        let mut seen: HashSet<&str> = HashSet::new();

        for token in plain_text.split_whitespace() {
            if !seen.insert(token) {
                continue;
            }

            let documents = self.postings.entry(token.to_string()).or_default();
            if !documents.iter().any(|d| d == id) {
                documents.push(id.to_string());
            }
        }
    }

    /// Returns the documents recorded for `token`
    ///
    /// `None` means the token was never indexed, which is distinct from an
    /// empty slice.
    pub fn lookup(&self, token: &str) -> Option<&[String]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    /// Returns true if `token` has been indexed
    pub fn contains_token(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of distinct tokens
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Returns true if nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterates over `(token, documents)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.postings
            .iter()
            .map(|(token, documents)| (token.as_str(), documents.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_document_indexes_every_token() {
        let mut index = InvertedIndex::new();
        index.add_document("a", "rust is fast");

        assert_eq!(index.lookup("rust"), Some(&["a".to_string()][..]));
        assert_eq!(index.lookup("is"), Some(&["a".to_string()][..]));
        assert_eq!(index.lookup("fast"), Some(&["a".to_string()][..]));
        assert_eq!(index.token_count(), 3);
    }

    #[test]
    fn test_repeated_token_recorded_once() {
        let mut index = InvertedIndex::new();
        index.add_document("a", "go go go");

        assert_eq!(index.lookup("go").unwrap().len(), 1);
    }

    #[test]
    fn test_same_document_added_twice() {
        let mut index = InvertedIndex::new();
        index.add_document("a", "hello world");
        index.add_document("a", "hello again");

        assert_eq!(index.lookup("hello").unwrap(), &["a".to_string()]);
        assert_eq!(index.lookup("again").unwrap(), &["a".to_string()]);
    }

    #[test]
    fn test_documents_kept_in_insertion_order() {
        let mut index = InvertedIndex::new();
        index.add_document("b", "shared");
        index.add_document("a", "shared");
        index.add_document("c", "shared other");

        assert_eq!(
            index.lookup("shared").unwrap(),
            &["b".to_string(), "a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let mut index = InvertedIndex::new();
        index.add_document("a", "Rust");

        assert!(index.contains_token("Rust"));
        assert!(index.lookup("rust").is_none());
    }

    #[test]
    fn test_whitespace_variants_split() {
        let mut index = InvertedIndex::new();
        index.add_document("a", "one\ttwo\nthree   four");

        for token in ["one", "two", "three", "four"] {
            assert!(index.contains_token(token), "missing {}", token);
        }
        assert_eq!(index.token_count(), 4);
    }

    #[test]
    fn test_empty_text_adds_nothing() {
        let mut index = InvertedIndex::new();
        index.add_document("a", "");
        index.add_document("b", "   \n ");

        assert!(index.is_empty());
    }

    #[test]
    fn test_missing_token_is_absent() {
        let index = InvertedIndex::new();
        assert!(index.lookup("nonexistent_token").is_none());
    }
}
