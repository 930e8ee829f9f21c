//! Query engine module
//!
//! Resolves a keyword against an [`InvertedIndex`], either returning the raw
//! document list or ordering the matches by rank.
//!
//! A lookup is either [`LookupRequest::Plain`] or [`LookupRequest::Ranked`];
//! supplying only half of the ranking inputs is rejected with
//! [`QueryError::InvalidConfiguration`] instead of quietly falling back to a
//! plain lookup.
//!
//! [`InvertedIndex`]: crate::index::InvertedIndex

mod engine;

pub use engine::{
    look_up, lookup, ranked_lookup, ranked_lookup_with_defaults, LookupOptions, LookupRequest,
    RankFn,
};

use thiserror::Error;

/// Errors raised while preparing a lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(
        "Invalid lookup configuration: ranked lookup needs both a graph and a rank function \
         (graph supplied: {graph_supplied}, rank function supplied: {rank_fn_supplied})"
    )]
    InvalidConfiguration {
        graph_supplied: bool,
        rank_fn_supplied: bool,
    },
}
