//! Link graph module
//!
//! Records, for every fetched document, the ordered outbound links found in
//! its raw content. Links to documents that were never fetched are kept as
//! values ("dangling links") but never become keys.

mod link_graph;

pub use link_graph::LinkGraph;
