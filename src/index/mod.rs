//! Inverted index module
//!
//! Maps whitespace-delimited, case-sensitive tokens to the documents whose
//! plain text contains them.

mod inverted;

pub use inverted::InvertedIndex;
