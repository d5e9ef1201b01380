//! Ranking core for ad-hoc search over a small uploaded document set.
//!
//! [`build_index`] fits a TF-IDF vector space on the raw document texts,
//! [`search`] ranks every document against a query by cosine similarity, and
//! [`highlight`] marks the query phrase in text picked for display.

pub mod cache;
pub mod error;
pub mod highlight;
pub mod index;
pub mod normalize;
pub mod query;
pub mod search;
pub mod tokenizer;
pub mod vectorizer;

pub use cache::IndexCache;
pub use error::{Error, Result};
pub use highlight::{highlight, highlight_with};
pub use index::{DocId, Index, Posting, SparseVector, TermId, TermWeight, Vocabulary};
pub use normalize::{clean_text, snippet, SNIPPET_CHARS};
pub use query::QueryVector;
pub use search::{search, validate_query, ScoredResult};
pub use vectorizer::{build_index, DocFrequency, VectorizerConfig};
