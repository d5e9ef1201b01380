/// Errors surfaced by the ranking core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// `build_index` was called with no documents.
    #[error("no documents to index")]
    EmptyCorpus,
    /// No term survived stop-word removal and document-frequency pruning.
    #[error("empty vocabulary; {0}")]
    EmptyVocabulary(String),
    /// Query was empty or whitespace only.
    #[error("empty query")]
    InvalidQuery,
    /// Vectorizer options are out of range or contradict each other.
    #[error("invalid vectorizer configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
