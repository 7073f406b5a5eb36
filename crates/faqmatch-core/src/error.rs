use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Corpus is empty; no vector space can be built")]
    EmptyCorpus,

    #[error("Unknown matching method '{0}' (expected 'lexical' or 'semantic')")]
    UnknownMethod(String),

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Failed to load corpus from {path}: {reason}")]
    CorpusLoad { path: PathBuf, reason: String },

    #[error("Similarity backend failed")]
    Similarity(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn corpus_load(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::CorpusLoad { path: path.into(), reason: reason.to_string() }
    }

    /// Wraps a failure raised by the semantic similarity collaborator.
    pub fn similarity(err: anyhow::Error) -> Self { Self::Similarity(err.into()) }
}

pub type Result<T> = std::result::Result<T, Error>;
