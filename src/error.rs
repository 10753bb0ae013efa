//! Error taxonomy for the retrieval core

use thiserror::Error;

/// Result alias used throughout the retrieval core
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors produced by the retrieval core
///
/// Backend failures are absorbed by [`crate::retriever::Retriever`] and
/// degraded to empty results; they exist as a distinct variant so the
/// degradation can be logged instead of silently conflated with
/// "no matches".
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The similarity backend failed to initialize or failed mid-query
    #[error("similarity backend unavailable: {0}")]
    BackendUnavailable(#[source] anyhow::Error),

    /// Ingestion input violated a structural invariant
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl RetrievalError {
    /// Wrap a backend error, preserving the source for logs
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::BackendUnavailable(err.into())
    }
}
