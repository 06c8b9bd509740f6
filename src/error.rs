//! Error types for the knowledge store.
//!
//! Transient collaborator failures (embedding backend, corpus feed, webhook)
//! are absorbed at their calling boundary and surface as empty vectors,
//! empty result sets, or context messages. The variants here cover the
//! failures for which no sane continuation exists, plus invalid-argument
//! cases a caller can act on.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by [`KnowledgeStore`](crate::store::KnowledgeStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but could not be parsed. Fatal at load time:
    /// the store refuses to masquerade a corrupt collection as empty.
    #[error("knowledge store at {path} is corrupt: {source}")]
    Corrupt {
        /// Path of the unreadable store file.
        path: PathBuf,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure while loading or persisting the collection.
    #[error("knowledge store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The collection could not be serialized for persistence.
    #[error("failed to serialize knowledge store: {0}")]
    Serialize(#[source] serde_json::Error),

    /// `ingest` was called with empty (or whitespace-only) text.
    #[error("cannot ingest empty text")]
    EmptyText,
}
