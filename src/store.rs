//! # KnowledgeStore
//!
//! Persistent embedding-backed document memory.
//!
//! The store owns a flat collection of [`Document`]s, each carrying its text,
//! open metadata, and the embedding computed at ingest time. The whole
//! collection lives in a single JSON file that is rewritten atomically after
//! every successful ingest, so a reader never observes a partial write and
//! each ingest is durable before it returns.
//!
//! ## Responsibilities
//! - **Deduplication**: exact `text` match; a duplicate ingest is a no-op.
//! - **Persistence**: load-on-open, full rewrite after each ingest.
//! - **Retrieval**: cosine-ranked linear scan over all documents, top-`k`.
//!
//! Retrieval is O(documents) per query, which is fine at personal-corpus
//! scale; an ANN index is the upgrade path if that stops being true.
//!
//! ## Quick Example
//! ```no_run
//! # use archivist::store::KnowledgeStore;
//! # use archivist::embedding::OllamaEmbedder;
//! # use std::time::Duration;
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = OllamaEmbedder::new(
//!     "http://127.0.0.1:11434", "nomic-embed-text", "all-minilm",
//!     Duration::from_secs(30),
//! )?;
//! let mut store = KnowledgeStore::open("brain.json", embedder)?;
//! store.ingest("Rust is great!", Default::default()).await?;
//! let hits = store.query("systems languages", 3).await?;
//! println!("top hit: {:?}", hits.first());
//! # Ok(()) }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::embedding::Embedder;
use crate::error::StoreError;

/// A memorized piece of text with its embedding and provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, `doc_<n>`, assigned in insertion order.
    pub id: String,
    /// The memorized content; also the deduplication key.
    pub text: String,
    /// Open mapping for provenance tags and the like; no schema enforced.
    pub metadata: HashMap<String, JsonValue>,
    /// Embedding computed at ingest time. Never empty once stored.
    pub embedding: Vec<f32>,
}

/// A query result: a document ranked against the query embedding, with the
/// raw embedding stripped so callers never see vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    /// Identifier of the matched document.
    pub id: String,
    /// The memorized content.
    pub text: String,
    /// The document's metadata.
    pub metadata: HashMap<String, JsonValue>,
    /// Cosine similarity against the query embedding, in `[-1, 1]`.
    pub score: f32,
}

/// Persistent document memory backed by an [`Embedder`].
///
/// Not designed for concurrent writers: `ingest` takes `&mut self` and the
/// borrow checker enforces the single-writer rule. A caller embedding the
/// store in a concurrent service must serialize mutations behind one
/// exclusive lock.
pub struct KnowledgeStore<E: Embedder> {
    path: PathBuf,
    documents: Vec<Document>,
    embedder: E,
}

impl<E: Embedder> KnowledgeStore<E> {
    /// Opens the store at `path`, loading the persisted collection.
    ///
    /// A missing file yields an empty collection. A file that exists but
    /// cannot be parsed is a fatal [`StoreError::Corrupt`]: the store
    /// refuses to silently drop data.
    pub fn open(path: impl AsRef<Path>, embedder: E) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let documents = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let documents: Vec<Document> =
                serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                })?;
            info!(count = documents.len(), path = %path.display(), "loaded knowledge store");
            documents
        } else {
            info!(path = %path.display(), "no existing knowledge store, starting fresh");
            Vec::new()
        };

        Ok(Self {
            path,
            documents,
            embedder,
        })
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Serializes the full collection and atomically replaces the backing
    /// file. A reader never observes a partially written store.
    fn save(&self) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(&self.documents).map_err(StoreError::Serialize)?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let temp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new_in(".")?,
        };
        fs::write(temp.path(), json)?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(count = self.documents.len(), path = %self.path.display(), "saved knowledge store");
        Ok(())
    }

    /// Dimensionality established by the first stored document, if any.
    fn dimension(&self) -> Option<usize> {
        self.documents.first().map(|d| d.embedding.len())
    }

    /// Memorizes `text`, returning whether a new document was inserted.
    ///
    /// - Duplicate `text` is an idempotent no-op (`Ok(false)`), checked
    ///   before any embedding call.
    /// - A failed embedding (empty vector after every fallback) yields
    ///   `Ok(false)`: a document is never stored without an embedding.
    /// - An embedding whose length disagrees with the store's established
    ///   dimensionality (a fallback-model switch between ingests) is
    ///   rejected with `Ok(false)`; the store never mixes dimensionalities.
    /// - Otherwise the document is assigned the next sequential id,
    ///   appended, and durably persisted before `Ok(true)` is returned.
    ///
    /// # Errors
    /// [`StoreError::EmptyText`] for empty or whitespace-only input, and
    /// persistence failures from the durable write.
    pub async fn ingest(
        &mut self,
        text: &str,
        metadata: HashMap<String, JsonValue>,
    ) -> Result<bool, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }

        if self.documents.iter().any(|doc| doc.text == text) {
            debug!("skipping ingest of duplicate text");
            return Ok(false);
        }

        let embedding = self.embedder.embed(text).await;
        if embedding.is_empty() {
            warn!("ingest failed: no embedding available");
            return Ok(false);
        }

        if let Some(dimension) = self.dimension() {
            if embedding.len() != dimension {
                warn!(
                    expected = dimension,
                    got = embedding.len(),
                    "ingest rejected: embedding dimensionality disagrees with store"
                );
                return Ok(false);
            }
        }

        let document = Document {
            id: format!("doc_{}", self.documents.len() + 1),
            text: text.to_string(),
            metadata,
            embedding,
        };
        self.documents.push(document);
        self.save()?;
        Ok(true)
    }

    /// Ranks stored documents against `text` and returns the top `k`.
    ///
    /// `k == 0` short-circuits to an empty result without an embedding
    /// call. A failed query embedding also yields an empty result rather
    /// than an error. Results are sorted by strictly non-increasing score; equal
    /// scores keep insertion order.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredDocument>, StoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(text).await;
        if query_embedding.is_empty() {
            warn!("query embedding unavailable, returning no memories");
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, &Document)> = self
            .documents
            .iter()
            .map(|doc| (cosine_similarity(&query_embedding, &doc.embedding), doc))
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, doc)| ScoredDocument {
                id: doc.id.clone(),
                text: doc.text.clone(),
                metadata: doc.metadata.clone(),
                score,
            })
            .collect())
    }
}

/// Cosine similarity between two vectors: `dot(a,b) / (|a| * |b|)`.
///
/// Returns `0.0` when either vector is empty or zero-magnitude, or when the
/// lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
