//! # Embedding acquisition
//!
//! Turns text into fixed-length vectors by calling an Ollama backend over
//! HTTP. The backend may have only some models installed, so acquisition is
//! an ordered fallback chain rather than a hard dependency on one model:
//!
//! 1. `POST /api/embed` with the primary model (`{model, input}`).
//! 2. The same request with the configured fallback model.
//! 3. `POST /api/embeddings`, the legacy single-vector endpoint
//!    (`{model, prompt}`).
//!
//! When every attempt fails the result is an **empty vector**, never an
//! error: callers ([`KnowledgeStore`](crate::store::KnowledgeStore)) check
//! for emptiness and degrade gracefully.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Anything that can embed text into a fixed-length vector.
///
/// An empty return value means "no embedding available"; implementations
/// never raise.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds `text`, returning an empty vector when the backend is
    /// unavailable.
    async fn embed(&self, text: &str) -> Vec<f32>;
}

/// Response shape of the modern `/api/embed` endpoint.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Response shape of the legacy `/api/embeddings` endpoint.
#[derive(Debug, Deserialize)]
struct LegacyEmbedResponse {
    embedding: Vec<f32>,
}

/// Ollama-backed [`Embedder`] with the three-stage fallback chain.
pub struct OllamaEmbedder {
    http: reqwest::Client,
    base_url: String,
    model: String,
    fallback_model: String,
}

impl OllamaEmbedder {
    /// Creates an embedder talking to the Ollama API at `base_url`.
    ///
    /// # Parameters
    /// - `base_url`: Base URL without a trailing slash, e.g. `http://127.0.0.1:11434`.
    /// - `model`: Primary embedding model name.
    /// - `fallback_model`: Model tried when the primary fails.
    /// - `timeout`: Per-request timeout; a timed-out request counts as a
    ///   failed attempt and the chain moves on.
    pub fn new(
        base_url: &str,
        model: &str,
        fallback_model: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            fallback_model: fallback_model.to_string(),
        })
    }

    /// One attempt against the modern `/api/embed` endpoint.
    async fn try_embed(&self, model: &str, text: &str) -> Option<Vec<f32>> {
        let url = format!("{}/api/embed", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "model": model, "input": text }))
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!(model, status = %response.status(), "embed request rejected");
            return None;
        }
        let body: EmbedResponse = response.json().await.ok()?;
        body.embeddings.into_iter().next().filter(|v| !v.is_empty())
    }

    /// One attempt against the legacy `/api/embeddings` endpoint.
    async fn try_embed_legacy(&self, model: &str, text: &str) -> Option<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "model": model, "prompt": text }))
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!(model, status = %response.status(), "legacy embed request rejected");
            return None;
        }
        let body: LegacyEmbedResponse = response.json().await.ok()?;
        if body.embedding.is_empty() {
            None
        } else {
            Some(body.embedding)
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Vec<f32> {
        if let Some(vector) = self.try_embed(&self.model, text).await {
            return vector;
        }

        warn!(
            primary = %self.model,
            fallback = %self.fallback_model,
            "primary embedding model failed or missing, trying fallback"
        );
        if let Some(vector) = self.try_embed(&self.fallback_model, text).await {
            return vector;
        }

        warn!("fallback embedding model failed, trying legacy endpoint");
        if let Some(vector) = self.try_embed_legacy(&self.model, text).await {
            return vector;
        }

        error!(
            model = %self.model,
            "all embedding attempts failed; run `ollama pull {}` to fix this",
            self.model
        );
        Vec::new()
    }
}
