//! Loading and handling of the application's configuration.
//!
//! Defines the [`ArchivistConfig`] struct holding every knob the agent and
//! store need, and a [`load_config`] function that reads it from a YAML file.
//!
//! # Examples
//!
//! ```no_run
//! use archivist::config::{ArchivistConfig, load_config};
//!
//! let config: ArchivistConfig = load_config("/path/to/config.yaml").unwrap();
//! println!("{:?}", config);
//! ```

use serde::{Deserialize, Serialize};
use std::{error::Error, fs};

/// Represents the application's configuration.
///
/// Constructed by loading a YAML file with [`load_config`], or via
/// [`ArchivistConfig::default`] when `archivist init` writes the starter
/// config.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ArchivistConfig {
    /// Base URL of the OpenAI-compatible chat API (e.g. Ollama's `/v1`).
    pub api_base: String,

    /// API key for the chat API. Local backends ignore it but the client
    /// requires one.
    pub api_key: String,

    /// Chat model queried for decisions.
    pub model: String,

    /// Base URL of the native Ollama API used for embeddings.
    pub ollama_base: String,

    /// Primary embedding model.
    pub embedding_model: String,

    /// Embedding model used when the primary is missing or failing.
    pub embedding_fallback_model: String,

    /// Path of the persisted knowledge store file.
    pub store_path: String,

    /// Directory where `ANALYZE` reports are written.
    pub report_dir: String,

    /// Step budget for a research run.
    pub max_steps: usize,

    /// Maximum number of results requested per corpus search.
    pub arxiv_max_results: usize,

    /// Per-request timeout for all outbound HTTP calls, in seconds.
    pub request_timeout_secs: u64,

    /// Optional Discord webhook receiving progress updates and reports.
    pub discord_webhook_url: Option<String>,
}

impl Default for ArchivistConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:11434/v1".to_string(),
            api_key: "ollama".to_string(),
            model: "llama3.2".to_string(),
            ollama_base: "http://127.0.0.1:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            embedding_fallback_model: "all-minilm".to_string(),
            store_path: "brain.json".to_string(),
            report_dir: "reports".to_string(),
            max_steps: 100,
            arxiv_max_results: 5,
            request_timeout_secs: 60,
            discord_webhook_url: None,
        }
    }
}

/// Loads the application's configuration from a YAML file.
///
/// # Parameters
///
/// - `file`: The path to the YAML configuration file.
///
/// # Returns
///
/// - `Ok(ArchivistConfig)`: The loaded configuration.
/// - `Err(Box<dyn Error>)`: An error occurred while reading the file or
///   parsing the YAML.
pub fn load_config(file: &str) -> Result<ArchivistConfig, Box<dyn Error>> {
    let content = fs::read_to_string(file)?;
    let config: ArchivistConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}
