//! Main module for the Archivist CLI application.
//!
//! Handles command parsing, configuration loading, and wiring of the agent
//! controller, knowledge store, and their collaborators.
//!
//! # Examples
//!
//! Running an open research mission:
//!
//! ```sh
//! archivist run
//! ```
//!
//! Directed research on a topic, then querying what was memorized:
//!
//! ```sh
//! archivist run "neural prosthetics"
//! archivist query "sensory feedback" -k 5
//! ```

use clap::Parser;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::time::Duration;
use std::{env, error::Error, fs};
use tracing::{debug, info};

use archivist::agent::AgentController;
use archivist::commands::{Cli, Commands};
use archivist::config::{ArchivistConfig, load_config};
use archivist::corpus::ArxivClient;
use archivist::decision::OpenAiDecisionProvider;
use archivist::embedding::OllamaEmbedder;
use archivist::notify::DiscordWebhook;
use archivist::store::KnowledgeStore;
use archivist::{config_dir, notify::Notifier};

static TRACING: OnceCell<()> = OnceCell::new();

fn main() -> Result<(), Box<dyn Error>> {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt::init();
    });
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run())
}

/// Main asynchronous function of the Archivist CLI application.
///
/// Loads configuration, parses command-line arguments, and executes the
/// requested command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or a command
/// fails in a way the agent loop does not absorb.
async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        return init();
    }

    let config_path = if env::var("IN_TEST_ENVIRONMENT").is_ok() {
        env::current_dir()?.join("config.yaml")
    } else {
        config_dir()?.join("config.yaml")
    };
    debug!("Loading config from: {}", config_path.display());
    let config = load_config(
        config_path
            .to_str()
            .ok_or("config path is not valid UTF-8")?,
    )?;
    debug!("Config loaded: {:?}", config);

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let embedder = OllamaEmbedder::new(
        &config.ollama_base,
        &config.embedding_model,
        &config.embedding_fallback_model,
        timeout,
    )?;
    let mut store = KnowledgeStore::open(&config.store_path, embedder)?;

    match cli.command {
        Commands::Run { topic, steps } => {
            let provider =
                OpenAiDecisionProvider::new(&config.api_base, &config.api_key, &config.model);
            let corpus = ArxivClient::new(ArxivClient::DEFAULT_BASE_URL, timeout)?;

            let mut agent = AgentController::new(
                provider,
                corpus,
                store,
                &config.report_dir,
                steps.unwrap_or(config.max_steps),
            )
            .with_max_search_results(config.arxiv_max_results);

            if let Some(url) = &config.discord_webhook_url {
                let webhook: Box<dyn Notifier> = Box::new(DiscordWebhook::new(url, timeout)?);
                agent = agent.with_notifier(webhook);
            }

            let outcome = agent.run(topic.as_deref()).await;
            info!(?outcome, "run finished");
            println!(
                "Mission ended after {} step(s): {:?}",
                outcome.steps, outcome.reason
            );
        }
        Commands::Ingest { text } => {
            let mut metadata = HashMap::new();
            metadata.insert("source".to_string(), serde_json::Value::from("manual"));
            if store.ingest(&text, metadata).await? {
                println!("Memorized ({} documents).", store.len());
            } else {
                println!("Not memorized (duplicate, or no embedding available).");
            }
        }
        Commands::Query { text, k } => {
            let hits = store.query(&text, k).await?;
            if hits.is_empty() {
                println!("No relevant memories found.");
            } else {
                for hit in hits {
                    println!("[{}] (score: {:.2}) {}", hit.id, hit.score, hit.text);
                }
            }
        }
        Commands::Init => unreachable!("handled before config load"),
    }

    Ok(())
}

/// Writes a default `config.yaml` under the platform config directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
fn init() -> Result<(), Box<dyn Error>> {
    let config_dir = config_dir()?;
    fs::create_dir_all(&config_dir)?;

    let config_path = config_dir.join("config.yaml");
    info!("Creating config file: {}", config_path.display());
    let config_yaml = serde_yaml::to_string(&ArchivistConfig::default())?;
    fs::write(&config_path, config_yaml)?;

    println!("Wrote {}", config_path.display());
    Ok(())
}
