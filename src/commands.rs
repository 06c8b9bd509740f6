//! Command-line interface definitions, built with `clap`.
//!
//! Provides the [`Cli`] struct for parsed arguments and the [`Commands`]
//! enum covering the available subcommands.

use clap::{Parser, Subcommand};

/// Represents the parsed command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, propagate_version = true, color = clap::ColorChoice::Always)]
pub struct Cli {
    /// The parsed subcommand and its options.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available subcommands and their options.
#[derive(Subcommand, Debug)]
#[command(about, long_about = None, color = clap::ColorChoice::Always)]
pub enum Commands {
    /// Run a research mission. With a topic, the agent is directed to
    /// synthesize a report immediately; without one it explores.
    #[clap(name = "run", alias = "r")]
    Run {
        /// Optional focused topic for a directed run.
        topic: Option<String>,

        /// Override the configured step budget.
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Memorize a piece of text into the knowledge store.
    #[clap(name = "ingest")]
    Ingest {
        /// The text to memorize.
        text: String,
    },

    /// Recall memories similar to the given text.
    #[clap(name = "query", alias = "q")]
    Query {
        /// The retrieval query.
        text: String,

        /// Number of memories to recall.
        #[arg(short = 'k', long, default_value_t = 3)]
        k: usize,
    },

    /// Write a default `config.yaml` under the platform config directory.
    Init,
}
