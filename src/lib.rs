//! # Archivist (library root)
//!
//! Core plumbing for the **Archivist** research agent:
//! - Persistent, embedding-backed document memory (`store`, `embedding`).
//! - The bounded decision/action research loop (`agent`, `decision`).
//! - External corpus search over the arXiv feed (`corpus`).
//! - Report artifacts and progress notification (`report`, `notify`).
//! - CLI parsing and configuration (`commands`, `config`).
//!
//! The store and the loop are deliberately single-threaded: the controller
//! owns the store exclusively during a run, and each step completes its
//! externally visible side effects (persistence, network calls) before the
//! next one begins.
//!
//! ## Modules
//! - [`agent`], [`commands`], [`config`], [`corpus`], [`decision`],
//!   [`embedding`], [`error`], [`notify`], [`report`], [`store`]

use directories::ProjectDirs;
use std::error::Error;

pub mod agent;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod decision;
pub mod embedding;
pub mod error;
pub mod notify;
pub mod report;
pub mod store;

/// Return the per-platform configuration directory used by Archivist.
///
/// Uses [`directories::ProjectDirs`] so the right place is picked on each
/// OS (e.g. `~/.config/archivist` on Linux). The directory is **not**
/// created by this function; callers that need it should create it with
/// `fs::create_dir_all`.
///
/// # Errors
/// Returns an error if the platform configuration directory cannot be
/// determined (rare, but possible in heavily sandboxed environments).
pub fn config_dir() -> Result<std::path::PathBuf, Box<dyn Error>> {
    let proj_dirs = ProjectDirs::from("dev", "archivist", "archivist")
        .ok_or("Unable to determine config directory")?;
    Ok(proj_dirs.config_dir().to_path_buf())
}
