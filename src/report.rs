//! Report artifacts produced by the `ANALYZE` action.
//!
//! A report is a timestamped Markdown file: a heading derived from the wall
//! clock plus the raw synthesized text. Reports are durable the moment they
//! are written; a later step failing does not un-write them.

use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `body` as a timestamped Markdown report under `dir`.
///
/// Creates `dir` if needed. The filename is deterministic from the current
/// wall-clock time: `Report_<%Y%m%d_%H%M%S>.md`.
///
/// # Returns
/// The path of the written report.
pub fn write_report(dir: impl AsRef<Path>, body: &str) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = dir.join(format!("Report_{timestamp}.md"));
    fs::write(&path, format!("# Research Report {timestamp}\n\n{body}"))?;

    info!(path = %path.display(), "report written");
    Ok(path)
}
