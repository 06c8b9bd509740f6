//! # External corpus search
//!
//! Queries the arXiv Atom feed for recent papers matching a query string.
//! Results are small `{title, summary, link}` records; transport and parse
//! failures surface as errors for the agent loop to fold into its context
//! as a negative observation.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::time::Duration;
use tracing::debug;

/// One corpus search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Paper title, whitespace-normalized.
    pub title: String,
    /// Abstract, whitespace-normalized.
    pub summary: String,
    /// Canonical link to the paper.
    pub link: String,
}

/// A searchable external corpus.
#[async_trait]
pub trait CorpusSearch: Send + Sync {
    /// Searches the corpus, returning at most `max_results` entries ranked
    /// by the backend.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CorpusEntry>, Box<dyn Error + Send + Sync>>;
}

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<entry>(.*?)</entry>").unwrap()
});
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<title[^>]*>(.*?)</title>").unwrap()
});
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<summary[^>]*>(.*?)</summary>").unwrap()
});
static ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<id>(.*?)</id>").unwrap()
});

/// Collapses runs of whitespace (the feed hard-wraps titles and abstracts).
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts `{title, summary, link}` records from an arXiv Atom document.
///
/// The feed nests exactly one `<title>`, `<summary>`, and `<id>` per
/// `<entry>`; entries missing any of the three are skipped.
pub fn parse_atom_feed(body: &str) -> Vec<CorpusEntry> {
    ENTRY_RE
        .captures_iter(body)
        .filter_map(|entry| {
            let entry = entry.get(1)?.as_str();
            let title = TITLE_RE.captures(entry)?.get(1)?.as_str();
            let summary = SUMMARY_RE.captures(entry)?.get(1)?.as_str();
            let link = ID_RE.captures(entry)?.get(1)?.as_str();
            Some(CorpusEntry {
                title: normalize_whitespace(title),
                summary: normalize_whitespace(summary),
                link: link.trim().to_string(),
            })
        })
        .collect()
}

/// arXiv-backed [`CorpusSearch`] over the public query API.
pub struct ArxivClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    /// Default endpoint of the public arXiv query API.
    pub const DEFAULT_BASE_URL: &'static str = "http://export.arxiv.org/api/query";

    /// Creates a client against `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl CorpusSearch for ArxivClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CorpusEntry>, Box<dyn Error + Send + Sync>> {
        debug!(query, max_results, "searching arXiv");
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("search_query", query),
                ("start", "0"),
                ("max_results", &max_results.to_string()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(parse_atom_feed(&body))
    }
}
