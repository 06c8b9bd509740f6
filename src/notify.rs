//! Progress notification sink.
//!
//! The agent offers its thoughts, actions, and finished reports to an
//! optional sink. Delivery is best-effort: a failing sink is logged by the
//! caller and never alters the run.

use async_trait::async_trait;
use serde_json::json;
use std::error::Error;
use std::time::Duration;

/// Maximum message length Discord accepts, with headroom for the
/// truncation marker.
const MAX_CONTENT_LEN: usize = 1900;

/// A best-effort sink for progress messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one message.
    async fn notify(&self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Truncates `content` at a char boundary, appending a marker when cut.
fn truncate_content(content: &str) -> String {
    if content.chars().count() <= MAX_CONTENT_LEN {
        return content.to_string();
    }
    let cut: String = content.chars().take(MAX_CONTENT_LEN).collect();
    format!("{cut}... (truncated)")
}

/// [`Notifier`] posting to a Discord webhook.
pub struct DiscordWebhook {
    http: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    /// Creates a webhook notifier with a per-request `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify(&self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.http
            .post(&self.url)
            .json(&json!({ "content": truncate_content(content) }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    #[test]
    fn short_content_passes_through() {
        assert_eq!(truncate_content("hello"), "hello");
    }

    #[test]
    fn long_content_is_truncated_with_marker() {
        let long = "x".repeat(5000);
        let truncated = truncate_content(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("... (truncated)"));
        assert_eq!(truncated.chars().count(), MAX_CONTENT_LEN + 15);
    }

    #[tokio::test]
    async fn posts_json_content_to_webhook() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/webhook")
                .body_includes("\"content\":\"Memory saved.\"");
            then.status(204);
        });

        let webhook =
            DiscordWebhook::new(&server.url("/webhook"), Duration::from_secs(5)).unwrap();
        webhook.notify("Memory saved.").await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/webhook");
            then.status(429);
        });

        let webhook =
            DiscordWebhook::new(&server.url("/webhook"), Duration::from_secs(5)).unwrap();
        assert!(webhook.notify("anything").await.is_err());
    }
}
