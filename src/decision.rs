//! # Decisions
//!
//! Each step of the research loop asks a language model for a structured
//! decision: a JSON object `{thought, action, argument}`. The `action` field
//! comes back as free text, so it is closed over an explicit [`Action`] enum
//! with an `Unrecognized` fallback for anything outside the known set.
//!
//! A decision that cannot be obtained or parsed at all is fatal to the run:
//! without a valid action the controller has no way to proceed.

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs, ResponseFormat,
    },
};
use async_trait::async_trait;
use serde::Deserialize;
use std::error::Error;
use tracing::debug;

/// The closed set of actions the agent can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Query the external corpus.
    Search,
    /// Memorize text into the knowledge store.
    Ingest,
    /// Recall prior findings from the knowledge store.
    Query,
    /// Synthesize a report from accumulated findings.
    Analyze,
    /// Terminate the run.
    Finish,
    /// Anything else the model emitted; logged and skipped.
    Unrecognized(String),
}

impl Action {
    /// Parses an action name case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "SEARCH" => Action::Search,
            "INGEST" => Action::Ingest,
            "QUERY" => Action::Query,
            "ANALYZE" => Action::Analyze,
            "FINISH" => Action::Finish,
            _ => Action::Unrecognized(raw.to_string()),
        }
    }
}

/// A single structured decision from the language model.
#[derive(Debug, Clone)]
pub struct Decision {
    /// The model's reasoning, for logs and progress notifications.
    pub thought: String,
    /// What to do next.
    pub action: Action,
    /// Query string (SEARCH/QUERY) or text content (INGEST/ANALYZE).
    pub argument: String,
}

/// Wire shape of the model's JSON output.
#[derive(Debug, Deserialize)]
struct RawDecision {
    #[serde(default)]
    thought: String,
    action: String,
    #[serde(default)]
    argument: String,
}

impl Decision {
    /// Parses the model's raw JSON output into a [`Decision`].
    ///
    /// # Errors
    /// Malformed JSON or a missing `action` field. The caller treats this
    /// as fatal to the run.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDecision = serde_json::from_str(raw)?;
        Ok(Self {
            thought: raw.thought,
            action: Action::parse(&raw.action),
            argument: raw.argument,
        })
    }
}

/// Produces one decision per loop step.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Asks for the next decision given the fixed instructions and the
    /// current context narrative.
    ///
    /// # Errors
    /// Any failure (transport, non-success response, malformed output) is
    /// terminal for the current run. Retries, if any, belong below this
    /// boundary.
    async fn decide(
        &self,
        instructions: &str,
        context: &str,
    ) -> Result<Decision, Box<dyn Error + Send + Sync>>;
}

/// [`DecisionProvider`] backed by an OpenAI-compatible chat endpoint.
pub struct OpenAiDecisionProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiDecisionProvider {
    /// Creates a provider from an API base, key, and model name.
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self {
            client: Client::with_config(openai_config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl DecisionProvider for OpenAiDecisionProvider {
    async fn decide(
        &self,
        instructions: &str,
        context: &str,
    ) -> Result<Decision, Box<dyn Error + Send + Sync>> {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(instructions.to_string()),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(format!(
                    "**CURRENT CONTEXT:**\n{context}\n\n**YOUR RESPONSE (JSON):**"
                )),
                name: None,
            }),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .build()?;

        debug!(model = %self.model, "requesting decision");
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or("decision response contained no content")?;

        Ok(Decision::from_json(&content)?)
    }
}
