//! # Agent control loop
//!
//! A bounded, single-threaded decision loop. Each step asks the language
//! model for a structured decision given the latest context narrative,
//! executes it against the knowledge store or the external corpus, and
//! replaces the context with the new observation. The loop runs until the
//! model decides to `FINISH` or the step budget runs out.
//!
//! Collaborator failures (search, notification, persistence) fold into the
//! context as negative observations and the loop continues; only a decision
//! that cannot be obtained or parsed ends the run, since without a valid
//! action there is no way to proceed.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tracing::{error, info, warn};

use crate::corpus::{CorpusEntry, CorpusSearch};
use crate::decision::{Action, DecisionProvider};
use crate::embedding::Embedder;
use crate::notify::Notifier;
use crate::report::write_report;
use crate::store::KnowledgeStore;

/// Fixed instructions sent with every decision request.
pub const SYSTEM_PROMPT: &str = r#"You are an autonomous research archivist. You are equipped with a persistent memory that lets you MEMORIZE findings and RECALL them later.

**MISSION:** scour the available corpus for noteworthy advancements on your assigned topics, memorize the best findings, and synthesize reports.

**YOUR CAPABILITIES:**
1. **SEARCH**: Query the paper corpus for new publications.
2. **INGEST**: Memorize a specific text (e.g., an abstract) into your memory.
3. **QUERY**: Ask your memory for information you previously saved.
4. **ANALYZE**: Synthesize your findings into a report.
5. **FINISH**: End the mission.

**WORKFLOW:**
1. Look at the current context: what have you found so far?
2. Decide one action:
   - New topic? -> SEARCH.
   - Found something good? -> INGEST it.
   - Need to connect dots? -> QUERY related memories.
   - Enough material? -> ANALYZE and write the report.
3. Repeat until done, then FINISH.

**REPORT FORMAT (for ANALYZE):**
1. Title & executive summary.
2. Key takeaways as bullets, citing the papers found.
3. Deep dive into the most significant finding.
4. Glossary of technical terms encountered.

**OUTPUT FORMAT (JSON ONLY):**
{
    "thought": "Reasoning...",
    "action": "SEARCH" | "INGEST" | "QUERY" | "ANALYZE" | "FINISH",
    "argument": "The query string (for SEARCH/QUERY) or the text content (for INGEST/ANALYZE)"
}

**EXAMPLES:**
- {"action": "SEARCH", "argument": "ti:prosthetics AND abs:feedback"}
- {"action": "INGEST", "argument": "Title: New Hand. Abstract: We made a robot hand..."}
- {"action": "QUERY", "argument": "latest advancements in neural feedback"}
- {"action": "ANALYZE", "argument": "Here is my report..."}
"#;

/// How many characters of an abstract or memory excerpt the context keeps.
const EXCERPT_LEN: usize = 300;

/// How many memories a `QUERY` action recalls.
const RECALL_K: usize = 3;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The model dispatched `FINISH`.
    Finish,
    /// The configured step budget ran out.
    StepBudgetExhausted,
    /// The model's output could not be obtained or parsed.
    DecisionFailure,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of steps executed, including the terminating one.
    pub steps: usize,
    /// Why the run stopped.
    pub reason: StopReason,
}

/// Orchestrates the research loop over a decision provider, a corpus, and
/// the knowledge store.
///
/// The controller owns the store exclusively for the duration of a run,
/// which enforces the single-writer rule by construction.
pub struct AgentController<P, C, E>
where
    P: DecisionProvider,
    C: CorpusSearch,
    E: Embedder,
{
    provider: P,
    corpus: C,
    store: KnowledgeStore<E>,
    notifier: Option<Box<dyn Notifier>>,
    report_dir: PathBuf,
    max_steps: usize,
    max_search_results: usize,
    step_delay: Duration,
}

impl<P, C, E> AgentController<P, C, E>
where
    P: DecisionProvider,
    C: CorpusSearch,
    E: Embedder,
{
    /// Creates a controller with a 1-second courtesy pause between steps.
    pub fn new(
        provider: P,
        corpus: C,
        store: KnowledgeStore<E>,
        report_dir: impl Into<PathBuf>,
        max_steps: usize,
    ) -> Self {
        Self {
            provider,
            corpus,
            store,
            notifier: None,
            report_dir: report_dir.into(),
            max_steps,
            max_search_results: 5,
            step_delay: Duration::from_secs(1),
        }
    }

    /// Attaches a progress notification sink.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Overrides the result bound passed to corpus searches.
    pub fn with_max_search_results(mut self, max_results: usize) -> Self {
        self.max_search_results = max_results;
        self
    }

    /// Overrides the pause between steps (zero disables it).
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Read access to the underlying knowledge store.
    pub fn store(&self) -> &KnowledgeStore<E> {
        &self.store
    }

    /// Runs the research mission to completion.
    ///
    /// With a `topic`, the first step instructs immediate synthesis from
    /// internal knowledge instead of open-ended exploration.
    pub async fn run(&mut self, topic: Option<&str>) -> RunOutcome {
        let mut context = match topic {
            Some(topic) => {
                info!(topic, "starting directed research run");
                self.send_note(&format!("Focusing research on: {topic}")).await;
                format!(
                    "Mission started. Focused topic: {topic}. \
                     Use your internal knowledge to compile a detailed report."
                )
            }
            None => {
                info!("starting open research run");
                self.send_note("Research mission started.").await;
                "Mission started. Memory online.".to_string()
            }
        };

        for step in 1..=self.max_steps {
            info!(step, "--- step ---");

            // Directed runs get a one-time synthesis nudge on step 1.
            let prompt_context = if topic.is_some() && step == 1 {
                format!(
                    "{context}\n\nDecision: You have enough internal data. Please ANALYZE immediately."
                )
            } else {
                context.clone()
            };

            let decision = match self.provider.decide(SYSTEM_PROMPT, &prompt_context).await {
                Ok(decision) => decision,
                Err(e) => {
                    error!(step, error = %e, "could not obtain a valid decision, ending run");
                    return RunOutcome {
                        steps: step,
                        reason: StopReason::DecisionFailure,
                    };
                }
            };

            info!(
                step,
                thought = %decision.thought,
                action = ?decision.action,
                "decision"
            );
            self.send_note(&format!(
                "Step {step}: {}\n-> {:?}",
                decision.thought, decision.action
            ))
            .await;

            match decision.action {
                Action::Search => {
                    context = self.do_search(&decision.argument).await;
                }
                Action::Ingest => {
                    context = self.do_ingest(&decision.argument).await;
                }
                Action::Query => {
                    context = self.do_query(&decision.argument).await;
                }
                Action::Analyze => {
                    context = self.do_analyze(&decision.argument).await;
                }
                Action::Finish => {
                    info!(step, "mission complete");
                    self.send_note("Mission complete.").await;
                    return RunOutcome {
                        steps: step,
                        reason: StopReason::Finish,
                    };
                }
                Action::Unrecognized(name) => {
                    // Not fatal: the model gets a chance to self-correct on
                    // the next step, with the context left untouched.
                    warn!(step, action = %name, "unrecognized action");
                }
            }

            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }

        warn!(max_steps = self.max_steps, "step budget exhausted");
        self.send_note("Step budget exhausted, mission ends.").await;
        RunOutcome {
            steps: self.max_steps,
            reason: StopReason::StepBudgetExhausted,
        }
    }

    /// `SEARCH`: query the corpus and narrate the hits.
    async fn do_search(&self, query: &str) -> String {
        match self.corpus.search(query, self.max_search_results).await {
            Ok(results) if results.is_empty() => {
                format!("**SEARCH RESULTS for '{query}':**\nNo results found.")
            }
            Ok(results) => {
                let mut context = format!("**SEARCH RESULTS for '{query}':**\n");
                for (i, entry) in results.iter().enumerate() {
                    let CorpusEntry {
                        title,
                        summary,
                        link,
                    } = entry;
                    context.push_str(&format!(
                        "{}. {title}\n   Link: {link}\n   Abstract: {}\n\n",
                        i + 1,
                        excerpt(summary, EXCERPT_LEN)
                    ));
                }
                context.push_str("[SYSTEM: If these are useful, use INGEST to save them to memory.]");
                context
            }
            Err(e) => {
                warn!(query, error = %e, "corpus search failed");
                format!(
                    "**SYSTEM:** Search for '{query}' failed ({e}). \
                     Try a different query or another action."
                )
            }
        }
    }

    /// `INGEST`: memorize the argument with agent provenance.
    async fn do_ingest(&mut self, text: &str) -> String {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), JsonValue::from("agent"));

        match self.store.ingest(text, metadata).await {
            Ok(true) => {
                self.send_note("Memory saved.").await;
                "**SYSTEM:** Text successfully ingested into memory.".to_string()
            }
            Ok(false) => {
                "**SYSTEM:** Failed to ingest (possibly duplicate or empty).".to_string()
            }
            Err(e) => {
                error!(error = %e, "ingest failed");
                format!("**SYSTEM:** Failed to ingest ({e}).")
            }
        }
    }

    /// `QUERY`: recall the top memories and narrate them with scores.
    async fn do_query(&self, query: &str) -> String {
        match self.store.query(query, RECALL_K).await {
            Ok(results) if results.is_empty() => {
                format!("**MEMORY RECALL for '{query}':**\nNo relevant memories found.")
            }
            Ok(results) => {
                let mut context = format!("**MEMORY RECALL for '{query}':**\n");
                for hit in results {
                    context.push_str(&format!(
                        "- (Score: {:.2}) {}\n",
                        hit.score,
                        excerpt(&hit.text, EXCERPT_LEN)
                    ));
                }
                context
            }
            Err(e) => {
                error!(error = %e, "memory recall failed");
                format!("**SYSTEM:** Memory recall for '{query}' failed ({e}).")
            }
        }
    }

    /// `ANALYZE`: persist the report artifact and hand it to the sink.
    async fn do_analyze(&self, body: &str) -> String {
        match write_report(&self.report_dir, body) {
            Ok(path) => {
                self.send_note(&format!("Research report:\n{body}")).await;
                info!(path = %path.display(), "report generated");
                "**SYSTEM:** Report saved. You may continue searching or querying, \
                 or FINISH if the mission is complete."
                    .to_string()
            }
            Err(e) => {
                error!(error = %e, "failed to write report");
                format!("**SYSTEM:** Failed to save report ({e}).")
            }
        }
    }

    /// Best-effort delivery to the optional sink.
    async fn send_note(&self, content: &str) {
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.notify(content).await {
                warn!(error = %e, "notification sink failed");
            }
        }
    }
}

/// Takes the first `max` characters, appending an ellipsis when cut.
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Decision;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::error::Error;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Plays back a fixed script of decisions and records every context it
    /// was prompted with. Runs out of script -> decision failure.
    struct ScriptedProvider {
        script: Mutex<VecDeque<Decision>>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Decision>, seen: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                seen,
            }
        }
    }

    #[async_trait]
    impl DecisionProvider for ScriptedProvider {
        async fn decide(
            &self,
            _instructions: &str,
            context: &str,
        ) -> Result<Decision, Box<dyn Error + Send + Sync>> {
            self.seen.lock().unwrap().push(context.to_string());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| "script exhausted".into())
        }
    }

    /// Always returns the same decision.
    struct RepeatProvider(Decision);

    #[async_trait]
    impl DecisionProvider for RepeatProvider {
        async fn decide(
            &self,
            _instructions: &str,
            _context: &str,
        ) -> Result<Decision, Box<dyn Error + Send + Sync>> {
            Ok(self.0.clone())
        }
    }

    struct StaticCorpus(Vec<CorpusEntry>);

    #[async_trait]
    impl CorpusSearch for StaticCorpus {
        async fn search(
            &self,
            _query: &str,
            max_results: usize,
        ) -> Result<Vec<CorpusEntry>, Box<dyn Error + Send + Sync>> {
            Ok(self.0.iter().take(max_results).cloned().collect())
        }
    }

    struct FailingCorpus;

    #[async_trait]
    impl CorpusSearch for FailingCorpus {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<CorpusEntry>, Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }
    }

    struct MockEmbedder;

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, text: &str) -> Vec<f32> {
            let lower = text.to_lowercase();
            vec![
                if lower.contains("alpha") { 1.0 } else { 0.1 },
                if lower.contains("beta") { 1.0 } else { 0.1 },
            ]
        }
    }

    struct CollectingNotifier(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl Notifier for CollectingNotifier {
        async fn notify(&self, content: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.0.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    fn decision(action: Action, argument: &str) -> Decision {
        Decision {
            thought: "test".to_string(),
            action,
            argument: argument.to_string(),
        }
    }

    fn controller_with<P: DecisionProvider, C: CorpusSearch>(
        provider: P,
        corpus: C,
        dir: &std::path::Path,
        max_steps: usize,
    ) -> AgentController<P, C, MockEmbedder> {
        let store = KnowledgeStore::open(dir.join("brain.json"), MockEmbedder).unwrap();
        AgentController::new(provider, corpus, store, dir.join("reports"), max_steps)
            .with_step_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn finish_terminates_after_one_step() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider =
            ScriptedProvider::new(vec![decision(Action::Finish, "")], Arc::clone(&seen));
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        let outcome = agent.run(None).await;
        assert_eq!(
            outcome,
            RunOutcome {
                steps: 1,
                reason: StopReason::Finish
            }
        );
    }

    #[tokio::test]
    async fn step_budget_terminates_a_runaway_loop() {
        let dir = tempdir().unwrap();
        let provider = RepeatProvider(decision(Action::Query, "anything"));
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 4);

        let outcome = agent.run(None).await;
        assert_eq!(
            outcome,
            RunOutcome {
                steps: 4,
                reason: StopReason::StepBudgetExhausted
            }
        );
    }

    #[tokio::test]
    async fn decision_failure_is_loop_fatal() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(Vec::new(), Arc::clone(&seen));
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        let outcome = agent.run(None).await;
        assert_eq!(outcome.reason, StopReason::DecisionFailure);
        assert_eq!(outcome.steps, 1);
    }

    #[tokio::test]
    async fn search_results_flow_into_the_next_context() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Search, "ti:alpha"),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let corpus = StaticCorpus(vec![CorpusEntry {
            title: "Alpha Advances".to_string(),
            summary: "Great progress on alpha.".to_string(),
            link: "http://arxiv.org/abs/1".to_string(),
        }]);
        let mut agent = controller_with(provider, corpus, dir.path(), 10);

        agent.run(None).await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].contains("Alpha Advances"));
        assert!(seen[1].contains("http://arxiv.org/abs/1"));
        assert!(seen[1].contains("INGEST"));
    }

    #[tokio::test]
    async fn empty_search_produces_explicit_no_results_context() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Search, "ti:nothing"),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        agent.run(None).await;
        assert!(seen.lock().unwrap()[1].contains("No results found."));
    }

    #[tokio::test]
    async fn search_failure_becomes_a_negative_observation() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Search, "ti:alpha"),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let mut agent = controller_with(provider, FailingCorpus, dir.path(), 10);

        let outcome = agent.run(None).await;
        assert_eq!(outcome.reason, StopReason::Finish);
        assert!(seen.lock().unwrap()[1].contains("failed"));
    }

    #[tokio::test]
    async fn ingest_action_stores_a_document_with_agent_provenance() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Ingest, "Title: alpha. Abstract: beta."),
                decision(Action::Ingest, "Title: alpha. Abstract: beta."),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        agent.run(None).await;

        assert_eq!(agent.store().len(), 1);
        let seen = seen.lock().unwrap();
        assert!(seen[1].contains("successfully ingested"));
        assert!(seen[2].contains("Failed to ingest"));
    }

    #[tokio::test]
    async fn query_recalls_memories_with_scores() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Ingest, "alpha finding"),
                decision(Action::Query, "alpha"),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        agent.run(None).await;

        let seen = seen.lock().unwrap();
        assert!(seen[2].contains("MEMORY RECALL"));
        assert!(seen[2].contains("(Score: "));
        assert!(seen[2].contains("alpha finding"));
    }

    #[tokio::test]
    async fn query_with_empty_store_reports_no_memories() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Query, "alpha"),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        agent.run(None).await;
        assert!(seen.lock().unwrap()[1].contains("No relevant memories found."));
    }

    #[tokio::test]
    async fn analyze_writes_a_report_and_notifies_the_sink() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let notes = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Analyze, "Everything we learned."),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let store = KnowledgeStore::open(dir.path().join("brain.json"), MockEmbedder).unwrap();
        let mut agent = AgentController::new(
            provider,
            StaticCorpus(Vec::new()),
            store,
            dir.path().join("reports"),
            10,
        )
        .with_step_delay(Duration::ZERO)
        .with_notifier(Box::new(CollectingNotifier(Arc::clone(&notes))));

        agent.run(None).await;

        let reports: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .collect();
        assert_eq!(reports.len(), 1);
        assert!(seen.lock().unwrap()[1].contains("Report saved"));
        assert!(
            notes
                .lock()
                .unwrap()
                .iter()
                .any(|n| n.contains("Everything we learned."))
        );
    }

    #[tokio::test]
    async fn unrecognized_action_leaves_the_context_untouched() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Search, "ti:alpha"),
                decision(Action::Unrecognized("PONDER".to_string()), ""),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let corpus = StaticCorpus(vec![CorpusEntry {
            title: "Alpha Advances".to_string(),
            summary: "Progress.".to_string(),
            link: "http://arxiv.org/abs/1".to_string(),
        }]);
        let mut agent = controller_with(provider, corpus, dir.path(), 10);

        let outcome = agent.run(None).await;
        assert_eq!(outcome.reason, StopReason::Finish);
        assert_eq!(outcome.steps, 3);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[1], seen[2]);
    }

    #[tokio::test]
    async fn directed_topic_nudges_immediate_synthesis_on_step_one() {
        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider::new(
            vec![
                decision(Action::Analyze, "Topic report."),
                decision(Action::Finish, ""),
            ],
            Arc::clone(&seen),
        );
        let mut agent = controller_with(provider, StaticCorpus(Vec::new()), dir.path(), 10);

        agent.run(Some("compact fusion")).await;

        let seen = seen.lock().unwrap();
        assert!(seen[0].contains("compact fusion"));
        assert!(seen[0].contains("ANALYZE immediately"));
        // The nudge is a one-time prompt override, not part of the context.
        assert!(!seen[1].contains("ANALYZE immediately"));
    }

    #[tokio::test]
    async fn notifier_failure_does_not_stop_the_run() {
        struct FailingNotifier;

        #[async_trait]
        impl Notifier for FailingNotifier {
            async fn notify(&self, _content: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
                Err("webhook down".into())
            }
        }

        let dir = tempdir().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider =
            ScriptedProvider::new(vec![decision(Action::Finish, "")], Arc::clone(&seen));
        let store = KnowledgeStore::open(dir.path().join("brain.json"), MockEmbedder).unwrap();
        let mut agent = AgentController::new(
            provider,
            StaticCorpus(Vec::new()),
            store,
            dir.path().join("reports"),
            10,
        )
        .with_step_delay(Duration::ZERO)
        .with_notifier(Box::new(FailingNotifier));

        let outcome = agent.run(None).await;
        assert_eq!(outcome.reason, StopReason::Finish);
    }

    #[test]
    fn excerpt_truncates_at_char_boundaries() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        // Multi-byte characters must not be split.
        assert_eq!(excerpt("ααββ", 2), "αα...");
    }
}
