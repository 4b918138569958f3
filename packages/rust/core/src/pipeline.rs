//! The mock research pipeline: query → fact lookup → summarization call.
//!
//! One invocation moves linearly through the stages in
//! [`PipelineStage`]; each transition is delivered to a caller-supplied
//! [`StageObserver`] together with its narrated status string. The pipeline
//! holds no per-invocation state, so concurrent runs for distinct queries
//! are independent; they share only the read-only knowledge base.
//!
//! There is no cancellation and no timeout around the completion call. A
//! failure is terminal for the invocation that raised it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use agentsim_genai::GenAiClient;
use agentsim_knowledge::TopicKnowledgeBase;
use agentsim_shared::{AgentSimError, ExecutionMode, JobId, PipelineStage, Result};

use crate::narrator;

// ---------------------------------------------------------------------------
// Options and observation
// ---------------------------------------------------------------------------

/// Configuration for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Model id for the summarization call. Fixed configuration, never
    /// derived from the query.
    pub summarize_model: String,
    /// Where the suspension point falls: inline call or simulated remote job.
    pub mode: ExecutionMode,
    /// Simulated remote-job execution latency (queued mode only).
    pub job_delay: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            summarize_model: "gemini-2.5-flash".into(),
            mode: ExecutionMode::Direct,
            job_delay: Duration::from_millis(4000),
        }
    }
}

/// Stage callback for presentation layers.
///
/// Receives the typed stage plus its narrated status string, so the shell
/// never re-derives narration.
pub trait StageObserver: Send + Sync {
    /// Called on every stage transition of an invocation.
    fn on_stage(&self, stage: PipelineStage, status: &str);
}

/// No-op observer for headless/test usage.
pub struct SilentObserver;

impl StageObserver for SilentObserver {
    fn on_stage(&self, _stage: PipelineStage, _status: &str) {}
}

// ---------------------------------------------------------------------------
// JobHandle
// ---------------------------------------------------------------------------

/// Handle to a simulated remote job (queued mode).
///
/// The identifier is unique per submission; awaiting the handle resolves
/// the invocation to `Complete` or `Failed`.
pub struct JobHandle {
    id: JobId,
    submitted_at: DateTime<Utc>,
    query: String,
    task: JoinHandle<Result<String>>,
    observer: Arc<dyn StageObserver>,
}

impl JobHandle {
    /// The job's unique identifier.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// When the job was submitted.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Await the job's eventual result.
    pub async fn wait(self) -> Result<String> {
        let outcome = match self.task.await {
            Ok(result) => result,
            Err(e) => Err(AgentSimError::Upstream(format!("job task failed: {e}"))),
        };

        match &outcome {
            Ok(_) => {
                self.observer.on_stage(
                    PipelineStage::Complete,
                    &narrator::narrate(PipelineStage::Complete, &self.query),
                );
                info!(job_id = %self.id, "remote job complete");
            }
            Err(e) => {
                self.observer.on_stage(
                    PipelineStage::Failed,
                    &narrator::narrate(PipelineStage::Failed, &self.query),
                );
                warn!(job_id = %self.id, error = %e, "remote job failed");
            }
        }

        outcome
    }
}

// ---------------------------------------------------------------------------
// AgentPipeline
// ---------------------------------------------------------------------------

/// Orchestrates one research invocation end to end.
pub struct AgentPipeline {
    knowledge: TopicKnowledgeBase,
    client: GenAiClient,
    options: PipelineOptions,
    observer: Arc<dyn StageObserver>,
}

impl AgentPipeline {
    /// Build a pipeline with a no-op observer.
    pub fn new(
        knowledge: TopicKnowledgeBase,
        client: GenAiClient,
        options: PipelineOptions,
    ) -> Self {
        Self {
            knowledge,
            client,
            options,
            observer: Arc::new(SilentObserver),
        }
    }

    /// Attach a stage observer. Presentation layers bind one per surface.
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the full pipeline for a query and return the report text.
    ///
    /// In queued mode this submits and then awaits the handle, so both
    /// modes share one stage vocabulary.
    #[instrument(skip_all, fields(mode = %self.options.mode))]
    pub async fn run(&self, query: &str) -> Result<String> {
        match self.options.mode {
            ExecutionMode::Direct => self.run_direct(query).await,
            ExecutionMode::Queued => self.submit(query).await?.wait().await,
        }
    }

    /// Direct mode: await the completion call inline.
    async fn run_direct(&self, query: &str) -> Result<String> {
        validate_query(query)?;

        self.observe(PipelineStage::SearchingFacts, query);
        let facts = self.knowledge.lookup(query).await;

        self.observe(PipelineStage::SummarizingWithModel, query);
        let prompt = build_summary_prompt(query, &facts);

        match self
            .client
            .generate(&self.options.summarize_model, &prompt, None)
            .await
        {
            Ok(report) => {
                self.observe(PipelineStage::Complete, query);
                info!(report_len = report.len(), "research run complete");
                Ok(report)
            }
            Err(e) => {
                self.observe(PipelineStage::Failed, query);
                warn!(error = %e, "research run failed");
                Err(e)
            }
        }
    }

    /// Queued mode: submit a simulated remote job and return its handle
    /// immediately. The caller awaits the handle for the result.
    #[instrument(skip_all)]
    pub async fn submit(&self, query: &str) -> Result<JobHandle> {
        validate_query(query)?;

        self.observe(PipelineStage::SearchingFacts, query);
        let facts = self.knowledge.lookup(query).await;

        self.observe(PipelineStage::SummarizingWithModel, query);
        let prompt = build_summary_prompt(query, &facts);

        let id = JobId::new();
        let client = self.client.clone();
        let model = self.options.summarize_model.clone();
        let delay = self.options.job_delay;

        let task = tokio::spawn(async move {
            // Simulated grid execution latency before the real call.
            tokio::time::sleep(delay).await;
            client.generate(&model, &prompt, None).await
        });

        self.observe(PipelineStage::AwaitingRemoteJob, query);
        info!(job_id = %id, "job submitted");

        Ok(JobHandle {
            id,
            submitted_at: Utc::now(),
            query: query.to_string(),
            task,
            observer: Arc::clone(&self.observer),
        })
    }

    fn observe(&self, stage: PipelineStage, query: &str) {
        self.observer
            .on_stage(stage, &narrator::narrate(stage, query));
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject empty/whitespace-only queries before any stage is entered.
fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(AgentSimError::invalid_input(
            "Please enter a topic to research.",
        ));
    }
    Ok(())
}

/// Build the summarization prompt embedding the verbatim query and facts.
fn build_summary_prompt(query: &str, facts: &str) -> String {
    format!(
        "Based on the following information, generate a concise summary report for the user's \
         query: \"{query}\". Format the output in Markdown with a title, a brief paragraph, and \
         3-4 bullet points highlighting the key takeaways.\n\nInformation Found:\n{facts}"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
