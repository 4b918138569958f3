//! Core domain types for the AgentSim pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// JobId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for simulated remote-job identifiers.
///
/// v7 ids embed a timestamp and random bits, so concurrent submissions never
/// collide and ids sort by submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Generate a new time-sortable job identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// PipelineStage
// ---------------------------------------------------------------------------

/// The lifecycle stage of one pipeline invocation.
///
/// Transitions are strictly linear; no stage is revisited within one
/// invocation. `AwaitingRemoteJob` only occurs in queued execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    SearchingFacts,
    SummarizingWithModel,
    AwaitingRemoteJob,
    Complete,
    Failed,
}

impl PipelineStage {
    /// Stable string form, used for logging and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SearchingFacts => "searching_facts",
            Self::SummarizingWithModel => "summarizing_with_model",
            Self::AwaitingRemoteJob => "awaiting_remote_job",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExecutionMode
// ---------------------------------------------------------------------------

/// Where the pipeline's suspension point falls.
///
/// `Direct` awaits the completion call inline. `Queued` submits a simulated
/// remote job and resolves the result through a [`JobId`]-tagged handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Direct,
    Queued,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Queued => f.write_str("queued"),
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "queued" => Ok(Self::Queued),
            other => Err(format!(
                "unknown execution mode '{other}' (expected 'direct' or 'queued')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_roundtrip() {
        let id = JobId::new();
        let s = id.to_string();
        let parsed: JobId = s.parse().expect("parse JobId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn job_ids_are_unique() {
        let a = JobId::new();
        let b = JobId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&PipelineStage::SummarizingWithModel).unwrap();
        assert_eq!(json, r#""summarizing_with_model""#);

        let parsed: PipelineStage = serde_json::from_str(r#""awaiting_remote_job""#).unwrap();
        assert_eq!(parsed, PipelineStage::AwaitingRemoteJob);
    }

    #[test]
    fn stage_display_matches_as_str() {
        assert_eq!(PipelineStage::SearchingFacts.to_string(), "searching_facts");
        assert_eq!(PipelineStage::Failed.to_string(), "failed");
    }

    #[test]
    fn execution_mode_parses() {
        assert_eq!("direct".parse::<ExecutionMode>().unwrap(), ExecutionMode::Direct);
        assert_eq!("Queued".parse::<ExecutionMode>().unwrap(), ExecutionMode::Queued);
        assert!("batch".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn execution_mode_default_is_direct() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Direct);
    }
}
