//! Human-readable status strings for each pipeline stage.
//!
//! Display-only: the narration carries no information the typed stage does
//! not, and nothing parses it back.

use agentsim_shared::PipelineStage;

/// Narrate a stage for display. `query` is embedded verbatim where the
/// reference status strings mention the topic.
pub fn narrate(stage: PipelineStage, query: &str) -> String {
    match stage {
        PipelineStage::Idle => "Awaiting your research topic...".to_string(),
        PipelineStage::SearchingFacts => {
            format!("Tool Call: Searching the web for \"{query}\"...")
        }
        PipelineStage::SummarizingWithModel => {
            "Analyzing search results with Gemini...".to_string()
        }
        PipelineStage::AwaitingRemoteJob => {
            "Job submitted to the compute grid. Awaiting result...".to_string()
        }
        PipelineStage::Complete => "Research complete. Report generated below.".to_string(),
        PipelineStage::Failed => "Task failed.".to_string(),
    }
}
