//! Core pipeline orchestration for AgentSim.
//!
//! Ties the knowledge base and the generation client into the mock agent
//! workflows: the research pipeline (`pipeline`) and the pass-through code
//! assistant (`assistant`), with status narration in `narrator`.

pub mod assistant;
pub mod narrator;
pub mod pipeline;
