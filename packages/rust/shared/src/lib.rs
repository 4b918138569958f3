//! Shared types, error model, and configuration for AgentSim.
//!
//! This crate is the foundation depended on by all other AgentSim crates.
//! It provides:
//! - [`AgentSimError`] — the unified error type
//! - Domain types ([`PipelineStage`], [`ExecutionMode`], [`JobId`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, GeminiConfig, PipelineConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, validate_api_key,
};
pub use error::{AgentSimError, Result};
pub use types::{ExecutionMode, JobId, PipelineStage};
