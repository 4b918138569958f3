//! Application configuration for AgentSim.
//!
//! User config lives at `~/.agentsim/agentsim.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AgentSimError, Result};
use crate::types::ExecutionMode;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "agentsim.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".agentsim";

// ---------------------------------------------------------------------------
// Config structs (matching agentsim.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Text-generation endpoint settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Pipeline behavior.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// `[gemini]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the generation endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for research-report summarization.
    #[serde(default = "default_summarize_model")]
    pub summarize_model: String,

    /// Model used for code generation.
    #[serde(default = "default_code_model")]
    pub code_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
            summarize_model: default_summarize_model(),
            code_model: default_code_model(),
        }
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_summarize_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_code_model() -> String {
    "gemini-2.5-pro".into()
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Execution mode: "direct" awaits the completion call inline,
    /// "queued" submits a simulated remote job.
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Simulated fact-search latency in milliseconds.
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,

    /// Simulated remote-job execution latency in milliseconds (queued mode).
    #[serde(default = "default_job_delay_ms")]
    pub job_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            search_delay_ms: default_search_delay_ms(),
            job_delay_ms: default_job_delay_ms(),
        }
    }
}

fn default_search_delay_ms() -> u64 {
    1500
}
fn default_job_delay_ms() -> u64 {
    4000
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.agentsim/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AgentSimError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.agentsim/agentsim.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AgentSimError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        AgentSimError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AgentSimError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AgentSimError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AgentSimError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the API key env var is set and non-empty.
pub fn validate_api_key(config: &AppConfig) -> Result<()> {
    let var_name = &config.gemini.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(()),
        _ => Err(AgentSimError::missing_credential(format!(
            "API key not found. Set the {var_name} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("GEMINI_API_KEY"));
        assert!(toml_str.contains("gemini-2.5-flash"));
        assert!(toml_str.contains("search_delay_ms"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.gemini.summarize_model, "gemini-2.5-flash");
        assert_eq!(parsed.gemini.code_model, "gemini-2.5-pro");
        assert_eq!(parsed.pipeline.search_delay_ms, 1500);
        assert_eq!(parsed.pipeline.job_delay_ms, 4000);
        assert_eq!(parsed.pipeline.mode, ExecutionMode::Direct);
    }

    #[test]
    fn config_with_queued_mode() {
        let toml_str = r#"
[gemini]
summarize_model = "gemini-2.0-flash"

[pipeline]
mode = "queued"
job_delay_ms = 250
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.pipeline.mode, ExecutionMode::Queued);
        assert_eq!(config.pipeline.job_delay_ms, 250);
        assert_eq!(config.gemini.summarize_model, "gemini-2.0-flash");
        // Unset fields fall back to defaults
        assert_eq!(config.gemini.code_model, "gemini-2.5-pro");
        assert_eq!(config.pipeline.search_delay_ms, 1500);
    }

    #[test]
    fn api_key_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.gemini.api_key_env = "AGENTSIM_TEST_NONEXISTENT_KEY_12345".into();
        let result = validate_api_key(&config);
        assert!(matches!(
            result,
            Err(AgentSimError::MissingCredential { .. })
        ));
    }
}
