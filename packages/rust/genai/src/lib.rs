//! Minimal client for the Generative Language `generateContent` endpoint.
//!
//! One request per call: no retries, no streaming, no tool-call loop. The
//! client sets no request timeout; an unresponsive upstream blocks that
//! invocation and nothing else.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use agentsim_shared::{AgentSimError, Result};

/// User-Agent string for generation requests.
const USER_AGENT: &str = concat!("AgentSim/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Wire types (generateContent JSON shape)
// ---------------------------------------------------------------------------

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

/// A content turn: an ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn from_text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// A single text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response body for `models/{model}:generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the text-generation endpoint.
///
/// The API key is resolved when the client is constructed, so a missing
/// credential surfaces before any request is attempted.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GenAiClient {
    /// Build a client with the API key read from the named env var.
    ///
    /// An unset or empty variable is a [`AgentSimError::MissingCredential`],
    /// distinct from any upstream failure.
    pub fn from_env(endpoint: &str, api_key_env: &str) -> Result<Self> {
        let api_key = match std::env::var(api_key_env) {
            Ok(val) if !val.is_empty() => val,
            _ => {
                return Err(AgentSimError::missing_credential(format!(
                    "API key not found. Set the {api_key_env} environment variable."
                )));
            }
        };
        Self::with_key(endpoint, api_key)
    }

    /// Build a client with an explicit API key (tests, embedding callers).
    pub fn with_key(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AgentSimError::config(format!("invalid endpoint '{endpoint}': {e}")))?;

        // No .timeout(): the external call is unbounded from our side.
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AgentSimError::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Run one completion call and return the generated text.
    #[instrument(skip_all, fields(model = %model, prompt_len = prompt.len()))]
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{model}:generateContent",
            self.endpoint
        );

        let body = GenerateRequest {
            contents: vec![Content::from_text(prompt)],
            system_instruction: system_instruction.map(Content::from_text),
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentSimError::Upstream(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentSimError::Upstream(format!(
                "{url}: HTTP {status}: {}",
                &detail[..detail.len().min(200)]
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            AgentSimError::Upstream(format!("{url}: malformed response: {e}"))
        })?;

        let text = parsed
            .text()
            .ok_or_else(|| AgentSimError::Upstream(format!("{url}: response had no candidates")))?;

        debug!(response_len = text.len(), "generation complete");
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
