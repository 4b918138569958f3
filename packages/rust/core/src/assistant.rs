//! Pass-through code assistant.
//!
//! A single completion call against the code model with a fixed system
//! instruction, followed by code-fence stripping. No stage machinery: the
//! assistant either returns code text or fails.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, instrument};

use agentsim_genai::GenAiClient;
use agentsim_shared::{AgentSimError, Result};

/// System instruction for the code model.
const SYSTEM_INSTRUCTION: &str =
    "You are an expert coding assistant. Generate clean, efficient, and well-documented code \
     based on the user's request. Only output the code itself, without any conversational text \
     or explanations unless specifically asked. Format the output as a clean code block.";

/// One-shot code generation against a fixed model.
pub struct CodeAssistant {
    client: GenAiClient,
    model: String,
}

impl CodeAssistant {
    pub fn new(client: GenAiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Generate code for a prompt, with fences stripped from the response.
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate_code(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(AgentSimError::invalid_input("Please enter a prompt."));
        }

        let raw = self
            .client
            .generate(&self.model, prompt, Some(SYSTEM_INSTRUCTION))
            .await?;

        let code = strip_code_fences(&raw);
        info!(code_len = code.len(), "code generation complete");
        Ok(code)
    }
}

/// Remove Markdown code fences: every ```` ```lang ```` opener, then any
/// stray ```` ``` ````, then trim.
fn strip_code_fences(text: &str) -> String {
    static FENCE_OPEN_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"```\w*\n").expect("valid regex"));

    let without_openers = FENCE_OPEN_RE.replace_all(text, "");
    without_openers.replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn strips_fenced_block_with_language() {
        let text = "```rust\nfn main() {}\n```";
        assert_eq!(strip_code_fences(text), "fn main() {}");
    }

    #[test]
    fn strips_bare_fences() {
        let text = "```\nlet x = 1;\n```";
        assert_eq!(strip_code_fences(text), "let x = 1;");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  plain code  "), "plain code");
    }

    #[test]
    fn strips_multiple_blocks() {
        let text = "```py\na = 1\n```\nmiddle\n```py\nb = 2\n```";
        assert_eq!(strip_code_fences(text), "a = 1\n\nmiddle\nb = 2");
    }

    #[tokio::test]
    async fn generate_code_sends_system_instruction_and_strips_fences() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "systemInstruction": {
                    "parts": [ { "text": SYSTEM_INSTRUCTION } ]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [ { "content": { "parts": [
                    { "text": "```rust\nfn add(a: i32, b: i32) -> i32 { a + b }\n```" }
                ] } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GenAiClient::with_key(&server.uri(), "test-key").unwrap();
        let assistant = CodeAssistant::new(client, "gemini-2.5-pro");

        let code = assistant.generate_code("write an add function").await.unwrap();
        assert_eq!(code, "fn add(a: i32, b: i32) -> i32 { a + b }");
    }

    #[tokio::test]
    async fn empty_prompt_is_invalid_input() {
        let client = GenAiClient::with_key("http://127.0.0.1:1", "test-key").unwrap();
        let assistant = CodeAssistant::new(client, "gemini-2.5-pro");

        let result = assistant.generate_code("  ").await;
        assert!(matches!(result, Err(AgentSimError::InvalidInput { .. })));
    }
}
