use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::structured_llm_interface::{read_json_body, LLMError, StructuredLLMInterface};

pub const CLAUDE_BASE_URL: &str = "https://api.anthropic.com";
pub const CLAUDE_DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const TOOL_NAME: &str = "record_translation";

/// Claude LLM implementation
/// Forces a single tool call whose input schema is the requested object shape
pub struct ClaudeLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    max_tokens: u32,
}

impl ClaudeLLM {
    pub fn new(model: String, base_url: String, api_key: String, max_tokens: u32) -> Self {
        info!("Initialized ClaudeLLM: model={}, base_url={}", model, base_url);
        Self {
            client: Client::new(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens,
        }
    }
}

#[async_trait]
impl StructuredLLMInterface for ClaudeLLM {
    async fn generate_object(
        &self,
        system: &str,
        user: &str,
        schema: &Value,
    ) -> Result<Value, LLMError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system,
            "messages": [{ "role": "user", "content": user }],
            "tools": [{
                "name": TOOL_NAME,
                "description": "Record the translation and the detected source language.",
                "input_schema": schema,
            }],
            "tool_choice": { "type": "tool", "name": TOOL_NAME },
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;
        let response = read_json_body(response).await?;

        response
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|b| b.get("type").and_then(|t| t.as_str()) == Some("tool_use"))
            })
            .and_then(|block| block.get("input"))
            .cloned()
            .ok_or_else(|| LLMError::MalformedResponse("no tool_use block in response".to_string()))
    }

    fn provider(&self) -> &str {
        "claude_llm"
    }
}
