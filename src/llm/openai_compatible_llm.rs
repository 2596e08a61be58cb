use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::structured_llm_interface::{
    parse_object_text, read_json_body, LLMError, StructuredLLMInterface,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI compatible LLM implementation
/// Uses `response_format: json_schema` in strict mode
pub struct OpenAICompatibleLLM {
    client: Client,
    provider: String,
    model: String,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
    project_id: Option<String>,
    temperature: f32,
}

impl OpenAICompatibleLLM {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: String,
        model: String,
        base_url: String,
        api_key: String,
        organization_id: Option<String>,
        project_id: Option<String>,
        temperature: f32,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: provider={}, model={}, base_url={}",
            provider, model, base_url
        );
        Self {
            client: Client::new(),
            provider,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            organization_id,
            project_id,
            temperature,
        }
    }
}

#[async_trait]
impl StructuredLLMInterface for OpenAICompatibleLLM {
    async fn generate_object(
        &self,
        system: &str,
        user: &str,
        schema: &Value,
    ) -> Result<Value, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "translation_response",
                    "strict": true,
                    "schema": schema,
                },
            },
        });

        let mut request = self.client.post(&url).bearer_auth(&self.api_key).json(&body);
        if let Some(org) = &self.organization_id {
            request = request.header("OpenAI-Organization", org);
        }
        if let Some(project) = &self.project_id {
            request = request.header("OpenAI-Project", project);
        }

        let response = read_json_body(request.send().await?).await?;

        let choice = response
            .get("choices")
            .and_then(|c| c.get(0))
            .ok_or_else(|| LLMError::MalformedResponse("no choices in completion".to_string()))?;

        if let Some(refusal) = choice.pointer("/message/refusal").and_then(|r| r.as_str()) {
            return Err(LLMError::MalformedResponse(format!("model refused: {}", refusal)));
        }

        let content = choice
            .pointer("/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| LLMError::MalformedResponse("completion has no content".to_string()))?;

        debug!("{} returned {} bytes", self.provider, content.len());
        parse_object_text(content)
    }

    fn provider(&self) -> &str {
        &self.provider
    }
}
