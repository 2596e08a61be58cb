use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::structured_llm_interface::{
    parse_object_text, read_json_body, LLMError, StructuredLLMInterface,
};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama LLM implementation
/// Uses the native chat endpoint, which accepts a JSON schema as `format`
pub struct OllamaLLM {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
    keep_alive: f32,
}

impl OllamaLLM {
    pub fn new(model: String, base_url: String, temperature: f32, keep_alive: f32) -> Self {
        info!("Initialized OllamaLLM: model={}, base_url={}", model, base_url);
        Self {
            client: Client::new(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
            keep_alive,
        }
    }
}

#[async_trait]
impl StructuredLLMInterface for OllamaLLM {
    async fn generate_object(
        &self,
        system: &str,
        user: &str,
        schema: &Value,
    ) -> Result<Value, LLMError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = json!({
            "model": self.model,
            "stream": false,
            "keep_alive": self.keep_alive,
            "format": schema,
            "options": { "temperature": self.temperature },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = read_json_body(self.client.post(&url).json(&body).send().await?).await?;

        let content = response
            .pointer("/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| LLMError::MalformedResponse("chat response has no message".to_string()))?;

        parse_object_text(content)
    }

    fn provider(&self) -> &str {
        "ollama_llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn passes_schema_as_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "model": "qwen2.5",
                "stream": false,
                "format": { "type": "object" }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "message": {
                        "role": "assistant",
                        "content": "{\"translatedText\":\"thanks\",\"detectedLanguage\":\"Japanese\"}"
                    },
                    "done": true
                })
                .to_string(),
            )
            .create_async()
            .await;

        let llm = OllamaLLM::new("qwen2.5".into(), server.url(), 0.0, -1.0);
        let value = llm
            .generate_object("sys", "ありがとう", &json!({"type": "object"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value["translatedText"], "thanks");
    }
}
