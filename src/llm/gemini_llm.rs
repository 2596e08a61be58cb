use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::structured_llm_interface::{
    parse_object_text, read_json_body, LLMError, StructuredLLMInterface,
};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Google Gemini implementation over the `generateContent` endpoint
pub struct GeminiLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    temperature: Option<f32>,
}

impl GeminiLLM {
    pub fn new(model: String, base_url: String, api_key: String, temperature: Option<f32>) -> Self {
        info!("Initialized GeminiLLM: model={}, base_url={}", model, base_url);
        Self {
            client: Client::new(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            temperature,
        }
    }
}

/// Gemini takes an OpenAPI subset: upper-case type names, no `additionalProperties`
fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(obj) => {
            let mut out = Map::new();
            for (key, value) in obj {
                match key.as_str() {
                    "additionalProperties" => {}
                    "type" => {
                        let upper = value.as_str().map(|t| t.to_uppercase());
                        out.insert(key.clone(), upper.map(Value::String).unwrap_or_else(|| value.clone()));
                    }
                    _ => {
                        out.insert(key.clone(), to_gemini_schema(value));
                    }
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl StructuredLLMInterface for GeminiLLM {
    async fn generate_object(
        &self,
        system: &str,
        user: &str,
        schema: &Value,
    ) -> Result<Value, LLMError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": to_gemini_schema(schema),
        });
        if let Some(t) = self.temperature {
            generation_config["temperature"] = json!(t);
        }

        let body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": user }] }],
            "generationConfig": generation_config,
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = read_json_body(response).await?;

        if let Some(reason) = response.pointer("/promptFeedback/blockReason").and_then(|r| r.as_str()) {
            return Err(LLMError::MalformedResponse(format!("prompt blocked: {}", reason)));
        }

        let text = response
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| LLMError::MalformedResponse("no candidate text".to_string()))?;

        debug!("gemini returned {} bytes", text.len());
        parse_object_text(text)
    }

    fn provider(&self) -> &str {
        "gemini_llm"
    }
}
