use std::sync::Arc;
use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::claude_llm::{ClaudeLLM, CLAUDE_BASE_URL, CLAUDE_DEFAULT_MODEL};
use super::gemini_llm::{GeminiLLM, GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL};
use super::ollama_llm::{OllamaLLM, OLLAMA_BASE_URL};
use super::openai_compatible_llm::{OpenAICompatibleLLM, OPENAI_BASE_URL};
use super::structured_llm_interface::StructuredLLMInterface;
use crate::config::is_unset;

/// Factory for creating structured-output LLM instances
pub struct StructuredLLMFactory;

fn str_field(config: &Value, key: &str) -> Option<String> {
    config
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !is_unset(s))
        .map(|s| s.to_string())
}

/// `llm_api_key` from the provider block, else the vendor's usual env var
fn api_key(config: &Value, env_var: &str) -> String {
    api_key_from(config, env_var, |name| std::env::var(name).ok())
}

fn api_key_from(config: &Value, env_var: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    str_field(config, "llm_api_key")
        .or_else(|| lookup(env_var).filter(|key| !is_unset(key)))
        .unwrap_or_default()
}

impl StructuredLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// # Arguments
    /// * `llm_provider` - The provider key, e.g. `gemini_llm`
    /// * `config` - That provider's configuration block
    pub fn create_llm(
        llm_provider: &str,
        config: &Value,
    ) -> Result<Arc<dyn StructuredLLMInterface>> {
        info!("Initializing LLM: {}", llm_provider);

        match llm_provider {
            "gemini_llm" => Ok(Arc::new(GeminiLLM::new(
                str_field(config, "model").unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
                str_field(config, "base_url").unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
                api_key(config, "GOOGLE_GENERATIVE_AI_API_KEY"),
                config.get("temperature").and_then(|v| v.as_f64()).map(|t| t as f32),
            ))),
            "openai_compatible_llm" | "openai_llm" | "deepseek_llm" | "groq_llm" | "mistral_llm" => {
                let base_url = match str_field(config, "base_url") {
                    Some(url) => url,
                    None if llm_provider == "openai_llm" => OPENAI_BASE_URL.to_string(),
                    None => anyhow::bail!("base_url is required for {}", llm_provider),
                };
                let model = str_field(config, "model")
                    .ok_or_else(|| anyhow::anyhow!("model is required for {}", llm_provider))?;

                Ok(Arc::new(OpenAICompatibleLLM::new(
                    llm_provider.to_string(),
                    model,
                    base_url,
                    api_key(config, "OPENAI_API_KEY"),
                    str_field(config, "organization_id"),
                    str_field(config, "project_id"),
                    config.get("temperature").and_then(|v| v.as_f64()).unwrap_or(1.0) as f32,
                )))
            }
            "ollama_llm" => {
                let model = str_field(config, "model")
                    .ok_or_else(|| anyhow::anyhow!("model is required for ollama_llm"))?;
                Ok(Arc::new(OllamaLLM::new(
                    model,
                    str_field(config, "base_url").unwrap_or_else(|| OLLAMA_BASE_URL.to_string()),
                    config.get("temperature").and_then(|v| v.as_f64()).unwrap_or(1.0) as f32,
                    config.get("keep_alive").and_then(|v| v.as_f64()).unwrap_or(-1.0) as f32,
                )))
            }
            "claude_llm" => Ok(Arc::new(ClaudeLLM::new(
                str_field(config, "model").unwrap_or_else(|| CLAUDE_DEFAULT_MODEL.to_string()),
                str_field(config, "base_url").unwrap_or_else(|| CLAUDE_BASE_URL.to_string()),
                api_key(config, "ANTHROPIC_API_KEY"),
                config.get("max_tokens").and_then(|v| v.as_u64()).unwrap_or(4096) as u32,
            ))),
            _ => Err(anyhow::anyhow!("Unsupported LLM provider: {}", llm_provider)),
        }
    }
}
