use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, warn};

use super::contract::ResponseContract;
use super::interface::{TranslationRequest, TranslationResult};
use super::prompt::system_prompt;
use crate::llm::StructuredLLMInterface;

/// Wraps a structured model and normalizes every outcome into a
/// `TranslationResult`. The provider is fixed at construction; no retries.
pub struct TranslationService {
    llm: Arc<dyn StructuredLLMInterface>,
    target_language: String,
    system_prompt: String,
    schema: Value,
}

impl TranslationService {
    pub fn new(llm: Arc<dyn StructuredLLMInterface>, target_language: &str) -> Self {
        Self {
            llm,
            target_language: target_language.to_string(),
            system_prompt: system_prompt(target_language),
            schema: ResponseContract::schema(target_language),
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn provider(&self) -> &str {
        self.llm.provider()
    }

    pub async fn translate(&self, source_text: &str) -> TranslationResult {
        let Some(request) = TranslationRequest::new(source_text) else {
            return TranslationResult::failure("nothing to translate");
        };

        match self
            .llm
            .generate_object(&self.system_prompt, &request.source_text, &self.schema)
            .await
        {
            Ok(raw) => {
                let result = ResponseContract::validate(&raw);
                match &result {
                    TranslationResult::Success { detected_language, .. } => {
                        debug!(provider = self.llm.provider(), %detected_language, "translation received");
                    }
                    TranslationResult::Failure { reason } => {
                        warn!(provider = self.llm.provider(), %reason, raw = %raw, "model answer rejected");
                    }
                }
                result
            }
            Err(e) => {
                warn!(provider = self.llm.provider(), error = %e, "translation call failed");
                TranslationResult::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubLLM {
        answer: Mutex<Option<Result<Value, LLMError>>>,
        seen: Mutex<Vec<(String, String, Value)>>,
    }

    impl StubLLM {
        fn new(answer: Result<Value, LLMError>) -> Arc<Self> {
            Arc::new(Self {
                answer: Mutex::new(Some(answer)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl StructuredLLMInterface for StubLLM {
        async fn generate_object(&self, system: &str, user: &str, schema: &Value) -> Result<Value, LLMError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string(), schema.clone()));
            self.answer.lock().unwrap().take().expect("called once")
        }

        fn provider(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn valid_answer_becomes_success() {
        let llm = StubLLM::new(Ok(json!({"translatedText": "Hello everyone", "detectedLanguage": "French"})));
        let service = TranslationService::new(llm.clone(), "English");

        let result = service.translate("Bonjour tout le monde").await;

        assert_eq!(result, TranslationResult::success("Hello everyone", "French"));
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("English"));
        assert_eq!(seen[0].1, "Bonjour tout le monde");
        assert_eq!(seen[0].2, ResponseContract::schema("English"));
    }

    #[tokio::test]
    async fn transport_error_message_becomes_reason() {
        let service = TranslationService::new(StubLLM::new(Err(LLMError::Transport("ECONNRESET".into()))), "English");
        assert_eq!(service.translate("hola").await, TranslationResult::failure("ECONNRESET"));
    }

    #[tokio::test]
    async fn wrong_shape_is_revalidated() {
        let service = TranslationService::new(StubLLM::new(Ok(json!({"translatedText": 123}))), "English");
        assert_eq!(
            service.translate("hola").await,
            TranslationResult::failure("invalid response shape")
        );
    }

    #[tokio::test]
    async fn blank_text_skips_the_call() {
        let llm = StubLLM::new(Ok(json!({})));
        let service = TranslationService::new(llm.clone(), "English");

        assert!(!service.translate("   ").await.is_success());
        assert!(llm.seen.lock().unwrap().is_empty());
    }
}
