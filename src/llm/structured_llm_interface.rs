use async_trait::async_trait;
use serde_json::Value;

/// Failure of a structured model call.
///
/// `Display` is the reason shown to users, so variants carry readable text.
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("{0}")]
    Transport(String),

    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(e: reqwest::Error) -> Self {
        LLMError::Transport(e.to_string())
    }
}

/// Interface for a stateless model that answers with a schema-shaped object.
/// Providers differ only in transport; the caller never branches on them.
#[async_trait]
pub trait StructuredLLMInterface: Send + Sync {
    /// Ask the model for an object conforming to `schema`.
    ///
    /// The returned value is not trusted to match the schema.
    async fn generate_object(
        &self,
        system: &str,
        user: &str,
        schema: &Value,
    ) -> Result<Value, LLMError>;

    /// Provider name used in logs
    fn provider(&self) -> &str;
}

/// Read a JSON body, turning non-2xx statuses into `LLMError::Status`
pub(crate) async fn read_json_body(response: reqwest::Response) -> Result<Value, LLMError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LLMError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| LLMError::MalformedResponse(e.to_string()))
}

/// Parse model text that should hold a single JSON object.
/// Tolerates a surrounding markdown code fence.
pub(crate) fn parse_object_text(text: &str) -> Result<Value, LLMError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim()).map_err(|e| LLMError::MalformedResponse(e.to_string()))
}
