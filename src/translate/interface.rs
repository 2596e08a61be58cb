/// Text handed to the translation capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
}

impl TranslationRequest {
    /// `None` when the text is empty after trimming
    pub fn new(source_text: &str) -> Option<Self> {
        if source_text.trim().is_empty() {
            return None;
        }
        Some(Self {
            source_text: source_text.to_string(),
        })
    }
}

/// Outcome of one translation attempt.
///
/// `detected_language` is a human-readable name such as "French", as the
/// model is prompted to produce, not an ISO code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Success {
        translated_text: String,
        detected_language: String,
    },
    Failure {
        reason: String,
    },
}

impl TranslationResult {
    pub fn success(translated_text: impl Into<String>, detected_language: impl Into<String>) -> Self {
        TranslationResult::Success {
            translated_text: translated_text.into(),
            detected_language: detected_language.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        TranslationResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranslationResult::Success { .. })
    }
}
