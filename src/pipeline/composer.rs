use chrono::{DateTime, Utc};

use crate::platform::{IncomingMessage, ReplyArtifact, DEFAULT_ACCENT_COLOR};
use crate::translate::TranslationResult;

pub const ERROR_FOOTER: &str = "Error occurred";
pub const LANGUAGE_FOOTER_PREFIX: &str = "Original language: ";

/// Builds reply artifacts from translation results.
///
/// A success whose detected language equals the target name exactly
/// (case-sensitive) yields no reply. Models that answer "english" or "en"
/// are therefore translated again; see DESIGN.md.
#[derive(Debug, Clone)]
pub struct ReplyComposer {
    target_language: String,
    color: u32,
}

impl ReplyComposer {
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            color: DEFAULT_ACCENT_COLOR,
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn compose(&self, original: &IncomingMessage, result: &TranslationResult) -> Option<ReplyArtifact> {
        self.compose_at(original, result, Utc::now())
    }

    pub fn compose_at(
        &self,
        original: &IncomingMessage,
        result: &TranslationResult,
        timestamp: DateTime<Utc>,
    ) -> Option<ReplyArtifact> {
        let (body_text, footer_text) = match result {
            TranslationResult::Success {
                detected_language, ..
            } if *detected_language == self.target_language => return None,
            TranslationResult::Success {
                translated_text,
                detected_language,
            } => (
                translated_text.clone(),
                format!("{}{}", LANGUAGE_FOOTER_PREFIX, detected_language),
            ),
            TranslationResult::Failure { reason } => (reason.clone(), ERROR_FOOTER.to_string()),
        };

        Some(ReplyArtifact {
            color: self.color,
            author_name: original.author_display_name.clone(),
            author_icon_url: original.author_avatar_url.clone(),
            body_text,
            footer_text,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original() -> IncomingMessage {
        IncomingMessage {
            id: "10".into(),
            channel_id: "20".into(),
            author_id: "30".into(),
            author_display_name: "luc".into(),
            author_avatar_url: "https://cdn.example/luc.png".into(),
            is_from_automated_account: false,
            raw_content: "Bonjour tout le monde".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn foreign_language_gets_translation_reply() {
        let composer = ReplyComposer::new("English");
        let artifact = composer
            .compose(&original(), &TranslationResult::success("Hello everyone", "French"))
            .unwrap();

        assert_eq!(artifact.body_text, "Hello everyone");
        assert_eq!(artifact.footer_text, "Original language: French");
        assert_eq!(artifact.author_name, "luc");
        assert_eq!(artifact.author_icon_url, "https://cdn.example/luc.png");
        assert_eq!(artifact.color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn target_language_gets_no_reply() {
        let composer = ReplyComposer::new("English");
        assert!(composer
            .compose(&original(), &TranslationResult::success("hello there", "English"))
            .is_none());
    }

    #[test]
    fn target_match_is_case_sensitive() {
        let composer = ReplyComposer::new("English");
        let artifact = composer
            .compose(&original(), &TranslationResult::success("hello there", "english"))
            .unwrap();
        assert_eq!(artifact.footer_text, "Original language: english");
    }

    #[test]
    fn failure_reason_becomes_body() {
        let composer = ReplyComposer::new("English").with_color(0xff0000);
        let artifact = composer
            .compose(&original(), &TranslationResult::failure("ECONNRESET"))
            .unwrap();

        assert_eq!(artifact.body_text, "ECONNRESET");
        assert_eq!(artifact.footer_text, ERROR_FOOTER);
        assert_eq!(artifact.color, 0xff0000);
    }

    #[test]
    fn composing_twice_is_identical() {
        let composer = ReplyComposer::new("English");
        let result = TranslationResult::success("Good evening", "Portuguese");
        let at = Utc::now();

        assert_eq!(
            composer.compose_at(&original(), &result, at),
            composer.compose_at(&original(), &result, at)
        );
    }
}
