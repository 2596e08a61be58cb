use serde_json::{json, Value};

use super::interface::TranslationResult;

pub const INVALID_SHAPE: &str = "invalid response shape";

/// Shape every translation answer must have:
/// `{ "translatedText": string, "detectedLanguage": string }`
pub struct ResponseContract;

impl ResponseContract {
    /// JSON schema sent to the model
    pub fn schema(target_language: &str) -> Value {
        json!({
            "type": "object",
            "properties": {
                "translatedText": {
                    "type": "string",
                    "description": format!("the translated text into {}", target_language),
                },
                "detectedLanguage": {
                    "type": "string",
                    "description": "the detected language, French, English, Spanish etc",
                },
            },
            "required": ["translatedText", "detectedLanguage"],
            "additionalProperties": false,
        })
    }

    /// Check an untrusted model answer.
    /// Extra fields are ignored; both required fields must be strings.
    pub fn validate(raw: &Value) -> TranslationResult {
        let translated = raw.get("translatedText").and_then(Value::as_str);
        let detected = raw.get("detectedLanguage").and_then(Value::as_str);

        match (translated, detected) {
            (Some(translated_text), Some(detected_language)) => {
                TranslationResult::success(translated_text, detected_language)
            }
            _ => TranslationResult::failure(INVALID_SHAPE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_object_passes() {
        let result = ResponseContract::validate(&json!({
            "translatedText": "Hello everyone",
            "detectedLanguage": "French"
        }));
        assert_eq!(result, TranslationResult::success("Hello everyone", "French"));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let result = ResponseContract::validate(&json!({
            "translatedText": "ok",
            "detectedLanguage": "Dutch",
            "confidence": 0.9
        }));
        assert!(result.is_success());
    }

    #[test]
    fn wrong_type_fails() {
        let result = ResponseContract::validate(&json!({ "translatedText": 123 }));
        assert_eq!(result, TranslationResult::failure(INVALID_SHAPE));
    }

    #[test]
    fn null_or_missing_field_fails() {
        for raw in [
            json!({ "translatedText": "x", "detectedLanguage": null }),
            json!({ "detectedLanguage": "French" }),
            json!("just a string"),
            json!([]),
            Value::Null,
        ] {
            assert_eq!(ResponseContract::validate(&raw), TranslationResult::failure(INVALID_SHAPE));
        }
    }

    #[test]
    fn schema_requires_both_fields() {
        let schema = ResponseContract::schema("English");
        assert_eq!(schema["required"], json!(["translatedText", "detectedLanguage"]));
        assert_eq!(
            schema["properties"]["translatedText"]["description"],
            "the translated text into English"
        );
    }
}
