use crate::domain::error::AppError;
use crate::domain::language::{find_language, Language};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two AI-backed inputs. Also identifies which input owns the microphone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Translator,
    Assistant,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Translator => "Translator",
            Feature::Assistant => "AI Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language_code: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language_code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language_code: target_language_code.into(),
        }
    }

    /// Reject blank text and unknown language codes before anything leaves the process.
    pub fn validate(&self) -> Result<&'static Language, AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation(
                "Source text cannot be empty.".to_string(),
            ));
        }
        find_language(&self.target_language_code).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported target language: {}",
                self.target_language_code
            ))
        })
    }
}

// 翻译置信度; 未知取值原样保留
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    Other(String),
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Other(s) => s,
        }
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        ConfidenceLevel::Medium
    }
}

impl From<String> for ConfidenceLevel {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "high" => ConfidenceLevel::High,
            "medium" => ConfidenceLevel::Medium,
            "low" => ConfidenceLevel::Low,
            _ => ConfidenceLevel::Other(value),
        }
    }
}

impl From<ConfidenceLevel> for String {
    fn from(value: ConfidenceLevel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized translation. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub source_language: String,
    pub target_language: String,
    pub translation: String,
    pub alternative_options: Vec<String>,
    pub context_notes: String,
    pub confidence_level: ConfidenceLevel,
    pub detected_source_language_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantAnswer {
    pub query: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        let err = TranslationRequest::new("   \n", "es").validate().unwrap_err();
        assert_eq!(err.to_string(), "Source text cannot be empty.");
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = TranslationRequest::new("Hello", "xx").validate().unwrap_err();
        assert!(err.to_string().contains("xx"));
    }

    #[test]
    fn confidence_keeps_unexpected_values() {
        assert_eq!(ConfidenceLevel::from("high".to_string()), ConfidenceLevel::High);
        let other = ConfidenceLevel::from("Very sure".to_string());
        assert_eq!(other.as_str(), "Very sure");
    }

    #[test]
    fn result_uses_camel_case_on_the_wire() {
        let result = TranslationResult {
            source_language: "English".into(),
            target_language: "Spanish".into(),
            translation: "Hola".into(),
            alternative_options: vec![],
            context_notes: String::new(),
            confidence_level: ConfidenceLevel::High,
            detected_source_language_code: "en".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["confidenceLevel"], "High");
        assert_eq!(json["detectedSourceLanguageCode"], "en");
    }
}
