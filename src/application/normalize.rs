use crate::domain::error::AppError;
use crate::domain::language::Language;
use crate::domain::model::{ConfidenceLevel, TranslationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("fence pattern is valid")
});

/// Return the interior of a fenced block, or the trimmed text when there is no fence.
pub fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCE_RE.captures(trimmed).and_then(|caps| caps.get(2)) {
        Some(inner) if !inner.as_str().trim().is_empty() => inner.as_str().trim(),
        _ => trimmed,
    }
}

/// Turn raw provider output into a fully populated [`TranslationResult`].
///
/// Absent, null, empty or mistyped fields fall back to defaults; `targetLanguage`
/// falls back to the requested language's name. Output that is not a JSON
/// object fails with [`AppError::MalformedResponse`] carrying `raw`.
pub fn normalize_translation(
    raw: &str,
    requested: &Language,
) -> Result<TranslationResult, AppError> {
    let content = strip_fences(raw);

    let value: Value = serde_json::from_str(content).map_err(|e| {
        warn!("Failed to parse JSON response: {}", e);
        AppError::MalformedResponse {
            raw: raw.to_string(),
        }
    })?;

    let Value::Object(fields) = value else {
        warn!("Provider output is valid JSON but not an object");
        return Err(AppError::MalformedResponse {
            raw: raw.to_string(),
        });
    };

    Ok(TranslationResult {
        source_language: text_field(&fields, "sourceLanguage")
            .unwrap_or_else(|| "Unknown".to_string()),
        target_language: text_field(&fields, "targetLanguage")
            .unwrap_or_else(|| requested.name.to_string()),
        translation: text_field(&fields, "translation").unwrap_or_default(),
        alternative_options: list_field(&fields, "alternativeOptions"),
        context_notes: text_field(&fields, "contextNotes").unwrap_or_default(),
        confidence_level: text_field(&fields, "confidenceLevel")
            .map(ConfidenceLevel::from)
            .unwrap_or_default(),
        detected_source_language_code: text_field(&fields, "detectedSourceLanguageCode")
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

// 非字符串元素直接丢弃
fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
