//! 翻译流程测试

mod common;

use common::{ready, FakeBackend};
use hnai::application::ai::{AiClient, AiService};
use hnai::application::translate::translate_text;
use hnai::domain::error::{AppError, ErrorKind};
use hnai::domain::model::{ConfidenceLevel, Feature, TranslationRequest};
use hnai::infrastructure::config::Config;

const HOLA: &str = r#"{
  "sourceLanguage": "English",
  "targetLanguage": "Spanish",
  "translation": "Hola",
  "alternativeOptions": ["Buenas", "Qué tal"],
  "contextNotes": "Informal greeting.",
  "confidenceLevel": "High",
  "detectedSourceLanguageCode": "en"
}"#;

#[tokio::test]
async fn test_hello_to_spanish() {
    let backend = FakeBackend::replying(HOLA);
    let result = translate_text(&ready(&backend), &TranslationRequest::new("Hello", "es"))
        .await
        .unwrap();

    assert_eq!(result.translation, "Hola");
    assert_eq!(result.target_language, "Spanish");
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert_eq!(result.alternative_options.len(), 2);

    let request = backend.last_request();
    assert_eq!(request.model, "gemini-2.5-flash");
    assert_eq!(request.response_mime_type.as_deref(), Some("application/json"));
    assert!(request.system_instruction.is_none());
    assert_eq!(request.contents.matches("Spanish").count(), 1);
    assert_eq!(request.contents.matches("Hello").count(), 1);
}

#[tokio::test]
async fn test_fenced_reply_matches_plain_reply() {
    let plain = FakeBackend::replying(HOLA);
    let fenced = FakeBackend::replying(&format!("```json\n{}\n```", HOLA));
    let request = TranslationRequest::new("Hello", "es");

    let a = translate_text(&ready(&plain), &request).await.unwrap();
    let b = translate_text(&ready(&fenced), &request).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_sparse_reply_gets_defaults() {
    let backend = FakeBackend::replying(r#"{"translation": "Bonjour", "confidenceLevel": 3}"#);
    let result = translate_text(&ready(&backend), &TranslationRequest::new("Hello", "FR"))
        .await
        .unwrap();

    assert_eq!(result.translation, "Bonjour");
    assert_eq!(result.source_language, "Unknown");
    assert_eq!(result.target_language, "French");
    assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    assert_eq!(result.detected_source_language_code, "unknown");
    assert!(result.alternative_options.is_empty());
}

#[tokio::test]
async fn test_missing_key_is_reported_before_anything_else() {
    let ai = AiService::from_init(AiClient::init(None, &Config::default(), reqwest::Client::new()));
    // empty text would also be invalid; the credential is checked first
    let err = translate_text(&ai, &TranslationRequest::new("", "xx"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(
        err.user_message(Feature::Translator),
        "Translation service unavailable: API Key is missing."
    );
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_provider() {
    let backend = FakeBackend::replying(HOLA);
    let ai = ready(&backend);

    let err = translate_text(&ai, &TranslationRequest::new("   ", "es"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Source text cannot be empty.");

    let err = translate_text(&ai, &TranslationRequest::new("Hello", "xx"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported target language: xx");

    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_unparseable_reply_keeps_raw_text() {
    let backend = FakeBackend::replying("Sorry, I can't help with that.");
    let err = translate_text(&ready(&backend), &TranslationRequest::new("Hello", "de"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(err.raw_response(), Some("Sorry, I can't help with that."));
    assert_eq!(
        err.user_message(Feature::Translator),
        "Translation failed: The AI returned an invalid JSON format. The raw response was: Sorry, I can't help with that.. Ensure API_KEY is valid and the service is reachable."
    );
}

#[tokio::test]
async fn test_non_object_json_is_malformed() {
    let backend = FakeBackend::replying(r#"["Hola"]"#);
    let err = translate_text(&ready(&backend), &TranslationRequest::new("Hello", "es"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_transport_failure_message() {
    let backend = FakeBackend::failing("connection refused");
    let err = translate_text(&ready(&backend), &TranslationRequest::new("Hello", "ja"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(
        err.user_message(Feature::Translator),
        "Translation failed: connection refused. Ensure API_KEY is valid and the service is reachable."
    );
    assert_eq!(backend.calls(), 1);
}
