use crate::application::ai::AiService;
use crate::application::normalize::normalize_translation;
use crate::application::prompt::build_translation_prompt;
use crate::domain::error::AppError;
use crate::domain::model::{TranslationRequest, TranslationResult};
use tracing::{debug, error, info};
use uuid::Uuid;

const JSON_MIME: &str = "application/json";

/// Translate `request` through the provider.
///
/// Checked in order: credential, input validation, provider call, response shape.
/// Nothing is retried.
pub async fn translate_text(
    ai: &AiService,
    request: &TranslationRequest,
) -> Result<TranslationResult, AppError> {
    let client = ai.client()?;
    let target = request.validate()?;

    let request_id = Uuid::new_v4();
    let prompt = build_translation_prompt(&request.text, target);
    debug!(%request_id, target = target.code, chars = request.text.chars().count(), "Sending translation request");

    let raw = client
        .generate(prompt, None, Some(JSON_MIME))
        .await
        .inspect_err(|e| error!(%request_id, "Error in translate_text: {}", e))?;

    let result = normalize_translation(&raw, target)
        .inspect_err(|e| error!(%request_id, "Error in translate_text: {}", e))?;
    info!(%request_id, confidence = %result.confidence_level, "Translation received");
    Ok(result)
}
