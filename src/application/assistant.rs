use crate::application::ai::AiService;
use crate::application::prompt::assistant_system_instruction;
use crate::domain::error::AppError;
use crate::domain::model::AssistantAnswer;
use tracing::{debug, error};
use uuid::Uuid;

/// Ask the assistant. The provider's text is returned verbatim.
pub async fn ask_assistant(ai: &AiService, query: &str) -> Result<AssistantAnswer, AppError> {
    let client = ai.client()?;
    if query.trim().is_empty() {
        return Err(AppError::Validation("Query cannot be empty.".to_string()));
    }

    let request_id = Uuid::new_v4();
    debug!(%request_id, "Sending assistant query");

    let answer = client
        .generate(query.to_string(), Some(assistant_system_instruction()), None)
        .await
        .inspect_err(|e| error!(%request_id, "Error in ask_assistant: {}", e))?;

    Ok(AssistantAnswer {
        query: query.to_string(),
        answer,
    })
}
