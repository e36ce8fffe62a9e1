use crate::domain::error::AppError;
use crate::domain::traits::{GenerateRequest, GenerativeBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Gemini generateContent request structures
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartOut<'a>>,
}

#[derive(Serialize, Debug)]
struct PartOut<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

// Gemini generateContent response structures
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartIn>,
}

#[derive(Deserialize, Debug)]
struct PartIn {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Gemini REST implementation of [`GenerativeBackend`]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(&self, request: &GenerateRequest) -> Result<String, AppError> {
        let url = self.endpoint(&request.model);
        debug!(model = %request.model, "POST generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "Provider returned an error");
            return Err(provider_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::Transport(format!("Unexpected response from the AI service: {}", e))
        })?;
        extract_text(parsed)
    }
}

fn request_body(request: &GenerateRequest) -> GenerateContentBody<'_> {
    GenerateContentBody {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![PartOut {
                text: &request.contents,
            }],
        }],
        system_instruction: request.system_instruction.as_deref().map(|text| Content {
            role: None,
            parts: vec![PartOut { text }],
        }),
        generation_config: request
            .response_mime_type
            .as_deref()
            .map(|response_mime_type| GenerationConfig { response_mime_type }),
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, AppError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(AppError::Transport(format!(
            "The request was blocked by the AI service ({})",
            reason
        )));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(AppError::Transport(
            "The AI service returned no candidates".to_string(),
        ));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
            return Err(AppError::Transport(format!(
                "The AI service stopped without output ({})",
                reason
            )));
        }
    }

    Ok(text)
}

fn provider_error(status: u16, body: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| match (envelope.error.message, envelope.error.status) {
            (Some(message), Some(code)) => Some(format!("{} ({})", message, code)),
            (Some(message), None) => Some(message),
            (None, code) => code,
        })
        .unwrap_or_else(|| body.trim().to_string());

    AppError::Transport(format!("AI service error {}: {}", status, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(system: Option<&str>, mime: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            model: "gemini-test".to_string(),
            contents: "Hello".to_string(),
            system_instruction: system.map(str::to_string),
            response_mime_type: mime.map(str::to_string),
        }
    }

    #[test]
    fn json_hint_lands_in_generation_config() {
        let body = serde_json::to_value(request_body(&request(None, Some("application/json"))))
            .unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn system_instruction_is_sent_separately() {
        let body = serde_json::to_value(request_body(&request(Some("Be nice"), None))).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be nice");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn candidate_parts_are_concatenated() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hel"},{"text":"lo"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Hello");
    }

    #[test]
    fn blocked_prompt_is_a_transport_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn provider_error_message_is_kept() {
        let err = provider_error(
            400,
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
        );
        assert_eq!(
            err.to_string(),
            "AI service error 400: API key not valid. (INVALID_ARGUMENT)"
        );
    }

    #[test]
    fn non_json_error_body_is_passed_through() {
        let err = provider_error(502, "  Bad Gateway \n");
        assert_eq!(err.to_string(), "AI service error 502: Bad Gateway");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(Client::new(), "https://example.test/v1beta/", "k");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
