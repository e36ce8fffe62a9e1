use crate::domain::error::AppError;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

/// One `generateContent` call against the generative-language provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: String,
    pub system_instruction: Option<String>,
    /// Hint asking the provider to constrain its output, e.g. `application/json`.
    pub response_mime_type: Option<String>,
}

/// Trait for generative-language providers
///
/// Implementations return the concatenated candidate text. Any failure of the
/// underlying call is reported as a transport error.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(&self, request: &GenerateRequest) -> Result<String, AppError>;
}

/// A piece of recognised speech. Interim segments may still change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Results(Vec<TranscriptSegment>),
    Error(String),
    End,
}

/// A recogniser event tagged with the capture that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechUpdate {
    pub capture: u64,
    pub event: SpeechEvent,
}

/// Trait for a speech-to-text facility
///
/// `start` begins capture number `capture`; every event it produces is pushed
/// to `events` tagged with that number, until an `End` or `Error` event is sent.
pub trait SpeechRecognizer: Send {
    fn start(
        &mut self,
        capture: u64,
        locale: &str,
        events: UnboundedSender<SpeechUpdate>,
    ) -> Result<(), AppError>;

    fn stop(&mut self);
}

/// Trait for named-value persistence (the theme preference lives here)
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&self, key: &str) -> Result<(), AppError>;
}
