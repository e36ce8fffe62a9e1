use crate::domain::model::Feature;
use thiserror::Error;

/// Message recorded when the service credential is absent at start-up.
pub const API_KEY_MISSING: &str = "API_KEY environment variable not set. Please ensure it is configured. AI functionalities are disabled.";

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing credential. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("The AI returned an invalid JSON format. The raw response was: {raw}")]
    MalformedResponse { raw: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    SpeechUnavailable(String),

    #[error("Speech recognition error: {0}. Please ensure microphone access is granted.")]
    Speech(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Start-up error: {0}")]
    Init(String),
}

/// Coarse classification used by callers to decide how an error is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    MalformedResponse,
    Transport,
    Capability,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) => ErrorKind::Configuration,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            AppError::Transport(_) | AppError::Http(_) => ErrorKind::Transport,
            AppError::SpeechUnavailable(_) | AppError::Speech(_) => ErrorKind::Capability,
            AppError::Json(_) | AppError::Io(_) | AppError::Toml(_) | AppError::Init(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Provider output that failed to parse, kept for diagnostics.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AppError::MalformedResponse { raw } => Some(raw),
            _ => None,
        }
    }

    /// Configuration errors stay until the process is restarted with a credential;
    /// everything else can be retried by resubmitting.
    pub fn is_persistent(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// The message shown in the view that triggered the failing action.
    pub fn user_message(&self, feature: Feature) -> String {
        match (self.kind(), feature) {
            (ErrorKind::Configuration, Feature::Translator) => {
                "Translation service unavailable: API Key is missing.".to_string()
            }
            (ErrorKind::Configuration, Feature::Assistant) => {
                "AI Assistant is unavailable due to a missing API key configuration.".to_string()
            }
            (ErrorKind::Validation, _) | (ErrorKind::Capability, _) => self.to_string(),
            (_, Feature::Translator) => format!(
                "Translation failed: {}. Ensure API_KEY is valid and the service is reachable.",
                self
            ),
            (_, Feature::Assistant) => format!("Assistant failed: {}.", self),
        }
    }
}
