use crate::domain::error::{AppError, API_KEY_MISSING};
use crate::domain::traits::{GenerateRequest, GenerativeBackend};
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::GeminiClient;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// A ready handle onto the generative-language provider.
#[derive(Clone)]
pub struct AiClient {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
}

impl AiClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// One-time start-up initialisation. A missing credential is a typed
    /// configuration error, never a panic.
    pub fn init(api_key: Option<&str>, config: &Config, http: Client) -> Result<Self, AppError> {
        let Some(api_key) = api_key.map(str::trim).filter(|key| !key.is_empty()) else {
            error!("CRITICAL: {}", API_KEY_MISSING);
            return Err(AppError::Config(API_KEY_MISSING.to_string()));
        };

        info!(model = %config.model, base_url = %config.api_base_url, "Initialized AI client");
        let backend = GeminiClient::new(http, config.api_base_url.clone(), api_key);
        Ok(Self::new(Arc::new(backend), config.model.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(
        &self,
        contents: String,
        system_instruction: Option<&str>,
        response_mime_type: Option<&str>,
    ) -> Result<String, AppError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            contents,
            system_instruction: system_instruction.map(str::to_string),
            response_mime_type: response_mime_type.map(str::to_string),
        };
        self.backend.generate_content(&request).await
    }
}

// 不打印后端, 其中带有密钥
impl fmt::Debug for AiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Outcome of start-up initialisation, consulted before every AI action.
#[derive(Debug, Clone)]
pub enum AiService {
    Ready(AiClient),
    Unavailable(String),
}

impl AiService {
    pub fn from_init(result: Result<AiClient, AppError>) -> Self {
        match result {
            Ok(client) => AiService::Ready(client),
            Err(AppError::Config(reason)) => AiService::Unavailable(reason),
            Err(e) => AiService::Unavailable(e.to_string()),
        }
    }

    /// The ready client, or the same configuration error from every entry point.
    pub fn client(&self) -> Result<&AiClient, AppError> {
        match self {
            AiService::Ready(client) => Ok(client),
            AiService::Unavailable(reason) => Err(AppError::Config(reason.clone())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AiService::Ready(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            AiService::Ready(_) => None,
            AiService::Unavailable(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_a_configuration_error() {
        for key in [None, Some(""), Some("   ")] {
            let result = AiClient::init(key, &Config::default(), Client::new());
            let service = AiService::from_init(result);
            assert!(!service.is_ready());
            assert_eq!(service.unavailable_reason(), Some(API_KEY_MISSING));
            assert!(service.client().unwrap_err().is_persistent());
        }
    }

    #[test]
    fn key_gives_ready_client() {
        let mut config = Config::default();
        config.model = "gemini-test".to_string();
        let service = AiService::from_init(AiClient::init(Some("k"), &config, Client::new()));
        assert!(service.is_ready());
        assert_eq!(service.client().unwrap().model(), "gemini-test");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let client = AiClient::init(Some("secret-key-123"), &Config::default(), Client::new()).unwrap();
        let printed = format!("{:?}", AiService::Ready(client));
        assert!(printed.contains(&Config::default().model));
        assert!(!printed.contains("secret-key-123"));
    }
}
