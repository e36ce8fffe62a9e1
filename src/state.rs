use crate::application::ai::{AiClient, AiService};
use crate::domain::error::AppError;
use crate::domain::traits::PreferenceStore;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use std::sync::Arc;

/// Everything the views share. Built once at start-up and passed down explicitly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ai: AiService,
    pub prefs: Arc<dyn PreferenceStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        api_key: Option<String>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Result<Self, AppError> {
        let http_client = create_client(&config)?;
        let ai = AiService::from_init(AiClient::init(api_key.as_deref(), &config, http_client));
        Ok(Self::with_ai(config, ai, prefs))
    }

    pub fn with_ai(config: Config, ai: AiService, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            config: Arc::new(config),
            ai,
            prefs,
        }
    }
}
