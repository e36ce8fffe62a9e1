//! 测试用的假 AI 后端

use async_trait::async_trait;
use hnai::application::ai::{AiClient, AiService};
use hnai::domain::error::AppError;
use hnai::domain::traits::{GenerateRequest, GenerativeBackend};
use std::sync::{Arc, Mutex};

/// Replays one canned reply and records every request it receives.
pub struct FakeBackend {
    reply: Result<String, String>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl FakeBackend {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> GenerateRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate_content(&self, request: &GenerateRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(AppError::Transport)
    }
}

pub fn ready(backend: &Arc<FakeBackend>) -> AiService {
    AiService::Ready(AiClient::new(backend.clone(), "gemini-2.5-flash"))
}
