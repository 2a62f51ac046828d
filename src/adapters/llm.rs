use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_name: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "llama3-8b-8192".to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.25,
            max_tokens: 900,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("model timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Feedback,
    Summary,
}

// One composed model request. The comment/severity/language triple rides
// along so the mock client can stay deterministic per input without
// re-parsing the rendered prompt text.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub system: String,
    pub user: String,
    pub comment: String,
    pub severity: Severity,
    pub language: String,
}

#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ModelError>;
    fn model_name(&self) -> &str;
}

pub fn create_client(config: &ModelConfig) -> Box<dyn ModelClient> {
    let api_key = config
        .api_key
        .clone()
        .or_else(|| std::env::var("GROQ_API_KEY").ok())
        .filter(|key| !key.trim().is_empty());

    match api_key {
        Some(key) => match crate::adapters::GroqClient::new(config.clone(), key) {
            Ok(client) => {
                info!(model = %config.model_name, "using live Groq client");
                Box::new(client)
            }
            Err(err) => {
                warn!(%err, "failed to build live client, falling back to mock");
                Box::new(crate::adapters::MockClient::new())
            }
        },
        None => {
            info!("no API credential configured, using deterministic mock client");
            Box::new(crate::adapters::MockClient::new())
        }
    }
}
