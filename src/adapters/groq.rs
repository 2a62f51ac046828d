use crate::adapters::llm::{ModelClient, ModelConfig, ModelError, Prompt};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct GroqClient {
    client: Client,
    config: ModelConfig,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl GroqClient {
    pub fn new(config: ModelConfig, api_key: String) -> Result<Self, ModelError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| ModelError::Unavailable(err.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl ModelClient for GroqClient {
    // One request per call, no internal retries. A failed call surfaces as
    // Unavailable/Timeout and the pipeline substitutes fallback feedback.
    async fn generate(&self, prompt: &Prompt) -> Result<String, ModelError> {
        let chat_request = ChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Unavailable(format!(
                "Groq API error ({}): {}",
                status,
                body.trim()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Unavailable(format!("undecodable Groq response: {}", err)))?;

        let content = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();

        debug!(chars = content.len(), "received model response");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

fn classify_transport_error(err: reqwest::Error) -> ModelError {
    if err.is_timeout() {
        ModelError::Timeout {
            seconds: REQUEST_TIMEOUT_SECS,
        }
    } else {
        ModelError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::PromptKind;
    use crate::core::Severity;

    fn test_prompt() -> Prompt {
        Prompt {
            kind: PromptKind::Feedback,
            system: "system".to_string(),
            user: "user".to_string(),
            comment: "Variable 'u' is a bad name.".to_string(),
            severity: Severity::Harsh,
            language: "python".to_string(),
        }
    }

    fn test_config(base_url: String) -> ModelConfig {
        ModelConfig {
            base_url: Some(base_url),
            ..ModelConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_returns_message_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"{\"positive_rephrasing\":\"ok\"}"}}]}"#,
            )
            .create_async()
            .await;

        let client = GroqClient::new(test_config(server.url()), "test-key".to_string()).unwrap();
        let content = client.generate(&test_prompt()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(content, r#"{"positive_rephrasing":"ok"}"#);
    }

    #[tokio::test]
    async fn test_generate_maps_http_error_to_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":"invalid api key"}"#)
            .create_async()
            .await;

        let client = GroqClient::new(test_config(server.url()), "bad-key".to_string()).unwrap();
        let err = client.generate(&test_prompt()).await.unwrap_err();

        assert!(matches!(err, ModelError::Unavailable(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_generate_with_empty_choices_yields_empty_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = GroqClient::new(test_config(server.url()), "test-key".to_string()).unwrap();
        let content = client.generate(&test_prompt()).await.unwrap();

        assert!(content.is_empty());
    }
}
