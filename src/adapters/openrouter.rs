use crate::adapters::ensure_success;
use crate::domain::model::ChatMessage;
use crate::domain::ports::LanguageModel;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenRouter (OpenAI 相容) chat completions 客戶端
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenRouterClient {
    pub fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
            temperature: 0.2,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModel for OpenRouterClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = self.chat_completions_url();
        tracing::debug!(
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            "OpenRouter chat create"
        );

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response = ensure_success("OpenRouter", response).await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&response.bytes().await?)?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GatewayError::ProcessingError {
                message: "OpenRouter returned an empty completion".to_string(),
            });
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> OpenRouterClient {
        OpenRouterClient::new(
            Client::new(),
            server.url("/api/v1/"),
            "sk-or-test".to_string(),
            DEFAULT_MODEL.to_string(),
        )
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/chat/completions")
                .header("authorization", "Bearer sk-or-test")
                .json_body_partial(r#"{"model": "google/gemini-2.0-flash-001"}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "gen-1",
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": "Tokio is a runtime [1]."}},
                        {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
                    ]
                }));
        });

        let answer = client_for(&server)
            .complete(&[ChatMessage::user("what is tokio?")])
            .await
            .unwrap();

        mock.assert();
        assert_eq!(answer, "Tokio is a runtime [1].");
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_choices() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"choices": []}));
        });

        let err = client_for(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ProcessingError { .. }));
    }

    #[tokio::test]
    async fn test_complete_maps_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(401)
                .body(r#"{"error":{"message":"No auth credentials found","code":401}}"#);
        });

        let err = client_for(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("OpenRouter API error 401"));
        assert!(err.to_string().contains("No auth credentials found"));
    }
}
