//! OpenRouter API client for LLM interactions.
//!
//! One client is constructed at startup and shared read-only across all
//! request handlers. Sampling temperature is pinned to 0 so repeated calls
//! over the same label text stay deterministic.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// OpenRouter client for chat completions.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenRouterClient {
    /// Create a new client, reading the API key from OPENROUTER_API_KEY.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .context("OPENROUTER_API_KEY environment variable not set")?;
        Ok(Self::new(api_key, model))
    }

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_url: OPENROUTER_API_URL.to_string(),
        }
    }

    /// Point the client at a different completions endpoint (used by tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Send a chat completion request, returning the first choice's content
    /// with surrounding whitespace trimmed.
    pub async fn chat(&self, messages: Vec<Message>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.0,
            max_tokens: Some(16384),
            response_format: None,
        };

        self.send_request(request).await
    }

    /// Send a chat completion request constrained to a JSON schema, and
    /// parse the completion into `T`.
    pub async fn chat_json<T: for<'de> Deserialize<'de>>(
        &self,
        messages: Vec<Message>,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<T> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.0,
            max_tokens: Some(16384),
            response_format: Some(ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: schema_name.to_string(),
                    schema,
                },
            }),
        };

        let response = self.send_request(request).await?;
        let parsed: T =
            serde_json::from_str(&response).context("Failed to parse LLM response as JSON")?;
        Ok(parsed)
    }

    async fn send_request(&self, request: ChatCompletionRequest) -> Result<String> {
        debug!("Sending request to OpenRouter: model={}", request.model);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenRouter")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenRouter API error ({}): {}", status, error_text);
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter response")?;

        info!(
            "OpenRouter response: {} tokens (prompt: {}, completion: {})",
            response.usage.total_tokens,
            response.usage.prompt_tokens,
            response.usage.completion_tokens
        );

        content_from_response(response)
    }
}

/// Extract the first choice's content. A completion without choices or
/// content is a malformed response, not an empty success.
fn content_from_response(response: ChatCompletionResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .context("Chat completion contained no choices")?
        .message
        .content
        .context("Chat completion message had no content")?;

    Ok(content.trim().to_string())
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ============================================================================
// Message types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ChatCompletionResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_pins_temperature_to_zero() {
        let request = ChatCompletionRequest {
            model: "google/gemini-2.0-flash-exp".to_string(),
            messages: vec![Message::system("extract"), Message::user("2 cups flour")],
            temperature: 0.0,
            max_tokens: Some(16384),
            response_format: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "2 cups flour");
        // No response_format key unless one was requested.
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_content_is_trimmed() {
        let resp = response(
            r#"{
                "choices": [{"message": {"content": "\nFlour\nEgg\nSalt\n\n"}}],
                "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
            }"#,
        );
        assert_eq!(content_from_response(resp).unwrap(), "Flour\nEgg\nSalt");
    }

    #[test]
    fn test_missing_choices_is_an_error() {
        let resp = response(
            r#"{"choices": [], "usage": {"prompt_tokens": 1, "completion_tokens": 0, "total_tokens": 1}}"#,
        );
        assert!(content_from_response(resp).is_err());
    }

    #[test]
    fn test_missing_content_is_an_error() {
        let resp = response(
            r#"{
                "choices": [{"message": {}}],
                "usage": {"prompt_tokens": 1, "completion_tokens": 0, "total_tokens": 1}
            }"#,
        );
        assert!(content_from_response(resp).is_err());
    }
}
