//! LLM API client module
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint (Groq by default).

use async_trait::async_trait;
use once_cell::sync::Lazy;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::BotError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Single-shot text generation from a fully rendered prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, BotError>;
}

/// LLM API client backed by a hosted chat-completions endpoint
pub struct LlmClient {
    api_key: String,
    base_url: String,
    model_name: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, base_url: String, model_name: String) -> Self {
        Self {
            api_key,
            base_url,
            model_name,
        }
    }

    pub fn build_prompt(&self, prompt: &str) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(prompt.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }]
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Converts chat messages into the wire JSON the completions endpoint expects.
pub fn build_request_body(model: &str, prompt: &[ChatCompletionMessage]) -> Value {
    let messages: Vec<Value> = prompt
        .iter()
        .map(|msg| {
            let role_str = match msg.role {
                MessageRole::system => "system",
                MessageRole::user => "user",
                MessageRole::assistant => "assistant",
                MessageRole::function => "function",
                MessageRole::tool => "tool",
            };

            let content_val = match &msg.content {
                Content::Text(text) => json!(text),
                Content::ImageUrl(_) => json!(""),
            };

            json!({
                "role": role_str,
                "content": content_val
            })
        })
        .collect();

    json!({
        "model": model,
        "messages": messages
    })
}

/// Pulls the first choice's text out of a completions response.
pub fn extract_completion_text(response_json: &Value) -> Result<String, BotError> {
    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .filter(|text| !text.trim().is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| BotError::LlmError("No text in response".to_string()))
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting completion from {} (~{} input tokens)",
            self.model_name,
            estimate_tokens(prompt)
        );

        let request_body = build_request_body(&self.model_name, &self.build_prompt(prompt));

        let response = HTTP_CLIENT
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("LLM request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BotError::LlmError(format!("HTTP {status}: {error_text}")));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| BotError::LlmError(format!("Failed to parse LLM response: {e}")))?;

        let text = extract_completion_text(&response_json)?;
        debug!("Completion returned {} chars", text.len());
        Ok(text)
    }
}
