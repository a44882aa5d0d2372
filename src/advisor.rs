//! LLM provider clients for the chat endpoints
//!
//! The reasoning itself is delegated: this module only owns the capability
//! seam (`Advisor`) and thin chat-completions clients over it. Clients hold
//! a long-lived pooled `reqwest::Client`; there is no retry or caching,
//! callers treat every answer as fallible.

use crate::error::ApiError;
use crate::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Capability interface for answering a financial question.
#[async_trait::async_trait]
pub trait Advisor: Send + Sync {
    async fn answer(&self, query: &str) -> Result<String>;
}

const NEBIUS_BASE_URL: &str = "https://api.studio.nebius.ai/v1/chat/completions";
const NEBIUS_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";

const GROK_BASE_URL: &str = "https://api.grok.x/v1/chat/completions";
const GROK_MODEL: &str = "grok-2";

const SYSTEM_PROMPT: &str = "You are an AI investment assistant. \
You are here to help users with investment-related questions. \
Provide clear, helpful, and accurate financial advice.";

/// Nebius-hosted LLaMa client backing `/chat`.
pub struct NebiusClient {
    inner: ChatCompletionsClient,
}

impl NebiusClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            inner: ChatCompletionsClient::new(
                "Nebius",
                NEBIUS_BASE_URL.to_string(),
                NEBIUS_MODEL.to_string(),
                api_key,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Advisor for NebiusClient {
    async fn answer(&self, query: &str) -> Result<String> {
        self.inner.complete(query).await
    }
}

/// Grok client backing `/agent`.
pub struct GrokClient {
    inner: ChatCompletionsClient,
}

impl GrokClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            inner: ChatCompletionsClient::new(
                "Grok",
                GROK_BASE_URL.to_string(),
                GROK_MODEL.to_string(),
                api_key,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Advisor for GrokClient {
    async fn answer(&self, query: &str) -> Result<String> {
        self.inner.complete(query).await
    }
}

/// Shared OpenAI-style chat-completions client (connection-pooled).
struct ChatCompletionsClient {
    provider: &'static str,
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    fn new(
        provider: &'static str,
        base_url: String,
        model: String,
        api_key: Option<String>,
    ) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            provider,
            client,
            base_url,
            model,
            api_key,
        }
    }

    async fn complete(&self, query: &str) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            return Err(ApiError::Provider(format!(
                "{} API key not configured",
                self.provider
            )));
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: query.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 1000,
        };

        info!("Calling {} chat completions API", self.provider);

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("{} API request failed: {}", self.provider, e);
                ApiError::Provider(format!("{} API error: {}", self.provider, e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("{} API error response: {}", self.provider, error_text);
            return Err(ApiError::Provider(format!(
                "{} API error: {}",
                self.provider, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse {} response: {}", self.provider, e);
            ApiError::Provider(format!("{} parse error: {}", self.provider, e))
        })?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                ApiError::Provider(format!("Empty response from {} API", self.provider))
            })?;

        info!("{} response received", self.provider);

        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}
