//! OpenAI-compatible completion provider
//!
//! Sends each prompt as a single-turn Chat Completions request. Works with
//! any endpoint that speaks the same protocol (OpenAI, Azure-style proxies,
//! local servers).

use super::types::{ChatRequest, error_for_status, extract_content};
use async_trait::async_trait;
use scholar_application::{CompletionProvider, ProviderError};
use scholar_domain::Model;
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for [`OpenAiCompletionProvider`]
///
/// Built explicitly by the caller (typically from the `[provider]` config
/// section); the adapter never reads the environment itself.
#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: Model,
    pub temperature: Option<f32>,
    /// Transport-level timeout for one HTTP request
    pub request_timeout: Option<Duration>,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: Model) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model,
            temperature: None,
            request_timeout: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// [`CompletionProvider`] backed by an OpenAI-compatible HTTP API
pub struct OpenAiCompletionProvider {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiCompletionProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "OpenAI provider initialized (model: {}, endpoint: {})",
            settings.model, settings.base_url
        );

        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &Model {
        &self.settings.model
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest::single_user_message(
            self.settings.model.as_str(),
            prompt,
            self.settings.temperature,
        );

        debug!("POST {} ({} prompt bytes)", self.settings.completions_url(), prompt.len());

        let response = self
            .client
            .post(self.settings.completions_url())
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.settings.request_timeout.unwrap_or_default())
                } else {
                    ProviderError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), &body));
        }

        extract_content(&body)
    }
}
