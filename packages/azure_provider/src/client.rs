//! Azure OpenAI chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use codeglance_ai_provider::{AiProvider, AiProviderError};
use codeglance_ai_provider_models::{CompletionRequest, CompletionResponse, ModelParameters};

/// API version sent when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-02-01";

/// Request timeout applied when none is configured.
///
/// The backend call would otherwise block the comparison for its full
/// duration with no upper bound.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Azure OpenAI chat-completions implementation of `AiProvider`.
pub struct AzureOpenAiProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_version: String,
    params: ModelParameters,
}

impl AzureOpenAiProvider {
    /// Create a provider for one Azure OpenAI deployment.
    ///
    /// # Panics
    ///
    /// * If the `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(endpoint: String, api_key: String, deployment: String) -> Self {
        Self::with_timeout(
            endpoint,
            api_key,
            deployment,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    /// Create a provider with an explicit request timeout.
    ///
    /// # Panics
    ///
    /// * If the `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_timeout(
        endpoint: String,
        api_key: String,
        deployment: String,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("CodeGlance")
            .timeout(timeout)
            .build()
            .unwrap();
        Self {
            http_client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_key,
            api_version: DEFAULT_API_VERSION.to_string(),
            params: ModelParameters::new(deployment),
        }
    }

    /// Build a provider from environment configuration.
    ///
    /// Reads `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY` and
    /// `AZURE_OPENAI_DEPLOYMENT` (all required), plus the optional
    /// `AZURE_OPENAI_API_VERSION` and `ANALYZE_TIMEOUT_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns `AiProviderError::ConfigError` naming the first missing
    /// variable.
    pub fn from_env() -> Result<Self, AiProviderError> {
        let endpoint = require_env("AZURE_OPENAI_ENDPOINT")?;
        let api_key = require_env("AZURE_OPENAI_API_KEY")?;
        let deployment = require_env("AZURE_OPENAI_DEPLOYMENT")?;

        let timeout_secs = std::env::var("ANALYZE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let mut provider = Self::with_timeout(
            endpoint,
            api_key,
            deployment,
            Duration::from_secs(timeout_secs),
        );

        if let Ok(version) = std::env::var("AZURE_OPENAI_API_VERSION") {
            provider = provider.with_api_version(version);
        }

        Ok(provider)
    }

    /// Override the API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    /// Override the base URL (used by tests to point at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: ModelParameters) -> Self {
        self.params = params;
        self
    }
}

fn require_env(name: &str) -> Result<String, AiProviderError> {
    std::env::var(name).map_err(|_| AiProviderError::ConfigError(format!("{name} is not set")))
}

#[async_trait]
impl AiProvider for AzureOpenAiProvider {
    fn provider_name(&self) -> &'static str {
        "azure-openai"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AiProviderError> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.base_url, self.params.model, self.api_version
        );

        let mut body = json!({
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": self.params.temperature,
        });
        if let Some(max_tokens) = self.params.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        log::debug!("POST {url}");
        let response = self
            .http_client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::error!("Azure OpenAI error (status {status}): {message}");
            return Err(AiProviderError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiProviderError::InvalidResponse(e.to_string()))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AiProviderError::InvalidResponse("response carries no completion text".to_string())
            })?
            .to_string();

        let model_used = payload["model"]
            .as_str()
            .unwrap_or(&self.params.model)
            .to_string();

        log::debug!("Azure OpenAI completion: {} chars", content.len());

        Ok(CompletionResponse {
            content,
            model_used,
        })
    }
}
