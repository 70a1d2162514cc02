//! AI provider trait definition.

use async_trait::async_trait;

use codeglance_ai_provider_models::{CompletionRequest, CompletionResponse};

/// Errors that can occur when using an AI provider.
#[derive(Debug, thiserror::Error)]
pub enum AiProviderError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request could not be sent (network, DNS, timeout).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("Backend error (status {status}): {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the backend.
        message: String,
    },

    /// The backend's response had no usable completion text.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Trait for text-generation backend implementations.
///
/// Providers implement this trait to integrate with different backends
/// (e.g., Azure OpenAI, a local model server, etc.). A provider issues
/// exactly one request per call: no retry, no backoff, no caching.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Get the provider name.
    fn provider_name(&self) -> &'static str;

    /// Request one completion for the given system instruction and prompt.
    ///
    /// The returned content is whatever well-formed text the backend
    /// produced, unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the backend answers
    /// with a non-success status, or the response carries no completion.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AiProviderError>;
}
