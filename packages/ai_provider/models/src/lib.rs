#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! AI provider models for `CodeGlance`.
//!
//! This crate provides the request/response data structures exchanged with
//! text-generation backends.

use serde::{Deserialize, Serialize};

/// Sampling parameters for a text-generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Model (or deployment) identifier.
    pub model: String,
    /// Sampling temperature. Kept low so output is near-deterministic.
    pub temperature: f32,
    /// Maximum completion tokens, when the backend supports capping.
    pub max_tokens: Option<u32>,
}

impl ModelParameters {
    /// Default sampling temperature for analysis requests.
    pub const DEFAULT_TEMPERATURE: f32 = 0.1;

    /// Parameters for a model with the default low temperature.
    #[must_use]
    pub const fn new(model: String) -> Self {
        Self {
            model,
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    /// Override the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A single completion request: one system instruction and one user prompt.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction framing the assistant.
    pub system: String,
    /// User prompt body.
    pub prompt: String,
}

impl CompletionRequest {
    /// Build a request from a system instruction and user prompt.
    #[must_use]
    pub const fn new(system: String, prompt: String) -> Self {
        Self { system, prompt }
    }
}

/// A completion returned by a backend.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, passed through verbatim.
    pub content: String,
    /// Model that produced the completion.
    pub model_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parameters_default_temperature() {
        let params = ModelParameters::new("gpt-4o".to_string());
        assert!((params.temperature - 0.1).abs() < f32::EPSILON);
        assert!(params.max_tokens.is_none());
    }

    #[test]
    fn test_model_parameters_with_temperature() {
        let params = ModelParameters::new("gpt-4o".to_string()).with_temperature(0.7);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
    }
}
