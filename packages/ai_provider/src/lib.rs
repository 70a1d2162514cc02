#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! AI provider abstraction for `CodeGlance`.
//!
//! This crate provides the `AiProvider` trait for integrating with
//! text-generation backends.

mod provider;

pub use codeglance_ai_provider_models as models;
pub use provider::{AiProvider, AiProviderError};
