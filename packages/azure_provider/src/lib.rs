#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Azure OpenAI implementation of the `AiProvider` trait.
//!
//! Issues one chat-completions request per call against an Azure OpenAI
//! deployment and passes the completion text through verbatim.

mod client;

pub use client::{AzureOpenAiProvider, DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECONDS};
