//! Change analysis via a text-generation backend.

use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use codeglance_ai_provider::{AiProvider, AiProviderError};
use codeglance_ai_provider_models::CompletionRequest;

/// System instruction framing the assistant for every analysis request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an insights generator and can also write Python code.";

/// Errors that can occur while analyzing two file versions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// One of the input files could not be read.
    #[error("Failed to read {path}: {message}")]
    FileRead {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// The backend call failed.
    #[error("Backend call failed: {0}")]
    Backend(#[from] AiProviderError),
}

/// Build the fixed instructional prompt embedding both file contents.
///
/// The output template (release-notes sections and README sections) is
/// advisory only: the backend may or may not follow it, and callers must
/// tolerate arbitrary text shape in the result.
#[must_use]
pub fn build_prompt(old_code: &str, new_code: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a software engineer specialized in code analysis. Your job is to:\n\
         \n\
         1. Generate **release notes** that highlight what has been added, removed, \
         or modified between two versions of a code file.\n\
         2. Create a **README-like explanation** describing the overall functionality \
         of the updated code (new code). Include the following sections:\n\
         - Overview\n\
         - Installation and dependencies\n\
           * List all libraries used in the code and their one-line explanation.\n\
           * Provide pip installation instructions for one library as an example.\n\
         - How to use\n\
         - Error Handling\n\
           * Check new_code for errors (logical, syntax, etc.).\n\
         \n",
    );

    write!(prompt, "### Old Code:\n{old_code}\n\n### New Code:\n{new_code}\n\n").unwrap();

    prompt.push_str(
        "Output format:\n\
         - Release Notes:\n\
           - Added:\n\
           - Removed:\n\
           - Modified:\n\
         - README:\n\
           - Overview\n\
           - Installation and dependencies\n\
           - How to use\n\
           - Error Handling\n",
    );

    prompt
}

/// Analyzer that sends two file versions to a text-generation backend.
///
/// Every invocation re-reads its inputs and issues a new backend call, even
/// for identical inputs: no caching, no short-circuit for no-op diffs.
pub struct ChangeAnalyzer {
    provider: Arc<dyn AiProvider>,
}

impl ChangeAnalyzer {
    /// Create an analyzer backed by the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Analyze two file contents, returning the backend's text verbatim.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Backend` if the backend call fails.
    pub async fn analyze_contents(
        &self,
        old_code: &str,
        new_code: &str,
    ) -> Result<String, AnalysisError> {
        let request = CompletionRequest::new(
            SYSTEM_INSTRUCTION.to_string(),
            build_prompt(old_code, new_code),
        );

        let response = self.provider.complete(&request).await?;
        log::info!(
            "{} returned {} chars of analysis",
            self.provider.provider_name(),
            response.content.len()
        );

        Ok(response.content)
    }

    /// Analyze two files on disk.
    ///
    /// Both files must be read successfully before any backend call is
    /// issued.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::FileRead` if either file is absent or
    /// unreadable, or `AnalysisError::Backend` if the backend call fails.
    pub async fn analyze_files(
        &self,
        old_path: &Path,
        new_path: &Path,
    ) -> Result<String, AnalysisError> {
        let old_code = read_input(old_path)?;
        let new_code = read_input(new_path)?;

        self.analyze_contents(&old_code, &new_code).await
    }
}

fn read_input(path: &Path) -> Result<String, AnalysisError> {
    std::fs::read_to_string(path).map_err(|e| AnalysisError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
