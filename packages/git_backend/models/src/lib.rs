#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Git backend models for `CodeGlance`.
//!
//! This crate defines the data types returned by git backend operations,
//! abstracting over the specific git implementation (CLI, libgit2, etc.).

use serde::{Deserialize, Serialize};

/// Git commit information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full SHA of the commit.
    pub sha: String,
    /// Short SHA (first 7 characters).
    pub short_sha: String,
    /// First line of the commit message.
    pub summary: String,
}

impl CommitInfo {
    /// Build commit info from a full SHA and subject line.
    #[must_use]
    pub fn new(sha: String, summary: String) -> Self {
        let short_sha = sha[..sha.len().min(7)].to_string();
        Self {
            sha,
            short_sha,
            summary,
        }
    }
}

/// Errors from git backend operations.
#[derive(Debug, thiserror::Error)]
pub enum GitBackendError {
    /// History enumeration (clone or log) subprocess failed.
    #[error("Failed to enumerate history: {message}")]
    Fetch {
        /// Diagnostic output from the failed subprocess.
        message: String,
    },

    /// Clone or checkout subprocess for a snapshot failed.
    #[error("Clone failed: {stderr}")]
    Clone {
        /// Stderr captured from the failed subprocess.
        stderr: String,
    },

    /// Any other fault during snapshot materialization.
    #[error("Unexpected git backend failure: {message}")]
    Unexpected {
        /// Description of the fault.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Error message.
        message: String,
    },
}

impl From<std::io::Error> for GitBackendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_info_short_sha() {
        let commit = CommitInfo::new(
            "0123456789abcdef0123456789abcdef01234567".to_string(),
            "Initial commit".to_string(),
        );
        assert_eq!(commit.short_sha, "0123456");
        assert_eq!(commit.summary, "Initial commit");
    }

    #[test]
    fn test_commit_info_short_input() {
        let commit = CommitInfo::new("abc".to_string(), "tiny".to_string());
        assert_eq!(commit.short_sha, "abc");
    }
}
