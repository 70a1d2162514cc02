//! Repository comparison workflow.

use std::sync::Arc;

use serde::Serialize;

use codeglance_git_backend::{GitBackend, Snapshot};
use codeglance_git_backend_models::{CommitInfo, GitBackendError};

use crate::analyzer::{AnalysisError, ChangeAnalyzer};
use crate::{TRACKED_EXTENSION, matcher};

/// Errors that can occur during a repository comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// The repository has fewer than two commits.
    ///
    /// This is a validation outcome, distinct from a transport or process
    /// failure.
    #[error("The repository has fewer than two commits. Comparison cannot proceed.")]
    InsufficientHistory,

    /// The selected file is not present in both commits.
    #[error("The selected file does not exist in one or both commits: {name}")]
    NoSuchFile {
        /// Base filename that was requested.
        name: String,
    },

    /// A git backend operation failed.
    #[error(transparent)]
    Git(#[from] GitBackendError),

    /// The analysis step failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result of comparing a repository's two most recent commits.
#[derive(Debug, Clone, Serialize)]
pub struct RepoComparison {
    /// Tip commit of the default branch.
    pub newer: CommitInfo,
    /// Its immediate predecessor.
    pub older: CommitInfo,
    /// Tracked files present in both commits, by base filename.
    pub common_files: Vec<String>,
    /// Generated report for the selected file, when one was selected.
    pub report: Option<String>,
}

/// Orchestrates one comparison: history, snapshots, matching, analysis.
///
/// Each invocation runs to completion before the caller accepts the next
/// one; nothing is retried and no state outlives the call. Both snapshot
/// directories are released on every exit path.
pub struct ComparisonService {
    backend: Arc<dyn GitBackend>,
    analyzer: ChangeAnalyzer,
}

impl ComparisonService {
    /// Create a service from a git backend and an analyzer.
    #[must_use]
    pub fn new(backend: Arc<dyn GitBackend>, analyzer: ChangeAnalyzer) -> Self {
        Self { backend, analyzer }
    }

    /// Get the analyzer.
    #[must_use]
    pub const fn analyzer(&self) -> &ChangeAnalyzer {
        &self.analyzer
    }

    /// Compare the two most recent commits of a repository.
    ///
    /// Fetches the history, materializes both commits, and intersects their
    /// tracked files. When `selected_file` is given, additionally reads that
    /// file from both snapshots and asks the backend for a report.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::InsufficientHistory` for repositories with
    /// fewer than two commits (before any snapshot is created),
    /// `CompareError::NoSuchFile` if the selected file is not common to both
    /// commits, or the underlying git/analysis error. A failed comparison
    /// never yields partial results.
    pub async fn compare_repository(
        &self,
        repo_url: &str,
        selected_file: Option<&str>,
    ) -> Result<RepoComparison, CompareError> {
        let commits = self.backend.list_recent_commits(repo_url).await?;
        if commits.len() < 2 {
            log::info!(
                "{repo_url} has {} commit(s), comparison needs two",
                commits.len()
            );
            return Err(CompareError::InsufficientHistory);
        }

        let newer = commits[0].clone();
        let older = commits[1].clone();
        log::info!(
            "Comparing {} ({}) against {} ({})",
            newer.short_sha,
            newer.summary,
            older.short_sha,
            older.summary
        );

        let newer_snapshot = self.backend.materialize(repo_url, &newer.sha).await?;
        let older_snapshot = self.backend.materialize(repo_url, &older.sha).await?;

        let outcome = self
            .compare_snapshots(&older_snapshot, &newer_snapshot, selected_file)
            .await;

        // Cleanup runs after matching and analysis, on success and failure
        // alike. A failed removal after a failed comparison must not mask
        // the comparison error.
        let newer_close = newer_snapshot.close();
        let older_close = older_snapshot.close();

        let (common_files, report) = outcome?;
        newer_close?;
        older_close?;

        Ok(RepoComparison {
            newer,
            older,
            common_files,
            report,
        })
    }

    async fn compare_snapshots(
        &self,
        older: &Snapshot,
        newer: &Snapshot,
        selected_file: Option<&str>,
    ) -> Result<(Vec<String>, Option<String>), CompareError> {
        let common = matcher::common_files(older.path(), newer.path(), TRACKED_EXTENSION);
        log::debug!("{} common tracked file(s)", common.len());

        let Some(name) = selected_file else {
            return Ok((common.into_iter().collect(), None));
        };

        if !common.contains(name) {
            return Err(CompareError::NoSuchFile {
                name: name.to_string(),
            });
        }

        let old_path = matcher::find_file(older.path(), name).ok_or_else(|| {
            CompareError::NoSuchFile {
                name: name.to_string(),
            }
        })?;
        let new_path = matcher::find_file(newer.path(), name).ok_or_else(|| {
            CompareError::NoSuchFile {
                name: name.to_string(),
            }
        })?;

        let report = self.analyzer.analyze_files(&old_path, &new_path).await?;

        Ok((common.into_iter().collect(), Some(report)))
    }
}
