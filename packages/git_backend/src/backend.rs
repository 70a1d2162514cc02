//! Git backend trait.
//!
//! This trait abstracts over git implementations for testability and
//! flexibility.

use async_trait::async_trait;

use codeglance_git_backend_models::{CommitInfo, GitBackendError};

use crate::Snapshot;

/// Trait for acquiring repository history and working-tree snapshots.
///
/// This is the main abstraction point for testing - mock implementations
/// can provide deterministic repository state.
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// List the repository's commits, most recent first.
    ///
    /// A repository with fewer than two commits is not an error here;
    /// callers treat short history as a validation outcome.
    ///
    /// # Arguments
    ///
    /// * `repo_url` - Location of the repository (URL or local path).
    ///
    /// # Errors
    ///
    /// Returns `GitBackendError::Fetch` if the clone or history enumeration
    /// subprocess exits non-zero.
    async fn list_recent_commits(&self, repo_url: &str)
    -> Result<Vec<CommitInfo>, GitBackendError>;

    /// Materialize the repository's working tree at one commit.
    ///
    /// The returned `Snapshot` owns a freshly created directory holding the
    /// full working tree at `commit_sha`. Ownership transfers to the caller;
    /// the directory is removed when the snapshot is closed or dropped.
    ///
    /// # Arguments
    ///
    /// * `repo_url` - Location of the repository (URL or local path).
    /// * `commit_sha` - Commit to check out in the fresh clone.
    ///
    /// # Errors
    ///
    /// Returns `GitBackendError::Clone` (carrying the subprocess diagnostic
    /// output) if the clone or checkout step exits non-zero, or
    /// `GitBackendError::Unexpected` for any other fault.
    async fn materialize(
        &self,
        repo_url: &str,
        commit_sha: &str,
    ) -> Result<Snapshot, GitBackendError>;
}
