#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! git CLI implementation of the `GitBackend` trait.
//!
//! This crate shells out to the `git` binary for every operation: a bare
//! clone plus `git log` for history enumeration, and a full clone plus
//! `git checkout` for snapshot materialization.

use std::path::Path;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;

use codeglance_git_backend::{GitBackend, Snapshot};
use codeglance_git_backend_models::{CommitInfo, GitBackendError};

/// Delimiter between hash and subject in `git log` output.
///
/// Must not appear in a commit subject; lines without it are discarded.
const LOG_DELIMITER: &str = "|||";

/// git CLI implementation of `GitBackend`.
#[derive(Debug, Clone)]
pub struct CliBackend {
    git_binary: String,
}

impl CliBackend {
    /// Create a backend using the `git` binary on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            git_binary: "git".to_string(),
        }
    }

    /// Override the git binary path.
    #[must_use]
    pub fn with_git_binary(mut self, git_binary: String) -> Self {
        self.git_binary = git_binary;
        self
    }

    async fn run_git(&self, args: &[&str], cwd: Option<&Path>) -> std::io::Result<Output> {
        let mut cmd = Command::new(&self.git_binary);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        log::debug!("Running {} {}", self.git_binary, args.join(" "));
        cmd.output().await
    }
}

impl Default for CliBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitBackend for CliBackend {
    async fn list_recent_commits(
        &self,
        repo_url: &str,
    ) -> Result<Vec<CommitInfo>, GitBackendError> {
        // Scoped clone directory: removed when this call returns, regardless
        // of outcome.
        let clone_dir = tempfile::Builder::new()
            .prefix("codeglance-history-")
            .tempdir()?;
        let clone_path = clone_dir.path().to_string_lossy().into_owned();

        let clone_output = self
            .run_git(&["clone", "--bare", repo_url, &clone_path], None)
            .await
            .map_err(|e| GitBackendError::Fetch {
                message: format!("failed to run {}: {e}", self.git_binary),
            })?;

        if !clone_output.status.success() {
            let stderr = String::from_utf8_lossy(&clone_output.stderr).into_owned();
            log::error!("Bare clone of {repo_url} failed: {stderr}");
            return Err(GitBackendError::Fetch { message: stderr });
        }

        let format = format!("--pretty=%H{LOG_DELIMITER}%s");
        let log_output = self
            .run_git(&["log", &format], Some(clone_dir.path()))
            .await
            .map_err(|e| GitBackendError::Fetch {
                message: format!("failed to run {}: {e}", self.git_binary),
            })?;

        if !log_output.status.success() {
            let stderr = String::from_utf8_lossy(&log_output.stderr).into_owned();
            log::error!("History enumeration for {repo_url} failed: {stderr}");
            return Err(GitBackendError::Fetch { message: stderr });
        }

        let commits = parse_log_output(&String::from_utf8_lossy(&log_output.stdout));
        log::debug!("Found {} commits in {repo_url}", commits.len());
        Ok(commits)
    }

    async fn materialize(
        &self,
        repo_url: &str,
        commit_sha: &str,
    ) -> Result<Snapshot, GitBackendError> {
        let dir = tempfile::Builder::new()
            .prefix("codeglance-snapshot-")
            .tempdir()
            .map_err(|e| GitBackendError::Unexpected {
                message: format!("failed to create snapshot directory: {e}"),
            })?
            .keep();

        // The snapshot takes ownership immediately so any failure below
        // still releases the directory.
        let snapshot = Snapshot::new(dir);
        let dest = snapshot.path().to_string_lossy().into_owned();

        let clone_output = self
            .run_git(&["clone", repo_url, &dest], None)
            .await
            .map_err(|e| GitBackendError::Unexpected {
                message: format!("failed to run {}: {e}", self.git_binary),
            })?;

        if !clone_output.status.success() {
            let stderr = String::from_utf8_lossy(&clone_output.stderr).into_owned();
            log::error!("Clone of {repo_url} failed: {stderr}");
            return Err(GitBackendError::Clone { stderr });
        }

        let checkout_output = self
            .run_git(&["checkout", commit_sha], Some(snapshot.path()))
            .await
            .map_err(|e| GitBackendError::Unexpected {
                message: format!("failed to run {}: {e}", self.git_binary),
            })?;

        if !checkout_output.status.success() {
            let stderr = String::from_utf8_lossy(&checkout_output.stderr).into_owned();
            log::error!("Checkout of {commit_sha} failed: {stderr}");
            return Err(GitBackendError::Clone { stderr });
        }

        log::debug!("Materialized {commit_sha} at {dest}");
        Ok(snapshot)
    }
}

/// Parse `git log --pretty=%H|||%s` output into commits, newest first.
///
/// Lines without the delimiter are discarded rather than treated as errors.
fn parse_log_output(stdout: &str) -> Vec<CommitInfo> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(LOG_DELIMITER))
        .map(|(sha, summary)| CommitInfo::new(sha.to_string(), summary.to_string()))
        .collect()
}
