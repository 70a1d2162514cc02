use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use codeglance_ai_provider::{AiProvider, AiProviderError};
use codeglance_ai_provider_models::{CompletionRequest, CompletionResponse};
use codeglance_app::{AppDeps, ServerConfig, run_server_with_handle};
use codeglance_auth::ConfigCredentials;
use codeglance_compare::{ChangeAnalyzer, ComparisonService};
use codeglance_git_backend::GitBackend;
use codeglance_git_backend_cli::CliBackend;
use codeglance_state::SessionStore;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "integration-secret";

/// Provider returning one canned completion, counting its calls.
pub struct CannedProvider {
    pub response: String,
    pub calls: AtomicUsize,
}

impl CannedProvider {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AiProvider for CannedProvider {
    fn provider_name(&self) -> &'static str {
        "canned"
    }

    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CompletionResponse {
            content: self.response.clone(),
            model_used: "canned".to_string(),
        })
    }
}

/// Provider that always fails, simulating a backend outage.
pub struct FailingProvider;

#[async_trait]
impl AiProvider for FailingProvider {
    fn provider_name(&self) -> &'static str {
        "failing"
    }

    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, AiProviderError> {
        Err(AiProviderError::RequestFailed(
            "simulated backend outage".to_string(),
        ))
    }
}

pub struct TestServer {
    http_url: String,
    handle: actix_web::dev::ServerHandle,
    work_dir: tempfile::TempDir,
}

impl TestServer {
    /// # Errors
    ///
    /// Returns an error if the server fails to start.
    pub async fn start(provider: Arc<dyn AiProvider>) -> anyhow::Result<Self> {
        let work_dir = tempfile::tempdir()?;

        let backend: Arc<dyn GitBackend> = Arc::new(CliBackend::new());
        let deps = AppDeps {
            sessions: Arc::new(SessionStore::new()),
            verifier: Arc::new(ConfigCredentials::new(
                TEST_USERNAME.to_string(),
                TEST_PASSWORD.to_string(),
            )),
            comparisons: Arc::new(ComparisonService::new(
                backend,
                ChangeAnalyzer::new(provider),
            )),
            work_dir: work_dir.path().to_path_buf(),
        };

        let config = ServerConfig::new("127.0.0.1".to_string(), 0);
        let response = run_server_with_handle(&config, deps)?;
        let port = response
            .addrs
            .first()
            .expect("Expected at least one address")
            .port();
        let http_url = format!("http://127.0.0.1:{port}");

        wait_for_server_ready(&http_url).await?;

        Ok(Self {
            http_url,
            handle: response.handle,
            work_dir,
        })
    }

    #[must_use]
    pub fn http_url(&self) -> &str {
        &self.http_url
    }

    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.work_dir.path().join("generated_readme.md")
    }

    /// Log in with the test credentials and return the session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the login request fails.
    pub async fn login(&self, client: &reqwest::Client) -> anyhow::Result<String> {
        let response = client
            .post(format!("{}/api/login", self.http_url))
            .json(&serde_json::json!({
                "username": TEST_USERNAME,
                "password": TEST_PASSWORD,
            }))
            .send()
            .await?;
        anyhow::ensure!(response.status().is_success(), "login failed");

        let body: serde_json::Value = response.json().await?;
        Ok(body["token"].as_str().expect("token in response").to_string())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        tokio::spawn(async move {
            handle.stop(true).await;
        });
    }
}

async fn wait_for_server_ready(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{url}/health");

    for _ in 0..30 {
        if let Ok(response) = client.get(&health_url).send().await
            && response.status().is_success()
        {
            return Ok(());
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    anyhow::bail!("Server at {url} never became ready")
}

/// Build a throwaway git repository with the given commits, oldest first.
///
/// Each commit is a list of `(path, content)` files to write before
/// committing. Returns the repository directory and the commit SHAs in the
/// order they were created.
pub fn fixture_repo(commits: &[&[(&str, &str)]]) -> (tempfile::TempDir, Vec<String>) {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);

    let mut shas = Vec::new();
    for (index, files) in commits.iter().enumerate() {
        for (path, content) in *files {
            let full_path = dir.path().join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&full_path, content).unwrap();
        }
        git(dir.path(), &["add", "-A"]);
        git(dir.path(), &["commit", "-m", &format!("Commit {index}")]);
        shas.push(git(dir.path(), &["rev-parse", "HEAD"]));
    }

    (dir, shas)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
