#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! HTTP application surface for `CodeGlance`.
//!
//! Exposes the comparison workflow behind a login gate: upload two file
//! versions, or point at a Git repository and compare its two most recent
//! commits. The generated report is downloadable as `README.md`.

pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use tokio::task::JoinHandle;

use codeglance_auth::CredentialVerifier;
use codeglance_compare::ComparisonService;
use codeglance_state::SessionStore;

/// Filename of the downloadable artifact written to working storage.
pub const ARTIFACT_FILENAME: &str = "generated_readme.md";

/// Collaborators injected into the HTTP handlers.
///
/// Tests supply deterministic implementations through the same seams the
/// binary wires production ones into.
#[derive(Clone)]
pub struct AppDeps {
    /// Active sessions.
    pub sessions: Arc<SessionStore>,
    /// Login credential verifier.
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Comparison workflow.
    pub comparisons: Arc<ComparisonService>,
    /// Directory the `generated_readme.md` artifact is written to.
    pub work_dir: PathBuf,
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub const fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }
}

/// Handles returned by `run_server_with_handle`.
pub struct RunServerResponse {
    pub handle: actix_web::dev::ServerHandle,
    pub addrs: Vec<std::net::SocketAddr>,
    pub join_handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Run the server until it stops.
///
/// # Errors
///
/// Returns an error if the server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig, deps: AppDeps) -> std::io::Result<()> {
    let RunServerResponse { join_handle, .. } = run_server_with_handle(&config, deps)?;

    join_handle.await?
}

/// Bind the server and return its handle and addresses.
///
/// Binding port 0 picks a free port; the chosen address is reported in
/// `addrs`, which is what the integration tests rely on.
///
/// # Errors
///
/// Returns an error if the server fails to bind.
pub fn run_server_with_handle(
    config: &ServerConfig,
    deps: AppDeps,
) -> std::io::Result<RunServerResponse> {
    log::info!("Starting CodeGlance on {}:{}", config.host, config.port);

    let deps = web::Data::new(deps);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(deps.clone())
            .wrap(middleware::Logger::default())
            .route("/api/login", web::post().to(routes::login))
            .route("/api/logout", web::post().to(routes::logout))
            .route("/api/compare/files", web::post().to(routes::compare_files))
            .route("/api/compare/repo", web::post().to(routes::compare_repo))
            .route("/api/readme", web::get().to(routes::download_readme))
            .route("/health", web::get().to(|| async { "OK" }))
    })
    .bind((config.host.as_str(), config.port))?;

    let addrs = server.addrs();
    let server = server.run();
    let handle = server.handle();

    let join_handle = tokio::spawn(server);

    Ok(RunServerResponse {
        handle,
        addrs,
        join_handle,
    })
}
