#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::sync::Arc;

use codeglance_app::{AppDeps, ServerConfig, run_server};
use codeglance_auth::ConfigCredentials;
use codeglance_azure_provider::AzureOpenAiProvider;
use codeglance_compare::{ChangeAnalyzer, ComparisonService};
use codeglance_git_backend_cli::CliBackend;
use codeglance_state::SessionStore;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let work_dir = std::env::var("CODEGLANCE_WORK_DIR")
        .map_or_else(|_| std::env::current_dir(), |dir| Ok(PathBuf::from(dir)))?;

    let provider = AzureOpenAiProvider::from_env()?;
    let analyzer = ChangeAnalyzer::new(Arc::new(provider));
    let comparisons = Arc::new(ComparisonService::new(
        Arc::new(CliBackend::new()),
        analyzer,
    ));

    let deps = AppDeps {
        sessions: Arc::new(SessionStore::new()),
        verifier: Arc::new(ConfigCredentials::from_env()),
        comparisons,
        work_dir,
    };

    println!("CodeGlance: AI-powered code insights");
    println!("  POST /api/login");
    println!("  POST /api/logout");
    println!("  POST /api/compare/files");
    println!("  POST /api/compare/repo");
    println!("  GET  /api/readme");
    println!("\nStarting server at http://{host}:{port}");
    println!("Press Ctrl+C to stop\n");

    run_server(ServerConfig::new(host, port), deps).await?;

    Ok(())
}
