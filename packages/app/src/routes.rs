//! HTTP route handlers.

use std::path::Path;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use codeglance_compare::CompareError;
use codeglance_state::SessionContext;

use crate::{ARTIFACT_FILENAME, AppDeps};

/// Extensions accepted for uploaded files: the tracked source type plus
/// plain text.
const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["py", "txt"];

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareFilesRequest {
    pub old_name: String,
    pub old_content: String,
    pub new_name: String,
    pub new_content: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareRepoRequest {
    pub url: String,
    #[serde(default)]
    pub file: Option<String>,
}

pub async fn login(deps: web::Data<AppDeps>, body: web::Json<LoginRequest>) -> HttpResponse {
    if !deps.verifier.verify(&body.username, &body.password) {
        log::warn!("Rejected login for {}", body.username);
        return HttpResponse::Unauthorized()
            .json(json!({ "error": "Invalid username or password." }));
    }

    let session = deps.sessions.create(body.into_inner().username).await;
    log::info!("Session {} created for {}", session.token, session.username);

    HttpResponse::Ok().json(LoginResponse {
        token: session.token,
    })
}

pub async fn logout(deps: web::Data<AppDeps>, req: HttpRequest) -> HttpResponse {
    let session = match authenticate(&deps, &req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    deps.sessions.remove(&session.token).await;
    HttpResponse::NoContent().finish()
}

pub async fn compare_files(
    deps: web::Data<AppDeps>,
    req: HttpRequest,
    body: web::Json<CompareFilesRequest>,
) -> HttpResponse {
    let session = match authenticate(&deps, &req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    for name in [&body.old_name, &body.new_name] {
        if !has_allowed_extension(name) {
            return HttpResponse::BadRequest()
                .json(json!({ "error": format!("Unsupported file type: {name}") }));
        }
    }

    match deps
        .comparisons
        .analyzer()
        .analyze_contents(&body.old_content, &body.new_content)
        .await
    {
        Ok(report) => finish_report(&deps, &session, report).await,
        Err(e) => {
            log::error!("File comparison failed: {e}");
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}

pub async fn compare_repo(
    deps: web::Data<AppDeps>,
    req: HttpRequest,
    body: web::Json<CompareRepoRequest>,
) -> HttpResponse {
    let session = match authenticate(&deps, &req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match deps
        .comparisons
        .compare_repository(&body.url, body.file.as_deref())
        .await
    {
        Ok(comparison) => {
            if let Some(report) = &comparison.report {
                deps.sessions
                    .store_report(&session.token, report.clone())
                    .await;
                write_artifact(&deps, report);
            }
            HttpResponse::Ok().json(comparison)
        }
        Err(e @ CompareError::InsufficientHistory) => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": e.to_string() }))
        }
        Err(e @ CompareError::NoSuchFile { .. }) => {
            HttpResponse::NotFound().json(json!({ "error": e.to_string() }))
        }
        Err(e) => {
            log::error!("Repository comparison failed: {e}");
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}

pub async fn download_readme(deps: web::Data<AppDeps>, req: HttpRequest) -> HttpResponse {
    let session = match authenticate(&deps, &req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let Some(report) = session.last_report else {
        return HttpResponse::NotFound()
            .json(json!({ "error": "No report has been generated yet." }));
    };

    HttpResponse::Ok()
        .content_type("text/markdown")
        .insert_header(("Content-Disposition", "attachment; filename=\"README.md\""))
        .body(report)
}

async fn finish_report(
    deps: &web::Data<AppDeps>,
    session: &SessionContext,
    report: String,
) -> HttpResponse {
    deps.sessions
        .store_report(&session.token, report.clone())
        .await;
    write_artifact(deps, &report);

    HttpResponse::Ok().json(json!({ "report": report }))
}

fn write_artifact(deps: &AppDeps, report: &str) {
    let path = deps.work_dir.join(ARTIFACT_FILENAME);
    if let Err(e) = std::fs::write(&path, report) {
        log::warn!("Failed to write {}: {e}", path.display());
    }
}

async fn authenticate(
    deps: &AppDeps,
    req: &HttpRequest,
) -> Result<SessionContext, HttpResponse> {
    let Some(token) = bearer_token(req) else {
        return Err(unauthorized());
    };

    match deps.sessions.get(token).await {
        Some(session) => Ok(session),
        None => Err(unauthorized()),
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "error": "Authentication required." }))
}

fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ALLOWED_UPLOAD_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension("script.py"));
        assert!(has_allowed_extension("notes.txt"));
        assert!(!has_allowed_extension("binary.exe"));
        assert!(!has_allowed_extension("no_extension"));
        assert!(!has_allowed_extension("archive.tar.gz"));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let req = actix_web::test::TestRequest::default()
            .insert_header(("Authorization", "Bearer abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc123"));

        let req = actix_web::test::TestRequest::default()
            .insert_header(("Authorization", "Basic abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = actix_web::test::TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
