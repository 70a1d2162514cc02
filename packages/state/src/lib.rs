#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Session state management for `CodeGlance`.
//!
//! One explicit session context per authenticated user, created at login and
//! torn down at logout. State is scoped to a session; nothing survives a
//! process restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Context for one authenticated session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Opaque session token handed to the client.
    pub token: String,
    /// Authenticated username.
    pub username: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Most recent generated report, if any.
    pub last_report: Option<String>,
}

/// In-memory store of active sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionContext>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an authenticated user.
    pub async fn create(&self, username: String) -> SessionContext {
        let context = SessionContext {
            token: Uuid::new_v4().to_string(),
            username,
            created_at: Utc::now(),
            last_report: None,
        };

        self.sessions
            .write()
            .await
            .insert(context.token.clone(), context.clone());

        context
    }

    /// Look up a session by token.
    pub async fn get(&self, token: &str) -> Option<SessionContext> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Attach the latest generated report to a session.
    ///
    /// Returns `false` when the token is unknown.
    pub async fn store_report(&self, token: &str, report: String) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(token).is_some_and(|context| {
            context.last_report = Some(report);
            true
        })
    }

    /// Tear a session down (logout or expiry).
    ///
    /// Returns `false` when the token is unknown.
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}
