#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Credential verification for `CodeGlance`.
//!
//! The login gate compares submitted credentials against externally supplied
//! configuration. No credential literals live in code.

use subtle::ConstantTimeEq;

/// Environment variable holding the configured username.
pub const USERNAME_VAR: &str = "CODEGLANCE_USERNAME";

/// Environment variable holding the configured password.
pub const PASSWORD_VAR: &str = "CODEGLANCE_PASSWORD";

/// Pluggable credential-verification capability.
pub trait CredentialVerifier: Send + Sync {
    /// Check a username/password pair.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier backed by externally supplied configuration.
///
/// When no credentials are configured, every login is rejected.
pub struct ConfigCredentials {
    credentials: Option<(String, String)>,
}

impl ConfigCredentials {
    /// Create a verifier for one username/password pair.
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self {
            credentials: Some((username, password)),
        }
    }

    /// Read credentials from `CODEGLANCE_USERNAME` / `CODEGLANCE_PASSWORD`.
    #[must_use]
    pub fn from_env() -> Self {
        match (std::env::var(USERNAME_VAR), std::env::var(PASSWORD_VAR)) {
            (Ok(username), Ok(password)) => Self::new(username, password),
            _ => {
                log::warn!("{USERNAME_VAR}/{PASSWORD_VAR} not set, all logins will be rejected");
                Self { credentials: None }
            }
        }
    }
}

impl CredentialVerifier for ConfigCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let Some((expected_username, expected_password)) = &self.credentials else {
            return false;
        };

        let username_ok = username.as_bytes().ct_eq(expected_username.as_bytes());
        let password_ok = password.as_bytes().ct_eq(expected_password.as_bytes());

        bool::from(username_ok & password_ok)
    }
}
