use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::SetupError;
use crate::client::SecureString;

/// Login credentials for the API under test.
///
/// Credentials are plain injected values: load them once at process start
/// (for example with [`Credentials::from_file`]) and pass them into a
/// [`SessionConfig`]. Nothing in this crate reads them from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password. Redacted in debug output, zeroed on drop.
    pub password: SecureString,
}

impl Credentials {
    /// Creates credentials from explicit values.
    pub fn new(username: impl Into<String>, password: impl Into<SecureString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Loads credentials from a JSON file of the form
    /// `{"username": "...", "password": "..."}`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::IoError`] when the file cannot be read and
    /// [`SetupError::CredentialsError`] when it is not valid JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let contents = fs::read_to_string(path)?;
        let credentials = serde_json::from_str(&contents)?;
        Ok(credentials)
    }
}

/// Configuration injected into session provisioning.
///
/// One value per test suite is typical; every provisioning invocation reads
/// it afresh and shares nothing with other invocations.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fully-qualified URL of the login endpoint.
    pub login_url: String,
    /// Fully-qualified URL of the token-refresh endpoint, when available.
    pub refresh_url: Option<String>,
    /// Credentials sent as the login body.
    pub credentials: Credentials,
}

impl SessionConfig {
    /// Creates a configuration with a login endpoint and credentials.
    pub fn new(login_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            login_url: login_url.into(),
            refresh_url: None,
            credentials,
        }
    }

    /// Sets the token-refresh endpoint.
    #[must_use]
    pub fn with_refresh_url(mut self, refresh_url: impl Into<String>) -> Self {
        self.refresh_url = Some(refresh_url.into());
        self
    }
}
