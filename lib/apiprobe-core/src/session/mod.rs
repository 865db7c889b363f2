//! Authenticated session provisioning.
//!
//! A session is the setup phase most API tests share: create a fresh
//! [`RequestClient`], perform one login call with injected
//! [`Credentials`], and hand the client plus the extracted token pair to the
//! test body. Every provisioning invocation is independent — a new client, a
//! fresh login, nothing cached across invocations — so concurrent tests never
//! observe each other's tokens or client state.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use apiprobe_core::session::{AuthSession, Credentials, SessionConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::new(
//!     "https://demo.example.com/auth/login",
//!     Credentials::new("emilys", "emilyspass"),
//! );
//!
//! let response = AuthSession::scope(&config, |session| async move {
//!     let call = session.client().get("https://demo.example.com/auth/me")?;
//!     call.with_authentication(session.bearer()).await
//! })
//! .await??;
//!
//! assert!(response.status().is_success());
//! # Ok(())
//! # }
//! ```
//!
//! Failures during provisioning surface as [`SetupError`] and the consumer
//! never runs; failures inside the consumer are the consumer's own and do not
//! masquerade as setup failures.

use std::future::Future;

use serde::Serialize;
use tracing::{debug, error};
use zeroize::Zeroize;

use crate::client::{Authentication, Payload, RequestClient};

mod credentials;
pub use self::credentials::{Credentials, SessionConfig};

mod error;
pub use self::error::SetupError;

/// Bodies quoted in diagnostics are truncated beyond this length.
const BODY_MAX_LENGTH: usize = 1024;

/// Lifecycle phase of a session.
///
/// Provisioning walks `Unstarted → LoggingIn → Ready`; a failed login goes
/// `LoggingIn → Failed → Done` and the consumer never runs. Releasing a
/// ready session walks `Ready → Teardown → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing has happened yet.
    Unstarted,
    /// The login call is in flight.
    LoggingIn,
    /// Login succeeded; the session is usable.
    Ready,
    /// Login failed; the session never became usable.
    Failed,
    /// Resources are being released.
    Teardown,
    /// Terminal: the session is over.
    Done,
}

impl SessionPhase {
    /// Checks whether `next` is a legal successor of this phase.
    pub fn can_advance(self, next: SessionPhase) -> bool {
        use SessionPhase::{Done, Failed, LoggingIn, Ready, Teardown, Unstarted};
        matches!(
            (self, next),
            (Unstarted, LoggingIn)
                | (LoggingIn, Ready)
                | (LoggingIn, Failed)
                | (Ready, Teardown)
                | (Teardown, Done)
                | (Failed, Done)
        )
    }
}

fn advance(phase: &mut SessionPhase, next: SessionPhase) {
    debug_assert!(
        phase.can_advance(next),
        "illegal session phase transition: {phase:?} -> {next:?}"
    );
    debug!(from = ?phase, to = ?next, "session phase");
    *phase = next;
}

/// An authenticated session: a fresh client plus the token pair extracted
/// from one login call.
///
/// Owned exclusively by the test that provisioned it and discarded at test
/// end. Tokens are extracted verbatim from the login response — there is no
/// expiry tracking and no automatic refresh; call [`refresh`](Self::refresh)
/// explicitly when a test exercises token rotation.
///
/// Dropping the session releases its resources; [`AuthSession::scope`] is
/// the usual way to get that guarantee around a test body.
#[derive(derive_more::Debug)]
pub struct AuthSession {
    client: RequestClient,
    #[debug(skip)]
    access_token: String,
    #[debug(skip)]
    refresh_token: String,
    #[debug(skip)]
    raw_login: serde_json::Value,
    refresh_url: Option<String>,
    phase: SessionPhase,
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload<'a> {
    refresh_token: &'a str,
}

impl AuthSession {
    /// Provisions a new session: fresh client, one login call.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] when the login call cannot be built or sent,
    /// when the login endpoint answers non-2xx, or when the response lacks a
    /// usable token pair. No retry is attempted.
    pub async fn provision(config: &SessionConfig) -> Result<Self, SetupError> {
        let mut phase = SessionPhase::Unstarted;
        let client = RequestClient::new();

        advance(&mut phase, SessionPhase::LoggingIn);
        match Self::login(&client, config).await {
            Ok((access_token, refresh_token, raw_login)) => {
                advance(&mut phase, SessionPhase::Ready);
                debug!(username = %config.credentials.username, "session ready");
                Ok(Self {
                    client,
                    access_token,
                    refresh_token,
                    raw_login,
                    refresh_url: config.refresh_url.clone(),
                    phase,
                })
            }
            Err(err) => {
                advance(&mut phase, SessionPhase::Failed);
                error!(%err, "login failed, session never became ready");
                advance(&mut phase, SessionPhase::Done);
                Err(err)
            }
        }
    }

    /// Provisions a session, runs `consumer` with it, and releases it after
    /// the consumer finishes — on success, on error, and on unwind.
    ///
    /// A provisioning failure aborts before the consumer runs and surfaces
    /// as the outer [`SetupError`]; whatever the consumer returns (including
    /// its own `Result`) is passed through unchanged as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] only for provisioning failures.
    pub async fn scope<T, F, Fut>(config: &SessionConfig, consumer: F) -> Result<T, SetupError>
    where
        F: FnOnce(AuthSession) -> Fut,
        Fut: Future<Output = T>,
    {
        let session = Self::provision(config).await?;
        debug!("entering consumer scope");
        let outcome = consumer(session).await;
        debug!("consumer scope finished, session released");
        Ok(outcome)
    }

    async fn login(
        client: &RequestClient,
        config: &SessionConfig,
    ) -> Result<(String, String, serde_json::Value), SetupError> {
        let response = client
            .post(&config.login_url)?
            .json(&LoginPayload {
                username: &config.credentials.username,
                password: config.credentials.password.as_str(),
            })?
            .await?;

        if !response.is_success() {
            return Err(SetupError::LoginRejected {
                status: response.status().as_u16(),
                body: summarize_body(response.payload()),
            });
        }

        let Some(raw_login) = response.json().cloned() else {
            return Err(SetupError::MissingToken {
                field: "accessToken",
            });
        };
        let access_token = extract_token(&raw_login, "accessToken")?;
        let refresh_token = extract_token(&raw_login, "refreshToken")?;

        Ok((access_token, refresh_token, raw_login))
    }

    /// Returns the client this session was provisioned with.
    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    /// Returns the access token extracted from the login response.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token extracted from the login response.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Returns the raw, unvalidated login response payload.
    pub fn raw_login(&self) -> &serde_json::Value {
        &self.raw_login
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Builds a `Bearer` authentication from the current access token,
    /// ready to attach to a protected call.
    pub fn bearer(&self) -> Authentication {
        Authentication::Bearer(self.access_token.as_str().into())
    }

    /// Exchanges the refresh token for a new token pair.
    ///
    /// Nothing calls this automatically: tokens are never refreshed behind
    /// the consumer's back.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::RefreshUnavailable`] when no refresh endpoint
    /// is configured, [`SetupError::RefreshRejected`] on a non-2xx answer,
    /// and [`SetupError::MissingToken`] when the payload lacks a token.
    pub async fn refresh(&mut self) -> Result<(), SetupError> {
        let Some(refresh_url) = self.refresh_url.clone() else {
            return Err(SetupError::RefreshUnavailable);
        };

        let response = self
            .client
            .post(&refresh_url)?
            .json(&RefreshPayload {
                refresh_token: &self.refresh_token,
            })?
            .await?;

        if !response.is_success() {
            return Err(SetupError::RefreshRejected {
                status: response.status().as_u16(),
                body: summarize_body(response.payload()),
            });
        }

        let Some(payload) = response.json() else {
            return Err(SetupError::MissingToken {
                field: "accessToken",
            });
        };
        let access_token = extract_token(payload, "accessToken")?;
        let refresh_token = extract_token(payload, "refreshToken")?;

        self.access_token = access_token;
        self.refresh_token = refresh_token;
        debug!("token pair replaced");
        Ok(())
    }

    /// Explicitly releases the session.
    ///
    /// Equivalent to dropping it; provided for call sites that want the
    /// release visible in the test body.
    pub fn release(mut self) {
        self.teardown();
    }

    // Idempotent: the phase check makes a second call (release then Drop) a no-op.
    fn teardown(&mut self) {
        if matches!(self.phase, SessionPhase::Teardown | SessionPhase::Done) {
            return;
        }
        advance(&mut self.phase, SessionPhase::Teardown);
        self.access_token.zeroize();
        self.refresh_token.zeroize();
        advance(&mut self.phase, SessionPhase::Done);
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn extract_token(payload: &serde_json::Value, field: &'static str) -> Result<String, SetupError> {
    payload
        .get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or(SetupError::MissingToken { field })
}

fn summarize_body(payload: &Payload) -> String {
    let body = match payload {
        Payload::Json(value) => value.to_string(),
        Payload::Text(text) => text.clone(),
        Payload::Bytes(bytes) => format!("<{} binary bytes>", bytes.len()),
        Payload::Empty => String::new(),
    };
    if body.len() > BODY_MAX_LENGTH {
        let truncated: String = body.chars().take(BODY_MAX_LENGTH).collect();
        format!("{truncated}... (truncated)")
    } else {
        body
    }
}
