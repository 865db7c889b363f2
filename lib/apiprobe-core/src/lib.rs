//! # Apiprobe Core
//!
//! Building blocks for black-box HTTP API test suites:
//!
//! - **[`RequestClient`]** - a stateless per-verb HTTP client for
//!   fully-qualified URLs
//! - **[`session`]** - authenticated-session provisioning with guaranteed
//!   teardown around a consumer scope
//! - **[`schema`]** - strict structural validation of response payloads at
//!   the boundary
//! - **[`model`]** - typed models for the demo API the suite exercises
//!
//! ## Quick Start
//!
//! ### Using RequestClient directly
//!
//! ```rust,no_run
//! use apiprobe_core::{CallQuery, RequestClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RequestClient::new();
//!
//! let response = client
//!     .get("https://api.example.com/users")?
//!     .with_query(CallQuery::new().add_param("page", 1).add_param("limit", 10))
//!     .await?; // ← direct await using IntoFuture
//!
//! // Non-2xx statuses are ordinary responses, never errors:
//! let missing = client.get("https://api.example.com/users/0/nope")?.await?;
//! assert_eq!(missing.status().as_u16(), 404);
//! # Ok(())
//! # }
//! ```
//!
//! ### Provisioning an authenticated session
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
//! .await??; // outer: setup failure, inner: the consumer's own result
//! # Ok(())
//! # }
//! ```
//!
//! ### Validating a payload against a strict schema
//!
//! ```rust
//! use apiprobe_core::schema::{SchemaValidator, documents};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = SchemaValidator::new("token-refresh", &documents::token_refresh())?;
//!
//! let payload = serde_json::json!({"accessToken": "a.b.c", "refreshToken": "d.e.f"});
//! validator.validate(&payload)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The library keeps three error families apart so failure reports can
//! distinguish "could not reach the server" from "could not log in" from
//! "logged in but got wrong data":
//!
//! - [`ClientError`] - request construction and transport faults
//! - [`session::SetupError`] - provisioning failures; the consumer never ran
//! - [`schema::ValidationError`] - a payload that does not match its schema

mod client;

pub mod model;
pub mod schema;
pub mod session;

// Public API - only expose user-facing types
pub use self::client::{
    ApiResponse, Authentication, AuthenticationError, CallBody, CallHeaders, CallQuery,
    ClientError, Payload, RequestCall, RequestClient, SecureString,
};
