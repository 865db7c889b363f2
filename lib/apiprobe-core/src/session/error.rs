use crate::client::ClientError;

/// Errors raised while provisioning or maintaining an authenticated session.
///
/// A `SetupError` is distinct from any failure inside the consumer scope:
/// it means the session never became usable ("could not log in"), not that
/// the consumer observed wrong data after a successful login.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SetupError {
    /// I/O failure while reading the credentials source.
    #[display("I/O error: {_0}")]
    IoError(std::io::Error),

    /// The credentials file is not valid JSON.
    #[display("credentials are not valid JSON: {_0}")]
    CredentialsError(serde_json::Error),

    /// Request construction or transport failure during provisioning.
    #[display("client error during provisioning: {_0}")]
    ClientError(ClientError),

    /// The login endpoint answered with a non-2xx status.
    ///
    /// Provisioning is the one place a non-2xx status is fatal: without a
    /// token payload there is no session to hand to the consumer.
    #[from(ignore)]
    #[display("login rejected with status {status}: {body}")]
    LoginRejected {
        /// The HTTP status returned by the login endpoint.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The token-refresh endpoint answered with a non-2xx status.
    #[from(ignore)]
    #[display("token refresh rejected with status {status}: {body}")]
    RefreshRejected {
        /// The HTTP status returned by the refresh endpoint.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// A token payload lacked a usable (non-empty string) token field.
    #[from(ignore)]
    #[display("response is missing a usable '{field}' field")]
    MissingToken {
        /// The field that was missing or empty.
        field: &'static str,
    },

    /// `refresh` was called on a session without a configured refresh endpoint.
    #[from(ignore)]
    #[display("no refresh endpoint is configured for this session")]
    RefreshUnavailable,
}
