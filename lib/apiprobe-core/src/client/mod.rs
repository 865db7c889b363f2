use http::Method;

mod call;
pub use self::call::RequestCall;

mod parameters;
pub use self::parameters::{CallHeaders, CallQuery};

mod auth;
pub use self::auth::{Authentication, AuthenticationError, SecureString};

mod body;
pub use self::body::CallBody;

mod response;
pub use self::response::{ApiResponse, Payload};

mod error;
pub use self::error::ClientError;

/// Stateless HTTP client for black-box API testing.
///
/// `RequestClient` exposes one method per verb against fully-qualified URLs.
/// Every call is independent: no base URL, no remembered authentication, no
/// retries, no response caching. The only state a call carries is what the
/// caller puts on it.
///
/// Non-2xx statuses are ordinary results — a 404 resolves to an
/// [`ApiResponse`] with status 404. Only transport faults (DNS, refused
/// connection, reset) fail a call, as [`ClientError::Transport`].
///
/// # Example
///
/// ```rust,no_run
/// use apiprobe_core::{CallQuery, RequestClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RequestClient::new();
///
/// let response = client
///     .get("https://api.example.com/users")?
///     .with_query(CallQuery::new().add_param("page", 1).add_param("limit", 10))
///     .await?;
///
/// assert_eq!(response.status().as_u16(), 200);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestClient {
    client: reqwest::Client,
}

impl RequestClient {
    /// Creates a new client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client around a preconfigured `reqwest::Client`.
    ///
    /// Useful when the ambient transport needs non-default settings (proxy,
    /// TLS, timeouts); this layer adds none of its own.
    pub fn with_http_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Starts building a request with an arbitrary method.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UrlError`] when `url` is not an absolute
    /// URL; nothing is sent in that case.
    pub fn call(&self, method: Method, url: impl AsRef<str>) -> Result<RequestCall, ClientError> {
        RequestCall::build(self.client.clone(), method, url.as_ref())
    }

    /// Starts building a GET request.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UrlError`] when `url` is not absolute.
    pub fn get(&self, url: impl AsRef<str>) -> Result<RequestCall, ClientError> {
        self.call(Method::GET, url)
    }

    /// Starts building a POST request.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UrlError`] when `url` is not absolute.
    pub fn post(&self, url: impl AsRef<str>) -> Result<RequestCall, ClientError> {
        self.call(Method::POST, url)
    }

    /// Starts building a PUT request.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UrlError`] when `url` is not absolute.
    pub fn put(&self, url: impl AsRef<str>) -> Result<RequestCall, ClientError> {
        self.call(Method::PUT, url)
    }

    /// Starts building a DELETE request.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UrlError`] when `url` is not absolute.
    pub fn delete(&self, url: impl AsRef<str>) -> Result<RequestCall, ClientError> {
        self.call(Method::DELETE, url)
    }

    /// Starts building a PATCH request.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UrlError`] when `url` is not absolute.
    pub fn patch(&self, url: impl AsRef<str>) -> Result<RequestCall, ClientError> {
        self.call(Method::PATCH, url)
    }
}
