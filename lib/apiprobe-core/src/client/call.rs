use std::future::{Future, IntoFuture};
use std::pin::Pin;

use headers::HeaderMapExt;
use http::Method;
use reqwest::{Body, Request};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::auth::Authentication;
use super::body::CallBody;
use super::error::ClientError;
use super::parameters::{CallHeaders, CallQuery};
use super::response::ApiResponse;

/// Builder for a single HTTP request.
///
/// Created by the per-verb methods of [`RequestClient`](super::RequestClient)
/// and executed by awaiting it directly:
///
/// ```rust,no_run
/// use apiprobe_core::{CallQuery, RequestClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RequestClient::new();
/// let response = client
///     .get("https://api.example.com/users")?
///     .with_query(CallQuery::new().add_param("page", 1).add_param("limit", 10))
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Each call is independent: one request in flight, no retry, no caching,
/// and no remembered authentication. A call suspends once, until the network
/// round trip resolves.
#[derive(derive_more::Debug)]
pub struct RequestCall {
    #[debug(skip)]
    client: reqwest::Client,
    method: Method,
    url: Url,
    query: CallQuery,
    headers: Option<CallHeaders>,
    #[debug(ignore)]
    body: Option<CallBody>,
    authentication: Option<Authentication>,
}

impl RequestCall {
    pub(super) fn build(
        client: reqwest::Client,
        method: Method,
        url: &str,
    ) -> Result<Self, ClientError> {
        let url = Url::parse(url)?;

        Ok(Self {
            client,
            method,
            url,
            query: CallQuery::default(),
            headers: None,
            body: None,
            authentication: None,
        })
    }

    /// Sets the query parameters, replacing any previously set.
    #[must_use]
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn add_query_param<T: Serialize>(mut self, name: impl Into<String>, value: T) -> Self {
        self.query = self.query.add_param(name, value);
        self
    }

    /// Adds headers, merging with any existing headers.
    ///
    /// Later entries override earlier ones on (case-insensitive) name
    /// collision, including the default `Content-Type` contributed by a body.
    #[must_use]
    pub fn with_headers(mut self, headers: CallHeaders) -> Self {
        self.headers = match self.headers.take() {
            Some(existing) => Some(existing.merge(headers)),
            None => Some(headers),
        };
        self
    }

    /// Convenience method to add a single header.
    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl ToString) -> Self {
        self.with_headers(CallHeaders::new().add_header(name, value))
    }

    /// Attaches authentication to this call only.
    ///
    /// The client remembers nothing between calls: protected endpoints need
    /// the authentication passed on every call.
    #[must_use]
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Sets a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::JsonValueError`] if serialization fails.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(CallBody::json(body)?);
        Ok(self)
    }

    /// Sets a form-encoded request body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SerializationError`] if form encoding fails.
    pub fn form<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(CallBody::form(body)?);
        Ok(self)
    }

    /// Sets a plain text request body.
    #[must_use]
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.body = Some(CallBody::text(content));
        self
    }

    /// Builds the final request URL, appending the query string when present.
    fn build_url(url: &Url, query: &CallQuery) -> Result<Url, ClientError> {
        let mut url = url.clone();
        if !query.is_empty() {
            let query_string = query.to_query_string()?;
            url.set_query(Some(&query_string));
        }
        Ok(url)
    }

    fn build_request(
        client_url: Url,
        method: Method,
        headers: Option<&CallHeaders>,
        body: Option<&CallBody>,
        authentication: Option<&Authentication>,
    ) -> Result<Request, ClientError> {
        let is_get = method == Method::GET;
        let mut request = Request::new(method, client_url);

        // Body first: its default Content-Type must lose to explicit headers
        if let Some(body) = body {
            if is_get {
                debug!("request body on GET is not sent");
            } else {
                request.headers_mut().typed_insert(body.content_type.clone());
                *request.body_mut() = Some(Body::from(body.data.clone()));
            }
        }

        if let Some(authentication) = authentication {
            let (name, value) = authentication.to_header()?;
            request.headers_mut().insert(name, value);
        }

        if let Some(headers) = headers {
            for (name, value) in headers.to_http_headers()? {
                request.headers_mut().insert(name, value);
            }
        }

        Ok(request)
    }

    async fn exchange(self) -> Result<ApiResponse, ClientError> {
        let Self {
            client,
            method,
            url,
            query,
            headers,
            body,
            authentication,
        } = self;

        let url = Self::build_url(&url, &query)?;
        let request = Self::build_request(
            url,
            method,
            headers.as_ref(),
            body.as_ref(),
            authentication.as_ref(),
        )?;

        debug!(?request, "sending...");
        let response = client.execute(request).await?;
        debug!(status = %response.status(), "...received");

        ApiResponse::from_response(response).await
    }
}

/// Enables direct `.await` on a `RequestCall`.
impl IntoFuture for RequestCall {
    type Output = Result<ApiResponse, ClientError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.exchange())
    }
}
