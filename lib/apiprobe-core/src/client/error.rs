use super::auth::AuthenticationError;
use super::response::Payload;

/// Errors that can occur when building or executing a request.
///
/// Only transport-level faults and request-construction problems are errors
/// at this layer. A response with a non-2xx status is *not* an error; it is
/// returned as an ordinary [`ApiResponse`](super::ApiResponse) for the caller
/// to interpret.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// Network-level failure during an HTTP call.
    ///
    /// Covers DNS resolution, connection refusal, resets, and transport
    /// timeouts. Always propagated, never retried by this layer.
    #[display("transport error: {_0}")]
    Transport(reqwest::Error),

    /// The request URL could not be parsed as an absolute URL.
    UrlError(url::ParseError),

    /// HTTP header processing error.
    HeadersError(headers::Error),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error while building a request body.
    JsonValueError(serde_json::Error),

    /// Authentication data could not be rendered into a header.
    Authentication(AuthenticationError),

    /// Response payload deserialization failure.
    ///
    /// Occurs when a JSON payload does not match the expected shape.
    #[display("failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// Location of the mismatch within the payload.
        path: String,
        /// The underlying deserialization error.
        error: serde_json::Error,
        /// The payload that failed to deserialize.
        body: String,
    },

    /// The response payload kind is incompatible with the requested access.
    #[display("unsupported payload for {expected}:\n{payload:?}")]
    #[from(skip)]
    UnsupportedPayload {
        /// The payload kind the caller asked for.
        expected: &'static str,
        /// The payload actually received.
        payload: Payload,
    },

    /// Query parameter value type is not supported.
    #[display(
        "unsupported query parameter value: objects are not supported for query parameters. Got: {value}"
    )]
    #[from(skip)]
    UnsupportedQueryParameterValue {
        /// The unsupported value that was provided.
        value: serde_json::Value,
    },

    /// Data serialization failed.
    #[display("serialization error: {message}")]
    #[from(skip)]
    SerializationError {
        /// Description of the serialization failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ClientError>();
        assert_sync::<ClientError>();
    }

    #[test]
    fn test_unsupported_query_parameter_value_display() {
        let error = ClientError::UnsupportedQueryParameterValue {
            value: serde_json::json!({"nested": true}),
        };
        assert!(error.to_string().contains("objects are not supported"));
    }

    #[test]
    fn test_url_error_from_parse_failure() {
        let parse_error = url::Url::parse("not-an-absolute-url").unwrap_err();
        let error: ClientError = parse_error.into();
        assert!(matches!(error, ClientError::UrlError(_)));
    }
}
