use headers::{ContentType, Header};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ClientError;

/// Response payload before any validation or typed decoding.
///
/// Downstream code must not assume a shape: a payload stays an unvalidated
/// JSON value (or raw text/bytes) until it is decoded with
/// [`ApiResponse::decode`] or passed through a schema validator.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Payload {
    /// Body parsed as JSON.
    Json(serde_json::Value),
    /// Textual body, including bodies that advertised JSON but did not parse.
    Text(String),
    /// Binary body.
    Bytes(Vec<u8>),
    /// No body.
    Empty,
}

/// Result of an executed API call.
///
/// Any HTTP status resolves to an `ApiResponse` — a 404 is a successful
/// exchange whose status happens to be 404. Only transport faults surface as
/// [`ClientError`].
///
/// # Example
///
/// ```rust,no_run
/// use apiprobe_core::RequestClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RequestClient::new();
/// let response = client.get("https://api.example.com/carts")?.await?;
///
/// assert!(response.status().is_success());
/// let carts = response.json().and_then(|value| value.get("carts"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    payload: Payload,
}

impl ApiResponse {
    /// Returns the HTTP status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Checks whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the payload as an unvalidated JSON value, if it parsed as JSON.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload as text, if it is textual.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Checks whether the response carried no body.
    pub fn is_empty(&self) -> bool {
        matches!(self.payload, Payload::Empty)
    }

    /// Deserializes a JSON payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::JsonError`] locating the first mismatched
    /// field when the payload does not fit `T`, or
    /// [`ClientError::UnsupportedPayload`] when the payload is not JSON.
    pub fn decode<T>(&self) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        match &self.payload {
            Payload::Json(value) => {
                serde_path_to_error::deserialize(value.clone()).map_err(|err| {
                    let path = err.path().to_string();
                    ClientError::JsonError {
                        path,
                        error: err.into_inner(),
                        body: value.to_string(),
                    }
                })
            }
            other => Err(ClientError::UnsupportedPayload {
                expected: "JSON",
                payload: other.clone(),
            }),
        }
    }

    pub(super) async fn from_response(response: reqwest::Response) -> Result<Self, ClientError> {
        let status = response.status();
        let headers = response.headers().clone();
        let content_type = Self::extract_content_type(&headers)?;
        let payload = Self::read_payload(response, content_type.as_ref(), status).await?;

        Ok(Self {
            status,
            headers,
            payload,
        })
    }

    /// Extracts and parses the `Content-Type` header from the response.
    fn extract_content_type(headers: &HeaderMap) -> Result<Option<ContentType>, ClientError> {
        let values = headers.get_all(CONTENT_TYPE).iter().collect::<Vec<_>>();

        if values.is_empty() {
            Ok(None)
        } else {
            let content_type = ContentType::decode(&mut values.into_iter())?;
            Ok(Some(content_type))
        }
    }

    /// Reads the body according to content type and status code.
    ///
    /// A body that advertises JSON but does not parse degrades to
    /// [`Payload::Text`] instead of failing the call.
    async fn read_payload(
        response: reqwest::Response,
        content_type: Option<&ContentType>,
        status: StatusCode,
    ) -> Result<Payload, ClientError> {
        let Some(content_type) = content_type else {
            return Ok(Payload::Empty);
        };
        if status == StatusCode::NO_CONTENT {
            return Ok(Payload::Empty);
        }

        let mime = content_type.to_string();
        if mime.starts_with("application/json") {
            let text = response.text().await?;
            if text.is_empty() {
                return Ok(Payload::Empty);
            }
            match serde_json::from_str(&text) {
                Ok(value) => Ok(Payload::Json(value)),
                Err(error) => {
                    debug!(%error, "body advertised JSON but did not parse, keeping raw text");
                    Ok(Payload::Text(text))
                }
            }
        } else if mime.starts_with("text/") {
            Ok(Payload::Text(response.text().await?))
        } else {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                Ok(Payload::Empty)
            } else {
                Ok(Payload::Bytes(bytes.to_vec()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn json_response(value: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            payload: Payload::Json(value),
        }
    }

    #[test]
    fn test_decode_typed_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Page {
            total: u64,
        }

        let response = json_response(serde_json::json!({"total": 3}));
        let page: Page = response.decode().unwrap();
        assert_eq!(page, Page { total: 3 });
    }

    #[test]
    fn test_decode_reports_mismatch_path() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Page {
            total: u64,
        }

        let response = json_response(serde_json::json!({"total": "three"}));
        let result = response.decode::<Page>();
        match result {
            Err(ClientError::JsonError { path, .. }) => assert_eq!(path, "total"),
            other => panic!("expected JsonError, got: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_non_json_payload() {
        let response = ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            payload: Payload::Text("plain".to_string()),
        };

        let result = response.decode::<serde_json::Value>();
        assert!(matches!(
            result,
            Err(ClientError::UnsupportedPayload { expected: "JSON", .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let response = json_response(serde_json::json!({"ok": true}));
        assert!(response.is_success());
        assert!(response.json().is_some());
        assert!(response.text().is_none());
        assert!(!response.is_empty());
    }
}
