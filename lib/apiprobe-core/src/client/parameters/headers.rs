use http::header::{HeaderName, HeaderValue};
use indexmap::IndexMap;

use crate::client::error::ClientError;

/// HTTP headers for an API call.
///
/// Header names are stored with the caller's spelling but compared
/// case-insensitively, per HTTP semantics: adding `content-type` after
/// `Content-Type` replaces the earlier entry. Insertion order is preserved.
///
/// # Example
///
/// ```rust
/// use apiprobe_core::CallHeaders;
///
/// let headers = CallHeaders::new()
///     .add_header("Authorization", "Bearer token123")
///     .add_header("X-Request-ID", "abc-123-def");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallHeaders {
    headers: IndexMap<String, String>,
}

impl CallHeaders {
    /// Creates a new empty `CallHeaders` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, replacing any existing header with the same name
    /// (compared case-insensitively).
    #[must_use]
    pub fn add_header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let name = name.into();
        let existing = self
            .headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(&name))
            .cloned();
        if let Some(existing) = existing {
            self.headers.shift_remove(&existing);
        }
        self.headers.insert(name, value.to_string());
        self
    }

    /// Merges another `CallHeaders` into this one.
    ///
    /// Headers from the other instance override headers with the same name.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (name, value) in other.headers {
            self = self.add_header(name, value);
        }
        self
    }

    /// Checks if the headers collection is empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Looks up a header value by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Converts the collection into HTTP header pairs.
    pub(in crate::client) fn to_http_headers(
        &self,
    ) -> Result<Vec<(HeaderName, HeaderValue)>, ClientError> {
        let mut result = Vec::with_capacity(self.headers.len());

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let value = HeaderValue::from_str(value)?;
            result.push((name, value));
        }

        Ok(result)
    }
}
