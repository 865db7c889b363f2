use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;

use crate::client::error::ClientError;

/// Characters kept verbatim in query components, everything else is
/// percent-encoded. Matches the unreserved set of RFC 3986.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query-string parameters for an API call.
///
/// Parameters keep their insertion order, which defines the order of the
/// resulting query string. Keys are unique: adding a parameter twice
/// replaces the earlier value.
///
/// Scalar values and arrays are supported; arrays are rendered as repeated
/// keys (`tags=a&tags=b`). Objects are rejected when the query string is
/// built.
///
/// # Example
///
/// ```rust
/// use apiprobe_core::CallQuery;
///
/// let query = CallQuery::new()
///     .add_param("page", 1)
///     .add_param("limit", 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallQuery {
    params: IndexMap<String, Value>,
}

impl CallQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    ///
    /// The value is converted through its `Serialize` implementation; values
    /// that cannot be represented as JSON are silently skipped.
    #[must_use]
    pub fn add_param<T: Serialize>(mut self, name: impl Into<String>, value: T) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.params.insert(name.into(), value);
        }
        self
    }

    /// Checks if the query is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Renders the query string, `&`-joined, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnsupportedQueryParameterValue`] when a value
    /// is an object (directly or inside an array).
    pub fn to_query_string(&self) -> Result<String, ClientError> {
        let mut pairs = Vec::with_capacity(self.params.len());

        for (name, value) in &self.params {
            match value {
                Value::Array(items) => {
                    for item in items {
                        pairs.push(Self::encode_pair(name, item)?);
                    }
                }
                other => pairs.push(Self::encode_pair(name, other)?),
            }
        }

        Ok(pairs.join("&"))
    }

    fn encode_pair(name: &str, value: &Value) -> Result<String, ClientError> {
        let rendered = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => String::new(),
            Value::Object(_) | Value::Array(_) => {
                return Err(ClientError::UnsupportedQueryParameterValue {
                    value: value.clone(),
                });
            }
        };
        Ok(format!("{}={}", encode(name), encode(&rendered)))
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        let query = CallQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.to_query_string().unwrap(), "");
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let query = CallQuery::new().add_param("page", 1).add_param("limit", 10);

        insta::assert_snapshot!(query.to_query_string().unwrap(), @"page=1&limit=10");
    }

    #[test]
    fn test_query_replaces_duplicate_keys() {
        let query = CallQuery::new().add_param("page", 1).add_param("page", 2);

        assert_eq!(query.len(), 1);
        insta::assert_snapshot!(query.to_query_string().unwrap(), @"page=2");
    }

    #[test]
    fn test_query_encodes_reserved_characters() {
        let query = CallQuery::new().add_param("q", "a b&c=d");

        insta::assert_snapshot!(query.to_query_string().unwrap(), @"q=a%20b%26c%3Dd");
    }

    #[test]
    fn test_query_keeps_unreserved_characters() {
        let query = CallQuery::new().add_param("file", "report-v1.2_final~draft");

        insta::assert_snapshot!(
            query.to_query_string().unwrap(),
            @"file=report-v1.2_final~draft"
        );
    }

    #[test]
    fn test_query_renders_arrays_as_repeated_keys() {
        let query = CallQuery::new().add_param("tags", vec!["rust", "web"]);

        insta::assert_snapshot!(query.to_query_string().unwrap(), @"tags=rust&tags=web");
    }

    #[test]
    fn test_query_rejects_objects() {
        let query = CallQuery::new().add_param("filter", serde_json::json!({"name": "x"}));

        let result = query.to_query_string();
        assert!(matches!(
            result,
            Err(ClientError::UnsupportedQueryParameterValue { .. })
        ));
    }

    #[test]
    fn test_query_supports_booleans_and_null() {
        let query = CallQuery::new()
            .add_param("active", true)
            .add_param("cursor", Value::Null);

        insta::assert_snapshot!(query.to_query_string().unwrap(), @"active=true&cursor=");
    }
}
