use headers::ContentType;
use serde::Serialize;

use super::error::ClientError;

/// Request body with its content type.
///
/// A body contributes a default `Content-Type` header to the request; an
/// explicit caller-supplied `Content-Type` header overrides it.
#[derive(Clone, derive_more::Debug)]
pub struct CallBody {
    pub(super) content_type: ContentType,
    #[debug(ignore)]
    pub(super) data: Vec<u8>,
}

impl CallBody {
    /// Creates a JSON body (`application/json`) from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::JsonValueError`] if serialization fails.
    pub fn json<T>(value: &T) -> Result<Self, ClientError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec(value)?;
        Ok(Self {
            content_type: ContentType::json(),
            data,
        })
    }

    /// Creates a form-encoded body (`application/x-www-form-urlencoded`)
    /// from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SerializationError`] if form encoding fails.
    pub fn form<T>(value: &T) -> Result<Self, ClientError>
    where
        T: Serialize,
    {
        let data = serde_urlencoded::to_string(value)
            .map_err(|e| ClientError::SerializationError {
                message: format!("Failed to serialize form data: {e}"),
            })?
            .into_bytes();

        Ok(Self {
            content_type: ContentType::form_url_encoded(),
            data,
        })
    }

    /// Creates a plain text body (`text/plain; charset=utf-8`).
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::text_utf8(),
            data: content.into().into_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Login {
        username: String,
        password: String,
    }

    #[test]
    fn test_json_body() {
        let body = CallBody::json(&Login {
            username: "emilys".to_string(),
            password: "emilyspass".to_string(),
        })
        .unwrap();

        assert_eq!(body.content_type, ContentType::json());
        let text = String::from_utf8(body.data).unwrap();
        insta::assert_snapshot!(text, @r#"{"username":"emilys","password":"emilyspass"}"#);
    }

    #[test]
    fn test_form_body() {
        let body = CallBody::form(&Login {
            username: "emilys".to_string(),
            password: "emilyspass".to_string(),
        })
        .unwrap();

        assert_eq!(body.content_type, ContentType::form_url_encoded());
        let text = String::from_utf8(body.data).unwrap();
        insta::assert_snapshot!(text, @"username=emilys&password=emilyspass");
    }

    #[test]
    fn test_text_body() {
        let body = CallBody::text("hello");

        assert_eq!(body.content_type, ContentType::text_utf8());
        assert_eq!(body.data, b"hello");
    }
}
