//! Strict structural validation of response payloads.
//!
//! Validation happens at the boundary, after a response arrives: the client
//! never validates. A [`SchemaValidator`] is compiled once from a strict
//! JSON Schema document (every document in [`documents`] sets
//! `additionalProperties: false`) and then checked against unvalidated
//! payloads. A failed validation enumerates *every* nonconforming field, not
//! just the first.
//!
//! ```rust
//! use apiprobe_core::schema::{SchemaValidator, documents};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = SchemaValidator::new("login-response", &documents::login_response())?;
//!
//! let payload = serde_json::json!({"username": "emilys"});
//! let error = validator.validate(&payload).unwrap_err();
//! assert!(error.violations().iter().any(|violation| violation.contains("accessToken")));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use jsonschema::{Draft, Validator};
use serde_json::Value;

pub mod documents;

/// A schema document failed to compile.
///
/// This is a programmer error in the document itself, surfaced eagerly when
/// the validator is constructed.
#[derive(Debug, derive_more::Error, derive_more::Display)]
#[display("schema '{schema}' did not compile: {message}")]
pub struct SchemaError {
    schema: String,
    message: String,
}

/// A payload did not conform to a strict schema.
///
/// Carries one entry per nonconforming field — missing required fields,
/// wrong types, out-of-range values, and extra fields all appear, each with
/// its location in the payload.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ValidationError {
    schema: String,
    violations: Vec<String>,
}

impl ValidationError {
    /// Name of the schema the payload was checked against.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Every violation found, as `<instance location>: <message>` entries.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payload does not match schema '{}': {}",
            self.schema,
            self.violations.join("; ")
        )
    }
}

/// Compiled strict validator for one schema document.
#[derive(derive_more::Debug)]
pub struct SchemaValidator {
    name: String,
    #[debug(skip)]
    validator: Validator,
}

impl SchemaValidator {
    /// Compiles a validator from a JSON Schema document (draft 2020-12).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the document is not a valid schema.
    pub fn new(name: impl Into<String>, schema: &Value) -> Result<Self, SchemaError> {
        let name = name.into();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|err| SchemaError {
                schema: name.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { name, validator })
    }

    /// Validates a payload, returning it unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every nonconforming field.
    pub fn validate<'a>(&self, payload: &'a Value) -> Result<&'a Value, ValidationError> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(payload)
            .map(|error| format!("{}: {error}", error.instance_path()))
            .collect();

        if violations.is_empty() {
            Ok(payload)
        } else {
            Err(ValidationError {
                schema: self.name.clone(),
                violations,
            })
        }
    }

    /// Checks a payload without collecting violations.
    pub fn is_valid(&self, payload: &Value) -> bool {
        self.validator.is_valid(payload)
    }
}
