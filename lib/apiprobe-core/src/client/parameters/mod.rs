//! Request parameter types for building API calls.
//!
//! - [`CallQuery`] - Query string parameters, insertion-ordered
//! - [`CallHeaders`] - HTTP headers, case-insensitive merge

mod query;
pub use self::query::CallQuery;

mod headers;
pub use self::headers::CallHeaders;
