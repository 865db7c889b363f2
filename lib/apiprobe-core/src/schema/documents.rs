//! Strict schema documents for the demo API.
//!
//! Every document sets `additionalProperties: false` and lists all fields as
//! required, so a payload with a missing *or* an extra field fails
//! validation.

use serde_json::{Value, json};

/// Schema for a successful login response: the token pair plus the profile
/// fields of the authenticated user.
pub fn login_response() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": [
            "accessToken",
            "refreshToken",
            "id",
            "username",
            "email",
            "firstName",
            "lastName",
            "gender",
            "image"
        ],
        "properties": {
            "accessToken": { "type": "string", "minLength": 1 },
            "refreshToken": { "type": "string", "minLength": 1 },
            "id": { "type": "integer", "minimum": 1 },
            "username": { "type": "string", "minLength": 1 },
            "email": { "type": "string", "format": "email" },
            "firstName": { "type": "string", "minLength": 1 },
            "lastName": { "type": "string", "minLength": 1 },
            "gender": { "enum": ["male", "female"] },
            "image": { "type": "string", "format": "uri" }
        }
    })
}

/// Schema for the current-user endpoint: the login response without tokens.
pub fn user_profile() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": [
            "id",
            "username",
            "email",
            "firstName",
            "lastName",
            "gender",
            "image"
        ],
        "properties": {
            "id": { "type": "integer", "minimum": 1 },
            "username": { "type": "string", "minLength": 1 },
            "email": { "type": "string", "format": "email" },
            "firstName": { "type": "string", "minLength": 1 },
            "lastName": { "type": "string", "minLength": 1 },
            "gender": { "enum": ["male", "female"] },
            "image": { "type": "string", "format": "uri" }
        }
    })
}

/// Schema for a token-refresh response: a fresh token pair and nothing else.
pub fn token_refresh() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": ["accessToken", "refreshToken"],
        "properties": {
            "accessToken": { "type": "string", "minLength": 1 },
            "refreshToken": { "type": "string", "minLength": 1 }
        }
    })
}

/// Schema for one product line inside a cart.
fn cart_product() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "id",
            "title",
            "price",
            "quantity",
            "total",
            "discountPercentage",
            "discountedPrice",
            "thumbnail"
        ],
        "properties": {
            "id": { "type": "integer", "minimum": 1 },
            "title": { "type": "string", "minLength": 1 },
            "price": { "type": "number", "minimum": 0 },
            "quantity": { "type": "integer", "minimum": 1 },
            "total": { "type": "number", "minimum": 0 },
            "discountPercentage": { "type": "number", "minimum": 0 },
            "discountedPrice": { "type": "number", "minimum": 0 },
            "thumbnail": { "type": "string", "format": "uri" }
        }
    })
}

/// Schema for a single cart.
pub fn cart() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": [
            "id",
            "products",
            "total",
            "discountedTotal",
            "userId",
            "totalProducts",
            "totalQuantity"
        ],
        "properties": {
            "id": { "type": "integer", "minimum": 1 },
            "products": { "type": "array", "items": cart_product() },
            "total": { "type": "number", "minimum": 0 },
            "discountedTotal": { "type": "number", "minimum": 0 },
            "userId": { "type": "integer", "minimum": 1 },
            "totalProducts": { "type": "integer", "minimum": 0 },
            "totalQuantity": { "type": "integer", "minimum": 0 }
        }
    })
}

/// Schema for the paginated carts collection.
///
/// The `carts` field is an array-typed container, possibly empty.
pub fn carts_page() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": ["carts", "total", "skip", "limit"],
        "properties": {
            "carts": { "type": "array", "items": cart() },
            "total": { "type": "integer", "minimum": 0 },
            "skip": { "type": "integer", "minimum": 0 },
            "limit": { "type": "integer", "minimum": 0 }
        }
    })
}
