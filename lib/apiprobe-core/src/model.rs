//! Typed models for the demo API wire format.
//!
//! These mirror the payloads the strict schema documents describe, camelCase
//! on the wire. Assertions typically validate a raw payload first, then
//! decode into one of these for convenient field access.

use serde::{Deserialize, Serialize};

/// Successful login payload: token pair plus the user's profile fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer credential for protected calls.
    pub access_token: String,
    /// Opaque credential for the token-refresh endpoint.
    pub refresh_token: String,
    /// User identifier.
    pub id: u64,
    /// Account username.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Profile gender.
    pub gender: Gender,
    /// Avatar image URL.
    pub image: String,
}

/// Profile gender as the demo API models it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `"male"` on the wire.
    Male,
    /// `"female"` on the wire.
    Female,
}

/// A fresh token pair from the refresh endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Replacement access token.
    pub access_token: String,
    /// Replacement refresh token.
    pub refresh_token: String,
}

/// Current-user payload: the login response without tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    pub id: u64,
    /// Account username.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Profile gender.
    pub gender: Gender,
    /// Avatar image URL.
    pub image: String,
}

/// One product line inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    /// Product identifier.
    pub id: u64,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Units in the cart.
    pub quantity: u32,
    /// Line total before discount.
    pub total: f64,
    /// Discount applied to the line, in percent.
    pub discount_percentage: f64,
    /// Line total after discount.
    pub discounted_price: f64,
    /// Product thumbnail URL.
    pub thumbnail: String,
}

/// A user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart identifier.
    pub id: u64,
    /// Product lines.
    pub products: Vec<CartProduct>,
    /// Cart total before discounts.
    pub total: f64,
    /// Cart total after discounts.
    pub discounted_total: f64,
    /// Owner of the cart.
    pub user_id: u64,
    /// Number of distinct products.
    pub total_products: u32,
    /// Number of units across all lines.
    pub total_quantity: u32,
}

/// Paginated carts collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartsPage {
    /// The carts on this page, possibly empty.
    pub carts: Vec<Cart>,
    /// Total carts across all pages.
    pub total: u64,
    /// Number of carts skipped.
    pub skip: u64,
    /// Page size.
    pub limit: u64,
}
