//! Admin API response shapes for `GET /admin/api/{version}/products.json`.
//!
//! Products are kept as raw JSON values on the wire type so the full
//! document survives into [`shopfeed_core::Product::document`]; the typed
//! structs below are deserialized from those values during normalization.
//!
//! ### Nullability
//! Only `id` is required. `title`, `handle` and option `name` may be
//! missing or `null` and normalize to the empty string. `body_html`, `vendor`, `product_type`, `sku`, `barcode` and
//! `compare_at_price` are routinely `null`. `inventory_quantity` is absent
//! when the token lacks inventory scopes. `option2`/`option3` are `null`
//! for products with fewer option axes.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response from `GET products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    pub products: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub options: Vec<ShopifyOption>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyOption {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    pub id: i64,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub compare_at_price: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    /// `"deny"` or `"continue"`; anything else is treated as `"deny"`.
    #[serde(default)]
    pub inventory_policy: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
}
