//! Conversion from raw Admin API JSON into [`shopfeed_core::Product`].

use serde::Deserialize;
use serde_json::Value;
use shopfeed_core::{InventoryPolicy, Product, ProductOption, Variant};

use crate::error::ShopifyError;
use crate::types::{ShopifyProduct, ShopifyVariant};

/// Normalizes one raw product object, keeping the object itself as the
/// product's `document` and each variant object as that variant's `document`.
///
/// A product without variants is valid and yields an empty variant list.
/// A missing or `null` title, handle or option name becomes `""`. A variant
/// that fails to normalize is logged and skipped; its siblings are kept.
///
/// # Errors
///
/// Returns [`ShopifyError::Normalization`] if the product lacks an `id` or
/// has a field of the wrong JSON type.
pub fn normalize_product(document: Value) -> Result<Product, ShopifyError> {
    let raw = ShopifyProduct::deserialize(&document).map_err(|e| ShopifyError::Normalization {
        product_id: id_hint(&document),
        reason: e.to_string(),
    })?;

    let variants = document
        .get("variants")
        .and_then(Value::as_array)
        .map(|variants| {
            variants
                .iter()
                .filter_map(|v| match normalize_variant(v.clone(), raw.id) {
                    Ok(variant) => Some(variant),
                    Err(e) => {
                        tracing::warn!(
                            product_id = raw.id,
                            error = %e,
                            "skipping malformed variant"
                        );
                        None
                    }
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut options: Vec<ProductOption> = raw
        .options
        .into_iter()
        .enumerate()
        .map(|(idx, option)| ProductOption {
            name: option.name.unwrap_or_default(),
            position: option
                .position
                .unwrap_or_else(|| u32::try_from(idx + 1).unwrap_or(u32::MAX)),
        })
        .collect();
    options.sort_by_key(|option| option.position);

    Ok(Product {
        id: raw.id,
        title: raw.title.unwrap_or_default(),
        handle: raw.handle.unwrap_or_default(),
        body_html: raw.body_html,
        vendor: raw.vendor,
        product_type: raw.product_type,
        options,
        variants,
        document,
    })
}

fn normalize_variant(document: Value, product_id: i64) -> Result<Variant, ShopifyError> {
    let raw = ShopifyVariant::deserialize(&document).map_err(|e| ShopifyError::Normalization {
        product_id: product_id.to_string(),
        reason: format!("variant {}: {e}", id_hint(&document)),
    })?;

    let inventory_policy = match raw.inventory_policy.as_deref() {
        Some("continue") => InventoryPolicy::Continue,
        _ => InventoryPolicy::Deny,
    };

    Ok(Variant {
        id: raw.id,
        price: raw.price,
        compare_at_price: raw.compare_at_price,
        sku: raw.sku,
        barcode: raw.barcode,
        inventory_quantity: raw.inventory_quantity,
        inventory_policy,
        option_values: [raw.option1, raw.option2, raw.option3],
        document,
    })
}

fn id_hint(document: &Value) -> String {
    document
        .get("id")
        .map_or_else(|| "<unknown>".to_owned(), Value::to_string)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
