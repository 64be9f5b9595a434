//! Per-variant field resolution.

use shopfeed_core::{Product, Store, Variant};

use crate::field::FieldSpec;
use crate::path::resolve_to_string;
use crate::template::{Context, ContextValue};

/// Builds the placeholder context for one product/variant pair.
///
/// Keys, in substitution order: store fields, product fields, then the
/// `variant.`-prefixed variant fields. A missing inventory quantity is `0`.
#[must_use]
pub fn build_context(store: &Store, product: &Product, variant: &Variant) -> Context {
    let mut ctx = Context::new();
    ctx.insert("shop_domain", store.host());
    ctx.insert("language", store.language.as_str());
    ctx.insert("currency", store.currency.as_str());

    ctx.insert("handle", product.handle.as_str());
    ctx.insert("id", product.id);
    ctx.insert("title", product.title.as_str());
    ctx.insert("body_html", product.body_html.as_deref());
    ctx.insert("vendor", product.vendor.as_deref());
    ctx.insert("product_type", product.product_type.as_deref());

    ctx.insert("variant.id", variant.id);
    ctx.insert("variant.price", variant.price.as_deref());
    ctx.insert("variant.compare_at_price", variant.compare_at_price.as_deref());
    ctx.insert("variant.sku", variant.sku.as_deref());
    ctx.insert("variant.barcode", variant.barcode.as_deref());
    ctx.insert(
        "variant.inventory_quantity",
        ContextValue::Integer(variant.inventory_quantity.unwrap_or(0)),
    );
    ctx
}

/// Resolves one field specification to its output text.
///
/// Absent values become `""`; present falsy values such as `0` are kept.
#[must_use]
pub fn extract_field_value(
    spec: &FieldSpec,
    product: &Product,
    variant: &Variant,
    context: &Context,
) -> String {
    match spec {
        FieldSpec::Literal(text) => text.clone(),
        FieldSpec::Template(expression) => expression.evaluate(context),
        FieldSpec::VariantPath(path) => resolve_to_string(&variant.document, path),
        FieldSpec::ProductPath(path) => resolve_to_string(&product.document, path),
    }
}
