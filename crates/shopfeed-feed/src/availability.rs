//! Fields derived from a variant rather than from the channel mapping.

use std::collections::HashMap;

use shopfeed_core::{InventoryPolicy, Product, Variant};

pub const PREORDER: &str = "preorder";
pub const IN_STOCK: &str = "in stock";
pub const OUT_OF_STOCK: &str = "out of stock";

/// Availability label: `continue` selling is a preorder, otherwise stock decides.
#[must_use]
pub fn availability(variant: &Variant) -> &'static str {
    if variant.inventory_policy == InventoryPolicy::Continue {
        PREORDER
    } else if variant.inventory_quantity.unwrap_or(0) > 0 {
        IN_STOCK
    } else {
        OUT_OF_STOCK
    }
}

/// Lower-cased option name → value for each non-empty option slot of
/// `variant` that has a product option at the same index.
#[must_use]
pub fn variant_options(product: &Product, variant: &Variant) -> HashMap<String, String> {
    variant
        .option_values
        .iter()
        .zip(&product.options)
        .filter_map(|(value, option)| {
            let value = value.as_deref().filter(|v| !v.is_empty())?;
            Some((option.name.to_lowercase(), value.to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use shopfeed_core::ProductOption;

    use super::*;

    fn variant(policy: InventoryPolicy, quantity: Option<i64>) -> Variant {
        Variant {
            id: 1,
            price: None,
            compare_at_price: None,
            sku: None,
            barcode: None,
            inventory_quantity: quantity,
            inventory_policy: policy,
            option_values: [None, None, None],
            document: Value::Null,
        }
    }

    #[test]
    fn continue_policy_is_preorder_regardless_of_quantity() {
        assert_eq!(availability(&variant(InventoryPolicy::Continue, Some(5))), "preorder");
        assert_eq!(availability(&variant(InventoryPolicy::Continue, Some(0))), "preorder");
    }

    #[test]
    fn deny_policy_depends_on_quantity() {
        assert_eq!(availability(&variant(InventoryPolicy::Deny, Some(5))), "in stock");
        assert_eq!(availability(&variant(InventoryPolicy::Deny, Some(0))), "out of stock");
        assert_eq!(availability(&variant(InventoryPolicy::Deny, Some(-2))), "out of stock");
        assert_eq!(availability(&variant(InventoryPolicy::Deny, None)), "out of stock");
    }

    fn product(option_names: &[&str]) -> Product {
        Product {
            id: 1,
            title: "Shirt".to_owned(),
            handle: "shirt".to_owned(),
            body_html: None,
            vendor: None,
            product_type: None,
            options: option_names
                .iter()
                .zip(1..)
                .map(|(name, position)| ProductOption {
                    name: (*name).to_owned(),
                    position,
                })
                .collect(),
            variants: Vec::new(),
            document: Value::Null,
        }
    }

    #[test]
    fn options_are_keyed_by_lowercased_name() {
        let mut v = variant(InventoryPolicy::Deny, None);
        v.option_values = [Some("M".to_owned()), Some("Blue".to_owned()), None];
        let options = variant_options(&product(&["Size", "Color"]), &v);
        assert_eq!(options.len(), 2);
        assert_eq!(options["size"], "M");
        assert_eq!(options["color"], "Blue");
    }

    #[test]
    fn empty_values_and_unmatched_slots_are_skipped() {
        let mut v = variant(InventoryPolicy::Deny, None);
        v.option_values = [Some(String::new()), Some("Blue".to_owned()), Some("Cotton".to_owned())];
        let options = variant_options(&product(&["Size", "Color"]), &v);
        assert_eq!(options.len(), 1);
        assert_eq!(options["color"], "Blue");
    }
}
