//! Assembles a channel's feed document, one item per variant.

use shopfeed_core::{Product, Store, Variant};

use crate::availability::{availability, variant_options};
use crate::extract::{build_context, extract_field_value};
use crate::field::ChannelMapping;

/// Channel whose standard fields are written under the `g:` namespace.
pub const SHOPPING_FEED_CHANNEL: &str = "google";

/// Fields namespaced on the [`SHOPPING_FEED_CHANNEL`].
pub const SHOPPING_FEED_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "link",
    "image_link",
    "availability",
    "price",
    "brand",
    "gtin",
    "mpn",
    "condition",
    "item_group_id",
    "color",
    "size",
    "sale_price",
    "additional_image_link",
];

/// Feed-level `<title>`, `<link>` and `<description>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedHeader {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl FeedHeader {
    #[must_use]
    pub fn for_channel(store: &Store, channel: &str) -> Self {
        Self {
            title: format!("{} Product Feed - {}", store.name, channel.to_uppercase()),
            link: format!("https://{}", store.host()),
            description: format!("Product feed for {channel}"),
        }
    }
}

/// One feed entry: output field name → text, in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub fields: Vec<(String, String)>,
}

impl Item {
    /// First value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: String,
    pub header: FeedHeader,
    pub items: Vec<Item>,
}

impl FeedDocument {
    /// Serialized element name of `field`, with its namespace prefix if any.
    #[must_use]
    pub fn element_name(&self, field: &str) -> String {
        if self.channel == SHOPPING_FEED_CHANNEL && SHOPPING_FEED_FIELDS.contains(&field) {
            format!("g:{field}")
        } else {
            field.to_owned()
        }
    }
}

/// Builds `mapping`'s feed over every variant of every product.
///
/// Products without variants contribute no items.
#[must_use]
pub fn build_feed(products: &[Product], store: &Store, mapping: &ChannelMapping) -> FeedDocument {
    let items = products
        .iter()
        .flat_map(|product| {
            product
                .variants
                .iter()
                .map(move |variant| build_item(product, variant, store, mapping))
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        store = %store.name,
        channel = %mapping.channel,
        products = products.len(),
        items = items.len(),
        "built feed"
    );

    FeedDocument {
        channel: mapping.channel.clone(),
        header: FeedHeader::for_channel(store, &mapping.channel),
        items,
    }
}

/// Builds the item for one variant.
///
/// `availability` is always derived from inventory; `size` and `color` come
/// from the variant's options when it has one by that name.
#[must_use]
pub fn build_item(
    product: &Product,
    variant: &Variant,
    store: &Store,
    mapping: &ChannelMapping,
) -> Item {
    let context = build_context(store, product, variant);
    let options = variant_options(product, variant);

    let fields = mapping
        .fields
        .iter()
        .map(|field| {
            let value = match field.name.as_str() {
                "availability" => availability(variant).to_owned(),
                name @ ("size" | "color") if options.contains_key(name) => {
                    options[name].clone()
                }
                _ => extract_field_value(&field.spec, product, variant, &context),
            };
            (field.name.clone(), value)
        })
        .collect();

    Item { fields }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
