use serde_json::Value;

/// A product as listed by the store's Admin API.
///
/// Typed fields cover what feed generation reads directly; `document` keeps
/// the full JSON object so mappings can address anything else by path
/// (e.g. `images[0].src`).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    /// URL slug, e.g. `"linen-shirt"`.
    pub handle: String,
    /// Raw HTML description.
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    /// Options in position order; a variant's `option_values[i]` belongs to `options[i]`.
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
    pub document: Value,
}

/// A product-level option axis such as `"Size"` or `"Color"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOption {
    pub name: String,
    pub position: u32,
}

/// A single purchasable variant of a [`Product`].
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub id: i64,
    /// Price as a decimal string, exactly as the API returns it.
    pub price: Option<String>,
    pub compare_at_price: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub inventory_quantity: Option<i64>,
    pub inventory_policy: InventoryPolicy,
    /// `option1`..`option3`.
    pub option_values: [Option<String>; 3],
    pub document: Value,
}

/// Whether a variant may be sold once its inventory reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InventoryPolicy {
    #[default]
    Deny,
    Continue,
}

impl std::fmt::Display for InventoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryPolicy::Deny => write!(f, "deny"),
            InventoryPolicy::Continue => write!(f, "continue"),
        }
    }
}

impl Product {
    /// Number of feed items this product contributes (one per variant).
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}
