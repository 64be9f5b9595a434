//! Field specifications, classified once when a channel mapping is compiled.

use shopfeed_core::ChannelConfig;

use crate::error::FeedError;
use crate::template::Expression;

const VARIANT_PREFIX: &str = "variant.";

/// How one output field is resolved for a product/variant pair.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// `'new'`: the text between the quotes.
    Literal(String),
    /// Anything holding both `{` and `}`: evaluated against the context.
    Template(Expression),
    /// `variant.<path>`: resolved against the variant document.
    VariantPath(String),
    /// Any other path: resolved against the product document.
    ProductPath(String),
}

impl FieldSpec {
    /// Classifies `spec`; the first matching form wins.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if spec.is_empty() {
            return Self::Literal(String::new());
        }

        if spec.starts_with('\'') && spec.ends_with('\'') {
            let end = spec.len().saturating_sub(1).max(1);
            return Self::Literal(spec.get(1..end).unwrap_or_default().to_owned());
        }

        if spec.contains('{') && spec.contains('}') {
            return Self::Template(Expression::parse(spec));
        }

        match spec.strip_prefix(VARIANT_PREFIX) {
            Some(path) => Self::VariantPath(path.to_owned()),
            None => Self::ProductPath(spec.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedField {
    pub name: String,
    pub spec: FieldSpec,
}

/// A channel's field mapping with every specification already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMapping {
    pub channel: String,
    pub fields: Vec<MappedField>,
}

impl ChannelMapping {
    /// Parses every specification of `config`, keeping declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidFieldName`] if an output field name cannot
    /// be used as an XML element name.
    pub fn compile(config: &ChannelConfig) -> Result<Self, FeedError> {
        let fields = config
            .fields
            .iter()
            .map(|(name, spec)| {
                if !is_element_name(name) {
                    return Err(FeedError::InvalidFieldName {
                        channel: config.name.clone(),
                        field: name.clone(),
                    });
                }
                Ok(MappedField {
                    name: name.clone(),
                    spec: FieldSpec::parse(spec),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            channel: config.name.clone(),
            fields,
        })
    }
}

/// Unprefixed XML element name; the writer adds any namespace prefix itself.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_spec_is_literal() {
        assert_eq!(FieldSpec::parse("'new'"), FieldSpec::Literal("new".to_owned()));
        assert_eq!(FieldSpec::parse("''"), FieldSpec::Literal(String::new()));
        assert_eq!(FieldSpec::parse("'"), FieldSpec::Literal(String::new()));
    }

    #[test]
    fn quoted_literal_wins_over_braces() {
        assert_eq!(
            FieldSpec::parse("'{handle}'"),
            FieldSpec::Literal("{handle}".to_owned())
        );
    }

    #[test]
    fn braces_make_a_template() {
        assert_eq!(
            FieldSpec::parse("https://{shop_domain}/products/{handle}"),
            FieldSpec::Template(Expression::Placeholders(
                "https://{shop_domain}/products/{handle}".to_owned()
            ))
        );
    }

    #[test]
    fn ternary_needs_braces_to_be_a_template() {
        assert!(matches!(
            FieldSpec::parse("{x} variant.inventory_quantity > 0 ? 'a' : 'b'"),
            FieldSpec::Template(_)
        ));
        assert_eq!(
            FieldSpec::parse("variant.inventory_quantity > 0 ? 'a' : 'b'"),
            FieldSpec::VariantPath("inventory_quantity > 0 ? 'a' : 'b'".to_owned())
        );
    }

    #[test]
    fn variant_prefix_is_stripped_once() {
        assert_eq!(
            FieldSpec::parse("variant.price"),
            FieldSpec::VariantPath("price".to_owned())
        );
        assert_eq!(
            FieldSpec::parse("variant.metafields.variant.size"),
            FieldSpec::VariantPath("metafields.variant.size".to_owned())
        );
    }

    #[test]
    fn anything_else_is_a_product_path() {
        assert_eq!(
            FieldSpec::parse("images[0].src"),
            FieldSpec::ProductPath("images[0].src".to_owned())
        );
        assert_eq!(FieldSpec::parse(""), FieldSpec::Literal(String::new()));
    }

    #[test]
    fn compile_keeps_field_order() {
        let config = ChannelConfig {
            name: "meta".to_owned(),
            fields: vec![
                ("id".to_owned(), "variant.id".to_owned()),
                ("condition".to_owned(), "'new'".to_owned()),
                ("brand".to_owned(), "vendor".to_owned()),
            ],
        };
        let mapping = ChannelMapping::compile(&config).unwrap();
        assert_eq!(mapping.channel, "meta");
        let names: Vec<&str> = mapping.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "condition", "brand"]);
        assert_eq!(mapping.fields[1].spec, FieldSpec::Literal("new".to_owned()));
    }

    #[test]
    fn compile_rejects_unusable_element_names() {
        for bad in ["g:price", "sale price", "1st", "<id>"] {
            let config = ChannelConfig {
                name: "google".to_owned(),
                fields: vec![(bad.to_owned(), "title".to_owned())],
            };
            let err = ChannelMapping::compile(&config).unwrap_err();
            assert!(
                matches!(err, FeedError::InvalidFieldName { ref field, .. } if field == bad),
                "expected rejection of {bad:?}, got {err:?}"
            );
        }
    }
}
