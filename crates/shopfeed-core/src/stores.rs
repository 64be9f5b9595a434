use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::{read_yaml, ConfigError};

/// One storefront to generate feeds for.
#[derive(Clone, Deserialize)]
pub struct Store {
    /// Short name, used as the feed subdirectory and public file prefix.
    pub name: String,
    /// Admin API host, e.g. `"example-fr.myshopify.com"`. A leading
    /// `http://` or `https://` is tolerated; see [`Store::host`].
    pub shop_domain: String,
    pub access_token: String,
    /// Language tag, e.g. `"fr"`.
    pub language: String,
    /// ISO 4217 currency code, e.g. `"EUR"`.
    pub currency: String,
}

impl Store {
    /// File name for this store's feed on `channel`, e.g. `"google_fr_EUR.xml"`.
    #[must_use]
    pub fn feed_file_name(&self, channel: &str) -> String {
        format!("{channel}_{}_{}.xml", self.language, self.currency)
    }

    /// `shop_domain` without any `http://`/`https://` scheme or trailing slash.
    #[must_use]
    pub fn host(&self) -> &str {
        let domain = self.shop_domain.trim();
        let domain = domain
            .strip_prefix("https://")
            .or_else(|| domain.strip_prefix("http://"))
            .unwrap_or(domain);
        domain.trim_end_matches('/')
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.name)
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[redacted]")
            .field("language", &self.language)
            .field("currency", &self.currency)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<Store>,
}

/// Load and validate the store list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stores(path: &Path) -> Result<StoresFile, ConfigError> {
    let stores_file: StoresFile = read_yaml(path)?;
    validate_stores(&stores_file)?;
    Ok(stores_file)
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for store in &stores_file.stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_string(),
            ));
        }

        if store.shop_domain.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty shop_domain",
                store.name
            )));
        }

        if store.access_token.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty access_token",
                store.name
            )));
        }

        if !seen_names.insert(store.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store name: '{}'",
                store.name
            )));
        }
    }

    Ok(())
}
