//! Channel mapping configuration.
//!
//! The file lists, per channel, the output fields of one feed item and the
//! field specification each is resolved from:
//!
//! ```yaml
//! channels:
//!   google:
//!     fields:
//!       - id: variant.id
//!       - item_group_id: id
//!       - link: "https://{shop_domain}/products/{handle}?variant={variant.id}"
//!       - condition: "'new'"
//! ```
//!
//! Both channel order and field order are significant, so the raw document
//! is read through `serde_yaml::Mapping`, which keeps insertion order.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::{read_yaml, ConfigError};

/// One channel's ordered `(output field, field specification)` pairs.
///
/// Specifications are kept as raw strings here; they are compiled into
/// expressions by the feed crate once, before any product is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ChannelsFile {
    pub channels: Vec<ChannelConfig>,
}

#[derive(Deserialize)]
struct RawChannelsFile {
    channels: Mapping,
}

#[derive(Deserialize)]
struct RawChannel {
    fields: Vec<Mapping>,
}

/// Load and validate channel mappings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, if a channel
/// has no fields, or if a field name or specification is not a scalar.
pub fn load_channels(path: &Path) -> Result<ChannelsFile, ConfigError> {
    let raw: RawChannelsFile = read_yaml(path)?;
    let mut channels = Vec::with_capacity(raw.channels.len());

    for (key, value) in raw.channels {
        let name = scalar_to_string(&key)
            .ok_or_else(|| ConfigError::Validation("channel name must be a scalar".to_string()))?;
        let channel: RawChannel =
            serde_yaml::from_value(value).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        channels.push(build_channel(name, channel)?);
    }

    Ok(ChannelsFile { channels })
}

fn build_channel(name: String, raw: RawChannel) -> Result<ChannelConfig, ConfigError> {
    let mut fields = Vec::new();

    for entry in raw.fields {
        for (field, spec) in entry {
            let field = scalar_to_string(&field)
                .filter(|f| !f.trim().is_empty())
                .ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "channel '{name}' has an empty or non-scalar field name"
                    ))
                })?;
            let spec = scalar_to_string(&spec).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "channel '{name}' field '{field}' must map to a scalar specification"
                ))
            })?;
            fields.push((field, spec));
        }
    }

    if fields.is_empty() {
        return Err(ConfigError::Validation(format!(
            "channel '{name}' declares no fields"
        )));
    }

    Ok(ChannelConfig { name, fields })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
