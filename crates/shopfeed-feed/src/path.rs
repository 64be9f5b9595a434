//! Dotted/bracketed path lookup into a product or variant JSON document.
//!
//! `images[0].src` walks `images`, then index `0`, then key `src`. Tokens
//! made only of digits are always indices, so an object key spelled with
//! digits alone cannot be addressed.

use serde_json::Value;

/// Resolves `path` against `root`.
///
/// Returns `None` for a missing key, an out-of-range index, a step into a
/// scalar, or a final `null`.
#[must_use]
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for token in path.split(['.', '[', ']']).filter(|t| !t.is_empty()) {
        current = if token.bytes().all(|b| b.is_ascii_digit()) {
            let index: usize = token.parse().ok()?;
            current.as_array()?.get(index)?
        } else {
            current.as_object()?.get(token)?
        };
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Text form of a resolved value as it appears in a feed.
///
/// Strings are unquoted; `0` and `false` are kept; arrays and objects are
/// written as compact JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// [`resolve`] followed by [`value_to_string`]; absence becomes `""`.
#[must_use]
pub fn resolve_to_string(root: &Value, path: &str) -> String {
    resolve(root, path).map(value_to_string).unwrap_or_default()
}
