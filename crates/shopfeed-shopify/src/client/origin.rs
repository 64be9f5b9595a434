//! Origin helpers for turning configured shop domains into API base URLs.

/// Returns the `scheme://host[:port]` origin the Admin API lives under.
///
/// A bare domain such as `"fr.example.com"` is assumed to be HTTPS; a value
/// that already carries a scheme (useful for local mock servers) keeps it
/// and loses any path.
#[must_use]
pub fn admin_origin(shop_domain: &str) -> String {
    let trimmed = shop_domain.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        reqwest::Url::parse(trimmed).map_or_else(
            |_| trimmed.to_owned(),
            |u| u.origin().ascii_serialization(),
        )
    } else {
        format!("https://{trimmed}")
    }
}

/// Extracts the hostname from an origin for use in error messages.
///
/// Falls back to the input if it does not parse as a URL.
pub(crate) fn extract_domain(origin: &str) -> String {
    reqwest::Url::parse(origin)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| origin.to_owned())
}
