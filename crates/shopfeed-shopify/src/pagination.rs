//! Cursor pagination over the Admin API `Link` response header.
//!
//! Each page response carries the URLs of its neighbours, e.g.
//!
//! ```text
//! <https://shop.myshopify.com/admin/api/2025-10/products.json?limit=250&page_info=PREV>; rel="previous",
//! <https://shop.myshopify.com/admin/api/2025-10/products.json?limit=250&page_info=NEXT>; rel="next"
//! ```
//!
//! Only the `rel="next"` target matters; its `page_info` query value is the
//! cursor for the following request.

/// Returns the URL of the `rel="next"` link, if the header has one.
#[must_use]
pub fn extract_next_url(link_header: Option<&str>) -> Option<&str> {
    link_header?
        .split(',')
        .map(str::trim)
        .find(|directive| directive.contains(r#"rel="next""#))
        .and_then(bracketed_url)
}

/// Returns the `page_info` cursor of the `rel="next"` link.
///
/// `None` means the current page is the last one (no header, no next link,
/// or a next link without a cursor).
#[must_use]
pub fn extract_next_cursor(link_header: Option<&str>) -> Option<String> {
    let url = extract_next_url(link_header)?;
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page_info="))
        .map(|value| value.split('#').next().unwrap_or(value))
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn bracketed_url(directive: &str) -> Option<&str> {
    let start = directive.find('<')? + 1;
    let end = directive.find('>')?;
    (start < end).then(|| &directive[start..end])
}
