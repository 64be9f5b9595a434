//! HTTP client for the Admin API product listing.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ShopifyError;
use crate::rate_limit::retry_with_backoff;
use crate::types::ShopifyProductsResponse;

pub use origin::admin_origin;
pub(crate) use origin::extract_domain;

/// Admin API version every request is pinned to.
pub const API_VERSION: &str = "2025-10";

/// Products requested per page (the API maximum).
pub const PAGE_LIMIT: u32 = 250;

/// Header carrying the per-store Admin API access token.
pub(crate) const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Maximum number of pages to fetch before returning an error.
/// Guards against cursors that cycle.
pub(super) const MAX_PAGES: usize = 200;

/// HTTP client for `GET /admin/api/{version}/products.json`.
///
/// Maps 429, 404 and other non-2xx responses to typed errors and hands the
/// raw `Link` header back so callers can follow pagination cursors.
pub struct CatalogClient {
    pub(super) client: Client,
    /// Additional attempts after the first failure of a retriable request.
    pub(super) max_retries: u32,
    /// Base delay in seconds for exponential backoff.
    pub(super) backoff_base_secs: u64,
}

impl CatalogClient {
    /// Creates a client with the configured timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of active products.
    ///
    /// Returns the raw product objects and the `Link` header, if any.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::RateLimited`] for HTTP 429 after retries are exhausted.
    /// - [`ShopifyError::NotFound`] for HTTP 404.
    /// - [`ShopifyError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ShopifyError::Http`] for network or TLS failures.
    /// - [`ShopifyError::Deserialize`] if the body is not a product listing.
    pub async fn fetch_products_page(
        &self,
        origin: &str,
        access_token: &str,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<(ShopifyProductsResponse, Option<String>), ShopifyError> {
        let url = Self::products_url(origin, limit, page_info)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(ACCESS_TOKEN_HEADER, access_token)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ShopifyError::RateLimited {
                        domain: extract_domain(origin),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ShopifyError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ShopifyError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                // The Link header has to be read before the body consumes the response.
                let link_header = response
                    .headers()
                    .get(reqwest::header::LINK)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);

                let body = response.text().await?;
                let parsed =
                    serde_json::from_str::<ShopifyProductsResponse>(&body).map_err(|e| {
                        ShopifyError::Deserialize {
                            context: format!("products page from {origin}"),
                            source: e,
                        }
                    })?;

                Ok((parsed, link_header))
            }
        })
        .await
    }

    /// Builds the product listing URL.
    ///
    /// The first page filters on `status=active`; cursor pages carry only
    /// `limit` and `page_info` because the API rejects filters next to a cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidShopUrl`] if `origin` is not a valid URL base.
    fn products_url(
        origin: &str,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<String, ShopifyError> {
        let base = format!(
            "{}/admin/api/{API_VERSION}/products.json",
            origin.trim_end_matches('/')
        );
        let mut url = reqwest::Url::parse(&base).map_err(|e| ShopifyError::InvalidShopUrl {
            shop_url: origin.to_owned(),
            reason: e.to_string(),
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            match page_info {
                Some(cursor) => query.append_pair("page_info", cursor),
                None => query.append_pair("status", "active"),
            };
        }

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
