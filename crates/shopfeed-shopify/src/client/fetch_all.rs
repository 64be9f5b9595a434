//! Multi-page catalog fetch for `CatalogClient`.

use std::time::Duration;

use shopfeed_core::{Product, Store};

use crate::error::ShopifyError;
use crate::normalize::normalize_product;
use crate::pagination::extract_next_cursor;

use super::{admin_origin, CatalogClient, MAX_PAGES, PAGE_LIMIT};

impl CatalogClient {
    /// Fetches every active product of `store`, following pagination to the end.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all_products`].
    pub async fn fetch_store_catalog(
        &self,
        store: &Store,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<Product>, ShopifyError> {
        self.fetch_all_products(
            &admin_origin(&store.shop_domain),
            &store.access_token,
            PAGE_LIMIT,
            inter_request_delay_ms,
        )
        .await
    }

    /// Fetches all products by following `rel="next"` cursors until none remain.
    ///
    /// `inter_request_delay_ms` is slept between consecutive page requests.
    /// Products that fail normalization are logged and skipped.
    ///
    /// All-or-nothing: a failure on any page discards the pages already
    /// fetched, since a partial catalog would publish a truncated feed.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`] and returns
    /// [`ShopifyError::PaginationLimit`] past [`MAX_PAGES`] pages.
    pub async fn fetch_all_products(
        &self,
        origin: &str,
        access_token: &str,
        limit: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<Product>, ShopifyError> {
        let mut products = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ShopifyError::PaginationLimit {
                    shop_url: origin.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            if page_count > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let (page, link_header) = self
                .fetch_products_page(origin, access_token, limit, cursor.as_deref())
                .await?;

            tracing::debug!(origin, page = page_count, count = page.products.len(), "fetched products page");

            for raw in page.products {
                match normalize_product(raw) {
                    Ok(product) => products.push(product),
                    Err(e) => {
                        tracing::warn!(origin, error = %e, "skipping product, normalization failed");
                    }
                }
            }

            cursor = extract_next_cursor(link_header.as_deref());
            if cursor.is_none() {
                break;
            }
        }

        Ok(products)
    }
}
