//! Catalog fetch and feed generation, one store and one channel at a time.
//!
//! A catalog fetch failure aborts the run. A feed that cannot be written is
//! logged and the next channel is still generated.

use anyhow::Context;
use shopfeed_core::layout::feed_path;
use shopfeed_core::{AppConfig, ChannelConfig, Product, Store};
use shopfeed_feed::{build_feed, write_feed, ChannelMapping};
use shopfeed_shopify::CatalogClient;

/// Parses every channel's field specifications up front.
pub(crate) fn compile_mappings(channels: &[ChannelConfig]) -> anyhow::Result<Vec<ChannelMapping>> {
    channels
        .iter()
        .map(|c| ChannelMapping::compile(c).map_err(anyhow::Error::from))
        .collect()
}

pub(crate) fn build_catalog_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}

/// Fetches each store's catalog and writes one feed per channel under
/// `config.feeds_dir`. Returns the number of feeds written.
pub(crate) async fn generate_feeds(
    config: &AppConfig,
    stores: &[Store],
    mappings: &[ChannelMapping],
) -> anyhow::Result<usize> {
    let client = build_catalog_client(config)?;
    let mut written = 0usize;

    for store in stores {
        println!("fetching products for {}", store.name);
        let products = client
            .fetch_store_catalog(store, config.inter_request_delay_ms)
            .await
            .with_context(|| format!("failed to fetch catalog for store '{}'", store.name))?;
        let variants: usize = products.iter().map(Product::variant_count).sum();
        println!("found {} products ({variants} variants)", products.len());

        for mapping in mappings {
            let doc = build_feed(&products, store, mapping);
            let path = feed_path(&config.feeds_dir, store, &mapping.channel);

            match write_feed(&doc, &path) {
                Ok(report) => {
                    written += 1;
                    tracing::info!(
                        store = %store.name,
                        channel = %mapping.channel,
                        items = report.items,
                        ratio = report.ratio(),
                        "feed written"
                    );
                    println!(
                        "  saved {} ({} variants, compressed to {:.0}%)",
                        report.xml_path.display(),
                        report.items,
                        report.ratio() * 100.0
                    );
                }
                Err(e) => {
                    tracing::error!(
                        store = %store.name,
                        channel = %mapping.channel,
                        error = %e,
                        "failed to write feed"
                    );
                }
            }
        }
    }

    Ok(written)
}
