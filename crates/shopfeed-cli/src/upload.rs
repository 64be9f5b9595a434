//! Upload of generated feeds to each store's Files.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use shopfeed_core::layout::store_feed_dir;
use shopfeed_core::{AppConfig, Store};
use shopfeed_shopify::{admin_origin, FilesUploader, UploadSettings};

/// Store name → (local feed path → public URL).
pub(crate) type UploadResults = BTreeMap<String, BTreeMap<PathBuf, String>>;

pub(crate) fn upload_settings(config: &AppConfig) -> UploadSettings {
    UploadSettings {
        timeout_secs: config.request_timeout_secs,
        user_agent: config.user_agent.clone(),
        upload_delay: Duration::from_millis(config.upload_delay_ms),
        cdn_poll_delay: Duration::from_millis(config.cdn_poll_delay_ms),
    }
}

/// Uploads every store's compressed feeds. Stores with no feed directory are
/// skipped; failed files are logged by the uploader and left out.
pub(crate) async fn upload_all(config: &AppConfig, stores: &[Store]) -> anyhow::Result<UploadResults> {
    let settings = upload_settings(config);
    let mut results = UploadResults::new();

    for store in stores {
        let dir = store_feed_dir(&config.feeds_dir, store);
        if !dir.is_dir() {
            tracing::warn!(store = %store.name, path = %dir.display(), "no feeds to upload");
            continue;
        }

        println!("uploading feeds for {}", store.name);
        let uploader = FilesUploader::new(
            &admin_origin(&store.shop_domain),
            &store.access_token,
            settings.clone(),
        )
        .map_err(|e| anyhow::anyhow!("failed to build uploader for '{}': {e}", store.name))?;

        let uploaded = uploader.upload_feeds(&dir).await?;
        results.insert(store.name.clone(), uploaded);
    }

    Ok(results)
}

pub(crate) fn print_summary(results: &UploadResults) {
    println!("feed URLs:");
    for (store, files) in results {
        println!("{store}:");
        for (path, url) in files {
            let name = path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            println!("  {name}: {url}");
        }
    }
}
