use std::path::Path;

use shopfeed_core::layout::find_feed_archives;

use crate::error::FeedError;

/// Copies every `*.xml.gz` under `feeds_root` into the flat `public_dir`,
/// prefixing each file name with its store directory:
/// `feeds/FR/google_fr_EUR.xml.gz` becomes `docs/FR_google_fr_EUR.xml.gz`.
///
/// Returns the copied file names, sorted. A missing `feeds_root` copies
/// nothing.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if `public_dir` cannot be created, a feed
/// directory cannot be listed, or a copy fails.
pub fn copy_to_public(feeds_root: &Path, public_dir: &Path) -> Result<Vec<String>, FeedError> {
    std::fs::create_dir_all(public_dir).map_err(|e| FeedError::io(public_dir, e))?;
    if !feeds_root.is_dir() {
        tracing::warn!(path = %feeds_root.display(), "feeds directory missing, nothing to publish");
        return Ok(Vec::new());
    }

    let archives = find_feed_archives(feeds_root).map_err(|e| FeedError::io(feeds_root, e))?;
    let mut copied = Vec::with_capacity(archives.len());

    for source in archives {
        let store = source
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!("{store}_{file}");

        std::fs::copy(&source, public_dir.join(&name)).map_err(|e| FeedError::io(&source, e))?;
        tracing::debug!(from = %source.display(), to = %name, "published feed");
        copied.push(name);
    }

    copied.sort();
    Ok(copied)
}
