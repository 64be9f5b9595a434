//! On-disk layout of generated feeds.
//!
//! ```text
//! feeds/<store>/<channel>_<language>_<currency>.xml
//! feeds/<store>/<channel>_<language>_<currency>.xml.gz
//! ```

use std::path::{Path, PathBuf};

use crate::Store;

/// Suffix of the compressed companion of every feed file.
pub const ARCHIVE_SUFFIX: &str = ".gz";

/// Directory holding every feed generated for `store`.
#[must_use]
pub fn store_feed_dir(feeds_root: &Path, store: &Store) -> PathBuf {
    feeds_root.join(&store.name)
}

/// Path of `store`'s uncompressed feed for `channel`.
#[must_use]
pub fn feed_path(feeds_root: &Path, store: &Store, channel: &str) -> PathBuf {
    store_feed_dir(feeds_root, store).join(store.feed_file_name(channel))
}

/// Appends [`ARCHIVE_SUFFIX`] to `path`, keeping its original extension.
#[must_use]
pub fn archive_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(ARCHIVE_SUFFIX);
    PathBuf::from(name)
}

/// Recursively lists every `*.xml.gz` file under `dir`, sorted by path.
///
/// # Errors
///
/// Returns the underlying I/O error if a directory cannot be read.
pub fn find_feed_archives(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_archives(dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_archives(dir: &Path, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_archives(&path, found)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".xml.gz"))
        {
            found.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store {
            name: "FR".to_string(),
            shop_domain: "fr.example.com".to_string(),
            access_token: "tok".to_string(),
            language: "fr".to_string(),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn feed_path_nests_under_store_dir() {
        let path = feed_path(Path::new("feeds"), &store(), "google");
        assert_eq!(path, Path::new("feeds/FR/google_fr_EUR.xml"));
    }

    #[test]
    fn archive_path_appends_suffix() {
        assert_eq!(
            archive_path(Path::new("feeds/FR/google_fr_EUR.xml")),
            Path::new("feeds/FR/google_fr_EUR.xml.gz")
        );
    }

    #[test]
    fn find_feed_archives_only_returns_compressed_feeds() {
        let root = tempfile::tempdir().unwrap();
        let fr = root.path().join("FR");
        let de = root.path().join("DE");
        std::fs::create_dir_all(&fr).unwrap();
        std::fs::create_dir_all(&de).unwrap();
        for path in [
            fr.join("google_fr_EUR.xml"),
            fr.join("google_fr_EUR.xml.gz"),
            fr.join("meta_fr_EUR.xml.gz"),
            de.join("google_de_EUR.xml.gz"),
            de.join("notes.txt.gz"),
        ] {
            std::fs::write(path, b"x").unwrap();
        }

        let found = find_feed_archives(root.path()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(root.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "DE/google_de_EUR.xml.gz",
                "FR/google_fr_EUR.xml.gz",
                "FR/meta_fr_EUR.xml.gz"
            ]
        );
    }

    #[test]
    fn find_feed_archives_fails_for_missing_dir() {
        assert!(find_feed_archives(Path::new("/nonexistent/shopfeed/feeds")).is_err());
    }
}
