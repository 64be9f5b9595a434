use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("feed is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("malformed feed: {0}")]
    Malformed(String),

    #[error("channel '{channel}' has an invalid output field name '{field}'")]
    InvalidFieldName { channel: String, field: String },
}

impl FeedError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
