use serde::Serialize;
use thiserror::Error;

/// Failures while fetching a scene catalog.
///
/// The store treats every variant the same way (fall back to the built-in
/// catalog); the distinction only matters for diagnostics.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse scene catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene catalog: {0}")]
    Invalid(String),

    #[error("Invalid source configuration: {0}")]
    Config(String),
}

// Serialize as the display string for JSON output
impl Serialize for SourceError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
