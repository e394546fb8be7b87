//! Error types for configuration sources.

/// Errors that can occur when loading configuration documents.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to parse a JSON document.
    #[error("json parse error: {0}")]
    Json(String),

    /// Failed to parse a YAML document.
    #[error("yaml parse error: {0}")]
    Yaml(String),

    /// An I/O error occurred while reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
