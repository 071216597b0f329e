/// Error types shared by the support page crates.
///
/// These cover failures while loading the FAQ source document. Application-specific
/// errors are defined in each service crate and wrap `CommonError` via `#[from]`.
use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("document request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document source: {0}")]
    InvalidSource(String),
}
