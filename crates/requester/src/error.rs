use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequesterError {
    #[error("Failed to build the HTTP client or send the request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The quote server did not answer within {0:?}")]
    Timeout(Duration),

    #[error("The quote server returned status {0}: {1}")]
    Status(u16, String),

    #[error("Failed to decode the quote server response: {0}")]
    Decode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
