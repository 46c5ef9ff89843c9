use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the quote API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The quote API returned status {0}: {1}")]
    Status(u16, String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("The API response has no `{0}` quote")]
    MissingQuote(String),
}
