use crate::error::ApiError;
use async_trait::async_trait;
use configuration::UpstreamConfig;
use core_types::Rate;

pub mod error;
pub mod responses;

/// Anything that can produce the current quote.
///
/// The server only sees this trait, so tests can swap the live client for a
/// stub that fails or stalls on demand. Implementations do not impose their
/// own deadline; the caller bounds each call.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rate(&self) -> Result<Rate, ApiError>;
}

/// Live client for the AwesomeAPI `json/last/<PAIR>` endpoint.
#[derive(Clone)]
pub struct AwesomeApiClient {
    client: reqwest::Client,
    url: String,
    pair_key: String,
}

impl AwesomeApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cotacao/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            pair_key: config.pair_key.clone(),
        })
    }
}

#[async_trait]
impl RateSource for AwesomeApiClient {
    async fn fetch_rate(&self) -> Result<Rate, ApiError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16(), text));
        }

        let rate = responses::extract_rate(&text, &self.pair_key)?;
        tracing::debug!(bid = %rate.bid, "Fetched quote from upstream.");
        Ok(rate)
    }
}
