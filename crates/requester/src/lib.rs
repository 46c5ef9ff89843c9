//! One-shot client for the quote server: ask for the current quote, keep the
//! bid, write it to a file. Every failure ends the run and nothing is written.

use crate::error::RequesterError;
use configuration::ClientConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod error;

/// The only part of the server's response the requester relies on.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    bid: String,
}

/// Renders the file contents for a given bid.
pub fn format_quote(bid: &str) -> String {
    format!("Dólar: {}", bid)
}

pub struct Requester {
    client: reqwest::Client,
    server_url: String,
    timeout: Duration,
    output_path: PathBuf,
}

impl Requester {
    pub fn new(config: &ClientConfig) -> Result<Self, RequesterError> {
        // The deadline covers the whole exchange, connect through body.
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            server_url: config.server_url.clone(),
            timeout: config.timeout(),
            output_path: config.output_path.clone(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Requests the current quote and returns its bid.
    pub async fn fetch_bid(&self) -> Result<String, RequesterError> {
        let response = self
            .client
            .get(&self.server_url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(RequesterError::Status(status.as_u16(), text));
        }

        let quote: QuoteResponse =
            serde_json::from_str(&text).map_err(|e| RequesterError::Decode(e.to_string()))?;
        Ok(quote.bid)
    }

    /// Fetches the bid and writes `Dólar: <bid>` to the output path.
    ///
    /// Returns the written contents.
    pub async fn run(&self) -> Result<String, RequesterError> {
        let bid = self.fetch_bid().await?;
        let contents = format_quote(&bid);

        tokio::fs::write(&self.output_path, &contents)
            .await
            .map_err(|source| RequesterError::Write {
                path: self.output_path.clone(),
                source,
            })?;

        tracing::info!(path = %self.output_path.display(), %contents, "Quote written.");
        Ok(contents)
    }

    fn classify(&self, err: reqwest::Error) -> RequesterError {
        if err.is_timeout() {
            RequesterError::Timeout(self.timeout)
        } else {
            RequesterError::Request(err)
        }
    }
}
