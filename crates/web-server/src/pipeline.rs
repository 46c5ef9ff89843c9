use crate::error::AppError;
use api_client::RateSource;
use configuration::ServerConfig;
use core_types::Rate;
use database::DbRepository;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

/// Per-request time budgets.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Measured from the start of the request.
    pub fetch: Duration,
    /// Measured from the start of the insert, capped by the fetch deadline.
    pub persist: Duration,
}

impl From<&ServerConfig> for Timeouts {
    fn from(config: &ServerConfig) -> Self {
        Self {
            fetch: config.fetch_timeout(),
            persist: config.persist_timeout(),
        }
    }
}

/// The insert gets its own budget but may never outlive the request deadline.
pub fn persist_deadline(fetch_deadline: Instant, now: Instant, persist: Duration) -> Instant {
    fetch_deadline.min(now + persist)
}

/// Fetches the current quote, records it, and returns it.
///
/// Stages run strictly in order and the first failure ends the request. A row
/// whose insert outlives its deadline may still land; the write is not
/// transactional with the response. Dropping the returned future (client gone,
/// server shutting down) cancels whichever stage is in flight.
pub async fn quote_and_store(
    source: &dyn RateSource,
    repo: &DbRepository,
    timeouts: Timeouts,
) -> Result<Rate, AppError> {
    let fetch_deadline = Instant::now() + timeouts.fetch;

    let rate = timeout_at(fetch_deadline, source.fetch_rate())
        .await
        .map_err(|_| AppError::UpstreamTimeout(timeouts.fetch))??;

    let now = Instant::now();
    let deadline = persist_deadline(fetch_deadline, now, timeouts.persist);

    let id = timeout_at(deadline, repo.save_rate(&rate))
        .await
        .map_err(|_| AppError::StorageTimeout(deadline.saturating_duration_since(now)))??;

    tracing::info!(id, rate = %rate, "Quote stored.");
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_deadline_uses_its_own_budget_when_there_is_room() {
        let start = Instant::now();
        let fetch_deadline = start + Duration::from_millis(200);
        let now = start + Duration::from_millis(50);

        let deadline = persist_deadline(fetch_deadline, now, Duration::from_millis(10));

        assert_eq!(deadline, now + Duration::from_millis(10));
    }

    #[test]
    fn persist_deadline_is_capped_by_fetch_deadline() {
        let start = Instant::now();
        let fetch_deadline = start + Duration::from_millis(200);
        let now = start + Duration::from_millis(195);

        let deadline = persist_deadline(fetch_deadline, now, Duration::from_millis(10));

        assert_eq!(deadline, fetch_deadline);
    }

    #[test]
    fn timeouts_come_from_server_config() {
        let config = ServerConfig {
            fetch_timeout_ms: 300,
            persist_timeout_ms: 20,
            ..ServerConfig::default()
        };
        let timeouts = Timeouts::from(&config);

        assert_eq!(timeouts.fetch, Duration::from_millis(300));
        assert_eq!(timeouts.persist, Duration::from_millis(20));
    }
}
