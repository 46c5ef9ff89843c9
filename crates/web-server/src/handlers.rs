use crate::{error::AppError, pipeline::quote_and_store, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use core_types::Rate;
use database::StoredRate;
use serde::Deserialize;
use std::sync::Arc;

const MAX_HISTORY: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    limit: i64,
}
fn default_limit() -> i64 {
    20
}

/// # GET /cotacao
/// Fetches the current USD-BRL quote, records it, and echoes it back.
pub async fn get_cotacao(State(state): State<Arc<AppState>>) -> Result<Json<Rate>, AppError> {
    let rate = quote_and_store(state.source.as_ref(), &state.db_repo, state.timeouts).await?;
    Ok(Json(rate))
}

/// # GET /cotacoes
/// Lists the most recently stored quotes, newest first.
pub async fn get_recent_rates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<StoredRate>>, AppError> {
    let limit = query.limit.clamp(1, MAX_HISTORY);
    let rates = state
        .db_repo
        .recent_rates(limit)
        .await
        .map_err(AppError::History)?;
    Ok(Json(rates))
}
