use api_client::error::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DbError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] ApiError),
    #[error("Upstream did not answer within {0:?}")]
    UpstreamTimeout(Duration),
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
    #[error("Storage write did not finish within {0:?}")]
    StorageTimeout(Duration),
    #[error("Failed to read stored quotes: {0}")]
    History(DbError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Callers only ever see a generic plain-text 500; the detail goes to the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Upstream(_) | AppError::UpstreamTimeout(_) => {
                tracing::error!(error = %self, "Error getting dollar rate.");
                "Error getting dollar rate"
            }
            AppError::Storage(_) | AppError::StorageTimeout(_) => {
                tracing::error!(error = %self, "Error saving to database.");
                "Error saving to database"
            }
            AppError::History(_) => {
                tracing::error!(error = %self, "Error reading from database.");
                "Error reading from database"
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}
