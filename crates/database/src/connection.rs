use crate::error::DbError;
use configuration::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Establishes a connection pool to the SQLite database at `config.url`.
///
/// The database file is created on first use. The pool is opened once at
/// startup and shared by every request; SQLite itself serializes writers.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("{}: {}", config.url, e)))?
        .create_if_missing(true);

    // Per-request deadlines in the server cut waits far shorter than this;
    // it only bounds callers that run without one (startup, migrations).
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::debug!(url = %config.url, "Connected to database.");
    Ok(pool)
}

/// Applies any pending migrations from `./migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
