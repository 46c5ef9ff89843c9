use crate::DbError;
use chrono::{DateTime, Utc};
use core_types::Rate;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

/// Represents a row from the `rates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredRate {
    pub id: i64,
    pub code: Option<String>,
    pub bid: String,
    pub created_at: DateTime<Utc>,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends one quote and returns its row id.
    pub async fn save_rate(&self, rate: &Rate) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO rates (code, bid, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(rate.code.as_deref())
        .bind(&rate.bid)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetches the `limit` most recent quotes, newest first.
    pub async fn recent_rates(&self, limit: i64) -> Result<Vec<StoredRate>, DbError> {
        let rows = sqlx::query_as::<_, StoredRate>(
            r#"
            SELECT id, code, bid, created_at
            FROM rates
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count_rates(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rates")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect, run_migrations};
    use configuration::DatabaseConfig;

    async fn memory_repo() -> DbRepository {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = connect(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        DbRepository::new(pool)
    }

    #[tokio::test]
    async fn save_rate_appends_rows_in_order() {
        let repo = memory_repo().await;

        let first = repo.save_rate(&Rate::new(Some("USD".into()), "5.40")).await.unwrap();
        let second = repo.save_rate(&Rate::new(None, "5.41")).await.unwrap();

        assert!(second > first);
        assert_eq!(repo.count_rates().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn recent_rates_returns_newest_first() {
        let repo = memory_repo().await;
        for bid in ["5.40", "5.41", "5.42"] {
            repo.save_rate(&Rate::new(Some("USD".into()), bid)).await.unwrap();
        }

        let rows = repo.recent_rates(2).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bid, "5.42");
        assert_eq!(rows[1].bid, "5.41");
        assert_eq!(rows[0].code.as_deref(), Some("USD"));
    }

    #[tokio::test]
    async fn missing_code_is_stored_as_null() {
        let repo = memory_repo().await;
        repo.save_rate(&Rate::new(None, "5.43")).await.unwrap();

        let rows = repo.recent_rates(10).await.unwrap();
        assert_eq!(rows[0].code, None);
    }

    #[tokio::test]
    async fn save_fails_without_schema() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let repo = DbRepository::new(connect(&config).await.unwrap());

        let err = repo.save_rate(&Rate::new(None, "5.43")).await.unwrap_err();
        assert!(matches!(err, DbError::Query(_)));
    }
}
