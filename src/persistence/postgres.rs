//! PostgreSQL implementation of the search ledger.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

use super::SearchLedger;
use super::models::SearchRecord;
use crate::config::GatewayConfig;
use crate::error::GatewayError;

type SearchRow = (i64, String, f64, String, DateTime<Utc>);

/// PostgreSQL-backed search ledger using `sqlx::PgPool`.
///
/// Embedded migrations run on first use, so a ledger created while the
/// database is down picks up the schema once it becomes reachable.
#[derive(Debug)]
pub struct PostgresLedger {
    pool: PgPool,
    schema: OnceCell<()>,
}

impl PostgresLedger {
    /// Creates a ledger over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    /// Connects to the database named in `config`, retrying on failure.
    ///
    /// Makes up to `database_connect_retries` attempts spaced by
    /// `database_retry_delay_secs`. When every attempt fails the ledger is
    /// still returned, backed by a lazily-connecting pool: reads fail with
    /// [`GatewayError::StoreUnavailable`] until the database comes up.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] only if `database_url`
    /// cannot be parsed.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let options = || {
            PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .min_connections(config.database_min_connections)
                .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
        };

        let attempts = config.database_connect_retries.max(1);
        for attempt in 1..=attempts {
            match options().connect(&config.database_url).await {
                Ok(pool) => {
                    let ledger = Self::new(pool);
                    if let Err(e) = ledger.ensure_schema().await {
                        tracing::error!(error = %e, "failed to apply migrations; will retry on first use");
                    }
                    tracing::info!(attempt, "database connected");
                    return Ok(ledger);
                }
                Err(e) => {
                    tracing::warn!(attempt, attempts, error = %e, "database connection failed");
                    if attempt < attempts {
                        tokio::time::sleep(Duration::from_secs(config.database_retry_delay_secs))
                            .await;
                    }
                }
            }
        }

        tracing::error!(attempts, "database unreachable; starting with a disconnected ledger");
        let pool = options().connect_lazy(&config.database_url)?;
        Ok(Self::new(pool))
    }

    async fn ensure_schema(&self) -> Result<(), GatewayError> {
        self.schema
            .get_or_try_init(|| async {
                sqlx::migrate!("./migrations")
                    .run(&self.pool)
                    .await
                    .map_err(|e| GatewayError::StoreUnavailable(format!("migration failed: {e}")))
            })
            .await
            .map(|_| ())
    }
}

fn into_record((id, city, temperature, description, search_date): SearchRow) -> SearchRecord {
    SearchRecord {
        id,
        city,
        temperature,
        description,
        search_date,
    }
}

#[async_trait]
impl SearchLedger for PostgresLedger {
    async fn record(
        &self,
        city: &str,
        temperature: f64,
        description: &str,
    ) -> Result<SearchRecord, GatewayError> {
        self.ensure_schema().await?;

        let row = sqlx::query_as::<_, SearchRow>(
            "INSERT INTO weather_searches (city, temperature, description) VALUES ($1, $2, $3) \
             RETURNING id, city, temperature, description, search_date",
        )
        .bind(city)
        .bind(temperature)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;

        Ok(into_record(row))
    }

    async fn recent(&self, limit: u32) -> Result<Vec<SearchRecord>, GatewayError> {
        self.ensure_schema().await?;

        let rows = sqlx::query_as::<_, SearchRow>(
            "SELECT id, city, temperature, description, search_date FROM weather_searches \
             ORDER BY search_date DESC, id DESC LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, GatewayError> {
        self.ensure_schema().await?;

        let result = sqlx::query("DELETE FROM weather_searches WHERE search_date < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
