use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::Config;
use crate::errors::DbError;

pub mod properties;
pub mod reservations;
pub mod users;

pub(crate) const DEFAULT_RESULT_LIMIT: i64 = 10;

/// Resolve an optional caller-supplied limit, rejecting non-positive values
/// before any SQL is built.
pub(crate) fn effective_limit(limit: Option<i64>) -> Result<i64, DbError> {
    let limit = limit.unwrap_or(DEFAULT_RESULT_LIMIT);
    if limit <= 0 {
        return Err(DbError::validation("limit", "must be positive"));
    }
    Ok(limit)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabasePoolHealth {
    pub size: u32,
    pub num_idle: usize,
    pub is_closed: bool,
}

/// Handle to the shared connection pool. Every operation issues exactly one
/// statement; connection management, transactions and retries belong to the
/// pool and its callers, not to this layer.
#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool_config(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(60))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(900))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::new_with_pool_config(
            &config.database_url,
            config.max_connections,
            config.min_connections,
        )
        .await
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get connection pool health information
    pub fn get_pool_health(&self) -> DatabasePoolHealth {
        DatabasePoolHealth {
            size: self.pool.size(),
            num_idle: self.pool.num_idle(),
            is_closed: self.pool.is_closed(),
        }
    }

    /// Check if the pool is healthy and has available connections
    pub async fn check_pool_health(&self) -> bool {
        match tokio::time::timeout(Duration::from_secs(5), self.pool.acquire()).await {
            Ok(Ok(_conn)) => true,
            Ok(Err(e)) => {
                tracing::warn!("Database pool health check failed: {}", e);
                false
            }
            Err(_) => {
                tracing::warn!("Database pool health check timed out");
                false
            }
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
