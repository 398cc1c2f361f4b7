//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod backfill;
mod forum;
mod reads;

use chrono::{DateTime, Utc};
use readtrack_core::{
    CategoryId, PostRead, ThreadId, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

/// Convert a non-negative row count to `u64`, treating negatives as corruption.
pub(crate) fn count_to_u64(count: i64, table: &str) -> Result<u64, StorageError> {
    u64::try_from(count).map_err(|e| StorageError::DataCorruption {
        context: format!("negative row count for {table}"),
        source: Box::new(e),
    })
}

pub(crate) fn row_to_post_read(row: &sqlx::postgres::PgRow) -> Result<PostRead, StorageError> {
    let last_read_on: DateTime<Utc> = row.try_get("last_read_on")?;
    Ok(PostRead {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        category_id: row.try_get::<CategoryId, _>("category_id")?,
        thread_id: row.try_get::<ThreadId, _>("thread_id")?,
        post_id: row.try_get("post_id")?,
        last_read_on,
    })
}

pub(crate) const POST_READ_COLUMNS: &str =
    "id, user_id, category_id, thread_id, post_id, last_read_on";
