//! Shared constants for readtrack.

/// Retention window for read tracking, in days, when nothing is configured.
pub const DEFAULT_READTRACKER_CUTOFF_DAYS: u32 = 40;

/// Environment variable overriding [`DEFAULT_READTRACKER_CUTOFF_DAYS`].
pub const READTRACKER_CUTOFF_ENV: &str = "READTRACKER_CUTOFF_DAYS";

/// Rows fetched per page while streaming legacy reads and posts.
pub const BACKFILL_BATCH_SIZE: usize = 500;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 5;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
