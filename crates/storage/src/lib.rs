//! Storage layer for readtrack
//!
//! SQLite (default) and PostgreSQL backends for forum content, legacy
//! category/thread read markers and per-post read markers, plus the
//! transactional backfill between them.

mod backend;
pub mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
mod stats;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
pub use stats::ReadTrackerStats;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::{ForumStore, PostReadStore, ReadMigrationStore, StatsStore};
