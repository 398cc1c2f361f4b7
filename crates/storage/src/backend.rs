//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use readtrack_core::{
    BackfillReport, Category, CategoryRead, Post, PostRead, ReadCutoff, Thread, ThreadRead, UserId,
};

use crate::error::StorageError;
use crate::stats::ReadTrackerStats;
use crate::traits::{ForumStore, PostReadStore, ReadMigrationStore, StatsStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs and CLI output.
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── ForumStore ───────────────────────────────────────────────────

#[async_trait]
impl ForumStore for StorageBackend {
    async fn save_category(&self, category: &Category) -> Result<(), StorageError> {
        dispatch!(self, ForumStore, save_category(category))
    }

    async fn save_thread(&self, thread: &Thread) -> Result<(), StorageError> {
        dispatch!(self, ForumStore, save_thread(thread))
    }

    async fn save_post(&self, post: &Post) -> Result<(), StorageError> {
        dispatch!(self, ForumStore, save_post(post))
    }

    async fn save_category_read(&self, read: &CategoryRead) -> Result<i64, StorageError> {
        dispatch!(self, ForumStore, save_category_read(read))
    }

    async fn save_thread_read(&self, read: &ThreadRead) -> Result<i64, StorageError> {
        dispatch!(self, ForumStore, save_thread_read(read))
    }
}

// ── PostReadStore ────────────────────────────────────────────────

#[async_trait]
impl PostReadStore for StorageBackend {
    async fn get_post_reads_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PostRead>, StorageError> {
        dispatch!(self, PostReadStore, get_post_reads_for_user(user_id))
    }

    async fn count_post_reads(&self) -> Result<u64, StorageError> {
        dispatch!(self, PostReadStore, count_post_reads())
    }
}

// ── ReadMigrationStore ───────────────────────────────────────────

#[async_trait]
impl ReadMigrationStore for StorageBackend {
    async fn backfill_post_reads(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        dispatch!(self, ReadMigrationStore, backfill_post_reads(cutoff))
    }

    async fn backfill_post_reads_if_empty(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        dispatch!(self, ReadMigrationStore, backfill_post_reads_if_empty(cutoff))
    }

    async fn revert_post_reads(&self) -> Result<u64, StorageError> {
        dispatch!(self, ReadMigrationStore, revert_post_reads())
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for StorageBackend {
    async fn get_stats(&self) -> Result<ReadTrackerStats, StorageError> {
        dispatch!(self, StatsStore, get_stats())
    }
}
