//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use readtrack_core::{
    BackfillReport, Category, CategoryRead, Post, PostRead, ReadCutoff, Thread, ThreadRead, UserId,
};

use crate::error::StorageError;
use crate::stats::ReadTrackerStats;
use crate::traits::{ForumStore, PostReadStore, ReadMigrationStore, StatsStore};
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── ForumStore ───────────────────────────────────────────────────

#[async_trait]
impl ForumStore for Storage {
    async fn save_category(&self, category: &Category) -> Result<(), StorageError> {
        delegate!(self, save_category, @ref category)
    }
    async fn save_thread(&self, thread: &Thread) -> Result<(), StorageError> {
        delegate!(self, save_thread, @ref thread)
    }
    async fn save_post(&self, post: &Post) -> Result<(), StorageError> {
        delegate!(self, save_post, @ref post)
    }
    async fn save_category_read(&self, read: &CategoryRead) -> Result<i64, StorageError> {
        delegate!(self, save_category_read, @ref read)
    }
    async fn save_thread_read(&self, read: &ThreadRead) -> Result<i64, StorageError> {
        delegate!(self, save_thread_read, @ref read)
    }
}

// ── PostReadStore ────────────────────────────────────────────────

#[async_trait]
impl PostReadStore for Storage {
    async fn get_post_reads_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PostRead>, StorageError> {
        delegate!(self, get_post_reads_for_user, @val user_id)
    }
    async fn count_post_reads(&self) -> Result<u64, StorageError> {
        delegate!(self, count_post_reads)
    }
}

// ── ReadMigrationStore ───────────────────────────────────────────

#[async_trait]
impl ReadMigrationStore for Storage {
    async fn backfill_post_reads(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        delegate!(self, backfill_post_reads, @val cutoff)
    }
    async fn backfill_post_reads_if_empty(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        delegate!(self, backfill_post_reads_if_empty, @val cutoff)
    }
    async fn revert_post_reads(&self) -> Result<u64, StorageError> {
        delegate!(self, revert_post_reads)
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for Storage {
    async fn get_stats(&self) -> Result<ReadTrackerStats, StorageError> {
        delegate!(self, get_stats)
    }
}
