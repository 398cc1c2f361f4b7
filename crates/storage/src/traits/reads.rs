use async_trait::async_trait;
use readtrack_core::{BackfillReport, PostRead, ReadCutoff, UserId};

use crate::error::StorageError;
use crate::stats::ReadTrackerStats;

/// Queries over stored per-post read markers.
#[async_trait]
pub trait PostReadStore: Send + Sync {
    /// All markers of a user, ordered by post then marker id.
    async fn get_post_reads_for_user(&self, user_id: UserId)
    -> Result<Vec<PostRead>, StorageError>;

    /// Number of markers in storage.
    async fn count_post_reads(&self) -> Result<u64, StorageError>;
}

/// The post-read backfill and its reversal.
#[async_trait]
pub trait ReadMigrationStore: Send + Sync {
    /// Expand every category and thread read into per-post markers.
    ///
    /// Runs in one transaction: any error rolls back every marker written
    /// so far. Not idempotent; a second run without [`revert_post_reads`]
    /// writes the markers again.
    ///
    /// [`revert_post_reads`]: ReadMigrationStore::revert_post_reads
    async fn backfill_post_reads(&self, cutoff: ReadCutoff)
    -> Result<BackfillReport, StorageError>;

    /// [`backfill_post_reads`] that first checks, in the same transaction,
    /// that no post read exists yet.
    ///
    /// Fails with [`StorageError::PostReadsExist`] otherwise, writing nothing.
    ///
    /// [`backfill_post_reads`]: ReadMigrationStore::backfill_post_reads
    async fn backfill_post_reads_if_empty(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError>;

    /// Delete **every** per-post marker, not only those written by a backfill.
    ///
    /// Returns the number of rows deleted.
    async fn revert_post_reads(&self) -> Result<u64, StorageError>;
}

/// Row counts across the read-tracker tables.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn get_stats(&self) -> Result<ReadTrackerStats, StorageError>;
}
