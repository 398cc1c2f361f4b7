//! PostReadStore and StatsStore implementations for PgStorage.

use super::*;

use crate::stats::ReadTrackerStats;
use crate::traits::{PostReadStore, StatsStore};
use async_trait::async_trait;
use readtrack_core::UserId;

#[async_trait]
impl PostReadStore for PgStorage {
    async fn get_post_reads_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PostRead>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {POST_READ_COLUMNS} FROM post_reads WHERE user_id = $1 ORDER BY post_id, id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_post_read).collect()
    }

    async fn count_post_reads(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_reads")
            .fetch_one(&self.pool)
            .await?;
        count_to_u64(count, "post_reads")
    }
}

#[async_trait]
impl StatsStore for PgStorage {
    async fn get_stats(&self) -> Result<ReadTrackerStats, StorageError> {
        let row = sqlx::query(
            "SELECT
               (SELECT COUNT(*) FROM categories) AS categories,
               (SELECT COUNT(*) FROM threads) AS threads,
               (SELECT COUNT(*) FROM posts) AS posts,
               (SELECT COUNT(*) FROM category_reads) AS category_reads,
               (SELECT COUNT(*) FROM thread_reads) AS thread_reads,
               (SELECT COUNT(*) FROM post_reads) AS post_reads",
        )
        .fetch_one(&self.pool)
        .await?;
        let count = |column: &'static str| -> Result<u64, StorageError> {
            count_to_u64(row.try_get::<i64, _>(column)?, column)
        };
        Ok(ReadTrackerStats {
            categories: count("categories")?,
            threads: count("threads")?,
            posts: count("posts")?,
            category_reads: count("category_reads")?,
            thread_reads: count("thread_reads")?,
            post_reads: count("post_reads")?,
        })
    }
}
