//! ReadMigrationStore implementation for PgStorage.
//!
//! Same paging scheme as the SQLite backend: ascending-id keyset pages of
//! `BACKFILL_BATCH_SIZE` rows, all on the connection of a single
//! transaction. An early return drops the transaction and sqlx rolls it back.

use super::*;

use crate::traits::ReadMigrationStore;
use async_trait::async_trait;
use readtrack_core::{
    BackfillReport, CategoryRead, NewPostRead, Post, ReadBackfill, ReadCutoff, ThreadRead,
    BACKFILL_BATCH_SIZE,
};
use sqlx::{PgConnection, Postgres, QueryBuilder};

async fn category_reads_after(
    conn: &mut PgConnection,
    after: i64,
) -> Result<Vec<CategoryRead>, StorageError> {
    let rows = sqlx::query(
        "SELECT id, user_id, category_id, last_read_on FROM category_reads
          WHERE id > $1 ORDER BY id LIMIT $2",
    )
    .bind(after)
    .bind(usize_to_i64(BACKFILL_BATCH_SIZE))
    .fetch_all(conn)
    .await?;
    rows.iter()
        .map(|row| -> Result<CategoryRead, StorageError> {
            Ok(CategoryRead {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                category_id: row.try_get("category_id")?,
                last_read_on: row.try_get("last_read_on")?,
            })
        })
        .collect()
}

async fn thread_reads_after(
    conn: &mut PgConnection,
    after: i64,
) -> Result<Vec<ThreadRead>, StorageError> {
    let rows = sqlx::query(
        "SELECT id, user_id, category_id, thread_id, last_read_on FROM thread_reads
          WHERE id > $1 ORDER BY id LIMIT $2",
    )
    .bind(after)
    .bind(usize_to_i64(BACKFILL_BATCH_SIZE))
    .fetch_all(conn)
    .await?;
    rows.iter()
        .map(|row| -> Result<ThreadRead, StorageError> {
            Ok(ThreadRead {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                category_id: row.try_get("category_id")?,
                thread_id: row.try_get("thread_id")?,
                last_read_on: row.try_get("last_read_on")?,
            })
        })
        .collect()
}

/// One page of in-window posts, filtered on `column` (`category_id` or `thread_id`).
async fn posts_after(
    conn: &mut PgConnection,
    column: &'static str,
    key: i64,
    cutoff: DateTime<Utc>,
    after: i64,
) -> Result<Vec<Post>, StorageError> {
    let rows = sqlx::query(&format!(
        "SELECT id, category_id, thread_id, posted_on FROM posts
          WHERE {column} = $1 AND posted_on >= $2 AND id > $3 ORDER BY id LIMIT $4"
    ))
    .bind(key)
    .bind(cutoff)
    .bind(after)
    .bind(usize_to_i64(BACKFILL_BATCH_SIZE))
    .fetch_all(conn)
    .await?;
    rows.iter()
        .map(|row| -> Result<Post, StorageError> {
            Ok(Post::new(
                row.try_get("id")?,
                row.try_get("category_id")?,
                row.try_get("thread_id")?,
                row.try_get("posted_on")?,
            ))
        })
        .collect()
}

/// Posts under `column = key` older than the cutoff, which `posts_after` never returns.
async fn stale_post_count(
    conn: &mut PgConnection,
    column: &'static str,
    key: i64,
    cutoff: DateTime<Utc>,
) -> Result<u64, StorageError> {
    let sql = format!("SELECT COUNT(*) FROM posts WHERE {column} = $1 AND posted_on < $2");
    let count: i64 = sqlx::query_scalar(&sql).bind(key).bind(cutoff).fetch_one(conn).await?;
    count_to_u64(count, "posts")
}

async fn insert_post_reads(
    conn: &mut PgConnection,
    markers: &[NewPostRead],
) -> Result<(), StorageError> {
    if markers.is_empty() {
        return Ok(());
    }
    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "INSERT INTO post_reads (user_id, category_id, thread_id, post_id, last_read_on) ",
    );
    builder.push_values(markers, |mut row, marker| {
        row.push_bind(marker.user_id)
            .push_bind(marker.category_id)
            .push_bind(marker.thread_id)
            .push_bind(marker.post_id)
            .push_bind(marker.last_read_on);
    });
    builder.build().execute(conn).await?;
    Ok(())
}

async fn run_backfill(
    conn: &mut PgConnection,
    cutoff: ReadCutoff,
) -> Result<BackfillReport, StorageError> {
    let mut backfill = ReadBackfill::new(cutoff);

    let mut after = i64::MIN;
    loop {
        let reads = category_reads_after(conn, after).await?;
        let Some(last) = reads.last() else { break };
        after = last.id;
        for read in &reads {
            backfill.begin_category_read(read);
            let key = read.category_id.get();
            backfill.skip_stale(stale_post_count(conn, "category_id", key, cutoff.at()).await?);
            let mut post_after = i64::MIN;
            loop {
                let posts = posts_after(conn, "category_id", key, cutoff.at(), post_after).await?;
                let Some(last_post) = posts.last() else { break };
                post_after = last_post.id.get();
                let markers = backfill.category_markers(read, &posts);
                insert_post_reads(conn, &markers).await?;
                if posts.len() < BACKFILL_BATCH_SIZE {
                    break;
                }
            }
        }
        if reads.len() < BACKFILL_BATCH_SIZE {
            break;
        }
    }
    tracing::debug!(reads = backfill.report().category_reads, "category pass complete");

    let mut after = i64::MIN;
    loop {
        let reads = thread_reads_after(conn, after).await?;
        let Some(last) = reads.last() else { break };
        after = last.id;
        for read in &reads {
            backfill.begin_thread_read(read);
            let key = read.thread_id.get();
            backfill.skip_stale(stale_post_count(conn, "thread_id", key, cutoff.at()).await?);
            let mut post_after = i64::MIN;
            loop {
                let posts = posts_after(conn, "thread_id", key, cutoff.at(), post_after).await?;
                let Some(last_post) = posts.last() else { break };
                post_after = last_post.id.get();
                let markers = backfill.thread_markers(read, &posts);
                insert_post_reads(conn, &markers).await?;
                if posts.len() < BACKFILL_BATCH_SIZE {
                    break;
                }
            }
        }
        if reads.len() < BACKFILL_BATCH_SIZE {
            break;
        }
    }
    tracing::debug!(reads = backfill.report().thread_reads, "thread pass complete");

    Ok(backfill.finish())
}

/// Lock out concurrent marker writers, refuse if any marker exists, then backfill.
async fn run_backfill_if_empty(
    conn: &mut PgConnection,
    cutoff: ReadCutoff,
) -> Result<BackfillReport, StorageError> {
    sqlx::query("LOCK TABLE post_reads IN SHARE ROW EXCLUSIVE MODE").execute(&mut *conn).await?;
    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM post_reads").fetch_one(&mut *conn).await?;
    if existing > 0 {
        return Err(StorageError::PostReadsExist(count_to_u64(existing, "post_reads")?));
    }
    run_backfill(conn, cutoff).await
}

fn log_report(cutoff: ReadCutoff, report: &BackfillReport) {
    tracing::info!(
        cutoff = %cutoff.at(),
        created = report.created(),
        skipped_duplicates = report.skipped_duplicates,
        skipped_stale = report.skipped_stale,
        "post reads backfilled"
    );
}

#[async_trait]
impl ReadMigrationStore for PgStorage {
    async fn backfill_post_reads(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        let mut tx = self.pool.begin().await?;
        let report = run_backfill(&mut tx, cutoff).await?;
        tx.commit().await?;
        log_report(cutoff, &report);
        Ok(report)
    }

    async fn backfill_post_reads_if_empty(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        let mut tx = self.pool.begin().await?;
        let report = run_backfill_if_empty(&mut tx, cutoff).await?;
        tx.commit().await?;
        log_report(cutoff, &report);
        Ok(report)
    }

    async fn revert_post_reads(&self) -> Result<u64, StorageError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM post_reads").execute(&mut *tx).await?;
        tx.commit().await?;
        tracing::warn!(deleted = result.rows_affected(), "all post reads deleted");
        Ok(result.rows_affected())
    }
}
