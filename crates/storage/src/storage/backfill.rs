//! Post-read backfill for `SQLite`.
//!
//! Legacy reads and their posts are paged by ascending id so that no table
//! is loaded whole. Everything runs on one connection inside one
//! transaction; returning early with an error drops the transaction and
//! rolls back every marker written so far.

use readtrack_core::{
    BackfillReport, CategoryId, CategoryRead, NewPostRead, Post, PostId, ReadBackfill, ReadCutoff,
    ThreadId, ThreadRead, UserId, BACKFILL_BATCH_SIZE,
};
use rusqlite::{params, Transaction, TransactionBehavior};

use super::{get_conn, ts_from_sql, ts_to_sql, Storage};
use crate::error::StorageError;

/// Which posts a legacy read covers.
#[derive(Debug, Clone, Copy)]
enum PostScope {
    Category(CategoryId),
    Thread(ThreadId),
}

fn batch_limit() -> i64 {
    i64::try_from(BACKFILL_BATCH_SIZE).unwrap_or(i64::MAX)
}

fn category_reads_after(tx: &Transaction<'_>, after: i64) -> Result<Vec<CategoryRead>, StorageError> {
    let mut stmt = tx.prepare_cached(
        "SELECT id, user_id, category_id, last_read_on FROM category_reads
          WHERE id > ?1 ORDER BY id LIMIT ?2",
    )?;
    let reads = stmt
        .query_map(params![after, batch_limit()], |row| {
            Ok(CategoryRead {
                id: row.get(0)?,
                user_id: UserId(row.get(1)?),
                category_id: CategoryId(row.get(2)?),
                last_read_on: ts_from_sql(&row.get::<_, String>(3)?)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reads)
}

fn thread_reads_after(tx: &Transaction<'_>, after: i64) -> Result<Vec<ThreadRead>, StorageError> {
    let mut stmt = tx.prepare_cached(
        "SELECT id, user_id, category_id, thread_id, last_read_on FROM thread_reads
          WHERE id > ?1 ORDER BY id LIMIT ?2",
    )?;
    let reads = stmt
        .query_map(params![after, batch_limit()], |row| {
            Ok(ThreadRead {
                id: row.get(0)?,
                user_id: UserId(row.get(1)?),
                category_id: CategoryId(row.get(2)?),
                thread_id: ThreadId(row.get(3)?),
                last_read_on: ts_from_sql(&row.get::<_, String>(4)?)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reads)
}

fn posts_after(
    tx: &Transaction<'_>,
    scope: PostScope,
    cutoff: &str,
    after: i64,
) -> Result<Vec<Post>, StorageError> {
    let (sql, key) = match scope {
        PostScope::Category(id) => (
            "SELECT id, category_id, thread_id, posted_on FROM posts
              WHERE category_id = ?1 AND posted_on >= ?2 AND id > ?3 ORDER BY id LIMIT ?4",
            id.get(),
        ),
        PostScope::Thread(id) => (
            "SELECT id, category_id, thread_id, posted_on FROM posts
              WHERE thread_id = ?1 AND posted_on >= ?2 AND id > ?3 ORDER BY id LIMIT ?4",
            id.get(),
        ),
    };
    let mut stmt = tx.prepare_cached(sql)?;
    let posts = stmt
        .query_map(params![key, cutoff, after, batch_limit()], |row| {
            Ok(Post::new(
                PostId(row.get(0)?),
                CategoryId(row.get(1)?),
                ThreadId(row.get(2)?),
                ts_from_sql(&row.get::<_, String>(3)?)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(posts)
}

/// Posts of `scope` older than the cutoff, which `posts_after` never returns.
fn stale_post_count(
    tx: &Transaction<'_>,
    scope: PostScope,
    cutoff: &str,
) -> Result<u64, StorageError> {
    let (sql, key) = match scope {
        PostScope::Category(id) => {
            ("SELECT COUNT(*) FROM posts WHERE category_id = ?1 AND posted_on < ?2", id.get())
        },
        PostScope::Thread(id) => {
            ("SELECT COUNT(*) FROM posts WHERE thread_id = ?1 AND posted_on < ?2", id.get())
        },
    };
    let count: i64 = tx.prepare_cached(sql)?.query_row(params![key, cutoff], |row| row.get(0))?;
    Ok(u64::try_from(count).unwrap_or(0))
}

fn insert_post_reads(tx: &Transaction<'_>, markers: &[NewPostRead]) -> Result<(), StorageError> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO post_reads (user_id, category_id, thread_id, post_id, last_read_on)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for marker in markers {
        stmt.execute(params![
            marker.user_id.get(),
            marker.category_id.get(),
            marker.thread_id.get(),
            marker.post_id.get(),
            ts_to_sql(marker.last_read_on),
        ])?;
    }
    Ok(())
}

/// Feed every in-window post of `scope` through `plan` and write the markers.
fn migrate_scope(
    tx: &Transaction<'_>,
    scope: PostScope,
    cutoff: &str,
    mut plan: impl FnMut(&[Post]) -> Vec<NewPostRead>,
) -> Result<(), StorageError> {
    let mut after = i64::MIN;
    loop {
        let posts = posts_after(tx, scope, cutoff, after)?;
        let Some(last) = posts.last() else {
            return Ok(());
        };
        after = last.id.get();
        insert_post_reads(tx, &plan(&posts))?;
        if posts.len() < BACKFILL_BATCH_SIZE {
            return Ok(());
        }
    }
}

fn run_backfill(tx: &Transaction<'_>, cutoff: ReadCutoff) -> Result<BackfillReport, StorageError> {
    let mut backfill = ReadBackfill::new(cutoff);
    let cutoff_sql = ts_to_sql(cutoff.at());

    let mut after = i64::MIN;
    loop {
        let reads = category_reads_after(tx, after)?;
        let Some(last) = reads.last() else { break };
        after = last.id;
        for read in &reads {
            backfill.begin_category_read(read);
            let scope = PostScope::Category(read.category_id);
            backfill.skip_stale(stale_post_count(tx, scope, &cutoff_sql)?);
            migrate_scope(tx, scope, &cutoff_sql, |posts| backfill.category_markers(read, posts))?;
        }
        if reads.len() < BACKFILL_BATCH_SIZE {
            break;
        }
    }
    tracing::debug!(reads = backfill.report().category_reads, "category pass complete");

    let mut after = i64::MIN;
    loop {
        let reads = thread_reads_after(tx, after)?;
        let Some(last) = reads.last() else { break };
        after = last.id;
        for read in &reads {
            backfill.begin_thread_read(read);
            let scope = PostScope::Thread(read.thread_id);
            backfill.skip_stale(stale_post_count(tx, scope, &cutoff_sql)?);
            migrate_scope(tx, scope, &cutoff_sql, |posts| backfill.thread_markers(read, posts))?;
        }
        if reads.len() < BACKFILL_BATCH_SIZE {
            break;
        }
    }
    tracing::debug!(reads = backfill.report().thread_reads, "thread pass complete");

    Ok(backfill.finish())
}

impl Storage {
    /// Expand category and thread reads into per-post markers in one transaction.
    ///
    /// # Errors
    /// Returns error if any query fails; nothing is written in that case.
    pub fn backfill_post_reads(&self, cutoff: ReadCutoff) -> Result<BackfillReport, StorageError> {
        self.backfill(cutoff, false)
    }

    /// Like [`Storage::backfill_post_reads`], but refuses to run when any
    /// post read exists. The check and the backfill share one write
    /// transaction, so a concurrent writer cannot slip in between.
    ///
    /// # Errors
    /// Returns [`StorageError::PostReadsExist`] when markers are present.
    pub fn backfill_post_reads_if_empty(
        &self,
        cutoff: ReadCutoff,
    ) -> Result<BackfillReport, StorageError> {
        self.backfill(cutoff, true)
    }

    fn backfill(
        &self,
        cutoff: ReadCutoff,
        require_empty: bool,
    ) -> Result<BackfillReport, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if require_empty {
            let existing: i64 =
                tx.query_row("SELECT COUNT(*) FROM post_reads", [], |row| row.get(0))?;
            if existing > 0 {
                return Err(StorageError::PostReadsExist(u64::try_from(existing).unwrap_or(0)));
            }
        }
        let report = run_backfill(&tx, cutoff)?;
        tx.commit()?;
        tracing::info!(
            cutoff = %cutoff.at(),
            created = report.created(),
            skipped_duplicates = report.skipped_duplicates,
            skipped_stale = report.skipped_stale,
            "post reads backfilled"
        );
        Ok(report)
    }

    /// Delete every per-post marker. Not limited to backfilled rows.
    ///
    /// # Errors
    /// Returns error if the delete fails; nothing is removed in that case.
    pub fn revert_post_reads(&self) -> Result<u64, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM post_reads", [])?;
        tx.commit()?;
        tracing::warn!(deleted, "all post reads deleted");
        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}
