use readtrack_core::{CategoryId, PostId, PostRead, ThreadId, UserId};
use rusqlite::{params, Connection};

use super::{get_conn, ts_from_sql, Storage};
use crate::error::StorageError;
use crate::stats::ReadTrackerStats;

fn row_to_post_read(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRead> {
    Ok(PostRead {
        id: row.get(0)?,
        user_id: UserId(row.get(1)?),
        category_id: CategoryId(row.get(2)?),
        thread_id: ThreadId(row.get(3)?),
        post_id: PostId(row.get(4)?),
        last_read_on: ts_from_sql(&row.get::<_, String>(5)?)?,
    })
}

fn count_rows(conn: &Connection, table: &str) -> Result<u64, StorageError> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(count as u64)
}

impl Storage {
    /// All markers of a user, ordered by post then marker id.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_post_reads_for_user(&self, user_id: UserId) -> Result<Vec<PostRead>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, category_id, thread_id, post_id, last_read_on
               FROM post_reads WHERE user_id = ?1 ORDER BY post_id, id",
        )?;
        let reads = stmt
            .query_map(params![user_id.get()], row_to_post_read)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reads)
    }

    /// Number of per-post markers.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn count_post_reads(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        count_rows(&conn, "post_reads")
    }

    /// Row counts across the read-tracker tables.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_stats(&self) -> Result<ReadTrackerStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(ReadTrackerStats {
            categories: count_rows(&conn, "categories")?,
            threads: count_rows(&conn, "threads")?,
            posts: count_rows(&conn, "posts")?,
            category_reads: count_rows(&conn, "category_reads")?,
            thread_reads: count_rows(&conn, "thread_reads")?,
            post_reads: count_rows(&conn, "post_reads")?,
        })
    }
}
