use readtrack_core::{Category, CategoryRead, Post, Thread, ThreadRead};
use rusqlite::params;

use super::{get_conn, ts_to_sql, Storage};
use crate::error::StorageError;

impl Storage {
    /// Insert or update a category.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn save_category(&self, category: &Category) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO categories (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![category.id.get(), category.name],
        )?;
        Ok(())
    }

    /// Insert or update a thread.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn save_thread(&self, thread: &Thread) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO threads (id, category_id, title) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET category_id = excluded.category_id, title = excluded.title",
            params![thread.id.get(), thread.category_id.get(), thread.title],
        )?;
        Ok(())
    }

    /// Insert or update a post.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn save_post(&self, post: &Post) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO posts (id, category_id, thread_id, posted_on) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
               category_id = excluded.category_id,
               thread_id = excluded.thread_id,
               posted_on = excluded.posted_on",
            params![post.id.get(), post.category_id.get(), post.thread_id.get(), ts_to_sql(post.posted_on)],
        )?;
        Ok(())
    }

    /// Insert a category read and return its id.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn save_category_read(&self, read: &CategoryRead) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO category_reads (user_id, category_id, last_read_on) VALUES (?1, ?2, ?3)",
            params![read.user_id.get(), read.category_id.get(), ts_to_sql(read.last_read_on)],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a thread read and return its id.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn save_thread_read(&self, read: &ThreadRead) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO thread_reads (user_id, category_id, thread_id, last_read_on)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                read.user_id.get(),
                read.category_id.get(),
                read.thread_id.get(),
                ts_to_sql(read.last_read_on),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
