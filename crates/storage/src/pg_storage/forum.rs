//! ForumStore implementation for PgStorage.

use super::*;

use crate::traits::ForumStore;
use async_trait::async_trait;
use readtrack_core::{Category, CategoryRead, Post, Thread, ThreadRead};

#[async_trait]
impl ForumStore for PgStorage {
    async fn save_category(&self, category: &Category) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO categories (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name",
        )
        .bind(category.id)
        .bind(&category.name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_thread(&self, thread: &Thread) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO threads (id, category_id, title) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
               category_id = EXCLUDED.category_id,
               title = EXCLUDED.title",
        )
        .bind(thread.id)
        .bind(thread.category_id)
        .bind(&thread.title)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_post(&self, post: &Post) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO posts (id, category_id, thread_id, posted_on) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
               category_id = EXCLUDED.category_id,
               thread_id = EXCLUDED.thread_id,
               posted_on = EXCLUDED.posted_on",
        )
        .bind(post.id)
        .bind(post.category_id)
        .bind(post.thread_id)
        .bind(post.posted_on)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_category_read(&self, read: &CategoryRead) -> Result<i64, StorageError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO category_reads (user_id, category_id, last_read_on)
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(read.user_id)
        .bind(read.category_id)
        .bind(read.last_read_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn save_thread_read(&self, read: &ThreadRead) -> Result<i64, StorageError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO thread_reads (user_id, category_id, thread_id, last_read_on)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(read.user_id)
        .bind(read.category_id)
        .bind(read.thread_id)
        .bind(read.last_read_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
