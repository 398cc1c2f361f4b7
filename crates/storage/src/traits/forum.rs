use async_trait::async_trait;
use readtrack_core::{Category, CategoryRead, Post, Thread, ThreadRead};

use crate::error::StorageError;

/// Forum content and the legacy read markers.
///
/// The backfill only reads these tables; the write methods exist to load
/// legacy data and to seed tests.
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Insert or replace a category.
    async fn save_category(&self, category: &Category) -> Result<(), StorageError>;

    /// Insert or replace a thread.
    async fn save_thread(&self, thread: &Thread) -> Result<(), StorageError>;

    /// Insert or replace a post.
    async fn save_post(&self, post: &Post) -> Result<(), StorageError>;

    /// Insert a category read. The `id` field is ignored; the assigned id is returned.
    async fn save_category_read(&self, read: &CategoryRead) -> Result<i64, StorageError>;

    /// Insert a thread read. The `id` field is ignored; the assigned id is returned.
    async fn save_thread_read(&self, read: &ThreadRead) -> Result<i64, StorageError>;
}
