//! Read markers, both the legacy coarse ones and the per-post one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CategoryId, Post, PostId, ThreadId, UserId};

/// Legacy marker: the user has read every post in the category.
///
/// `last_read_on` is kept for completeness; the backfill ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRead {
    pub id: i64,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub last_read_on: DateTime<Utc>,
}

/// Legacy marker: the user has read every post in the thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRead {
    pub id: i64,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub thread_id: ThreadId,
    pub last_read_on: DateTime<Utc>,
}

/// Stored per-post read marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRead {
    pub id: i64,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub thread_id: ThreadId,
    pub post_id: PostId,
    pub last_read_on: DateTime<Utc>,
}

/// Per-post read marker not yet written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPostRead {
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub thread_id: ThreadId,
    pub post_id: PostId,
    pub last_read_on: DateTime<Utc>,
}

impl NewPostRead {
    /// Marker saying `user_id` read `post` at the moment it was posted.
    #[must_use]
    pub const fn for_post(user_id: UserId, post: &Post) -> Self {
        Self {
            user_id,
            category_id: post.category_id,
            thread_id: post.thread_id,
            post_id: post.id,
            last_read_on: post.posted_on,
        }
    }
}
