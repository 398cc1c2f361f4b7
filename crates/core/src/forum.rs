//! Forum content: categories, threads and posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CategoryId, PostId, ThreadId};

/// Forum-like grouping of threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Conversation holding ordered posts. Lives in exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub category_id: CategoryId,
    pub title: String,
}

impl Thread {
    #[must_use]
    pub fn new(id: ThreadId, category_id: CategoryId, title: impl Into<String>) -> Self {
        Self { id, category_id, title: title.into() }
    }
}

/// A single message. Belongs to one category and one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub category_id: CategoryId,
    pub thread_id: ThreadId,
    pub posted_on: DateTime<Utc>,
}

impl Post {
    #[must_use]
    pub const fn new(
        id: PostId,
        category_id: CategoryId,
        thread_id: ThreadId,
        posted_on: DateTime<Utc>,
    ) -> Self {
        Self { id, category_id, thread_id, posted_on }
    }
}
