//! Test utilities and module declarations for storage tests.

use crate::Storage;
use chrono::{DateTime, Duration, TimeZone, Utc};
use readtrack_core::{
    Category, CategoryId, CategoryRead, Post, PostId, ReadCutoff, Thread, ThreadId, ThreadRead,
    UserId,
};
use tempfile::TempDir;

mod forum_tests;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

/// Fixed clock with whole seconds so stored timestamps compare exactly.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn test_cutoff() -> ReadCutoff {
    ReadCutoff::new(40, test_now()).unwrap()
}

/// Category `category` with one thread per id in `threads`.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_category(storage: &Storage, category: i64, threads: &[i64]) {
    storage.save_category(&Category::new(CategoryId(category), format!("Category {category}"))).unwrap();
    for &thread in threads {
        storage
            .save_thread(&Thread::new(ThreadId(thread), CategoryId(category), format!("Thread {thread}")))
            .unwrap();
    }
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_post(storage: &Storage, id: i64, category: i64, thread: i64, age_days: i64) -> Post {
    let post = Post::new(
        PostId(id),
        CategoryId(category),
        ThreadId(thread),
        test_now() - Duration::days(age_days),
    );
    storage.save_post(&post).unwrap();
    post
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_category_read(storage: &Storage, user: i64, category: i64) -> i64 {
    storage
        .save_category_read(&CategoryRead {
            id: 0,
            user_id: UserId(user),
            category_id: CategoryId(category),
            last_read_on: test_now(),
        })
        .unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_thread_read(storage: &Storage, user: i64, category: i64, thread: i64) -> i64 {
    storage
        .save_thread_read(&ThreadRead {
            id: 0,
            user_id: UserId(user),
            category_id: CategoryId(category),
            thread_id: ThreadId(thread),
            last_read_on: test_now(),
        })
        .unwrap()
}
