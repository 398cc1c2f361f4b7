//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p readtrack-storage --features postgres -- --ignored pg_
//!
//! The backfill and the revert touch every row in the database, so each
//! test works on ids of its own and asserts per user rather than on totals.

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, SubsecRound, Utc};
use readtrack_core::{
    Category, CategoryId, CategoryRead, Post, PostId, ReadCutoff, Thread, ThreadId, ThreadRead,
    UserId,
};
use readtrack_storage::traits::{ForumStore, PostReadStore, ReadMigrationStore, StatsStore};
use readtrack_storage::{PgStorage, StorageError};
use tokio::sync::Mutex;

static NEXT_ID: AtomicI64 = AtomicI64::new(0);

/// Serializes tests that run a backfill.
static BACKFILL_LOCK: Mutex<()> = Mutex::const_new(());

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

/// Ids unlikely to collide with earlier runs against the same database.
fn unique_id() -> i64 {
    let base = Utc::now().timestamp_micros();
    base.saturating_mul(16).saturating_add(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

struct Fixture {
    category: CategoryId,
    thread: ThreadId,
}

async fn seed_forum(storage: &PgStorage) -> Fixture {
    let category = CategoryId(unique_id());
    let thread = ThreadId(unique_id());
    storage.save_category(&Category::new(category, "pg category".to_owned())).await.unwrap();
    storage.save_thread(&Thread::new(thread, category, "pg thread".to_owned())).await.unwrap();
    Fixture { category, thread }
}

async fn seed_post(storage: &PgStorage, fixture: &Fixture, at: DateTime<Utc>) -> Post {
    let post = Post::new(PostId(unique_id()), fixture.category, fixture.thread, at);
    storage.save_post(&post).await.unwrap();
    post
}

#[tokio::test]
#[ignore]
async fn pg_backfill_respects_window_and_dedup() {
    let _guard = BACKFILL_LOCK.lock().await;
    let storage = create_pg_storage().await;
    let fixture = seed_forum(&storage).await;
    let now = now();
    let fresh = seed_post(&storage, &fixture, now - Duration::days(2)).await;
    let stale = seed_post(&storage, &fixture, now - Duration::days(80)).await;

    let both = UserId(unique_id());
    let thread_only = UserId(unique_id());
    storage
        .save_category_read(&CategoryRead {
            id: 0,
            user_id: both,
            category_id: fixture.category,
            last_read_on: now,
        })
        .await
        .unwrap();
    for user_id in [both, thread_only] {
        storage
            .save_thread_read(&ThreadRead {
                id: 0,
                user_id,
                category_id: fixture.category,
                thread_id: fixture.thread,
                last_read_on: now,
            })
            .await
            .unwrap();
    }

    let cutoff = ReadCutoff::new(40, now).unwrap();
    let report = storage.backfill_post_reads(cutoff).await.unwrap();
    assert!(report.created() >= 2);
    assert!(report.skipped_duplicates >= 1);
    // The stale post under one category read and two thread reads.
    assert!(report.skipped_stale >= 3);

    let err = storage.backfill_post_reads_if_empty(cutoff).await.unwrap_err();
    assert!(matches!(err, StorageError::PostReadsExist(n) if n >= 2));

    for user_id in [both, thread_only] {
        let reads = storage.get_post_reads_for_user(user_id).await.unwrap();
        assert_eq!(reads.len(), 1, "user {user_id} should have exactly one marker");
        assert_eq!(reads[0].post_id, fresh.id);
        assert_eq!(reads[0].thread_id, fixture.thread);
        assert_eq!(reads[0].last_read_on, fresh.posted_on);
        assert!(reads.iter().all(|r| r.post_id != stale.id));
    }
}

#[tokio::test]
#[ignore]
async fn pg_stats_reflect_seeded_rows() {
    let storage = create_pg_storage().await;
    let before = storage.get_stats().await.unwrap();
    let fixture = seed_forum(&storage).await;
    seed_post(&storage, &fixture, now()).await;

    let after = storage.get_stats().await.unwrap();
    assert!(after.categories > before.categories);
    assert!(after.threads > before.threads);
    assert!(after.posts > before.posts);
}

#[tokio::test]
#[ignore]
async fn pg_category_upsert_keeps_threads() {
    let _guard = BACKFILL_LOCK.lock().await;
    let storage = create_pg_storage().await;
    let fixture = seed_forum(&storage).await;
    let post = seed_post(&storage, &fixture, now()).await;

    storage.save_category(&Category::new(fixture.category, "renamed".to_owned())).await.unwrap();
    storage.save_post(&post).await.unwrap();

    let user_id = UserId(unique_id());
    storage
        .save_thread_read(&ThreadRead {
            id: 0,
            user_id,
            category_id: fixture.category,
            thread_id: fixture.thread,
            last_read_on: now(),
        })
        .await
        .unwrap();
    storage.backfill_post_reads(ReadCutoff::new(40, now()).unwrap()).await.unwrap();
    assert_eq!(storage.get_post_reads_for_user(user_id).await.unwrap().len(), 1);
}
