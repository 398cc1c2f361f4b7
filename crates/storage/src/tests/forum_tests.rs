use super::{create_test_storage, seed_category, seed_category_read, seed_post, seed_thread_read};
use crate::StorageError;
use readtrack_core::{Category, CategoryId, Post, PostId, ThreadId};

#[test]
fn stats_count_every_table() {
    let (storage, _temp_dir) = create_test_storage();
    seed_category(&storage, 1, &[10, 11]);
    seed_post(&storage, 100, 1, 10, 1);
    seed_post(&storage, 101, 1, 11, 2);
    seed_category_read(&storage, 7, 1);
    seed_thread_read(&storage, 7, 1, 10);
    seed_thread_read(&storage, 8, 1, 11);

    let stats = storage.get_stats().unwrap();
    assert_eq!(stats.categories, 1);
    assert_eq!(stats.threads, 2);
    assert_eq!(stats.posts, 2);
    assert_eq!(stats.category_reads, 1);
    assert_eq!(stats.thread_reads, 2);
    assert_eq!(stats.post_reads, 0);
}

#[test]
fn saving_a_category_twice_updates_name_and_keeps_threads() {
    let (storage, _temp_dir) = create_test_storage();
    seed_category(&storage, 1, &[10]);
    seed_post(&storage, 100, 1, 10, 1);

    storage.save_category(&Category::new(CategoryId(1), "Renamed")).unwrap();

    let stats = storage.get_stats().unwrap();
    assert_eq!(stats.categories, 1);
    assert_eq!(stats.threads, 1);
    assert_eq!(stats.posts, 1);
}

#[test]
fn legacy_reads_get_increasing_ids() {
    let (storage, _temp_dir) = create_test_storage();
    seed_category(&storage, 1, &[10]);
    let first = seed_category_read(&storage, 1, 1);
    let second = seed_category_read(&storage, 2, 1);
    assert!(second > first);
}

#[test]
fn post_in_unknown_thread_is_rejected() {
    let (storage, _temp_dir) = create_test_storage();
    seed_category(&storage, 1, &[10]);
    let orphan = Post::new(PostId(1), CategoryId(1), ThreadId(999), super::test_now());
    let err = storage.save_post(&orphan).unwrap_err();
    assert!(matches!(err, StorageError::Sqlite(_)), "unexpected error: {err}");
    assert!(!err.is_duplicate());
}
