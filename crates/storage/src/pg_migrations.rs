//! PostgreSQL schema migrations for readtrack storage.

use sqlx::PgPool;

use crate::error::StorageError;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS categories (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS threads (
        id BIGINT PRIMARY KEY,
        category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        title TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id BIGINT PRIMARY KEY,
        category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        thread_id BIGINT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
        posted_on TIMESTAMPTZ NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_posts_category_posted ON posts (category_id, posted_on)",
    "CREATE INDEX IF NOT EXISTS idx_posts_thread_posted ON posts (thread_id, posted_on)",
    "CREATE TABLE IF NOT EXISTS category_reads (
        id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        user_id BIGINT NOT NULL,
        category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        last_read_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS idx_category_reads_user ON category_reads (user_id)",
    "CREATE TABLE IF NOT EXISTS thread_reads (
        id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        user_id BIGINT NOT NULL,
        category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        thread_id BIGINT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
        last_read_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS idx_thread_reads_user ON thread_reads (user_id)",
    // No unique (user_id, post_id): a repeated backfill may write duplicates.
    "CREATE TABLE IF NOT EXISTS post_reads (
        id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        user_id BIGINT NOT NULL,
        category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        thread_id BIGINT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
        post_id BIGINT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        last_read_on TIMESTAMPTZ NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_post_reads_user_post ON post_reads (user_id, post_id)",
];

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!(statements = STATEMENTS.len(), "PostgreSQL schema up to date");
    Ok(())
}
