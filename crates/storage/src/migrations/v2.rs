//! Migration v2: per-post read markers
//!
//! No unique index on (user_id, post_id): the backfill deduplicates in
//! memory and a repeated run is allowed to write duplicates.

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS post_reads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    thread_id INTEGER NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    last_read_on TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_post_reads_user_post ON post_reads(user_id, post_id);
";
