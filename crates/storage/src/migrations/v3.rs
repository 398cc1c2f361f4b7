//! Migration v3: cutoff-friendly indexes on posts

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_posts_category_posted ON posts(category_id, posted_on);
CREATE INDEX IF NOT EXISTS idx_posts_thread_posted ON posts(thread_id, posted_on);
";
