//! Planner for the post-read backfill.
//!
//! Expands legacy category and thread read markers into one [`NewPostRead`]
//! per affected post. The planner owns no storage: a backend streams legacy
//! reads and their posts through it inside a single transaction and writes
//! whatever it returns.
//!
//! Passes must run in order: every category read first, then every thread
//! read. Category-derived markers win over thread-derived ones for the same
//! (user, post). Two cases still produce duplicates, matching the legacy
//! data rather than hiding it:
//! - two category reads for the same (user, category);
//! - two thread reads for the same (user, thread), since thread-derived
//!   markers are not remembered.
//!
//! The remembered set grows with every (user, post) pair produced by the
//! category pass. Categories with long histories inside the retention
//! window make it large.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{CategoryRead, NewPostRead, Post, PostId, ReadCutoff, ThreadRead, UserId};

/// Counters for one backfill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillReport {
    /// Category reads visited.
    pub category_reads: u64,
    /// Thread reads visited.
    pub thread_reads: u64,
    /// Markers created by the category pass.
    pub created_from_categories: u64,
    /// Markers created by the thread pass.
    pub created_from_threads: u64,
    /// Thread-pass posts skipped because the category pass already covered them.
    pub skipped_duplicates: u64,
    /// Posts skipped because they predate the cutoff, once per read covering them.
    pub skipped_stale: u64,
}

impl BackfillReport {
    /// Total markers created.
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.created_from_categories + self.created_from_threads
    }
}

/// Stateful planner for one backfill run.
#[derive(Debug)]
pub struct ReadBackfill {
    cutoff: ReadCutoff,
    migrated: HashMap<UserId, HashSet<PostId>>,
    report: BackfillReport,
}

impl ReadBackfill {
    #[must_use]
    pub fn new(cutoff: ReadCutoff) -> Self {
        Self { cutoff, migrated: HashMap::new(), report: BackfillReport::default() }
    }

    #[must_use]
    pub const fn cutoff(&self) -> ReadCutoff {
        self.cutoff
    }

    /// Count one category read. Call once per row, before its post pages.
    pub fn begin_category_read(&mut self, read: &CategoryRead) {
        self.report.category_reads += 1;
        tracing::trace!(read.id = read.id, user = %read.user_id, category = %read.category_id, "category read");
    }

    /// Count one thread read. Call once per row, before its post pages.
    pub fn begin_thread_read(&mut self, read: &ThreadRead) {
        self.report.thread_reads += 1;
        tracing::trace!(read.id = read.id, user = %read.user_id, thread = %read.thread_id, "thread read");
    }

    /// Count `count` posts of the current read's scope that the backend
    /// left out of its pages for predating the cutoff.
    pub fn skip_stale(&mut self, count: u64) {
        self.report.skipped_stale += count;
    }

    /// Markers for one page of posts from the category of `read`.
    ///
    /// Every admitted post gets a marker and is remembered for the user.
    pub fn category_markers(&mut self, read: &CategoryRead, posts: &[Post]) -> Vec<NewPostRead> {
        let mut markers = Vec::with_capacity(posts.len());
        for post in posts {
            if !self.cutoff.admits(post.posted_on) {
                self.report.skipped_stale += 1;
                continue;
            }
            markers.push(NewPostRead::for_post(read.user_id, post));
            self.migrated.entry(read.user_id).or_default().insert(post.id);
            self.report.created_from_categories += 1;
        }
        markers
    }

    /// Markers for one page of posts from the thread of `read`.
    ///
    /// Posts the category pass already covered for this user are skipped.
    pub fn thread_markers(&mut self, read: &ThreadRead, posts: &[Post]) -> Vec<NewPostRead> {
        let seen = self.migrated.get(&read.user_id);
        let mut markers = Vec::with_capacity(posts.len());
        for post in posts {
            if !self.cutoff.admits(post.posted_on) {
                self.report.skipped_stale += 1;
                continue;
            }
            if seen.is_some_and(|ids| ids.contains(&post.id)) {
                self.report.skipped_duplicates += 1;
                continue;
            }
            markers.push(NewPostRead::for_post(read.user_id, post));
            self.report.created_from_threads += 1;
        }
        markers
    }

    /// Whether the category pass produced a marker for (user, post).
    #[must_use]
    pub fn is_migrated(&self, user_id: UserId, post_id: PostId) -> bool {
        self.migrated.get(&user_id).is_some_and(|ids| ids.contains(&post_id))
    }

    #[must_use]
    pub const fn report(&self) -> &BackfillReport {
        &self.report
    }

    #[must_use]
    pub fn finish(self) -> BackfillReport {
        self.report
    }
}
