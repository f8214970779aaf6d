//! In-memory post store
//!
//! The store is the only owner of mutable post state. Every mutation is
//! validated first and applied only on success, so a rejected call leaves
//! the store exactly as it was.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use time::PrimitiveDateTime;

use crate::model::{Post, PostDraft, PostId, PostPatch, PostStatus};
use crate::policy::{ContentTooLongWarning, SchedulingValidator, ValidationError};
use crate::ports::Clock;

/// Error type for store mutations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    NotFound(PostId),
    #[error("Post id {0} is already in use or was retired")]
    DuplicateId(PostId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// A committed post along with any soft warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub post: Post,
    pub warnings: Vec<ContentTooLongWarning>,
}

/// Authoritative collection of posts keyed by id
pub struct PostStore {
    posts: BTreeMap<PostId, Post>,
    retired: BTreeSet<PostId>,
    next_id: u64,
    validator: SchedulingValidator,
    clock: Arc<dyn Clock>,
}

impl PostStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: BTreeMap::new(),
            retired: BTreeSet::new(),
            next_id: 1,
            validator: SchedulingValidator::new(),
            clock,
        }
    }

    /// Wall-clock "now" used for validation
    pub fn now(&self) -> PrimitiveDateTime {
        self.clock.wall_clock()
    }

    /// Insert a new post, assigning an id when the draft has none
    pub fn add(&mut self, draft: PostDraft) -> Result<Saved, StoreError> {
        if let Some(id) = draft.id {
            if self.posts.contains_key(&id) || self.retired.contains(&id) {
                tracing::warn!(post_id = %id, "Rejected post with duplicate id");
                return Err(StoreError::DuplicateId(id));
            }
        }

        let status = draft.target_status();
        let validation = self.validator.validate(&draft.body, status, self.now());
        let warnings = validation.into_result().inspect_err(|err| {
            tracing::warn!(
                title = %draft.body.title,
                issues = err.issues.len(),
                "Rejected new post"
            );
        })?;

        let id = match draft.id {
            Some(id) => {
                self.next_id = self.next_id.max(id.0 + 1);
                id
            }
            None => {
                let id = PostId(self.next_id);
                self.next_id += 1;
                id
            }
        };

        let now = self.clock.now();
        let post = Post {
            id,
            status,
            body: draft.body,
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(id, post.clone());

        tracing::debug!(
            post_id = %id,
            status = %status,
            warnings = warnings.len(),
            "Post added"
        );

        Ok(Saved { post, warnings })
    }

    /// Merge a patch into an existing post, re-validating the result
    pub fn update(&mut self, id: PostId, patch: PostPatch) -> Result<Saved, StoreError> {
        let existing = self.posts.get(&id).ok_or(StoreError::NotFound(id))?;
        let mut post = existing.merged(&patch);

        let validation = self.validator.validate(&post.body, post.status, self.now());
        let warnings = validation.into_result().inspect_err(|err| {
            tracing::warn!(post_id = %id, issues = err.issues.len(), "Rejected post update");
        })?;

        post.updated_at = self.clock.now();
        self.posts.insert(id, post.clone());

        tracing::debug!(post_id = %id, status = %post.status, "Post updated");

        Ok(Saved { post, warnings })
    }

    /// Delete a post; unknown ids are ignored
    pub fn remove(&mut self, id: PostId) -> Option<Post> {
        let removed = self.posts.remove(&id);
        if removed.is_some() {
            self.retired.insert(id);
            tracing::debug!(post_id = %id, "Post removed");
        }
        removed
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.values().cloned().collect()
    }

    /// Posts scheduled in `[start, end)`, ascending by time then id
    pub fn query_by_date_range(
        &self,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| post.scheduled_at().is_some_and(|at| at >= start && at < end))
            .cloned()
            .collect();
        sort_ascending(&mut posts);
        posts
    }

    /// Posts still ahead of `now`, plus everything in flight
    pub fn query_upcoming(&self, now: PrimitiveDateTime) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| {
                post.status == PostStatus::Pending || post.scheduled_at().is_some_and(|at| at > now)
            })
            .cloned()
            .collect();
        sort_ascending(&mut posts);
        posts
    }

    /// Most recent posts at or before `now`, newest first
    pub fn query_recent(&self, now: PrimitiveDateTime, limit: usize) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| {
                post.status != PostStatus::Pending
                    && post.scheduled_at().is_some_and(|at| at <= now)
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.scheduled_at().cmp(&a.scheduled_at()).then(a.id.cmp(&b.id)));
        posts.truncate(limit);
        posts
    }
}

/// Ascending by publish time, unscheduled posts last, ties by id
fn sort_ascending(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let key_a = (a.scheduled_at().is_none(), a.scheduled_at(), a.id);
        let key_b = (b.scheduled_at().is_none(), b.scheduled_at(), b.id);
        key_a.cmp(&key_b)
    });
}
