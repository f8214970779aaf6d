//! Scheduling use case - the create/edit/reschedule/delete/duplicate intents

use time::PrimitiveDateTime;

use crate::{
    model::{Post, PostDraft, PostId, PostPatch, ScheduleForm},
    store::{PostStore, Saved, StoreError},
};

/// Configuration for the scheduling service
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// How many posts `recent` returns by default
    pub recent_limit: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self { recent_limit: 5 }
    }
}

/// Entry point for UI intents; all writes go through the owned store
pub struct SchedulingService {
    store: PostStore,
    config: SchedulingConfig,
}

impl SchedulingService {
    pub fn new(store: PostStore, config: SchedulingConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PostStore {
        &mut self.store
    }

    pub fn create_post(&mut self, draft: PostDraft) -> Result<Saved, StoreError> {
        let saved = self.store.add(draft)?;
        tracing::info!(
            post_id = %saved.post.id,
            status = %saved.post.status,
            platforms = saved.post.body.platforms.len(),
            "Created post"
        );
        log_warnings(&saved);
        Ok(saved)
    }

    /// Create from raw form input, as the scheduling modal submits it
    pub fn create_from_form(&mut self, form: ScheduleForm) -> Result<Saved, StoreError> {
        self.create_post(form.into_draft())
    }

    pub fn edit_post(&mut self, id: PostId, patch: PostPatch) -> Result<Saved, StoreError> {
        let saved = self.store.update(id, patch)?;
        tracing::info!(post_id = %id, "Edited post");
        log_warnings(&saved);
        Ok(saved)
    }

    /// Replace every editable field from a resubmitted scheduling form
    pub fn edit_from_form(&mut self, id: PostId, form: ScheduleForm) -> Result<Saved, StoreError> {
        self.edit_post(id, form.into_patch())
    }

    /// Move a post to a new time; subject to the same validation as an edit
    pub fn reschedule_post(
        &mut self,
        id: PostId,
        at: PrimitiveDateTime,
    ) -> Result<Saved, StoreError> {
        let saved = self.store.update(id, PostPatch::reschedule(at))?;
        tracing::info!(post_id = %id, scheduled_at = %at, "Rescheduled post");
        Ok(saved)
    }

    /// Delete a post; deleting an unknown id is a no-op
    pub fn delete_post(&mut self, id: PostId) -> Option<Post> {
        let removed = self.store.remove(id);
        match removed {
            Some(_) => tracing::info!(post_id = %id, "Deleted post"),
            None => tracing::debug!(post_id = %id, "Delete ignored, post not found"),
        }
        removed
    }

    /// Re-submit a copy of an existing post as a new one
    pub fn duplicate_post(&mut self, id: PostId) -> Result<Saved, StoreError> {
        let original = self.store.get(id).ok_or(StoreError::NotFound(id))?;
        let draft = PostDraft::duplicate_of(original);
        let saved = self.create_post(draft)?;
        tracing::info!(source_id = %id, post_id = %saved.post.id, "Duplicated post");
        Ok(saved)
    }

    /// Posts ahead of the clock, plus everything in flight
    pub fn upcoming(&self) -> Vec<Post> {
        self.store.query_upcoming(self.store.now())
    }

    /// Most recent past posts, newest first
    pub fn recent(&self, limit: Option<usize>) -> Vec<Post> {
        self.store
            .query_recent(self.store.now(), limit.unwrap_or(self.config.recent_limit))
    }
}

fn log_warnings(saved: &Saved) {
    for warning in &saved.warnings {
        tracing::warn!(
            post_id = %saved.post.id,
            platform = %warning.platform,
            length = warning.length,
            limit = warning.limit,
            "Content exceeds platform limit"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, PostBody, PostStatus};
    use crate::policy::ValidationIssue;
    use crate::ports::FixedClock;
    use crate::usecases::calendar::CalendarProjector;
    use std::sync::Arc;
    use time::macros::{date, datetime};
    use time::{Date, Month};

    const NOW: PrimitiveDateTime = datetime!(2026-10-17 12:00);

    fn service() -> SchedulingService {
        let store = PostStore::new(Arc::new(FixedClock::at(NOW)));
        SchedulingService::new(store, SchedulingConfig::default())
    }

    fn launch_form() -> ScheduleForm {
        ScheduleForm {
            title: "Launch".to_string(),
            content: "Hello world".to_string(),
            platforms: vec![Platform::Twitter],
            scheduled_date: "2026-10-18".to_string(),
            scheduled_time: "09:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_launch_scenario() {
        let mut service = service();
        let saved = service.create_from_form(launch_form()).unwrap();

        assert_eq!(saved.post.status, PostStatus::Scheduled);
        assert!(saved.warnings.is_empty());

        let upcoming = service.upcoming();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, saved.post.id);

        let grid = CalendarProjector::month_grid(service.store(), date!(2026 - 10 - 18));
        let bucket = grid.bucket(date!(2026 - 10 - 18)).unwrap();
        assert_eq!(bucket.posts.len(), 1);
        assert_eq!(bucket.posts[0].id, saved.post.id);
    }

    #[test]
    fn test_long_twitter_content_saves_with_warning() {
        let mut service = service();
        let form = ScheduleForm {
            content: "a".repeat(300),
            ..launch_form()
        };

        let saved = service.create_from_form(form).unwrap();
        assert_eq!(saved.warnings.len(), 1);
        assert_eq!(saved.warnings[0].platform, Platform::Twitter);
        assert_eq!(saved.warnings[0].limit, 280);
    }

    #[test]
    fn test_form_missing_time_reports_missing_date_time() {
        let mut service = service();
        let form = ScheduleForm {
            scheduled_time: String::new(),
            ..launch_form()
        };

        let err = service.create_from_form(form).unwrap_err();
        assert_eq!(
            err.validation().unwrap().issues,
            vec![ValidationIssue::MissingDateTime]
        );
    }

    #[test]
    fn test_form_with_blank_platform_reports_missing_platform() {
        let mut service = service();
        let form = ScheduleForm {
            platforms: vec!["".parse().unwrap()],
            ..launch_form()
        };

        let err = service.create_from_form(form).unwrap_err();
        assert_eq!(
            err.validation().unwrap().issues,
            vec![ValidationIssue::MissingPlatform]
        );
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_form_saved_as_draft_skips_checks() {
        let mut service = service();
        let form = ScheduleForm {
            title: "Idea".to_string(),
            save_as_draft: true,
            ..Default::default()
        };

        let saved = service.create_from_form(form).unwrap();
        assert_eq!(saved.post.status, PostStatus::Draft);
    }

    #[test]
    fn test_edit_from_form_replaces_fields() {
        let mut service = service();
        let saved = service.create_from_form(launch_form()).unwrap();

        let form = ScheduleForm {
            title: "Launch v2".to_string(),
            scheduled_time: "10:30".to_string(),
            tags: vec!["launch".to_string()],
            ..launch_form()
        };
        let edited = service.edit_from_form(saved.post.id, form).unwrap();

        assert_eq!(edited.post.id, saved.post.id);
        assert_eq!(edited.post.body.title, "Launch v2");
        assert_eq!(edited.post.scheduled_at(), Some(datetime!(2026-10-18 10:30)));
        assert!(edited.post.body.tags.contains("launch"));
    }

    #[test]
    fn test_edit_from_form_without_time_reports_missing_date_time() {
        let mut service = service();
        let saved = service.create_from_form(launch_form()).unwrap();

        let form = ScheduleForm {
            scheduled_date: "2026-10-20".to_string(),
            scheduled_time: String::new(),
            ..launch_form()
        };
        let err = service.edit_from_form(saved.post.id, form).unwrap_err();

        assert_eq!(
            err.validation().unwrap().issues,
            vec![ValidationIssue::MissingDateTime]
        );
        assert_eq!(
            service.store().get(saved.post.id).unwrap().scheduled_at(),
            Some(datetime!(2026-10-18 09:00))
        );
    }

    #[test]
    fn test_reschedule_to_past_fails() {
        let mut service = service();
        let saved = service.create_from_form(launch_form()).unwrap();

        let err = service
            .reschedule_post(saved.post.id, datetime!(2026-10-01 09:00))
            .unwrap_err();
        assert!(err.validation().unwrap().is_past_schedule());
        assert_eq!(
            service.store().get(saved.post.id).unwrap().scheduled_at(),
            Some(datetime!(2026-10-18 09:00))
        );
    }

    #[test]
    fn test_duplicate_creates_new_scheduled_post() {
        let mut service = service();
        let original = service.create_from_form(launch_form()).unwrap();
        service
            .edit_post(original.post.id, PostPatch::status(PostStatus::Pending))
            .unwrap();

        let copy = service.duplicate_post(original.post.id).unwrap();
        assert_ne!(copy.post.id, original.post.id);
        assert_eq!(copy.post.status, PostStatus::Scheduled);
        assert_eq!(copy.post.body, original.post.body);
        assert_eq!(service.store().len(), 2);
    }

    #[test]
    fn test_duplicate_of_past_post_fails_validation() {
        let mut service = service();
        let old = service
            .create_post(
                PostDraft::from(
                    PostBody::new("Old", "Body")
                        .with_platform(Platform::Facebook)
                        .scheduled_for(datetime!(2026-10-01 09:00)),
                )
                .with_status(PostStatus::Published),
            )
            .unwrap();

        let err = service.duplicate_post(old.post.id).unwrap_err();
        assert!(err.validation().unwrap().is_past_schedule());
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn test_duplicate_unknown_post_is_not_found() {
        let mut service = service();
        assert!(matches!(
            service.duplicate_post(PostId(3)),
            Err(StoreError::NotFound(PostId(3)))
        ));
    }

    #[test]
    fn test_delete_unknown_post_is_silent() {
        let mut service = service();
        service.create_from_form(launch_form()).unwrap();
        assert!(service.delete_post(PostId(77)).is_none());
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn test_recent_uses_configured_limit() {
        let store = PostStore::new(Arc::new(FixedClock::at(NOW)));
        let mut service = SchedulingService::new(store, SchedulingConfig { recent_limit: 2 });
        for day in 1..=4u8 {
            let at = Date::from_calendar_date(2026, Month::October, day)
                .unwrap()
                .with_hms(9, 0, 0)
                .unwrap();
            service
                .create_post(
                    PostDraft::from(
                        PostBody::new(format!("Day {}", day), "Body")
                            .with_platform(Platform::Instagram)
                            .scheduled_for(at),
                    )
                    .with_status(PostStatus::Published),
                )
                .unwrap();
        }

        let recent = service.recent(None);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].body.title, "Day 4");
        assert_eq!(service.recent(Some(10)).len(), 4);
    }
}
