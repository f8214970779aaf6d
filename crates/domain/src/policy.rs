//! Scheduling rules applied before a post is committed

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use time::PrimitiveDateTime;

use crate::model::{Platform, PostBody, PostStatus, RecurrenceRule};

fn has_platform(body: &PostBody) -> bool {
    body.platforms.iter().any(|p| !p.is_blank())
}

/// Built-in character limit for a platform, `None` when unconstrained
pub fn platform_limit(platform: &Platform) -> Option<usize> {
    match platform {
        Platform::Twitter => Some(280),
        Platform::Instagram => Some(2200),
        Platform::Linkedin => Some(3000),
        Platform::Facebook => Some(63206),
        Platform::Youtube => Some(5000),
        Platform::Tiktok => Some(2200),
        Platform::Reddit => Some(40000),
        Platform::Other(_) => None,
    }
}

/// A hard validation failure; blocks the commit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("Title is required")]
    MissingTitle,
    #[error("Content is required")]
    MissingContent,
    #[error("Select at least one platform")]
    MissingPlatform,
    #[error("Date and time are required")]
    MissingDateTime,
    #[error("Scheduled time {scheduled_at} must be in the future (now {now})")]
    PastSchedule {
        scheduled_at: PrimitiveDateTime,
        now: PrimitiveDateTime,
    },
    #[error("Select at least one day for custom recurrence")]
    MissingRecurrenceDays,
}

impl ValidationIssue {
    /// Stable identifier, e.g. for the form field a UI should highlight
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::MissingTitle => "missing_title",
            ValidationIssue::MissingContent => "missing_content",
            ValidationIssue::MissingPlatform => "missing_platform",
            ValidationIssue::MissingDateTime => "missing_date_time",
            ValidationIssue::PastSchedule { .. } => "past_schedule",
            ValidationIssue::MissingRecurrenceDays => "missing_recurrence_days",
        }
    }
}

/// Every hard failure found for one post
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code() == code)
    }

    pub fn is_past_schedule(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ValidationIssue::PastSchedule { .. }))
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Content exceeds a platform's limit; reported but never blocks a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTooLongWarning {
    pub platform: Platform,
    pub length: usize,
    pub limit: usize,
}

impl fmt::Display for ContentTooLongWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Content is {} characters, {} allows {}",
            self.length, self.platform, self.limit
        )
    }
}

/// Outcome of validating one post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ContentTooLongWarning>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Warnings on success, the aggregated hard errors otherwise
    pub fn into_result(self) -> Result<Vec<ContentTooLongWarning>, ValidationError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ValidationError {
                issues: self.errors,
            })
        }
    }
}

/// Validator for posts entering or remaining in a scheduled state
#[derive(Debug, Clone)]
pub struct SchedulingValidator {
    limits: BTreeMap<Platform, usize>,
}

impl Default for SchedulingValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingValidator {
    pub fn new() -> Self {
        let limits = Platform::KNOWN
            .iter()
            .filter_map(|p| platform_limit(p).map(|limit| (p.clone(), limit)))
            .collect();
        Self { limits }
    }

    /// Override or add a character limit
    pub fn with_limit(mut self, platform: Platform, limit: usize) -> Self {
        self.limits.insert(platform, limit);
        self
    }

    pub fn limit_for(&self, platform: &Platform) -> Option<usize> {
        self.limits.get(platform).copied()
    }

    /// Validate a post body for the status it is about to hold.
    ///
    /// `scheduled` runs every check. `pending` only needs a platform to
    /// publish to. Other statuses carry no hard requirements. Length
    /// warnings are reported for every status.
    pub fn validate(
        &self,
        body: &PostBody,
        status: PostStatus,
        now: PrimitiveDateTime,
    ) -> Validation {
        let errors = match status {
            PostStatus::Scheduled => self.check_schedulable(body, now),
            PostStatus::Pending if !has_platform(body) => {
                vec![ValidationIssue::MissingPlatform]
            }
            _ => Vec::new(),
        };

        Validation {
            errors,
            warnings: self.content_warnings(body),
        }
    }

    /// All hard checks, in order, without short-circuiting
    pub fn check_schedulable(
        &self,
        body: &PostBody,
        now: PrimitiveDateTime,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if body.title.trim().is_empty() {
            issues.push(ValidationIssue::MissingTitle);
        }

        if body.content.trim().is_empty() {
            issues.push(ValidationIssue::MissingContent);
        }

        if !has_platform(body) {
            issues.push(ValidationIssue::MissingPlatform);
        }

        match body.scheduled_at {
            None => issues.push(ValidationIssue::MissingDateTime),
            Some(scheduled_at) if scheduled_at <= now => {
                issues.push(ValidationIssue::PastSchedule { scheduled_at, now });
            }
            Some(_) => {}
        }

        if body.recurring
            && body.recurrence_rule == RecurrenceRule::Custom
            && body.recurrence_days.is_empty()
        {
            issues.push(ValidationIssue::MissingRecurrenceDays);
        }

        issues
    }

    /// One warning per targeted platform whose limit the content exceeds
    pub fn content_warnings(&self, body: &PostBody) -> Vec<ContentTooLongWarning> {
        let length = body.content.chars().count();

        body.platforms
            .iter()
            .filter_map(|platform| {
                let limit = self.limit_for(platform)?;
                (length > limit).then(|| ContentTooLongWarning {
                    platform: platform.clone(),
                    length,
                    limit,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const NOW: PrimitiveDateTime = datetime!(2026-10-17 12:00);

    fn valid_body() -> PostBody {
        PostBody::new("Launch", "Hello world")
            .with_platform(Platform::Twitter)
            .scheduled_for(datetime!(2026-10-18 09:00))
    }

    #[test]
    fn test_valid_post_passes() {
        let validation =
            SchedulingValidator::new().validate(&valid_body(), PostStatus::Scheduled, NOW);
        assert!(validation.is_ok());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_accumulates_all_errors_in_order() {
        let body = PostBody {
            title: "   ".to_string(),
            content: "\n".to_string(),
            recurring: true,
            recurrence_rule: RecurrenceRule::Custom,
            ..Default::default()
        };

        let errors = SchedulingValidator::new().check_schedulable(&body, NOW);
        assert_eq!(
            errors,
            vec![
                ValidationIssue::MissingTitle,
                ValidationIssue::MissingContent,
                ValidationIssue::MissingPlatform,
                ValidationIssue::MissingDateTime,
                ValidationIssue::MissingRecurrenceDays,
            ]
        );
    }

    #[test]
    fn test_missing_platform_regardless_of_other_fields() {
        let mut body = valid_body();
        body.platforms.clear();

        let result = SchedulingValidator::new()
            .validate(&body, PostStatus::Scheduled, NOW)
            .into_result();
        let err = result.unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::MissingPlatform]);
    }

    #[test]
    fn test_schedule_at_now_is_in_the_past() {
        let body = valid_body().scheduled_for(NOW);
        let errors = SchedulingValidator::new().check_schedulable(&body, NOW);
        assert_eq!(
            errors,
            vec![ValidationIssue::PastSchedule {
                scheduled_at: NOW,
                now: NOW
            }]
        );
    }

    #[test]
    fn test_custom_recurrence_with_days_passes() {
        let body =
            valid_body().repeating(RecurrenceRule::Custom, [crate::model::DayOfWeek::Monday]);
        assert!(SchedulingValidator::new().check_schedulable(&body, NOW).is_empty());
    }

    #[test]
    fn test_long_content_is_a_warning_not_an_error() {
        let mut body = valid_body().with_platform(Platform::Linkedin);
        body.content = "x".repeat(300);

        let validation = SchedulingValidator::new().validate(&body, PostStatus::Scheduled, NOW);
        assert!(validation.is_ok());
        assert_eq!(
            validation.warnings,
            vec![ContentTooLongWarning {
                platform: Platform::Twitter,
                length: 300,
                limit: 280,
            }]
        );
    }

    #[test]
    fn test_unlisted_platform_is_unconstrained() {
        let mut body = valid_body();
        body.platforms = [Platform::Other("blog".to_string())].into_iter().collect();
        body.content = "x".repeat(100_000);

        let validation = SchedulingValidator::new().validate(&body, PostStatus::Scheduled, NOW);
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_limit_override() {
        let validator =
            SchedulingValidator::new().with_limit(Platform::Other("blog".to_string()), 10);
        let mut body = valid_body();
        body.platforms = [Platform::Other("blog".to_string())].into_iter().collect();
        body.content = "x".repeat(11);

        assert_eq!(validator.content_warnings(&body).len(), 1);
    }

    #[test]
    fn test_draft_and_published_skip_hard_checks() {
        let body = PostBody::default();
        let validator = SchedulingValidator::new();
        assert!(validator.validate(&body, PostStatus::Draft, NOW).is_ok());
        assert!(validator.validate(&body, PostStatus::Published, NOW).is_ok());
    }

    #[test]
    fn test_pending_requires_platform() {
        let body = PostBody::new("Launch", "Hello").scheduled_for(datetime!(2026-10-01 09:00));
        let validation = SchedulingValidator::new().validate(&body, PostStatus::Pending, NOW);
        assert_eq!(validation.errors, vec![ValidationIssue::MissingPlatform]);
    }

    #[test]
    fn test_blank_platform_name_counts_as_missing() {
        let mut body = valid_body();
        body.platforms = [Platform::Other("  ".to_string())].into_iter().collect();

        let errors = SchedulingValidator::new().check_schedulable(&body, NOW);
        assert_eq!(errors, vec![ValidationIssue::MissingPlatform]);
    }

    #[test]
    fn test_error_message_lists_every_issue() {
        let err = ValidationError {
            issues: vec![ValidationIssue::MissingTitle, ValidationIssue::MissingPlatform],
        };
        assert_eq!(
            err.to_string(),
            "Validation failed: Title is required; Select at least one platform"
        );
        assert!(err.has_code("missing_platform"));
        assert!(!err.is_past_schedule());
    }
}
