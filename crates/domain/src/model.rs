//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Weekday};

/// Unique identifier of a post, issued by the store and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PostId)
    }
}

/// Social platform a post targets
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    Linkedin,
    Twitter,
    Facebook,
    Youtube,
    Tiktok,
    Reddit,
    /// Any platform without a dedicated variant (e.g. a blog)
    Other(String),
}

impl Platform {
    /// Platforms offered by the scheduling form
    pub const KNOWN: [Platform; 7] = [
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Facebook,
        Platform::Youtube,
        Platform::Tiktok,
        Platform::Reddit,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Reddit => "reddit",
            Platform::Other(name) => name,
        }
    }

    /// An `Other` platform whose name is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

/// Platform set that drops blank names, so `[""]` reads as no platform
fn deserialize_platforms<'de, D>(deserializer: D) -> Result<BTreeSet<Platform>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let platforms = Vec::<Platform>::deserialize(deserializer)?;
    Ok(platforms.into_iter().filter(|p| !p.is_blank()).collect())
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "linkedin" => Platform::Linkedin,
            "twitter" | "x" => Platform::Twitter,
            "facebook" => Platform::Facebook,
            "youtube" => Platform::Youtube,
            "tiktok" => Platform::Tiktok,
            "reddit" => Platform::Reddit,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Platform::from(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    /// Handed to a publisher, outcome not yet known
    Pending,
    Published,
    Failed,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Pending => "pending",
            PostStatus::Published => "published",
            PostStatus::Failed => "failed",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "scheduled" => Ok(PostStatus::Scheduled),
            "pending" => Ok(PostStatus::Pending),
            "published" => Ok(PostStatus::Published),
            "failed" => Ok(PostStatus::Failed),
            "archived" => Ok(PostStatus::Archived),
            other => Err(format!("unknown post status '{}'", other)),
        }
    }
}

/// How a recurring post repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    /// Repeats on an explicit set of weekdays
    Custom,
}

impl FromStr for RecurrenceRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RecurrenceRule::None),
            "daily" => Ok(RecurrenceRule::Daily),
            "weekly" => Ok(RecurrenceRule::Weekly),
            "monthly" => Ok(RecurrenceRule::Monthly),
            "custom" => Ok(RecurrenceRule::Custom),
            other => Err(format!("unknown recurrence rule '{}'", other)),
        }
    }
}

/// Display and sort hint; has no effect on scheduling
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// Day of the week, ordered Sunday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Column index in a Sunday-first calendar
    pub fn index(self) -> u8 {
        self.to_weekday().number_days_from_sunday()
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            DayOfWeek::Sunday => Weekday::Sunday,
            DayOfWeek::Monday => Weekday::Monday,
            DayOfWeek::Tuesday => Weekday::Tuesday,
            DayOfWeek::Wednesday => Weekday::Wednesday,
            DayOfWeek::Thursday => Weekday::Thursday,
            DayOfWeek::Friday => Weekday::Friday,
            DayOfWeek::Saturday => Weekday::Saturday,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sunday => DayOfWeek::Sunday,
            Weekday::Monday => DayOfWeek::Monday,
            Weekday::Tuesday => DayOfWeek::Tuesday,
            Weekday::Wednesday => DayOfWeek::Wednesday,
            Weekday::Thursday => DayOfWeek::Thursday,
            Weekday::Friday => DayOfWeek::Friday,
            Weekday::Saturday => DayOfWeek::Saturday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(DayOfWeek::Sunday),
            "monday" | "mon" => Ok(DayOfWeek::Monday),
            "tuesday" | "tue" => Ok(DayOfWeek::Tuesday),
            "wednesday" | "wed" => Ok(DayOfWeek::Wednesday),
            "thursday" | "thu" => Ok(DayOfWeek::Thursday),
            "friday" | "fri" => Ok(DayOfWeek::Friday),
            "saturday" | "sat" => Ok(DayOfWeek::Saturday),
            other => Err(format!("unknown weekday '{}'", other)),
        }
    }
}

fn default_timezone() -> String {
    "EST".to_string()
}

/// User-editable fields of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_platforms")]
    pub platforms: BTreeSet<Platform>,
    /// Wall-clock publish time; no timezone conversion is applied
    #[serde(default, with = "wall_clock::option")]
    pub scheduled_at: Option<PrimitiveDateTime>,
    /// Display-only timezone label
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub recurrence_rule: RecurrenceRule,
    #[serde(default)]
    pub recurrence_days: BTreeSet<DayOfWeek>,
    #[serde(default, with = "calendar_date::option")]
    pub recurrence_end_date: Option<Date>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Default for PostBody {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            platforms: BTreeSet::new(),
            scheduled_at: None,
            timezone: default_timezone(),
            recurring: false,
            recurrence_rule: RecurrenceRule::None,
            recurrence_days: BTreeSet::new(),
            recurrence_end_date: None,
            priority: Priority::Medium,
            tags: BTreeSet::new(),
        }
    }
}

impl PostBody {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.insert(platform);
        self
    }

    pub fn scheduled_for(mut self, at: PrimitiveDateTime) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn repeating(
        mut self,
        rule: RecurrenceRule,
        days: impl IntoIterator<Item = DayOfWeek>,
    ) -> Self {
        self.recurring = rule != RecurrenceRule::None;
        self.recurrence_rule = rule;
        self.recurrence_days = days.into_iter().collect();
        self
    }
}

/// A post held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub status: PostStatus,
    #[serde(flatten)]
    pub body: PostBody,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Post {
    pub fn scheduled_at(&self) -> Option<PrimitiveDateTime> {
        self.body.scheduled_at
    }

    /// Calendar day the post falls on
    pub fn scheduled_date(&self) -> Option<Date> {
        self.body.scheduled_at.map(|at| at.date())
    }

    /// Copy of this post with the patch applied; id and timestamps untouched
    pub fn merged(&self, patch: &PostPatch) -> Post {
        let mut post = self.clone();
        patch.apply_to(&mut post);
        post
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    /// Requested id; the store assigns one when absent
    #[serde(default)]
    pub id: Option<PostId>,
    /// Requested status; absent means the store decides
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(flatten)]
    pub body: PostBody,
}

impl PostDraft {
    /// Status the post will be committed with.
    ///
    /// Without an explicit status a post becomes `scheduled` once it has a
    /// publish time and stays a `draft` otherwise.
    pub fn target_status(&self) -> PostStatus {
        match self.status {
            Some(status) => status,
            None if self.body.scheduled_at.is_some() => PostStatus::Scheduled,
            None => PostStatus::Draft,
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = Some(id);
        self
    }

    /// Draft copying an existing post's body, with id and status cleared
    pub fn duplicate_of(post: &Post) -> Self {
        Self {
            id: None,
            status: None,
            body: post.body.clone(),
        }
    }
}

impl From<PostBody> for PostDraft {
    fn from(body: PostBody) -> Self {
        Self {
            id: None,
            status: None,
            body,
        }
    }
}

/// Partial update; only the fields that are set are replaced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub platforms: Option<BTreeSet<Platform>>,
    /// `Some(None)` clears the publish time
    pub scheduled_at: Option<Option<PrimitiveDateTime>>,
    pub timezone: Option<String>,
    pub recurring: Option<bool>,
    pub recurrence_rule: Option<RecurrenceRule>,
    pub recurrence_days: Option<BTreeSet<DayOfWeek>>,
    pub recurrence_end_date: Option<Option<Date>>,
    pub priority: Option<Priority>,
    pub tags: Option<BTreeSet<String>>,
    pub status: Option<PostStatus>,
}

impl PostPatch {
    /// Patch that only moves the publish time
    pub fn reschedule(at: PrimitiveDateTime) -> Self {
        Self {
            scheduled_at: Some(Some(at)),
            ..Default::default()
        }
    }

    pub fn status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == PostPatch::default()
    }

    fn apply_to(&self, post: &mut Post) {
        let body = &mut post.body;
        if let Some(title) = &self.title {
            body.title = title.clone();
        }
        if let Some(content) = &self.content {
            body.content = content.clone();
        }
        if let Some(platforms) = &self.platforms {
            body.platforms = platforms.clone();
        }
        if let Some(at) = self.scheduled_at {
            body.scheduled_at = at;
        }
        if let Some(timezone) = &self.timezone {
            body.timezone = timezone.clone();
        }
        if let Some(recurring) = self.recurring {
            body.recurring = recurring;
        }
        if let Some(rule) = self.recurrence_rule {
            body.recurrence_rule = rule;
        }
        if let Some(days) = &self.recurrence_days {
            body.recurrence_days = days.clone();
        }
        if let Some(end) = self.recurrence_end_date {
            body.recurrence_end_date = end;
        }
        if let Some(priority) = self.priority {
            body.priority = priority;
        }
        if let Some(tags) = &self.tags {
            body.tags = tags.clone();
        }
        if let Some(status) = self.status {
            post.status = status;
        }
    }
}

/// Raw scheduling form input, as submitted by a UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleForm {
    pub title: String,
    pub content: String,
    pub platforms: Vec<Platform>,
    /// `YYYY-MM-DD`
    pub scheduled_date: String,
    /// `HH:MM`
    pub scheduled_time: String,
    pub timezone: Option<String>,
    pub recurring: bool,
    pub recurrence_rule: RecurrenceRule,
    pub recurrence_days: Vec<DayOfWeek>,
    /// `YYYY-MM-DD`, empty when unbounded
    pub end_date: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    /// Save without scheduling checks
    pub save_as_draft: bool,
}

impl ScheduleForm {
    /// Combined date and time, or `None` when either is missing or malformed
    pub fn scheduled_at(&self) -> Option<PrimitiveDateTime> {
        let date = calendar_date::parse(self.scheduled_date.trim()).ok()?;
        let time = wall_clock::parse_time(self.scheduled_time.trim()).ok()?;
        Some(PrimitiveDateTime::new(date, time))
    }

    pub fn body(&self) -> PostBody {
        let end_date = self.end_date.trim();
        PostBody {
            title: self.title.clone(),
            content: self.content.clone(),
            platforms: self
                .platforms
                .iter()
                .filter(|p| !p.is_blank())
                .cloned()
                .collect(),
            scheduled_at: self.scheduled_at(),
            timezone: self.timezone.clone().unwrap_or_else(default_timezone),
            recurring: self.recurring,
            recurrence_rule: self.recurrence_rule,
            recurrence_days: self.recurrence_days.iter().copied().collect(),
            recurrence_end_date: if end_date.is_empty() {
                None
            } else {
                calendar_date::parse(end_date).ok()
            },
            priority: self.priority,
            tags: self
                .tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// A submitted form always asks for `scheduled` unless saved as a draft
    pub fn into_draft(self) -> PostDraft {
        let status = if self.save_as_draft {
            PostStatus::Draft
        } else {
            PostStatus::Scheduled
        };
        PostDraft {
            id: None,
            status: Some(status),
            body: self.body(),
        }
    }

    /// Patch replacing every editable field, for the edit flow.
    ///
    /// A missing or malformed date or time clears the publish time, so the
    /// store reports `MissingDateTime` instead of keeping the old one.
    pub fn into_patch(self) -> PostPatch {
        let body = self.body();
        PostPatch {
            title: Some(body.title),
            content: Some(body.content),
            platforms: Some(body.platforms),
            scheduled_at: Some(body.scheduled_at),
            timezone: Some(body.timezone),
            recurring: Some(body.recurring),
            recurrence_rule: Some(body.recurrence_rule),
            recurrence_days: Some(body.recurrence_days),
            recurrence_end_date: Some(body.recurrence_end_date),
            priority: Some(body.priority),
            tags: Some(body.tags),
            status: Some(if self.save_as_draft {
                PostStatus::Draft
            } else {
                PostStatus::Scheduled
            }),
        }
    }
}

/// `YYYY-MM-DDTHH:MM[:SS]` wall-clock timestamps
pub mod wall_clock {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::macros::format_description;
    use time::{PrimitiveDateTime, Time};

    pub fn parse(s: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day]T[hour]:[minute][optional [:[second]]]"),
        )
    }

    pub fn format(at: &PrimitiveDateTime) -> Result<String, time::error::Format> {
        at.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]"
        ))
    }

    /// `HH:MM` as entered in a time picker
    pub fn parse_time(s: &str) -> Result<Time, time::error::Parse> {
        Time::parse(s, format_description!("[hour]:[minute]"))
    }

    pub fn serialize<S: Serializer>(
        at: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = format(at).map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::PrimitiveDateTime;

        pub fn serialize<S: Serializer>(
            at: &Option<PrimitiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => {
                    let text =
                        super::format(at).map_err(<S::Error as serde::ser::Error>::custom)?;
                    serializer.serialize_some(&text)
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<PrimitiveDateTime>, D::Error> {
            let text: Option<String> = Option::deserialize(deserializer)?;
            text.filter(|t| !t.trim().is_empty())
                .map(|t| super::parse(t.trim()).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// `YYYY-MM-DD` calendar dates
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::macros::format_description;

    pub fn parse(s: &str) -> Result<Date, time::error::Parse> {
        Date::parse(s, format_description!("[year]-[month]-[day]"))
    }

    pub fn format(date: &Date) -> Result<String, time::error::Format> {
        date.format(format_description!("[year]-[month]-[day]"))
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = format(date).map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => {
                    let text =
                        super::format(date).map_err(<S::Error as serde::ser::Error>::custom)?;
                    serializer.serialize_some(&text)
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let text: Option<String> = Option::deserialize(deserializer)?;
            text.filter(|t| !t.trim().is_empty())
                .map(|t| super::parse(t.trim()).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
