//! Domain records exchanged with the service.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// The account behind a set of credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// One hit from the anime search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimeSearchResult {
    pub id: u64,
    pub title: String,
    pub english: String,
    pub synonyms: String,
    pub episodes: u32,
    pub media_type: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub synopsis: String,
    pub image_url: String,
}

/// A user's complete anime list together with the counters the service
/// reports alongside it.
///
/// The counters are informational and are not checked against `entries`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub user_id: u64,
    pub username: String,
    pub watching: u32,
    pub completed: u32,
    pub on_hold: u32,
    pub dropped: u32,
    pub plan_to_watch: u32,
    pub days_watched: f64,
    pub entries: Vec<ListEntry>,
}

/// One title in a user's list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub series_id: u64,
    pub series_title: String,
    pub series_synonyms: String,
    pub series_type: i32,
    pub series_episodes: u32,
    pub series_status: i32,
    pub series_start: Option<NaiveDate>,
    pub series_end: Option<NaiveDate>,
    pub series_image: String,
    pub my_id: u64,
    pub watched_episodes: u32,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub score: u32,
    pub status: ListStatus,
    pub rewatch: RewatchValue,
    pub rewatching_episode: u32,
    pub last_updated: DateTime<Utc>,
    pub tags: String,
}

impl ListEntry {
    /// Split the free-text tag string on commas.
    ///
    /// Tags are stored comma-joined, so a tag that itself contains a comma
    /// comes back as two tags.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// A list-entry status code as the service reports it.
///
/// Codes outside the known set are kept as-is and display as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListStatus(pub i32);

impl ListStatus {
    pub const WATCHING: Self = Self(1);
    pub const COMPLETED: Self = Self(2);
    pub const ON_HOLD: Self = Self(3);
    pub const DROPPED: Self = Self(4);
    pub const PLAN_TO_WATCH: Self = Self(6);

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Watching",
            2 => "Completed",
            3 => "On Hold",
            4 => "Dropped",
            6 => "Plan to Watch",
            _ => "Unknown",
        }
    }

    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How much the user would enjoy rewatching a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RewatchValue(pub i32);

impl RewatchValue {
    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Very Low",
            2 => "Low",
            3 => "Medium",
            4 => "High",
            5 => "Very High",
            _ => "None",
        }
    }

    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RewatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The status field of an outbound update.
///
/// The service accepts either the numeric code or its lowercase keyword
/// (`watching`, `completed`, `onhold`, `dropped`, `plantowatch`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UpdateStatus {
    Code(i32),
    Name(String),
}

impl Default for UpdateStatus {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

impl From<ListStatus> for UpdateStatus {
    fn from(status: ListStatus) -> Self {
        Self::Code(status.0)
    }
}

impl From<&str> for UpdateStatus {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for UpdateStatus {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Desired state of a list entry, sent on add and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryUpdate {
    pub episode: u32,
    pub status: UpdateStatus,
    pub score: u32,
    pub storage_type: i32,
    pub storage_value: f64,
    pub times_rewatched: u32,
    pub rewatch_value: i32,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub priority: i32,
    pub enable_discussion: bool,
    pub enable_rewatching: bool,
    pub comments: String,
    pub fansub_group: String,
    pub tags: Vec<String>,
}
