use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Schema constraint names, shared by every store so callers see the same refusal.
pub const END_AFTER_START_CONSTRAINT: &str = "events_end_after_start_check";
pub const VENUE_FOREIGN_KEY: &str = "events_venue_id_fkey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,

    pub title: String,

    pub description: Option<String>,

    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,

    /// IANA zone name; display only.
    pub timezone: String,

    pub city: Option<String>,

    pub location_text: Option<String>,

    pub genre_tags: Vec<String>,
    pub vibe_tags: Vec<String>,

    pub venue_id: Option<Uuid>,

    pub performer_text: Option<String>,
    pub venue_text: Option<String>,

    pub status: EventStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_schedule"))]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 80))]
    pub timezone: String,

    #[validate(length(max = 120))]
    pub city: Option<String>,

    #[validate(length(max = 240))]
    pub location_text: Option<String>,

    #[serde(default)]
    pub genre_tags: Vec<String>,
    #[serde(default)]
    pub vibe_tags: Vec<String>,

    pub venue_id: Option<Uuid>,

    #[validate(length(max = 240))]
    pub performer_text: Option<String>,

    #[validate(length(max = 240))]
    pub venue_text: Option<String>,

    pub status: Option<EventStatus>,
}

/// Partial update. For nullable columns the outer `Option` is "field present",
/// the inner one is the new value (`null` clears the column).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_schedule"))]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 5000))]
    pub description: Option<Option<String>>,

    pub start_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "nullable")]
    pub end_at: Option<Option<DateTime<Utc>>>,

    #[validate(length(min = 1, max = 80))]
    pub timezone: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 120))]
    pub city: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 240))]
    pub location_text: Option<Option<String>>,

    pub genre_tags: Option<Vec<String>>,
    pub vibe_tags: Option<Vec<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub venue_id: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 240))]
    pub performer_text: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 240))]
    pub venue_text: Option<Option<String>>,

    pub status: Option<EventStatus>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_create_schedule(event: &CreateEvent) -> Result<(), validator::ValidationError> {
    check_schedule(Some(event.start_at), event.end_at)
}

// Only a payload carrying both bounds is checked here. A lone start_at is
// checked against the stored end_at by the store.
fn validate_update_schedule(update: &UpdateEvent) -> Result<(), validator::ValidationError> {
    match (update.start_at, update.end_at) {
        (Some(start_at), Some(end_at)) => check_schedule(Some(start_at), end_at),
        _ => Ok(()),
    }
}

fn check_schedule(
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
) -> Result<(), validator::ValidationError> {
    if let (Some(start_at), Some(end_at)) = (start_at, end_at) {
        if end_at < start_at {
            let mut err = validator::ValidationError::new("end_before_start");
            err.message = Some("end_at must be >= start_at".into());
            return Err(err);
        }
    }
    Ok(())
}

/// Trims a free-form value; blank becomes `None`.
pub fn sanitize_nullable(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims and lower-cases tags, dropping blanks and collapsing duplicates.
pub fn sanitize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl Event {
    pub fn new(create: CreateEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: create.title.trim().to_string(),
            description: sanitize_nullable(create.description),
            start_at: create.start_at,
            end_at: create.end_at,
            timezone: create.timezone,
            city: sanitize_nullable(create.city),
            location_text: sanitize_nullable(create.location_text),
            genre_tags: sanitize_tags(create.genre_tags),
            vibe_tags: sanitize_tags(create.vibe_tags),
            venue_id: create.venue_id,
            performer_text: sanitize_nullable(create.performer_text),
            venue_text: sanitize_nullable(create.venue_text),
            status: create.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// `end_at`, when set, is not before `start_at`.
    pub fn has_valid_schedule(&self) -> bool {
        self.end_at.map_or(true, |end_at| end_at >= self.start_at)
    }

    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = sanitize_nullable(description);
        }
        if let Some(start_at) = update.start_at {
            self.start_at = start_at;
        }
        if let Some(end_at) = update.end_at {
            self.end_at = end_at;
        }
        if let Some(timezone) = update.timezone {
            self.timezone = timezone;
        }
        if let Some(city) = update.city {
            self.city = sanitize_nullable(city);
        }
        if let Some(location_text) = update.location_text {
            self.location_text = sanitize_nullable(location_text);
        }
        if let Some(genre_tags) = update.genre_tags {
            self.genre_tags = sanitize_tags(genre_tags);
        }
        if let Some(vibe_tags) = update.vibe_tags {
            self.vibe_tags = sanitize_tags(vibe_tags);
        }
        if let Some(venue_id) = update.venue_id {
            self.venue_id = venue_id;
        }
        if let Some(performer_text) = update.performer_text {
            self.performer_text = sanitize_nullable(performer_text);
        }
        if let Some(venue_text) = update.venue_text {
            self.venue_text = sanitize_nullable(venue_text);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
