use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,

    pub home_city: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,

    /// Cities the user wants events from besides `home_city`.
    pub relevant_cities: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A genre or vibe. `code` is the value stored in event tag arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Label {
    pub code: String,
    pub label: String,
}

/// Join rows for one event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventLinks {
    pub event_id: Uuid,
    pub artist_ids: Vec<Uuid>,
    pub genre_codes: Vec<String>,
    pub vibe_codes: Vec<String>,
}
