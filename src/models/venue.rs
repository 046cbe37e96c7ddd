use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub address_text: String,

    /// WGS84 decimal degrees.
    pub latitude: f64,
    pub longitude: f64,

    pub website_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVenue {
    pub id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub city: String,

    pub address_text: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub website_url: Option<String>,
}

impl Venue {
    pub fn new(create: CreateVenue) -> Self {
        let now = Utc::now();
        Self {
            id: create.id.unwrap_or_else(Uuid::new_v4),
            name: create.name,
            city: create.city,
            address_text: create.address_text,
            latitude: create.latitude,
            longitude: create.longitude,
            website_url: create.website_url,
            created_at: now,
            updated_at: now,
        }
    }
}
