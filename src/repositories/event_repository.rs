use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::event::{sanitize_nullable, sanitize_tags};
use crate::models::{Event, UpdateEvent, Venue};
use crate::search::geo::{EARTH_RADIUS_KM, RADIUS_TOLERANCE_KM};
use crate::search::predicate::Clause;
use crate::search::Predicate;

use super::{EventRepository, EventStore};

// Same projection and split as `text::searchable_text` + `text::tokenize`.
const SEARCHABLE_TOKENS: &str = "regexp_split_to_array(lower(coalesce(e.title, '') || ' ' || coalesce(e.description, '') || ' ' || coalesce(e.performer_text, '') || ' ' || coalesce(e.venue_text, '')), '[^[:alnum:]]+')";

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert_venue(&self, venue: &Venue) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO venues (id, name, city, address_text, latitude, longitude, website_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                city = EXCLUDED.city,
                address_text = EXCLUDED.address_text,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                website_url = EXCLUDED.website_url,
                updated_at = NOW()"
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.address_text)
        .bind(venue.latitude)
        .bind(venue.longitude)
        .bind(&venue.website_url)
        .bind(venue.created_at)
        .bind(venue.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_event(&self, event: &Event) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO events (id, title, description, start_at, end_at, timezone, city, location_text, genre_tags, vibe_tags, venue_id, performer_text, venue_text, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                start_at = EXCLUDED.start_at,
                end_at = EXCLUDED.end_at,
                timezone = EXCLUDED.timezone,
                city = EXCLUDED.city,
                location_text = EXCLUDED.location_text,
                genre_tags = EXCLUDED.genre_tags,
                vibe_tags = EXCLUDED.vibe_tags,
                venue_id = EXCLUDED.venue_id,
                performer_text = EXCLUDED.performer_text,
                venue_text = EXCLUDED.venue_text,
                status = EXCLUDED.status,
                updated_at = NOW()"
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(&event.timezone)
        .bind(&event.city)
        .bind(&event.location_text)
        .bind(&event.genre_tags)
        .bind(&event.vibe_tags)
        .bind(event.venue_id)
        .bind(&event.performer_text)
        .bind(&event.venue_text)
        .bind(event.status)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    builder.push(" WHERE TRUE");

    for clause in predicate.clauses() {
        builder.push(" AND ");

        match clause {
            Clause::Text(terms) if terms.is_empty() => {
                builder.push("FALSE");
            }
            Clause::Text(terms) => {
                builder.push(SEARCHABLE_TOKENS);
                builder.push(" && ");
                builder.push_bind(terms.iter().cloned().collect::<Vec<_>>());
                builder.push("::text[]");
            }
            Clause::City(city) => {
                builder.push("e.city = ");
                builder.push_bind(city.clone());
            }
            Clause::StartsAtOrAfter(from) => {
                builder.push("e.start_at >= ");
                builder.push_bind(*from);
            }
            Clause::StartsAtOrBefore(to) => {
                builder.push("e.start_at <= ");
                builder.push_bind(*to);
            }
            Clause::GenreAny(tags) => {
                builder.push("e.genre_tags && ");
                builder.push_bind(tags.iter().cloned().collect::<Vec<_>>());
                builder.push("::text[]");
            }
            Clause::VibeAny(tags) => {
                builder.push("e.vibe_tags && ");
                builder.push_bind(tags.iter().cloned().collect::<Vec<_>>());
                builder.push("::text[]");
            }
            Clause::WithinRadius { origin, radius_km } => {
                builder.push("EXISTS (SELECT 1 FROM venues v WHERE v.id = e.venue_id AND ");
                builder.push_bind(EARTH_RADIUS_KM);
                builder.push(" * acos(LEAST(1.0, GREATEST(-1.0, cos(radians(");
                builder.push_bind(origin.lat);
                builder.push(")) * cos(radians(v.latitude)) * cos(radians(v.longitude) - radians(");
                builder.push_bind(origin.lng);
                builder.push(")) + sin(radians(");
                builder.push_bind(origin.lat);
                builder.push(")) * sin(radians(v.latitude))))) <= ");
                builder.push_bind(*radius_km + RADIUS_TOLERANCE_KM);
                builder.push(")");
            }
        }
    }
}

#[async_trait]
impl EventStore for PgEventRepository {
    async fn find(
        &self,
        predicate: &Predicate,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Event>, StoreError> {
        let mut query_builder = QueryBuilder::new("SELECT e.* FROM events e");
        push_predicate(&mut query_builder, predicate);

        query_builder.push(" ORDER BY e.start_at ASC, e.title COLLATE \"C\" ASC, e.id ASC LIMIT ");
        query_builder.push_bind(i64::from(limit));
        query_builder.push(" OFFSET ");
        query_builder.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let events = query_builder
            .build_query_as::<Event>()
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn count(&self, predicate: &Predicate) -> Result<i64, StoreError> {
        let mut query_builder = QueryBuilder::new("SELECT COUNT(*) FROM events e");
        push_predicate(&mut query_builder, predicate);

        let (count,): (i64,) = query_builder
            .build_query_as()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn venue_by_id(&self, id: Uuid) -> Result<Option<Venue>, StoreError> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(venue)
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, event: &Event) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO events (id, title, description, start_at, end_at, timezone, city, location_text, genre_tags, vibe_tags, venue_id, performer_text, venue_text, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(&event.timezone)
        .bind(&event.city)
        .bind(&event.location_text)
        .bind(&event.genre_tags)
        .bind(&event.vibe_tags)
        .bind(event.venue_id)
        .bind(&event.performer_text)
        .bind(&event.venue_text)
        .bind(event.status)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn update(&self, id: Uuid, update: UpdateEvent) -> Result<Option<Event>, StoreError> {
        let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE events SET updated_at = NOW()");

        if let Some(title) = update.title {
            query_builder.push(", title = ");
            query_builder.push_bind(title.trim().to_string());
        }
        if let Some(description) = update.description {
            query_builder.push(", description = ");
            query_builder.push_bind(sanitize_nullable(description));
        }
        if let Some(start_at) = update.start_at {
            query_builder.push(", start_at = ");
            query_builder.push_bind(start_at);
        }
        if let Some(end_at) = update.end_at {
            query_builder.push(", end_at = ");
            query_builder.push_bind(end_at);
        }
        if let Some(timezone) = update.timezone {
            query_builder.push(", timezone = ");
            query_builder.push_bind(timezone);
        }
        if let Some(city) = update.city {
            query_builder.push(", city = ");
            query_builder.push_bind(sanitize_nullable(city));
        }
        if let Some(location_text) = update.location_text {
            query_builder.push(", location_text = ");
            query_builder.push_bind(sanitize_nullable(location_text));
        }
        if let Some(genre_tags) = update.genre_tags {
            query_builder.push(", genre_tags = ");
            query_builder.push_bind(sanitize_tags(genre_tags));
        }
        if let Some(vibe_tags) = update.vibe_tags {
            query_builder.push(", vibe_tags = ");
            query_builder.push_bind(sanitize_tags(vibe_tags));
        }
        if let Some(venue_id) = update.venue_id {
            query_builder.push(", venue_id = ");
            query_builder.push_bind(venue_id);
        }
        if let Some(performer_text) = update.performer_text {
            query_builder.push(", performer_text = ");
            query_builder.push_bind(sanitize_nullable(performer_text));
        }
        if let Some(venue_text) = update.venue_text {
            query_builder.push(", venue_text = ");
            query_builder.push_bind(sanitize_nullable(venue_text));
        }
        if let Some(status) = update.status {
            query_builder.push(", status = ");
            query_builder.push_bind(status);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(" RETURNING *");

        let event = query_builder
            .build_query_as::<Event>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn create_venue(&self, venue: &Venue) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO venues (id, name, city, address_text, latitude, longitude, website_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.address_text)
        .bind(venue.latitude)
        .bind(venue.longitude)
        .bind(&venue.website_url)
        .bind(venue.created_at)
        .bind(venue.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_venue(&self, id: Uuid) -> Result<bool, StoreError> {
        // events.venue_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, SearchFilter};

    fn sql_for(filter: &SearchFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM events e");
        push_predicate(&mut builder, &Predicate::from_filter(filter));
        builder.sql().to_string()
    }

    #[test]
    fn test_match_all_has_no_clauses() {
        assert_eq!(
            sql_for(&SearchFilter::default()),
            "SELECT COUNT(*) FROM events e WHERE TRUE"
        );
    }

    #[test]
    fn test_clauses_use_bind_parameters() {
        let sql = sql_for(&SearchFilter {
            text: Some("o'brien; DROP TABLE events".to_string()),
            city: Some("New York".to_string()),
            genre: ["rock".to_string()].into(),
            origin: Some(GeoPoint { lat: 40.75, lng: -73.99 }),
            ..Default::default()
        });

        assert!(sql.contains("'[^[:alnum:]]+') && $1::text[]"));
        assert!(sql.contains("e.city = $2"));
        assert!(sql.contains("e.genre_tags && $3::text[]"));
        assert!(sql.contains("EXISTS (SELECT 1 FROM venues v WHERE v.id = e.venue_id"));
        assert!(sql.ends_with("<= $8)"));
        assert!(!sql.contains("DROP"));
        assert!(!sql.contains("New York"));
    }

    #[test]
    fn test_text_clause_splits_like_tokenize() {
        let pattern = format!("'{}'", crate::search::text::TOKEN_SEPARATOR_PATTERN);
        assert!(SEARCHABLE_TOKENS.contains(&pattern));
        assert!(SEARCHABLE_TOKENS.starts_with("regexp_split_to_array(lower("));
    }

    #[test]
    fn test_query_without_tokens_matches_nothing() {
        let sql = sql_for(&SearchFilter {
            text: Some("!!!".to_string()),
            ..Default::default()
        });

        assert!(sql.ends_with("WHERE TRUE AND FALSE"));
    }
}
