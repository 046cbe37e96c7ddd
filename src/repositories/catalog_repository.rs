use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Artist, EventLinks, Label, User};

/// Users, artists, genres, vibes and the event join tables.
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, display_name, home_city, home_latitude, home_longitude, relevant_cities, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                home_city = EXCLUDED.home_city,
                home_latitude = EXCLUDED.home_latitude,
                home_longitude = EXCLUDED.home_longitude,
                relevant_cities = EXCLUDED.relevant_cities,
                updated_at = NOW()"
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(&user.home_city)
        .bind(user.home_latitude)
        .bind(user.home_longitude)
        .bind(&user.relevant_cities)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_artist(&self, artist: &Artist) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO artists (id, name, genres, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                genres = EXCLUDED.genres,
                updated_at = NOW()"
        )
        .bind(artist.id)
        .bind(&artist.name)
        .bind(&artist.genres)
        .bind(artist.created_at)
        .bind(artist.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_genre(&self, genre: &Label) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO genres (code, label) VALUES ($1, $2)
             ON CONFLICT (code) DO UPDATE SET label = EXCLUDED.label"
        )
        .bind(&genre.code)
        .bind(&genre.label)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_vibe(&self, vibe: &Label) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO vibes (code, label) VALUES ($1, $2)
             ON CONFLICT (code) DO UPDATE SET label = EXCLUDED.label"
        )
        .bind(&vibe.code)
        .bind(&vibe.label)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces every join row of `links.event_id` in one transaction.
    pub async fn replace_event_links(&self, links: &EventLinks) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for statement in [
            "DELETE FROM event_artists WHERE event_id = $1",
            "DELETE FROM event_genres WHERE event_id = $1",
            "DELETE FROM event_vibes WHERE event_id = $1",
        ] {
            sqlx::query(statement)
                .bind(links.event_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "INSERT INTO event_artists (event_id, artist_id)
             SELECT $1, artist_id FROM UNNEST($2::uuid[]) AS artist_id
             ON CONFLICT DO NOTHING",
        )
        .bind(links.event_id)
        .bind(&links.artist_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO event_genres (event_id, genre_code)
             SELECT $1, genre_code FROM UNNEST($2::text[]) AS genre_code
             ON CONFLICT DO NOTHING",
        )
        .bind(links.event_id)
        .bind(&links.genre_codes)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO event_vibes (event_id, vibe_code)
             SELECT $1, vibe_code FROM UNNEST($2::text[]) AS vibe_code
             ON CONFLICT DO NOTHING",
        )
        .bind(links.event_id)
        .bind(&links.vibe_codes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Join rows of one event, each list in a stable order.
    pub async fn event_links(&self, event_id: Uuid) -> Result<EventLinks, StoreError> {
        let artist_ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT artist_id FROM event_artists WHERE event_id = $1 ORDER BY artist_id",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let genre_codes: Vec<String> = sqlx::query_scalar(
            "SELECT genre_code FROM event_genres WHERE event_id = $1 ORDER BY genre_code",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let vibe_codes: Vec<String> = sqlx::query_scalar(
            "SELECT vibe_code FROM event_vibes WHERE event_id = $1 ORDER BY vibe_code",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(EventLinks {
            event_id,
            artist_ids,
            genre_codes,
            vibe_codes,
        })
    }

    pub async fn artists_for_event(&self, event_id: Uuid) -> Result<Vec<Artist>, StoreError> {
        let artists = sqlx::query_as::<_, Artist>(
            "SELECT a.* FROM artists a
             JOIN event_artists ea ON ea.artist_id = a.id
             WHERE ea.event_id = $1
             ORDER BY a.name",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(artists)
    }

    pub async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
