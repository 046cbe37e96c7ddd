use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Event, UpdateEvent, Venue};
use crate::search::Predicate;

/// Read side used by search. Results of `find` are ordered by `start_at`,
/// then `title`, then `id`.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find(
        &self,
        predicate: &Predicate,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Event>, StoreError>;

    async fn count(&self, predicate: &Predicate) -> Result<i64, StoreError>;

    async fn venue_by_id(&self, id: Uuid) -> Result<Option<Venue>, StoreError>;
}

#[async_trait]
pub trait EventRepository: EventStore {
    async fn create(&self, event: &Event) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError>;

    /// Applies a partial update and refreshes `updated_at`. `None` when the event does not exist.
    async fn update(&self, id: Uuid, update: UpdateEvent) -> Result<Option<Event>, StoreError>;

    async fn create_venue(&self, venue: &Venue) -> Result<(), StoreError>;

    /// Deletes a venue and clears `venue_id` on events that referenced it.
    async fn delete_venue(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
