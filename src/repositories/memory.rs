use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::event::{END_AFTER_START_CONSTRAINT, VENUE_FOREIGN_KEY};
use crate::models::{Event, UpdateEvent, Venue};
use crate::search::predicate::compare_events;
use crate::search::Predicate;

use super::{EventRepository, EventStore};

/// Process-local store for development and tests. Evaluates predicates in Rust.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
    venues: Arc<RwLock<HashMap<Uuid, Venue>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(venues: Vec<Venue>, events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events.into_iter().map(|e| (e.id, e)).collect())),
            venues: Arc::new(RwLock::new(venues.into_iter().map(|v| (v.id, v)).collect())),
        }
    }

    async fn matching(&self, predicate: &Predicate) -> Vec<Event> {
        let events = self.events.read().await;
        let venues = self.venues.read().await;

        events
            .values()
            .filter(|event| {
                let venue = event.venue_id.and_then(|id| venues.get(&id));
                predicate.matches(event, venue)
            })
            .cloned()
            .collect()
    }
}

/// Checks the constraints the SQL schema puts on an event row.
fn check_constraints(event: &Event, venues: &HashMap<Uuid, Venue>) -> Result<(), StoreError> {
    if !event.has_valid_schedule() {
        return Err(StoreError::Constraint(END_AFTER_START_CONSTRAINT.to_string()));
    }
    if event.venue_id.is_some_and(|id| !venues.contains_key(&id)) {
        return Err(StoreError::Constraint(VENUE_FOREIGN_KEY.to_string()));
    }
    Ok(())
}

#[async_trait]
impl EventStore for InMemoryEventRepository {
    async fn find(
        &self,
        predicate: &Predicate,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Event>, StoreError> {
        let mut result = self.matching(predicate).await;
        result.sort_by(compare_events);

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(result
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, predicate: &Predicate) -> Result<i64, StoreError> {
        Ok(self.matching(predicate).await.len() as i64)
    }

    async fn venue_by_id(&self, id: Uuid) -> Result<Option<Venue>, StoreError> {
        Ok(self.venues.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: &Event) -> Result<(), StoreError> {
        let mut events = self.events.write().await;
        check_constraints(event, &*self.venues.read().await)?;

        events.insert(event.id, event.clone());
        tracing::info!(event_id = %event.id, "Created event");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, update: UpdateEvent) -> Result<Option<Event>, StoreError> {
        let mut events = self.events.write().await;
        let Some(event) = events.get_mut(&id) else {
            return Ok(None);
        };

        let mut updated = event.clone();
        updated.apply_update(update);
        check_constraints(&updated, &*self.venues.read().await)?;

        *event = updated.clone();
        tracing::info!(event_id = %id, "Updated event");
        Ok(Some(updated))
    }

    async fn create_venue(&self, venue: &Venue) -> Result<(), StoreError> {
        self.venues.write().await.insert(venue.id, venue.clone());
        Ok(())
    }

    async fn delete_venue(&self, id: Uuid) -> Result<bool, StoreError> {
        // Same lock order as `matching`: events, then venues.
        let mut events = self.events.write().await;
        let mut venues = self.venues.write().await;
        if venues.remove(&id).is_none() {
            return Ok(false);
        }

        for event in events.values_mut().filter(|e| e.venue_id == Some(id)) {
            event.venue_id = None;
        }

        tracing::info!(venue_id = %id, "Deleted venue");
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
