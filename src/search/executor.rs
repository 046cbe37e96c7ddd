use tracing::{debug, warn};

use crate::error::SearchError;
use crate::models::{SearchFilter, SearchPage};
use crate::repositories::EventStore;

use super::Predicate;

/// Runs a canonical filter against an [`EventStore`].
///
/// The page and the total are two independent reads over the same predicate.
/// They are not taken from one snapshot, so a concurrent write can make them
/// disagree briefly. Either read failing fails the whole search.
pub struct SearchExecutor<'a, S: EventStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: EventStore + ?Sized> SearchExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn execute(&self, filter: &SearchFilter) -> Result<SearchPage, SearchError> {
        let predicate = Predicate::from_filter(filter);
        debug!(
            "Searching events with {} clause(s), limit {}, offset {}",
            predicate.clauses().len(),
            filter.limit,
            filter.offset
        );

        let (items, total) = tokio::try_join!(
            self.store.find(&predicate, filter.limit, filter.offset),
            self.store.count(&predicate),
        )
        .map_err(|err| {
            warn!("Event search failed: {}", err);
            err
        })?;

        debug!("Search matched {} event(s), returning {}", total, items.len());

        Ok(SearchPage {
            items,
            total,
            limit: filter.limit,
            offset: filter.offset,
        })
    }
}
