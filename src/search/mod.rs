pub mod executor;
pub mod geo;
pub mod normalizer;
pub mod predicate;
pub mod text;

pub use executor::SearchExecutor;
pub use normalizer::Normalizer;
pub use predicate::{Clause, Predicate};

use crate::error::SearchError;
use crate::models::{RawSearchQuery, SearchPage};
use crate::repositories::EventStore;

/// Normalizes raw input and runs it. Validation failures never reach the store.
pub async fn search_events<S: EventStore + ?Sized>(
    store: &S,
    raw: &RawSearchQuery,
) -> Result<SearchPage, SearchError> {
    let filter = Normalizer::normalize(raw)?;
    SearchExecutor::new(store).execute(&filter).await
}
