pub mod catalog_repository;
pub mod event_repository;
pub mod event_store;
pub mod memory;

pub use catalog_repository::PgCatalogRepository;
pub use event_repository::PgEventRepository;
pub use event_store::{EventRepository, EventStore};
pub use memory::InMemoryEventRepository;
