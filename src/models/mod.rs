pub mod catalog;
pub mod event;
pub mod search;
pub mod venue;

pub use catalog::{Artist, EventLinks, Label, User};
pub use event::{CreateEvent, Event, EventStatus, UpdateEvent};
pub use search::{GeoPoint, RawSearchQuery, RawValue, SearchFilter, SearchPage};
pub use venue::{CreateVenue, Venue};
