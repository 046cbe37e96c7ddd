pub mod events;
pub mod health;
pub mod response;
pub mod search;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::repositories::EventRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn EventRepository>,
}

pub fn build_router(repository: Arc<dyn EventRepository>) -> Router {
    let state = AppState { repository };

    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/events", post(events::create_event))
        .route(
            "/api/v1/events/{id}",
            get(events::get_event).patch(events::update_event),
        )
        .route("/api/v1/search", get(search::search_events))
        .with_state(state)
}
