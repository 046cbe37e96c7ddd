use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::{response::ApiResult, AppState};
use crate::models::{CreateEvent, Event, UpdateEvent};

use super::response::ApiError;

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEvent>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;

    let event = Event::new(payload);
    state.repository.create(&event).await?;

    info!("Created event {} ({})", event.id, event.title);
    Ok((StatusCode::CREATED, Json(json!({ "item": event }))))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    match state.repository.get_by_id(event_id).await? {
        Some(event) => Ok(Json(json!({ "item": event }))),
        None => Err(ApiError::not_found("Event not found")),
    }
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    payload: Result<Json<UpdateEvent>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;

    match state.repository.update(event_id, payload).await? {
        Some(event) => {
            info!("Updated event {}", event.id);
            Ok(Json(json!({ "item": event })))
        }
        None => Err(ApiError::not_found("Event not found")),
    }
}
