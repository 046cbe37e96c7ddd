use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::{response::ApiResult, AppState};
use crate::models::{RawSearchQuery, SearchPage};
use crate::search;

#[axum::debug_handler]
pub async fn search_events(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<SearchPage>> {
    let raw = RawSearchQuery::from_pairs(pairs);
    let page = search::search_events(state.repository.as_ref(), &raw).await?;

    Ok(Json(page))
}
