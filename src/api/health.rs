use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = match state.repository.ping().await {
        Ok(()) => true,
        Err(err) => {
            error!("Health check database ping failed: {}", err);
            false
        }
    };

    let (status_code, status, db_status) = if db_ok {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "error")
    };

    info!("Health check complete: {}", status);

    (
        status_code,
        Json(json!({
            "status": status,
            "ts": Utc::now().to_rfc3339(),
            "checks": {
                "db": db_status,
            },
        })),
    )
}
