use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::{SearchError, StoreError, ValidationError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Error rendered as `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: err.kind.code(),
            message: format!("{}: {}", err.field, err.message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationError::from(errors).into()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Constraint(constraint) => {
                warn!("Write rejected by {}", constraint);
                Self {
                    status: StatusCode::CONFLICT,
                    code: "CONSTRAINT_VIOLATION",
                    message: format!("Change violates {}", constraint),
                }
            }
            err if err.is_unavailable() => {
                error!("Storage unavailable: {}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "STORAGE_UNAVAILABLE",
                    message: "Storage is unavailable".to_string(),
                }
            }
            err => {
                error!("Storage error: {}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_ERROR",
                    message: "Internal storage error".to_string(),
                }
            }
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(err) => err.into(),
            SearchError::StorageUnavailable(err) => err.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_JSON",
            message: rejection.body_text(),
        }
    }
}
