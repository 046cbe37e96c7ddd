use std::fmt;

use thiserror::Error;

/// Machine-readable reason a search request or payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    LatLngMustBePaired,
    OutOfRange,
    InvalidNumber,
    InvalidTimestamp,
    InvalidPayload,
}

impl ValidationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationKind::LatLngMustBePaired => "LAT_LNG_MUST_BE_PAIRED",
            ValidationKind::OutOfRange => "OUT_OF_RANGE",
            ValidationKind::InvalidNumber => "INVALID_NUMBER",
            ValidationKind::InvalidTimestamp => "INVALID_TIMESTAMP",
            ValidationKind::InvalidPayload => "INVALID_PAYLOAD",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {field}: {message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationKind::OutOfRange, field, message)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .filter(|name| *name != "__all__")
            .min()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "payload".to_string());

        Self::new(ValidationKind::InvalidPayload, field, errors.to_string())
    }
}

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The write was refused by a table constraint, named as in the schema.
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether the backend could not be reached, as opposed to refusing or
    /// mis-handling a particular statement.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Constraint(_) => false,
            StoreError::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::Protocol(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
                    | sqlx::Error::Database(_)
            ),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Constraint(constraint);
            }
        }
        StoreError::Database(err)
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search query: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}
