use airtime_core::error::CoreError;
use airtime_db::error::DbError;
use airtime_service::error::ServiceError;
use salvo::http::StatusCode;
use salvo::writing::{Json, Scribe};
use salvo::Response;
use serde::Serialize;
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    /// Malformed request parameters or body.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::InvalidConfiguration(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::PoolError(_) | DbError::ConnectionError(_) => StatusCode::SERVICE_UNAVAILABLE,
        DbError::CoreError(core) => core_status(core),
        DbError::DatabaseError(_) | DbError::MigrationError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl AppError {
    /// ## Summary
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(err) => core_status(err),
            Self::DatabaseError(err) => db_status(err),
            Self::ServiceError(err) => match err {
                ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::DatabaseError(db) => db_status(db),
                ServiceError::CoreError(core) => core_status(core),
                ServiceError::StorageError { .. } | ServiceError::DieselError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl Scribe for AppError {
    fn render(self, res: &mut Response) {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "Database unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        res.status_code(status);
        res.render(Json(ErrorResponse { error: message }));
    }
}
