use std::path::PathBuf;

use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] airtime_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] airtime_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Artwork storage error at {}: {source}", .path.display())]
    StorageError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
