use thiserror::Error;

/// Application-level errors (wiring and command line)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] warden_service::error::ServiceError),

    #[error(transparent)]
    CoreError(#[from] warden_core::error::CoreError),

    #[error("Usage: {0}")]
    Usage(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
