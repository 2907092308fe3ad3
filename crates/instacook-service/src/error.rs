use instacook_core::validation::FieldErrors;
use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] instacook_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] instacook_core::error::CoreError),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),

    #[error("Missing authorization header")]
    NotAuthenticated,

    #[error("{0}")]
    InvalidToken(String),

    #[error("Fresh token required")]
    FreshTokenRequired,

    #[error("username or password is incorrect")]
    InvalidCredentials,

    #[error("The user account is not activated yet")]
    InactiveAccount,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationError(errors)
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
