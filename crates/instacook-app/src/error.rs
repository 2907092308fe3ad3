use instacook_core::error::CoreError;
use instacook_core::validation::FieldErrors;
use instacook_db::error::DbError;
use instacook_service::error::ServiceError;
use salvo::http::StatusCode;
use salvo::writing::{Json, Scribe};
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

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a FieldErrors>,
}

fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::PoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
        DbError::DatabaseError(diesel_err) => diesel_status(diesel_err),
        DbError::CoreError(core) => core_status(core),
    }
}

fn diesel_status(err: &diesel::result::Error) -> StatusCode {
    match err {
        diesel::result::Error::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl AppError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => match err {
                ServiceError::DatabaseError(db) => db_status(db),
                ServiceError::CoreError(core) => core_status(core),
                ServiceError::DieselError(diesel_err) => diesel_status(diesel_err),
                ServiceError::NotAuthenticated
                | ServiceError::InvalidToken(_)
                | ServiceError::FreshTokenRequired
                | ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                ServiceError::InactiveAccount | ServiceError::Forbidden(_) => {
                    StatusCode::FORBIDDEN
                }
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::ValidationError(_) | ServiceError::BadRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::InvalidConfiguration(_) | ServiceError::InvariantViolation(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::DatabaseError(db) => db_status(db),
            Self::CoreError(core) => core_status(core),
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ServiceError(ServiceError::ValidationError(errors)) => Some(errors),
            _ => None,
        }
    }

    /// Client-facing message. Server faults get a generic text; the
    /// details only go to the log.
    #[must_use]
    pub fn message(&self) -> String {
        let status = self.status_code();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            "Service temporarily unavailable".to_string()
        } else if status.is_server_error() {
            "Internal server error".to_string()
        } else if self.field_errors().is_some() {
            "Validation errors in your request".to_string()
        } else if status == StatusCode::NOT_FOUND
            && !matches!(self, Self::ServiceError(ServiceError::NotFound(_)))
        {
            "Not found".to_string()
        } else {
            self.to_string()
        }
    }
}

impl Scribe for AppError {
    fn render(self, res: &mut salvo::Response) {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        res.status_code(status);
        res.render(Json(ErrorBody {
            message: self.message(),
            errors: self.field_errors(),
        }));
    }
}
