//! Error handling - one translator from error kinds to HTTP statuses.
//!
//! Every failure is terminal for its request and reported immediately in the
//! uniform `{message}` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use std::fmt;

use quill_core::error::RepoError;
use quill_core::ports::AuthError;
use quill_shared::MessageResponse;

/// Application-level error type mapped onto the HTTP status taxonomy.
#[derive(Debug)]
pub enum AppError {
    /// Missing or empty fields in an otherwise well-formed request.
    Validation(String),
    /// Missing, malformed or expired credentials.
    Auth(AuthError),
    /// Authenticated, but not the owner of the target entity.
    Forbidden(String),
    NotFound(String),
    /// Persistence or other unexpected failure; detail is logged, not sent.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Auth(err) => write!(f, "Unauthorized: {}", err),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::Hashing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Validation(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Auth(err) => match err {
                AuthError::MissingToken => "Missing authentication token".to_string(),
                AuthError::TokenExpired => "Token has expired".to_string(),
                AuthError::InvalidToken(detail) => {
                    tracing::debug!(detail = %detail, "Rejected invalid token");
                    "Invalid token".to_string()
                }
                AuthError::UnknownUser => "User not found".to_string(),
                AuthError::InvalidCredentials => "Invalid username or password".to_string(),
                AuthError::Hashing(detail) => {
                    tracing::error!(detail = %detail, "Password hashing failure");
                    "Internal server error".to_string()
                }
            },
            AppError::Internal(msg) => msg.clone(),
        };

        HttpResponse::build(self.status_code()).json(MessageResponse::new(message))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => {
                tracing::error!("Unhandled constraint violation: {}", msg);
                AppError::Internal("Internal server error".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Internal server error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Internal server error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Json extractor configuration mapping body deserialization failures onto
/// the uniform `{message}` shape.
pub fn json_error_handler() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(MessageResponse::new("Invalid request body")),
        )
        .into()
    })
}

/// Path extractor configuration. A non-numeric post id is an unmatched
/// route, not a bad request.
pub fn path_error_handler() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::NotFound().json(MessageResponse::new("Endpoint not found")),
        )
        .into()
    })
}
