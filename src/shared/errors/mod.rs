//! Error Types
//!
//! Layered error types with HTTP status code mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::OnceCell;
use serde::Serialize;
use thiserror::Error;

/// Whether 500 responses carry the internal error chain. Fixed once at startup.
static EXPOSE_ERROR_DETAILS: OnceCell<bool> = OnceCell::new();

/// Configure whether internal error details are included in 500 responses.
///
/// Only the first call has an effect.
pub fn set_expose_error_details(expose: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(expose);
}

fn expose_error_details() -> bool {
    EXPOSE_ERROR_DETAILS.get().copied().unwrap_or(false)
}

/// Domain-level errors representing business rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid application status: {0}")]
    InvalidStatus(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Conflicting record: {0}")]
    Conflict(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Referenced record does not exist: {0}")]
    InvalidReference(String),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::InvalidReference(db_err.message().to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<DomainError> for RepositoryError {
    fn from(err: DomainError) -> Self {
        Self::Mapping(err.to_string())
    }
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Domain(_) | Self::Repository(RepositoryError::InvalidReference(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } | Self::Repository(RepositoryError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Conflict(_) | Self::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Repository(RepositoryError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Repository(RepositoryError::InvalidReference(_)) => "INVALID_REFERENCE",
            Self::NotFound { .. } | Self::Repository(RepositoryError::NotFound(_)) => "NOT_FOUND",
            Self::Conflict(_) | Self::Repository(RepositoryError::Conflict(_)) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Domain(DomainError::InvalidStatus(_)) => "INVALID_STATUS",
            Self::Domain(DomainError::InvalidValue { .. }) => "INVALID_VALUE",
            Self::Repository(RepositoryError::Unavailable(_)) => "SERVICE_UNAVAILABLE",
            Self::Repository(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the message is safe to return to the caller verbatim
    fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Repository(
                    RepositoryError::Database(_) | RepositoryError::Mapping(_) | RepositoryError::Unavailable(_)
                )
        )
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ErrorResponse {
    /// Build a response body stamped with the current time
    #[must_use]
    pub fn new(code: &str, message: impl Into<String>, details: Option<Vec<FieldError>>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn internal_details(err: &(dyn std::error::Error + 'static)) -> Option<Vec<FieldError>> {
    if !expose_error_details() {
        return None;
    }
    let mut chain = Vec::new();
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        chain.push(FieldError {
            field: String::new(),
            message: e.to_string(),
        });
        current = e.source();
    }
    Some(chain)
}

/// Split a "field: message" validation string into a field error
fn field_error(entry: &str) -> FieldError {
    match entry.split_once(": ") {
        Some((field, message)) => FieldError {
            field: field.to_string(),
            message: message.to_string(),
        },
        None => FieldError {
            field: String::new(),
            message: entry.to_string(),
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                let status = uc_error.status_code();
                let details = match uc_error {
                    UseCaseError::Validation(errors) => Some(errors.iter().map(|e| field_error(e)).collect()),
                    _ if uc_error.is_internal() => internal_details(uc_error),
                    _ => None,
                };
                let message = if uc_error.is_internal() {
                    tracing::error!(error = %uc_error, "Request failed");
                    if status == StatusCode::SERVICE_UNAVAILABLE {
                        "Record store is unavailable".to_string()
                    } else {
                        "An unexpected error occurred".to_string()
                    }
                } else {
                    uc_error.to_string()
                };
                (status, uc_error.error_code(), message, details)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Unauthorized".to_string(),
                None,
            ),
            ApiError::InvalidUuid(msg) => (StatusCode::BAD_REQUEST, "INVALID_UUID", msg.clone(), None),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                    internal_details(&**err),
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::InvalidUuid(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::UseCase(UseCaseError::Domain(err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    // Struct-level checks are keyed "__all__"; name them by their code instead
                    let field = if *field == "__all__" { e.code.to_string() } else { field.to_string() };
                    format!("{}: {}", field, e.message.as_ref().map_or("invalid", |m| m.as_ref()))
                })
            })
            .collect();
        messages.sort();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}
