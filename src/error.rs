//! Error taxonomy shared by the services and the HTTP layer.
//!
//! Services return [`AppError`] so callers can branch on the error kind without
//! string matching. The HTTP mapping lives in the [`IntoResponse`] impl: every
//! error becomes `{ "error": { "code", "message", "detail" } }` where `message`
//! is the short text a UI should act on and `detail` the longer explanation.
//! Store failures are collapsed into one generic body so storage internals
//! never leak to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Rejected user input. Never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is empty or shorter than {min} characters")]
    TooShort { min: usize },

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Input contains a disallowed pattern")]
    ContainsDisallowedPattern,

    #[error("Token '{token}' cannot be used as a path segment")]
    ReservedToken { token: String },
}

/// Business-rule conflicts on the mapping table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Token '{token}' is already taken")]
    TokenTaken { token: String },

    #[error("URL is already shortened as '{token}'")]
    AlreadyExists { token: String },
}

/// Resolution misses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Token not provided")]
    TokenNotProvided,

    #[error("Unknown token '{token}'")]
    UnknownToken { token: String },
}

/// Column protected by a unique constraint in the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    LongUrl,
    Token,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::LongUrl => write!(f, "long_url"),
            Self::Token => write!(f, "token"),
        }
    }
}

/// Failures reported by a store gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Unique constraint violated on {0}")]
    UniqueViolation(UniqueField),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut => Self::Timeout,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                Self::Unavailable(e.to_string())
            }
            sqlx::Error::Database(db) if db.is_unique_violation() => match db.constraint() {
                Some("links_long_url_key") => Self::UniqueViolation(UniqueField::LongUrl),
                Some("links_token_key") => Self::UniqueViolation(UniqueField::Token),
                _ => Self::Database(e.to_string()),
            },
            _ => Self::Database(e.to_string()),
        }
    }
}

/// Top-level error returned by the application services.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to generate a unique token after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Validation(ValidationError::InvalidFormat(e.to_string()))
    }
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(ConflictError::TokenTaken { .. }) => StatusCode::BAD_REQUEST,
            Self::Conflict(ConflictError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            Self::NotFound(NotFoundError::TokenNotProvided) => StatusCode::BAD_REQUEST,
            Self::NotFound(NotFoundError::UnknownToken { .. }) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::GenerationExhausted { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::TooShort { .. }) => "too_short",
            Self::Validation(ValidationError::InvalidFormat(_)) => "invalid_format",
            Self::Validation(ValidationError::ContainsDisallowedPattern) => "disallowed_pattern",
            Self::Validation(ValidationError::ReservedToken { .. }) => "reserved_token",
            Self::Conflict(ConflictError::TokenTaken { .. }) => "token_taken",
            Self::Conflict(ConflictError::AlreadyExists { .. }) => "already_exists",
            Self::NotFound(NotFoundError::TokenNotProvided) => "token_not_provided",
            Self::NotFound(NotFoundError::UnknownToken { .. }) => "not_found",
            Self::GenerationExhausted { .. } => "generation_exhausted",
            Self::Store(_) | Self::Internal(_) => "internal_error",
        }
    }

    /// Short human-readable message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::TooShort { .. }) => "Invalid URL or URL is too short",
            Self::Validation(ValidationError::InvalidFormat(_)) => "Invalid URL format",
            Self::Validation(ValidationError::ContainsDisallowedPattern) => {
                "Custom token contains disallowed characters"
            }
            Self::Validation(ValidationError::ReservedToken { .. }) => "Custom token is reserved",
            Self::Conflict(ConflictError::TokenTaken { .. }) => "Custom token already exists",
            Self::Conflict(ConflictError::AlreadyExists { .. }) => "Already exists",
            Self::NotFound(NotFoundError::TokenNotProvided) => "Token not provided",
            Self::NotFound(NotFoundError::UnknownToken { .. }) => "URL not found",
            Self::GenerationExhausted { .. } | Self::Store(_) | Self::Internal(_) => {
                "Internal Server Error"
            }
        }
    }

    /// Longer explanation shown alongside [`Self::message`].
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(ValidationError::TooShort { min }) => format!(
                "The URL provided is either empty or does not meet the minimum length requirement of {} characters.",
                min
            ),
            Self::Validation(ValidationError::InvalidFormat(reason)) => {
                format!("The URL provided is not in a valid format: {}", reason)
            }
            Self::Validation(ValidationError::ContainsDisallowedPattern) => {
                "The custom token must not contain quotes, semicolons, comment markers or SQL keywords."
                    .to_string()
            }
            Self::Validation(ValidationError::ReservedToken { token }) => format!(
                "The custom token '{}' clashes with a route name or contains characters that are not allowed in a path segment.",
                token
            ),
            Self::Conflict(ConflictError::TokenTaken { token }) => format!(
                "The custom token '{}' is already in use. Choose another one or leave it empty to auto-generate a token.",
                token
            ),
            Self::Conflict(ConflictError::AlreadyExists { token }) => {
                format!("This URL has already been shortened as '{}'.", token)
            }
            Self::NotFound(NotFoundError::TokenNotProvided) => {
                "The request is missing the token to resolve.".to_string()
            }
            Self::NotFound(NotFoundError::UnknownToken { token }) => {
                format!("The token '{}' does not exist.", token)
            }
            Self::GenerationExhausted { .. } | Self::Store(_) | Self::Internal(_) => {
                "An unexpected error occurred while processing the request.".to_string()
            }
        }
    }

    /// Converts the error into its serializable body.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.message(),
            detail: self.detail(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: &'static str,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
