//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Presentation                Rust shell                                 │
//! │  ────────────                ──────────                                 │
//! │                                                                         │
//! │  update_item(...)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Core error?     ─── CoreError::UnknownPreparer ──┐             │  │
//! │  │  Save failed?    ─── DbError::QueryFailed ────────┼─► ApiError ─►│  │
//! │  │  Print failed?   ─── PlatformError::Print ────────┘             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR", "message": "price must not be negative" }│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed save leaves the in-memory form as it is; the error only tells
//! the user the change is not on disk yet.

use serde::Serialize;
use thiserror::Error;

use orden_core::CoreError;
use orden_db::DbError;

use crate::platform::PlatformError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Line item not found: 3f1c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Line item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Preparer is not in the roster
    UnknownPreparer,

    /// Saving or loading failed
    DatabaseError,

    /// The host could not print
    PrintError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                tracing::error!(error = %err, "Database unavailable");
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::Serialization { key, reason } => {
                tracing::error!(key = %key, reason = %reason, "Could not encode record");
                ApiError::new(ErrorCode::Internal, "Could not save changes")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not save changes")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => {
                ApiError::new(ErrorCode::NotFound, format!("Line item not found: {}", id))
            }
            CoreError::UnknownPreparer(id) => ApiError::new(
                ErrorCode::UnknownPreparer,
                format!("Unknown preparer: {}", id),
            ),
            CoreError::InvalidRoster { reason } => {
                ApiError::validation(format!("Invalid preparer roster: {}", reason))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<orden_core::ValidationError> for ApiError {
    fn from(err: orden_core::ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        tracing::error!(error = %err, "Host print facility failed");
        ApiError::new(ErrorCode::PrintError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Error
// =============================================================================

/// Failures that stop the shell from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}
