//! # Error Types
//!
//! Domain-specific error types for orden-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orden-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  orden-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  Shell errors (apps/desktop)                                           │
//! │  └── ApiError         - What the form frontend sees (serialized)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error Here
//! Numbering and pricing never fail. Malformed persisted records are treated
//! as absent, and non-numeric price or unit input becomes "unset". The
//! variants below only cover requests the form should never send.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item id is not part of the current document.
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    /// Preparer is not in the configured roster.
    ///
    /// ## When This Occurs
    /// - Frontend sends a stale preparer after the roster changed
    /// - A saved preparer no longer exists (startup ignores it instead)
    #[error("Unknown preparer: {0}")]
    UnknownPreparer(String),

    /// The preparer roster is unusable (empty or duplicated ids).
    #[error("Invalid preparer roster: {reason}")]
    InvalidRoster { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid day key, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Value too large to total (line or subtotal would overflow).
    #[error("{field} is too large")]
    OutOfRange { field: String },

    /// Duplicate value (e.g., duplicate preparer id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
