//! # Validation Module
//!
//! Input validation for the work-order form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── numeric inputs, min=0                                             │
//! │  └── preparer / mode toggles (closed sets)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shell command (Rust)                                         │
//! │  ├── non-numeric text → unset (coerced, never rejected)                │
//! │  └── THIS MODULE: negatives, lengths, roster membership                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence                                                  │
//! │  └── malformed records read back as "absent"                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::{parse_decimal, Money};
use crate::{MAX_NOTES_LEN, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a units field.
///
/// ## Rules
/// - Empty or non-numeric text → unset
/// - Negative values are rejected
///
/// ## Example
/// ```rust
/// use orden_core::validation::parse_units;
///
/// assert!(parse_units("3").unwrap().is_some());
/// assert!(parse_units("").unwrap().is_none());
/// assert!(parse_units("tres").unwrap().is_none());
/// assert!(parse_units("-1").is_err());
/// ```
pub fn parse_units(input: &str) -> ValidationResult<Option<Decimal>> {
    let units = parse_decimal(input);
    validate_units(units)?;
    Ok(units)
}

/// Validates a units value (unset is fine).
pub fn validate_units(units: Option<Decimal>) -> ValidationResult<()> {
    match units {
        Some(u) if u.is_sign_negative() && !u.is_zero() => Err(ValidationError::Negative {
            field: "units".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates a price (unset is fine, zero is fine).
pub fn validate_price(price: Option<Money>) -> ValidationResult<()> {
    match price {
        Some(p) if p.is_negative() => Err(ValidationError::Negative {
            field: "price".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a single-line text field (client, internal code, description).
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    validate_len(field, value, MAX_TEXT_LEN)
}

/// Validates the notes field.
pub fn validate_notes(value: &str) -> ValidationResult<()> {
    validate_len("notes", value, MAX_NOTES_LEN)
}

fn validate_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a preparer roster.
///
/// ## Rules
/// - At least one preparer
/// - No blank ids
/// - No duplicates
pub fn validate_roster(ids: &[String]) -> ValidationResult<()> {
    if ids.is_empty() {
        return Err(ValidationError::Required {
            field: "preparers".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "preparer".to_string(),
            });
        }
        validate_text("preparer", id)?;
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "preparer".to_string(),
                value: id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
