//! # Domain Types
//!
//! Core value types used throughout the work-order form.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxMode      │   │   PreparerId    │   │     DayKey      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  None   0%      │   │  "Nacho"        │   │  20250131       │       │
//! │  │  Half   10.5%   │   │  "Pepo"         │   │  (YYYYMMDD)     │       │
//! │  │  Full   21%     │   │                 │   │                 │       │
//! │  └────────┬────────┘   └─────────────────┘   └────────┬────────┘       │
//! │           │                                           │                 │
//! │  ┌────────▼────────┐                         ┌────────▼────────┐       │
//! │  │    TaxRate      │                         │ DocumentNumber  │       │
//! │  │  bps (u32)      │                         │ V-20250131-03   │       │
//! │  │  1050 = 10.5%   │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::{DOCUMENT_PREFIX, SEQUENCE_PAD};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1050 bps = 10.5% (reduced IVA), 2100 bps = 21% (general IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a decimal fraction (2100 → 0.21).
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns `1 + rate`, the factor between net and displayed prices.
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.fraction()
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// How prices are shown and typed in the form.
///
/// Stored prices are always net; the mode only changes the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Prices without IVA.
    #[default]
    None,
    /// Reduced IVA, 10.5%.
    Half,
    /// General IVA, 21%.
    Full,
}

impl TaxMode {
    /// All modes in toggle order.
    pub const ALL: [TaxMode; 3] = [TaxMode::None, TaxMode::Half, TaxMode::Full];

    /// The fixed rate for this mode.
    pub const fn rate(&self) -> TaxRate {
        match self {
            TaxMode::None => TaxRate::from_bps(0),
            TaxMode::Half => TaxRate::from_bps(1050),
            TaxMode::Full => TaxRate::from_bps(2100),
        }
    }

    /// Persisted token.
    pub const fn token(&self) -> &'static str {
        match self {
            TaxMode::None => "none",
            TaxMode::Half => "half",
            TaxMode::Full => "full",
        }
    }
}

/// Parses a mode token.
///
/// Besides `none`/`half`/`full`, the tokens written by the browser version
/// of the form (`sin`/`medio`/`con`) are accepted.
impl FromStr for TaxMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" | "sin" => Ok(TaxMode::None),
            "half" | "medio" => Ok(TaxMode::Half),
            "full" | "con" => Ok(TaxMode::Full),
            _ => Err(ValidationError::NotAllowed {
                field: "tax mode".to_string(),
                allowed: TaxMode::ALL.iter().map(|m| m.token().to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// =============================================================================
// Preparer
// =============================================================================

/// Identifier of the person who priced the order ("Presupuestó").
///
/// Each preparer owns an independent daily counter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreparerId(String);

impl PreparerId {
    /// Creates a preparer id. Membership in the roster is checked elsewhere.
    pub fn new(id: impl Into<String>) -> Self {
        PreparerId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreparerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PreparerId {
    fn from(s: &str) -> Self {
        PreparerId::new(s)
    }
}

// =============================================================================
// Day Key
// =============================================================================

/// A calendar day, persisted as `YYYYMMDD`.
///
/// Counters are scoped to one day key; a different key means "stale".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wraps a calendar date.
    pub const fn from_date(date: NaiveDate) -> Self {
        DayKey(date)
    }

    /// Returns the calendar date.
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parses an 8-digit `YYYYMMDD` key.
    ///
    /// ## Example
    /// ```rust
    /// use orden_core::types::DayKey;
    ///
    /// assert!(DayKey::parse("20250131").is_ok());
    /// assert!(DayKey::parse("2025-01-31").is_err());
    /// assert!(DayKey::parse("20250231").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: "expected 8 digits YYYYMMDD".to_string(),
            });
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(DayKey)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl TryFrom<String> for DayKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DayKey::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

// =============================================================================
// Document Number
// =============================================================================

/// Human-readable document number `V-<YYYYMMDD>-<NN>`.
///
/// A projection of `(day, sequence)`. It is recomputed whenever the day,
/// the preparer or the counters change and is never read back as the
/// source of truth for numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentNumber {
    pub date: DayKey,
    pub sequence: u32,
}

impl DocumentNumber {
    pub const fn new(date: DayKey, sequence: u32) -> Self {
        DocumentNumber { date, sequence }
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}",
            DOCUMENT_PREFIX,
            self.date,
            self.sequence,
            width = SEQUENCE_PAD
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
