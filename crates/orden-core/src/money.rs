//! # Money Module
//!
//! Provides the `Money` type for unit prices and subtotals.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    100 × 1.21 = 121.00000000000001  ❌ WRONG!                           │
//! │                                                                         │
//! │  Net prices are stored with up to 4 decimals after removing IVA:        │
//! │    121 / 1.21 = 100.0000                                                │
//! │    110 / 1.105 = 99.5475                                                │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    Every stored net price and every displayed price is exact in        │
//! │    base 10; the only rounding is the explicit 4-decimal step.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orden_core::money::Money;
//! use orden_core::types::TaxRate;
//!
//! let net = Money::parse("100").unwrap();
//! let shown = net.with_tax(TaxRate::from_bps(2100));
//! assert_eq!(shown.to_string(), "121.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::types::TaxRate;

/// Decimal places kept on a net price derived from a tax-inclusive value.
pub const NET_PRICE_SCALE: u32 = 4;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in pesos, exact in base 10.
///
/// ## Where Money is Used
/// ```text
/// LineItem.net_price ──┬──► with_tax(mode) ──► unit price column
///                      │
///                      └──► × units ──► Subtotal.net ──► with_tax ──► display
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the inner decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parses a typed amount.
    ///
    /// Accepts `.` or `,` as decimal separator and surrounding whitespace.
    /// Empty or non-numeric text yields `None` ("unset"), never an error.
    ///
    /// ## Example
    /// ```rust
    /// use orden_core::money::Money;
    ///
    /// assert_eq!(Money::parse("12,5"), Money::parse("12.5"));
    /// assert!(Money::parse("").is_none());
    /// assert!(Money::parse("abc").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        parse_decimal(input).map(Money)
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Adds IVA at the given rate: `self × (1 + rate)`.
    ///
    /// No rounding is applied; formatting decides how many digits to show.
    /// Saturates at [`Decimal::MAX`]; use [`Money::checked_with_tax`] to
    /// detect that.
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.multiplier()))
    }

    /// [`Money::with_tax`], or `None` if the result does not fit.
    pub fn checked_with_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0.checked_mul(rate.multiplier()).map(Money)
    }

    /// `self × qty`, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use orden_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::parse("100000000000000000000").unwrap();
    /// assert!(price.checked_mul(Decimal::from(2)).is_some());
    /// assert!(price.checked_mul(price.amount()).is_none());
    /// ```
    pub fn checked_mul(&self, qty: Decimal) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// `self + other`, or `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Removes IVA at the given rate: `self / (1 + rate)`.
    ///
    /// A zero rate returns the value unchanged. Otherwise the quotient is
    /// rounded half away from zero to [`NET_PRICE_SCALE`] decimals.
    ///
    /// ## Example
    /// ```rust
    /// use orden_core::money::Money;
    /// use orden_core::types::TaxRate;
    ///
    /// let shown = Money::parse("110").unwrap();
    /// let net = shown.without_tax(TaxRate::from_bps(1050));
    /// assert_eq!(net.to_string(), "99.5475");
    /// ```
    pub fn without_tax(&self, rate: TaxRate) -> Money {
        if rate.is_zero() {
            return *self;
        }
        let net = self.0 / rate.multiplier();
        Money(net.round_dp_with_strategy(NET_PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Rounds to `dp` decimals, half away from zero.
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// Parses a decimal from user text, accepting a comma separator.
pub(crate) fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows at least two decimals, more when the value carries them.
///
/// This is for debugging and persisted text. Use [`crate::format`] for
/// es-AR display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.normalize();
        if value.scale() < 2 {
            write!(f, "{:.2}", value)
        } else {
            write!(f, "{}", value)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a quantity (units may be fractional). Saturates.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Decimal) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
