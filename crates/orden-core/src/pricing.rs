//! # Pricing Module
//!
//! Net ↔ displayed price conversion under a [`TaxMode`].
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STORED                     SHOWN / TYPED                               │
//! │                                                                         │
//! │  net_price ── to_display ──► net × (1 + rate)          (no rounding)    │
//! │      ▲                                                                  │
//! │      └──────── to_net ────── typed / (1 + rate)        (4 decimals)     │
//! │                              typed as-is when rate = 0                  │
//! │                                                                         │
//! │  Switching mode re-projects; it never writes net_price.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::LineItem;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxMode;
use crate::validation::ValidationResult;

/// Converts prices for one tax mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceConverter {
    mode: TaxMode,
}

impl PriceConverter {
    pub const fn new(mode: TaxMode) -> Self {
        PriceConverter { mode }
    }

    pub const fn mode(&self) -> TaxMode {
        self.mode
    }

    /// Displayed value of a stored net price. Unset stays unset.
    pub fn to_display(&self, net: Option<Money>) -> Option<Money> {
        net.map(|n| n.with_tax(self.mode.rate()))
    }

    /// Net value of a typed (displayed) price. Unset stays unset.
    pub fn to_net(&self, typed: Option<Money>) -> Option<Money> {
        typed.map(|t| t.without_tax(self.mode.rate()))
    }

    /// Net value of raw text from a price field.
    ///
    /// ## Example
    /// ```rust
    /// use orden_core::pricing::PriceConverter;
    /// use orden_core::types::TaxMode;
    ///
    /// let full = PriceConverter::new(TaxMode::Full);
    /// assert_eq!(full.to_net_from_input("121").unwrap().to_string(), "100.00");
    /// assert!(full.to_net_from_input("").is_none());
    /// assert!(full.to_net_from_input("n/a").is_none());
    /// ```
    pub fn to_net_from_input(&self, input: &str) -> Option<Money> {
        self.to_net(Money::parse(input))
    }

    /// Subtotal of `items`: Σ net × units in net terms, then projected.
    ///
    /// Unset units or prices count as zero. Saturates instead of
    /// overflowing; [`ensure_in_range`] keeps edited documents below that.
    pub fn subtotal(&self, items: &[LineItem]) -> Subtotal {
        let net = items.iter().fold(Money::zero(), |acc, item| {
            let price = item.net_price.unwrap_or_default();
            let units = item.units.unwrap_or(Decimal::ZERO);
            acc + price * units
        });
        Subtotal {
            net,
            display: net.with_tax(self.mode.rate()),
            mode: self.mode,
        }
    }

    /// [`Self::subtotal`], or `None` if any product or sum overflows.
    pub fn checked_subtotal(&self, items: &[LineItem]) -> Option<Subtotal> {
        let net = items.iter().try_fold(Money::zero(), |acc, item| {
            let price = item.net_price.unwrap_or_default();
            let units = item.units.unwrap_or(Decimal::ZERO);
            acc.checked_add(price.checked_mul(units)?)
        })?;
        Some(Subtotal {
            net,
            display: net.checked_with_tax(self.mode.rate())?,
            mode: self.mode,
        })
    }
}

/// Checks that every unit price and the subtotal of `items` can be
/// computed in every tax mode.
///
/// ## Example
/// ```rust
/// use orden_core::document::LineItem;
/// use orden_core::money::Money;
/// use orden_core::pricing::ensure_in_range;
///
/// let mut item = LineItem::empty();
/// item.units = Some("100000000000000000000".parse().unwrap());
/// item.net_price = Money::parse("100000000000000000000");
/// assert!(ensure_in_range(&[item]).is_err());
/// ```
pub fn ensure_in_range(items: &[LineItem]) -> ValidationResult<()> {
    for mode in TaxMode::ALL {
        let rate = mode.rate();
        let converter = PriceConverter::new(mode);
        if items
            .iter()
            .filter_map(|item| item.net_price)
            .any(|price| price.checked_with_tax(rate).is_none())
        {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
            });
        }
        if converter.checked_subtotal(items).is_none() {
            return Err(ValidationError::OutOfRange {
                field: "subtotal".to_string(),
            });
        }
    }
    Ok(())
}

/// Subtotal in both projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Subtotal {
    pub net: Money,
    pub display: Money,
    pub mode: TaxMode,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn item(units: Option<&str>, price: Option<&str>) -> LineItem {
        let mut item = LineItem::empty();
        item.units = units.map(|u| u.parse().unwrap());
        item.net_price = price.map(money);
        item
    }

    #[test]
    fn test_to_display_full() {
        let full = PriceConverter::new(TaxMode::Full);
        assert_eq!(full.to_display(Some(money("100"))), Some(money("121.00")));
        assert_eq!(full.to_display(None), None);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let tolerance = money("0.0001").amount();
        for mode in TaxMode::ALL {
            let conv = PriceConverter::new(mode);
            for typed in ["100", "121", "99.99", "0.07", "12345.6789", "1"] {
                let x = money(typed);
                let back = conv.to_display(conv.to_net(Some(x))).unwrap();
                assert!(
                    (back.amount() - x.amount()).abs() <= tolerance,
                    "{mode}: {typed} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn test_net_of_display_recovers_net() {
        let full = PriceConverter::new(TaxMode::Full);
        let shown = full.to_display(Some(money("100")));
        let net = full.to_net(shown).unwrap();
        assert!((net.amount() - money("100").amount()).abs() <= money("0.0001").amount());
    }

    #[test]
    fn test_zero_rate_keeps_typed_value() {
        let none = PriceConverter::new(TaxMode::None);
        assert_eq!(none.to_net_from_input("12.345678"), Some(money("12.345678")));
    }

    #[test]
    fn test_non_numeric_input_is_unset() {
        let half = PriceConverter::new(TaxMode::Half);
        assert_eq!(half.to_net_from_input(""), None);
        assert_eq!(half.to_net_from_input("abc"), None);
        assert_eq!(half.to_net_from_input("110,5"), Some(money("100")));
    }

    #[test]
    fn test_mode_switch_shows_original_net() {
        // Typed 121 under 21% stores net 100; under "none" the field shows 100.
        let net = PriceConverter::new(TaxMode::Full).to_net_from_input("121");
        let shown = PriceConverter::new(TaxMode::None).to_display(net);
        assert_eq!(shown, Some(money("100")));
    }

    #[test]
    fn test_subtotal_half_mode() {
        let items = vec![item(Some("2"), Some("50")), item(Some("1"), None)];
        let subtotal = PriceConverter::new(TaxMode::Half).subtotal(&items);

        assert_eq!(subtotal.net, money("100"));
        assert_eq!(subtotal.display, money("110.50"));
        assert_eq!(subtotal.mode, TaxMode::Half);
    }

    #[test]
    fn test_subtotal_unset_units_count_as_zero() {
        let items = vec![item(None, Some("50")), item(Some("3"), Some("0.5"))];
        let subtotal = PriceConverter::new(TaxMode::None).subtotal(&items);
        assert_eq!(subtotal.net, money("1.5"));
        assert_eq!(subtotal.display, money("1.5"));
    }

    #[test]
    fn test_huge_row_saturates_instead_of_panicking() {
        let huge = "100000000000000000000";
        let items = vec![item(Some(huge), Some(huge))];
        let conv = PriceConverter::new(TaxMode::Full);

        let subtotal = conv.subtotal(&items);
        assert_eq!(subtotal.net.amount(), Decimal::MAX);
        assert_eq!(subtotal.display.amount(), Decimal::MAX);
        assert_eq!(conv.checked_subtotal(&items), None);
        assert!(matches!(
            ensure_in_range(&items),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_sum_overflow_is_out_of_range() {
        // Each row fits, the sum does not
        let big = "50000000000000000000000000000";
        let items = vec![item(Some("1"), Some(big)), item(Some("1"), Some(big))];
        assert!(PriceConverter::new(TaxMode::None)
            .checked_subtotal(&items)
            .is_none());
        assert!(ensure_in_range(&items).is_err());
    }

    #[test]
    fn test_ordinary_rows_are_in_range() {
        let items = vec![item(Some("2"), Some("50")), item(None, Some("1e9"))];
        assert!(ensure_in_range(&items).is_ok());
        assert_eq!(
            PriceConverter::new(TaxMode::Half).checked_subtotal(&items),
            Some(PriceConverter::new(TaxMode::Half).subtotal(&items))
        );
    }

    #[test]
    fn test_subtotal_empty() {
        let subtotal = PriceConverter::new(TaxMode::Full).subtotal(&[]);
        assert!(subtotal.net.is_zero());
        assert!(subtotal.display.is_zero());
    }
}
