//! # Locale Formatting
//!
//! es-AR rendering for amounts, dates and tax mode labels.
//!
//! ```text
//! 1234.5        ──► "1.234,50"
//! 1234.5        ──► "$ 1.234,50"
//! "2025-01-31"  ──► "31/01/2025"
//! ""            ──► "—"
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::TaxMode;

/// Placeholder for empty header values.
pub const EMPTY_PLACEHOLDER: &str = "—";

// =============================================================================
// Amounts
// =============================================================================

/// Formats an amount with two decimals, `.` grouping and `,` decimals.
///
/// ## Example
/// ```rust
/// use orden_core::format::format_amount;
/// use orden_core::money::Money;
///
/// assert_eq!(format_amount(Money::parse("1234.5").unwrap()), "1.234,50");
/// assert_eq!(format_amount(Money::parse("0.005").unwrap()), "0,01");
/// ```
pub fn format_amount(amount: Money) -> String {
    format_decimal(amount.round_dp(2).amount(), 2)
}

/// Formats an amount with the peso sign: `$ 1.234,50`.
pub fn format_currency(amount: Money) -> String {
    format!("$ {}", format_amount(amount))
}

/// Formats a unit count. Unset or zero renders blank.
pub fn format_units(units: Option<Decimal>) -> String {
    match units {
        Some(u) if !u.is_zero() => {
            let u = u.normalize();
            format_decimal(u, u.scale())
        }
        _ => String::new(),
    }
}

fn format_decimal(value: Decimal, scale: u32) -> String {
    let text = format!("{:.*}", scale as usize, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

// =============================================================================
// Dates
// =============================================================================

/// Renders an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Empty input renders the placeholder; anything unparsable comes back
/// unchanged.
pub fn format_date(iso: &str) -> String {
    if iso.trim().is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// The value itself, or the placeholder when blank.
pub fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// Tax Mode Labels
// =============================================================================

/// Long label shown under the title: `Con IVA 10,5%`.
pub const fn mode_label(mode: TaxMode) -> &'static str {
    match mode {
        TaxMode::None => "Sin IVA",
        TaxMode::Half => "Con IVA 10,5%",
        TaxMode::Full => "Con IVA 21%",
    }
}

/// Short label for column headers: `(c/IVA 21%)`.
pub const fn mode_short_label(mode: TaxMode) -> &'static str {
    match mode {
        TaxMode::None => "(s/IVA)",
        TaxMode::Half => "(c/IVA 10,5%)",
        TaxMode::Full => "(c/IVA 21%)",
    }
}
