//! Exact fixed-point conversion between display amounts and wei.
//!
//! User input and provider balances travel as decimal strings in the
//! currency's display unit; the chain wants an exact integer count of
//! the smallest unit. Conversions here are pure integer arithmetic -
//! floating point would silently lose precision below the 15th digit,
//! which on an 18-decimal currency is real money.
//!
//! Rejection rules for [`parse_units`]:
//! - empty (or whitespace-only) input
//! - anything but ASCII digits and at most one `.` (signs and
//!   exponents included)
//! - more fractional digits than the unit defines (precision would be
//!   lost, not rounded)
//! - values that overflow `u128`

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Why an amount string could not be converted to smallest units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The input was empty or whitespace-only.
    #[error("amount is empty")]
    Empty,

    /// The input contained anything but digits and a single decimal point.
    #[error("amount is not a plain decimal number")]
    Malformed,

    /// The input carried more fractional digits than the unit supports.
    #[error("amount has more than {max} decimal places")]
    TooManyDecimals {
        /// Decimal places the unit defines.
        max: u32,
    },

    /// The scaled value does not fit in the integer type.
    #[error("amount is too large")]
    Overflow,
}

// ============================================================================
// Conversions
// ============================================================================

/// Parses a display-unit decimal string into smallest units.
///
/// `"1.5"` with 18 decimals becomes `1_500_000_000_000_000_000`. The
/// zero value parses successfully; callers enforcing strictly-positive
/// amounts check the result.
///
/// # Errors
///
/// Returns an [`AmountError`] per the module-level rejection rules.
pub fn parse_units(input: &str, decimals: u32) -> Result<u128, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    // "1." and ".5" are fine, "." alone is not
    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Malformed);
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(AmountError::Malformed);
    }
    if frac.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals { max: decimals });
    }

    let scale = 10u128.pow(decimals);
    let whole_part = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| AmountError::Overflow)?
    };
    let frac_part = if frac.is_empty() {
        0
    } else {
        let digits = frac.parse::<u128>().map_err(|_| AmountError::Overflow)?;
        digits * 10u128.pow(decimals - frac.len() as u32)
    };

    whole_part
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_add(frac_part))
        .ok_or(AmountError::Overflow)
}

/// Formats a smallest-unit value as a display-unit decimal string.
///
/// Trailing fractional zeros are trimmed; whole values carry no decimal
/// point (`1_500_000_000_000_000_000` → `"1.5"`, `2 * 10^18` → `"2"`).
#[must_use]
pub fn format_units(value: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{frac:0>width$}", width = decimals as usize);
    format!("{whole}.{}", frac_str.trim_end_matches('0'))
}

/// Clips a formatted decimal string to at most `places` fractional
/// digits for display. Values with fewer places pass through unchanged.
#[must_use]
pub fn clip_places(formatted: &str, places: usize) -> String {
    match formatted.split_once('.') {
        Some((whole, _)) if places == 0 => whole.to_string(),
        Some((whole, frac)) if frac.len() > places => format!("{whole}.{}", &frac[..places]),
        _ => formatted.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
