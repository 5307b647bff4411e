//! Tolerant numeric parsing for user-typed tax and tip inputs.
//!
//! A calculator forgives sloppy input: anything that does not parse as a
//! non-negative number is treated as zero, never surfaced as an error.
//! That policy lives here, in one place, instead of ad hoc coercion
//! scattered across call sites.
//!
//! Extraction payload prices do NOT go through this module — junk prices
//! there are *dropped*, not zeroed (see `ExtractedReceipt::clean_items`).

use crate::money::Money;
use crate::types::Rate;

/// Parses a non-negative decimal from user input.
///
/// Trims whitespace and tolerates a trailing `%` or leading `$` (people
/// paste "15%" and "$10.00" into tip fields). Returns `None` for empty,
/// unparseable, negative, or non-finite input.
pub fn non_negative(input: &str) -> Option<f64> {
    let trimmed = input
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => None,
    }
}

/// Parses a user-typed percentage ("8.58") into a rate, defaulting to
/// zero when the input does not parse as a non-negative number.
pub fn rate_or_zero(input: &str) -> Rate {
    non_negative(input)
        .and_then(Rate::from_percent)
        .unwrap_or_default()
}

/// Parses a user-typed dollar amount ("10.00") into cents, defaulting to
/// zero when the input does not parse as a non-negative number.
pub fn money_or_zero(input: &str) -> Money {
    non_negative(input)
        .and_then(Money::from_decimal)
        .unwrap_or_default()
}
