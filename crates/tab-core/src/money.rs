//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A receipt split three ways must still add up. With integer cents:     │
//! │    subtotal + tax + tip == grand total, EXACTLY, for every input.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Decimal values cross into cents once, at the boundary, and all      │
//! │    arithmetic after that point is integer arithmetic.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tab_core::money::Money;
//! use tab_core::types::Rate;
//!
//! let burger = Money::from_cents(1299); // $12.99
//! let fries = Money::from_cents(450);   // $4.50
//!
//! let subtotal = burger + fries;        // $17.49
//! let tax = subtotal.apply_rate(Rate::from_bps(858)); // 8.58% → $1.50
//! assert_eq!(tax.cents(), 150);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Headroom for differences and subtraction, even though
///   bill amounts themselves are non-negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: item prices,
/// subtotals, tax, tip, and per-person shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tab_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (e.g. `12.99` from an extraction payload)
    /// into cents, rounding half away from zero.
    ///
    /// Returns `None` for NaN, infinities, and values whose cent count does
    /// not fit in `i64`. This is the only place decimal input crosses into
    /// the integer domain.
    ///
    /// ## Example
    /// ```rust
    /// use tab_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(12.99), Some(Money::from_cents(1299)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Applies a percentage rate, used for both tax and percentage tips.
    ///
    /// ## Implementation
    /// Integer math with rounding: `(amount * bps + 5000) / 10000`
    /// (the +5000 rounds the half-case up instead of truncating).
    ///
    /// ## Example
    /// ```rust
    /// use tab_core::money::Money;
    /// use tab_core::types::Rate;
    ///
    /// let subtotal = Money::from_cents(1749); // $17.49
    /// let tax = subtotal.apply_rate(Rate::from_bps(858)); // 8.58%
    /// assert_eq!(tax.cents(), 150); // $1.50
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 prevents overflow on large amounts
        // rate.bps() is basis points: 858 = 8.58%
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Scales this amount by the fraction `part / whole`, rounding half up.
    ///
    /// This is the allocation primitive: a person who claimed `part` of a
    /// `whole` subtotal owes `tax.proportional_share(part, whole)` of the
    /// tax, and likewise for the tip.
    ///
    /// Returns zero when `whole` is not positive — an empty bill allocates
    /// nothing to anyone rather than dividing by zero.
    ///
    /// ## Example
    /// ```rust
    /// use tab_core::money::Money;
    ///
    /// let tax = Money::from_cents(150);       // $1.50 total tax
    /// let claimed = Money::from_cents(1299);  // person claimed $12.99
    /// let subtotal = Money::from_cents(1749); // of a $17.49 subtotal
    ///
    /// assert_eq!(tax.proportional_share(claimed, subtotal).cents(), 111);
    /// ```
    pub fn proportional_share(&self, part: Money, whole: Money) -> Money {
        if whole.0 <= 0 {
            return Money::zero();
        }
        let share = (self.0 as i128 * part.0 as i128 + whole.0 as i128 / 2) / whole.0 as i128;
        Money::from_cents(share as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This doubles as the 2-decimal currency formatting the presentation
/// layer renders (`$17.49`). Localization is out of scope.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summing an iterator of Money values (subtotals are sums of prices).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
