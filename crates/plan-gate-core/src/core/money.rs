// crates/plan-gate-core/src/core/money.rs
// ============================================================================
// Module: Plan Gate Money
// Description: Exact currency amounts for payment plan evaluation.
// Purpose: Represent dollars as integer cents with strict boundary parsing.
// Dependencies: bigdecimal, serde, thiserror
// ============================================================================

//! ## Overview
//! [`Money`] stores a USD amount as signed integer cents so that rule
//! comparisons are exact. Untrusted inputs (CLI arguments, config values,
//! floats) are coerced at the boundary through [`Money::parse`] and
//! [`Money::try_from_f64`]; the engine itself never sees malformed numbers.
//!
//! Display uses the en-US currency format: `$1,234.00`, `-$5.00`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Largest magnitude (in cents) accepted from untrusted input.
pub const MAX_MONEY_CENTS: i64 = 1_000_000_000_000_000;
/// Maximum number of characters accepted by the money parser.
const MAX_MONEY_INPUT_LENGTH: usize = 64;
/// Cents per dollar.
const CENTS_PER_DOLLAR: i64 = 100;
/// Relative float error (in multiples of `f64::EPSILON`) still treated as a whole cent.
const FLOAT_CENT_TOLERANCE_ULPS: f64 = 16.0;

// ============================================================================
// SECTION: Types
// ============================================================================

/// USD amount stored as integer cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Errors raised while coercing external values into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input was empty or whitespace.
    #[error("amount is empty")]
    Empty,
    /// Input was not a decimal dollar amount.
    #[error("amount is not a valid dollar value: {0}")]
    Malformed(String),
    /// Input carried fractions of a cent.
    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(String),
    /// Input was NaN or infinite.
    #[error("amount must be a finite number")]
    NonFinite,
    /// Input magnitude exceeds [`MAX_MONEY_CENTS`].
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
}

impl Money {
    /// Creates an amount from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole dollars, saturating on overflow.
    #[must_use]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(CENTS_PER_DOLLAR))
    }

    /// Returns a zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns true when the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true when the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal dollar string such as `1,234.50` or `$1000`.
    ///
    /// Commas are only accepted as thousands separators in the whole-dollar
    /// part (`1,234,567`); `1,5` and `12,34.00` are malformed.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] when the input is empty, malformed, carries
    /// fractions of a cent, or exceeds [`MAX_MONEY_CENTS`].
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }
        if trimmed.len() > MAX_MONEY_INPUT_LENGTH {
            return Err(MoneyError::OutOfRange(trimmed.to_string()));
        }
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let digits = strip_grouping(unsigned, trimmed)?;
        let well_formed = digits.chars().any(|ch| ch.is_ascii_digit())
            && digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.');
        if !well_formed {
            return Err(MoneyError::Malformed(trimmed.to_string()));
        }
        let value = BigDecimal::from_str(&digits)
            .map_err(|_| MoneyError::Malformed(trimmed.to_string()))?;
        let cents = decimal_to_cents(&value, trimmed)?;
        Self::bounded(if negative { -cents } else { cents }, trimmed)
    }

    /// Converts a floating-point dollar amount to cents.
    ///
    /// Binary representation noise (`0.1 + 0.2`) snaps to the nearest cent;
    /// a genuine fraction of a cent (`1000.005`) is rejected, matching
    /// [`Money::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NonFinite`] for NaN/infinity,
    /// [`MoneyError::OutOfRange`] for magnitudes above [`MAX_MONEY_CENTS`]
    /// and [`MoneyError::TooPrecise`] for sub-cent amounts.
    pub fn try_from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NonFinite);
        }
        let scaled = value * 100.0;
        let rounded = scaled.round();
        let rendered = format!("{rounded:.0}");
        let cents: i64 =
            rendered.parse().map_err(|_| MoneyError::OutOfRange(value.to_string()))?;
        let tolerance = f64::EPSILON * scaled.abs().max(1.0) * FLOAT_CENT_TOLERANCE_ULPS;
        if (scaled - rounded).abs() > tolerance {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        Self::bounded(cents, &value.to_string())
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Returns `percent` of this amount rounded to whole dollars (half away from zero).
    #[must_use]
    pub fn percent_of_whole_dollars(self, percent: u8) -> Option<Self> {
        let numerator = i128::from(self.0) * i128::from(percent);
        let dollars = div_round_half_away(numerator, 100 * i128::from(CENTS_PER_DOLLAR));
        let cents = dollars.checked_mul(i128::from(CENTS_PER_DOLLAR))?;
        i64::try_from(cents).ok().map(Self)
    }

    /// Splits this amount into `parts` equal shares rounded to the cent.
    ///
    /// Returns `None` when `parts` is not positive.
    #[must_use]
    pub fn divide_evenly(self, parts: i32) -> Option<Self> {
        if parts <= 0 {
            return None;
        }
        let cents = div_round_half_away(i128::from(self.0), i128::from(parts));
        i64::try_from(cents).ok().map(Self)
    }

    /// Renders the amount as a plain decimal string (`1234.50`, `-5.00`).
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        let (sign, dollars, cents) = self.parts();
        format!("{sign}{dollars}.{cents:02}")
    }

    /// Splits the amount into sign, whole dollars and remaining cents.
    fn parts(self) -> (&'static str, u64, u64) {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        (sign, magnitude / 100, magnitude % 100)
    }

    /// Applies the input range limit.
    fn bounded(cents: i64, input: &str) -> Result<Self, MoneyError> {
        if cents.unsigned_abs() > MAX_MONEY_CENTS.unsigned_abs() {
            return Err(MoneyError::OutOfRange(input.to_string()));
        }
        Ok(Self(cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, dollars, cents) = self.parts();
        write!(f, "{sign}${}.{cents:02}", group_thousands(dollars))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// SECTION: Serde
// ============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Visitor accepting integer, float, or string dollar amounts.
struct MoneyVisitor;

impl de::Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a dollar amount as a number or decimal string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        let cents = value
            .checked_mul(CENTS_PER_DOLLAR)
            .ok_or_else(|| E::custom(MoneyError::OutOfRange(value.to_string())))?;
        Money::bounded(cents, &value.to_string()).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let signed =
            i64::try_from(value).map_err(|_| E::custom(MoneyError::OutOfRange(value.to_string())))?;
        self.visit_i64(signed)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Money::try_from_f64(value).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Money::parse(value).map_err(E::custom)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Removes thousands separators, accepting only well-formed comma groups.
fn strip_grouping(unsigned: &str, input: &str) -> Result<String, MoneyError> {
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    if fraction.is_some_and(|fraction| fraction.contains(',')) {
        return Err(MoneyError::Malformed(input.to_string()));
    }
    if whole.contains(',') {
        let mut groups = whole.split(',');
        let leading = groups.next().unwrap_or_default();
        if !(1 ..= 3).contains(&leading.len()) || !groups.all(|group| group.len() == 3) {
            return Err(MoneyError::Malformed(input.to_string()));
        }
    }
    let mut digits: String = whole.chars().filter(|ch| *ch != ',').collect();
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }
    Ok(digits)
}

/// Converts a non-negative decimal dollar value into cents, rejecting sub-cent precision.
fn decimal_to_cents(value: &BigDecimal, input: &str) -> Result<i64, MoneyError> {
    let scaled = value.clone() * BigDecimal::from(CENTS_PER_DOLLAR);
    let whole = scaled.with_scale(0);
    if whole != scaled {
        return Err(MoneyError::TooPrecise(input.to_string()));
    }
    let (digits, _) = whole.as_bigint_and_exponent();
    digits.to_string().parse::<i64>().map_err(|_| MoneyError::OutOfRange(input.to_string()))
}

/// Integer division rounding half away from zero (divisor must be positive).
fn div_round_half_away(numerator: i128, divisor: i128) -> i128 {
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    if remainder.abs() * 2 >= divisor { quotient + numerator.signum() } else { quotient }
}

/// Inserts comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
