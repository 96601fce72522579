// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Fixed-Point Money
//!
//! Exact cent-scaled amounts. A decimal input with at most two fractional
//! digits is converted once into `round(value * 100)` as an `i64`; from then
//! on every sum and comparison in the engine is exact integer arithmetic.
//!
//! ## Motivation
//!
//! Subset-sum correctness hinges on exact equality against the target.
//! Floating-point accumulation would require tolerance thresholds that can
//! both merge distinct sums and split equal ones. Converting at the boundary
//! removes that entire class of bugs.
//!
//! ## Validation
//!
//! Both constructors reject negative amounts and amounts with more than two
//! fractional digits. Over-precision is reported to the caller as an error,
//! never silently truncated.

/// Number of integer units per whole currency unit (two decimal digits).
pub const SCALE: i64 = 100;

/// Relative tolerance used by the `f64` conversion path to distinguish
/// binary representation noise (e.g. `0.07 * 100 == 7.000000000000001`)
/// from genuine third-decimal-digit precision. Representation noise of
/// `value * 100` is on the order of `scaled * 2^-52`, so a `1e-12` relative
/// bound stays three orders of magnitude above the noise while staying
/// below a tenth of a cent for every amount whose cents fit an `f64`
/// exactly.
const FLOAT_CENT_TOLERANCE: f64 = 1e-12;

/// The error type for fixed-point conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum MoneyError {
    /// The input could not be interpreted as a decimal number.
    NotANumber(String),
    /// The input was negative; the problem domain admits positive amounts only.
    Negative(String),
    /// The input carried more than two fractional digits.
    TooPrecise(String),
    /// The scaled amount does not fit in an `i64`.
    Overflow(String),
}

impl std::fmt::Display for MoneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoneyError::NotANumber(input) => {
                write!(f, "'{}' is not a decimal number", input)
            }
            MoneyError::Negative(input) => {
                write!(f, "'{}' is negative; amounts must be non-negative", input)
            }
            MoneyError::TooPrecise(input) => {
                write!(
                    f,
                    "'{}' has more than two fractional digits; precision beyond cents is rejected, not truncated",
                    input
                )
            }
            MoneyError::Overflow(input) => {
                write!(f, "'{}' does not fit the fixed-point range", input)
            }
        }
    }
}

impl std::error::Error for MoneyError {}

/// An exact cent-scaled amount.
///
/// `Money` is a transparent wrapper around an `i64` number of cents. It is
/// the only numeric type the search engine ever compares, which makes every
/// equality test in the engine exact.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money { cents: 0 };

    /// Creates a `Money` from a raw cent count.
    #[inline(always)]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns the raw cent count.
    #[inline(always)]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Checked addition in cents.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Parses a decimal literal exactly, digit by digit.
    ///
    /// Accepts `"123"`, `"123.4"`, `"123.45"`, `".45"` and surrounding
    /// whitespace. Rejects negatives, more than two fractional digits, and
    /// anything that is not a plain decimal literal.
    pub fn from_decimal_str(input: &str) -> Result<Money, MoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::NotANumber(input.to_string()));
        }
        // "-0" and "-0.00" are rejected too; a minus sign has no meaning here.
        if trimmed.starts_with('-') {
            return Err(MoneyError::Negative(input.to_string()));
        }
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let (whole, fraction) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyError::NotANumber(input.to_string()));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MoneyError::NotANumber(input.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyError::TooPrecise(input.to_string()));
        }

        let mut cents: i64 = 0;
        for c in whole.chars() {
            let digit = (c as u8 - b'0') as i64;
            cents = cents
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| MoneyError::Overflow(input.to_string()))?;
        }
        cents = cents
            .checked_mul(SCALE)
            .ok_or_else(|| MoneyError::Overflow(input.to_string()))?;

        let mut frac_cents: i64 = 0;
        for c in fraction.chars() {
            frac_cents = frac_cents * 10 + (c as u8 - b'0') as i64;
        }
        if fraction.len() == 1 {
            frac_cents *= 10;
        }
        cents = cents
            .checked_add(frac_cents)
            .ok_or_else(|| MoneyError::Overflow(input.to_string()))?;

        Ok(Money::from_cents(cents))
    }

    /// Converts a floating-point amount by rounding to the nearest cent.
    ///
    /// The rounded value must sit within a small relative tolerance of the
    /// scaled input; a genuine third decimal digit (e.g. `10.123`) is
    /// rejected as over-precision instead of being truncated.
    pub fn from_decimal_f64(value: f64) -> Result<Money, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotANumber(value.to_string()));
        }
        if value < 0.0 {
            return Err(MoneyError::Negative(value.to_string()));
        }
        let scaled = value * SCALE as f64;
        let nearest = scaled.round();
        if (scaled - nearest).abs() > FLOAT_CENT_TOLERANCE * scaled.abs().max(1.0) {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        if nearest > i64::MAX as f64 {
            return Err(MoneyError::Overflow(value.to_string()));
        }
        Ok(Money::from_cents(nearest as i64))
    }

    /// Returns the amount as a floating-point number of whole units.
    /// Intended for display layers only; the engine never reads this.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.cents as f64 / SCALE as f64
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let magnitude = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

impl std::fmt::Debug for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Money({})", self)
    }
}
