//! Price Parsing and Ranges
//!
//! Prices arrive as display strings ("$22.50"). Filter and sort both go
//! through `parse_price` so they never disagree about an amount.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriceRangeError {
    #[error("Price bounds must be finite, got [{0}, {1}]")]
    NonFinite(f64, f64),

    #[error("Price range minimum {0} exceeds maximum {1}")]
    Inverted(f64, f64),
}

/// Parse a display price into an amount.
///
/// Every character that is not an ASCII digit or `.` is dropped, then the
/// longest `digits[.digits]` prefix of the rest is read, so a stray trailing
/// `.` does not lose the amount. Nothing readable yields 0.
pub fn parse_price(price_text: &str) -> f64 {
    let digits: String = price_text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match numeric_prefix(&digits).parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => {
            tracing::debug!(price = price_text, "unparseable price, treating as 0");
            0.0
        }
    }
}

/// `12.5` out of `12.5.3`; `.5` out of `.5.`; empty when no digit leads.
fn numeric_prefix(digits: &str) -> &str {
    let bytes = digits.as_bytes();
    let whole = bytes.iter().take_while(|b| b.is_ascii_digit()).count();

    let fraction = match bytes.get(whole) {
        Some(b'.') => bytes[whole + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count(),
        _ => 0,
    };

    if fraction > 0 {
        &digits[..whole + 1 + fraction]
    } else {
        &digits[..whole]
    }
}

/// Inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange", into = "RawPriceRange")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Serialize, Deserialize)]
struct RawPriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Build a range, rejecting inverted or non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, PriceRangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PriceRangeError::NonFinite(min, max));
        }
        if min > max {
            return Err(PriceRangeError::Inverted(min, max));
        }
        Ok(Self { min, max })
    }

    /// The range that admits every price, including unparseable ones (0).
    pub fn unrestricted() -> Self {
        Self {
            min: 0.0,
            max: f64::MAX,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.min <= amount && amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = PriceRangeError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl From<PriceRange> for RawPriceRange {
    fn from(range: PriceRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}
