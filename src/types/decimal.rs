//! Exact decimal scalars for prices and quantities.
//!
//! All monetary arithmetic in the engine goes through [`Price`] and
//! [`Quantity`], thin wrappers over [`rust_decimal::Decimal`]. The wrappers
//! keep binary floating point off every monetary path and normalize values on
//! construction so that comparisons, hashing, and display are insensitive to
//! trailing zeros (`1.50` and `1.5` are the same price).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Smallest number of fractional digits an engine configuration may use.
pub const MIN_DECIMAL_SCALE: u32 = 8;

/// Errors produced while parsing or constructing decimal scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecimalError {
    /// The input text is not a valid decimal number.
    Malformed {
        /// The offending input text
        text: String,
    },

    /// A strictly positive value was required.
    NotPositive(Decimal),

    /// A non-negative value was required.
    Negative(Decimal),

    /// The value carries more fractional digits than the configured scale.
    ScaleExceeded {
        /// The offending input text
        text: String,
        /// Number of fractional digits in the input
        scale: u32,
        /// Maximum number of fractional digits allowed
        max_scale: u32,
    },
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Malformed { text } => write!(f, "malformed decimal: {text:?}"),
            DecimalError::NotPositive(value) => {
                write!(f, "value must be positive, got {value}")
            }
            DecimalError::Negative(value) => {
                write!(f, "value must not be negative, got {value}")
            }
            DecimalError::ScaleExceeded {
                text,
                scale,
                max_scale,
            } => {
                write!(
                    f,
                    "scale overflow: {text:?} has {scale} fractional digits, maximum is {max_scale}"
                )
            }
        }
    }
}

impl std::error::Error for DecimalError {}

/// Parse a decimal from its canonical text form, enforcing the scale limit.
fn parse_decimal(text: &str, max_scale: u32) -> Result<Decimal, DecimalError> {
    let value = Decimal::from_str_exact(text.trim()).map_err(|_| DecimalError::Malformed {
        text: text.to_string(),
    })?;
    let normalized = value.normalize();
    if normalized.scale() > max_scale {
        return Err(DecimalError::ScaleExceeded {
            text: text.to_string(),
            scale: normalized.scale(),
            max_scale,
        });
    }
    Ok(normalized)
}

/// A strictly positive price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Wrap a decimal as a price.
    ///
    /// # Errors
    /// Returns [`DecimalError::NotPositive`] for zero or negative values.
    pub fn new(value: Decimal) -> Result<Self, DecimalError> {
        if value <= Decimal::ZERO {
            return Err(DecimalError::NotPositive(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Parse a price from text, rejecting malformed input, non-positive
    /// values, and scale overflow.
    pub fn parse(text: &str, max_scale: u32) -> Result<Self, DecimalError> {
        Self::new(parse_decimal(text, max_scale)?)
    }

    /// The underlying decimal value.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A non-negative quantity.
///
/// Order quantities are strictly positive at submission ([`Quantity::parse`]
/// enforces this); the zero value exists for fill accumulators and aggregate
/// totals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// The zero quantity.
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);

    /// Wrap a decimal as a quantity.
    ///
    /// # Errors
    /// Returns [`DecimalError::Negative`] for negative values.
    pub fn new(value: Decimal) -> Result<Self, DecimalError> {
        if value < Decimal::ZERO {
            return Err(DecimalError::Negative(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Parse an order quantity from text, rejecting malformed input,
    /// non-positive values, and scale overflow.
    pub fn parse(text: &str, max_scale: u32) -> Result<Self, DecimalError> {
        let value = parse_decimal(text, max_scale)?;
        if value <= Decimal::ZERO {
            return Err(DecimalError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// The underlying decimal value.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether this quantity is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The smaller of two quantities.
    #[inline]
    pub fn min(self, other: Quantity) -> Quantity {
        if self.0 <= other.0 { self } else { other }
    }

    /// Subtraction that returns `None` instead of going negative.
    #[inline]
    pub fn checked_sub(self, rhs: Quantity) -> Option<Quantity> {
        if rhs.0 > self.0 {
            None
        } else {
            Some(Quantity(self.0 - rhs.0))
        }
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    /// Panics on negative results: a quantity going below zero means the
    /// matching core violated its own residual invariant.
    fn sub(self, rhs: Quantity) -> Quantity {
        match self.checked_sub(rhs) {
            Some(result) => result,
            None => panic!("quantity underflow: {} - {}", self.0, rhs.0),
        }
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The notional value of a fill: `price * quantity`, exact.
#[inline]
pub fn notional(price: Price, quantity: Quantity) -> Decimal {
    price.value() * quantity.value()
}
