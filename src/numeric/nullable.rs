// ============================================================================
// Nullable Decimal
// Null-propagating wrapper around ScaledDecimal
// ============================================================================

use super::errors::NumericResult;
use super::scaled_decimal::ScaledDecimal;
use super::wide_int::WideInt;
use crate::config::DecimalConfig;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// A [`ScaledDecimal`] that may be null, mirroring a nullable SQL column.
///
/// Every operation with a null operand yields null. Null renders as the
/// empty string and an empty string parses as null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NullableDecimal(Option<ScaledDecimal>);

impl NullableDecimal {
    /// The null value
    pub const NULL: Self = Self(None);

    /// Wrap a non-null value.
    #[inline]
    pub const fn new(value: ScaledDecimal) -> Self {
        Self(Some(value))
    }

    /// True for the null value.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }

    /// The wrapped decimal, `None` when null.
    #[inline]
    pub const fn get(self) -> Option<ScaledDecimal> {
        self.0
    }

    /// Import a float; see [`ScaledDecimal::from_f64`].
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        ScaledDecimal::from_f64(value).map(Self::new)
    }

    /// Parse text bytes. An empty buffer is null.
    pub fn from_bytes(buf: &[u8]) -> NumericResult<Self> {
        if buf.is_empty() {
            return Ok(Self::NULL);
        }
        ScaledDecimal::from_bytes(buf).map(Self::new)
    }

    /// Canonical text as bytes, `None` when null.
    pub fn to_bytes(self) -> Option<Vec<u8>> {
        self.0.map(|d| d.to_bytes())
    }

    /// Nearest `f64`, `None` when null.
    pub fn to_f64(self) -> Option<f64> {
        self.0.map(ScaledDecimal::to_f64)
    }

    /// Returns -1, 0 or +1; null counts as 0.
    pub fn sign(self) -> i32 {
        self.0.map_or(0, ScaledDecimal::sign)
    }

    // ========================================================================
    // Null-propagating Arithmetic
    // ========================================================================

    fn map(self, f: impl FnOnce(ScaledDecimal) -> NumericResult<ScaledDecimal>) -> NumericResult<Self> {
        match self.0 {
            Some(x) => f(x).map(Self::new),
            None => Ok(Self::NULL),
        }
    }

    fn zip(
        self,
        rhs: Self,
        f: impl FnOnce(ScaledDecimal, ScaledDecimal) -> NumericResult<ScaledDecimal>,
    ) -> NumericResult<Self> {
        match (self.0, rhs.0) {
            (Some(x), Some(y)) => f(x, y).map(Self::new),
            _ => Ok(Self::NULL),
        }
    }

    /// Absolute value; see [`ScaledDecimal::checked_abs`].
    pub fn checked_abs(self) -> NumericResult<Self> {
        self.map(ScaledDecimal::checked_abs)
    }

    /// Negation; see [`ScaledDecimal::checked_neg`].
    pub fn checked_neg(self) -> NumericResult<Self> {
        self.map(ScaledDecimal::checked_neg)
    }

    /// Exact sum at the larger scale.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.zip(rhs, ScaledDecimal::checked_add)
    }

    /// Exact difference at the larger scale.
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.zip(rhs, ScaledDecimal::checked_sub)
    }

    /// Exact product at the sum of the scales.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        self.zip(rhs, ScaledDecimal::checked_mul)
    }

    /// Rounded division; a null operand yields null before the zero
    /// divisor check.
    pub fn checked_div(self, rhs: Self, scale: u8) -> NumericResult<Self> {
        self.zip(rhs, |x, y| x.checked_div(y, scale))
    }

    /// Round half away from zero to `scale`.
    pub fn round(self, scale: u8) -> NumericResult<Self> {
        self.map(|x| x.round(scale))
    }

    /// `self^n` using the default [`DecimalConfig`].
    pub fn checked_pow(self, n: i32) -> NumericResult<Self> {
        self.map(|x| x.checked_pow(n))
    }

    /// `self^n`; see [`ScaledDecimal::checked_pow_with`].
    pub fn checked_pow_with(self, n: i32, config: &DecimalConfig) -> NumericResult<Self> {
        self.map(|x| x.checked_pow_with(n, config))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialOrd for NullableDecimal {
    /// Two nulls compare equal; null against a value is unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<ScaledDecimal> for NullableDecimal {
    fn from(value: ScaledDecimal) -> Self {
        Self::new(value)
    }
}

impl From<Option<ScaledDecimal>> for NullableDecimal {
    fn from(value: Option<ScaledDecimal>) -> Self {
        Self(value)
    }
}

impl From<NullableDecimal> for Option<ScaledDecimal> {
    fn from(value: NullableDecimal) -> Self {
        value.0
    }
}

impl From<i64> for NullableDecimal {
    fn from(value: i64) -> Self {
        Self::new(ScaledDecimal::from_i64(value))
    }
}

impl From<WideInt> for NullableDecimal {
    fn from(value: WideInt) -> Self {
        Self::new(ScaledDecimal::from_wide_int(value))
    }
}

impl fmt::Display for NullableDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => fmt::Display::fmt(&d, f),
            None => f.pad(""),
        }
    }
}

impl FromStr for NullableDecimal {
    type Err = super::errors::NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl Neg for NullableDecimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.checked_neg().expect("NullableDecimal negation overflow")
    }
}

impl Add for NullableDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("NullableDecimal addition overflow")
    }
}

impl Sub for NullableDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("NullableDecimal subtraction overflow")
    }
}

impl Mul for NullableDecimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("NullableDecimal multiplication overflow")
    }
}

impl Div for NullableDecimal {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let scale = DecimalConfig::default().default_division_scale;
        self.checked_div(rhs, scale).expect("NullableDecimal division failed")
    }
}
