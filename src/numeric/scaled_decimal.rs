// ============================================================================
// Scaled Decimal
// Exact decimal arithmetic on a 128-bit coefficient and a runtime scale
// ============================================================================

use super::errors::{NumericError, NumericResult, ParseErrorKind};
use super::wide_int::{WideInt, MAX_POW10};
use crate::config::DecimalConfig;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Largest fractional digit count rust_decimal can hold.
const RUST_DECIMAL_MAX_SCALE: u8 = 28;

/// Decimal number `coefficient × 10^-scale`.
///
/// The coefficient is a [`WideInt`], the scale a `u8`. Scale only grows
/// implicitly (addition aligns to the larger scale, multiplication adds
/// scales); it shrinks only through the rounding operations
/// [`checked_div`](Self::checked_div), [`round`](Self::round) and negative
/// powers, all of which round half away from zero.
///
/// Equality, ordering and hashing are numeric: `1.10 == 1.1`.
///
/// # Example
/// ```
/// use scaled_decimal::numeric::ScaledDecimal;
///
/// let price: ScaledDecimal = "19.99".parse()?;
/// let qty: ScaledDecimal = "3".parse()?;
/// let total = price.checked_mul(qty)?;
/// assert_eq!(total.to_string(), "59.97");
///
/// let share = total.checked_div("7".parse()?, 2)?;
/// assert_eq!(share.to_string(), "8.57");
/// # Ok::<(), scaled_decimal::numeric::NumericError>(())
/// ```
#[derive(Clone, Copy)]
pub struct ScaledDecimal {
    coefficient: WideInt,
    scale: u8,
}

impl ScaledDecimal {
    /// Zero (scale 0)
    pub const ZERO: Self = Self::new(WideInt::ZERO, 0);

    /// One (scale 0)
    pub const ONE: Self = Self::new(WideInt::ONE, 0);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a coefficient and scale: `coefficient / 10^scale`.
    #[inline]
    pub const fn new(coefficient: WideInt, scale: u8) -> Self {
        Self { coefficient, scale }
    }

    /// Create an integer value (scale 0).
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        Self::new(WideInt::from_i64(value), 0)
    }

    /// Create an integer value from a wide integer (scale 0).
    #[inline]
    pub const fn from_wide_int(value: WideInt) -> Self {
        Self::new(value, 0)
    }

    /// Parse decimal text held in a byte buffer.
    ///
    /// # Errors
    /// Same as [`FromStr`]: `Parse` for malformed input, `Overflow` for too
    /// many digits.
    pub fn from_bytes(buf: &[u8]) -> NumericResult<Self> {
        parse_ascii(buf).inspect_err(|err| {
            tracing::debug!(input = %String::from_utf8_lossy(buf), %err, "rejected decimal input");
        })
    }

    /// Canonical text rendering as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The integer significand.
    #[inline]
    pub const fn coefficient(self) -> WideInt {
        self.coefficient
    }

    /// Number of fractional digits.
    #[inline]
    pub const fn scale(self) -> u8 {
        self.scale
    }

    /// Returns -1, 0 or +1.
    #[inline]
    pub const fn sign(self) -> i32 {
        self.coefficient.sign()
    }

    /// Check if value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.coefficient.is_zero()
    }

    /// Check if value is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.coefficient.is_negative()
    }

    /// Check if value is positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.coefficient.is_positive()
    }

    // ========================================================================
    // Scale Alignment
    // ========================================================================

    /// Express the value at a larger (or equal) scale.
    ///
    /// # Errors
    /// Returns `Overflow` if the coefficient no longer fits.
    ///
    /// # Panics
    /// Panics with the precision loss message if `scale` is smaller than the
    /// current scale; use [`round`](Self::round) to reduce scale.
    pub fn rescale(self, scale: u8) -> NumericResult<Self> {
        assert!(
            scale >= self.scale,
            "{} (rescale from {} to {})",
            NumericError::PrecisionLoss,
            self.scale,
            scale
        );
        if scale == self.scale || self.is_zero() {
            return Ok(Self::new(self.coefficient, scale));
        }
        let factor = WideInt::pow10((scale - self.scale) as u32)?;
        Ok(Self::new(self.coefficient.checked_mul(factor)?, scale))
    }

    /// Both coefficients expressed at the larger of the two scales.
    fn align(self, other: Self) -> NumericResult<(WideInt, WideInt, u8)> {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => Ok((self.coefficient, other.coefficient, self.scale)),
            Ordering::Greater => {
                let other = other.rescale(self.scale)?;
                Ok((self.coefficient, other.coefficient, self.scale))
            },
            Ordering::Less => {
                let this = self.rescale(other.scale)?;
                Ok((this.coefficient, other.coefficient, other.scale))
            },
        }
    }

    /// Same value with trailing fractional zeros removed.
    pub fn normalize(self) -> Self {
        let mut coefficient = self.coefficient;
        let mut scale = self.scale;
        while scale > 0 {
            match coefficient.checked_div_rem(WideInt::TEN) {
                Ok((q, r)) if r.is_zero() => {
                    coefficient = q;
                    scale -= 1;
                },
                _ => break,
            }
        }
        Self::new(coefficient, scale)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for the minimum coefficient.
    #[inline]
    pub fn checked_abs(self) -> NumericResult<Self> {
        Ok(Self::new(self.coefficient.checked_abs()?, self.scale))
    }

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` for the minimum coefficient.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        Ok(Self::new(self.coefficient.checked_neg()?, self.scale))
    }

    /// Checked addition. The result scale is the larger operand scale.
    ///
    /// # Errors
    /// Returns `Overflow` if alignment or the sum does not fit.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let (x, y, scale) = self.align(rhs)?;
        Ok(Self::new(x.checked_add(y)?, scale))
    }

    /// Checked subtraction. The result scale is the larger operand scale.
    ///
    /// # Errors
    /// Returns `Overflow` if alignment or the difference does not fit.
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        let (x, y, scale) = self.align(rhs)?;
        Ok(Self::new(x.checked_sub(y)?, scale))
    }

    /// Exact multiplication. The result scale is the sum of operand scales.
    ///
    /// # Errors
    /// Returns `Overflow` if the product or the summed scale does not fit.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let scale = self
            .scale
            .checked_add(rhs.scale)
            .ok_or(NumericError::Overflow)?;
        Ok(Self::new(self.coefficient.checked_mul(rhs.coefficient)?, scale))
    }

    /// Division rounded half away from zero to `scale` fractional digits.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` if the numerator cannot be brought to the required scale
    pub fn checked_div(self, rhs: Self, scale: u8) -> NumericResult<Self> {
        if rhs.is_zero() {
            tracing::debug!("division of {} by zero decimal", self);
            return Err(NumericError::DivisionByZero);
        }

        let shift = scale as i32 - self.scale as i32 + rhs.scale as i32;
        let (numerator, denominator) = match shift.cmp(&0) {
            Ordering::Equal => (self.coefficient, rhs.coefficient),
            Ordering::Greater => {
                let factor = WideInt::pow10(shift as u32)?;
                (self.coefficient.checked_mul(factor)?, rhs.coefficient)
            },
            Ordering::Less => {
                let exp = shift.unsigned_abs();
                match WideInt::pow10(exp).and_then(|factor| rhs.coefficient.checked_mul(factor)) {
                    Ok(denominator) => (self.coefficient, denominator),
                    Err(_) => {
                        let quotient = unit_quotient(self.coefficient, rhs.coefficient, exp)?;
                        return Ok(Self::new(quotient, scale));
                    },
                }
            },
        };

        let (quotient, remainder) = numerator.checked_div_rem(denominator)?;
        if remainder.is_zero() || !rounds_away(remainder, denominator)? {
            return Ok(Self::new(quotient, scale));
        }
        let step = if numerator.is_negative() != denominator.is_negative() {
            WideInt::MINUS_ONE
        } else {
            WideInt::ONE
        };
        Ok(Self::new(quotient.checked_add(step)?, scale))
    }

    /// Round half away from zero to `scale` fractional digits.
    ///
    /// A no-op when `scale` is not smaller than the current scale. Uses the
    /// same code path as [`checked_div`](Self::checked_div) so ties always
    /// resolve identically.
    ///
    /// # Errors
    /// Returns `Overflow` only in the same cases as `checked_div`.
    pub fn round(self, scale: u8) -> NumericResult<Self> {
        if self.scale <= scale {
            return Ok(self);
        }
        self.checked_div(Self::ONE, scale)
    }

    /// `self^n` using the default [`DecimalConfig`].
    ///
    /// # Errors
    /// See [`checked_pow_with`](Self::checked_pow_with).
    pub fn checked_pow(self, n: i32) -> NumericResult<Self> {
        self.checked_pow_with(n, &DecimalConfig::default())
    }

    /// `self^n` by repeated squaring.
    ///
    /// Squared intermediates whose scale exceeds `config.power_scale_cap`
    /// are rounded down to the cap before continuing. A cap above
    /// [`MAX_POW10`] fails [`DecimalConfig::validate`] and is applied as
    /// `MAX_POW10`. A negative `n` computes `1 / self^|n|` at scale
    /// `self.scale() + |n|`.
    ///
    /// # Errors
    /// - `Overflow` if an intermediate or the target scale does not fit
    /// - `DivisionByZero` for a negative power of zero
    pub fn checked_pow_with(self, n: i32, config: &DecimalConfig) -> NumericResult<Self> {
        let cap = config.power_scale_cap.min(MAX_POW10 as u8);
        if n >= 0 {
            return self.pow_unsigned(n as u32, cap);
        }
        let scale = u8::try_from(self.scale as u32 + n.unsigned_abs())
            .map_err(|_| NumericError::Overflow)?;
        let denominator = self.pow_unsigned(n.unsigned_abs(), cap)?;
        Self::ONE.checked_div(denominator, scale)
    }

    fn pow_unsigned(self, exp: u32, cap: u8) -> NumericResult<Self> {
        let mut result = Self::ONE;
        let mut base = self;
        let mut n = exp;
        loop {
            if n & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            n >>= 1;
            if n == 0 {
                break;
            }
            base = base.checked_mul(base)?;
            if base.scale > cap {
                tracing::trace!(from = base.scale, to = cap, "rounding power intermediate");
                base = base.round(cap)?;
            }
        }
        Ok(result)
    }

    // ========================================================================
    // Float Conversion
    // ========================================================================

    /// Nearest `f64`.
    pub fn to_f64(self) -> f64 {
        self.coefficient.to_f64() / 10f64.powi(self.scale as i32)
    }

    /// Import a float through its shortest round-trip decimal text.
    ///
    /// # Errors
    /// - `Parse` for NaN and infinities
    /// - `Overflow` if the float needs more than 128 bits of coefficient
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        format!("{}", value).parse()
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

/// True when `2 * |remainder| >= |divisor|`.
fn rounds_away(remainder: WideInt, divisor: WideInt) -> NumericResult<bool> {
    // |remainder| < |divisor| <= 2^127, so neither step below can overflow
    let half = remainder.checked_abs()?;
    let gap = if divisor.is_negative() {
        divisor.checked_add(half)?.checked_neg()?
    } else {
        divisor.checked_sub(half)?
    };
    Ok(half >= gap)
}

/// Rounded `numerator / (divisor * 10^exp)` for a scaled divisor outside the
/// 128-bit range, where the quotient magnitude is at most one.
fn unit_quotient(numerator: WideInt, divisor: WideInt, exp: u32) -> NumericResult<WideInt> {
    // 2|n| >= |d| * 10^exp  <=>  |n| >= |d| * 5 * 10^(exp - 1). Both sides are
    // compared as non-positive values so that 2^127 stays representable.
    let n = non_positive(numerator)?;
    let half = WideInt::pow10(exp - 1)
        .and_then(|p| p.checked_mul(WideInt::from_i64(5)))
        .and_then(|p| non_positive(divisor)?.checked_mul(p));
    match half {
        Ok(half) if n <= half => Ok(if numerator.is_negative() != divisor.is_negative() {
            WideInt::MINUS_ONE
        } else {
            WideInt::ONE
        }),
        _ => Ok(WideInt::ZERO),
    }
}

/// `-|x|`, defined for every value including `MIN`.
fn non_positive(x: WideInt) -> NumericResult<WideInt> {
    if x.is_negative() {
        Ok(x)
    } else {
        x.checked_neg()
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for ScaledDecimal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for ScaledDecimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScaledDecimal {}

impl PartialOrd for ScaledDecimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScaledDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.align(*other) {
            Ok((x, y, _)) => x.cmp(&y),
            Err(_) => {
                // The lower-scale operand outgrew 128 bits, so its magnitude
                // exceeds the other's and its sign decides.
                let (overflowed, flip) = if self.scale < other.scale {
                    (self, false)
                } else {
                    (other, true)
                };
                let ordering = if overflowed.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                if flip {
                    ordering.reverse()
                } else {
                    ordering
                }
            },
        }
    }
}

impl Hash for ScaledDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalize();
        normalized.coefficient.hash(state);
        normalized.scale.hash(state);
    }
}

impl From<i64> for ScaledDecimal {
    #[inline]
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<WideInt> for ScaledDecimal {
    #[inline]
    fn from(value: WideInt) -> Self {
        Self::from_wide_int(value)
    }
}

impl TryFrom<f64> for ScaledDecimal {
    type Error = NumericError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl Neg for ScaledDecimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("ScaledDecimal negation overflow")
    }
}

// Infallible operators for ergonomics (panic on error - use checked_* in production)
impl Add for ScaledDecimal {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("ScaledDecimal addition overflow")
    }
}

impl Sub for ScaledDecimal {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("ScaledDecimal subtraction overflow")
    }
}

impl Mul for ScaledDecimal {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("ScaledDecimal multiplication overflow")
    }
}

impl Div for ScaledDecimal {
    type Output = Self;

    /// Divides at the default division scale.
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        let scale = DecimalConfig::default().default_division_scale;
        self.checked_div(rhs, scale).expect("ScaledDecimal division failed")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScaledDecimal({}, coefficient={}, scale={})",
            self, self.coefficient, self.scale
        )
    }
}

impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.coefficient.magnitude_digits();
        let digits = std::str::from_utf8(&digits).map_err(|_| fmt::Error)?;
        let scale = self.scale as usize;

        let body = if scale == 0 {
            digits.to_string()
        } else if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            format!("{}.{}", int_part, frac_part)
        } else {
            format!("0.{:0>width$}", digits, width = scale)
        };
        f.pad_integral(!self.is_negative(), "", &body)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl ScaledDecimal {
    /// Convert from rust_decimal::Decimal. Always exact.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        // rust_decimal scales never exceed 28
        Self::new(WideInt::from_i128(d.mantissa()), d.scale() as u8)
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the scale exceeds 28
    /// - `Overflow` if the coefficient exceeds 96 bits
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        if self.scale > RUST_DECIMAL_MAX_SCALE {
            return Err(NumericError::PrecisionLoss);
        }
        rust_decimal::Decimal::try_from_i128_with_scale(
            self.coefficient.to_i128(),
            self.scale as u32,
        )
        .map_err(|_| NumericError::Overflow)
    }
}

impl From<rust_decimal::Decimal> for ScaledDecimal {
    fn from(d: rust_decimal::Decimal) -> Self {
        Self::from_decimal(d)
    }
}

impl TryFrom<ScaledDecimal> for rust_decimal::Decimal {
    type Error = NumericError;

    fn try_from(value: ScaledDecimal) -> Result<Self, Self::Error> {
        value.to_decimal()
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl FromStr for ScaledDecimal {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "123" -> coefficient 123, scale 0
    /// - "-0.010" -> coefficient -10, scale 3
    /// - "+.5" -> coefficient 5, scale 1
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// Accumulates `[+-]?` digits with at most one `.` into a coefficient.
fn parse_ascii(bytes: &[u8]) -> NumericResult<ScaledDecimal> {
    let (negative, body) = match bytes.first() {
        None => return Err(ParseErrorKind::Empty.into()),
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        Some(_) => (false, bytes),
    };

    let mut coefficient = WideInt::ZERO;
    let mut scale: u8 = 0;
    let mut seen_point = false;
    let mut seen_digit = false;

    for &ch in body {
        match ch {
            b'0'..=b'9' => {
                coefficient = coefficient.push_digit(ch - b'0', negative)?;
                if seen_point {
                    scale = scale.checked_add(1).ok_or(NumericError::Overflow)?;
                }
                seen_digit = true;
            },
            b'.' if seen_point => return Err(ParseErrorKind::MultipleDecimalPoints.into()),
            b'.' => seen_point = true,
            _ => return Err(ParseErrorKind::InvalidCharacter.into()),
        }
    }

    if !seen_digit {
        return Err(ParseErrorKind::NoDigits.into());
    }
    Ok(ScaledDecimal::new(coefficient, scale))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn dec(input: &str) -> ScaledDecimal {
        input.parse().unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(ScaledDecimal::ZERO.to_string(), "0");
        assert_eq!(ScaledDecimal::ONE.to_string(), "1");
        assert_eq!(ScaledDecimal::default(), ScaledDecimal::ZERO);
    }

    #[test]
    fn test_from_str() {
        let x = dec("123.456");
        assert_eq!(x.coefficient(), WideInt::from_i64(123_456));
        assert_eq!(x.scale(), 3);

        let y = dec("-0.010");
        assert_eq!(y.coefficient(), WideInt::from_i64(-10));
        assert_eq!(y.scale(), 3);

        assert_eq!(dec("+12.34").to_string(), "12.34");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("7.").to_string(), "7");
    }

    #[test]
    fn test_from_str_invalid() {
        let cases = [
            ("", ParseErrorKind::Empty),
            ("x", ParseErrorKind::InvalidCharacter),
            ("-x", ParseErrorKind::InvalidCharacter),
            ("+x", ParseErrorKind::InvalidCharacter),
            ("0x", ParseErrorKind::InvalidCharacter),
            ("1x", ParseErrorKind::InvalidCharacter),
            (".x", ParseErrorKind::InvalidCharacter),
            (".0x", ParseErrorKind::InvalidCharacter),
            ("..", ParseErrorKind::MultipleDecimalPoints),
            ("1.2.3", ParseErrorKind::MultipleDecimalPoints),
            ("-", ParseErrorKind::NoDigits),
            (".", ParseErrorKind::NoDigits),
            ("1-", ParseErrorKind::InvalidCharacter),
            (" 1", ParseErrorKind::InvalidCharacter),
        ];
        for (input, kind) in cases {
            assert_eq!(
                input.parse::<ScaledDecimal>(),
                Err(NumericError::Parse(kind)),
                "input {:?}",
                input
            );
            assert_eq!(
                ScaledDecimal::from_bytes(input.as_bytes()),
                Err(NumericError::Parse(kind))
            );
        }
    }

    #[test]
    fn test_pi_digits_and_overflow() {
        let pi = "3.1415926535897932384626433832795028842";
        assert_eq!(dec(pi).to_string(), pi);
        let too_long = format!("{}0", pi);
        assert_eq!(too_long.parse::<ScaledDecimal>(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(ScaledDecimal::new(WideInt::from_i64(5), 3).to_string(), "0.005");
        assert_eq!(ScaledDecimal::new(WideInt::from_i64(-5), 3).to_string(), "-0.005");
        assert_eq!(ScaledDecimal::new(WideInt::ZERO, 2).to_string(), "0.00");
        assert_eq!(ScaledDecimal::new(WideInt::from_i64(1234), 4).to_string(), "0.1234");
        assert_eq!(ScaledDecimal::new(WideInt::MIN, 0).to_string(), i128::MIN.to_string());
    }

    #[test]
    fn test_display_honours_width_and_fill() {
        assert_eq!(format!("{:>10}", dec("-1.50")), "     -1.50");
        assert_eq!(format!("{:<6}|", dec("1.5")), "1.5   |");
        assert_eq!(format!("{:*^7}", dec("0.05")), "*0.05**");
        assert_eq!(format!("{:08}", dec("-1.5")), "-00001.5");
        assert_eq!(format!("{:+}", dec("2.25")), "+2.25");
        assert_eq!(format!("{:>10}", ScaledDecimal::from_i64(42)), format!("{:>10}", WideInt::from_i64(42)));
    }

    #[test]
    fn test_sign() {
        for (x, s) in [("1.2", 1), ("-1.2", -1), ("0.0", 0), ("-0.0", 0), ("-0.1", -1), ("0.1", 1)] {
            assert_eq!(dec(x).sign(), s, "sign of {}", x);
        }
    }

    #[test]
    fn test_neg_and_abs() {
        let cases = [
            ("1.2", "-1.2", "1.2"),
            ("-1.2", "1.2", "1.2"),
            ("-0", "0", "0"),
            ("-0.00", "0.00", "0.00"),
            ("0.10", "-0.10", "0.10"),
            ("-0.01", "0.01", "0.01"),
        ];
        for (x, neg, abs) in cases {
            assert_eq!(dec(x).checked_neg().unwrap().to_string(), neg);
            assert_eq!(dec(x).checked_abs().unwrap().to_string(), abs);
        }
        assert_eq!((-dec("12.34")).to_string(), "-12.34");
    }

    #[test]
    fn test_comparison() {
        let cases = [
            ("1.2", "1.2", Ordering::Equal),
            ("-1.2", "1.2", Ordering::Less),
            ("-0.00", "0.0", Ordering::Equal),
            ("0.10", "-0.10", Ordering::Greater),
            ("0.1", "0.01", Ordering::Greater),
            ("0.01", "0.1", Ordering::Less),
            ("1.10", "1.1", Ordering::Equal),
        ];
        for (x, y, ordering) in cases {
            assert_eq!(dec(x).cmp(&dec(y)), ordering, "{} <> {}", x, y);
        }
        assert_eq!(dec("1.1").min(dec("2.0")), dec("1.1"));
        assert_eq!(dec("1.1").max(dec("2.0")), dec("2.0"));
    }

    #[test]
    fn test_comparison_when_alignment_overflows() {
        let huge = ScaledDecimal::from_wide_int(WideInt::MAX);
        let tiny = ScaledDecimal::new(WideInt::ONE, 30);
        assert!(huge > tiny);
        assert!(tiny < huge);
        let neg_huge = ScaledDecimal::from_wide_int(WideInt::MIN);
        assert!(neg_huge < tiny);
        assert!(tiny > neg_huge);
    }

    #[test]
    fn test_hash_matches_numeric_equality() {
        let mut set = HashSet::new();
        set.insert(dec("1.10"));
        assert!(set.contains(&dec("1.1")));
        assert!(set.contains(&dec("1.1000")));
        assert!(!set.contains(&dec("1.01")));
        assert_eq!(dec("12.3400").normalize().scale(), 2);
        assert_eq!(dec("0.000").normalize(), ScaledDecimal::ZERO);
    }

    #[test]
    fn test_rescale() {
        let x = dec("1.5").rescale(4).unwrap();
        assert_eq!(x.to_string(), "1.5000");
        let big = ScaledDecimal::from_wide_int(WideInt::MAX);
        assert_eq!(big.rescale(1), Err(NumericError::Overflow));
        assert_eq!(ScaledDecimal::ZERO.rescale(200).unwrap().scale(), 200);
    }

    #[test]
    #[should_panic(expected = "precision loss")]
    fn test_rescale_down_panics() {
        let _ = dec("1.25").rescale(1);
    }

    #[test]
    fn test_checked_add() {
        let cases = [
            ("1.2", "1.2", "2.4"),
            ("-1.2", "1.2", "0.0"),
            ("-0.00", "0.0", "0.00"),
            ("0.1", "0.01", "0.11"),
            ("-0.01", "0.1", "0.09"),
        ];
        for (x, y, z) in cases {
            assert_eq!(dec(x).checked_add(dec(y)).unwrap().to_string(), z, "{} + {}", x, y);
        }
        let max = ScaledDecimal::from_wide_int(WideInt::MAX);
        assert_eq!(max.checked_add(ScaledDecimal::ONE), Err(NumericError::Overflow));
    }

    #[test]
    fn test_checked_sub() {
        let cases = [
            ("1.2", "1.2", "0.0"),
            ("-1.2", "1.2", "-2.4"),
            ("-0.01", "0.01", "-0.02"),
            ("0.1", "0.01", "0.09"),
            ("-0.01", "0.1", "-0.11"),
        ];
        for (x, y, z) in cases {
            assert_eq!(dec(x).checked_sub(dec(y)).unwrap().to_string(), z, "{} - {}", x, y);
        }
    }

    #[test]
    fn test_checked_mul() {
        let cases = [
            ("1.2", "0", "0.0"),
            ("1.2", "-1", "-1.2"),
            ("1.2", "10", "12.0"),
            ("-1.2", "-2", "2.4"),
            ("1.5", "1.5", "2.25"),
        ];
        for (x, y, z) in cases {
            assert_eq!(dec(x).checked_mul(dec(y)).unwrap().to_string(), z, "{} * {}", x, y);
        }
        let a = ScaledDecimal::new(WideInt::ONE, 200);
        assert_eq!(a.checked_mul(a), Err(NumericError::Overflow));
    }

    #[test]
    fn test_checked_div() {
        let cases = [
            ("10", "1", 2, "10.00"),
            ("-10", "2", 2, "-5.00"),
            ("10", "-2", 2, "-5.00"),
            ("-10", "-2", 2, "5.00"),
            ("1", "2", 2, "0.50"),
            ("1", "3", 2, "0.33"),
            ("1", "3", 0, "0"),
            ("2", "3", 2, "0.67"),
            ("1", "10000", 4, "0.0001"),
            ("10", "2", 0, "5"),
            ("100", "3", 2, "33.33"),
            ("1.5", "0.5", 1, "3.0"),
            ("0.07", "2", 2, "0.04"),
            ("-0.07", "2", 2, "-0.04"),
        ];
        for (x, y, scale, z) in cases {
            assert_eq!(dec(x).checked_div(dec(y), scale).unwrap().to_string(), z, "{} / {} @{}", x, y, scale);
        }
    }

    #[test]
    fn test_div_rounds_away_when_quotient_truncates_to_zero() {
        assert_eq!(dec("-2").checked_div(dec("3"), 0).unwrap().to_string(), "-1");
        assert_eq!(dec("2").checked_div(dec("-3"), 0).unwrap().to_string(), "-1");
        assert_eq!(dec("-1").checked_div(dec("3"), 0).unwrap().to_string(), "0");
    }

    #[test]
    fn test_div_by_zero() {
        for x in ["1", "0", "-3.5"] {
            assert_eq!(dec(x).checked_div(dec("0"), 2), Err(NumericError::DivisionByZero));
            assert_eq!(dec(x).checked_div(dec("0.000"), 0), Err(NumericError::DivisionByZero));
        }
    }

    #[test]
    fn test_round() {
        let cases = [
            ("1.234", 2, "1.23"),
            ("1.235", 2, "1.24"),
            ("-1.234", 2, "-1.23"),
            ("-1.235", 2, "-1.24"),
            ("1.23", 2, "1.23"),
            ("1.2", 4, "1.2"),
            ("0.5", 0, "1"),
            ("-0.5", 0, "-1"),
        ];
        for (x, scale, r) in cases {
            assert_eq!(dec(x).round(scale).unwrap().to_string(), r, "round {} to {}", x, scale);
        }
    }

    #[test]
    fn test_round_far_below_scale() {
        let tiny = ScaledDecimal::new(WideInt::MAX, 60);
        assert_eq!(tiny.round(2).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_div_when_scaled_divisor_leaves_range() {
        // Scaling the divisor by 10^38 overflows; the quotient still rounds to zero
        let ten = ScaledDecimal::from_i64(10);
        let q = ScaledDecimal::new(WideInt::ONE, 38).checked_div(ten, 0).unwrap();
        assert!(q.is_zero());
        assert_eq!(q.scale(), 0);
        let q = ScaledDecimal::new(WideInt::ONE, 39).checked_div(ten, 0).unwrap();
        assert!(q.is_zero());

        let tiny = dec("0.00000000000000000001");
        let huge = dec("100000000000000000000");
        assert_eq!(tiny.checked_div(huge, 0).unwrap().to_string(), "0");
        assert_eq!(tiny.round(0).unwrap().to_string(), "0");
    }

    #[test]
    fn test_div_when_scaled_divisor_leaves_range_rounds_to_unit() {
        // MIN/10 divided by 2e37: -0.85..., the scaled divisor 2e38 does not fit
        let x = ScaledDecimal::new(WideInt::MIN, 1);
        let y = ScaledDecimal::from_wide_int(WideInt::from_i128(2 * 10i128.pow(37)));
        assert_eq!(x.checked_div(y, 0).unwrap().to_string(), "-1");
        assert_eq!(x.checked_div(-y, 0).unwrap().to_string(), "1");

        // MAX/10 divided by 4e37: 0.425..., rounds down
        let x = ScaledDecimal::new(WideInt::MAX, 1);
        let y = ScaledDecimal::from_wide_int(WideInt::from_i128(4 * 10i128.pow(37)));
        assert_eq!(x.checked_div(y, 0).unwrap().to_string(), "0");
    }

    #[test]
    fn test_pow() {
        let cases = [
            ("2", 0, "1"),
            ("2", 1, "2"),
            ("2", 8, "256"),
            ("10", 9, "1000000000"),
            ("10", -1, "0.1"),
            ("10", -2, "0.01"),
            ("10", -9, "0.000000001"),
            ("1.5", 2, "2.25"),
            ("-2", 3, "-8"),
        ];
        for (x, n, r) in cases {
            let base = dec(x);
            assert_eq!(base.checked_pow(n).unwrap().to_string(), r, "{}^{}", x, n);
            assert_eq!(base.to_string(), x);
        }
    }

    #[test]
    fn test_pow_caps_intermediate_scale() {
        // 1.000001^16: the ^8 and ^16 squarings would reach scale 48 and 96
        let x = dec("1.000001");
        let y = x.checked_pow(16).unwrap();
        assert_eq!(y.scale(), 18);

        let config = DecimalConfig::new().with_power_scale_cap(10);
        let z = x.checked_pow_with(16, &config).unwrap();
        assert_eq!(z.scale(), 10);
        assert_eq!(z.round(6).unwrap().to_string(), "1.000016");
    }

    #[test]
    fn test_pow_cap_above_range_is_bounded() {
        // 1e-20 squared has scale 40, beyond any representable power of ten
        let x = ScaledDecimal::new(WideInt::ONE, 20);
        let config = DecimalConfig::new().with_power_scale_cap(200);
        assert!(config.validate().is_err());
        let y = x.checked_pow_with(2, &config).unwrap();
        assert_eq!(y.scale(), 38);
        assert!(y.is_zero());
        assert_eq!(y, x.checked_pow_with(2, &DecimalConfig::new().with_power_scale_cap(38)).unwrap());
    }

    #[test]
    fn test_pow_errors() {
        assert_eq!(dec("0").checked_pow(-1), Err(NumericError::DivisionByZero));
        assert_eq!(dec("10").checked_pow(39), Err(NumericError::Overflow));
        assert_eq!(dec("0.5").checked_pow(-300), Err(NumericError::Overflow));
    }

    #[test]
    fn test_compound_interest() {
        let principal = dec("100000");
        let rate = dec("6.5").checked_div(dec("100"), 3).unwrap();
        let growth = ScaledDecimal::ONE.checked_add(rate).unwrap().checked_pow(20).unwrap();
        let total = principal.checked_mul(growth).unwrap().round(2).unwrap();
        assert_eq!(total.to_string(), "352364.51");
    }

    #[test]
    fn test_float_conversion() {
        for s in ["12.34", "-12.34", "0", "1", "-1", "9876543210.987654"] {
            assert_eq!(dec(s).to_f64().to_string(), s);
        }
        for f in [12.34, -12.34, 0.0, 1.0, -1.0, 9876543210.987654, 1234567890123456700000000000.0] {
            let d = ScaledDecimal::from_f64(f).unwrap();
            assert_eq!(d.to_f64(), f);
        }
        assert!(ScaledDecimal::try_from(f64::NAN).is_err());
        assert!(ScaledDecimal::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_bytes() {
        let d = ScaledDecimal::from_bytes(b"+12.34").unwrap();
        assert_eq!(d.to_bytes(), b"12.34".to_vec());
    }

    #[test]
    fn test_from_decimal() {
        use rust_decimal::Decimal;

        let d = Decimal::new(12345, 2); // 123.45
        let x = ScaledDecimal::from_decimal(d);
        assert_eq!(x.to_string(), "123.45");
        assert_eq!(x.to_decimal().unwrap(), d);
    }

    #[test]
    fn test_to_decimal_limits() {
        let fine = ScaledDecimal::new(WideInt::ONE, 29);
        assert_eq!(fine.to_decimal(), Err(NumericError::PrecisionLoss));
        let wide = ScaledDecimal::from_wide_int(WideInt::MAX);
        assert_eq!(wide.to_decimal(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_operators() {
        assert_eq!((dec("0.1") + dec("1")).to_string(), "1.1");
        assert_eq!((dec("1.1") * dec("2")).to_string(), "2.2");
        assert_eq!((dec("5") - dec("7.25")).to_string(), "-2.25");
        assert_eq!((dec("100") / dec("3")).to_string(), "33.33");
    }

    #[test]
    #[should_panic(expected = "ScaledDecimal division failed")]
    fn test_div_operator_panics_on_zero() {
        let _ = dec("1") / dec("0");
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    fn any_decimal() -> impl Strategy<Value = ScaledDecimal> {
        (any::<i128>(), any::<u8>()).prop_map(|(c, s)| ScaledDecimal::new(WideInt::from_i128(c), s))
    }

    fn small_decimal() -> impl Strategy<Value = ScaledDecimal> {
        (any::<i64>(), 0u8..=18).prop_map(|(c, s)| ScaledDecimal::new(WideInt::from_i64(c), s))
    }

    fn tiny_decimal() -> impl Strategy<Value = ScaledDecimal> {
        (any::<i32>(), 0u8..=6).prop_map(|(c, s)| ScaledDecimal::new(WideInt::from_i64(c as i64), s))
    }

    proptest! {
        #[test]
        fn prop_render_parse_round_trip(v in any_decimal()) {
            let parsed: ScaledDecimal = v.to_string().parse().unwrap();
            prop_assert_eq!(parsed.coefficient(), v.coefficient());
            prop_assert_eq!(parsed.scale(), v.scale());
        }

        #[test]
        fn prop_add_mul_commute(x in small_decimal(), y in small_decimal()) {
            prop_assert_eq!(x.checked_add(y).unwrap(), y.checked_add(x).unwrap());
            prop_assert_eq!(x.checked_mul(y).unwrap(), y.checked_mul(x).unwrap());
        }

        #[test]
        fn prop_scale_laws(x in small_decimal(), y in small_decimal()) {
            prop_assert_eq!(x.checked_add(y).unwrap().scale(), x.scale().max(y.scale()));
            prop_assert_eq!(x.checked_sub(y).unwrap().scale(), x.scale().max(y.scale()));
            prop_assert_eq!(x.checked_mul(y).unwrap().scale(), x.scale() + y.scale());
        }

        #[test]
        fn prop_division_within_half_ulp(x in tiny_decimal(), y in tiny_decimal(), scale in 0u8..=6) {
            prop_assume!(!y.is_zero());
            let q = x.checked_div(y, scale).unwrap();
            prop_assert_eq!(q.scale(), scale);
            // 2 * |q*y - x| * 10^scale <= |y|
            let error = q.checked_mul(y).unwrap().checked_sub(x).unwrap().checked_abs().unwrap();
            let unit = ScaledDecimal::from_wide_int(WideInt::pow10(scale as u32).unwrap());
            let lhs = error.checked_mul(unit).unwrap().checked_mul(ScaledDecimal::from_i64(2)).unwrap();
            prop_assert!(lhs <= y.checked_abs().unwrap());
        }

        #[test]
        fn prop_round_idempotent(v in small_decimal(), scale in 0u8..=20) {
            let once = v.round(scale).unwrap();
            prop_assert_eq!(once.round(scale).unwrap(), once);
            prop_assert_eq!(v.round(v.scale()).unwrap().scale(), v.scale());
            prop_assert!(once.scale() <= v.scale().max(scale));
        }

        #[test]
        fn prop_round_agrees_with_div(v in small_decimal(), scale in 0u8..=18) {
            prop_assume!(scale < v.scale());
            prop_assert_eq!(v.round(scale).unwrap(), v.checked_div(ScaledDecimal::ONE, scale).unwrap());
        }

        #[test]
        fn prop_cmp_consistent_with_sub(x in small_decimal(), y in small_decimal()) {
            let sign = x.checked_sub(y).unwrap().sign();
            prop_assert_eq!(x.cmp(&y) as i32, sign);
            prop_assert_eq!(y.cmp(&x), x.cmp(&y).reverse());
        }
    }
}
