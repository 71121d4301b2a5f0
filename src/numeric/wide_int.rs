// ============================================================================
// Wide Integer
// 128-bit two's-complement signed integer built from two 64-bit words
// ============================================================================

use super::errors::{NumericError, NumericResult, ParseErrorKind};
use super::limbs::{self, Limbs};
use arrayvec::ArrayVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use std::str::FromStr;

/// Maximum decimal digits of a 128-bit magnitude (2^127 has 39).
pub(crate) const MAX_DIGITS: usize = 39;

/// Largest `n` for which `10^n` fits in a `WideInt`.
pub const MAX_POW10: u32 = 38;

/// 128-bit signed integer.
///
/// The value is `high * 2^64 + low`, with `high` signed and `low` unsigned.
/// Every arithmetic operation is checked: a result that needs more than
/// 128 bits yields [`NumericError::Overflow`] instead of wrapping.
///
/// # Example
/// ```
/// use scaled_decimal::numeric::WideInt;
///
/// let x = WideInt::from(1_000_000_007i64);
/// let sq = x.checked_mul(x)?;
/// assert_eq!(sq.to_string(), "1000000014000000049");
/// # Ok::<(), scaled_decimal::numeric::NumericError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WideInt {
    hi: i64,
    lo: u64,
}

// ============================================================================
// Powers of Ten
// ============================================================================

const fn pow10_table() -> [WideInt; MAX_POW10 as usize + 1] {
    let mut table = [WideInt::ZERO; MAX_POW10 as usize + 1];
    let mut value: i128 = 1;
    let mut i = 0;
    while i <= MAX_POW10 as usize {
        table[i] = WideInt::from_i128(value);
        if i < MAX_POW10 as usize {
            value *= 10;
        }
        i += 1;
    }
    table
}

static POW10: [WideInt; MAX_POW10 as usize + 1] = pow10_table();

impl WideInt {
    /// Zero
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    /// One
    pub const ONE: Self = Self { hi: 0, lo: 1 };

    /// Ten
    pub const TEN: Self = Self { hi: 0, lo: 10 };

    /// Minus one
    pub const MINUS_ONE: Self = Self { hi: -1, lo: u64::MAX };

    /// Maximum representable value (2^127 - 1)
    pub const MAX: Self = Self { hi: i64::MAX, lo: u64::MAX };

    /// Minimum representable value (-2^127)
    pub const MIN: Self = Self { hi: i64::MIN, lo: 0 };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw high and low words.
    #[inline]
    pub const fn from_words(high: i64, low: u64) -> Self {
        Self { hi: high, lo: low }
    }

    /// Create from a signed 64-bit integer, sign-extending into the high word.
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        Self {
            hi: if value < 0 { -1 } else { 0 },
            lo: value as u64,
        }
    }

    /// Create from a native 128-bit integer.
    #[inline]
    pub const fn from_i128(value: i128) -> Self {
        Self {
            hi: (value >> 64) as i64,
            lo: value as u64,
        }
    }

    /// `10^exp`.
    ///
    /// # Errors
    /// Returns `Overflow` when `exp > 38`.
    #[inline]
    pub fn pow10(exp: u32) -> NumericResult<Self> {
        POW10
            .get(exp as usize)
            .copied()
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The signed high word.
    #[inline]
    pub const fn high(self) -> i64 {
        self.hi
    }

    /// The unsigned low word.
    #[inline]
    pub const fn low(self) -> u64 {
        self.lo
    }

    /// Convert to a native 128-bit integer.
    #[inline]
    pub const fn to_i128(self) -> i128 {
        ((self.hi as i128) << 64) | self.lo as i128
    }

    /// Convert to `i64` if the value fits.
    #[inline]
    pub const fn to_i64(self) -> Option<i64> {
        let low = self.lo as i64;
        if (self.hi == 0 && low >= 0) || (self.hi == -1 && low < 0) {
            Some(low)
        } else {
            None
        }
    }

    /// Nearest `f64`.
    pub fn to_f64(self) -> f64 {
        self.to_i128() as f64
    }

    /// Returns -1, 0 or +1.
    #[inline]
    pub const fn sign(self) -> i32 {
        if self.hi == 0 && self.lo == 0 {
            0
        } else if self.hi < 0 {
            -1
        } else {
            1
        }
    }

    /// Check if value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Check if value is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.hi < 0
    }

    /// Check if value is positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.sign() > 0
    }

    // ========================================================================
    // Sign Handling
    // ========================================================================

    /// Two's-complement negation; `MIN` maps to itself.
    #[inline]
    const fn wrapping_neg(self) -> Self {
        if self.lo == 0 {
            Self {
                hi: self.hi.wrapping_neg(),
                lo: 0,
            }
        } else {
            Self {
                hi: !self.hi,
                lo: self.lo.wrapping_neg(),
            }
        }
    }

    /// Absolute value as unsigned `(high, low)` words. Exact for `MIN`.
    #[inline]
    pub(crate) const fn unsigned_magnitude(self) -> (u64, u64) {
        let abs = if self.hi < 0 {
            self.wrapping_neg()
        } else {
            self
        };
        (abs.hi as u64, abs.lo)
    }

    #[inline]
    fn magnitude_limbs(self) -> Limbs {
        let (high, low) = self.unsigned_magnitude();
        limbs::from_words(high, low)
    }

    /// Rebuild a signed value from an unsigned magnitude.
    ///
    /// A magnitude of exactly 2^127 is only representable when negative.
    pub(crate) fn from_magnitude(high: u64, low: u64, negative: bool) -> NumericResult<Self> {
        if high > i64::MAX as u64 {
            return if negative && high == 1 << 63 && low == 0 {
                Ok(Self::MIN)
            } else {
                Err(NumericError::Overflow)
            };
        }
        let value = Self {
            hi: high as i64,
            lo: low,
        };
        Ok(if negative { value.wrapping_neg() } else { value })
    }

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` for `MIN`, which has no positive counterpart.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        if self == Self::MIN {
            Err(NumericError::Overflow)
        } else {
            Ok(self.wrapping_neg())
        }
    }

    /// Checked absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for `MIN`.
    #[inline]
    pub fn checked_abs(self) -> NumericResult<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    // ========================================================================
    // Addition and Subtraction
    // ========================================================================

    /// Checked addition with carry from the low into the high word.
    ///
    /// # Errors
    /// Returns `Overflow` when both operands share a sign and the result's
    /// sign differs from it.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let lo = self.lo.wrapping_add(rhs.lo);
        let carry = (lo < self.lo) as i64;
        let hi = self.hi.wrapping_add(rhs.hi).wrapping_add(carry);
        if (self.hi < 0) == (rhs.hi < 0) && (hi < 0) != (self.hi < 0) {
            return Err(NumericError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    /// Checked subtraction with borrow from the high word.
    ///
    /// # Errors
    /// Returns `Overflow` when the operands differ in sign and the result's
    /// sign differs from the minuend's.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        let lo = self.lo.wrapping_sub(rhs.lo);
        let borrow = (self.lo < rhs.lo) as i64;
        let hi = self.hi.wrapping_sub(rhs.hi).wrapping_sub(borrow);
        if (self.hi < 0) != (rhs.hi < 0) && (hi < 0) != (self.hi < 0) {
            return Err(NumericError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    // ========================================================================
    // Shifts and Bits
    // ========================================================================

    /// Logical left shift, zero-filling from the right.
    ///
    /// Shifting by 128 or more yields zero.
    pub const fn shl(self, n: u32) -> Self {
        if n >= 128 {
            Self::ZERO
        } else if n >= 64 {
            Self {
                hi: (self.lo << (n - 64)) as i64,
                lo: 0,
            }
        } else if n == 0 {
            self
        } else {
            Self {
                hi: (((self.hi as u64) << n) | (self.lo >> (64 - n))) as i64,
                lo: self.lo << n,
            }
        }
    }

    /// Arithmetic right shift, sign-extending from the left.
    ///
    /// Shifting by 128 or more yields 0 for non-negative values and -1 for
    /// negative ones.
    pub const fn shr(self, n: u32) -> Self {
        if n >= 128 {
            if self.hi < 0 {
                Self::MINUS_ONE
            } else {
                Self::ZERO
            }
        } else if n >= 64 {
            Self {
                hi: self.hi >> 63,
                lo: (self.hi >> (n - 64)) as u64,
            }
        } else if n == 0 {
            self
        } else {
            Self {
                hi: self.hi >> n,
                lo: (self.lo >> n) | ((self.hi as u64) << (64 - n)),
            }
        }
    }

    /// Value of bit `i`, i.e. `(self >> i) & 1`.
    ///
    /// Bits at 128 and above read as the sign bit.
    #[inline]
    pub const fn bit(self, i: u32) -> u8 {
        if i >= 128 {
            ((self.hi as u64) >> 63) as u8
        } else if i >= 64 {
            (((self.hi as u64) >> (i - 64)) & 1) as u8
        } else {
            ((self.lo >> i) & 1) as u8
        }
    }

    /// Returns a copy with bit `i` set to `value`.
    ///
    /// # Errors
    /// Returns `Overflow` when `i >= 128`.
    pub fn set_bit(self, i: u32, value: bool) -> NumericResult<Self> {
        if i >= 128 {
            return Err(NumericError::Overflow);
        }
        let mut out = self;
        if i >= 64 {
            let mask = 1i64 << (i - 64);
            out.hi = if value { out.hi | mask } else { out.hi & !mask };
        } else {
            let mask = 1u64 << i;
            out.lo = if value { out.lo | mask } else { out.lo & !mask };
        }
        Ok(out)
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Checked multiplication.
    ///
    /// Multiplies the magnitudes as four 32-bit digits each and restores the
    /// sign afterwards.
    ///
    /// # Errors
    /// Returns `Overflow` if the product does not fit in 128 bits.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::ZERO);
        }
        let product = limbs::mul(&self.magnitude_limbs(), &rhs.magnitude_limbs());
        if product[4..].iter().any(|&digit| digit != 0) {
            return Err(NumericError::Overflow);
        }
        let (high, low) = limbs::to_words(&[product[0], product[1], product[2], product[3]]);
        Self::from_magnitude(high, low, self.is_negative() != rhs.is_negative())
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Truncating division with remainder.
    ///
    /// Returns `(quotient, remainder)` with `self = quotient * divisor +
    /// remainder`; the remainder carries the dividend's sign.
    ///
    /// # Errors
    /// - `DivisionByZero` if `divisor` is zero
    /// - `Overflow` for `MIN / -1`
    pub fn checked_div_rem(self, divisor: Self) -> NumericResult<(Self, Self)> {
        if divisor.is_zero() {
            tracing::debug!("division of {} by zero", self);
            return Err(NumericError::DivisionByZero);
        }
        if divisor == Self::ONE {
            return Ok((self, Self::ZERO));
        }
        if divisor == Self::MINUS_ONE {
            return Ok((self.checked_neg()?, Self::ZERO));
        }
        if self.is_zero() {
            return Ok((Self::ZERO, Self::ZERO));
        }
        if self == divisor {
            return Ok((Self::ONE, Self::ZERO));
        }

        let (uh, ul) = self.unsigned_magnitude();
        let (vh, vl) = divisor.unsigned_magnitude();
        if (vh, vl) > (uh, ul) {
            return Ok((Self::ZERO, self));
        }

        let (q, r) = if uh == 0 && vh == 0 {
            ((0, ul / vl), (0, ul % vl))
        } else if vh == 0 && vl >> 32 == 0 {
            let (q, r) = limbs::div_rem_small(&limbs::from_words(uh, ul), vl as u32);
            (limbs::to_words(&q), (0, r as u64))
        } else {
            tracing::trace!(dividend = %self, divisor = %divisor, "multi-digit long division");
            let (q, r) = limbs::div_rem(&limbs::from_words(uh, ul), &limbs::from_words(vh, vl));
            (limbs::to_words(&q), limbs::to_words(&r))
        };

        let quotient = Self::from_magnitude(q.0, q.1, self.is_negative() != divisor.is_negative())?;
        let remainder = Self::from_magnitude(r.0, r.1, self.is_negative())?;
        Ok((quotient, remainder))
    }

    /// Checked truncating division.
    ///
    /// # Errors
    /// See [`WideInt::checked_div_rem`].
    #[inline]
    pub fn checked_div(self, divisor: Self) -> NumericResult<Self> {
        self.checked_div_rem(divisor).map(|(q, _)| q)
    }

    /// Checked remainder of truncating division.
    ///
    /// # Errors
    /// See [`WideInt::checked_div_rem`].
    #[inline]
    pub fn checked_rem(self, divisor: Self) -> NumericResult<Self> {
        self.checked_div_rem(divisor).map(|(_, r)| r)
    }

    // ========================================================================
    // Exponentiation
    // ========================================================================

    /// `self^exp` by repeated squaring over the bits of `exp`.
    ///
    /// # Errors
    /// Returns `Overflow` if any intermediate product does not fit.
    pub fn checked_pow(self, exp: u32) -> NumericResult<Self> {
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
        }
        Ok(result)
    }

    // ========================================================================
    // Decimal Digits
    // ========================================================================

    /// Appends one decimal digit: `self * 10 + digit` (or `- digit` when
    /// accumulating a negative number).
    #[inline]
    pub(crate) fn push_digit(self, digit: u8, negative: bool) -> NumericResult<Self> {
        let shifted = self.checked_mul(Self::TEN)?;
        let digit = Self::from_i64(digit as i64);
        if negative {
            shifted.checked_sub(digit)
        } else {
            shifted.checked_add(digit)
        }
    }

    /// ASCII digits of `|self|`, most significant first. Zero yields `"0"`.
    pub(crate) fn magnitude_digits(self) -> ArrayVec<u8, MAX_DIGITS> {
        let mut digits: ArrayVec<u8, MAX_DIGITS> = ArrayVec::new();
        let mut rest = self.magnitude_limbs();
        loop {
            let (q, r) = limbs::div_rem_small(&rest, 10);
            digits.push(b'0' + r as u8);
            rest = q;
            if rest == [0; 4] {
                break;
            }
        }
        digits.reverse();
        digits
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialOrd for WideInt {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WideInt {
    /// Signed high word first, then the low word as unsigned.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl From<i64> for WideInt {
    #[inline]
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i128> for WideInt {
    #[inline]
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<WideInt> for i128 {
    #[inline]
    fn from(value: WideInt) -> Self {
        value.to_i128()
    }
}

impl Neg for WideInt {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("WideInt negation overflow")
    }
}

// Infallible operators for ergonomics (panic on error - use checked_* in production)
impl Add for WideInt {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("WideInt addition overflow")
    }
}

impl Sub for WideInt {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("WideInt subtraction overflow")
    }
}

impl Mul for WideInt {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("WideInt multiplication overflow")
    }
}

impl Div for WideInt {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).expect("WideInt division failed")
    }
}

impl Rem for WideInt {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(rhs).expect("WideInt remainder failed")
    }
}

impl Shl<u32> for WideInt {
    type Output = Self;

    #[inline]
    fn shl(self, n: u32) -> Self::Output {
        WideInt::shl(self, n)
    }
}

impl Shr<u32> for WideInt {
    type Output = Self;

    #[inline]
    fn shr(self, n: u32) -> Self::Output {
        WideInt::shr(self, n)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for WideInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.magnitude_digits();
        // Digits are ASCII by construction
        let text = std::str::from_utf8(&digits).map_err(|_| fmt::Error)?;
        f.pad_integral(!self.is_negative(), "", text)
    }
}

impl fmt::Debug for WideInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideInt({}, hi={}, lo={:#x})", self, self.hi, self.lo)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl FromStr for WideInt {
    type Err = NumericError;

    /// Parse `[+-]?[0-9]+`.
    ///
    /// # Errors
    /// - `Parse` for malformed input
    /// - `Overflow` if the digits exceed 128-bit range
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseErrorKind::Empty.into());
        }
        let bytes = s.as_bytes();
        let (negative, digits) = match bytes[0] {
            b'-' => (true, &bytes[1..]),
            b'+' => (false, &bytes[1..]),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return Err(ParseErrorKind::NoDigits.into());
        }
        let mut value = Self::ZERO;
        for &ch in digits {
            if !ch.is_ascii_digit() {
                return Err(ParseErrorKind::InvalidCharacter.into());
            }
            value = value.push_digit(ch - b'0', negative)?;
        }
        Ok(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
