// ============================================================================
// Binary Interchange
// Decimal <-> (form, negative, big-endian magnitude, exponent) parts
// ============================================================================
//
// The part layout is the one database drivers use to exchange decimals
// without going through text:
//
//     value = (-1)^negative * magnitude * 10^exponent
//
// Only the finite form is representable here; infinities and NaN are
// rejected on compose and never produced on decompose.

use super::errors::{ComposeErrorKind, NumericError, NumericResult};
use super::scaled_decimal::ScaledDecimal;
use super::wide_int::WideInt;
use arrayvec::ArrayVec;

/// Largest absolute exponent accepted by [`ScaledDecimal::compose`].
pub const MAX_EXPONENT: i32 = 255;

/// A decimal split into interchange parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    /// Form tag, always [`Decomposed::FORM_FINITE`] for decomposed values
    pub form: u8,
    /// Sign flag
    pub negative: bool,
    /// Unsigned big-endian magnitude: 8 bytes when it fits a u64, else 16
    pub magnitude: ArrayVec<u8, 16>,
    /// Power of ten applied to the magnitude (`-scale`)
    pub exponent: i32,
}

impl Decomposed {
    /// A finite value; the only form [`ScaledDecimal::compose`] accepts.
    pub const FORM_FINITE: u8 = 0;
    /// An infinity, rejected by compose.
    pub const FORM_INFINITE: u8 = 1;
    /// Not a number, rejected by compose.
    pub const FORM_NAN: u8 = 2;

    /// Rebuild the decimal these parts describe.
    ///
    /// # Errors
    /// See [`ScaledDecimal::compose`].
    pub fn compose(&self) -> NumericResult<ScaledDecimal> {
        ScaledDecimal::compose(self.form, self.negative, &self.magnitude, self.exponent)
    }
}

impl ScaledDecimal {
    /// Split into interchange parts. Never fails; the minimum coefficient
    /// decomposes to the 16-byte magnitude `2^127`.
    pub fn decompose(&self) -> Decomposed {
        let (high, low) = self.coefficient().unsigned_magnitude();
        let mut magnitude = ArrayVec::new();
        if high != 0 {
            magnitude.extend(high.to_be_bytes());
        }
        magnitude.extend(low.to_be_bytes());
        Decomposed {
            form: Decomposed::FORM_FINITE,
            negative: self.is_negative(),
            magnitude,
            exponent: -(self.scale() as i32),
        }
    }

    /// Build a decimal from interchange parts.
    ///
    /// Leading zero bytes of `magnitude` are ignored and an empty magnitude
    /// is zero. A positive exponent is folded into the coefficient.
    ///
    /// # Errors
    /// - `Compose(NonFiniteForm)` if `form` is not finite
    /// - `Compose(ExponentTooLarge | ExponentTooSmall)` outside ±255
    /// - `Compose(CoefficientTooLarge)` if the magnitude exceeds the signed
    ///   128-bit range (`2^127` is accepted when `negative`)
    /// - `Overflow` if folding a positive exponent does not fit
    pub fn compose(
        form: u8,
        negative: bool,
        magnitude: &[u8],
        exponent: i32,
    ) -> NumericResult<Self> {
        compose_parts(form, negative, magnitude, exponent).inspect_err(|err| {
            tracing::debug!(form, negative, exponent, bytes = magnitude.len(), %err, "rejected decimal parts");
        })
    }
}

fn compose_parts(
    form: u8,
    negative: bool,
    magnitude: &[u8],
    exponent: i32,
) -> NumericResult<ScaledDecimal> {
    if form != Decomposed::FORM_FINITE {
        return Err(ComposeErrorKind::NonFiniteForm.into());
    }
    if exponent > MAX_EXPONENT {
        return Err(ComposeErrorKind::ExponentTooLarge.into());
    }
    if exponent < -MAX_EXPONENT {
        return Err(ComposeErrorKind::ExponentTooSmall.into());
    }

    let first = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    let significant = &magnitude[first..];
    if significant.len() > 16 {
        return Err(ComposeErrorKind::CoefficientTooLarge.into());
    }

    let mut buf = [0u8; 16];
    buf[16 - significant.len()..].copy_from_slice(significant);
    let (high_bytes, low_bytes) = buf.split_at(8);
    let mut high = [0u8; 8];
    let mut low = [0u8; 8];
    high.copy_from_slice(high_bytes);
    low.copy_from_slice(low_bytes);

    let coefficient = WideInt::from_magnitude(
        u64::from_be_bytes(high),
        u64::from_be_bytes(low),
        negative,
    )
    .map_err(|_| NumericError::from(ComposeErrorKind::CoefficientTooLarge))?;

    if exponent <= 0 {
        return Ok(ScaledDecimal::new(coefficient, exponent.unsigned_abs() as u8));
    }
    if coefficient.is_zero() {
        return Ok(ScaledDecimal::ZERO);
    }
    let factor = WideInt::pow10(exponent as u32)?;
    Ok(ScaledDecimal::new(coefficient.checked_mul(factor)?, 0))
}
