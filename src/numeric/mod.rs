// ============================================================================
// Numeric Module
// 128-bit integers and exact scaled decimals for monetary calculations
// ============================================================================
//
// This module provides:
// - WideInt: 128-bit signed integer with checked arithmetic
// - ScaledDecimal: coefficient * 10^-scale over a WideInt coefficient
// - NullableDecimal: null-propagating wrapper for nullable columns
// - Decomposed: binary interchange parts (form, sign, magnitude, exponent)
// - NumericError: Error types for arithmetic, parsing and interchange
//
// Design principles:
// - No floating-point operations in arithmetic paths
// - Overflow is always reported, never wrapped
// - Rounding is half away from zero and shared by division and round

mod errors;
mod interchange;
mod limbs;
mod nullable;
mod scaled_decimal;
#[cfg(feature = "serde")]
mod serde_impls;
mod wide_int;

pub use errors::{ComposeErrorKind, NumericError, NumericResult, ParseErrorKind};
pub use interchange::{Decomposed, MAX_EXPONENT};
pub use nullable::NullableDecimal;
pub use scaled_decimal::ScaledDecimal;
pub use wide_int::{WideInt, MAX_POW10};
