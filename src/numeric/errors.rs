// ============================================================================
// Numeric Errors
// Error types for 128-bit integer and scaled decimal operations
// ============================================================================

use std::fmt;

/// Reasons a decimal string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Input was empty
    Empty,
    /// No digit found (e.g. a lone sign or decimal point)
    NoDigits,
    /// A character outside `[0-9.+-]` or a sign in the wrong position
    InvalidCharacter,
    /// More than one decimal point
    MultipleDecimalPoints,
    /// A null host value was scanned into a non-nullable decimal
    UnexpectedNull,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty input"),
            ParseErrorKind::NoDigits => write!(f, "no digits"),
            ParseErrorKind::InvalidCharacter => write!(f, "non digit character"),
            ParseErrorKind::MultipleDecimalPoints => write!(f, "multiple decimal points"),
            ParseErrorKind::UnexpectedNull => write!(f, "cannot scan null into a decimal"),
        }
    }
}

/// Reasons a binary interchange tuple was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComposeErrorKind {
    /// Form tag is not finite (infinity and NaN are not representable)
    NonFiniteForm,
    /// Exponent above +255
    ExponentTooLarge,
    /// Exponent below -255
    ExponentTooSmall,
    /// Magnitude does not fit in a signed 128-bit coefficient
    CoefficientTooLarge,
}

impl fmt::Display for ComposeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeErrorKind::NonFiniteForm => write!(f, "invalid form, form must be finite"),
            ComposeErrorKind::ExponentTooLarge => write!(f, "exponent too large"),
            ComposeErrorKind::ExponentTooSmall => write!(f, "exponent too small"),
            ComposeErrorKind::CoefficientTooLarge => write!(f, "coefficient too large"),
        }
    }
}

/// Errors that can occur during 128-bit and decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result cannot be represented in 128 bits
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string is malformed
    Parse(ParseErrorKind),
    /// Binary interchange input is invalid
    Compose(ComposeErrorKind),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeds 128-bit range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::Parse(kind) => write!(f, "invalid decimal string: {}", kind),
            NumericError::Compose(kind) => write!(f, "invalid decimal parts: {}", kind),
        }
    }
}

impl std::error::Error for NumericError {}

impl From<ParseErrorKind> for NumericError {
    fn from(kind: ParseErrorKind) -> Self {
        NumericError::Parse(kind)
    }
}

impl From<ComposeErrorKind> for NumericError {
    fn from(kind: ComposeErrorKind) -> Self {
        NumericError::Compose(kind)
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
