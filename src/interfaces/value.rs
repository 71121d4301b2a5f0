// ============================================================================
// Host Value Interface
// Defines the contract for moving decimals across a storage driver boundary
// ============================================================================

use crate::numeric::{NullableDecimal, NumericResult, ParseErrorKind, ScaledDecimal};

/// The value kinds a storage driver hands over or accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// SQL NULL
    Null,
    /// Raw bytes, holding decimal text
    Bytes(Vec<u8>),
    /// Decimal text
    Text(String),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
}

/// Types that can be populated from a [`HostValue`].
pub trait ScanValue: Sized {
    /// Convert a driver value into `Self`.
    ///
    /// # Errors
    /// Returns the parse or overflow error of the underlying conversion.
    fn scan_value(value: &HostValue) -> NumericResult<Self>;
}

/// Types that can be exported as a [`HostValue`].
pub trait ToValue {
    fn to_value(&self) -> HostValue;
}

impl ScanValue for ScaledDecimal {
    fn scan_value(value: &HostValue) -> NumericResult<Self> {
        let scanned = match value {
            HostValue::Null => Err(ParseErrorKind::UnexpectedNull.into()),
            HostValue::Bytes(buf) => ScaledDecimal::from_bytes(buf),
            HostValue::Text(text) => text.parse(),
            HostValue::Int(i) => Ok(ScaledDecimal::from_i64(*i)),
            HostValue::Float(f) => ScaledDecimal::from_f64(*f),
        };
        scanned.inspect_err(|err| tracing::debug!(?value, %err, "cannot scan host value"))
    }
}

impl ToValue for ScaledDecimal {
    fn to_value(&self) -> HostValue {
        HostValue::Bytes(self.to_bytes())
    }
}

impl ScanValue for NullableDecimal {
    fn scan_value(value: &HostValue) -> NumericResult<Self> {
        match value {
            HostValue::Null => Ok(NullableDecimal::NULL),
            other => ScaledDecimal::scan_value(other).map(NullableDecimal::new),
        }
    }
}

impl ToValue for NullableDecimal {
    fn to_value(&self) -> HostValue {
        match self.get() {
            Some(d) => d.to_value(),
            None => HostValue::Null,
        }
    }
}
