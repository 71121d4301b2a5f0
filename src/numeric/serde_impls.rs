// ============================================================================
// Serde Support
// String-encoded serialization for decimal types
// ============================================================================

use super::nullable::NullableDecimal;
use super::scaled_decimal::ScaledDecimal;
use serde::{de, ser, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Serializes as a decimal string
impl Serialize for ScaledDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserializes from a decimal string, an integer or a float
impl<'de> Deserialize<'de> for ScaledDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScaledDecimalVisitor)
    }
}

struct ScaledDecimalVisitor;

impl<'de> de::Visitor<'de> for ScaledDecimalVisitor {
    type Value = ScaledDecimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("string-encoded decimal")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse()
            .map_err(|e| E::custom(format!("Error parsing decimal '{v}': {e}")))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ScaledDecimal::from_i64(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ScaledDecimal::from_wide_int(super::WideInt::from_words(0, v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ScaledDecimal::from_f64(v).map_err(|e| E::custom(format!("Error importing float {v}: {e}")))
    }
}

/// Serializes as an optional decimal string
impl Serialize for NullableDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        self.get().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NullableDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<ScaledDecimal>::deserialize(deserializer).map(NullableDecimal::from)
    }
}
