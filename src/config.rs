// ============================================================================
// Arithmetic Configuration
// Tunable policy constants for decimal power and operator defaults
// ============================================================================

use crate::numeric::MAX_POW10;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale ceiling applied to intermediate squarings in `checked_pow`.
pub const DEFAULT_POWER_SCALE_CAP: u8 = 18;

/// Scale used by the `/` operator when no explicit scale is given.
pub const DEFAULT_DIVISION_SCALE: u8 = 2;

/// Policy knobs for [`ScaledDecimal`](crate::numeric::ScaledDecimal) arithmetic.
///
/// Exact operations (add, sub, mul) never consult the configuration; only
/// operations that must round pick their target scales from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalConfig {
    /// Every squared intermediate in a power computation whose scale
    /// exceeds this cap is rounded half-up down to it. Bounds coefficient
    /// growth at the cost of intermediate precision.
    pub power_scale_cap: u8,

    /// Result scale of the infallible `/` operator.
    pub default_division_scale: u8,
}

impl Default for DecimalConfig {
    fn default() -> Self {
        Self {
            power_scale_cap: DEFAULT_POWER_SCALE_CAP,
            default_division_scale: DEFAULT_DIVISION_SCALE,
        }
    }
}

impl DecimalConfig {
    /// Create a configuration with default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the power intermediate scale cap
    pub fn with_power_scale_cap(mut self, cap: u8) -> Self {
        self.power_scale_cap = cap;
        self
    }

    /// Builder method: Set the default division scale
    pub fn with_default_division_scale(mut self, scale: u8) -> Self {
        self.default_division_scale = scale;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        // A cap beyond 38 lets squared coefficients outgrow 128 bits
        if self.power_scale_cap as u32 > MAX_POW10 {
            return Err(format!(
                "Power scale cap must be at most {}",
                MAX_POW10
            ));
        }

        if self.default_division_scale as u32 > MAX_POW10 {
            return Err(format!(
                "Default division scale must be at most {}",
                MAX_POW10
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl DecimalConfig {
    /// Monetary configuration
    /// - Power intermediates capped at 18 fractional digits
    /// - Division to cents
    pub fn monetary() -> Self {
        Self::default()
    }

    /// High precision configuration
    /// - Power intermediates capped at 28 fractional digits
    /// - Division to 18 fractional digits
    pub fn high_precision() -> Self {
        Self::new()
            .with_power_scale_cap(28)
            .with_default_division_scale(18)
    }
}
