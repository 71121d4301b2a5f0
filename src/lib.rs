// ============================================================================
// Scaled Decimal Library
// Exact fixed-point decimal arithmetic on 128-bit integers
// ============================================================================

//! # Scaled Decimal
//!
//! Exact decimal arithmetic for monetary and financial computation.
//!
//! ## Features
//!
//! - **128-bit integers** (`WideInt`) with overflow-checked arithmetic
//! - **Scaled decimals** (`ScaledDecimal`) with explicit rounding scales
//! - **Half-away-from-zero rounding** shared by division, rounding and powers
//! - **Nullable wrapper** for SQL-style null propagation
//! - **Binary interchange** and host value adapters for storage drivers
//!
//! ## Example
//!
//! ```rust
//! use scaled_decimal::prelude::*;
//!
//! // 100000 at 6.5% compounded over 20 years
//! let principal: ScaledDecimal = "100000".parse()?;
//! let rate = "6.5".parse::<ScaledDecimal>()?.checked_div("100".parse()?, 3)?;
//! let growth = ScaledDecimal::ONE.checked_add(rate)?.checked_pow(20)?;
//! let total = principal.checked_mul(growth)?.round(2)?;
//! assert_eq!(total.to_string(), "352364.51");
//!
//! // Nulls propagate
//! let missing = NullableDecimal::NULL;
//! assert!(missing.checked_add(NullableDecimal::new(total))?.is_null());
//! # Ok::<(), NumericError>(())
//! ```

pub mod config;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::DecimalConfig;
    pub use crate::interfaces::{HostValue, ScanValue, ToValue};
    pub use crate::numeric::{
        Decomposed, NullableDecimal, NumericError, NumericResult, ScaledDecimal, WideInt,
    };
}
