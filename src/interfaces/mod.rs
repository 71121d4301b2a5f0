// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod value;

pub use value::{HostValue, ScanValue, ToValue};
