// ============================================================================
// Context Module
// Rounding modes and math contexts
// ============================================================================

mod math_context;
mod rounding_mode;

pub use math_context::MathContext;
pub use rounding_mode::RoundingMode;
