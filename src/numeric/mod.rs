// ============================================================================
// Numeric Module
// Error types shared by the integer, decimal and context layers
// ============================================================================
//
// Design principles:
// - All arithmetic returns Result (no panics)
// - Errors are Copy and carry no heap data
// - A failed operation never yields a partially built value

mod errors;

pub use errors::{NumericError, NumericResult};
