// ============================================================================
// Time Module
// Decimal scaling of chrono durations
// ============================================================================

mod duration;

pub use duration::{duration_from_decimal_seconds, DurationScaling, NANOS_PER_SECOND};
