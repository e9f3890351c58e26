// ============================================================================
// Cache Module
// Shared lookup tables for scaling by powers of ten
// ============================================================================

mod powers;

pub use powers::{
    big_ten_to_the, checked_big_ten_to_the, long_ten_power, PowerTable,
    BIG_TEN_POWERS_INITIAL_LEN, BIG_TEN_POWERS_MAX_LEN, LONG_TEN_POWERS,
};
