// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod multiply_strategy;

pub use multiply_strategy::MultiplyStrategy;
