// ============================================================================
// Multiplication Strategy Interface
// Defines the contract for pluggable multiplication tiers
// ============================================================================

use crate::integer::BigInteger;

/// Strategy pattern interface for magnitude multiplication.
/// Implementations: Schoolbook, Karatsuba, ToomCook3
///
/// Strategies work on the full signed value and never check the bit-length
/// budget; callers do that before and after dispatch.
pub trait MultiplyStrategy: Send + Sync {
    /// Multiply two nonzero values
    ///
    /// # Arguments
    /// * `x` - Left operand
    /// * `y` - Right operand
    ///
    /// # Returns
    /// The exact product
    fn multiply(&self, x: &BigInteger, y: &BigInteger) -> BigInteger;

    /// Square a nonzero value
    ///
    /// The default multiplies the value by itself; tiers with a dedicated
    /// squaring routine override it.
    fn square(&self, x: &BigInteger) -> BigInteger {
        self.multiply(x, x)
    }

    /// Get the tier name for logging
    fn name(&self) -> &'static str;
}
