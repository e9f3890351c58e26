// ============================================================================
// Math Context
// Precision and rounding policy for context-aware decimal operations
// ============================================================================

use crate::context::RoundingMode;
use crate::decimal::BigDecimal;
use crate::numeric::{NumericError, NumericResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Precision (significant digits) plus rounding mode.
///
/// A precision of 0 means unlimited: operations taking a context then
/// return exact results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathContext {
    /// Significant digits kept by rounding (0 = unlimited)
    precision: u32,

    /// Policy for discarded digits
    rounding_mode: RoundingMode,
}

impl MathContext {
    /// Create a context with `precision` digits and `HalfUp` rounding
    pub const fn new(precision: u32) -> Self {
        Self {
            precision,
            rounding_mode: RoundingMode::HalfUp,
        }
    }

    /// Create a context with an explicit rounding mode
    pub const fn with_rounding(precision: u32, rounding_mode: RoundingMode) -> Self {
        Self {
            precision,
            rounding_mode,
        }
    }

    /// Builder method: Set precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set rounding mode
    pub fn with_rounding_mode(mut self, rounding_mode: RoundingMode) -> Self {
        self.rounding_mode = rounding_mode;
        self
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Whether results are exact (precision 0).
    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.precision == 0
    }

    /// Validate the context
    pub fn validate(&self) -> Result<(), String> {
        if self.precision > i32::MAX as u32 {
            return Err("Precision cannot exceed i32::MAX digits".to_string());
        }
        Ok(())
    }

    /// Round `value` to this context's precision.
    ///
    /// Returns the value unchanged when it already fits. Fails with
    /// `RoundingNecessary` under `Unnecessary` when digits would be lost.
    pub fn round(&self, value: &BigDecimal) -> NumericResult<BigDecimal> {
        value.round_to_precision(self.precision, self.rounding_mode)
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl MathContext {
    /// Unlimited precision, exact arithmetic
    pub const UNLIMITED: MathContext = MathContext::with_rounding(0, RoundingMode::HalfUp);

    /// IEEE 754R Decimal32: 7 digits, half-even
    pub const DECIMAL32: MathContext = MathContext::with_rounding(7, RoundingMode::HalfEven);

    /// IEEE 754R Decimal64: 16 digits, half-even
    pub const DECIMAL64: MathContext = MathContext::with_rounding(16, RoundingMode::HalfEven);

    /// IEEE 754R Decimal128: 34 digits, half-even
    pub const DECIMAL128: MathContext = MathContext::with_rounding(34, RoundingMode::HalfEven);
}

impl fmt::Display for MathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "precision={} roundingMode={}",
            self.precision, self.rounding_mode
        )
    }
}

impl FromStr for MathContext {
    type Err = NumericError;

    /// Parses the `Display` form, `precision=<digits> roundingMode=<NAME>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, mode) = s
            .strip_prefix("precision=")
            .and_then(|rest| rest.split_once(" roundingMode="))
            .ok_or(NumericError::InvalidInput)?;
        if precision.is_empty() || !precision.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidInput);
        }
        let precision: u32 = precision.parse().map_err(|_| NumericError::InvalidInput)?;
        let context = MathContext::with_rounding(precision, mode.parse()?);
        context
            .validate()
            .map_err(|_| NumericError::InvalidInput)?;
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let mc = MathContext::new(10);
        assert_eq!(mc.precision(), 10);
        assert_eq!(mc.rounding_mode(), RoundingMode::HalfUp);
        assert!(mc.validate().is_ok());
        assert!(!mc.is_unlimited());
        assert!(MathContext::default().is_unlimited());
    }

    #[test]
    fn test_builder_methods() {
        let mc = MathContext::new(5)
            .with_precision(9)
            .with_rounding_mode(RoundingMode::Floor);
        assert_eq!(mc, MathContext::with_rounding(9, RoundingMode::Floor));
    }

    #[test]
    fn test_presets() {
        assert_eq!(MathContext::DECIMAL32.precision(), 7);
        assert_eq!(MathContext::DECIMAL64.precision(), 16);
        assert_eq!(MathContext::DECIMAL128.precision(), 34);
        assert_eq!(
            MathContext::DECIMAL128.rounding_mode(),
            RoundingMode::HalfEven
        );
        assert_eq!(MathContext::UNLIMITED.precision(), 0);
    }

    #[test]
    fn test_validate_rejects_huge_precision() {
        assert!(MathContext::new(u32::MAX).validate().is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let mc = MathContext::DECIMAL32;
        let text = mc.to_string();
        assert_eq!(text, "precision=7 roundingMode=HALF_EVEN");
        assert_eq!(text.parse::<MathContext>().unwrap(), mc);

        for bad in [
            "",
            "precision=7",
            "precision=-1 roundingMode=UP",
            "precision=7 roundingMode=SIDEWAYS",
            "precision=+7 roundingMode=UP",
        ] {
            assert_eq!(
                bad.parse::<MathContext>(),
                Err(NumericError::InvalidInput),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_round_delegates_to_value() {
        let value: BigDecimal = "123.456".parse().unwrap();
        let rounded = MathContext::new(4).round(&value).unwrap();
        assert_eq!(rounded.to_string(), "123.5");
        let exact = MathContext::UNLIMITED.round(&value).unwrap();
        assert!(exact.is_identical(&value));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let mc = MathContext::DECIMAL64;
        let json = serde_json::to_string(&mc).unwrap();
        let back: MathContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mc);
    }
}
