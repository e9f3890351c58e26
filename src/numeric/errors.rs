// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision integer and decimal arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during arbitrary-precision arithmetic.
///
/// Every fallible operation in this crate returns one of these instead of a
/// partially constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exponent too large: the scale would fall below `i32::MIN`
    Overflow,
    /// Result exponent too small: the scale would grow past `i32::MAX`
    Underflow,
    /// Attempted division of a nonzero value by zero
    DivisionByZero,
    /// Attempted to divide zero by zero
    DivisionUndefined,
    /// Integer part of a quotient needs more digits than the context allows
    DivisionImpossible,
    /// Exact quotient has an infinite decimal expansion
    NonTerminatingDecimalExpansion,
    /// Integer power with a negative exponent
    NegativeExponent,
    /// Decimal power outside the supported exponent range
    ExponentOutOfRange,
    /// Digits would be discarded under `RoundingMode::Unnecessary`
    RoundingNecessary,
    /// Magnitude would exceed the supported bit length
    BitLengthOverflow,
    /// Value does not fit the requested target type
    ValueOutOfRange,
    /// Input string or value is invalid
    InvalidInput,
    /// Exponent of a numeric string has more than 10 significant digits
    TooManyExponentDigits,
    /// Numeric string implies a scale outside the `i32` range
    ScaleOutOfRange,
    /// Radix outside `2..=36`
    InvalidRadix,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => write!(f, "arithmetic overflow: exponent too large"),
            NumericError::Underflow => write!(f, "arithmetic underflow: exponent too small"),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::DivisionUndefined => write!(f, "division undefined: zero divided by zero"),
            NumericError::DivisionImpossible => write!(
                f,
                "division impossible: integer quotient exceeds the context precision"
            ),
            NumericError::NonTerminatingDecimalExpansion => write!(
                f,
                "non-terminating decimal expansion: no exact representable decimal result"
            ),
            NumericError::NegativeExponent => write!(f, "negative exponent"),
            NumericError::ExponentOutOfRange => write!(f, "exponent out of range"),
            NumericError::RoundingNecessary => write!(f, "rounding necessary"),
            NumericError::BitLengthOverflow => {
                write!(f, "magnitude exceeds the supported bit length")
            }
            NumericError::ValueOutOfRange => write!(f, "value out of range for the target type"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::TooManyExponentDigits => {
                write!(f, "invalid input: too many nonzero exponent digits")
            }
            NumericError::ScaleOutOfRange => write!(f, "invalid input: scale out of range"),
            NumericError::InvalidRadix => write!(f, "radix out of range"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: exponent too large"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::RoundingNecessary.to_string(),
            "rounding necessary"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::Underflow);
        assert_ne!(
            NumericError::DivisionByZero,
            NumericError::DivisionUndefined
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&NumericError::InvalidInput);
    }
}
