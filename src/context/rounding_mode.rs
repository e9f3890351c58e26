// ============================================================================
// Rounding Modes
// Policies for discarding digits and the increment decision they imply
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding policy applied when digits are discarded.
///
/// Examples below show a single-digit result for the inputs
/// 5.5, 2.5, 1.6, 1.1, -1.1 and -2.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Away from zero
    /// - 6, 3, 2, 2, -2, -3
    Up,

    /// Toward zero (truncation)
    /// - 5, 2, 1, 1, -1, -2
    Down,

    /// Toward positive infinity
    /// - 6, 3, 2, 2, -1, -2
    Ceiling,

    /// Toward negative infinity
    /// - 5, 2, 1, 1, -2, -3
    Floor,

    /// To nearest, ties away from zero
    /// - 6, 3, 2, 1, -1, -3
    HalfUp,

    /// To nearest, ties toward zero
    /// - 5, 2, 2, 1, -1, -2
    HalfDown,

    /// To nearest, ties to the even neighbour (banker's rounding)
    /// - 6, 2, 2, 1, -1, -2
    HalfEven,

    /// Exact results only; any discarded nonzero digit is an error
    Unnecessary,
}

impl RoundingMode {
    /// Every mode, in declaration order.
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::Unnecessary,
    ];

    /// Decides whether a truncated quotient must move one unit away from zero.
    ///
    /// # Arguments
    /// * `sign` - Sign of the exact result (-1 or 1)
    /// * `half` - How the discarded fraction compares to one half
    /// * `odd_quotient` - Whether the truncated quotient is odd
    ///
    /// Only called when the discarded fraction is nonzero.
    pub fn should_increment(self, sign: i32, half: Ordering, odd_quotient: bool) -> NumericResult<bool> {
        Ok(match self {
            RoundingMode::Unnecessary => return Err(NumericError::RoundingNecessary),
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => sign > 0,
            RoundingMode::Floor => sign < 0,
            RoundingMode::HalfUp => half != Ordering::Less,
            RoundingMode::HalfDown => half == Ordering::Greater,
            RoundingMode::HalfEven => match half {
                Ordering::Less => false,
                Ordering::Greater => true,
                Ordering::Equal => odd_quotient,
            },
        })
    }

    /// Upper-case name, e.g. `HALF_EVEN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Unnecessary => "UNNECESSARY",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or(NumericError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Applies `mode` to tenths, e.g. `round_tenths(25, mode)` rounds 2.5.
    fn round_tenths(tenths: i64, mode: RoundingMode) -> NumericResult<i64> {
        let (q, r) = (tenths / 10, tenths % 10);
        if r == 0 {
            return Ok(q);
        }
        let sign = if tenths < 0 { -1 } else { 1 };
        let half = (r.abs() * 2).cmp(&10);
        let step = mode.should_increment(sign, half, q % 2 != 0)?;
        Ok(if step { q + i64::from(sign) } else { q })
    }

    #[test]
    fn test_documented_table() {
        let inputs = [55, 25, 16, 11, -11, -25];
        let expected: [(RoundingMode, [i64; 6]); 7] = [
            (RoundingMode::Up, [6, 3, 2, 2, -2, -3]),
            (RoundingMode::Down, [5, 2, 1, 1, -1, -2]),
            (RoundingMode::Ceiling, [6, 3, 2, 2, -1, -2]),
            (RoundingMode::Floor, [5, 2, 1, 1, -2, -3]),
            (RoundingMode::HalfUp, [6, 3, 2, 1, -1, -3]),
            (RoundingMode::HalfDown, [5, 2, 2, 1, -1, -2]),
            (RoundingMode::HalfEven, [6, 2, 2, 1, -1, -2]),
        ];
        for (mode, results) in expected {
            for (input, result) in inputs.iter().zip(results) {
                assert_eq!(round_tenths(*input, mode).unwrap(), result, "{mode} {input}");
            }
        }
    }

    #[test]
    fn test_unnecessary_rejects_inexact() {
        assert_eq!(
            round_tenths(11, RoundingMode::Unnecessary),
            Err(NumericError::RoundingNecessary)
        );
        assert_eq!(round_tenths(20, RoundingMode::Unnecessary), Ok(2));
    }

    #[test]
    fn test_name_round_trip() {
        for mode in RoundingMode::ALL {
            assert_eq!(mode.to_string().parse::<RoundingMode>().unwrap(), mode);
        }
        assert_eq!(
            "half_even".parse::<RoundingMode>(),
            Err(NumericError::InvalidInput)
        );
    }
}
