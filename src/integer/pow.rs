// ============================================================================
// Integer Powers
// ============================================================================

use crate::integer::big_integer::{BigInteger, MAX_BIT_LENGTH};
use crate::numeric::{NumericError, NumericResult};

impl BigInteger {
    /// `self^exponent`.
    ///
    /// Fails with `NegativeExponent` for a negative exponent and with
    /// `BitLengthOverflow` when the result cannot fit the bit budget; the
    /// budget is checked before any large allocation.
    pub fn pow(&self, exponent: i32) -> NumericResult<Self> {
        let exponent = u32::try_from(exponent).map_err(|_| NumericError::NegativeExponent)?;
        if self.signum == 0 {
            return Ok(if exponent == 0 {
                Self::one()
            } else {
                Self::zero()
            });
        }

        // the odd part is raised separately from the factor of two
        let twos = self.lowest_set_bit().unwrap_or(0);
        let shift = twos * u64::from(exponent);
        let odd = self.abs().shr_bits(twos as usize);
        let odd_bits = odd.magnitude_bit_length();
        let min_bits = (odd_bits - 1) * u64::from(exponent) + 1 + shift;
        if min_bits > MAX_BIT_LENGTH {
            return Err(NumericError::BitLengthOverflow);
        }

        let magnitude = odd.pow_unchecked(exponent).shl_checked(shift)?.check_range()?;
        if self.signum < 0 && exponent & 1 == 1 {
            Ok(-magnitude)
        } else {
            Ok(magnitude)
        }
    }

    /// Power of a positive value by repeated squaring, without the budget
    /// check. Used where the result size is already bounded.
    pub(crate) fn pow_unchecked(&self, exponent: u32) -> Self {
        if exponent == 0 {
            return Self::one();
        }
        if let Some(small) = self.magnitude_u64() {
            let bits = u64::from(64 - small.leading_zeros()) * u64::from(exponent);
            if bits <= 64 {
                if let Some(value) = small.checked_pow(exponent) {
                    return Self::from_u64_with_sign(1, value);
                }
            }
        }

        let mut result = Self::one();
        let mut base = self.abs();
        let mut remaining = exponent;
        loop {
            if remaining & 1 == 1 {
                result = result.multiply_unchecked(&base);
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            base = base.square_unchecked();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_powers() {
        assert_eq!(BigInteger::from(3).pow(4).unwrap(), BigInteger::from(81));
        assert_eq!(BigInteger::from(-2).pow(3).unwrap(), BigInteger::from(-8));
        assert_eq!(BigInteger::from(-2).pow(4).unwrap(), BigInteger::from(16));
        assert_eq!(BigInteger::from(12).pow(0).unwrap(), BigInteger::one());
        assert_eq!(BigInteger::zero().pow(0).unwrap(), BigInteger::one());
        assert_eq!(BigInteger::zero().pow(5).unwrap(), BigInteger::zero());
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(
            BigInteger::from(2).pow(-1),
            Err(NumericError::NegativeExponent)
        );
    }

    #[test]
    fn test_power_of_two_uses_shift() {
        let value = BigInteger::from(-4).pow(33).unwrap();
        assert_eq!(value, BigInteger::from(-1).shift_left(66).unwrap());
    }

    #[test]
    fn test_large_power_matches_repeated_multiplication() {
        let base = BigInteger::from(123_456_789);
        let mut expected = BigInteger::one();
        for _ in 0..37 {
            expected = expected.multiply(&base).unwrap();
        }
        assert_eq!(base.pow(37).unwrap(), expected);
    }

    #[test]
    fn test_budget_checked_before_computing() {
        assert_eq!(
            BigInteger::from(3).pow(i32::MAX),
            Err(NumericError::BitLengthOverflow)
        );
        assert_eq!(
            BigInteger::from(2).pow(i32::MAX),
            Err(NumericError::BitLengthOverflow)
        );
    }
}
