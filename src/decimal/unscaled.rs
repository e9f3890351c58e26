// ============================================================================
// Unscaled Values
// Compact i64 or inflated BigInteger coefficient of a BigDecimal
// ============================================================================

use crate::cache::{big_ten_to_the, checked_big_ten_to_the, long_ten_power};
use crate::integer::BigInteger;
use crate::numeric::NumericResult;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Coefficient of a `BigDecimal`.
///
/// `Big` is used only when the value does not fit in an i64, so every
/// value has exactly one representation and the derived equality and
/// hashing are value-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Unscaled {
    Compact(i64),
    Big(BigInteger),
}

impl Unscaled {
    pub(crate) const ZERO: Unscaled = Unscaled::Compact(0);

    /// Compacts `value` when it fits in an i64.
    #[inline]
    pub(crate) fn from_big(value: BigInteger) -> Self {
        match value.to_i64_checked() {
            Some(compact) => Unscaled::Compact(compact),
            None => Unscaled::Big(value),
        }
    }

    #[inline]
    pub(crate) fn from_i128(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(compact) => Unscaled::Compact(compact),
            Err(_) => Unscaled::Big(BigInteger::from(value)),
        }
    }

    #[inline]
    pub(crate) fn signum(&self) -> i32 {
        match self {
            Unscaled::Compact(v) => v.signum() as i32,
            Unscaled::Big(b) => b.signum(),
        }
    }

    #[inline]
    pub(crate) fn is_zero(&self) -> bool {
        matches!(self, Unscaled::Compact(0))
    }

    pub(crate) fn as_big(&self) -> Cow<'_, BigInteger> {
        match self {
            Unscaled::Compact(v) => Cow::Owned(BigInteger::from(*v)),
            Unscaled::Big(b) => Cow::Borrowed(b),
        }
    }

    pub(crate) fn into_big(self) -> BigInteger {
        match self {
            Unscaled::Compact(v) => BigInteger::from(v),
            Unscaled::Big(b) => b,
        }
    }

    pub(crate) fn negate(&self) -> Self {
        match self {
            Unscaled::Compact(v) => match v.checked_neg() {
                Some(negated) => Unscaled::Compact(negated),
                None => Unscaled::Big(BigInteger::from(*v).negate()),
            },
            Unscaled::Big(b) => Unscaled::from_big(b.negate()),
        }
    }

    pub(crate) fn abs(&self) -> Self {
        if self.signum() < 0 {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Whether the value is odd.
    pub(crate) fn is_odd(&self) -> bool {
        match self {
            Unscaled::Compact(v) => v & 1 != 0,
            Unscaled::Big(b) => b.test_bit(0),
        }
    }

    // ========================================================================
    // Digit Length
    // ========================================================================

    /// Number of decimal digits in the absolute value; zero has one digit.
    pub(crate) fn digit_length(&self) -> u32 {
        match self {
            Unscaled::Compact(v) => long_digit_length(v.unsigned_abs()),
            Unscaled::Big(b) => big_digit_length(b),
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub(crate) fn add(&self, other: &Self) -> NumericResult<Self> {
        match (self, other) {
            (Unscaled::Compact(a), Unscaled::Compact(b)) => Ok(match a.checked_add(*b) {
                Some(sum) => Unscaled::Compact(sum),
                None => Unscaled::from_i128(i128::from(*a) + i128::from(*b)),
            }),
            (a, b) => Ok(Unscaled::from_big(a.as_big().add(&b.as_big())?)),
        }
    }

    pub(crate) fn multiply(&self, other: &Self) -> NumericResult<Self> {
        match (self, other) {
            (Unscaled::Compact(a), Unscaled::Compact(b)) => Ok(match a.checked_mul(*b) {
                Some(product) => Unscaled::Compact(product),
                None => Unscaled::from_i128(i128::from(*a) * i128::from(*b)),
            }),
            (a, b) => Ok(Unscaled::from_big(a.as_big().multiply(&b.as_big())?)),
        }
    }

    /// `self × 10^n`, refusing results past the bit budget.
    pub(crate) fn multiply_power_ten(&self, n: u32) -> NumericResult<Self> {
        if n == 0 || self.is_zero() {
            return Ok(self.clone());
        }
        if let (Unscaled::Compact(v), Some(power)) = (self, long_ten_power(n)) {
            return Ok(match v.checked_mul(power) {
                Some(product) => Unscaled::Compact(product),
                None => Unscaled::from_i128(i128::from(*v) * i128::from(power)),
            });
        }
        let factor = checked_big_ten_to_the(n)?;
        Ok(Unscaled::from_big(self.as_big().multiply(&factor)?))
    }

    /// `self × 10^n` where the caller has bounded the result size.
    pub(crate) fn scale_up(&self, n: u32) -> Self {
        if n == 0 || self.is_zero() {
            return self.clone();
        }
        if let (Unscaled::Compact(v), Some(power)) = (self, long_ten_power(n)) {
            return Unscaled::from_i128(i128::from(*v) * i128::from(power));
        }
        Unscaled::from_big(self.as_big().multiply_unchecked(&big_ten_to_the(n)))
    }

    /// Compares absolute values.
    pub(crate) fn compare_magnitude(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Unscaled::Compact(a), Unscaled::Compact(b)) => a.unsigned_abs().cmp(&b.unsigned_abs()),
            (Unscaled::Compact(a), Unscaled::Big(b)) => match b.magnitude_u64() {
                Some(m) => a.unsigned_abs().cmp(&m),
                None => Ordering::Less,
            },
            (Unscaled::Big(a), Unscaled::Compact(b)) => match a.magnitude_u64() {
                Some(m) => m.cmp(&b.unsigned_abs()),
                None => Ordering::Greater,
            },
            (Unscaled::Big(a), Unscaled::Big(b)) => a.compare_magnitude(b),
        }
    }

    /// Decimal digits of the absolute value.
    pub(crate) fn magnitude_digits(&self) -> String {
        match self {
            Unscaled::Compact(v) => v.unsigned_abs().to_string(),
            Unscaled::Big(b) => b.magnitude_digits(10),
        }
    }
}

impl Default for Unscaled {
    fn default() -> Self {
        Unscaled::ZERO
    }
}

impl std::fmt::Display for Unscaled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unscaled::Compact(v) => write!(f, "{}", v),
            Unscaled::Big(b) => write!(f, "{}", b),
        }
    }
}

/// Decimal digits in `value`; zero has one digit.
#[inline]
pub(crate) fn long_digit_length(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

/// Decimal digits in the magnitude of `value`, estimated from its bit
/// length as `r = floor((bits + 1) log10 2)` and corrected by one
/// comparison against `10^r`.
pub(crate) fn big_digit_length(value: &BigInteger) -> u32 {
    if value.is_zero() {
        return 1;
    }
    let estimate = ((value.magnitude_bit_length() + 1) * 646_456_993) >> 31;
    let estimate = estimate as u32;
    if value.compare_magnitude(&big_ten_to_the(estimate)) == Ordering::Less {
        estimate
    } else {
        estimate + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_representation() {
        assert_eq!(
            Unscaled::from_big(BigInteger::from(i64::MIN)),
            Unscaled::Compact(i64::MIN)
        );
        assert!(matches!(
            Unscaled::from_i128(i128::from(i64::MAX) + 1),
            Unscaled::Big(_)
        ));
        assert_eq!(Unscaled::from_i128(-5), Unscaled::Compact(-5));
    }

    #[test]
    fn test_negate_min_inflates() {
        let negated = Unscaled::Compact(i64::MIN).negate();
        assert_eq!(negated, Unscaled::Big(BigInteger::from(1u64 << 63)));
        assert_eq!(negated.negate(), Unscaled::Compact(i64::MIN));
    }

    #[test]
    fn test_digit_length() {
        assert_eq!(Unscaled::Compact(0).digit_length(), 1);
        assert_eq!(Unscaled::Compact(9).digit_length(), 1);
        assert_eq!(Unscaled::Compact(-10).digit_length(), 2);
        assert_eq!(Unscaled::Compact(i64::MIN).digit_length(), 19);
        assert_eq!(Unscaled::Compact(i64::MAX).digit_length(), 19);
        let big = BigInteger::from(10).pow(40).unwrap();
        assert_eq!(big_digit_length(&big), 41);
        assert_eq!(big_digit_length(&big.subtract(&BigInteger::one()).unwrap()), 40);
        assert_eq!(big_digit_length(&BigInteger::from(u64::MAX)), 20);
    }

    #[test]
    fn test_add_and_multiply_promote() {
        let max = Unscaled::Compact(i64::MAX);
        let sum = max.add(&Unscaled::Compact(1)).unwrap();
        assert_eq!(sum, Unscaled::from_i128(i128::from(i64::MAX) + 1));
        assert_eq!(
            sum.add(&Unscaled::Compact(-1)).unwrap(),
            Unscaled::Compact(i64::MAX)
        );
        let product = max.multiply(&max).unwrap();
        assert_eq!(
            product,
            Unscaled::from_i128(i128::from(i64::MAX) * i128::from(i64::MAX))
        );
    }

    #[test]
    fn test_multiply_power_ten() {
        assert_eq!(
            Unscaled::Compact(12).multiply_power_ten(3).unwrap(),
            Unscaled::Compact(12_000)
        );
        assert_eq!(
            Unscaled::Compact(5).multiply_power_ten(30).unwrap(),
            Unscaled::Big(BigInteger::from(5 * 10i128.pow(30)))
        );
        assert_eq!(
            Unscaled::Compact(-7).multiply_power_ten(18).unwrap(),
            Unscaled::from_i128(-7 * 10i128.pow(18))
        );
        assert!(Unscaled::Compact(1).multiply_power_ten(u32::MAX).is_err());
        assert_eq!(
            Unscaled::Compact(0).multiply_power_ten(u32::MAX).unwrap(),
            Unscaled::ZERO
        );
        assert_eq!(
            Unscaled::Compact(3).scale_up(20),
            Unscaled::from_i128(3 * 10i128.pow(20))
        );
    }

    #[test]
    fn test_compare_magnitude_across_representations() {
        let min = Unscaled::Compact(i64::MIN);
        let two_63 = Unscaled::Big(BigInteger::from(1u64 << 63));
        assert_eq!(min.compare_magnitude(&two_63), Ordering::Equal);
        assert_eq!(
            Unscaled::Compact(-3).compare_magnitude(&Unscaled::Compact(2)),
            Ordering::Greater
        );
        let huge = Unscaled::Big(BigInteger::from(10).pow(30).unwrap());
        assert_eq!(min.compare_magnitude(&huge), Ordering::Less);
        assert_eq!(huge.compare_magnitude(&min), Ordering::Greater);
    }
}
