// ============================================================================
// Duration Scaling
// Seconds + nanoseconds <-> decimal seconds at scale 9
// ============================================================================

use crate::context::RoundingMode;
use crate::decimal::BigDecimal;
use crate::integer::BigInteger;
use crate::numeric::{NumericError, NumericResult};
use chrono::TimeDelta;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Nanosecond scale of decimal seconds.
const NANO_SCALE: i32 = 9;

/// Exact arithmetic on durations through decimal seconds.
///
/// # Example
/// ```
/// use chrono::TimeDelta;
/// use precise_decimal::time::DurationScaling;
///
/// let interval = TimeDelta::milliseconds(1500);
/// assert_eq!(interval.to_decimal_seconds().to_string(), "1.500000000");
/// assert_eq!(interval.divided_by(4).unwrap(), TimeDelta::microseconds(375_000));
/// ```
pub trait DurationScaling: Sized {
    /// Seconds with nanosecond scale (9).
    fn to_decimal_seconds(&self) -> BigDecimal;

    fn multiplied_by(&self, factor: i64) -> NumericResult<Self>;

    /// Division truncated to whole nanoseconds.
    fn divided_by(&self, divisor: i64) -> NumericResult<Self>;

    /// Multiplication by a decimal, truncated to whole nanoseconds.
    fn scaled_by(&self, factor: &BigDecimal) -> NumericResult<Self>;
}

impl DurationScaling for TimeDelta {
    fn to_decimal_seconds(&self) -> BigDecimal {
        // num_seconds truncates toward zero and subsec_nanos carries the same sign
        let nanos = i128::from(self.num_seconds()) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.subsec_nanos());
        BigDecimal::new(BigInteger::from(nanos), NANO_SCALE)
    }

    fn multiplied_by(&self, factor: i64) -> NumericResult<Self> {
        let seconds = self.to_decimal_seconds().multiply(&BigDecimal::from(factor))?;
        duration_from_decimal_seconds(&seconds)
    }

    fn divided_by(&self, divisor: i64) -> NumericResult<Self> {
        if divisor == 0 {
            return Err(NumericError::DivisionByZero);
        }
        let seconds = self.to_decimal_seconds().divide_with_scale(
            &BigDecimal::from(divisor),
            NANO_SCALE,
            RoundingMode::Down,
        )?;
        duration_from_decimal_seconds(&seconds)
    }

    fn scaled_by(&self, factor: &BigDecimal) -> NumericResult<Self> {
        let seconds = self
            .to_decimal_seconds()
            .multiply(factor)?
            .set_scale(NANO_SCALE, RoundingMode::Down)?;
        duration_from_decimal_seconds(&seconds)
    }
}

/// Converts decimal seconds into a duration.
///
/// The value must be a whole number of nanoseconds (`RoundingNecessary`
/// otherwise) and within the range of `TimeDelta` (`ValueOutOfRange`).
/// Negative values are split into floor seconds plus nonnegative nanos.
pub fn duration_from_decimal_seconds(seconds: &BigDecimal) -> NumericResult<TimeDelta> {
    let nanos = seconds.move_point_right(NANO_SCALE)?.to_big_integer_exact()?;
    let (whole, fraction) = nanos.divide_and_remainder(&BigInteger::from(NANOS_PER_SECOND))?;

    let mut secs = whole.to_i64_exact()?;
    let mut nanos = fraction.to_i64_exact()?;
    if nanos < 0 {
        secs = secs.checked_sub(1).ok_or(NumericError::ValueOutOfRange)?;
        nanos += NANOS_PER_SECOND;
    }
    TimeDelta::new(secs, nanos as u32).ok_or(NumericError::ValueOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_to_decimal_seconds() {
        assert_eq!(TimeDelta::seconds(3).to_decimal_seconds().to_string(), "3.000000000");
        assert_eq!(
            TimeDelta::milliseconds(-1500).to_decimal_seconds().to_string(),
            "-1.500000000"
        );
        assert_eq!(TimeDelta::nanoseconds(7).to_decimal_seconds().to_string(), "7E-9");
        assert_eq!(TimeDelta::zero().to_decimal_seconds().scale(), 9);
    }

    #[test]
    fn test_from_decimal_seconds() {
        assert_eq!(
            duration_from_decimal_seconds(&dec("1.25")).unwrap(),
            TimeDelta::milliseconds(1250)
        );
        assert_eq!(
            duration_from_decimal_seconds(&dec("-0.25")).unwrap(),
            TimeDelta::milliseconds(-250)
        );
        assert_eq!(
            duration_from_decimal_seconds(&dec("1E+3")).unwrap(),
            TimeDelta::seconds(1000)
        );
        assert_eq!(
            duration_from_decimal_seconds(&dec("0.0000000001")),
            Err(NumericError::RoundingNecessary)
        );
        assert_eq!(
            duration_from_decimal_seconds(&dec("1E+30")),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(
            duration_from_decimal_seconds(&dec("9223372036854776")),
            Err(NumericError::ValueOutOfRange)
        );
    }

    #[test]
    fn test_multiplied_by() {
        let interval = TimeDelta::milliseconds(1500);
        assert_eq!(interval.multiplied_by(3).unwrap(), TimeDelta::milliseconds(4500));
        assert_eq!(interval.multiplied_by(-2).unwrap(), TimeDelta::seconds(-3));
        assert_eq!(
            TimeDelta::seconds(i64::MAX / 1000).multiplied_by(2),
            Err(NumericError::ValueOutOfRange)
        );
    }

    #[test]
    fn test_divided_by() {
        assert_eq!(
            TimeDelta::seconds(1).divided_by(3).unwrap(),
            TimeDelta::nanoseconds(333_333_333)
        );
        assert_eq!(
            TimeDelta::seconds(-1).divided_by(3).unwrap(),
            TimeDelta::nanoseconds(-333_333_333)
        );
        assert_eq!(
            TimeDelta::seconds(1).divided_by(0),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_scaled_by() {
        let interval = TimeDelta::seconds(3);
        assert_eq!(interval.scaled_by(&dec("0.5")).unwrap(), TimeDelta::milliseconds(1500));
        assert_eq!(interval.scaled_by(&dec("1E-10")).unwrap(), TimeDelta::zero());
        assert_eq!(
            TimeDelta::seconds(1).scaled_by(&dec("0.3333333333333")).unwrap(),
            TimeDelta::nanoseconds(333_333_333)
        );
    }
}
