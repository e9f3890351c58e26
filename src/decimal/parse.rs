// ============================================================================
// Decimal Parsing
// Numeric string grammar: [sign] digits [. digits] [e|E [sign] digits]
// ============================================================================

use crate::context::MathContext;
use crate::decimal::big_decimal::BigDecimal;
use crate::decimal::unscaled::Unscaled;
use crate::integer::{parse_magnitude, BigInteger};
use crate::numeric::{NumericError, NumericResult};
use arrayvec::ArrayVec;
use std::str::FromStr;

/// Most significant digits accepted in an exponent.
const MAX_EXPONENT_DIGITS: usize = 10;

/// Significant digits that always fit an i64.
const MAX_COMPACT_DIGITS: usize = 18;

fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    }
}

/// Parses the digits after `e`/`E`. Leading zeros are skipped before the
/// digit limit is applied.
fn parse_exponent(bytes: &[u8]) -> NumericResult<i64> {
    let (negative, digits) = split_sign(bytes);
    if digits.is_empty() {
        return Err(NumericError::InvalidInput);
    }

    let mut significant: ArrayVec<u8, MAX_EXPONENT_DIGITS> = ArrayVec::new();
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(NumericError::InvalidInput);
        }
        if significant.is_empty() && b == b'0' {
            continue;
        }
        significant
            .try_push(b - b'0')
            .map_err(|_| NumericError::TooManyExponentDigits)?;
    }

    let magnitude = significant
        .iter()
        .fold(0i64, |acc, &digit| acc * 10 + i64::from(digit));
    Ok(if negative { -magnitude } else { magnitude })
}

pub(crate) fn parse_decimal(s: &str) -> NumericResult<BigDecimal> {
    let (negative, rest) = split_sign(s.as_bytes());
    let (mantissa, exponent) = match rest.iter().position(|&b| b == b'e' || b == b'E') {
        Some(at) => (&rest[..at], Some(&rest[at + 1..])),
        None => (rest, None),
    };

    let mut significant = Vec::with_capacity(mantissa.len());
    let mut fraction_digits = 0i64;
    let mut seen_point = false;
    let mut seen_digit = false;
    for &b in mantissa {
        match b {
            b'0'..=b'9' => {
                seen_digit = true;
                if seen_point {
                    fraction_digits += 1;
                }
                if !(significant.is_empty() && b == b'0') {
                    significant.push(b);
                }
            }
            b'.' if !seen_point => seen_point = true,
            _ => return Err(NumericError::InvalidInput),
        }
    }
    if !seen_digit {
        return Err(NumericError::InvalidInput);
    }

    let exponent = match exponent {
        Some(bytes) => parse_exponent(bytes)?,
        None => 0,
    };
    let scale = i32::try_from(fraction_digits - exponent).map_err(|_| NumericError::ScaleOutOfRange)?;

    let precision = significant.len().max(1);
    let unscaled = if significant.len() <= MAX_COMPACT_DIGITS {
        let magnitude = significant
            .iter()
            .fold(0i64, |acc, &b| acc * 10 + i64::from(b - b'0'));
        Unscaled::Compact(if negative { -magnitude } else { magnitude })
    } else {
        let signum = if negative { -1 } else { 1 };
        let magnitude = parse_magnitude(&significant, 10)?;
        Unscaled::from_big(BigInteger::from_magnitude(signum, magnitude).check_range()?)
    };
    Ok(BigDecimal::with_precision(
        unscaled,
        scale,
        u32::try_from(precision).unwrap_or(0),
    ))
}

impl BigDecimal {
    /// Parses `s` and rounds the result to `mc`.
    pub fn parse_with_context(s: &str, mc: MathContext) -> NumericResult<BigDecimal> {
        mc.round(&parse_decimal(s)?)
    }
}

impl FromStr for BigDecimal {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RoundingMode;

    #[test]
    fn test_parse_plain() {
        let value: BigDecimal = "-123.4500".parse().unwrap();
        assert_eq!(value.unscaled_value(), BigInteger::from(-1234500));
        assert_eq!(value.scale(), 4);
        assert_eq!(value.precision(), 7);
        let value: BigDecimal = "+.5".parse().unwrap();
        assert_eq!((value.unscaled_value(), value.scale()), (BigInteger::from(5), 1));
        let value: BigDecimal = "7.".parse().unwrap();
        assert_eq!((value.unscaled_value(), value.scale()), (BigInteger::from(7), 0));
    }

    #[test]
    fn test_parse_zeros() {
        let value: BigDecimal = "000.000".parse().unwrap();
        assert!(value.is_zero());
        assert_eq!(value.scale(), 3);
        assert_eq!(value.precision(), 1);
        let value: BigDecimal = "-0".parse().unwrap();
        assert!(value.is_identical(&BigDecimal::zero()));
        let value: BigDecimal = "0012".parse().unwrap();
        assert_eq!(value.precision(), 2);
    }

    #[test]
    fn test_parse_exponent() {
        let value: BigDecimal = "1.23E+5".parse().unwrap();
        assert_eq!((value.unscaled_value(), value.scale()), (BigInteger::from(123), -3));
        let value: BigDecimal = "-4e-0003".parse().unwrap();
        assert_eq!((value.unscaled_value(), value.scale()), (BigInteger::from(-4), 3));
        let value: BigDecimal = "1E00000000000000000002".parse().unwrap();
        assert_eq!(value.scale(), -2);
        let value: BigDecimal = "1E2147483648".parse().unwrap();
        assert_eq!(value.scale(), i32::MIN);
    }

    #[test]
    fn test_parse_inflated() {
        let text = "-12345678901234567890.123";
        let value: BigDecimal = text.parse().unwrap();
        assert!(!value.is_compact());
        assert_eq!(value.scale(), 3);
        assert_eq!(value.precision(), 23);
        assert_eq!(value.to_string(), text);
        let value: BigDecimal = "9223372036854775807".parse().unwrap();
        assert!(value.is_compact());
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "-", ".", "e5", "1e", "1e+", "1.2.3", "1,5", " 1", "1e5.0", "--1", "0x10"] {
            assert_eq!(bad.parse::<BigDecimal>(), Err(NumericError::InvalidInput), "{bad:?}");
        }
        assert_eq!(
            "1e12345678901".parse::<BigDecimal>(),
            Err(NumericError::TooManyExponentDigits)
        );
        assert_eq!(
            "1e2147483649".parse::<BigDecimal>(),
            Err(NumericError::ScaleOutOfRange)
        );
        assert_eq!(
            "0.1e-2147483648".parse::<BigDecimal>(),
            Err(NumericError::ScaleOutOfRange)
        );
    }

    #[test]
    fn test_parse_with_context() {
        let mc = MathContext::with_rounding(3, RoundingMode::HalfEven);
        let value = BigDecimal::parse_with_context("2.345", mc).unwrap();
        assert_eq!(value.to_string(), "2.34");
        assert_eq!(
            BigDecimal::parse_with_context("2.345", MathContext::with_rounding(3, RoundingMode::Unnecessary)),
            Err(NumericError::RoundingNecessary)
        );
    }
}
