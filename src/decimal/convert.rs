// ============================================================================
// Decimal Conversions
// Integer, floating point and rust_decimal conversions
// ============================================================================

use crate::cache::{big_ten_to_the, long_ten_power};
use crate::context::RoundingMode;
use crate::decimal::big_decimal::BigDecimal;
use crate::decimal::unscaled::Unscaled;
use crate::integer::BigInteger;
use crate::numeric::{NumericError, NumericResult};
use rust_decimal::Decimal;

/// Largest integer magnitude every f64 represents exactly.
const F64_EXACT_INT: u64 = 1 << 53;

/// Largest integer magnitude every f32 represents exactly.
const F32_EXACT_INT: u64 = 1 << 24;

/// Largest scale `rust_decimal` supports.
const DECIMAL_MAX_SCALE: i32 = 28;

/// Powers of ten that are exact in an f64.
const F64_TEN_POWERS: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Powers of ten that are exact in an f32.
const F32_TEN_POWERS: [f32; 11] = [1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10];

/// Low 64 bits of the two's-complement form.
fn low_bits(value: &Unscaled) -> i64 {
    match value {
        Unscaled::Compact(v) => *v,
        Unscaled::Big(b) => b.to_i64(),
    }
}

impl BigDecimal {
    /// Whether the value has no nonzero integer digit.
    fn fraction_only(&self) -> bool {
        i64::from(self.precision()) - i64::from(self.scale) <= 0
    }

    /// Coefficient truncated to an integer, for a positive scale below the
    /// precision.
    fn integer_part(&self) -> Unscaled {
        let drop = self.scale as u32;
        match (&self.unscaled, long_ten_power(drop)) {
            (Unscaled::Compact(v), Some(power)) => Unscaled::Compact(v / power),
            (Unscaled::Compact(_), None) => Unscaled::ZERO,
            (Unscaled::Big(b), _) => Unscaled::from_big(b.div_rem_unchecked(&big_ten_to_the(drop)).0),
        }
    }

    // ========================================================================
    // BigInteger
    // ========================================================================

    /// Integer part, fraction discarded.
    pub fn to_big_integer(&self) -> NumericResult<BigInteger> {
        Ok(self.set_scale(0, RoundingMode::Down)?.unscaled_value())
    }

    /// Integer value, failing with `RoundingNecessary` if there is a
    /// nonzero fraction.
    pub fn to_big_integer_exact(&self) -> NumericResult<BigInteger> {
        Ok(self.set_scale(0, RoundingMode::Unnecessary)?.unscaled_value())
    }

    // ========================================================================
    // Narrowing (truncating)
    // ========================================================================

    /// Low 64 bits of the integer part.
    pub fn to_i64(&self) -> i64 {
        if self.is_zero() || self.scale <= -64 || self.fraction_only() {
            return 0;
        }
        match self.scale {
            0 => low_bits(&self.unscaled),
            s if s < 0 => {
                let factor = 10u64.wrapping_pow(s.unsigned_abs()) as i64;
                low_bits(&self.unscaled).wrapping_mul(factor)
            }
            _ => low_bits(&self.integer_part()),
        }
    }

    pub fn to_i32(&self) -> i32 {
        self.to_i64() as i32
    }

    pub fn to_i16(&self) -> i16 {
        self.to_i64() as i16
    }

    pub fn to_i8(&self) -> i8 {
        self.to_i64() as i8
    }

    // ========================================================================
    // Narrowing (exact)
    // ========================================================================

    /// The value as an i64; `RoundingNecessary` for a nonzero fraction,
    /// `ValueOutOfRange` when it does not fit.
    pub fn to_i64_exact(&self) -> NumericResult<i64> {
        if let (Unscaled::Compact(v), 0) = (&self.unscaled, self.scale) {
            return Ok(*v);
        }
        if self.is_zero() {
            return Ok(0);
        }
        if self.fraction_only() {
            return Err(NumericError::RoundingNecessary);
        }
        if i64::from(self.precision()) - i64::from(self.scale) > 19 {
            return Err(NumericError::ValueOutOfRange);
        }
        self.to_big_integer_exact()?.to_i64_exact()
    }

    pub fn to_i32_exact(&self) -> NumericResult<i32> {
        i32::try_from(self.to_i64_exact()?).map_err(|_| NumericError::ValueOutOfRange)
    }

    pub fn to_i16_exact(&self) -> NumericResult<i16> {
        i16::try_from(self.to_i64_exact()?).map_err(|_| NumericError::ValueOutOfRange)
    }

    pub fn to_i8_exact(&self) -> NumericResult<i8> {
        i8::try_from(self.to_i64_exact()?).map_err(|_| NumericError::ValueOutOfRange)
    }

    // ========================================================================
    // Floating Point
    // ========================================================================

    /// Nearest f64. Values beyond the f64 range become infinite.
    pub fn to_f64(&self) -> f64 {
        if let Unscaled::Compact(v) = self.unscaled {
            if v.unsigned_abs() < F64_EXACT_INT {
                match self.scale {
                    0 => return v as f64,
                    1..=22 => return v as f64 / F64_TEN_POWERS[self.scale as usize],
                    -22..=-1 => return v as f64 * F64_TEN_POWERS[self.scale.unsigned_abs() as usize],
                    _ => {}
                }
            }
        }
        self.exponent_form().parse().unwrap_or(f64::NAN)
    }

    /// Nearest f32. Values beyond the f32 range become infinite.
    pub fn to_f32(&self) -> f32 {
        if let Unscaled::Compact(v) = self.unscaled {
            if v.unsigned_abs() < F32_EXACT_INT {
                match self.scale {
                    0 => return v as f32,
                    1..=10 => return v as f32 / F32_TEN_POWERS[self.scale as usize],
                    -10..=-1 => return v as f32 * F32_TEN_POWERS[self.scale.unsigned_abs() as usize],
                    _ => {}
                }
            }
        }
        self.exponent_form().parse().unwrap_or(f32::NAN)
    }

    /// `<unscaled>e<-scale>`, parsed with correct rounding by the float parsers.
    fn exponent_form(&self) -> String {
        format!("{}e{}", self.unscaled, -i64::from(self.scale))
    }
}

impl TryFrom<f64> for BigDecimal {
    type Error = NumericError;

    /// Shortest decimal that reads back as `value`. NaN and infinities are
    /// rejected.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        format!("{:e}", value).parse()
    }
}

impl TryFrom<f32> for BigDecimal {
    type Error = NumericError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        format!("{:e}", value).parse()
    }
}

// ============================================================================
// Integer Sources
// ============================================================================

impl From<i64> for BigDecimal {
    fn from(value: i64) -> Self {
        BigDecimal::from_unscaled(value, 0)
    }
}

impl From<i32> for BigDecimal {
    fn from(value: i32) -> Self {
        BigDecimal::from_unscaled(i64::from(value), 0)
    }
}

impl From<u64> for BigDecimal {
    fn from(value: u64) -> Self {
        BigDecimal::new(BigInteger::from(value), 0)
    }
}

impl From<BigInteger> for BigDecimal {
    fn from(value: BigInteger) -> Self {
        BigDecimal::new(value, 0)
    }
}

// ============================================================================
// rust_decimal Interop
// ============================================================================

impl From<Decimal> for BigDecimal {
    fn from(value: Decimal) -> Self {
        // scale is at most 28
        BigDecimal::new(BigInteger::from(value.mantissa()), value.scale() as i32)
    }
}

fn to_rust_decimal(value: &BigDecimal) -> Option<Decimal> {
    if !(0..=DECIMAL_MAX_SCALE).contains(&value.scale) {
        return None;
    }
    let mantissa = value.unscaled.as_big().to_i128_checked()?;
    Decimal::try_from_i128_with_scale(mantissa, value.scale as u32).ok()
}

impl TryFrom<&BigDecimal> for Decimal {
    type Error = NumericError;

    /// Keeps the scale when possible, otherwise tries again with trailing
    /// zeros stripped. Fails with `ValueOutOfRange` when the mantissa needs
    /// more than 96 bits or more than 28 fraction digits remain.
    fn try_from(value: &BigDecimal) -> Result<Self, Self::Error> {
        if let Some(decimal) = to_rust_decimal(value) {
            return Ok(decimal);
        }

        let stripped = value.strip_trailing_zeros();
        let candidate = if stripped.scale < 0 {
            // at most 29 integer digits fit in 96 bits
            if i64::from(stripped.precision()) - i64::from(stripped.scale) > 29 {
                return Err(NumericError::ValueOutOfRange);
            }
            stripped.set_scale(0, RoundingMode::Unnecessary)?
        } else {
            stripped
        };
        to_rust_decimal(&candidate).ok_or(NumericError::ValueOutOfRange)
    }
}

impl TryFrom<BigDecimal> for Decimal {
    type Error = NumericError;

    fn try_from(value: BigDecimal) -> Result<Self, Self::Error> {
        Decimal::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_to_big_integer() {
        assert_eq!(dec("-12.99").to_big_integer().unwrap(), BigInteger::from(-12));
        assert_eq!(dec("1.2E+3").to_big_integer().unwrap(), BigInteger::from(1200));
        assert_eq!(dec("12.00").to_big_integer_exact().unwrap(), BigInteger::from(12));
        assert_eq!(
            dec("12.01").to_big_integer_exact(),
            Err(NumericError::RoundingNecessary)
        );
    }

    #[test]
    fn test_truncating_narrowing() {
        assert_eq!(dec("-12.99").to_i64(), -12);
        assert_eq!(dec("0.999").to_i64(), 0);
        assert_eq!(dec("1E+64").to_i64(), 0);
        assert_eq!(dec("1E+19").to_i64(), 10_000_000_000_000_000_000u64 as i64);
        let big = dec("18446744073709551621.5");
        assert_eq!(big.to_i64(), 5);
        assert_eq!(dec("300").to_i8(), 300i32 as i8);
        assert_eq!(dec("70000.9").to_i16(), 70000i32 as i16);
        assert_eq!(dec("4294967297").to_i32(), 1);
    }

    #[test]
    fn test_exact_narrowing() {
        assert_eq!(dec("9223372036854775807").to_i64_exact(), Ok(i64::MAX));
        assert_eq!(dec("-9223372036854775808.000").to_i64_exact(), Ok(i64::MIN));
        assert_eq!(
            dec("9223372036854775808").to_i64_exact(),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(dec("1E+100").to_i64_exact(), Err(NumericError::ValueOutOfRange));
        assert_eq!(dec("0.5").to_i64_exact(), Err(NumericError::RoundingNecessary));
        assert_eq!(dec("1.5").to_i32_exact(), Err(NumericError::RoundingNecessary));
        assert_eq!(dec("128").to_i8_exact(), Err(NumericError::ValueOutOfRange));
        assert_eq!(dec("-128").to_i8_exact(), Ok(-128));
        assert_eq!(dec("32767.0").to_i16_exact(), Ok(32767));
        assert_eq!(dec("0.000").to_i32_exact(), Ok(0));
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(dec("0.1").to_f64(), 0.1);
        assert_eq!(dec("-123.456").to_f64(), -123.456);
        assert_eq!(dec("1E+400").to_f64(), f64::INFINITY);
        assert_eq!(dec("1E-400").to_f64(), 0.0);
        assert_eq!(dec("12345678901234567890.123").to_f64(), 12345678901234567890.123);
        assert_eq!(dec("2.5E+30").to_f64(), 2.5e30);
        assert_eq!(dec("0.1").to_f32(), 0.1f32);
        assert_eq!(dec("3.4028236E+38").to_f32(), f32::INFINITY);
    }

    #[test]
    fn test_from_f64() {
        let value = BigDecimal::try_from(0.1f64).unwrap();
        assert!(value.is_identical(&dec("0.1")));
        let value = BigDecimal::try_from(-2.5e-10f64).unwrap();
        assert!(value.is_identical(&dec("-2.5E-10")));
        assert_eq!(BigDecimal::try_from(100.0f64).unwrap(), dec("100"));
        assert_eq!(BigDecimal::try_from(f64::NAN), Err(NumericError::InvalidInput));
        assert_eq!(
            BigDecimal::try_from(f64::NEG_INFINITY),
            Err(NumericError::InvalidInput)
        );
        assert_eq!(BigDecimal::try_from(1.5f32).unwrap(), dec("1.5"));
    }

    #[test]
    fn test_integer_sources() {
        assert_eq!(BigDecimal::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(BigDecimal::from(-7i32).to_string(), "-7");
        assert_eq!(BigDecimal::from(BigInteger::from(42)).scale(), 0);
    }

    #[test]
    fn test_rust_decimal_round_trip() {
        let decimal = Decimal::from_str("-1234.5600").unwrap();
        let value = BigDecimal::from(decimal);
        assert!(value.is_identical(&dec("-1234.5600")));
        assert_eq!(Decimal::try_from(&value).unwrap(), decimal);
        assert_eq!(Decimal::try_from(&value).unwrap().scale(), 4);
    }

    #[test]
    fn test_rust_decimal_strips_when_needed() {
        let value = dec("1.50000000000000000000000000000000");
        let decimal = Decimal::try_from(&value).unwrap();
        assert_eq!(decimal, Decimal::from_str("1.5").unwrap());
        let value = dec("1.2E+3");
        assert_eq!(Decimal::try_from(value).unwrap(), Decimal::from(1200));
    }

    #[test]
    fn test_rust_decimal_out_of_range() {
        assert_eq!(
            Decimal::try_from(&dec("1E+40")),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(
            Decimal::try_from(&dec("1E-29")),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(
            Decimal::try_from(&dec("79228162514264337593543950336")),
            Err(NumericError::ValueOutOfRange)
        );
    }
}
