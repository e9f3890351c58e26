// ============================================================================
// Integer Conversions
// Narrowing, floating point and byte-array conversions
// ============================================================================

use crate::integer::big_integer::BigInteger;
use crate::integer::bitwise::TwosComplement;
use crate::numeric::{NumericError, NumericResult};

impl BigInteger {
    // ========================================================================
    // Narrowing (wrapping)
    // ========================================================================

    /// Low 64 bits of the two's-complement form.
    pub fn to_i64(&self) -> i64 {
        let view = TwosComplement::of(self);
        ((u64::from(view.word(1)) << 32) | u64::from(view.word(0))) as i64
    }

    /// Low 32 bits of the two's-complement form.
    pub fn to_i32(&self) -> i32 {
        TwosComplement::of(self).word(0) as i32
    }

    pub fn to_i16(&self) -> i16 {
        self.to_i32() as i16
    }

    pub fn to_i8(&self) -> i8 {
        self.to_i32() as i8
    }

    // ========================================================================
    // Narrowing (exact)
    // ========================================================================

    pub fn to_i64_exact(&self) -> NumericResult<i64> {
        self.to_i64_checked().ok_or(NumericError::ValueOutOfRange)
    }

    pub fn to_i32_exact(&self) -> NumericResult<i32> {
        i32::try_from(self.to_i64_exact()?).map_err(|_| NumericError::ValueOutOfRange)
    }

    pub fn to_i16_exact(&self) -> NumericResult<i16> {
        i16::try_from(self)
    }

    pub fn to_i8_exact(&self) -> NumericResult<i8> {
        i8::try_from(self)
    }

    pub fn to_i128_exact(&self) -> NumericResult<i128> {
        self.to_i128_checked().ok_or(NumericError::ValueOutOfRange)
    }

    // ========================================================================
    // Floating Point
    // ========================================================================

    /// Nearest f64, ties to even. Values beyond the f64 range become infinite.
    pub fn to_f64(&self) -> f64 {
        let (top, exponent) = self.top_bits();
        let magnitude = if exponent == 0 {
            top as f64
        } else if exponent > 1023 {
            f64::INFINITY
        } else {
            top as f64 * f64::from_bits((exponent + 1023) << 52)
        };
        if self.signum < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Nearest f32, ties to even. Values beyond the f32 range become infinite.
    pub fn to_f32(&self) -> f32 {
        let (top, exponent) = self.top_bits();
        let magnitude = if exponent == 0 {
            top as f32
        } else if exponent > 127 {
            f32::INFINITY
        } else {
            top as f32 * f32::from_bits(((exponent + 127) as u32) << 23)
        };
        if self.signum < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The top 64 bits of the magnitude, with any discarded one bits folded
    /// into the lowest bit, and the binary exponent they were shifted by.
    fn top_bits(&self) -> (u64, u64) {
        let bits = self.magnitude_bit_length();
        if bits <= 64 {
            return (self.magnitude_u64().unwrap_or(0), 0);
        }
        let exponent = bits - 64;
        let shifted = self.abs().shr_bits(exponent as usize);
        let top = shifted.magnitude_u64().unwrap_or(u64::MAX);
        let sticky = self
            .lowest_set_bit()
            .is_some_and(|lowest| lowest < exponent);
        (top | u64::from(sticky), exponent)
    }

    // ========================================================================
    // Byte Arrays
    // ========================================================================

    /// Minimal big-endian two's-complement bytes, including a sign bit.
    pub fn to_be_bytes_signed(&self) -> Vec<u8> {
        let byte_len = (self.bit_length() / 8 + 1) as usize;
        let view = TwosComplement::of(self);
        (0..byte_len)
            .rev()
            .map(|i| (view.word(i / 4) >> (8 * (i % 4))) as u8)
            .collect()
    }
}

macro_rules! impl_try_from_big_integer {
    ($($t:ty),*) => {
        $(
            impl TryFrom<&BigInteger> for $t {
                type Error = NumericError;

                fn try_from(value: &BigInteger) -> NumericResult<$t> {
                    <$t>::try_from(value.to_i128_exact()?).map_err(|_| NumericError::ValueOutOfRange)
                }
            }
        )*
    };
}

impl_try_from_big_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl TryFrom<&BigInteger> for i128 {
    type Error = NumericError;

    fn try_from(value: &BigInteger) -> NumericResult<i128> {
        value.to_i128_exact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_narrowing() {
        let value = BigInteger::from((1i128 << 64) + 5);
        assert_eq!(value.to_i64(), 5);
        assert_eq!(BigInteger::from(-1).to_i64(), -1);
        assert_eq!(BigInteger::from(-(1i128 << 70) - 3).to_i64(), -3);
        assert_eq!(BigInteger::from(0x1_0000_0007i64).to_i32(), 7);
        assert_eq!(BigInteger::from(i64::MIN).to_i64(), i64::MIN);
        assert_eq!(BigInteger::from(70_000).to_i16(), 4464);
        assert_eq!(BigInteger::from(-129).to_i8(), 127);
    }

    #[test]
    fn test_exact_narrowing() {
        assert_eq!(BigInteger::from(i64::MIN).to_i64_exact(), Ok(i64::MIN));
        assert_eq!(
            BigInteger::from(1u64 << 63).to_i64_exact(),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(
            BigInteger::from(1i64 << 31).to_i32_exact(),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(BigInteger::from(-32768).to_i16_exact(), Ok(i16::MIN));
        assert_eq!(
            BigInteger::from(128).to_i8_exact(),
            Err(NumericError::ValueOutOfRange)
        );
        assert_eq!(u8::try_from(&BigInteger::from(255)), Ok(255));
        assert_eq!(
            u8::try_from(&BigInteger::from(-1)),
            Err(NumericError::ValueOutOfRange)
        );
    }

    #[test]
    fn test_to_f64_rounds_to_nearest() {
        assert_eq!(BigInteger::from(12345).to_f64(), 12345.0);
        assert_eq!(BigInteger::from(-(1i64 << 60)).to_f64(), -(2f64.powi(60)));
        // 2^64 + 1 rounds down to 2^64
        assert_eq!(BigInteger::from((1u128 << 64) + 1).to_f64(), 2f64.powi(64));
        // 2^53 + 1 shifted past 64 bits: tie broken by sticky bits
        let tie_plus = BigInteger::from(((1u128 << 53) + 1) << 20 | 1);
        assert_eq!(tie_plus.to_f64(), ((1u128 << 53) + 2) as f64 * 2f64.powi(20));
        let huge = BigInteger::from(10).pow(400).unwrap();
        assert_eq!(huge.to_f64(), f64::INFINITY);
        assert_eq!(huge.negate().to_f64(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(BigInteger::from(1u128 << 100).to_f32(), 2f32.powi(100));
        assert_eq!(
            BigInteger::from(10).pow(40).unwrap().to_f32(),
            f32::INFINITY
        );
    }

    #[test]
    fn test_to_be_bytes_signed() {
        assert_eq!(BigInteger::zero().to_be_bytes_signed(), vec![0]);
        assert_eq!(BigInteger::from(128).to_be_bytes_signed(), vec![0x00, 0x80]);
        assert_eq!(BigInteger::from(-129).to_be_bytes_signed(), vec![0xFF, 0x7F]);
        assert_eq!(BigInteger::from(-128).to_be_bytes_signed(), vec![0x80]);
        let value = BigInteger::from(-(1i128 << 90) + 12345);
        assert_eq!(
            BigInteger::from_be_bytes_signed(&value.to_be_bytes_signed()).unwrap(),
            value
        );
    }
}
