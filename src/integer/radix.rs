// ============================================================================
// Radix Conversion
// Text parsing and formatting in radix 2..=36
// ============================================================================

use crate::integer::big_integer::BigInteger;
use crate::integer::division::divide_one_word;
use crate::integer::words::mul_add_word;
use crate::numeric::{NumericError, NumericResult};
use std::fmt;
use std::str::FromStr;

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// Largest digit count `k` with `radix^k` fitting in a u32, and `radix^k`.
fn chunk_size(radix: u32) -> (usize, u32) {
    let mut digits = 1;
    let mut power = u64::from(radix);
    while power * u64::from(radix) <= u64::from(u32::MAX) {
        power *= u64::from(radix);
        digits += 1;
    }
    (digits, power as u32)
}

fn check_radix(radix: u32) -> NumericResult<()> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(NumericError::InvalidRadix)
    }
}

/// Parses unsigned ASCII digits into a magnitude, one u32-sized chunk at a time.
pub(crate) fn parse_magnitude(digits: &[u8], radix: u32) -> NumericResult<Vec<u32>> {
    if digits.is_empty() {
        return Err(NumericError::InvalidInput);
    }
    let (chunk_digits, _) = chunk_size(radix);

    // the short chunk goes first so the rest are full-size
    let first_len = match digits.len() % chunk_digits {
        0 => chunk_digits,
        n => n,
    };
    let (first, rest) = digits.split_at(first_len.min(digits.len()));

    let mut mag = Vec::with_capacity(digits.len() / chunk_digits + 1);
    for chunk in std::iter::once(first).chain(rest.chunks(chunk_digits)) {
        let mut value = 0u32;
        let mut factor = 1u32;
        for &b in chunk {
            let digit = char::from(b)
                .to_digit(radix)
                .ok_or(NumericError::InvalidInput)?;
            value = value * radix + digit;
            factor *= radix;
        }
        mul_add_word(&mut mag, factor, value);
    }
    Ok(mag)
}

/// Appends `value` in `radix`, left-padded with zeros to `width` digits.
fn push_chunk(out: &mut Vec<u8>, mut value: u32, radix: u32, width: usize) {
    let start = out.len();
    while value != 0 {
        let digit = char::from_digit(value % radix, radix).unwrap_or('0');
        out.push(digit as u8);
        value /= radix;
    }
    while out.len() - start < width {
        out.push(b'0');
    }
    out[start..].reverse();
}

impl BigInteger {
    /// Parses an optionally signed string of digits in `radix`.
    ///
    /// # Example
    /// ```
    /// use precise_decimal::BigInteger;
    ///
    /// let value = BigInteger::from_str_radix("-ff", 16).unwrap();
    /// assert_eq!(value, BigInteger::from(-255));
    /// ```
    pub fn from_str_radix(s: &str, radix: u32) -> NumericResult<Self> {
        check_radix(radix)?;
        let bytes = s.as_bytes();
        let (signum, digits) = match bytes.first() {
            Some(b'-') => (-1, &bytes[1..]),
            Some(b'+') => (1, &bytes[1..]),
            _ => (1, bytes),
        };
        Self::from_magnitude(signum, parse_magnitude(digits, radix)?).check_range()
    }

    /// Formats the value in `radix`, lower-case digits, `-` for negatives.
    pub fn to_string_radix(&self, radix: u32) -> NumericResult<String> {
        check_radix(radix)?;
        let digits = self.magnitude_digits(radix);
        let mut text = String::with_capacity(digits.len() + 1);
        if self.signum < 0 {
            text.push('-');
        }
        text.push_str(&digits);
        Ok(text)
    }

    /// Digits of the absolute value in `radix`.
    pub(crate) fn magnitude_digits(&self, radix: u32) -> String {
        if self.signum == 0 {
            return "0".to_string();
        }
        let (chunk_digits, chunk_radix) = chunk_size(radix);

        // peel chunks from the least significant end
        let mut chunks = Vec::new();
        let mut rest: Vec<u32> = self.mag.to_vec();
        while !rest.is_empty() {
            let (quotient, remainder) = divide_one_word(&rest, chunk_radix);
            chunks.push(remainder);
            rest = quotient;
        }

        let mut out = Vec::with_capacity(chunks.len() * chunk_digits);
        let mut iter = chunks.iter().rev();
        if let Some(&top) = iter.next() {
            push_chunk(&mut out, top, radix, 1);
        }
        for &chunk in iter {
            push_chunk(&mut out, chunk, radix, chunk_digits);
        }
        String::from_utf8(out).unwrap_or_default()
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.signum >= 0, "", &self.magnitude_digits(10))
    }
}

impl fmt::LowerHex for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.signum >= 0, "0x", &self.magnitude_digits(16))
    }
}

impl fmt::Binary for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.signum >= 0, "0b", &self.magnitude_digits(2))
    }
}

impl FromStr for BigInteger {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size() {
        assert_eq!(chunk_size(10), (9, 1_000_000_000));
        assert_eq!(chunk_size(2), (31, 1 << 31));
        assert_eq!(chunk_size(16), (7, 1 << 28));
    }

    #[test]
    fn test_parse_decimal() {
        let value: BigInteger = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            value,
            BigInteger::from(123_456_789_012_345_678_901_234_567_890i128)
        );
        assert_eq!("-0".parse::<BigInteger>().unwrap(), BigInteger::zero());
        assert_eq!("+0042".parse::<BigInteger>().unwrap(), BigInteger::from(42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "-", "+", "12a", "1 2", "--1", "1_000"] {
            assert_eq!(
                bad.parse::<BigInteger>(),
                Err(NumericError::InvalidInput),
                "{bad:?}"
            );
        }
        assert_eq!(
            BigInteger::from_str_radix("1", 37),
            Err(NumericError::InvalidRadix)
        );
    }

    #[test]
    fn test_other_radixes() {
        assert_eq!(
            BigInteger::from_str_radix("zz", 36).unwrap(),
            BigInteger::from(36 * 36 - 1)
        );
        assert_eq!(
            BigInteger::from_str_radix("-101", 2).unwrap(),
            BigInteger::from(-5)
        );
        let value = BigInteger::from(u128::MAX);
        assert_eq!(value.to_string_radix(16).unwrap(), "f".repeat(32));
        assert_eq!(
            BigInteger::from(-255).to_string_radix(2).unwrap(),
            "-11111111"
        );
    }

    #[test]
    fn test_display_pads_inner_chunks() {
        let value = BigInteger::from(1_000_000_000_000_000_001i128);
        assert_eq!(value.to_string(), "1000000000000000001");
        assert_eq!(BigInteger::from(-7).to_string(), "-7");
        assert_eq!(BigInteger::zero().to_string(), "0");
        assert_eq!(format!("{:>5}", BigInteger::from(42)), "   42");
        assert_eq!(format!("{:#x}", BigInteger::from(255)), "0xff");
    }

    #[test]
    fn test_text_round_trip_large() {
        let text = "-98765432109876543210987654321098765432109876543210";
        let value: BigInteger = text.parse().unwrap();
        assert_eq!(value.to_string(), text);
        let hex = value.to_string_radix(16).unwrap();
        assert_eq!(BigInteger::from_str_radix(&hex, 16).unwrap(), value);
    }
}
