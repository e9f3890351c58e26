// ============================================================================
// BigInteger
// Immutable arbitrary-precision signed integer in sign-magnitude form
// ============================================================================

use crate::integer::words::{
    add_magnitudes, compare_magnitude, magnitude_from_twos_complement, strip_leading_zeros,
    strip_leading_zeros_vec, subtract_magnitudes, words_from_be_bytes,
};
use crate::numeric::{NumericError, NumericResult};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Word storage for magnitudes. Values up to 128 bits stay inline.
pub(crate) type Magnitude = SmallVec<[u32; 4]>;

/// Largest magnitude, in 32-bit words, a `BigInteger` may hold.
pub const MAX_MAG_LENGTH: usize = 1 << 26;

/// Largest supported bit length (`2^31 - 1`).
pub const MAX_BIT_LENGTH: u64 = i32::MAX as u64;

/// Arbitrary-precision signed integer.
///
/// The magnitude is a big-endian sequence of 32-bit words with no leading
/// zero words; zero has an empty magnitude and signum 0. Every operation
/// returns a new value.
///
/// Operations that can grow a value past [`MAX_BIT_LENGTH`] bits return
/// `Err(NumericError::BitLengthOverflow)` instead of allocating.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    pub(crate) signum: i8,
    pub(crate) mag: Magnitude,
}

impl BigInteger {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero
    #[inline]
    pub fn zero() -> Self {
        Self {
            signum: 0,
            mag: Magnitude::new(),
        }
    }

    /// One
    #[inline]
    pub fn one() -> Self {
        Self::from_u64_with_sign(1, 1)
    }

    /// Two
    #[inline]
    pub fn two() -> Self {
        Self::from_u64_with_sign(1, 2)
    }

    /// Ten
    #[inline]
    pub fn ten() -> Self {
        Self::from_u64_with_sign(1, 10)
    }

    /// Builds a value from an already stripped magnitude.
    #[inline]
    pub(crate) fn from_stripped(signum: i8, mag: Vec<u32>) -> Self {
        debug_assert!(mag.first() != Some(&0));
        if mag.is_empty() {
            Self::zero()
        } else {
            Self {
                signum,
                mag: Magnitude::from_vec(mag),
            }
        }
    }

    /// Builds a value from a magnitude that may carry leading zero words.
    #[inline]
    pub(crate) fn from_magnitude(signum: i8, mag: Vec<u32>) -> Self {
        Self::from_stripped(signum, strip_leading_zeros_vec(mag))
    }

    pub(crate) fn from_u64_with_sign(signum: i8, magnitude: u64) -> Self {
        let high = (magnitude >> 32) as u32;
        let low = magnitude as u32;
        let mag: Magnitude = if high != 0 {
            smallvec::smallvec![high, low]
        } else if low != 0 {
            smallvec::smallvec![low]
        } else {
            return Self::zero();
        };
        Self { signum, mag }
    }

    pub(crate) fn from_u128_with_sign(signum: i8, magnitude: u128) -> Self {
        let words = vec![
            (magnitude >> 96) as u32,
            (magnitude >> 64) as u32,
            (magnitude >> 32) as u32,
            magnitude as u32,
        ];
        Self::from_magnitude(signum, words)
    }

    /// Builds a value from a signum and big-endian magnitude words.
    ///
    /// Leading zero words are stripped. Fails with `InvalidInput` when the
    /// signum is not -1, 0 or 1, or when it is 0 for a nonzero magnitude.
    pub fn from_words(signum: i8, words: &[u32]) -> NumericResult<Self> {
        let words = strip_leading_zeros(words);
        match signum {
            0 if words.is_empty() => Ok(Self::zero()),
            -1 | 1 => Self::from_stripped(signum, words.to_vec()).check_range(),
            _ => Err(NumericError::InvalidInput),
        }
    }

    /// Parses a big-endian two's-complement byte array.
    pub fn from_be_bytes_signed(bytes: &[u8]) -> NumericResult<Self> {
        let Some(&first) = bytes.first() else {
            return Err(NumericError::InvalidInput);
        };
        if first & 0x80 != 0 {
            let words = words_from_be_bytes(bytes, 0xFF);
            Self::from_stripped(-1, magnitude_from_twos_complement(&words)).check_range()
        } else {
            Self::from_magnitude(1, words_from_be_bytes(bytes, 0)).check_range()
        }
    }

    /// Builds a value from a signum and a big-endian unsigned byte magnitude.
    pub fn from_sign_magnitude(signum: i8, bytes: &[u8]) -> NumericResult<Self> {
        Self::from_words(signum, &words_from_be_bytes(bytes, 0))
    }

    /// Reassembles a value from big-endian two's-complement words.
    pub(crate) fn from_twos_complement_words(words: &[u32]) -> Self {
        match words.first() {
            Some(&top) if top & 0x8000_0000 != 0 => {
                Self::from_stripped(-1, magnitude_from_twos_complement(words))
            }
            _ => Self::from_magnitude(1, words.to_vec()),
        }
    }

    /// Enforces the magnitude budget of `2^31 - 1` bits.
    pub(crate) fn check_range(self) -> NumericResult<Self> {
        let len = self.mag.len();
        if len > MAX_MAG_LENGTH || (len == MAX_MAG_LENGTH && self.mag[0] & 0x8000_0000 != 0) {
            Err(NumericError::BitLengthOverflow)
        } else {
            Ok(self)
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// -1, 0 or 1
    #[inline]
    pub fn signum(&self) -> i32 {
        i32::from(self.signum)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.signum == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.signum < 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.signum > 0
    }

    /// Big-endian magnitude words, without leading zeros.
    #[inline]
    pub fn magnitude(&self) -> &[u32] {
        &self.mag
    }

    /// Magnitude as a u64 when it fits in two words.
    #[inline]
    pub(crate) fn magnitude_u64(&self) -> Option<u64> {
        match self.mag.len() {
            0 => Some(0),
            1 => Some(u64::from(self.mag[0])),
            2 => Some((u64::from(self.mag[0]) << 32) | u64::from(self.mag[1])),
            _ => None,
        }
    }

    /// Exact conversion to i64, `None` when the value does not fit.
    pub(crate) fn to_i64_checked(&self) -> Option<i64> {
        let magnitude = self.magnitude_u64()?;
        i64::try_from(i128::from(magnitude) * i128::from(self.signum)).ok()
    }

    /// Exact conversion to i128, `None` when the value does not fit.
    pub(crate) fn to_i128_checked(&self) -> Option<i128> {
        if self.mag.len() > 4 {
            return None;
        }
        let magnitude = self
            .mag
            .iter()
            .fold(0u128, |acc, &w| (acc << 32) | u128::from(w));
        match self.signum {
            0 => Some(0),
            1 => i128::try_from(magnitude).ok(),
            _ => 0i128.checked_sub_unsigned(magnitude),
        }
    }

    // ========================================================================
    // Sign Operations
    // ========================================================================

    pub fn negate(&self) -> Self {
        Self {
            signum: -self.signum,
            mag: self.mag.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        if self.signum < 0 {
            self.negate()
        } else {
            self.clone()
        }
    }

    // ========================================================================
    // Addition / Subtraction
    // ========================================================================

    /// Checked addition
    pub fn add(&self, other: &Self) -> NumericResult<Self> {
        self.add_unchecked(other).check_range()
    }

    /// Checked subtraction
    pub fn subtract(&self, other: &Self) -> NumericResult<Self> {
        self.sub_unchecked(other).check_range()
    }

    #[inline]
    pub(crate) fn add_unchecked(&self, other: &Self) -> Self {
        self.add_signed(other.signum, &other.mag)
    }

    #[inline]
    pub(crate) fn sub_unchecked(&self, other: &Self) -> Self {
        self.add_signed(-other.signum, &other.mag)
    }

    fn add_signed(&self, other_signum: i8, other_mag: &[u32]) -> Self {
        if other_signum == 0 {
            return self.clone();
        }
        if self.signum == 0 {
            return Self {
                signum: other_signum,
                mag: Magnitude::from_slice(other_mag),
            };
        }
        if self.signum == other_signum {
            return Self::from_stripped(self.signum, add_magnitudes(&self.mag, other_mag));
        }
        match compare_magnitude(&self.mag, other_mag) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                Self::from_stripped(self.signum, subtract_magnitudes(&self.mag, other_mag))
            }
            Ordering::Less => {
                Self::from_stripped(other_signum, subtract_magnitudes(other_mag, &self.mag))
            }
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compares absolute values.
    #[inline]
    pub fn compare_magnitude(&self, other: &Self) -> Ordering {
        compare_magnitude(&self.mag, &other.mag)
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.signum.cmp(&other.signum) {
            Ordering::Equal => {
                let by_magnitude = compare_magnitude(&self.mag, &other.mag);
                if self.signum < 0 {
                    by_magnitude.reverse()
                } else {
                    by_magnitude
                }
            }
            unequal => unequal,
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({})", self)
    }
}

// ============================================================================
// Conversions from primitives
// ============================================================================

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInteger {
                fn from(value: $t) -> Self {
                    Self::from_u64_with_sign(value.signum() as i8, value.unsigned_abs() as u64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInteger {
                fn from(value: $t) -> Self {
                    Self::from_u64_with_sign(1, value as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<i128> for BigInteger {
    fn from(value: i128) -> Self {
        Self::from_u128_with_sign(value.signum() as i8, value.unsigned_abs())
    }
}

impl From<u128> for BigInteger {
    fn from(value: u128) -> Self {
        Self::from_u128_with_sign(1, value)
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

// Infallible Add/Sub/Mul for ergonomics (panics past the bit-length budget - use the checked methods in production)
impl Add for &BigInteger {
    type Output = BigInteger;

    fn add(self, rhs: Self) -> BigInteger {
        BigInteger::add(self, rhs).expect("BigInteger addition overflow")
    }
}

impl Sub for &BigInteger {
    type Output = BigInteger;

    fn sub(self, rhs: Self) -> BigInteger {
        self.subtract(rhs).expect("BigInteger subtraction overflow")
    }
}

impl Mul for &BigInteger {
    type Output = BigInteger;

    fn mul(self, rhs: Self) -> BigInteger {
        self.multiply(rhs).expect("BigInteger multiplication overflow")
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        Self {
            signum: -self.signum,
            mag: self.mag,
        }
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_canonical() {
        let zero = BigInteger::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.signum(), 0);
        assert!(zero.magnitude().is_empty());
        assert_eq!(BigInteger::from(0i64), zero);
        assert_eq!(BigInteger::from_words(1, &[0, 0]).unwrap(), zero);
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(BigInteger::from(-1i32).magnitude(), &[1]);
        assert_eq!(BigInteger::from(u64::MAX).magnitude(), &[u32::MAX, u32::MAX]);
        assert_eq!(
            BigInteger::from(i64::MIN).magnitude(),
            &[0x8000_0000, 0]
        );
        assert_eq!(BigInteger::from(i64::MIN).signum(), -1);
        assert_eq!(
            BigInteger::from(1u128 << 100).magnitude(),
            &[1 << 4, 0, 0, 0]
        );
    }

    #[test]
    fn test_from_words_rejects_bad_signum() {
        assert_eq!(
            BigInteger::from_words(0, &[1]),
            Err(NumericError::InvalidInput)
        );
        assert_eq!(
            BigInteger::from_words(2, &[1]),
            Err(NumericError::InvalidInput)
        );
    }

    #[test]
    fn test_from_be_bytes_signed() {
        assert_eq!(
            BigInteger::from_be_bytes_signed(&[0xFF]).unwrap(),
            BigInteger::from(-1)
        );
        assert_eq!(
            BigInteger::from_be_bytes_signed(&[0x00, 0x80]).unwrap(),
            BigInteger::from(128)
        );
        assert_eq!(
            BigInteger::from_be_bytes_signed(&[0xFF, 0x7F]).unwrap(),
            BigInteger::from(-129)
        );
        assert_eq!(
            BigInteger::from_be_bytes_signed(&[0x80, 0, 0, 0, 0]).unwrap(),
            BigInteger::from(-(1i64 << 39))
        );
        assert_eq!(
            BigInteger::from_be_bytes_signed(&[]),
            Err(NumericError::InvalidInput)
        );
    }

    #[test]
    fn test_from_sign_magnitude() {
        let value = BigInteger::from_sign_magnitude(-1, &[0x01, 0x00]).unwrap();
        assert_eq!(value, BigInteger::from(-256));
    }

    #[test]
    fn test_add_and_subtract_signs() {
        let a = BigInteger::from(100);
        let b = BigInteger::from(-250);
        assert_eq!(a.add(&b).unwrap(), BigInteger::from(-150));
        assert_eq!(a.subtract(&b).unwrap(), BigInteger::from(350));
        assert_eq!(b.subtract(&b).unwrap(), BigInteger::zero());
        assert_eq!(b.add(&BigInteger::zero()).unwrap(), b);
        assert_eq!(BigInteger::zero().subtract(&a).unwrap(), BigInteger::from(-100));
    }

    #[test]
    fn test_add_carries_across_words() {
        let a = BigInteger::from(u64::MAX);
        let sum = a.add(&BigInteger::one()).unwrap();
        assert_eq!(sum.magnitude(), &[1, 0, 0]);
        assert_eq!(sum.subtract(&BigInteger::one()).unwrap(), a);
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![
            BigInteger::from(5),
            BigInteger::from(-7),
            BigInteger::zero(),
            BigInteger::from(u64::MAX),
            BigInteger::from(i64::MIN),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                BigInteger::from(i64::MIN),
                BigInteger::from(-7),
                BigInteger::zero(),
                BigInteger::from(5),
                BigInteger::from(u64::MAX),
            ]
        );
        assert_eq!(
            BigInteger::from(-9).compare_magnitude(&BigInteger::from(3)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_checked_narrowing_helpers() {
        assert_eq!(BigInteger::from(i64::MIN).to_i64_checked(), Some(i64::MIN));
        assert_eq!(BigInteger::from(1u64 << 63).to_i64_checked(), None);
        assert_eq!(BigInteger::from(i128::MIN).to_i128_checked(), Some(i128::MIN));
        assert_eq!(BigInteger::from(u128::MAX).to_i128_checked(), None);
    }

    #[test]
    fn test_check_range_budget() {
        let mut mag = vec![0u32; MAX_MAG_LENGTH];
        mag[0] = 0x8000_0000;
        let too_big = BigInteger::from_stripped(1, mag);
        assert_eq!(too_big.check_range(), Err(NumericError::BitLengthOverflow));
    }

    #[test]
    fn test_negate_and_abs() {
        let value = BigInteger::from(-42);
        assert_eq!(value.negate(), BigInteger::from(42));
        assert_eq!(value.abs(), BigInteger::from(42));
        assert_eq!(-&value, BigInteger::from(42));
        assert_eq!(BigInteger::zero().negate(), BigInteger::zero());
    }
}
