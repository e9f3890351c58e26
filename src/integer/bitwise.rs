// ============================================================================
// Bitwise Operations
// Two's-complement semantics over sign-magnitude storage
// ============================================================================
//
// Negative values behave as if stored in infinite-width two's complement.
// Words are produced on demand through `TwosComplement` instead of
// materialising a converted copy of the magnitude.

use crate::integer::big_integer::{BigInteger, MAX_BIT_LENGTH};
use crate::integer::words::{self, increment};
use crate::numeric::{NumericError, NumericResult};
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Read-only two's-complement view of a `BigInteger`.
pub(crate) struct TwosComplement<'a> {
    mag: &'a [u32],
    negative: bool,
    /// Index, counted from the least significant end, of the lowest nonzero word
    first_nonzero: usize,
}

impl<'a> TwosComplement<'a> {
    pub(crate) fn of(value: &'a BigInteger) -> Self {
        let first_nonzero = value.mag.iter().rev().position(|&w| w != 0).unwrap_or(0);
        Self {
            mag: &value.mag,
            negative: value.signum < 0,
            first_nonzero,
        }
    }

    /// Word `n` counting from the least significant end, sign-extended past
    /// the stored magnitude.
    #[inline]
    pub(crate) fn word(&self, n: usize) -> u32 {
        if n >= self.mag.len() {
            return if self.negative { u32::MAX } else { 0 };
        }
        let w = self.mag[self.mag.len() - 1 - n];
        if !self.negative {
            w
        } else if n <= self.first_nonzero {
            w.wrapping_neg()
        } else {
            !w
        }
    }

    /// The first `len` words, most significant first.
    fn words(&self, len: usize) -> Vec<u32> {
        (0..len).rev().map(|n| self.word(n)).collect()
    }
}

impl BigInteger {
    // ========================================================================
    // Bit Queries
    // ========================================================================

    /// Number of bits in the minimal two's-complement representation,
    /// excluding the sign bit.
    pub fn bit_length(&self) -> u64 {
        let Some(&top) = self.mag.first() else {
            return 0;
        };
        let mag_bits = self.magnitude_bit_length();
        let power_of_two = top.is_power_of_two() && self.mag[1..].iter().all(|&w| w == 0);
        if self.signum < 0 && power_of_two {
            mag_bits - 1
        } else {
            mag_bits
        }
    }

    /// Bit length of the absolute value.
    #[inline]
    pub(crate) fn magnitude_bit_length(&self) -> u64 {
        self.mag.first().map_or(0, |&top| {
            (self.mag.len() as u64 - 1) * 32 + u64::from(32 - top.leading_zeros())
        })
    }

    /// Number of bits that differ from the sign bit.
    pub fn bit_count(&self) -> u64 {
        let ones: u64 = self.mag.iter().map(|w| u64::from(w.count_ones())).sum();
        match self.lowest_set_bit() {
            Some(trailing) if self.signum < 0 => ones + trailing - 1,
            _ => ones,
        }
    }

    /// Index of the rightmost one bit, `None` for zero.
    pub fn lowest_set_bit(&self) -> Option<u64> {
        let (i, &w) = self
            .mag
            .iter()
            .rev()
            .enumerate()
            .find(|&(_, &w)| w != 0)?;
        Some(i as u64 * 32 + u64::from(w.trailing_zeros()))
    }

    /// Word count of the two's-complement form, sign bit included.
    #[inline]
    fn int_length(&self) -> usize {
        (self.bit_length() / 32 + 1) as usize
    }

    pub fn test_bit(&self, n: u32) -> bool {
        let view = TwosComplement::of(self);
        (view.word((n / 32) as usize) >> (n % 32)) & 1 != 0
    }

    // ========================================================================
    // Single-Bit Updates
    // ========================================================================

    pub fn set_bit(&self, n: u32) -> NumericResult<Self> {
        self.update_bit(n, |word, mask| word | mask)
    }

    pub fn clear_bit(&self, n: u32) -> NumericResult<Self> {
        self.update_bit(n, |word, mask| word & !mask)
    }

    pub fn flip_bit(&self, n: u32) -> NumericResult<Self> {
        self.update_bit(n, |word, mask| word ^ mask)
    }

    fn update_bit(&self, n: u32, op: impl Fn(u32, u32) -> u32) -> NumericResult<Self> {
        if u64::from(n) >= MAX_BIT_LENGTH {
            return Err(NumericError::BitLengthOverflow);
        }
        let index = (n / 32) as usize;
        let len = self.int_length().max(index + 2);
        let mut words = TwosComplement::of(self).words(len);
        let slot = len - 1 - index;
        words[slot] = op(words[slot], 1 << (n % 32));
        Self::from_twos_complement_words(&words).check_range()
    }

    // ========================================================================
    // Logical Operations
    // ========================================================================

    pub fn and(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a & b)
    }

    pub fn or(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a | b)
    }

    pub fn xor(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a ^ b)
    }

    pub fn and_not(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a & !b)
    }

    /// Bitwise complement, equal to `-self - 1`.
    pub fn not(&self) -> Self {
        let view = TwosComplement::of(self);
        let words: Vec<u32> = (0..self.int_length()).rev().map(|n| !view.word(n)).collect();
        Self::from_twos_complement_words(&words)
    }

    fn combine(&self, other: &Self, op: impl Fn(u32, u32) -> u32) -> Self {
        let len = self.int_length().max(other.int_length());
        let (a, b) = (TwosComplement::of(self), TwosComplement::of(other));
        let words: Vec<u32> = (0..len).rev().map(|n| op(a.word(n), b.word(n))).collect();
        Self::from_twos_complement_words(&words)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// `self << n`; a negative distance shifts right.
    pub fn shift_left(&self, n: i32) -> NumericResult<Self> {
        match n {
            0 => Ok(self.clone()),
            n if n > 0 => self.shl_checked(u64::from(n.unsigned_abs())),
            n => Ok(self.shr_bits(n.unsigned_abs() as usize)),
        }
    }

    /// `self >> n` with floor semantics; a negative distance shifts left.
    pub fn shift_right(&self, n: i32) -> NumericResult<Self> {
        match n {
            0 => Ok(self.clone()),
            n if n > 0 => Ok(self.shr_bits(n.unsigned_abs() as usize)),
            n => self.shl_checked(u64::from(n.unsigned_abs())),
        }
    }

    /// Left shift that refuses to grow past the bit-length budget.
    pub(crate) fn shl_checked(&self, n: u64) -> NumericResult<Self> {
        if self.signum == 0 {
            return Ok(Self::zero());
        }
        if self.magnitude_bit_length() + n > MAX_BIT_LENGTH {
            return Err(NumericError::BitLengthOverflow);
        }
        Ok(self.shl_bits(n as usize))
    }

    #[inline]
    pub(crate) fn shl_bits(&self, n: usize) -> Self {
        if self.signum == 0 || n == 0 {
            return self.clone();
        }
        Self::from_stripped(self.signum, words::shift_left(&self.mag, n))
    }

    /// Arithmetic right shift; negative values round toward negative infinity.
    pub(crate) fn shr_bits(&self, n: usize) -> Self {
        if self.signum == 0 || n == 0 {
            return self.clone();
        }
        let mut shifted = words::shift_right(&self.mag, n);
        if self.signum < 0 && self.loses_one_bits(n) {
            shifted = increment(&shifted);
        }
        Self::from_stripped(self.signum, shifted)
    }

    /// Whether a right shift by `n` discards any one bit of the magnitude.
    fn loses_one_bits(&self, n: usize) -> bool {
        let (word_shift, bit_shift) = (n / 32, (n % 32) as u32);
        let len = self.mag.len();
        if word_shift >= len {
            return true;
        }
        let whole_words_lost = self.mag[len - word_shift..].iter().any(|&w| w != 0);
        whole_words_lost || (bit_shift != 0 && self.mag[len - 1 - word_shift] << (32 - bit_shift) != 0)
    }
}

impl BitAnd for &BigInteger {
    type Output = BigInteger;

    fn bitand(self, rhs: Self) -> BigInteger {
        self.and(rhs)
    }
}

impl BitOr for &BigInteger {
    type Output = BigInteger;

    fn bitor(self, rhs: Self) -> BigInteger {
        self.or(rhs)
    }
}

impl BitXor for &BigInteger {
    type Output = BigInteger;

    fn bitxor(self, rhs: Self) -> BigInteger {
        self.xor(rhs)
    }
}

impl Not for &BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        BigInteger::not(self)
    }
}
