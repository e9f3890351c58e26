// ============================================================================
// Division
// Knuth Algorithm D over 32-bit words, plus a 128-by-64 bit fast path
// ============================================================================

use crate::integer::big_integer::BigInteger;
use crate::integer::words::{
    compare_magnitude, primitive_shift_left, primitive_shift_right, strip_leading_zeros_vec,
    LOW_MASK,
};
use crate::numeric::{NumericError, NumericResult};
use std::cmp::Ordering;

/// Scratch buffer for long division.
///
/// Holds the normalised dividend with one extra leading word. Quotient
/// digits are produced from the top; the remainder is left in the low words.
struct MutableMagnitude {
    words: Vec<u32>,
}

impl MutableMagnitude {
    /// Loads `dividend << shift` with a spare leading word for the overflow bits.
    fn normalized(dividend: &[u32], shift: u32) -> Self {
        let mut words = Vec::with_capacity(dividend.len() + 1);
        words.push(0);
        words.extend_from_slice(dividend);
        primitive_shift_left(&mut words, shift);
        Self { words }
    }

    /// Subtracts `qhat * divisor` from the window starting at word `j`.
    /// Returns true when the result went negative.
    fn subtract_product(&mut self, j: usize, qhat: u64, divisor: &[u32]) -> bool {
        let n = divisor.len();
        let mut carry = 0u64;
        let mut borrow = 0u64;
        for i in (0..n).rev() {
            let product = qhat * u64::from(divisor[i]) + carry;
            carry = product >> 32;
            let (diff, underflow) =
                u64::from(self.words[j + 1 + i]).overflowing_sub((product & LOW_MASK) + borrow);
            self.words[j + 1 + i] = diff as u32;
            borrow = u64::from(underflow);
        }
        let (diff, underflow) = u64::from(self.words[j]).overflowing_sub(carry + borrow);
        self.words[j] = diff as u32;
        underflow
    }

    /// Adds `divisor` back into the window starting at word `j`.
    fn add_back(&mut self, j: usize, divisor: &[u32]) {
        let mut carry = 0u64;
        for i in (0..divisor.len()).rev() {
            let sum = u64::from(self.words[j + 1 + i]) + u64::from(divisor[i]) + carry;
            self.words[j + 1 + i] = sum as u32;
            carry = sum >> 32;
        }
        self.words[j] = self.words[j].wrapping_add(carry as u32);
    }

    /// Estimates the next quotient word from the top three dividend words
    /// and the top two divisor words. The estimate is at most one too large.
    fn estimate_quotient(&self, j: usize, v0: u64, v1: u64) -> u64 {
        let numerator = (u64::from(self.words[j]) << 32) | u64::from(self.words[j + 1]);
        let mut qhat = numerator / v0;
        let mut rhat = numerator % v0;
        while qhat > LOW_MASK || qhat * v1 > ((rhat << 32) | u64::from(self.words[j + 2])) {
            qhat -= 1;
            rhat += v0;
            if rhat > LOW_MASK {
                break;
            }
        }
        qhat
    }

    /// Divides by a normalised divisor of at least two words.
    fn divide_knuth(mut self, divisor: &[u32], shift: u32) -> (Vec<u32>, Vec<u32>) {
        let n = divisor.len();
        let m = self.words.len() - n - 1;
        let (v0, v1) = (u64::from(divisor[0]), u64::from(divisor[1]));

        let mut quotient = vec![0u32; m + 1];
        for (j, q) in quotient.iter_mut().enumerate() {
            let mut qhat = self.estimate_quotient(j, v0, v1);
            if self.subtract_product(j, qhat, divisor) {
                qhat -= 1;
                self.add_back(j, divisor);
            }
            *q = qhat as u32;
        }

        let mut remainder = self.words.split_off(m + 1);
        primitive_shift_right(&mut remainder, shift);
        (
            strip_leading_zeros_vec(quotient),
            strip_leading_zeros_vec(remainder),
        )
    }
}

/// Divides a magnitude by a single word.
pub(crate) fn divide_one_word(dividend: &[u32], divisor: u32) -> (Vec<u32>, u32) {
    let divisor = u64::from(divisor);
    let mut remainder = 0u64;
    let mut quotient = Vec::with_capacity(dividend.len());
    for &w in dividend {
        let current = (remainder << 32) | u64::from(w);
        quotient.push((current / divisor) as u32);
        remainder = current % divisor;
    }
    (strip_leading_zeros_vec(quotient), remainder as u32)
}

/// Quotient and remainder of two magnitudes. `divisor` must be nonzero.
pub(crate) fn div_rem_magnitude(dividend: &[u32], divisor: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(!divisor.is_empty());
    match compare_magnitude(dividend, divisor) {
        Ordering::Less => (Vec::new(), dividend.to_vec()),
        Ordering::Equal => (vec![1], Vec::new()),
        Ordering::Greater if divisor.len() == 1 => {
            let (quotient, remainder) = divide_one_word(dividend, divisor[0]);
            let remainder = if remainder == 0 {
                Vec::new()
            } else {
                vec![remainder]
            };
            (quotient, remainder)
        }
        Ordering::Greater => {
            let shift = divisor[0].leading_zeros();
            let mut normalized = divisor.to_vec();
            primitive_shift_left(&mut normalized, shift);
            MutableMagnitude::normalized(dividend, shift).divide_knuth(&normalized, shift)
        }
    }
}

/// Divides the 128-bit value `hi:lo` by `divisor`.
///
/// Returns `None` when the quotient does not fit in 64 bits (which covers
/// `hi >= divisor`, including a zero divisor).
pub fn div_rem_wide(hi: u64, lo: u64, divisor: u64) -> Option<(u64, u64)> {
    const BASE: u64 = 1 << 32;
    if hi >= divisor {
        return None;
    }
    if hi == 0 {
        return Some((lo / divisor, lo % divisor));
    }

    // normalise so the divisor's top bit is set
    let shift = divisor.leading_zeros();
    let d = divisor << shift;
    let un32 = if shift == 0 {
        hi
    } else {
        (hi << shift) | (lo >> (64 - shift))
    };
    let un10 = lo << shift;

    let (vn1, vn0) = (d >> 32, d & LOW_MASK);
    let (un1, un0) = (un10 >> 32, un10 & LOW_MASK);

    let mut q1 = un32 / vn1;
    let mut rhat = un32 % vn1;
    while q1 >= BASE || q1 * vn0 > (rhat << 32) + un1 {
        q1 -= 1;
        rhat += vn1;
        if rhat >= BASE {
            break;
        }
    }

    let un21 = (un32 << 32)
        .wrapping_add(un1)
        .wrapping_sub(q1.wrapping_mul(d));

    let mut q0 = un21 / vn1;
    rhat = un21 % vn1;
    while q0 >= BASE || q0 * vn0 > (rhat << 32) + un0 {
        q0 -= 1;
        rhat += vn1;
        if rhat >= BASE {
            break;
        }
    }

    let remainder = (un21 << 32)
        .wrapping_add(un0)
        .wrapping_sub(q0.wrapping_mul(d))
        >> shift;
    Some(((q1 << 32) | q0, remainder))
}

impl BigInteger {
    // ========================================================================
    // Division
    // ========================================================================

    /// Truncating division and remainder. The remainder takes the sign of
    /// the dividend.
    pub fn divide_and_remainder(&self, divisor: &Self) -> NumericResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(self.div_rem_unchecked(divisor))
    }

    pub fn divide(&self, divisor: &Self) -> NumericResult<Self> {
        self.divide_and_remainder(divisor).map(|(quotient, _)| quotient)
    }

    pub fn remainder(&self, divisor: &Self) -> NumericResult<Self> {
        self.divide_and_remainder(divisor).map(|(_, remainder)| remainder)
    }

    /// Least nonnegative residue modulo a positive `modulus`.
    pub fn modulo(&self, modulus: &Self) -> NumericResult<Self> {
        match modulus.signum {
            0 => Err(NumericError::DivisionByZero),
            s if s < 0 => Err(NumericError::InvalidInput),
            _ => {
                let remainder = self.remainder(modulus)?;
                if remainder.is_negative() {
                    Ok(remainder.add_unchecked(modulus))
                } else {
                    Ok(remainder)
                }
            }
        }
    }

    /// Division for callers that have already ruled out a zero divisor.
    pub(crate) fn div_rem_unchecked(&self, divisor: &Self) -> (Self, Self) {
        if self.is_zero() {
            return (Self::zero(), Self::zero());
        }
        let (quotient, remainder) = div_rem_magnitude(&self.mag, &divisor.mag);
        (
            Self::from_stripped(self.signum * divisor.signum, quotient),
            Self::from_stripped(self.signum, remainder),
        )
    }
}
