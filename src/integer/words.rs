// ============================================================================
// Word-Array Primitives
// Operations on big-endian u32 magnitudes (most significant word first)
// ============================================================================
//
// None of these functions interpret a sign. Inputs are assumed stripped
// unless stated otherwise, and outputs are always stripped.

use std::cmp::Ordering;

/// Mask for the low 32 bits of a u64.
pub(crate) const LOW_MASK: u64 = 0xFFFF_FFFF;

/// Returns the slice with leading zero words removed.
#[inline]
pub(crate) fn strip_leading_zeros(words: &[u32]) -> &[u32] {
    let start = words.iter().position(|&w| w != 0).unwrap_or(words.len());
    &words[start..]
}

/// Removes leading zero words in place.
#[inline]
pub(crate) fn strip_leading_zeros_vec(mut words: Vec<u32>) -> Vec<u32> {
    let start = words.iter().position(|&w| w != 0).unwrap_or(words.len());
    if start > 0 {
        words.drain(..start);
    }
    words
}

/// Converts a negative two's-complement word run into its unsigned magnitude
/// by inverting every word and adding one.
pub(crate) fn magnitude_from_twos_complement(words: &[u32]) -> Vec<u32> {
    let mut mag: Vec<u32> = words.iter().map(|&w| !w).collect();
    let carry = add_one(&mut mag, 1);
    if carry != 0 {
        mag.insert(0, carry as u32);
    }
    strip_leading_zeros_vec(mag)
}

/// Packs big-endian bytes into big-endian words. A short leading group is
/// padded with `fill` (0x00 for magnitudes, 0xFF to sign-extend negatives).
pub(crate) fn words_from_be_bytes(bytes: &[u8], fill: u8) -> Vec<u32> {
    let len = bytes.len().div_ceil(4);
    let mut words = vec![0u32; len];
    for (i, chunk) in bytes.rchunks(4).enumerate() {
        let mut buf = [fill; 4];
        buf[4 - chunk.len()..].copy_from_slice(chunk);
        words[len - 1 - i] = u32::from_be_bytes(buf);
    }
    words
}

// ============================================================================
// Shifts
// ============================================================================

/// Returns `mag << bits`, growing the word count as needed.
pub(crate) fn shift_left(mag: &[u32], bits: usize) -> Vec<u32> {
    if mag.is_empty() {
        return Vec::new();
    }
    let word_shift = bits / 32;
    let bit_shift = (bits % 32) as u32;

    let mut out = Vec::with_capacity(mag.len() + word_shift + 1);
    if bit_shift == 0 {
        out.extend_from_slice(mag);
    } else {
        let high = mag[0] >> (32 - bit_shift);
        if high != 0 {
            out.push(high);
        }
        for (i, &w) in mag.iter().enumerate() {
            let next = mag.get(i + 1).map_or(0, |&n| n >> (32 - bit_shift));
            out.push((w << bit_shift) | next);
        }
    }
    out.resize(out.len() + word_shift, 0);
    out
}

/// Returns `mag >> bits`, discarding the bits shifted out.
pub(crate) fn shift_right(mag: &[u32], bits: usize) -> Vec<u32> {
    let word_shift = bits / 32;
    if word_shift >= mag.len() {
        return Vec::new();
    }
    let kept = &mag[..mag.len() - word_shift];
    let bit_shift = (bits % 32) as u32;
    if bit_shift == 0 {
        return kept.to_vec();
    }

    let mut out = Vec::with_capacity(kept.len());
    for (i, &w) in kept.iter().enumerate() {
        let carried = if i == 0 {
            0
        } else {
            kept[i - 1] << (32 - bit_shift)
        };
        out.push((w >> bit_shift) | carried);
    }
    strip_leading_zeros_vec(out)
}

/// Shifts `words` left by `n < 32` bits in place. Bits leaving the top word
/// are lost, so callers reserve a leading zero word when they matter.
pub(crate) fn primitive_shift_left(words: &mut [u32], n: u32) {
    debug_assert!(n < 32);
    if n == 0 || words.is_empty() {
        return;
    }
    let last = words.len() - 1;
    for i in 0..last {
        words[i] = (words[i] << n) | (words[i + 1] >> (32 - n));
    }
    words[last] <<= n;
}

/// Shifts `words` right by `n < 32` bits in place.
pub(crate) fn primitive_shift_right(words: &mut [u32], n: u32) {
    debug_assert!(n < 32);
    if n == 0 || words.is_empty() {
        return;
    }
    for i in (1..words.len()).rev() {
        words[i] = (words[i] >> n) | (words[i - 1] << (32 - n));
    }
    words[0] >>= n;
}

// ============================================================================
// Comparison
// ============================================================================

/// Compares two stripped magnitudes: the longer one wins, otherwise the
/// first differing word from the most significant end decides.
#[inline]
pub(crate) fn compare_magnitude(a: &[u32], b: &[u32]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// ============================================================================
// Addition / Subtraction
// ============================================================================

/// Returns `a + b`.
pub(crate) fn add_magnitudes(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let offset = long.len() - short.len();

    let mut out = vec![0u32; long.len() + 1];
    let mut carry = 0u64;
    for i in (0..long.len()).rev() {
        let addend = if i >= offset {
            u64::from(short[i - offset])
        } else {
            0
        };
        let sum = u64::from(long[i]) + addend + carry;
        out[i + 1] = sum as u32;
        carry = sum >> 32;
    }
    out[0] = carry as u32;
    strip_leading_zeros_vec(out)
}

/// Returns `big - little`. Requires `big >= little`.
pub(crate) fn subtract_magnitudes(big: &[u32], little: &[u32]) -> Vec<u32> {
    debug_assert!(compare_magnitude(big, little) != Ordering::Less);
    let offset = big.len() - little.len();

    let mut out = vec![0u32; big.len()];
    let mut borrow = 0u64;
    for i in (0..big.len()).rev() {
        let subtrahend = if i >= offset {
            u64::from(little[i - offset])
        } else {
            0
        };
        let (diff, underflow) = u64::from(big[i]).overflowing_sub(subtrahend + borrow);
        out[i] = diff as u32;
        borrow = u64::from(underflow);
    }
    strip_leading_zeros_vec(out)
}

/// Returns `mag + 1`.
pub(crate) fn increment(mag: &[u32]) -> Vec<u32> {
    let mut out = mag.to_vec();
    if add_one(&mut out, 1) != 0 {
        out.insert(0, 1);
    }
    out
}

/// Computes `mag = mag * factor + addend`, growing `mag` when needed.
pub(crate) fn mul_add_word(mag: &mut Vec<u32>, factor: u32, addend: u32) {
    let mut carry = u64::from(addend);
    for w in mag.iter_mut().rev() {
        let product = u64::from(*w) * u64::from(factor) + carry;
        *w = product as u32;
        carry = product >> 32;
    }
    if carry != 0 {
        mag.insert(0, carry as u32);
    }
}

// ============================================================================
// Squaring Helpers
// ============================================================================

/// Adds `carry` into the number held by `out`, starting at its least
/// significant word. Returns the carry leaving the top word.
#[inline]
pub(crate) fn add_one(out: &mut [u32], carry: u64) -> u64 {
    let mut carry = carry;
    for w in out.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = u64::from(*w) + carry;
        *w = sum as u32;
        carry = sum >> 32;
    }
    carry
}

/// Computes `out += inp * k` over equal-length runs and returns the carry
/// word that belongs just above `out`.
#[inline]
pub(crate) fn mul_add(out: &mut [u32], inp: &[u32], k: u32) -> u64 {
    debug_assert_eq!(out.len(), inp.len());
    let k = u64::from(k);
    let mut carry = 0u64;
    for (o, &i) in out.iter_mut().rev().zip(inp.iter().rev()) {
        let product = u64::from(i) * k + u64::from(*o) + carry;
        *o = product as u32;
        carry = product >> 32;
    }
    carry
}

/// Adds a two-word value at the low end of `out`, propagating the carry.
#[inline]
pub(crate) fn add_wide(out: &mut [u32], value: u64) -> u64 {
    match out.split_last_mut() {
        None => value,
        Some((last, rest)) => {
            let sum = u64::from(*last) + (value & LOW_MASK);
            *last = sum as u32;
            add_one(rest, (sum >> 32) + (value >> 32))
        }
    }
}

// ============================================================================
// Exact Division by Three
// ============================================================================

/// Divides a magnitude known to be a multiple of 3, using the modular
/// inverse of 3 modulo 2^32 from the least significant word upward.
pub(crate) fn exact_divide_by_3(mag: &[u32]) -> Vec<u32> {
    let mut out = vec![0u32; mag.len()];
    let mut borrow = 0u32;
    for i in (0..mag.len()).rev() {
        let x = mag[i];
        let w = x.wrapping_sub(borrow);
        borrow = u32::from(borrow > x);

        let q = w.wrapping_mul(0xAAAA_AAAB);
        out[i] = q;

        if q >= 0x5555_5556 {
            borrow += 1;
            if q >= 0xAAAA_AAAB {
                borrow += 1;
            }
        }
    }
    strip_leading_zeros_vec(out)
}
