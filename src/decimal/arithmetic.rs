// ============================================================================
// Decimal Arithmetic
// Addition, subtraction, multiplication, negation and powers
// ============================================================================

use crate::context::{MathContext, RoundingMode};
use crate::decimal::big_decimal::{check_scale, check_scale_nonzero, BigDecimal};
use crate::decimal::rounding::strip_zeros_to_match_scale;
use crate::decimal::unscaled::{long_digit_length, Unscaled};
use crate::numeric::{NumericError, NumericResult};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Largest exponent magnitude accepted by `pow` and `pow_with_context`.
pub const MAX_POW_EXPONENT: i32 = 999_999_999;

/// Brings both coefficients to the larger of the two scales.
fn align<'a>(
    x: &'a BigDecimal,
    y: &'a BigDecimal,
) -> NumericResult<(Cow<'a, Unscaled>, Cow<'a, Unscaled>, i32)> {
    let raise = |from: i32, to: i32| (i64::from(to) - i64::from(from)) as u32;
    match x.scale.cmp(&y.scale) {
        Ordering::Equal => Ok((Cow::Borrowed(&x.unscaled), Cow::Borrowed(&y.unscaled), x.scale)),
        Ordering::Less => {
            let raised = x.unscaled.multiply_power_ten(raise(x.scale, y.scale))?;
            Ok((Cow::Owned(raised), Cow::Borrowed(&y.unscaled), y.scale))
        }
        Ordering::Greater => {
            let raised = y.unscaled.multiply_power_ten(raise(y.scale, x.scale))?;
            Ok((Cow::Borrowed(&x.unscaled), Cow::Owned(raised), x.scale))
        }
    }
}

/// Replaces an operand that lies entirely below the rounding position of
/// the context with a single sticky digit of the same sign. The rounded
/// sum is unchanged and the exact addition stays small.
fn pre_align<'a>(
    x: &'a BigDecimal,
    y: &'a BigDecimal,
    mc: MathContext,
) -> NumericResult<(Cow<'a, BigDecimal>, Cow<'a, BigDecimal>)> {
    let (big, small, small_is_y) = if x.scale < y.scale {
        (x, y, true)
    } else {
        (y, x, false)
    };

    let big_scale = i64::from(big.scale);
    let est_result_ulp_scale = big_scale - i64::from(big.precision()) + i64::from(mc.precision());
    let small_high_digit_pos = i64::from(small.scale) - i64::from(small.precision()) + 1;
    if small_high_digit_pos > big_scale + 2 && small_high_digit_pos > est_result_ulp_scale + 2 {
        let sticky_scale = check_scale_nonzero(big_scale.max(est_result_ulp_scale) + 3)?;
        let sticky = BigDecimal::from_unscaled(i64::from(small.signum()), sticky_scale);
        return Ok(if small_is_y {
            (Cow::Borrowed(x), Cow::Owned(sticky))
        } else {
            (Cow::Owned(sticky), Cow::Borrowed(y))
        });
    }
    Ok((Cow::Borrowed(x), Cow::Borrowed(y)))
}

/// Rounds the nonzero operand of a sum with zero, then moves its scale as
/// close to `preferred` as the context precision allows.
fn round_toward_preferred_scale(
    value: &BigDecimal,
    preferred: i32,
    mc: MathContext,
) -> NumericResult<BigDecimal> {
    let result = mc.round(value)?;
    match result.scale.cmp(&preferred) {
        Ordering::Equal => Ok(result),
        Ordering::Greater => Ok(strip_zeros_to_match_scale(
            result.unscaled,
            result.scale,
            i64::from(preferred),
        )),
        Ordering::Less => {
            let precision_diff = i64::from(mc.precision()) - i64::from(result.precision());
            let scale_diff = i64::from(preferred) - i64::from(result.scale);
            if precision_diff >= scale_diff {
                result.set_scale(preferred, RoundingMode::Unnecessary)
            } else {
                let reachable = (i64::from(result.scale) + precision_diff) as i32;
                result.set_scale(reachable, RoundingMode::Unnecessary)
            }
        }
    }
}

impl BigDecimal {
    // ========================================================================
    // Addition and Subtraction
    // ========================================================================

    /// Exact sum; the result scale is the larger operand scale.
    pub fn add(&self, other: &Self) -> NumericResult<BigDecimal> {
        let (x, y, scale) = align(self, other)?;
        Ok(BigDecimal::from_parts(x.add(&y)?, scale))
    }

    /// Sum rounded to `mc`.
    pub fn add_with_context(&self, other: &Self, mc: MathContext) -> NumericResult<BigDecimal> {
        if mc.is_unlimited() {
            return self.add(other);
        }

        let preferred = self.scale.max(other.scale);
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ok(BigDecimal::zero_with_scale(preferred)),
            (true, false) => return round_toward_preferred_scale(other, preferred, mc),
            (false, true) => return round_toward_preferred_scale(self, preferred, mc),
            (false, false) => {}
        }

        let (x, y) = if self.scale != other.scale {
            pre_align(self, other, mc)?
        } else {
            (Cow::Borrowed(self), Cow::Borrowed(other))
        };
        mc.round(&x.add(&y)?)
    }

    /// Exact difference; the result scale is the larger operand scale.
    pub fn subtract(&self, other: &Self) -> NumericResult<BigDecimal> {
        self.add(&other.negate())
    }

    /// Difference rounded to `mc`.
    pub fn subtract_with_context(&self, other: &Self, mc: MathContext) -> NumericResult<BigDecimal> {
        self.add_with_context(&other.negate(), mc)
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Exact product; the result scale is the sum of the operand scales.
    pub fn multiply(&self, other: &Self) -> NumericResult<BigDecimal> {
        let product = self.unscaled.multiply(&other.unscaled)?;
        let scale = check_scale(
            product.is_zero(),
            i64::from(self.scale) + i64::from(other.scale),
        )?;
        Ok(BigDecimal::from_parts(product, scale))
    }

    /// Product rounded to `mc`.
    pub fn multiply_with_context(&self, other: &Self, mc: MathContext) -> NumericResult<BigDecimal> {
        mc.round(&self.multiply(other)?)
    }

    // ========================================================================
    // Sign
    // ========================================================================

    pub fn negate(&self) -> BigDecimal {
        BigDecimal::with_precision(self.unscaled.negate(), self.scale, self.cached_precision())
    }

    pub fn negate_with_context(&self, mc: MathContext) -> NumericResult<BigDecimal> {
        mc.round(&self.negate())
    }

    pub fn abs(&self) -> BigDecimal {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    pub fn abs_with_context(&self, mc: MathContext) -> NumericResult<BigDecimal> {
        mc.round(&self.abs())
    }

    /// Unary plus: the value itself.
    pub fn plus(&self) -> BigDecimal {
        self.clone()
    }

    /// Unary plus rounded to `mc`.
    pub fn plus_with_context(&self, mc: MathContext) -> NumericResult<BigDecimal> {
        mc.round(self)
    }

    // ========================================================================
    // Powers
    // ========================================================================

    /// Exact `self^n` for `n` in `0..=999_999_999`. The result scale is
    /// `scale × n`.
    ///
    /// # Example
    /// ```
    /// use precise_decimal::BigDecimal;
    ///
    /// let rate: BigDecimal = "1.5".parse().unwrap();
    /// assert_eq!(rate.pow(3).unwrap().to_string(), "3.375");
    /// ```
    pub fn pow(&self, n: i32) -> NumericResult<BigDecimal> {
        if !(0..=MAX_POW_EXPONENT).contains(&n) {
            return Err(NumericError::ExponentOutOfRange);
        }
        let scale = check_scale(self.is_zero(), i64::from(self.scale) * i64::from(n))?;
        let unscaled = match &self.unscaled {
            Unscaled::Compact(v) => match v.checked_pow(n as u32) {
                Some(power) => Unscaled::Compact(power),
                None => Unscaled::from_big(self.unscaled.as_big().pow(n)?),
            },
            Unscaled::Big(b) => Unscaled::from_big(b.pow(n)?),
        };
        Ok(BigDecimal::from_parts(unscaled, scale))
    }

    /// `self^n` rounded to `mc`, for `n` in `-999_999_999..=999_999_999`.
    ///
    /// Uses left-to-right binary exponentiation at `mc.precision` plus the
    /// digit count of `n` plus one working digits, as in ANSI X3.274-1996.
    /// Negative exponents take the reciprocal of the positive power.
    pub fn pow_with_context(&self, n: i32, mc: MathContext) -> NumericResult<BigDecimal> {
        if mc.is_unlimited() {
            return self.pow(n);
        }
        if !(-MAX_POW_EXPONENT..=MAX_POW_EXPONENT).contains(&n) {
            return Err(NumericError::ExponentOutOfRange);
        }
        if n == 0 {
            return Ok(BigDecimal::one());
        }

        let magnitude = n.unsigned_abs();
        let exponent_digits = long_digit_length(u64::from(magnitude));
        if exponent_digits > mc.precision() {
            return Err(NumericError::ExponentOutOfRange);
        }
        let work = mc.with_precision(mc.precision().saturating_add(exponent_digits + 1));

        let mut acc = BigDecimal::one();
        let mut seen_bit = false;
        for bit in (0..31).rev() {
            if seen_bit {
                acc = acc.multiply_with_context(&acc, work)?;
            }
            if magnitude & (1 << bit) != 0 {
                seen_bit = true;
                acc = acc.multiply_with_context(self, work)?;
            }
        }
        if n < 0 {
            acc = BigDecimal::one().divide_with_context(&acc, work)?;
        }
        mc.round(&acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_aligns_scales() {
        let sum = dec("1.5").add(&dec("2.25")).unwrap();
        assert_eq!(sum.to_string(), "3.75");
        assert_eq!(sum.scale(), 2);
        assert_eq!(dec("1E+2").add(&dec("1")).unwrap().to_string(), "101");
        assert_eq!(dec("0.00").add(&dec("0")).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_add_overflow_inflates() {
        let max = BigDecimal::from(i64::MAX);
        let sum = max.add(&BigDecimal::one()).unwrap();
        assert_eq!(sum.to_string(), "9223372036854775808");
        assert!(!sum.is_compact());
        let back = sum.subtract(&BigDecimal::one()).unwrap();
        assert!(back.is_compact());
        let scaled = BigDecimal::from_unscaled(i64::MAX, 0).add(&dec("0.1")).unwrap();
        assert_eq!(scaled.to_string(), "9223372036854775807.1");
    }

    #[test]
    fn test_subtract() {
        assert_eq!(dec("1.00").subtract(&dec("2.5")).unwrap().to_string(), "-1.50");
        let min = BigDecimal::from(i64::MIN);
        assert_eq!(
            BigDecimal::zero().subtract(&min).unwrap().to_string(),
            "9223372036854775808"
        );
    }

    #[test]
    fn test_add_with_context_rounds() {
        let mc = MathContext::new(3);
        assert_eq!(dec("1.23").add_with_context(&dec("0.456"), mc).unwrap().to_string(), "1.69");
        assert_eq!(dec("999").add_with_context(&dec("1"), mc).unwrap().to_string(), "1.00E+3");
    }

    #[test]
    fn test_add_with_context_negligible_operand() {
        let mc = MathContext::with_rounding(5, RoundingMode::Up);
        let tiny = dec("1E-50");
        assert_eq!(dec("1.0000").add_with_context(&tiny, mc).unwrap().to_string(), "1.0001");
        let mc = MathContext::with_rounding(5, RoundingMode::Floor);
        assert_eq!(
            dec("1.0000").add_with_context(&tiny.negate(), mc).unwrap().to_string(),
            "0.99999"
        );
        let mc = MathContext::with_rounding(5, RoundingMode::HalfEven);
        assert_eq!(dec("12345").add_with_context(&tiny, mc).unwrap().to_string(), "12345");
    }

    #[test]
    fn test_add_with_context_zero_operand() {
        let mc = MathContext::new(3);
        let sum = BigDecimal::zero_with_scale(5).add_with_context(&dec("1.5"), mc).unwrap();
        assert_eq!(sum.to_string(), "1.50");
        let sum = dec("0.0").add_with_context(&dec("12300"), mc).unwrap();
        assert_eq!(sum.to_string(), "1.23E+4");
        let sum = dec("0.00").add_with_context(&dec("0.0"), mc).unwrap();
        assert!(sum.is_identical(&dec("0.00")));
        let sum = dec("0").add_with_context(&dec("1.000"), mc).unwrap();
        assert!(sum.is_identical(&dec("1.00")));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(dec("123").multiply(&dec("456")).unwrap().to_string(), "56088");
        let product = dec("1.5").multiply(&dec("-0.02")).unwrap();
        assert_eq!(product.to_string(), "-0.030");
        assert_eq!(product.scale(), 3);
        let big = BigDecimal::from(i64::MAX).multiply(&BigDecimal::from(i64::MAX)).unwrap();
        assert_eq!(big.to_string(), "85070591730234615847396907784232501249");
    }

    #[test]
    fn test_multiply_scale_bounds() {
        let x = BigDecimal::from_unscaled(3, i32::MAX);
        assert_eq!(x.multiply(&x), Err(NumericError::Underflow));
        let zero = BigDecimal::zero_with_scale(i32::MAX);
        assert_eq!(zero.multiply(&x).unwrap().scale(), i32::MAX);
    }

    #[test]
    fn test_multiply_with_context() {
        let mc = MathContext::with_rounding(4, RoundingMode::HalfEven);
        let product = dec("1.2345").multiply_with_context(&dec("2"), mc).unwrap();
        assert_eq!(product.to_string(), "2.469");
    }

    #[test]
    fn test_sign_operations() {
        let value = dec("-1.50");
        assert_eq!(value.abs().to_string(), "1.50");
        assert_eq!(value.negate().to_string(), "1.50");
        assert!(value.plus().is_identical(&value));
        let mc = MathContext::new(2);
        assert_eq!(value.plus_with_context(mc).unwrap().to_string(), "-1.5");
        assert_eq!(value.abs_with_context(mc).unwrap().to_string(), "1.5");
        assert_eq!(value.negate_with_context(mc).unwrap().to_string(), "1.5");
    }

    #[test]
    fn test_pow() {
        assert_eq!(dec("1.1").pow(2).unwrap().to_string(), "1.21");
        assert!(dec("7.25").pow(0).unwrap().is_identical(&BigDecimal::one()));
        assert_eq!(dec("10").pow(20).unwrap().to_string(), "100000000000000000000");
        assert_eq!(dec("-2").pow(63).unwrap().to_string(), "-9223372036854775808");
        assert_eq!(dec("2").pow(-1), Err(NumericError::ExponentOutOfRange));
        assert_eq!(dec("2").pow(1_000_000_000), Err(NumericError::ExponentOutOfRange));
    }

    #[test]
    fn test_pow_with_context() {
        let mc = MathContext::with_rounding(10, RoundingMode::HalfEven);
        assert_eq!(dec("2").pow_with_context(10, mc).unwrap().to_string(), "1024");
        assert_eq!(dec("2").pow_with_context(-2, mc).unwrap().to_string(), "0.25");
        assert_eq!(
            dec("3").pow_with_context(-1, mc).unwrap().to_string(),
            "0.3333333333"
        );
        assert_eq!(dec("1.1").pow_with_context(0, mc).unwrap().to_string(), "1");
        assert_eq!(
            dec("2").pow_with_context(100, mc).unwrap().to_string(),
            "1.267650600E+30"
        );
        assert_eq!(
            dec("0").pow_with_context(-1, mc),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            dec("2").pow_with_context(1_000, MathContext::new(3)),
            Err(NumericError::ExponentOutOfRange)
        );
    }
}
